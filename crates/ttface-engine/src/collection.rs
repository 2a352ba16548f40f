// this_file: crates/ttface-engine/src/collection.rs

use read_fonts::FileRef;

/// Number of faces in a TrueType collection, or -1 for anything else
pub(crate) fn fonts_in_collection(data: &[u8]) -> i32 {
    match FileRef::new(data) {
        Ok(FileRef::Collection(collection)) => i32::try_from(collection.len()).unwrap_or(-1),
        Ok(FileRef::Font(_)) | Err(_) => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_not_a_collection() {
        assert_eq!(fonts_in_collection(b""), -1);
        assert_eq!(fonts_in_collection(b"ttcf"), -1);
    }
}
