// this_file: crates/ttface-test-data/src/sfnt.rs

//! Collection header assembly
//!
//! `FontBuilder` only emits standalone fonts. Table offsets in an sfnt are
//! relative to the start of the file, so every member of a collection has its
//! table records shifted by the member's position.

const TTC_TAG: &[u8; 4] = b"ttcf";
const TTC_VERSION: u32 = 0x0001_0000;
const TABLE_RECORD_LEN: usize = 16;
const TABLE_DIRECTORY_LEN: usize = 12;

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_be_bytes(data.get(at..at + 2)?.try_into().ok()?))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_be_bytes(data.get(at..at + 4)?.try_into().ok()?))
}

/// Moves every table record of `font` forward by `base` bytes
fn rebase(font: &mut [u8], base: u32) -> Option<()> {
    let num_tables = read_u16(font, 4)? as usize;
    if font.len() < TABLE_DIRECTORY_LEN + TABLE_RECORD_LEN * num_tables {
        return None;
    }
    for index in 0..num_tables {
        let at = TABLE_DIRECTORY_LEN + TABLE_RECORD_LEN * index + 8;
        let offset = read_u32(font, at)?.checked_add(base)?;
        font.get_mut(at..at + 4)?.copy_from_slice(&offset.to_be_bytes());
    }
    Some(())
}

/// Packs compiled fonts into one TrueType collection
///
/// Members whose table directory is truncated are copied as they are.
pub fn collection(members: &[Vec<u8>]) -> Vec<u8> {
    let header_len = TTC_TAG.len() + 8 + 4 * members.len();
    let mut offsets = Vec::with_capacity(members.len());
    let mut body = Vec::new();
    for member in members {
        let at = (header_len + body.len()) as u32;
        let mut font = member.clone();
        if rebase(&mut font, at).is_none() {
            log::debug!("collection member {} has no table directory", offsets.len());
        }
        offsets.push(at);
        body.extend(font);
        body.resize(body.len().next_multiple_of(4), 0);
    }

    let mut ttc = Vec::with_capacity(header_len + body.len());
    ttc.extend_from_slice(TTC_TAG);
    ttc.extend(TTC_VERSION.to_be_bytes());
    ttc.extend((members.len() as u32).to_be_bytes());
    ttc.extend(offsets.iter().flat_map(|offset| offset.to_be_bytes()));
    ttc.extend(body);
    ttc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_with_one_table(payload: [u8; 4]) -> Vec<u8> {
        let mut font = vec![0, 1, 0, 0, 0, 1, 0, 16, 0, 0, 0, 0];
        font.extend(b"head");
        font.extend(0u32.to_be_bytes());
        font.extend(28u32.to_be_bytes());
        font.extend(4u32.to_be_bytes());
        font.extend(payload);
        font
    }

    #[test]
    fn test_collection_offsets_are_absolute() {
        let ttc = collection(&[font_with_one_table([1; 4]), font_with_one_table([7; 4])]);

        assert_eq!(&ttc[..4], b"ttcf");
        assert_eq!(read_u32(&ttc, 8), Some(2));
        let second = read_u32(&ttc, 16).unwrap() as usize;
        let table_offset = read_u32(&ttc, second + 12 + 8).unwrap() as usize;
        assert_eq!(&ttc[table_offset..table_offset + 4], &[7; 4]);
    }

    #[test]
    fn test_truncated_member_is_copied_verbatim() {
        let ttc = collection(&[vec![0, 1, 0, 0]]);

        assert_eq!(read_u32(&ttc, 12), Some(16));
        assert_eq!(&ttc[16..], &[0, 1, 0, 0]);
    }
}
