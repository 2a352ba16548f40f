// this_file: crates/ttface/src/layout.rs

//! Where things live in linear memory
//!
//! ```text
//! heap_base
//! |  face state  |  font bytes  |  scratch ...          |
//! ^face_state    ^font_bytes    ^scratch                ^memory size
//! ```
//!
//! The face state block is as wide as the engine says (`face_size_of`),
//! the font bytes are copied in right behind it, and whatever follows is
//! scratch for one call's output. Scratch is reused by every call and is
//! never assumed to hold anything from a previous one.

use ttface_core::{Ptr, Result, TtfaceError};

/// Offsets for one face, computed from fixed sizes and the font length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Address of the engine's face state block, also the face handle
    pub face_state: Ptr,
    /// Address the font bytes are copied to
    pub font_bytes: Ptr,
    /// First byte after the font bytes
    pub scratch: Ptr,
    memory_size: u64,
}

impl Layout {
    /// Plans a face whose font is `font_len` bytes long
    ///
    /// Fails with [`TtfaceError::OutOfBounds`] when the face state and the
    /// font bytes do not both fit in `memory_size` bytes.
    pub fn new(heap_base: Ptr, face_size: u32, font_len: usize, memory_size: u64) -> Result<Self> {
        let font_len_u32 =
            u32::try_from(font_len).map_err(|_| TtfaceError::SourceTooLarge(font_len))?;
        let font_bytes = heap_base
            .checked_add(face_size)
            .ok_or_else(|| TtfaceError::out_of_bounds(heap_base, face_size, memory_size))?;
        let scratch = font_bytes
            .checked_add(font_len_u32)
            .ok_or_else(|| TtfaceError::out_of_bounds(font_bytes, font_len_u32, memory_size))?;
        if u64::from(scratch) > memory_size {
            return Err(TtfaceError::out_of_bounds(
                heap_base,
                u64::from(face_size) + font_len as u64,
                memory_size,
            ));
        }
        Ok(Self {
            face_state: heap_base,
            font_bytes,
            scratch,
            memory_size,
        })
    }

    /// Scratch address for an output of `len` bytes
    pub fn scratch(&self, len: u32) -> Result<Ptr> {
        self.scratch_at(0, len)
    }

    /// Scratch address `at` bytes in, for an output of `len` bytes
    pub fn scratch_at(&self, at: u32, len: u32) -> Result<Ptr> {
        let start = self
            .scratch
            .checked_add(at)
            .ok_or_else(|| TtfaceError::out_of_bounds(self.scratch, at, self.memory_size))?;
        if u64::from(start) + u64::from(len) > self.memory_size {
            return Err(TtfaceError::out_of_bounds(start, len, self.memory_size));
        }
        Ok(start)
    }

    pub fn font_len(&self) -> u32 {
        self.scratch - self.font_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_follow_each_other() {
        let layout = Layout::new(1024, 16, 500, 65_536).unwrap();
        assert_eq!(layout.face_state, 1024);
        assert_eq!(layout.font_bytes, 1040);
        assert_eq!(layout.scratch, 1540);
        assert_eq!(layout.font_len(), 500);
    }

    #[test]
    fn test_font_that_does_not_fit_is_out_of_bounds() {
        let err = Layout::new(1024, 16, 65_000, 65_536).unwrap_err();
        assert!(matches!(err, TtfaceError::OutOfBounds { offset: 1024, .. }));
    }

    #[test]
    fn test_font_exactly_filling_memory_leaves_no_scratch() {
        let layout = Layout::new(0, 16, 65_520, 65_536).unwrap();
        assert_eq!(layout.scratch, 65_536);
        assert_eq!(layout.scratch(0).unwrap(), 65_536);
        assert!(layout.scratch(1).is_err());
    }

    #[test]
    fn test_scratch_span_is_checked() {
        let layout = Layout::new(1024, 16, 100, 2048).unwrap();
        assert_eq!(layout.scratch(256).unwrap(), 1140);
        assert_eq!(layout.scratch_at(10, 100).unwrap(), 1150);
        assert!(matches!(
            layout.scratch_at(10, 900),
            Err(TtfaceError::OutOfBounds { offset: 1150, len: 900, size: 2048 })
        ));
    }

    #[test]
    fn test_address_overflow_is_out_of_bounds() {
        assert!(matches!(
            Layout::new(u32::MAX - 4, 16, 0, u64::MAX),
            Err(TtfaceError::OutOfBounds { .. })
        ));
        let layout = Layout::new(0, 16, 0, u64::MAX).unwrap();
        assert!(layout.scratch_at(u32::MAX, 1).is_err());
    }
}
