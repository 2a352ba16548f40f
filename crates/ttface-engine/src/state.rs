// this_file: crates/ttface-engine/src/state.rs

//! The face-state block
//!
//! `ttfp_face_init` does not parse anything it can keep: the engine holds no
//! memory of its own between calls. It records where the font bytes live and
//! whether they parsed, and every later entry point re-opens the font from
//! that record.

use bytemuck::{Pod, Zeroable};
use read_fonts::FontRef;
use ttface_core::{LinearMemory, Ptr, Record, Result, TtfaceError};

/// Marks a face-state block whose font parsed successfully ("ttfp")
pub(crate) const READY: u32 = 0x7474_6670;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub(crate) struct FaceState {
    pub data: Ptr,
    pub len: u32,
    pub index: u32,
    pub status: u32,
}

impl Record for FaceState {
    fn swap_le(self) -> Self {
        Self {
            data: u32::from_le(self.data),
            len: u32::from_le(self.len),
            index: u32::from_le(self.index),
            status: u32::from_le(self.status),
        }
    }
}

impl FaceState {
    pub fn is_ready(&self) -> bool {
        self.status == READY
    }
}

/// Turns a memory fault inside an entry point into a trap of that entry point
pub(crate) fn trap(symbol: &'static str) -> impl FnOnce(TtfaceError) -> TtfaceError {
    move |err| TtfaceError::Trap {
        symbol,
        reason: err.to_string(),
    }
}

/// Re-opens the font recorded in the face state at `face`
///
/// `Ok(None)` means the face was never initialized or its data did not
/// parse; the caller turns that into the entry point's failure value.
pub(crate) fn open<'a>(
    memory: &'a LinearMemory,
    symbol: &'static str,
    face: Ptr,
) -> Result<Option<FontRef<'a>>> {
    let state: FaceState = memory.read_record(face).map_err(trap(symbol))?;
    if !state.is_ready() {
        return Ok(None);
    }
    let data = memory
        .bytes(state.data, state.len as usize)
        .map_err(trap(symbol))?;
    Ok(FontRef::from_index(data, state.index).ok())
}
