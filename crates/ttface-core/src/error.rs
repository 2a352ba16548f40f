// this_file: crates/ttface-core/src/error.rs

//! Error types for ttface
//!
//! A well-formed engine never produces an error: missing font data comes
//! back as `Ok(None)` or a shorter collection. What is left here are the
//! faults that mean the offset arithmetic or the engine contract itself is
//! broken, plus configuration mistakes made before any engine call.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtfaceError>;

/// Main error type for ttface
#[derive(Debug, Error)]
pub enum TtfaceError {
    /// A span handed to the memory lies (partly) outside its current extent
    #[error("Memory access out of bounds: {len} bytes at {offset} exceeds {size} bytes")]
    OutOfBounds {
        /// First byte of the requested span.
        offset: u64,
        /// Length of the requested span.
        len: u64,
        /// Current size of the linear memory.
        size: u64,
    },

    /// The memory cannot grow to the requested number of pages
    #[error("Memory grow failed: {requested} pages requested, limit is {limit}")]
    GrowFailed {
        /// Total page count that was asked for.
        requested: u64,
        /// Maximum page count of a 32-bit linear memory.
        limit: u32,
    },

    /// The font source does not fit the 32-bit address space
    #[error("Font source too large for linear memory: {0} bytes")]
    SourceTooLarge(usize),

    /// The engine aborted an entry point
    #[error("Engine trap in {symbol}: {reason}")]
    Trap {
        /// Exported symbol that trapped.
        symbol: &'static str,
        /// Engine-provided description.
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TtfaceError {
    /// Shorthand for an out-of-bounds span
    pub fn out_of_bounds(offset: impl Into<u64>, len: impl Into<u64>, size: impl Into<u64>) -> Self {
        TtfaceError::OutOfBounds {
            offset: offset.into(),
            len: len.into(),
            size: size.into(),
        }
    }
}
