//! ttface Core: the shared vocabulary of the façade and its engines
//!
//! A font engine compiled as a linear-memory module speaks in addresses,
//! sentinels and fixed-layout structs. This crate holds the pieces both
//! sides of that boundary agree on:
//!
//! - [`memory`] - the shared [`LinearMemory`] and bounds-checked [`View`]s
//! - [`abi`] - the [`Engine`] trait, its query enums and raw records
//! - [`types`] - the decoded values callers actually see
//! - [`error`] - the single error type for contract violations
//!
//! ## Talking to an engine
//!
//! ```rust
//! use ttface_core::{LinearMemory, RawLineMetrics};
//!
//! let mut memory = LinearMemory::new(1)?;
//! memory.write_record(64, RawLineMetrics { position: -75, thickness: 50 })?;
//!
//! let metrics: RawLineMetrics = memory.read_record(64)?;
//! assert_eq!(metrics.position, -75);
//! # Ok::<(), ttface_core::TtfaceError>(())
//! ```

pub mod abi;
pub mod error;
pub mod memory;
pub mod types;

pub use abi::{
    truthy, Engine, FaceQuery, GlyphQuery, Ptr, RawLineMetrics, RawNameRecord, RawRect,
    RawScriptMetrics, RawVariationAxis, RecordQuery, GLYPH_NAME_CAPACITY,
};
pub use error::{Result, TtfaceError};
pub use memory::{LinearMemory, Record, Scalar, View, MAX_PAGES, PAGE_SIZE};
pub use types::{
    GlyphClass, GlyphId, LineMetrics, NameRecord, Rect, ScriptMetrics, TableName, Tag,
    VariationAxis,
};
