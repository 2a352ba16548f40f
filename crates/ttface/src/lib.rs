//! ttface: font faces, one cached answer at a time
//!
//! The font engine lives on the other side of a linear-memory boundary and
//! speaks in addresses and sentinels. This crate is the side you talk to:
//! a [`Face`] takes your font bytes and gives back typed, optional values,
//! asking the engine only the first time.
//!
//! ## Pieces
//!
//! - [`Module`] - one engine plus its memory, shared as a [`SharedModule`]
//! - [`ModuleConfig`] - how much memory to grow at start-up
//! - [`Layout`] - where the face state, font bytes and scratch go
//! - [`Face`] - the query surface and its per-face cache
//! - [`fonts_in_collection`] - how many faces a file holds
//!
//! ## Example
//!
//! ```rust,no_run
//! use ttface::{Face, Module, ModuleConfig};
//! use ttface_engine::NativeEngine;
//!
//! # fn main() -> ttface::Result<()> {
//! let module = Module::with_config(NativeEngine::new(), ModuleConfig::from_env()?)?.shared();
//! let data = std::fs::read("MyFont.ttf").unwrap_or_default();
//!
//! let face = Face::new(module, data, 0);
//! if let Some(glyph) = face.glyph_index('A')? {
//!     println!("'A' is glyph {glyph}, advance {:?}", face.glyph_hor_advance(glyph)?);
//! }
//! println!("units per em: {:?}", face.units_per_em()?);
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod collection;
pub mod config;
mod face;
pub mod layout;
pub mod module;

pub use cache::CacheStats;
pub use collection::fonts_in_collection;
pub use config::ModuleConfig;
pub use face::Face;
pub use layout::Layout;
pub use module::{Module, SharedModule};

pub use ttface_core::{
    Engine, GlyphClass, GlyphId, LineMetrics, NameRecord, Rect, Result, ScriptMetrics, TableName,
    Tag, TtfaceError, VariationAxis,
};
