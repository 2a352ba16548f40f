//! Fonts for the ttface tests, compiled in memory
//!
//! Nothing here is a binary fixture. [`fonts`] compiles the handful of
//! sample fonts the test suites share with `write-fonts`, and
//! [`collection`] packs compiled fonts into a TrueType collection.
//!
//! ```rust
//! let data = ttface_test_data::fonts::simple();
//! assert_eq!(&data[..4], &[0, 1, 0, 0]);
//! ```

pub mod fonts;
pub mod sfnt;

pub use sfnt::collection;
