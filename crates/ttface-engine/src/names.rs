// this_file: crates/ttface-engine/src/names.rs

//! `name` table access in the engine's two-call shape
//!
//! The header call reports the byte length so the caller can size the
//! buffer for the second call; strings are copied out undecoded.

use read_fonts::tables::name::NameRecord;
use read_fonts::{FontRef, TableProvider};
use ttface_core::RawNameRecord;

fn with_record<T>(
    font: &FontRef,
    index: u32,
    read: impl FnOnce(&NameRecord, &[u8]) -> Option<T>,
) -> Option<T> {
    let name = font.name().ok()?;
    let record = name.name_record().get(index as usize)?;
    read(record, name.string_data().as_bytes())
}

pub(crate) fn count(font: &FontRef) -> i32 {
    font.name()
        .map(|name| i32::try_from(name.name_record().len()).unwrap_or(i32::MAX))
        .unwrap_or(0)
}

/// Header of record `index`, or `None` past the end of the table
pub(crate) fn header(font: &FontRef, index: u32) -> Option<RawNameRecord> {
    with_record(font, index, |record, _| {
        Some(RawNameRecord {
            platform_id: record.platform_id(),
            encoding_id: record.encoding_id(),
            language_id: record.language_id(),
            name_id: record.name_id().to_u16(),
            name_size: record.length(),
        })
    })
}

/// Raw string bytes of record `index`
///
/// Fails when the record points outside the string storage or when `len`
/// does not match the length the header reported.
pub(crate) fn string(font: &FontRef, index: u32, len: u32) -> Option<Vec<u8>> {
    with_record(font, index, |record, storage| {
        if u32::from(record.length()) != len {
            return None;
        }
        let start = record.string_offset().to_u32() as usize;
        let end = start.checked_add(usize::from(record.length()))?;
        storage.get(start..end).map(<[u8]>::to_vec)
    })
}
