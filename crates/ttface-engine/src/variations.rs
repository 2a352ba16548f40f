// this_file: crates/ttface-engine/src/variations.rs

//! `fvar` axes as fixed-width records

use read_fonts::FontRef;
use skrifa::{MetadataProvider, Tag};
use ttface_core::RawVariationAxis;

fn find_axis(font: &FontRef, matches: impl Fn(usize, Tag) -> bool) -> Option<RawVariationAxis> {
    font.axes()
        .iter()
        .enumerate()
        .find(|(index, axis)| matches(*index, axis.tag()))
        .map(|(_, axis)| RawVariationAxis {
            tag: u32::from_be_bytes(axis.tag().to_be_bytes()),
            min_value: axis.min_value(),
            default_value: axis.default_value(),
            max_value: axis.max_value(),
            name_id: axis.name_id().to_u16(),
            hidden: u8::from(axis.is_hidden()),
            padding: 0,
        })
}

pub(crate) fn axis(font: &FontRef, index: u32) -> Option<RawVariationAxis> {
    find_axis(font, |position, _| position == index as usize)
}

/// Looks an axis up by its big-endian tag value
pub(crate) fn axis_by_tag(font: &FontRef, tag: u32) -> Option<RawVariationAxis> {
    let wanted = Tag::new(&tag.to_be_bytes());
    find_axis(font, |_, candidate| candidate == wanted)
}
