// this_file: crates/ttface-engine/src/glyphs.rs

//! Per-glyph getters
//!
//! Every getter answers 0 (or `None`) for a glyph the font knows nothing
//! about, including ids at or past `maxp.numGlyphs`; the façade decides
//! which of those zeros are sentinels.

use read_fonts::types::GlyphId16;
use read_fonts::{FontRef, TableProvider};
use skrifa::charmap::MapVariant;
use skrifa::instance::{LocationRef, Size};
use skrifa::{GlyphId, MetadataProvider, Tag};
use ttface_core::{GlyphQuery, RawRect, GLYPH_NAME_CAPACITY};

const SVG: Tag = Tag::new(b"SVG ");

fn narrow(glyph: GlyphId) -> i32 {
    u16::try_from(glyph.to_u32()).map_or(0, i32::from)
}

/// Whether `glyph` is below the font's glyph count
///
/// `hmtx`, `vmtx` and `VORG` all answer for ids past the last glyph (the
/// metrics tables repeat their final long metric), so every per-glyph
/// getter checks this first.
fn in_font(font: &FontRef, glyph: u16) -> bool {
    font.maxp().is_ok_and(|maxp| glyph < maxp.num_glyphs())
}

pub(crate) fn index(font: &FontRef, codepoint: u32) -> i32 {
    font.charmap().map(codepoint).map_or(0, narrow)
}

/// Variation-sequence lookup, falling back to the nominal mapping when the
/// sequence says to use the default glyph
pub(crate) fn variation_index(font: &FontRef, codepoint: u32, selector: u32) -> i32 {
    let charmap = font.charmap();
    match charmap.map_variant(codepoint, selector) {
        Some(MapVariant::Variant(glyph)) => narrow(glyph),
        Some(MapVariant::UseDefault) => charmap.map(codepoint).map_or(0, narrow),
        None => 0,
    }
}

fn gdef_class(font: &FontRef, glyph: u16, mark_attachment: bool) -> i32 {
    let Ok(gdef) = font.gdef() else {
        return 0;
    };
    let class_def = if mark_attachment {
        gdef.mark_attach_class_def()
    } else {
        gdef.glyph_class_def()
    };
    match class_def {
        Some(Ok(class_def)) => i32::from(class_def.get(GlyphId16::new(glyph))),
        _ => 0,
    }
}

/// A glyph is a mark when any of the GDEF mark glyph sets covers it
fn is_mark(font: &FontRef, glyph: u16) -> bool {
    let Some(Ok(sets)) = font.gdef().ok().and_then(|gdef| gdef.mark_glyph_sets_def()) else {
        return false;
    };
    sets.coverages()
        .iter()
        .flatten()
        .any(|coverage| coverage.get(GlyphId16::new(glyph)).is_some())
}

pub(crate) fn glyph_value(font: &FontRef, query: GlyphQuery, glyph: u16) -> i32 {
    if !in_font(font, glyph) {
        return 0;
    }
    let id = GlyphId::from(glyph);
    match query {
        GlyphQuery::HorAdvance => font
            .hmtx()
            .ok()
            .and_then(|hmtx| hmtx.advance(id))
            .map_or(0, i32::from),
        GlyphQuery::VerAdvance => font
            .vmtx()
            .ok()
            .and_then(|vmtx| vmtx.advance(id))
            .map_or(0, i32::from),
        GlyphQuery::HorSideBearing => font
            .hmtx()
            .ok()
            .and_then(|hmtx| hmtx.side_bearing(id))
            .map_or(0, i32::from),
        GlyphQuery::VerSideBearing => font
            .vmtx()
            .ok()
            .and_then(|vmtx| vmtx.side_bearing(id))
            .map_or(0, i32::from),
        GlyphQuery::YOrigin => font
            .vorg()
            .map_or(0, |vorg| i32::from(vorg.vertical_origin_y(id))),
        GlyphQuery::Class => gdef_class(font, glyph, false),
        GlyphQuery::MarkAttachmentClass => gdef_class(font, glyph, true),
        GlyphQuery::IsMark => i32::from(is_mark(font, glyph)),
    }
}

/// The `post` name of `glyph`, NUL-terminated and clipped to the name buffer
pub(crate) fn name(font: &FontRef, glyph: u16) -> Option<Vec<u8>> {
    if !in_font(font, glyph) {
        return None;
    }
    let post = font.post().ok()?;
    let name = post.glyph_name(GlyphId16::new(glyph))?;
    if name.is_empty() {
        return None;
    }
    let keep = name.len().min(GLYPH_NAME_CAPACITY as usize - 1);
    let mut bytes = name.as_bytes()[..keep].to_vec();
    bytes.push(0);
    Some(bytes)
}

/// Outline bounds in font units; TrueType outlines only
///
/// Empty glyphs have no bounding box.
pub(crate) fn bbox(font: &FontRef, glyph: u16) -> Option<RawRect> {
    if !in_font(font, glyph) {
        return None;
    }
    let bounds = font
        .glyph_metrics(Size::unscaled(), LocationRef::default())
        .bounds(GlyphId::from(glyph))?;
    let rect = RawRect {
        x_min: bounds.x_min.round() as i16,
        y_min: bounds.y_min.round() as i16,
        x_max: bounds.x_max.round() as i16,
        y_max: bounds.y_max.round() as i16,
    };
    (rect != RawRect::default()).then_some(rect)
}

/// Locates the SVG document for `glyph`
///
/// Returns the document's offset from the start of the font file and its
/// byte length. Document offsets in the table are relative to the document
/// list, which itself sits at an offset inside the `SVG ` table.
pub(crate) fn svg_document(font: &FontRef, glyph: u16) -> Option<(u32, u32)> {
    if !in_font(font, glyph) {
        return None;
    }
    let table_offset = font
        .table_directory
        .table_records()
        .iter()
        .find(|record| record.tag() == SVG)?
        .offset();
    let table_len = font.table_data(SVG)?.len();
    let svg = font.svg().ok()?;
    let list_offset = svg.svg_document_list_offset().to_u32();
    let list = svg.svg_document_list().ok()?;

    let glyph = GlyphId16::new(glyph);
    let record = list
        .document_records()
        .iter()
        .find(|record| (record.start_glyph_id()..=record.end_glyph_id()).contains(&glyph))?;
    let len = record.svg_doc_length();
    let start = list_offset.checked_add(record.svg_doc_offset())?;
    let end = start.checked_add(len)?;
    if len == 0 || end as usize > table_len {
        return None;
    }
    Some((table_offset.checked_add(start)?, len))
}
