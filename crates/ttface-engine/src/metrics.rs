// this_file: crates/ttface-engine/src/metrics.rs

//! Face-wide getters: style flags, line metrics and decoration records
//!
//! Line metrics follow the usual FreeType-compatible choice: the OS/2 typo
//! values win when `USE_TYPO_METRICS` is set, `hhea` otherwise.

use read_fonts::tables::os2::{Os2, SelectionFlags};
use read_fonts::{FontRef, TableProvider};
use skrifa::MetadataProvider;
use ttface_core::{FaceQuery, RawLineMetrics, RawRect, RawScriptMetrics, RecordQuery};

const DEFAULT_WEIGHT: u16 = 400;
const DEFAULT_WIDTH: u16 = 5;

/// A record computed from the font, not yet written to memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FaceRecord {
    Line(RawLineMetrics),
    Script(RawScriptMetrics),
    Rect(RawRect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Normal,
    Italic,
    Oblique,
}

fn style(os2: &Os2) -> Style {
    let selection = os2.fs_selection();
    if selection.contains(SelectionFlags::ITALIC) {
        Style::Italic
    } else if selection.contains(SelectionFlags::OBLIQUE) {
        Style::Oblique
    } else {
        Style::Normal
    }
}

fn flag(value: bool) -> i32 {
    i32::from(value)
}

fn use_typo_metrics<'a>(font: &FontRef<'a>) -> Option<Os2<'a>> {
    font.os2()
        .ok()
        .filter(|os2| os2.fs_selection().contains(SelectionFlags::USE_TYPO_METRICS))
}

fn ascender(font: &FontRef) -> i16 {
    match use_typo_metrics(font) {
        Some(os2) => os2.s_typo_ascender(),
        None => font.hhea().map(|hhea| hhea.ascender().to_i16()).unwrap_or(0),
    }
}

fn descender(font: &FontRef) -> i16 {
    match use_typo_metrics(font) {
        Some(os2) => os2.s_typo_descender(),
        None => font.hhea().map(|hhea| hhea.descender().to_i16()).unwrap_or(0),
    }
}

fn line_gap(font: &FontRef) -> i16 {
    match use_typo_metrics(font) {
        Some(os2) => os2.s_typo_line_gap(),
        None => font.hhea().map(|hhea| hhea.line_gap().to_i16()).unwrap_or(0),
    }
}

fn vertical(font: &FontRef, pick: impl Fn(i16, i16, i16) -> i16) -> i16 {
    font.vhea()
        .map(|vhea| {
            pick(
                vhea.ascender().to_i16(),
                vhea.descender().to_i16(),
                vhea.line_gap().to_i16(),
            )
        })
        .unwrap_or(0)
}

fn os2_value(font: &FontRef, pick: impl Fn(&Os2<'_>) -> i32) -> i32 {
    font.os2().map(|os2| pick(&os2)).unwrap_or(0)
}

/// Evaluates an argument-less getter
pub(crate) fn face_value(font: &FontRef, query: FaceQuery) -> i32 {
    match query {
        FaceQuery::IsRegular => os2_value(font, |os2| flag(style(os2) == Style::Normal)),
        FaceQuery::IsItalic => os2_value(font, |os2| flag(style(os2) == Style::Italic)),
        FaceQuery::IsOblique => os2_value(font, |os2| flag(style(os2) == Style::Oblique)),
        FaceQuery::IsBold => os2_value(font, |os2| {
            flag(os2.fs_selection().contains(SelectionFlags::BOLD))
        }),
        FaceQuery::IsMonospaced => font
            .post()
            .map(|post| flag(post.is_fixed_pitch() != 0))
            .unwrap_or(0),
        FaceQuery::IsVariable => flag(font.fvar().is_ok()),
        FaceQuery::Weight => font
            .os2()
            .map(|os2| os2.us_weight_class())
            .map_or(i32::from(DEFAULT_WEIGHT), i32::from),
        FaceQuery::Width => font
            .os2()
            .map(|os2| os2.us_width_class())
            .ok()
            .filter(|width| (1..=9).contains(width))
            .map_or(i32::from(DEFAULT_WIDTH), i32::from),
        FaceQuery::Ascender => i32::from(ascender(font)),
        FaceQuery::Descender => i32::from(descender(font)),
        FaceQuery::Height => i32::from(ascender(font).saturating_sub(descender(font))),
        FaceQuery::LineGap => i32::from(line_gap(font)),
        FaceQuery::TypographicAscender => os2_value(font, |os2| i32::from(os2.s_typo_ascender())),
        FaceQuery::TypographicDescender => {
            os2_value(font, |os2| i32::from(os2.s_typo_descender()))
        }
        FaceQuery::TypographicLineGap => os2_value(font, |os2| i32::from(os2.s_typo_line_gap())),
        FaceQuery::VerticalAscender => i32::from(vertical(font, |asc, _, _| asc)),
        FaceQuery::VerticalDescender => i32::from(vertical(font, |_, desc, _| desc)),
        FaceQuery::VerticalHeight => {
            i32::from(vertical(font, |asc, desc, _| asc.saturating_sub(desc)))
        }
        FaceQuery::VerticalLineGap => i32::from(vertical(font, |_, _, gap| gap)),
        FaceQuery::UnitsPerEm => font
            .head()
            .map(|head| i32::from(head.units_per_em()))
            .unwrap_or(0),
        FaceQuery::XHeight => os2_value(font, |os2| i32::from(os2.sx_height().unwrap_or(0))),
        FaceQuery::CapitalHeight => {
            os2_value(font, |os2| i32::from(os2.s_cap_height().unwrap_or(0)))
        }
        FaceQuery::NumberOfGlyphs => font
            .maxp()
            .map(|maxp| i32::from(maxp.num_glyphs()))
            .unwrap_or(0),
        FaceQuery::NameRecordsCount => crate::names::count(font),
        FaceQuery::VariationAxesCount => i32::try_from(font.axes().len()).unwrap_or(i32::MAX),
    }
}

/// `post.italicAngle` in degrees, 0.0 without a `post` table
pub(crate) fn italic_angle(font: &FontRef) -> f32 {
    font.post()
        .map(|post| post.italic_angle().to_f64() as f32)
        .unwrap_or(0.0)
}

/// Computes the record a [`RecordQuery`] writes, or `None` when the font
/// lacks the table it comes from
pub(crate) fn face_record(font: &FontRef, query: RecordQuery) -> Option<FaceRecord> {
    match query {
        RecordQuery::UnderlineMetrics => font.post().ok().map(|post| {
            FaceRecord::Line(RawLineMetrics {
                position: post.underline_position().to_i16(),
                thickness: post.underline_thickness().to_i16(),
            })
        }),
        RecordQuery::StrikeoutMetrics => font.os2().ok().map(|os2| {
            FaceRecord::Line(RawLineMetrics {
                position: os2.y_strikeout_position(),
                thickness: os2.y_strikeout_size(),
            })
        }),
        RecordQuery::SubscriptMetrics => font.os2().ok().map(|os2| {
            FaceRecord::Script(RawScriptMetrics {
                x_size: os2.y_subscript_x_size(),
                y_size: os2.y_subscript_y_size(),
                x_offset: os2.y_subscript_x_offset(),
                y_offset: os2.y_subscript_y_offset(),
            })
        }),
        RecordQuery::SuperscriptMetrics => font.os2().ok().map(|os2| {
            FaceRecord::Script(RawScriptMetrics {
                x_size: os2.y_superscript_x_size(),
                y_size: os2.y_superscript_y_size(),
                x_offset: os2.y_superscript_x_offset(),
                y_offset: os2.y_superscript_y_offset(),
            })
        }),
        RecordQuery::GlobalBoundingBox => Some(FaceRecord::Rect(
            font.head()
                .map(|head| RawRect {
                    x_min: head.x_min(),
                    y_min: head.y_min(),
                    x_max: head.x_max(),
                    y_max: head.y_max(),
                })
                .unwrap_or_default(),
        )),
    }
}
