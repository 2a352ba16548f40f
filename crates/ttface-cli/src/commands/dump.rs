//! Dump command implementation
//!
//! Collects everything a face can answer into one serializable report,
//! then prints it as text or JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use ttface::{
    Face, GlyphClass, LineMetrics, NameRecord, Rect, ScriptMetrics, TableName, VariationAxis,
};
use ttface_engine::NativeEngine;

use super::{module_for, read_font};
use crate::cli::DumpArgs;

#[derive(Debug, Serialize)]
struct FaceReport {
    index: u32,
    tables: Vec<String>,
    names: Vec<NameReport>,
    style: StyleReport,
    weight: u16,
    width: u16,
    italic_angle: Option<f32>,
    metrics: MetricsReport,
    underline: Option<LineMetrics>,
    strikeout: Option<LineMetrics>,
    subscript: Option<ScriptMetrics>,
    superscript: Option<ScriptMetrics>,
    global_bounding_box: Rect,
    number_of_glyphs: u16,
    variation_axes: Vec<AxisReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    glyphs: Vec<GlyphReport>,
}

#[derive(Debug, Serialize)]
struct NameReport {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: u16,
    /// Decoded text for Unicode records
    value: Option<String>,
    len: usize,
}

#[derive(Debug, Serialize)]
struct StyleReport {
    regular: bool,
    italic: bool,
    bold: bool,
    oblique: bool,
    monospaced: bool,
    variable: bool,
}

#[derive(Debug, Serialize)]
struct MetricsReport {
    units_per_em: Option<u16>,
    ascender: i16,
    descender: i16,
    height: i16,
    line_gap: i16,
    typographic_ascender: Option<i16>,
    typographic_descender: Option<i16>,
    typographic_line_gap: Option<i16>,
    vertical_ascender: Option<i16>,
    vertical_descender: Option<i16>,
    vertical_height: Option<i16>,
    vertical_line_gap: Option<i16>,
    x_height: Option<i16>,
    capital_height: Option<i16>,
}

#[derive(Debug, Serialize)]
struct AxisReport {
    tag: String,
    min: f32,
    default: f32,
    max: f32,
    name_id: u16,
    hidden: bool,
}

#[derive(Debug, Serialize)]
struct GlyphReport {
    character: char,
    codepoint: String,
    glyph_id: Option<u16>,
    name: Option<String>,
    hor_advance: Option<u16>,
    ver_advance: Option<u16>,
    hor_side_bearing: Option<i16>,
    ver_side_bearing: Option<i16>,
    y_origin: Option<i16>,
    class: Option<GlyphClass>,
    mark_attachment_class: u16,
    is_mark: bool,
    bounding_box: Option<Rect>,
    svg_len: Option<usize>,
}

impl From<&NameRecord> for NameReport {
    fn from(record: &NameRecord) -> Self {
        Self {
            platform_id: record.platform_id,
            encoding_id: record.encoding_id,
            language_id: record.language_id,
            name_id: record.name_id,
            value: record.to_string_lossy(),
            len: record.value.len(),
        }
    }
}

impl From<&VariationAxis> for AxisReport {
    fn from(axis: &VariationAxis) -> Self {
        Self {
            tag: axis.tag.to_string(),
            min: axis.min_value,
            default: axis.default_value,
            max: axis.max_value,
            name_id: axis.name_id,
            hidden: axis.hidden,
        }
    }
}

fn glyph_report(face: &Face<NativeEngine>, character: char) -> ttface::Result<GlyphReport> {
    let codepoint = format!("U+{:04X}", u32::from(character));
    let Some(glyph) = face.glyph_index(character)? else {
        return Ok(GlyphReport {
            character,
            codepoint,
            glyph_id: None,
            name: None,
            hor_advance: None,
            ver_advance: None,
            hor_side_bearing: None,
            ver_side_bearing: None,
            y_origin: None,
            class: None,
            mark_attachment_class: 0,
            is_mark: false,
            bounding_box: None,
            svg_len: None,
        });
    };
    Ok(GlyphReport {
        character,
        codepoint,
        glyph_id: Some(glyph),
        name: face
            .glyph_name(glyph)?
            .map(|name| String::from_utf8_lossy(&name).into_owned()),
        hor_advance: face.glyph_hor_advance(glyph)?,
        ver_advance: face.glyph_ver_advance(glyph)?,
        hor_side_bearing: face.glyph_hor_side_bearing(glyph)?,
        ver_side_bearing: face.glyph_ver_side_bearing(glyph)?,
        y_origin: face.glyph_y_origin(glyph)?,
        class: face.glyph_class(glyph)?,
        mark_attachment_class: face.glyph_mark_attachment_class(glyph)?,
        is_mark: face.is_mark_glyph(glyph)?,
        bounding_box: face.glyph_bounding_box(glyph)?,
        svg_len: face.glyph_svg_image(glyph)?.map(|svg| svg.len()),
    })
}

fn face_report(face: &Face<NativeEngine>, chars: &str) -> ttface::Result<FaceReport> {
    let mut tables = Vec::new();
    for table in TableName::ALL {
        if face.has_table(table)? {
            tables.push(table.tag().to_string());
        }
    }
    Ok(FaceReport {
        index: face.index(),
        tables,
        names: face.names()?.iter().map(NameReport::from).collect(),
        style: StyleReport {
            regular: face.is_regular()?,
            italic: face.is_italic()?,
            bold: face.is_bold()?,
            oblique: face.is_oblique()?,
            monospaced: face.is_monospaced()?,
            variable: face.is_variable()?,
        },
        weight: face.weight()?,
        width: face.width()?,
        italic_angle: face.italic_angle()?,
        metrics: MetricsReport {
            units_per_em: face.units_per_em()?,
            ascender: face.ascender()?,
            descender: face.descender()?,
            height: face.height()?,
            line_gap: face.line_gap()?,
            typographic_ascender: face.typographic_ascender()?,
            typographic_descender: face.typographic_descender()?,
            typographic_line_gap: face.typographic_line_gap()?,
            vertical_ascender: face.vertical_ascender()?,
            vertical_descender: face.vertical_descender()?,
            vertical_height: face.vertical_height()?,
            vertical_line_gap: face.vertical_line_gap()?,
            x_height: face.x_height()?,
            capital_height: face.capital_height()?,
        },
        underline: face.underline_metrics()?,
        strikeout: face.strikeout_metrics()?,
        subscript: face.subscript_metrics()?,
        superscript: face.superscript_metrics()?,
        global_bounding_box: face.global_bounding_box()?,
        number_of_glyphs: face.number_of_glyphs()?,
        variation_axes: face.variation_axes()?.iter().map(AxisReport::from).collect(),
        glyphs: chars
            .chars()
            .map(|character| glyph_report(face, character))
            .collect::<ttface::Result<_>>()?,
    })
}

fn show<T: std::fmt::Debug>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:?}"))
}

fn print_text(report: &FaceReport) {
    println!("Face {}", report.index);
    println!("  tables: {}", report.tables.join(" "));
    println!("  glyphs: {}", report.number_of_glyphs);
    println!("  weight: {}  width: {}", report.weight, report.width);
    println!("  italic angle: {}", show(report.italic_angle));
    println!("  style: {:?}", report.style);
    println!();
    println!("Names:");
    for name in &report.names {
        println!(
            "  [{}/{}/{:#06x}] #{:<3} {}",
            name.platform_id,
            name.encoding_id,
            name.language_id,
            name.name_id,
            name.value
                .clone()
                .unwrap_or_else(|| format!("<{} bytes>", name.len))
        );
    }
    println!();
    println!("Metrics: {:#?}", report.metrics);
    println!("  underline: {}", show(report.underline.as_ref()));
    println!("  strikeout: {}", show(report.strikeout.as_ref()));
    println!("  subscript: {}", show(report.subscript.as_ref()));
    println!("  superscript: {}", show(report.superscript.as_ref()));
    println!("  bounding box: {:?}", report.global_bounding_box);

    if !report.variation_axes.is_empty() {
        println!();
        println!("Axes:");
        for axis in &report.variation_axes {
            println!(
                "  {} {}..{}..{} name #{}{}",
                axis.tag,
                axis.min,
                axis.default,
                axis.max,
                axis.name_id,
                if axis.hidden { " (hidden)" } else { "" }
            );
        }
    }

    for glyph in &report.glyphs {
        println!();
        println!("{} {:?}: {:#?}", glyph.codepoint, glyph.character, glyph);
    }
}

pub fn run(args: &DumpArgs) -> Result<()> {
    let data = read_font(&args.font)?;
    let module = module_for(data.len())?;
    let face = Face::new(module, data, args.face_index);
    let report = face_report(&face, args.chars.as_deref().unwrap_or_default())
        .with_context(|| format!("Failed to inspect {}", args.font.display()))?;
    log::debug!("Cache after dump: {:?}", face.cache_stats());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}
