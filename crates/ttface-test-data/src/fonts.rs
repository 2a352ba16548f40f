// this_file: crates/ttface-test-data/src/fonts.rs

//! The sample fonts
//!
//! The values below are what the tests compare against; change them here
//! and in the assertions together.

use anyhow::Result;
use write_fonts::read::tables::glyf::CurvePoint;
use write_fonts::tables::{
    cmap::{
        Cmap, Cmap14, CmapSubtable, DefaultUvs, EncodingRecord, NonDefaultUvs, PlatformId,
        UnicodeRange, UvsMapping, VariationSelector,
    },
    fvar::{Fvar, VariationAxisRecord},
    gdef::{Gdef, MarkGlyphSets},
    glyf::{Bbox, Contour, GlyfLocaBuilder, SimpleGlyph},
    head::Head,
    hhea::Hhea,
    hmtx::{Hmtx, LongMetric},
    layout::{ClassDef, ClassDefFormat1, CoverageFormat1, CoverageTable},
    maxp::Maxp,
    name::{Name, NameRecord},
    os2::{Os2, SelectionFlags},
    post::Post,
    vhea::Vhea,
    vmtx::Vmtx,
};
use write_fonts::types::{
    FWord, Fixed, GlyphId, GlyphId16, MajorMinor, NameId, Tag, UfWord, Uint24, Version16Dot16,
};
use write_fonts::FontBuilder;

use crate::sfnt;

pub const NOTDEF: u16 = 0;
/// Nominal glyph for 'A'
pub const GLYPH_A: u16 = 1;
/// Combining acute accent, a mark
pub const GLYPH_ACUTE: u16 = 2;
/// 'A' followed by VS1
pub const GLYPH_A_ALT: u16 = 3;
pub const GLYPH_COUNT: u16 = 4;

/// Selector mapping 'A' to [`GLYPH_A_ALT`]
pub const VS1: char = '\u{FE00}';
/// Selector mapping 'A' to its default glyph
pub const VS2: char = '\u{FE01}';

pub const FAMILY_NAME: &str = "Ttface Sans";
pub const SUBFAMILY_NAME: &str = "Regular";

pub const SVG_DOCUMENT: &[u8] =
    br#"<svg xmlns="http://www.w3.org/2000/svg" id="glyph1"><rect width="500" height="700"/></svg>"#;

pub const A_BBOX: [i16; 4] = [10, 0, 490, 700];

const ACUTE_BBOX: [i16; 4] = [150, 720, 350, 900];

const VORG: Tag = Tag::new(b"VORG");
const SVG: Tag = Tag::new(b"SVG ");
const NAME: Tag = Tag::new(b"name");

const WINDOWS: u16 = 3;
const WINDOWS_BMP: u16 = 1;
const US_ENGLISH: u16 = 0x409;

/// Every sample is built from constants, so a compile failure is a bug in
/// this module
#[allow(clippy::expect_used)]
fn compiled(font: Result<Vec<u8>>) -> Vec<u8> {
    font.expect("sample font compiles")
}

fn rectangle([x_min, y_min, x_max, y_max]: [i16; 4]) -> SimpleGlyph {
    let points = vec![
        CurvePoint::on_curve(x_min, y_min),
        CurvePoint::on_curve(x_min, y_max),
        CurvePoint::on_curve(x_max, y_max),
        CurvePoint::on_curve(x_max, y_min),
    ];
    SimpleGlyph {
        bbox: Bbox {
            x_min,
            y_min,
            x_max,
            y_max,
        },
        contours: vec![Contour::from(points)],
        instructions: Vec::new(),
    }
}

fn long_metrics(metrics: &[(u16, i16)]) -> Vec<LongMetric> {
    metrics
        .iter()
        .map(|&(advance, side_bearing)| LongMetric {
            advance,
            side_bearing,
        })
        .collect()
}

fn names() -> Name {
    let records = [
        NameRecord::new(1, 0, 0, NameId::new(1), String::from(FAMILY_NAME).into()),
        NameRecord::new(
            WINDOWS,
            WINDOWS_BMP,
            US_ENGLISH,
            NameId::new(1),
            String::from(FAMILY_NAME).into(),
        ),
        NameRecord::new(
            WINDOWS,
            WINDOWS_BMP,
            US_ENGLISH,
            NameId::new(2),
            String::from(SUBFAMILY_NAME).into(),
        ),
    ];
    Name {
        name_record: records.into_iter().collect(),
        ..Default::default()
    }
}

/// 'A' and the combining acute in format 4, with both selectors in format 14
fn cmap() -> Result<Cmap> {
    let mut cmap = Cmap::from_mappings([
        ('A', GlyphId::new(GLYPH_A.into())),
        ('\u{0301}', GlyphId::new(GLYPH_ACUTE.into())),
    ])?;
    let base = Uint24::new('A' as u32);
    let selectors = vec![
        VariationSelector::new(
            Uint24::new(VS1 as u32),
            None,
            Some(NonDefaultUvs::new(1, vec![UvsMapping::new(base, GLYPH_A_ALT)])),
        ),
        VariationSelector::new(
            Uint24::new(VS2 as u32),
            Some(DefaultUvs::new(1, vec![UnicodeRange::new(base, 0)])),
            None,
        ),
    ];
    // header, two selector records, one default and one non-default table
    let length = 10 + 11 * 2 + (4 + 4) + (4 + 5);
    let variants = CmapSubtable::Format14(Cmap14::new(length, 2, selectors));
    let at = cmap
        .encoding_records
        .iter()
        .position(|record| record.platform_id != PlatformId::Unicode)
        .unwrap_or(cmap.encoding_records.len());
    cmap.encoding_records
        .insert(at, EncodingRecord::new(PlatformId::Unicode, 5, variants));
    Ok(cmap)
}

fn class_def(classes: &[u16]) -> ClassDef {
    ClassDef::Format1(ClassDefFormat1 {
        start_glyph_id: GlyphId16::NOTDEF,
        class_value_array: classes.to_vec(),
    })
}

fn gdef() -> Gdef {
    let marks = CoverageTable::Format1(CoverageFormat1 {
        glyph_array: vec![GlyphId16::new(GLYPH_ACUTE)],
    });
    Gdef {
        glyph_class_def: class_def(&[0, 1, 3, 1]).into(),
        mark_attach_class_def: class_def(&[0, 0, 2, 0]).into(),
        mark_glyph_sets_def: MarkGlyphSets::new(vec![marks]).into(),
        ..Default::default()
    }
}

fn regular_os2() -> Os2 {
    Os2 {
        x_avg_char_width: 500,
        us_weight_class: 400,
        us_width_class: 5,
        y_subscript_x_size: 650,
        y_subscript_y_size: 600,
        y_subscript_x_offset: 0,
        y_subscript_y_offset: 75,
        y_superscript_x_size: 650,
        y_superscript_y_size: 600,
        y_superscript_x_offset: 0,
        y_superscript_y_offset: 350,
        y_strikeout_size: 50,
        y_strikeout_position: 300,
        fs_selection: SelectionFlags::REGULAR,
        s_typo_ascender: 780,
        s_typo_descender: -220,
        s_typo_line_gap: 70,
        us_win_ascent: 900,
        us_win_descent: 250,
        ul_code_page_range_1: Some(1),
        ul_code_page_range_2: Some(0),
        sx_height: Some(500),
        s_cap_height: Some(700),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(1),
        ..Default::default()
    }
}

/// `VORG` has no typed writer: version 1.0, a default origin and one
/// per-glyph origin
fn vorg() -> Vec<u8> {
    [1u16, 0]
        .into_iter()
        .flat_map(u16::to_be_bytes)
        .chain(880i16.to_be_bytes())
        .chain(1u16.to_be_bytes())
        .chain(GLYPH_A.to_be_bytes())
        .chain(900i16.to_be_bytes())
        .collect()
}

/// `SVG ` has no typed writer either: one document covering [`GLYPH_A`]
fn svg() -> Vec<u8> {
    const LIST_OFFSET: u32 = 10;
    const LIST_HEADER_LEN: u32 = 2 + 12;
    let mut table = Vec::new();
    table.extend(0u16.to_be_bytes());
    table.extend(LIST_OFFSET.to_be_bytes());
    table.extend(0u32.to_be_bytes());
    table.extend(1u16.to_be_bytes());
    table.extend(GLYPH_A.to_be_bytes());
    table.extend(GLYPH_A.to_be_bytes());
    table.extend(LIST_HEADER_LEN.to_be_bytes());
    table.extend((SVG_DOCUMENT.len() as u32).to_be_bytes());
    table.extend_from_slice(SVG_DOCUMENT);
    table
}

/// Tables shared by [`simple`] and [`variable`]: the header tables,
/// outlines, horizontal metrics, `cmap` and `GDEF`
fn outlines() -> Result<FontBuilder<'static>> {
    let mut glyphs = GlyfLocaBuilder::new();
    for glyph in [
        SimpleGlyph::default(),
        rectangle(A_BBOX),
        rectangle(ACUTE_BBOX),
        rectangle(A_BBOX),
    ] {
        glyphs.add_glyph(&glyph)?;
    }
    let (glyf, loca, loca_format) = glyphs.build();

    let head = Head {
        units_per_em: 1000,
        x_min: -50,
        y_min: -250,
        x_max: 1050,
        y_max: 950,
        index_to_loc_format: loca_format as i16,
        ..Default::default()
    };
    let hhea = Hhea {
        ascender: FWord::new(800),
        descender: FWord::new(-200),
        line_gap: FWord::new(90),
        advance_width_max: UfWord::new(600),
        min_left_side_bearing: FWord::new(0),
        min_right_side_bearing: FWord::new(0),
        x_max_extent: FWord::new(490),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: GLYPH_COUNT,
    };
    let hmtx = Hmtx {
        h_metrics: long_metrics(&[(500, 0), (500, 10), (0, 150), (500, 10)]),
        left_side_bearings: Vec::new(),
    };
    let maxp = Maxp {
        num_glyphs: GLYPH_COUNT,
        ..Default::default()
    };

    let mut font = FontBuilder::new();
    font.add_table(&head)?
        .add_table(&hhea)?
        .add_table(&maxp)?
        .add_table(&hmtx)?
        .add_table(&cmap()?)?
        .add_table(&gdef())?
        .add_table(&glyf)?
        .add_table(&loca)?;
    Ok(font)
}

fn simple_font() -> Result<FontBuilder<'static>> {
    let post = Post {
        underline_position: FWord::new(-75),
        underline_thickness: FWord::new(50),
        ..Default::default()
    }
    .with_glyph_names([".notdef", "A", "acutecomb", "A.alt"]);
    let vhea = Vhea {
        ascender: FWord::new(500),
        descender: FWord::new(-500),
        line_gap: FWord::new(0),
        advance_height_max: UfWord::new(1000),
        caret_slope_rise: 0,
        caret_slope_run: 1,
        number_of_long_ver_metrics: GLYPH_COUNT,
        ..Default::default()
    };
    let vmtx = Vmtx {
        v_metrics: long_metrics(&[(1000, 0), (1000, 100), (0, 0), (1000, 100)]),
        top_side_bearings: Vec::new(),
    };

    let mut font = outlines()?;
    font.add_table(&regular_os2())?
        .add_table(&post)?
        .add_table(&names())?
        .add_table(&vhea)?
        .add_table(&vmtx)?;
    font.add_raw(VORG, vorg()).add_raw(SVG, svg());
    Ok(font)
}

/// A static TrueType font with every table the façade can ask about
///
/// | table | values |
/// |---|---|
/// | head | upem 1000, bbox (-50, -250, 1050, 950) |
/// | hhea | ascender 800, descender -200, line gap 90 |
/// | OS/2 | weight 400, width 5, typo 780/-220/70, x-height 500, cap height 700 |
/// | vhea | ascender 500, descender -500, line gap 0 |
/// | post | underline -75/50, no italic angle |
pub fn simple() -> Vec<u8> {
    compiled(simple_font().map(|mut font| font.build()))
}

/// [`simple`] with a second name record that points outside the storage
pub fn broken_name() -> Vec<u8> {
    compiled(broken_name_font())
}

fn broken_name_font() -> Result<Vec<u8>> {
    let mut name = write_fonts::dump_table(&names())?;
    let storage_offset = u16::from_be_bytes([name[4], name[5]]) as usize;
    let past_storage = (name.len() - storage_offset + 0x100) as u16;
    // the offset field closes the second 12-byte record after the 6-byte header
    let at = 6 + 12 + 10;
    name[at..at + 2].copy_from_slice(&past_storage.to_be_bytes());
    let mut font = simple_font()?;
    font.add_raw(NAME, name);
    Ok(font.build())
}

/// An italic, bold, monospaced variable font with two axes, the second
/// hidden
pub fn variable() -> Vec<u8> {
    compiled(variable_font())
}

fn variable_font() -> Result<Vec<u8>> {
    let os2 = Os2 {
        us_weight_class: 700,
        us_width_class: 3,
        y_subscript_x_size: 600,
        y_subscript_y_size: 550,
        y_subscript_x_offset: 10,
        y_subscript_y_offset: 80,
        y_superscript_x_size: 600,
        y_superscript_y_size: 550,
        y_superscript_x_offset: 10,
        y_superscript_y_offset: 400,
        y_strikeout_size: 60,
        y_strikeout_position: 320,
        fs_selection: SelectionFlags::ITALIC
            | SelectionFlags::BOLD
            | SelectionFlags::USE_TYPO_METRICS,
        sx_height: Some(0),
        s_cap_height: Some(0),
        ..regular_os2()
    };
    let post = Post {
        version: Version16Dot16::VERSION_3_0,
        italic_angle: Fixed::from_f64(-12.0),
        underline_position: FWord::new(-100),
        underline_thickness: FWord::new(40),
        is_fixed_pitch: 1,
        ..Default::default()
    };
    let mut fvar = Fvar {
        version: MajorMinor::VERSION_1_0,
        axis_count: 2,
        ..Default::default()
    };
    fvar.axis_instance_arrays.axes.extend([
        VariationAxisRecord {
            axis_tag: Tag::new(b"wght"),
            min_value: Fixed::from_f64(100.0),
            default_value: Fixed::from_f64(400.0),
            max_value: Fixed::from_f64(900.0),
            flags: 0,
            axis_name_id: NameId::new(256),
        },
        VariationAxisRecord {
            axis_tag: Tag::new(b"XOPQ"),
            min_value: Fixed::from_f64(20.0),
            default_value: Fixed::from_f64(88.0),
            max_value: Fixed::from_f64(150.0),
            // hidden from user interfaces
            flags: 0x0001,
            axis_name_id: NameId::new(257),
        },
    ]);

    let mut font = outlines()?;
    font.add_table(&os2)?
        .add_table(&post)?
        .add_table(&names())?
        .add_table(&fvar)?;
    Ok(font.build())
}

/// The smallest font that parses: `head`, `hhea` and `maxp` only
pub fn bare(units_per_em: u16) -> Vec<u8> {
    compiled(bare_font(units_per_em))
}

fn bare_font(units_per_em: u16) -> Result<Vec<u8>> {
    let head = Head {
        units_per_em,
        ..Default::default()
    };
    let hhea = Hhea {
        ascender: FWord::new(700),
        descender: FWord::new(-300),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(0),
        min_left_side_bearing: FWord::new(0),
        min_right_side_bearing: FWord::new(0),
        x_max_extent: FWord::new(0),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: 0,
    };
    let maxp = Maxp {
        num_glyphs: 1,
        ..Default::default()
    };
    let mut font = FontBuilder::new();
    font.add_table(&head)?.add_table(&hhea)?.add_table(&maxp)?;
    Ok(font.build())
}

/// A collection of [`simple`] followed by [`variable`]
pub fn collection() -> Vec<u8> {
    sfnt::collection(&[simple(), variable()])
}
