// this_file: crates/ttface-core/src/abi.rs

//! The engine's side of the bargain
//!
//! The font engine is a separately compiled unit that exports a fixed set of
//! `ttfp_*` entry points. Each one takes plain integers: absolute addresses
//! into the shared [`LinearMemory`], a face-state address, glyph ids and
//! codepoints. Results come back as integers (sentinels and 0/1 booleans)
//! or as fixed-layout records written to caller-chosen addresses.
//!
//! [`Engine`] is that surface as a Rust trait. Entry points with the same
//! signature are grouped behind a query enum whose [`symbol`](FaceQuery::symbol)
//! names the export, so a runtime-backed implementation can resolve them by
//! name while in-process implementations can simply `match`.

use bytemuck::{Pod, Zeroable};

use crate::error::Result;
use crate::memory::{LinearMemory, Record};

/// An absolute address in linear memory
pub type Ptr = u32;

/// Capacity of the buffer `ttfp_get_glyph_name` writes into
pub const GLYPH_NAME_CAPACITY: u32 = 256;

/// Decodes an engine boolean
#[inline]
pub fn truthy(value: i32) -> bool {
    value != 0
}

/// Argument-less face getters that return a number or a 0/1 flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceQuery {
    IsRegular,
    IsItalic,
    IsBold,
    IsOblique,
    IsMonospaced,
    IsVariable,
    Weight,
    Width,
    Ascender,
    Descender,
    Height,
    LineGap,
    TypographicAscender,
    TypographicDescender,
    TypographicLineGap,
    VerticalAscender,
    VerticalDescender,
    VerticalHeight,
    VerticalLineGap,
    UnitsPerEm,
    XHeight,
    CapitalHeight,
    NumberOfGlyphs,
    NameRecordsCount,
    VariationAxesCount,
}

impl FaceQuery {
    /// Exported symbol of the entry point
    pub fn symbol(self) -> &'static str {
        match self {
            FaceQuery::IsRegular => "ttfp_is_regular",
            FaceQuery::IsItalic => "ttfp_is_italic",
            FaceQuery::IsBold => "ttfp_is_bold",
            FaceQuery::IsOblique => "ttfp_is_oblique",
            FaceQuery::IsMonospaced => "ttfp_is_monospaced",
            FaceQuery::IsVariable => "ttfp_is_variable",
            FaceQuery::Weight => "ttfp_get_weight",
            FaceQuery::Width => "ttfp_get_width",
            FaceQuery::Ascender => "ttfp_get_ascender",
            FaceQuery::Descender => "ttfp_get_descender",
            FaceQuery::Height => "ttfp_get_height",
            FaceQuery::LineGap => "ttfp_get_line_gap",
            FaceQuery::TypographicAscender => "ttfp_get_typographic_ascender",
            FaceQuery::TypographicDescender => "ttfp_get_typographic_descender",
            FaceQuery::TypographicLineGap => "ttfp_get_typographic_line_gap",
            FaceQuery::VerticalAscender => "ttfp_get_vertical_ascender",
            FaceQuery::VerticalDescender => "ttfp_get_vertical_descender",
            FaceQuery::VerticalHeight => "ttfp_get_vertical_height",
            FaceQuery::VerticalLineGap => "ttfp_get_vertical_line_gap",
            FaceQuery::UnitsPerEm => "ttfp_get_units_per_em",
            FaceQuery::XHeight => "ttfp_get_x_height",
            FaceQuery::CapitalHeight => "ttfp_get_capital_height",
            FaceQuery::NumberOfGlyphs => "ttfp_get_number_of_glyphs",
            FaceQuery::NameRecordsCount => "ttfp_get_name_records_count",
            FaceQuery::VariationAxesCount => "ttfp_get_variation_axes_count",
        }
    }
}

/// Face getters that fill a fixed-width record and report success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordQuery {
    /// Writes [`RawLineMetrics`]
    UnderlineMetrics,
    /// Writes [`RawLineMetrics`]
    StrikeoutMetrics,
    /// Writes [`RawScriptMetrics`]
    SubscriptMetrics,
    /// Writes [`RawScriptMetrics`]
    SuperscriptMetrics,
    /// Writes [`RawRect`]; always succeeds
    GlobalBoundingBox,
}

impl RecordQuery {
    pub fn symbol(self) -> &'static str {
        match self {
            RecordQuery::UnderlineMetrics => "ttfp_get_underline_metrics",
            RecordQuery::StrikeoutMetrics => "ttfp_get_strikeout_metrics",
            RecordQuery::SubscriptMetrics => "ttfp_get_subscript_metrics",
            RecordQuery::SuperscriptMetrics => "ttfp_get_superscript_metrics",
            RecordQuery::GlobalBoundingBox => "ttfp_get_global_bounding_box",
        }
    }

    /// Byte width of the record this query writes
    pub fn record_size(self) -> u32 {
        match self {
            RecordQuery::UnderlineMetrics | RecordQuery::StrikeoutMetrics => RawLineMetrics::SIZE,
            RecordQuery::SubscriptMetrics | RecordQuery::SuperscriptMetrics => {
                RawScriptMetrics::SIZE
            }
            RecordQuery::GlobalBoundingBox => RawRect::SIZE,
        }
    }
}

/// Per-glyph getters that return a number or a 0/1 flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphQuery {
    HorAdvance,
    VerAdvance,
    HorSideBearing,
    VerSideBearing,
    YOrigin,
    Class,
    MarkAttachmentClass,
    IsMark,
}

impl GlyphQuery {
    pub fn symbol(self) -> &'static str {
        match self {
            GlyphQuery::HorAdvance => "ttfp_get_glyph_hor_advance",
            GlyphQuery::VerAdvance => "ttfp_get_glyph_ver_advance",
            GlyphQuery::HorSideBearing => "ttfp_get_glyph_hor_side_bearing",
            GlyphQuery::VerSideBearing => "ttfp_get_glyph_ver_side_bearing",
            GlyphQuery::YOrigin => "ttfp_get_glyph_y_origin",
            GlyphQuery::Class => "ttfp_get_glyph_class",
            GlyphQuery::MarkAttachmentClass => "ttfp_get_glyph_mark_attachment_class",
            GlyphQuery::IsMark => "ttfp_is_mark_glyph",
        }
    }
}

/// Symbols of the entry points that have a signature of their own
pub mod symbols {
    pub const FACE_SIZE_OF: &str = "ttfp_face_size_of";
    pub const FACE_INIT: &str = "ttfp_face_init";
    pub const FONTS_IN_COLLECTION: &str = "ttfp_fonts_in_collection";
    pub const HAS_TABLE: &str = "ttfp_has_table";
    pub const ITALIC_ANGLE: &str = "ttfp_get_italic_angle";
    pub const NAME_RECORD: &str = "ttfp_get_name_record";
    pub const NAME_RECORD_STRING: &str = "ttfp_get_name_record_string";
    pub const GLYPH_INDEX: &str = "ttfp_get_glyph_index";
    pub const GLYPH_VAR_INDEX: &str = "ttfp_get_glyph_var_index";
    pub const GLYPH_NAME: &str = "ttfp_get_glyph_name";
    pub const GLYPH_BBOX: &str = "ttfp_get_glyph_bbox";
    pub const GLYPH_SVG_IMAGE: &str = "ttfp_get_glyph_svg_image";
    pub const VARIATION_AXIS: &str = "ttfp_get_variation_axis";
    pub const VARIATION_AXIS_BY_TAG: &str = "ttfp_get_variation_axis_by_tag";
}

/// Name record header as written by `ttfp_get_name_record`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawNameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    /// Byte length of the name string that follows
    pub name_size: u16,
}

impl Record for RawNameRecord {
    fn swap_le(self) -> Self {
        Self {
            platform_id: u16::from_le(self.platform_id),
            encoding_id: u16::from_le(self.encoding_id),
            language_id: u16::from_le(self.language_id),
            name_id: u16::from_le(self.name_id),
            name_size: u16::from_le(self.name_size),
        }
    }
}

/// Underline or strikeout metrics
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawLineMetrics {
    pub position: i16,
    pub thickness: i16,
}

impl Record for RawLineMetrics {
    fn swap_le(self) -> Self {
        Self {
            position: i16::from_le(self.position),
            thickness: i16::from_le(self.thickness),
        }
    }
}

/// Subscript or superscript metrics
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawScriptMetrics {
    pub x_size: i16,
    pub y_size: i16,
    pub x_offset: i16,
    pub y_offset: i16,
}

impl Record for RawScriptMetrics {
    fn swap_le(self) -> Self {
        Self {
            x_size: i16::from_le(self.x_size),
            y_size: i16::from_le(self.y_size),
            x_offset: i16::from_le(self.x_offset),
            y_offset: i16::from_le(self.y_offset),
        }
    }
}

/// Bounding rectangle in font units
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawRect {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Record for RawRect {
    fn swap_le(self) -> Self {
        Self {
            x_min: i16::from_le(self.x_min),
            y_min: i16::from_le(self.y_min),
            x_max: i16::from_le(self.x_max),
            y_max: i16::from_le(self.y_max),
        }
    }
}

/// Variation axis as written by `ttfp_get_variation_axis`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RawVariationAxis {
    pub tag: u32,
    pub min_value: f32,
    pub default_value: f32,
    pub max_value: f32,
    pub name_id: u16,
    pub hidden: u8,
    /// Trailing alignment byte of the engine's struct
    pub padding: u8,
}

impl Record for RawVariationAxis {
    fn swap_le(self) -> Self {
        let float = |value: f32| f32::from_bits(u32::from_le(value.to_bits()));
        Self {
            tag: u32::from_le(self.tag),
            min_value: float(self.min_value),
            default_value: float(self.default_value),
            max_value: float(self.max_value),
            name_id: u16::from_le(self.name_id),
            hidden: self.hidden,
            padding: self.padding,
        }
    }
}

/// The engine's exported entry points
///
/// Every address argument must point at live bytes of [`Engine::memory`].
/// Implementations never retain an address past the call that received it.
/// An `Err` is a trap: the contract was violated and the call has no result.
pub trait Engine {
    /// The linear memory shared with the caller
    fn memory(&self) -> &LinearMemory;

    fn memory_mut(&mut self) -> &mut LinearMemory;

    /// First address past the engine's static data
    fn heap_base(&self) -> Ptr;

    /// `ttfp_face_size_of`: byte size of the face-state block
    fn face_size_of(&mut self) -> Result<u32>;

    /// `ttfp_face_init`: parses `len` font bytes at `data` and fills the
    /// face state at `face`
    fn face_init(&mut self, data: Ptr, len: u32, index: u32, face: Ptr) -> Result<()>;

    /// `ttfp_fonts_in_collection`: face count, or -1 if `data` is not a collection
    fn fonts_in_collection(&mut self, data: Ptr, len: u32) -> Result<i32>;

    /// `ttfp_has_table` with a [`TableName`](crate::types::TableName) code
    fn has_table(&mut self, face: Ptr, table: u32) -> Result<i32>;

    fn face_value(&mut self, face: Ptr, query: FaceQuery) -> Result<i32>;

    /// `ttfp_get_italic_angle`: 0.0 when the font has none
    fn italic_angle(&mut self, face: Ptr) -> Result<f32>;

    fn face_record(&mut self, face: Ptr, query: RecordQuery, out: Ptr) -> Result<i32>;

    /// `ttfp_get_name_record`: writes a [`RawNameRecord`] to `out`
    fn name_record(&mut self, face: Ptr, index: u32, out: Ptr) -> Result<i32>;

    /// `ttfp_get_name_record_string`: writes exactly `len` raw name bytes to `out`
    fn name_record_string(&mut self, face: Ptr, index: u32, out: Ptr, len: u32) -> Result<i32>;

    /// `ttfp_get_glyph_index`: 0 when the codepoint is unmapped
    fn glyph_index(&mut self, face: Ptr, codepoint: u32) -> Result<i32>;

    /// `ttfp_get_glyph_var_index`: 0 when the pair is unmapped
    fn glyph_variation_index(&mut self, face: Ptr, codepoint: u32, variation: u32) -> Result<i32>;

    fn glyph_value(&mut self, face: Ptr, query: GlyphQuery, glyph: u16) -> Result<i32>;

    /// `ttfp_get_glyph_name`: NUL-terminated name into a
    /// [`GLYPH_NAME_CAPACITY`]-byte buffer at `out`
    fn glyph_name(&mut self, face: Ptr, glyph: u16, out: Ptr) -> Result<i32>;

    /// `ttfp_get_glyph_bbox`: writes a [`RawRect`] to `out`
    fn glyph_bbox(&mut self, face: Ptr, glyph: u16, out: Ptr) -> Result<i32>;

    /// `ttfp_get_glyph_svg_image`: writes the address (u32) of the glyph's
    /// SVG document to `svg_out` and its length (u32) to `len_out`
    fn glyph_svg_image(&mut self, face: Ptr, glyph: u16, svg_out: Ptr, len_out: Ptr)
        -> Result<i32>;

    /// `ttfp_get_variation_axis`: writes a [`RawVariationAxis`] to `out`
    fn variation_axis(&mut self, face: Ptr, index: u32, out: Ptr) -> Result<i32>;

    /// `ttfp_get_variation_axis_by_tag`: writes a [`RawVariationAxis`] to `out`
    fn variation_axis_by_tag(&mut self, face: Ptr, tag: u32, out: Ptr) -> Result<i32>;
}
