// this_file: crates/ttface-core/src/types.rs

//! Values the façade hands back once the raw bytes are decoded

use std::fmt;

use crate::abi::{RawLineMetrics, RawRect, RawScriptMetrics, RawVariationAxis};

/// Unique identifier for a glyph within a face
pub type GlyphId = u16;

/// Font tables the engine can report on
///
/// The discriminant is the code the engine expects in `ttfp_has_table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum TableName {
    AxisVariations = 0,
    CharacterToGlyphIndexMapping = 1,
    ColorBitmapData = 2,
    ColorBitmapLocation = 3,
    CompactFontFormat = 4,
    CompactFontFormat2 = 5,
    FontVariations = 6,
    GlyphData = 7,
    GlyphDefinition = 8,
    GlyphVariations = 9,
    Header = 10,
    HorizontalHeader = 11,
    HorizontalMetrics = 12,
    HorizontalMetricsVariations = 13,
    IndexToLocation = 14,
    Kerning = 15,
    MaximumProfile = 16,
    MetricsVariations = 17,
    Naming = 18,
    PostScript = 19,
    ScalableVectorGraphics = 20,
    StandardBitmapGraphics = 21,
    VerticalHeader = 22,
    VerticalMetrics = 23,
    VerticalMetricsVariations = 24,
    VerticalOrigin = 25,
    WindowsMetrics = 26,
}

impl TableName {
    /// Every table name in code order
    pub const ALL: [TableName; 27] = [
        TableName::AxisVariations,
        TableName::CharacterToGlyphIndexMapping,
        TableName::ColorBitmapData,
        TableName::ColorBitmapLocation,
        TableName::CompactFontFormat,
        TableName::CompactFontFormat2,
        TableName::FontVariations,
        TableName::GlyphData,
        TableName::GlyphDefinition,
        TableName::GlyphVariations,
        TableName::Header,
        TableName::HorizontalHeader,
        TableName::HorizontalMetrics,
        TableName::HorizontalMetricsVariations,
        TableName::IndexToLocation,
        TableName::Kerning,
        TableName::MaximumProfile,
        TableName::MetricsVariations,
        TableName::Naming,
        TableName::PostScript,
        TableName::ScalableVectorGraphics,
        TableName::StandardBitmapGraphics,
        TableName::VerticalHeader,
        TableName::VerticalMetrics,
        TableName::VerticalMetricsVariations,
        TableName::VerticalOrigin,
        TableName::WindowsMetrics,
    ];

    /// Integer code used on the engine boundary
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// The OpenType tag of the table
    pub fn tag(self) -> Tag {
        Tag::new(match self {
            TableName::AxisVariations => b"avar",
            TableName::CharacterToGlyphIndexMapping => b"cmap",
            TableName::ColorBitmapData => b"CBDT",
            TableName::ColorBitmapLocation => b"CBLC",
            TableName::CompactFontFormat => b"CFF ",
            TableName::CompactFontFormat2 => b"CFF2",
            TableName::FontVariations => b"fvar",
            TableName::GlyphData => b"glyf",
            TableName::GlyphDefinition => b"GDEF",
            TableName::GlyphVariations => b"gvar",
            TableName::Header => b"head",
            TableName::HorizontalHeader => b"hhea",
            TableName::HorizontalMetrics => b"hmtx",
            TableName::HorizontalMetricsVariations => b"HVAR",
            TableName::IndexToLocation => b"loca",
            TableName::Kerning => b"kern",
            TableName::MaximumProfile => b"maxp",
            TableName::MetricsVariations => b"MVAR",
            TableName::Naming => b"name",
            TableName::PostScript => b"post",
            TableName::ScalableVectorGraphics => b"SVG ",
            TableName::StandardBitmapGraphics => b"sbix",
            TableName::VerticalHeader => b"vhea",
            TableName::VerticalMetrics => b"vmtx",
            TableName::VerticalMetricsVariations => b"VVAR",
            TableName::VerticalOrigin => b"VORG",
            TableName::WindowsMetrics => b"OS/2",
        })
    }
}

/// A four-byte OpenType tag
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tag([u8; 4]);

impl Tag {
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Tag(*bytes)
    }

    /// Builds a tag from its big-endian integer form
    pub const fn from_u32(value: u32) -> Self {
        Tag(value.to_be_bytes())
    }

    /// Big-endian integer form, as passed across the engine boundary
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl std::str::FromStr for Tag {
    type Err = String;

    /// Parses up to four ASCII characters, padding with spaces
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 4 || !s.is_ascii() {
            return Err(format!("invalid tag '{s}': expected 1-4 ASCII characters"));
        }
        let mut bytes = [b' '; 4];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Ok(Tag(bytes))
    }
}

/// GDEF glyph class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GlyphClass {
    Base,
    Ligature,
    Mark,
    Component,
}

impl GlyphClass {
    /// Decodes the engine's class code; 0 and unknown codes have no class
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(GlyphClass::Base),
            2 => Some(GlyphClass::Ligature),
            3 => Some(GlyphClass::Mark),
            4 => Some(GlyphClass::Component),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            GlyphClass::Base => 1,
            GlyphClass::Ligature => 2,
            GlyphClass::Mark => 3,
            GlyphClass::Component => 4,
        }
    }
}

/// One entry of the `name` table with its raw, undecoded string bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: Vec<u8>,
}

impl NameRecord {
    /// Whether `value` is UTF-16BE (Unicode platform, or Windows Unicode encodings)
    pub fn is_unicode(&self) -> bool {
        self.platform_id == 0
            || (self.platform_id == 3 && matches!(self.encoding_id, 0 | 1 | 10))
    }

    /// Decodes `value` as UTF-16BE, or `None` for non-Unicode records
    pub fn to_string_lossy(&self) -> Option<String> {
        if !self.is_unicode() {
            return None;
        }
        let units: Vec<u16> = self
            .value
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        Some(String::from_utf16_lossy(&units))
    }
}

/// Underline or strikeout position and thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineMetrics {
    pub position: i16,
    pub thickness: i16,
}

impl From<RawLineMetrics> for LineMetrics {
    fn from(raw: RawLineMetrics) -> Self {
        LineMetrics {
            position: raw.position,
            thickness: raw.thickness,
        }
    }
}

/// Subscript or superscript size and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScriptMetrics {
    pub x_size: i16,
    pub y_size: i16,
    pub x_offset: i16,
    pub y_offset: i16,
}

impl From<RawScriptMetrics> for ScriptMetrics {
    fn from(raw: RawScriptMetrics) -> Self {
        ScriptMetrics {
            x_size: raw.x_size,
            y_size: raw.y_size,
            x_offset: raw.x_offset,
            y_offset: raw.y_offset,
        }
    }
}

/// Rectangle in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rect {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Rect {
    pub fn width(&self) -> i32 {
        i32::from(self.x_max) - i32::from(self.x_min)
    }

    pub fn height(&self) -> i32 {
        i32::from(self.y_max) - i32::from(self.y_min)
    }
}

impl From<RawRect> for Rect {
    fn from(raw: RawRect) -> Self {
        Rect {
            x_min: raw.x_min,
            y_min: raw.y_min,
            x_max: raw.x_max,
            y_max: raw.y_max,
        }
    }
}

/// A variation axis from `fvar`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationAxis {
    pub tag: Tag,
    pub min_value: f32,
    pub default_value: f32,
    pub max_value: f32,
    pub name_id: u16,
    pub hidden: bool,
}

impl From<RawVariationAxis> for VariationAxis {
    fn from(raw: RawVariationAxis) -> Self {
        VariationAxis {
            tag: Tag::from_u32(raw.tag),
            min_value: raw.min_value,
            default_value: raw.default_value,
            max_value: raw.max_value,
            name_id: raw.name_id,
            hidden: raw.hidden != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_codes_round_trip_in_order() {
        for (code, name) in TableName::ALL.iter().enumerate() {
            assert_eq!(name.code(), code as u32);
            assert_eq!(TableName::from_code(code as u32), Some(*name));
        }
        assert_eq!(TableName::from_code(27), None);
        assert_eq!(TableName::WindowsMetrics.tag(), Tag::new(b"OS/2"));
    }

    #[test]
    fn test_tag_parsing_pads_and_displays() {
        let tag: Tag = "CFF".parse().unwrap();
        assert_eq!(tag, Tag::new(b"CFF "));
        assert_eq!(tag.to_string(), "CFF ");
        assert_eq!(Tag::from_u32(Tag::new(b"wght").to_u32()), Tag::new(b"wght"));
        assert!("toolong".parse::<Tag>().is_err());
    }

    #[test]
    fn test_glyph_class_codes() {
        assert_eq!(GlyphClass::from_code(0), None);
        assert_eq!(GlyphClass::from_code(3), Some(GlyphClass::Mark));
        assert_eq!(GlyphClass::from_code(5), None);
        assert_eq!(GlyphClass::Component.code(), 4);
    }

    #[test]
    fn test_name_record_utf16_decoding() {
        let record = NameRecord {
            platform_id: 3,
            encoding_id: 1,
            language_id: 0x409,
            name_id: 1,
            value: vec![0, b'H', 0, b'i'],
        };
        assert_eq!(record.to_string_lossy().as_deref(), Some("Hi"));

        let mac = NameRecord {
            platform_id: 1,
            ..record
        };
        assert_eq!(mac.to_string_lossy(), None);
    }
}
