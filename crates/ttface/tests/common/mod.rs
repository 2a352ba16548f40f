//! A scripted engine that counts its calls
//!
//! `FakeEngine` answers from per-font tables instead of parsing anything.
//! The font is picked by the first byte of the font data it finds at the
//! address `face_init` was given, so a face that forgot to copy its own
//! bytes in gets another face's answers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use ttface::{Module, ModuleConfig, SharedModule};
use ttface_core::{
    Engine, FaceQuery, GlyphQuery, LinearMemory, Ptr, RawNameRecord, RawRect, RawVariationAxis,
    RecordQuery, Result,
};

pub const HEAP_BASE: Ptr = 2048;
/// Face state: data pointer, data length, face index
pub const FACE_SIZE: u32 = 12;

/// Per-symbol call counts, shared with the test that built the engine
#[derive(Debug, Clone, Default)]
pub struct Calls(Arc<Mutex<HashMap<&'static str, usize>>>);

impl Calls {
    fn record(&self, symbol: &'static str) {
        *self.0.lock().entry(symbol).or_default() += 1;
    }

    pub fn count(&self, symbol: &str) -> usize {
        self.0.lock().get(symbol).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.lock().values().sum()
    }

    /// Calls other than face set-up
    pub fn queries(&self) -> usize {
        self.total() - self.count("ttfp_face_init") - self.count("ttfp_face_size_of")
    }
}

/// Everything the fake reports for one font
#[derive(Debug, Clone, Default)]
pub struct FakeFont {
    pub tables: Vec<u32>,
    pub values: HashMap<FaceQuery, i32>,
    pub italic_angle: f32,
    pub records: HashMap<RecordQuery, [i16; 4]>,
    pub names: Vec<(RawNameRecord, Vec<u8>)>,
    /// Index whose string call fails
    pub failing_name: Option<u32>,
    pub cmap: HashMap<u32, i32>,
    pub variants: HashMap<(u32, u32), i32>,
    pub glyph_values: HashMap<(GlyphQuery, u16), i32>,
    /// Written verbatim; include the NUL
    pub glyph_names: HashMap<u16, Vec<u8>>,
    pub bboxes: HashMap<u16, RawRect>,
    /// Offset into the font bytes and length
    pub svg: HashMap<u16, (u32, u32)>,
    pub axes: Vec<RawVariationAxis>,
    pub failing_axis: Option<u32>,
}

impl FakeFont {
    pub fn value(mut self, query: FaceQuery, value: i32) -> Self {
        self.values.insert(query, value);
        self
    }

    pub fn glyph_value(mut self, query: GlyphQuery, glyph: u16, value: i32) -> Self {
        self.glyph_values.insert((query, glyph), value);
        self
    }

    pub fn name(mut self, name_id: u16, value: &[u8]) -> Self {
        let header = RawNameRecord {
            platform_id: 3,
            encoding_id: 1,
            language_id: 0x409,
            name_id,
            name_size: value.len() as u16,
        };
        self.names.push((header, value.to_vec()));
        self
    }
}

#[derive(Debug)]
pub struct FakeEngine {
    memory: LinearMemory,
    fonts: HashMap<u8, FakeFont>,
    collection: i32,
    pub calls: Calls,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            memory: LinearMemory::new(1).unwrap(),
            fonts: HashMap::new(),
            collection: -1,
            calls: Calls::default(),
        }
    }

    pub fn with_font(mut self, id: u8, font: FakeFont) -> Self {
        self.fonts.insert(id, font);
        self
    }

    pub fn with_collection(mut self, count: i32) -> Self {
        self.collection = count;
        self
    }

    /// Follows the face state back to the font data's first byte
    fn font(&self, face: Ptr) -> Result<Option<&FakeFont>> {
        let data: u32 = self.memory.read(face)?;
        let len: u32 = self.memory.read(face + 4)?;
        if len == 0 {
            return Ok(None);
        }
        let id: u8 = self.memory.read(data)?;
        Ok(self.fonts.get(&id))
    }

    fn answer(&self, face: Ptr, read: impl FnOnce(&FakeFont) -> Option<i32>) -> Result<i32> {
        Ok(self.font(face)?.and_then(read).unwrap_or(0))
    }
}

/// Font bytes that select fake font `id`
pub fn font_data(id: u8, len: usize) -> Vec<u8> {
    let mut data = vec![0xAB; len.max(1)];
    data[0] = id;
    data
}

/// A two-page module around `engine`
pub fn module(engine: FakeEngine) -> SharedModule<FakeEngine> {
    Module::with_config(engine, ModuleConfig::new(1).unwrap())
        .unwrap()
        .shared()
}

impl Engine for FakeEngine {
    fn memory(&self) -> &LinearMemory {
        &self.memory
    }

    fn memory_mut(&mut self) -> &mut LinearMemory {
        &mut self.memory
    }

    fn heap_base(&self) -> Ptr {
        HEAP_BASE
    }

    fn face_size_of(&mut self) -> Result<u32> {
        self.calls.record("ttfp_face_size_of");
        Ok(FACE_SIZE)
    }

    fn face_init(&mut self, data: Ptr, len: u32, index: u32, face: Ptr) -> Result<()> {
        self.calls.record("ttfp_face_init");
        self.memory.bytes(data, len as usize)?;
        self.memory.write_scalar(face, data)?;
        self.memory.write_scalar(face + 4, len)?;
        self.memory.write_scalar(face + 8, index)
    }

    fn fonts_in_collection(&mut self, data: Ptr, len: u32) -> Result<i32> {
        self.calls.record("ttfp_fonts_in_collection");
        self.memory.bytes(data, len as usize)?;
        Ok(self.collection)
    }

    fn has_table(&mut self, face: Ptr, table: u32) -> Result<i32> {
        self.calls.record("ttfp_has_table");
        self.answer(face, |font| Some(i32::from(font.tables.contains(&table))))
    }

    fn face_value(&mut self, face: Ptr, query: FaceQuery) -> Result<i32> {
        self.calls.record(query.symbol());
        self.answer(face, |font| font.values.get(&query).copied())
    }

    fn italic_angle(&mut self, face: Ptr) -> Result<f32> {
        self.calls.record("ttfp_get_italic_angle");
        Ok(self.font(face)?.map_or(0.0, |font| font.italic_angle))
    }

    fn face_record(&mut self, face: Ptr, query: RecordQuery, out: Ptr) -> Result<i32> {
        self.calls.record(query.symbol());
        let Some(fields) = self.font(face)?.and_then(|font| font.records.get(&query)).copied()
        else {
            return Ok(0);
        };
        let count = query.record_size() / 2;
        for (at, field) in fields.iter().take(count as usize).enumerate() {
            self.memory.write_scalar(out + 2 * at as u32, *field)?;
        }
        Ok(1)
    }

    fn name_record(&mut self, face: Ptr, index: u32, out: Ptr) -> Result<i32> {
        self.calls.record("ttfp_get_name_record");
        let Some(header) = self
            .font(face)?
            .and_then(|font| font.names.get(index as usize))
            .map(|(header, _)| *header)
        else {
            return Ok(0);
        };
        self.memory.write_record(out, header)?;
        Ok(1)
    }

    fn name_record_string(&mut self, face: Ptr, index: u32, out: Ptr, len: u32) -> Result<i32> {
        self.calls.record("ttfp_get_name_record_string");
        let Some(font) = self.font(face)? else {
            return Ok(0);
        };
        if font.failing_name == Some(index) {
            return Ok(0);
        }
        let Some(value) = font.names.get(index as usize).map(|(_, value)| value.clone()) else {
            return Ok(0);
        };
        if value.len() != len as usize {
            return Ok(0);
        }
        self.memory.write(out, &value)?;
        Ok(1)
    }

    fn glyph_index(&mut self, face: Ptr, codepoint: u32) -> Result<i32> {
        self.calls.record("ttfp_get_glyph_index");
        self.answer(face, |font| font.cmap.get(&codepoint).copied())
    }

    fn glyph_variation_index(&mut self, face: Ptr, codepoint: u32, variation: u32) -> Result<i32> {
        self.calls.record("ttfp_get_glyph_var_index");
        self.answer(face, |font| font.variants.get(&(codepoint, variation)).copied())
    }

    fn glyph_value(&mut self, face: Ptr, query: GlyphQuery, glyph: u16) -> Result<i32> {
        self.calls.record(query.symbol());
        self.answer(face, |font| font.glyph_values.get(&(query, glyph)).copied())
    }

    fn glyph_name(&mut self, face: Ptr, glyph: u16, out: Ptr) -> Result<i32> {
        self.calls.record("ttfp_get_glyph_name");
        let Some(name) = self.font(face)?.and_then(|font| font.glyph_names.get(&glyph)).cloned()
        else {
            return Ok(0);
        };
        self.memory.write(out, &name)?;
        Ok(1)
    }

    fn glyph_bbox(&mut self, face: Ptr, glyph: u16, out: Ptr) -> Result<i32> {
        self.calls.record("ttfp_get_glyph_bbox");
        let Some(rect) = self.font(face)?.and_then(|font| font.bboxes.get(&glyph)).copied() else {
            return Ok(0);
        };
        self.memory.write_record(out, rect)?;
        Ok(1)
    }

    fn glyph_svg_image(&mut self, face: Ptr, glyph: u16, svg_out: Ptr, len_out: Ptr) -> Result<i32> {
        self.calls.record("ttfp_get_glyph_svg_image");
        let Some((offset, len)) = self.font(face)?.and_then(|font| font.svg.get(&glyph)).copied()
        else {
            return Ok(0);
        };
        let data: u32 = self.memory.read(face)?;
        self.memory.write_scalar(svg_out, data + offset)?;
        self.memory.write_scalar(len_out, len)?;
        Ok(1)
    }

    fn variation_axis(&mut self, face: Ptr, index: u32, out: Ptr) -> Result<i32> {
        self.calls.record("ttfp_get_variation_axis");
        let Some(font) = self.font(face)? else {
            return Ok(0);
        };
        if font.failing_axis == Some(index) {
            return Ok(0);
        }
        let Some(axis) = font.axes.get(index as usize).copied() else {
            return Ok(0);
        };
        self.memory.write_record(out, axis)?;
        Ok(1)
    }

    fn variation_axis_by_tag(&mut self, face: Ptr, tag: u32, out: Ptr) -> Result<i32> {
        self.calls.record("ttfp_get_variation_axis_by_tag");
        let Some(axis) = self
            .font(face)?
            .and_then(|font| font.axes.iter().find(|axis| axis.tag == tag))
            .copied()
        else {
            return Ok(0);
        };
        self.memory.write_record(out, axis)?;
        Ok(1)
    }
}
