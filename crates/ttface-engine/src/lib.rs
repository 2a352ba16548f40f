//! ttface Engine: the font engine, in-process
//!
//! [`NativeEngine`] implements the `ttfp_*` entry points over its own
//! [`LinearMemory`], the same way a compiled engine module would: it only
//! ever sees addresses, reads its inputs out of memory and writes its
//! outputs back. Parsing is done by `read-fonts` and `skrifa`.
//!
//! The engine keeps nothing between calls. `face_init` writes a small
//! state block (where the font bytes are, which face, whether they parsed)
//! and every other entry point re-opens the font from it.
//!
//! ```rust
//! use ttface_core::{Engine, FaceQuery};
//! use ttface_engine::NativeEngine;
//!
//! let mut engine = NativeEngine::new();
//! let face = engine.heap_base();
//! let size = engine.face_size_of()?;
//! engine.face_init(face + size, 0, 0, face)?;
//!
//! // Nothing parsed, so every getter reports its failure value
//! assert_eq!(engine.face_value(face, FaceQuery::NumberOfGlyphs)?, 0);
//! # Ok::<(), ttface_core::TtfaceError>(())
//! ```

mod collection;
mod glyphs;
mod metrics;
mod names;
mod state;
mod variations;

use ttface_core::abi::symbols;
use ttface_core::{
    Engine, FaceQuery, GlyphQuery, LinearMemory, Ptr, Record, RecordQuery, Result, PAGE_SIZE,
};

use crate::metrics::FaceRecord;
use crate::state::{trap, FaceState, READY};

/// Where the heap starts when nothing else is configured
///
/// A compiled engine reports this as `__heap_base`; the native engine has
/// no static data, but keeps the low addresses free all the same.
pub const DEFAULT_HEAP_BASE: Ptr = 1024;

/// Font engine implemented with `read-fonts`/`skrifa`
#[derive(Debug, Clone)]
pub struct NativeEngine {
    memory: LinearMemory,
    heap_base: Ptr,
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::with_heap_base(DEFAULT_HEAP_BASE)
    }

    /// Creates an engine whose heap starts at `heap_base`
    ///
    /// The memory starts with just enough pages to cover the heap base.
    pub fn with_heap_base(heap_base: Ptr) -> Self {
        let pages = heap_base.div_ceil(PAGE_SIZE).max(1);
        Self {
            memory: LinearMemory::new(pages).unwrap_or_default(),
            heap_base,
        }
    }

    fn font_answer<T>(
        &self,
        symbol: &'static str,
        face: Ptr,
        query: impl FnOnce(&read_fonts::FontRef<'_>) -> T,
    ) -> Result<Option<T>> {
        Ok(state::open(&self.memory, symbol, face)?.map(|font| query(&font)))
    }

    /// Writes `record` to `out` if there is one and reports success
    fn write_answer<R: Record>(
        &mut self,
        symbol: &'static str,
        out: Ptr,
        record: Option<R>,
    ) -> Result<i32> {
        match record {
            Some(record) => {
                self.memory
                    .write_record(out, record)
                    .map_err(trap(symbol))?;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl Engine for NativeEngine {
    fn memory(&self) -> &LinearMemory {
        &self.memory
    }

    fn memory_mut(&mut self) -> &mut LinearMemory {
        &mut self.memory
    }

    fn heap_base(&self) -> Ptr {
        self.heap_base
    }

    fn face_size_of(&mut self) -> Result<u32> {
        Ok(FaceState::SIZE)
    }

    fn face_init(&mut self, data: Ptr, len: u32, index: u32, face: Ptr) -> Result<()> {
        let bytes = self
            .memory
            .bytes(data, len as usize)
            .map_err(trap(symbols::FACE_INIT))?;
        let status = match read_fonts::FontRef::from_index(bytes, index) {
            Ok(_) => READY,
            Err(err) => {
                log::warn!("Face {} of {} bytes at {} failed to parse: {}", index, len, data, err);
                0
            }
        };
        let state = FaceState {
            data,
            len,
            index,
            status,
        };
        self.memory
            .write_record(face, state)
            .map_err(trap(symbols::FACE_INIT))
    }

    fn fonts_in_collection(&mut self, data: Ptr, len: u32) -> Result<i32> {
        let bytes = self
            .memory
            .bytes(data, len as usize)
            .map_err(trap(symbols::FONTS_IN_COLLECTION))?;
        Ok(collection::fonts_in_collection(bytes))
    }

    fn has_table(&mut self, face: Ptr, table: u32) -> Result<i32> {
        let Some(name) = ttface_core::TableName::from_code(table) else {
            return Ok(0);
        };
        let tag = skrifa::Tag::new(&name.tag().to_bytes());
        let present = self.font_answer(symbols::HAS_TABLE, face, |font| {
            font.table_data(tag).is_some()
        })?;
        Ok(i32::from(present.unwrap_or(false)))
    }

    fn face_value(&mut self, face: Ptr, query: FaceQuery) -> Result<i32> {
        let value = self.font_answer(query.symbol(), face, |font| {
            metrics::face_value(font, query)
        })?;
        Ok(value.unwrap_or(0))
    }

    fn italic_angle(&mut self, face: Ptr) -> Result<f32> {
        let angle = self.font_answer(symbols::ITALIC_ANGLE, face, metrics::italic_angle)?;
        Ok(angle.unwrap_or(0.0))
    }

    fn face_record(&mut self, face: Ptr, query: RecordQuery, out: Ptr) -> Result<i32> {
        let symbol = query.symbol();
        let record = self
            .font_answer(symbol, face, |font| metrics::face_record(font, query))?
            .flatten();
        match record {
            Some(FaceRecord::Line(line)) => self.write_answer(symbol, out, Some(line)),
            Some(FaceRecord::Script(script)) => self.write_answer(symbol, out, Some(script)),
            Some(FaceRecord::Rect(rect)) => self.write_answer(symbol, out, Some(rect)),
            None => Ok(0),
        }
    }

    fn name_record(&mut self, face: Ptr, index: u32, out: Ptr) -> Result<i32> {
        let header = self
            .font_answer(symbols::NAME_RECORD, face, |font| names::header(font, index))?
            .flatten();
        self.write_answer(symbols::NAME_RECORD, out, header)
    }

    fn name_record_string(&mut self, face: Ptr, index: u32, out: Ptr, len: u32) -> Result<i32> {
        let bytes = self
            .font_answer(symbols::NAME_RECORD_STRING, face, |font| {
                names::string(font, index, len)
            })?
            .flatten();
        match bytes {
            Some(bytes) => {
                self.memory
                    .write(out, &bytes)
                    .map_err(trap(symbols::NAME_RECORD_STRING))?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn glyph_index(&mut self, face: Ptr, codepoint: u32) -> Result<i32> {
        let glyph = self.font_answer(symbols::GLYPH_INDEX, face, |font| {
            glyphs::index(font, codepoint)
        })?;
        Ok(glyph.unwrap_or(0))
    }

    fn glyph_variation_index(&mut self, face: Ptr, codepoint: u32, variation: u32) -> Result<i32> {
        let glyph = self.font_answer(symbols::GLYPH_VAR_INDEX, face, |font| {
            glyphs::variation_index(font, codepoint, variation)
        })?;
        Ok(glyph.unwrap_or(0))
    }

    fn glyph_value(&mut self, face: Ptr, query: GlyphQuery, glyph: u16) -> Result<i32> {
        let value = self.font_answer(query.symbol(), face, |font| {
            glyphs::glyph_value(font, query, glyph)
        })?;
        Ok(value.unwrap_or(0))
    }

    fn glyph_name(&mut self, face: Ptr, glyph: u16, out: Ptr) -> Result<i32> {
        let name = self
            .font_answer(symbols::GLYPH_NAME, face, |font| glyphs::name(font, glyph))?
            .flatten();
        match name {
            Some(name) => {
                self.memory
                    .write(out, &name)
                    .map_err(trap(symbols::GLYPH_NAME))?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn glyph_bbox(&mut self, face: Ptr, glyph: u16, out: Ptr) -> Result<i32> {
        let rect = self
            .font_answer(symbols::GLYPH_BBOX, face, |font| glyphs::bbox(font, glyph))?
            .flatten();
        self.write_answer(symbols::GLYPH_BBOX, out, rect)
    }

    fn glyph_svg_image(
        &mut self,
        face: Ptr,
        glyph: u16,
        svg_out: Ptr,
        len_out: Ptr,
    ) -> Result<i32> {
        let symbol = symbols::GLYPH_SVG_IMAGE;
        let document = self
            .font_answer(symbol, face, |font| glyphs::svg_document(font, glyph))?
            .flatten();
        let Some((offset, len)) = document else {
            return Ok(0);
        };
        let state: FaceState = self.memory.read_record(face).map_err(trap(symbol))?;
        let Some(address) = state.data.checked_add(offset) else {
            return Ok(0);
        };
        self.memory
            .write_scalar(svg_out, address)
            .map_err(trap(symbol))?;
        self.memory
            .write_scalar(len_out, len)
            .map_err(trap(symbol))?;
        Ok(1)
    }

    fn variation_axis(&mut self, face: Ptr, index: u32, out: Ptr) -> Result<i32> {
        let axis = self
            .font_answer(symbols::VARIATION_AXIS, face, |font| {
                variations::axis(font, index)
            })?
            .flatten();
        self.write_answer(symbols::VARIATION_AXIS, out, axis)
    }

    fn variation_axis_by_tag(&mut self, face: Ptr, tag: u32, out: Ptr) -> Result<i32> {
        let axis = self
            .font_answer(symbols::VARIATION_AXIS_BY_TAG, face, |font| {
                variations::axis_by_tag(font, tag)
            })?
            .flatten();
        self.write_answer(symbols::VARIATION_AXIS_BY_TAG, out, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttface_core::TtfaceError;

    #[test]
    fn test_memory_covers_heap_base() {
        let engine = NativeEngine::with_heap_base(PAGE_SIZE + 8);
        assert_eq!(engine.memory().pages(), 2);
        assert_eq!(engine.heap_base(), PAGE_SIZE + 8);
    }

    #[test]
    fn test_face_state_size_is_stable() {
        let mut engine = NativeEngine::new();
        assert_eq!(engine.face_size_of().unwrap(), 16);
    }

    #[test]
    fn test_init_outside_memory_traps() {
        let mut engine = NativeEngine::new();
        let err = engine.face_init(PAGE_SIZE - 4, 8, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            TtfaceError::Trap {
                symbol: "ttfp_face_init",
                ..
            }
        ));
    }

    #[test]
    fn test_unparsed_face_answers_failure_values() {
        let mut engine = NativeEngine::new();
        let face = engine.heap_base();
        engine.memory_mut().write(face + 16, b"junk").unwrap();
        engine.face_init(face + 16, 4, 0, face).unwrap();

        assert_eq!(engine.face_value(face, FaceQuery::Weight).unwrap(), 0);
        assert_eq!(engine.italic_angle(face).unwrap(), 0.0);
        assert_eq!(engine.glyph_index(face, 'A' as u32).unwrap(), 0);
        assert_eq!(
            engine
                .face_record(face, RecordQuery::GlobalBoundingBox, face + 64)
                .unwrap(),
            0
        );
        assert_eq!(engine.has_table(face, 10).unwrap(), 0);
    }
}
