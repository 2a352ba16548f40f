// this_file: crates/ttface/src/face.rs

//! The face façade
//!
//! A [`Face`] owns its font bytes and a cache, nothing else. The engine never
//! sees the face until a query misses the cache; then the face locks the
//! module, copies its bytes behind the face state block, initializes the
//! face there and makes the one call the query needs. Every miss repeats
//! that initialization, so faces sharing a module never depend on what
//! another face left behind.
//!
//! Engine results are decoded right here. Which raw values mean "absent"
//! differs per getter:
//!
//! | getters | absent when |
//! |---|---|
//! | style flags, weight, width, ascender and friends, glyph count | never |
//! | typographic and vertical metrics, x-height, capital height | raw value is 0 |
//! | units per em | outside 16..=16384 |
//! | italic angle | raw value is 0.0 |
//! | glyph lookups | glyph id 0 (`.notdef`) |
//! | per-glyph advances, bearings, y origin | raw value is 0 |
//! | records, glyph names, boxes, SVG images, axes | the engine reports failure |

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use ttface_core::abi::symbols;
use ttface_core::{
    truthy, Engine, FaceQuery, GlyphClass, GlyphId, GlyphQuery, LineMetrics, NameRecord, Ptr,
    RawLineMetrics, RawNameRecord, RawRect, RawScriptMetrics, RawVariationAxis, Record,
    RecordQuery, Rect, Result, ScriptMetrics, TableName, Tag, VariationAxis, GLYPH_NAME_CAPACITY,
};

use crate::cache::{CacheStats, FaceCache, Memo, Slot, Slots};
use crate::layout::Layout;
use crate::module::{Module, SharedModule};

/// Smallest and largest units-per-em a well-formed font can declare
const UNITS_PER_EM_RANGE: std::ops::RangeInclusive<u16> = 16..=16384;

/// 0 means absent; anything that does not fit `T` is absent too
fn non_zero<T: TryFrom<i32>>(raw: i32) -> Option<T> {
    if raw == 0 {
        None
    } else {
        T::try_from(raw).ok()
    }
}

/// Values without an absent state
fn plain<T: TryFrom<i32> + Default>(raw: i32) -> T {
    T::try_from(raw).unwrap_or_default()
}

/// A font (or one member of a collection) bound to a shared engine module
pub struct Face<E: Engine> {
    module: SharedModule<E>,
    data: Arc<[u8]>,
    index: u32,
    cache: Mutex<FaceCache>,
}

impl<E: Engine> fmt::Debug for Face<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Face")
            .field("index", &self.index)
            .field("len", &self.data.len())
            .field("cache", &self.cache_stats())
            .finish()
    }
}

/// A locked module with this face initialized in it
///
/// Scratch contents are only valid until the next engine call, so every
/// helper copies what it read into an owned value before returning.
struct Session<'a, E: Engine> {
    module: MutexGuard<'a, Module<E>>,
    layout: Layout,
}

impl<E: Engine> Session<'_, E> {
    fn face(&self) -> Ptr {
        self.layout.face_state
    }

    fn engine(&mut self) -> &mut E {
        self.module.engine_mut()
    }

    fn value(&mut self, query: FaceQuery) -> Result<i32> {
        let face = self.face();
        self.engine().face_value(face, query)
    }

    fn glyph_value(&mut self, query: GlyphQuery, glyph: GlyphId) -> Result<i32> {
        let face = self.face();
        self.engine().glyph_value(face, query, glyph)
    }

    /// Runs an entry point that fills one `R` in scratch and reports success
    fn record<R: Record>(
        &mut self,
        call: impl FnOnce(&mut E, Ptr, Ptr) -> Result<i32>,
    ) -> Result<Option<R>> {
        let out = self.layout.scratch(R::SIZE)?;
        let face = self.face();
        let engine = self.module.engine_mut();
        if !truthy(call(&mut *engine, face, out)?) {
            return Ok(None);
        }
        engine.memory().read_record(out).map(Some)
    }

    /// Header first, then the string right behind it
    fn name_record(&mut self, index: u32) -> Result<Option<NameRecord>> {
        let Some(header) =
            self.record::<RawNameRecord>(|engine, face, out| engine.name_record(face, index, out))?
        else {
            return Ok(None);
        };
        let len = u32::from(header.name_size);
        let string_at = self.layout.scratch_at(RawNameRecord::SIZE, len)?;
        let face = self.face();
        let engine = self.module.engine_mut();
        if !truthy(engine.name_record_string(face, index, string_at, len)?) {
            return Ok(None);
        }
        let value = engine.memory().bytes(string_at, len as usize)?.to_vec();
        Ok(Some(NameRecord {
            platform_id: header.platform_id,
            encoding_id: header.encoding_id,
            language_id: header.language_id,
            name_id: header.name_id,
            value,
        }))
    }

    /// Reads the whole list behind a count getter, dropping indices that fail
    fn list<T>(
        &mut self,
        count: FaceQuery,
        what: &str,
        mut item: impl FnMut(&mut Self, u32) -> Result<Option<T>>,
    ) -> Result<Vec<T>> {
        let count = u32::try_from(self.value(count)?).unwrap_or(0);
        let mut items = Vec::with_capacity(count as usize);
        for index in 0..count {
            match item(&mut *self, index)? {
                Some(value) => items.push(value),
                None => log::debug!("Dropping {what} {index}: engine reported failure"),
            }
        }
        Ok(items)
    }
}

impl<E: Engine> Face<E> {
    /// Binds face `index` of `data` to `module`
    ///
    /// Nothing touches the engine until the first query.
    pub fn new(module: SharedModule<E>, data: impl Into<Arc<[u8]>>, index: u32) -> Self {
        Self {
            module,
            data: data.into(),
            index,
            cache: Mutex::new(FaceCache::default()),
        }
    }

    /// The font bytes this face was created from
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within [`data`](Self::data); 0 outside collections
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn module(&self) -> &SharedModule<E> {
        &self.module
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats
    }

    /// Locks the module and (re)initializes this face in it
    fn session(&self) -> Result<Session<'_, E>> {
        let mut module = self.module.lock();
        let layout = Layout::new(
            module.heap_base(),
            module.face_size(),
            self.data.len(),
            module.memory_size(),
        )?;
        let engine = module.engine_mut();
        engine.memory_mut().write(layout.font_bytes, &self.data)?;
        engine.face_init(layout.font_bytes, layout.font_len(), self.index, layout.face_state)?;
        log::debug!(
            "Initialized face {} ({} bytes) at {}",
            self.index,
            self.data.len(),
            layout.face_state
        );
        Ok(Session { module, layout })
    }

    fn cached<T: Clone>(
        &self,
        symbol: &'static str,
        slot: impl FnOnce(&mut Slots) -> &mut Slot<T>,
        query: impl FnOnce(&mut Session<'_, E>) -> Result<T>,
    ) -> Result<T> {
        let mut cache = self.cache.lock();
        let FaceCache { slots, stats } = &mut *cache;
        let slot = slot(slots);
        if let Some(value) = slot.get() {
            stats.hits += 1;
            return Ok(value);
        }
        stats.misses += 1;
        log::trace!("{symbol}: cache miss");
        slot.get_or_try_init(|| query(&mut self.session()?))
    }

    fn memoized<K: Eq + Hash, T: Clone>(
        &self,
        symbol: &'static str,
        memo: impl FnOnce(&mut Slots) -> &mut Memo<K, T>,
        key: K,
        query: impl FnOnce(&mut Session<'_, E>) -> Result<T>,
    ) -> Result<T> {
        let mut cache = self.cache.lock();
        let FaceCache { slots, stats } = &mut *cache;
        let memo = memo(slots);
        if let Some(value) = memo.get(&key) {
            stats.hits += 1;
            return Ok(value);
        }
        stats.misses += 1;
        log::trace!("{symbol}: cache miss");
        memo.get_or_try_init(key, || query(&mut self.session()?))
    }

    pub fn has_table(&self, table: TableName) -> Result<bool> {
        self.memoized(symbols::HAS_TABLE, |s| &mut s.has_table, table, |session| {
            let face = session.face();
            Ok(truthy(session.engine().has_table(face, table.code())?))
        })
    }

    /// Every `name` record the engine can read, in table order
    ///
    /// Records whose header or string cannot be read are left out.
    pub fn names(&self) -> Result<Vec<NameRecord>> {
        self.cached(symbols::NAME_RECORD, |s| &mut s.names, |session| {
            session.list(FaceQuery::NameRecordsCount, "name record", |session, index| {
                session.name_record(index)
            })
        })
    }

    fn flag(&self, query: FaceQuery) -> Result<bool> {
        self.memoized(query.symbol(), |s| &mut s.flags, query, |session| {
            session.value(query).map(truthy)
        })
    }

    fn count(&self, query: FaceQuery) -> Result<u16> {
        self.memoized(query.symbol(), |s| &mut s.counts, query, |session| {
            session.value(query).map(plain)
        })
    }

    fn metric(&self, query: FaceQuery) -> Result<i16> {
        self.memoized(query.symbol(), |s| &mut s.metrics, query, |session| {
            session.value(query).map(plain)
        })
    }

    fn optional_metric(&self, query: FaceQuery) -> Result<Option<i16>> {
        self.memoized(query.symbol(), |s| &mut s.optional_metrics, query, |session| {
            session.value(query).map(non_zero)
        })
    }

    pub fn is_regular(&self) -> Result<bool> {
        self.flag(FaceQuery::IsRegular)
    }

    pub fn is_italic(&self) -> Result<bool> {
        self.flag(FaceQuery::IsItalic)
    }

    pub fn is_bold(&self) -> Result<bool> {
        self.flag(FaceQuery::IsBold)
    }

    pub fn is_oblique(&self) -> Result<bool> {
        self.flag(FaceQuery::IsOblique)
    }

    pub fn is_monospaced(&self) -> Result<bool> {
        self.flag(FaceQuery::IsMonospaced)
    }

    pub fn is_variable(&self) -> Result<bool> {
        self.flag(FaceQuery::IsVariable)
    }

    /// `usWeightClass`
    pub fn weight(&self) -> Result<u16> {
        self.count(FaceQuery::Weight)
    }

    /// `usWidthClass`, 1 (ultra-condensed) to 9 (ultra-expanded)
    pub fn width(&self) -> Result<u16> {
        self.count(FaceQuery::Width)
    }

    /// Italic angle in degrees, counter-clockwise from vertical
    pub fn italic_angle(&self) -> Result<Option<f32>> {
        self.cached(symbols::ITALIC_ANGLE, |s| &mut s.italic_angle, |session| {
            let face = session.face();
            let angle = session.engine().italic_angle(face)?;
            Ok((angle != 0.0).then_some(angle))
        })
    }

    pub fn ascender(&self) -> Result<i16> {
        self.metric(FaceQuery::Ascender)
    }

    pub fn descender(&self) -> Result<i16> {
        self.metric(FaceQuery::Descender)
    }

    pub fn height(&self) -> Result<i16> {
        self.metric(FaceQuery::Height)
    }

    pub fn line_gap(&self) -> Result<i16> {
        self.metric(FaceQuery::LineGap)
    }

    pub fn typographic_ascender(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::TypographicAscender)
    }

    pub fn typographic_descender(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::TypographicDescender)
    }

    pub fn typographic_line_gap(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::TypographicLineGap)
    }

    pub fn vertical_ascender(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::VerticalAscender)
    }

    pub fn vertical_descender(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::VerticalDescender)
    }

    pub fn vertical_height(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::VerticalHeight)
    }

    pub fn vertical_line_gap(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::VerticalLineGap)
    }

    /// Design units per em; values a font cannot legally declare are absent
    pub fn units_per_em(&self) -> Result<Option<u16>> {
        let query = FaceQuery::UnitsPerEm;
        self.cached(query.symbol(), |s| &mut s.units_per_em, |session| {
            let raw = session.value(query)?;
            Ok(u16::try_from(raw)
                .ok()
                .filter(|upem| UNITS_PER_EM_RANGE.contains(upem)))
        })
    }

    pub fn x_height(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::XHeight)
    }

    pub fn capital_height(&self) -> Result<Option<i16>> {
        self.optional_metric(FaceQuery::CapitalHeight)
    }

    fn line_metrics(&self, query: RecordQuery) -> Result<Option<LineMetrics>> {
        self.memoized(query.symbol(), |s| &mut s.line_metrics, query, |session| {
            let raw = session
                .record::<RawLineMetrics>(|engine, face, out| engine.face_record(face, query, out))?;
            Ok(raw.map(LineMetrics::from))
        })
    }

    fn script_metrics(&self, query: RecordQuery) -> Result<Option<ScriptMetrics>> {
        self.memoized(query.symbol(), |s| &mut s.script_metrics, query, |session| {
            let raw = session.record::<RawScriptMetrics>(|engine, face, out| {
                engine.face_record(face, query, out)
            })?;
            Ok(raw.map(ScriptMetrics::from))
        })
    }

    pub fn underline_metrics(&self) -> Result<Option<LineMetrics>> {
        self.line_metrics(RecordQuery::UnderlineMetrics)
    }

    pub fn strikeout_metrics(&self) -> Result<Option<LineMetrics>> {
        self.line_metrics(RecordQuery::StrikeoutMetrics)
    }

    pub fn subscript_metrics(&self) -> Result<Option<ScriptMetrics>> {
        self.script_metrics(RecordQuery::SubscriptMetrics)
    }

    pub fn superscript_metrics(&self) -> Result<Option<ScriptMetrics>> {
        self.script_metrics(RecordQuery::SuperscriptMetrics)
    }

    /// The font-wide bounding box from `head`
    ///
    /// Fonts without one report an all-zero rectangle.
    pub fn global_bounding_box(&self) -> Result<Rect> {
        let query = RecordQuery::GlobalBoundingBox;
        self.cached(query.symbol(), |s| &mut s.global_bounding_box, |session| {
            let raw =
                session.record::<RawRect>(|engine, face, out| engine.face_record(face, query, out))?;
            Ok(raw.unwrap_or_default().into())
        })
    }

    pub fn number_of_glyphs(&self) -> Result<u16> {
        self.count(FaceQuery::NumberOfGlyphs)
    }

    /// Nominal glyph for `ch`; unmapped characters are `None`, never `.notdef`
    pub fn glyph_index(&self, ch: char) -> Result<Option<GlyphId>> {
        self.memoized(symbols::GLYPH_INDEX, |s| &mut s.glyph_index, ch, |session| {
            let face = session.face();
            session.engine().glyph_index(face, u32::from(ch)).map(non_zero)
        })
    }

    /// Glyph for `ch` followed by the variation selector `variation`
    pub fn glyph_variation_index(&self, ch: char, variation: char) -> Result<Option<GlyphId>> {
        self.memoized(
            symbols::GLYPH_VAR_INDEX,
            |s| &mut s.glyph_variation_index,
            (ch, variation),
            |session| {
                let face = session.face();
                session
                    .engine()
                    .glyph_variation_index(face, u32::from(ch), u32::from(variation))
                    .map(non_zero)
            },
        )
    }

    fn glyph_advance(&self, query: GlyphQuery, glyph: GlyphId) -> Result<Option<u16>> {
        self.memoized(query.symbol(), |s| &mut s.glyph_advances, (query, glyph), |session| {
            session.glyph_value(query, glyph).map(non_zero)
        })
    }

    fn glyph_offset(&self, query: GlyphQuery, glyph: GlyphId) -> Result<Option<i16>> {
        self.memoized(query.symbol(), |s| &mut s.glyph_offsets, (query, glyph), |session| {
            session.glyph_value(query, glyph).map(non_zero)
        })
    }

    pub fn glyph_hor_advance(&self, glyph: GlyphId) -> Result<Option<u16>> {
        self.glyph_advance(GlyphQuery::HorAdvance, glyph)
    }

    pub fn glyph_ver_advance(&self, glyph: GlyphId) -> Result<Option<u16>> {
        self.glyph_advance(GlyphQuery::VerAdvance, glyph)
    }

    pub fn glyph_hor_side_bearing(&self, glyph: GlyphId) -> Result<Option<i16>> {
        self.glyph_offset(GlyphQuery::HorSideBearing, glyph)
    }

    pub fn glyph_ver_side_bearing(&self, glyph: GlyphId) -> Result<Option<i16>> {
        self.glyph_offset(GlyphQuery::VerSideBearing, glyph)
    }

    pub fn glyph_y_origin(&self, glyph: GlyphId) -> Result<Option<i16>> {
        self.glyph_offset(GlyphQuery::YOrigin, glyph)
    }

    /// The glyph's PostScript name, without its terminating NUL
    pub fn glyph_name(&self, glyph: GlyphId) -> Result<Option<Vec<u8>>> {
        self.memoized(symbols::GLYPH_NAME, |s| &mut s.glyph_names, glyph, |session| {
            let out = session.layout.scratch(GLYPH_NAME_CAPACITY)?;
            let face = session.face();
            let engine = session.engine();
            if !truthy(engine.glyph_name(face, glyph, out)?) {
                return Ok(None);
            }
            let view = engine.memory().view(out, GLYPH_NAME_CAPACITY as usize)?;
            Ok(Some(view.until_nul().to_vec()))
        })
    }

    pub fn glyph_class(&self, glyph: GlyphId) -> Result<Option<GlyphClass>> {
        let query = GlyphQuery::Class;
        self.memoized(query.symbol(), |s| &mut s.glyph_classes, glyph, |session| {
            session
                .glyph_value(query, glyph)
                .map(GlyphClass::from_code)
        })
    }

    pub fn glyph_mark_attachment_class(&self, glyph: GlyphId) -> Result<u16> {
        let query = GlyphQuery::MarkAttachmentClass;
        self.memoized(query.symbol(), |s| &mut s.mark_attachment_classes, glyph, |session| {
            session.glyph_value(query, glyph).map(plain)
        })
    }

    pub fn is_mark_glyph(&self, glyph: GlyphId) -> Result<bool> {
        let query = GlyphQuery::IsMark;
        self.memoized(query.symbol(), |s| &mut s.mark_glyphs, glyph, |session| {
            session.glyph_value(query, glyph).map(truthy)
        })
    }

    /// Outline bounds; glyphs without an outline have none
    pub fn glyph_bounding_box(&self, glyph: GlyphId) -> Result<Option<Rect>> {
        self.memoized(symbols::GLYPH_BBOX, |s| &mut s.glyph_bounding_boxes, glyph, |session| {
            let raw =
                session.record::<RawRect>(|engine, face, out| engine.glyph_bbox(face, glyph, out))?;
            Ok(raw.map(Rect::from))
        })
    }

    /// The SVG document covering `glyph`, copied out of the font bytes
    pub fn glyph_svg_image(&self, glyph: GlyphId) -> Result<Option<Vec<u8>>> {
        self.memoized(symbols::GLYPH_SVG_IMAGE, |s| &mut s.svg_images, glyph, |session| {
            let svg_out = session.layout.scratch(8)?;
            let len_out = svg_out + 4;
            let face = session.face();
            let engine = session.engine();
            if !truthy(engine.glyph_svg_image(face, glyph, svg_out, len_out)?) {
                return Ok(None);
            }
            let memory = engine.memory();
            let address: u32 = memory.read(svg_out)?;
            let len: u32 = memory.read(len_out)?;
            Ok(Some(memory.bytes(address, len as usize)?.to_vec()))
        })
    }

    /// Every `fvar` axis the engine can read, in table order
    pub fn variation_axes(&self) -> Result<Vec<VariationAxis>> {
        self.cached(symbols::VARIATION_AXIS, |s| &mut s.variation_axes, |session| {
            session.list(FaceQuery::VariationAxesCount, "variation axis", |session, index| {
                let raw = session.record::<RawVariationAxis>(|engine, face, out| {
                    engine.variation_axis(face, index, out)
                })?;
                Ok(raw.map(VariationAxis::from))
            })
        })
    }

    pub fn variation_axis_by_tag(&self, tag: Tag) -> Result<Option<VariationAxis>> {
        self.memoized(symbols::VARIATION_AXIS_BY_TAG, |s| &mut s.axes_by_tag, tag, |session| {
            let raw = session.record::<RawVariationAxis>(|engine, face, out| {
                engine.variation_axis_by_tag(face, tag.to_u32(), out)
            })?;
            Ok(raw.map(VariationAxis::from))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_decodes_sentinel() {
        assert_eq!(non_zero::<i16>(0), None);
        assert_eq!(non_zero::<i16>(-220), Some(-220));
        assert_eq!(non_zero::<u16>(-1), None);
        assert_eq!(non_zero::<u16>(70_000), None);
    }

    #[test]
    fn test_plain_keeps_zero() {
        assert_eq!(plain::<u16>(0), 0);
        assert_eq!(plain::<i16>(-200), -200);
    }
}
