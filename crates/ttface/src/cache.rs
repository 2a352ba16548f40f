// this_file: crates/ttface/src/cache.rs

//! Per-face memoization
//!
//! Every query kind gets its own typed slot. A [`Slot`] holds the result of
//! an argument-less query, a [`Memo`] holds results per key (a glyph id, a
//! character, a table). A stored `None` means "asked, and the font has no
//! value", which is different from an empty slot. Nothing ever expires: a
//! face's bytes never change, so neither do its answers.

use std::collections::HashMap;
use std::hash::Hash;

use ttface_core::{
    FaceQuery, GlyphClass, GlyphId, GlyphQuery, LineMetrics, NameRecord, Rect, RecordQuery,
    Result, ScriptMetrics, TableName, Tag, VariationAxis,
};

/// The cached result of an argument-less query
#[derive(Debug, Clone)]
pub struct Slot<T>(Option<T>);

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot(None)
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> Option<T> {
        self.0.clone()
    }

    #[cfg(test)]
    fn is_filled(&self) -> bool {
        self.0.is_some()
    }

    /// Returns the stored value, computing it with `init` on first use
    ///
    /// A failing `init` leaves the slot empty.
    pub fn get_or_try_init(&mut self, init: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(value) = &self.0 {
            return Ok(value.clone());
        }
        let value = init()?;
        self.0 = Some(value.clone());
        Ok(value)
    }
}

/// Cached results of a keyed query
#[derive(Debug, Clone)]
pub struct Memo<K, T>(HashMap<K, T>);

impl<K, T> Default for Memo<K, T> {
    fn default() -> Self {
        Memo(HashMap::new())
    }
}

impl<K: Eq + Hash, T: Clone> Memo<K, T> {
    pub fn get(&self, key: &K) -> Option<T> {
        self.0.get(key).cloned()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the value stored under `key`, computing it on first use
    pub fn get_or_try_init(&mut self, key: K, init: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(value) = self.0.get(&key) {
            return Ok(value.clone());
        }
        let value = init()?;
        self.0.insert(key, value.clone());
        Ok(value)
    }
}

/// Hit and miss counts of one face's cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered without the engine (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// One slot per query kind
///
/// Face getters that share a decoded type share a [`Memo`] keyed by the
/// query, so a flag never lands in a metric's slot.
#[derive(Debug, Default)]
pub(crate) struct Slots {
    pub has_table: Memo<TableName, bool>,
    pub names: Slot<Vec<NameRecord>>,
    pub flags: Memo<FaceQuery, bool>,
    pub counts: Memo<FaceQuery, u16>,
    pub metrics: Memo<FaceQuery, i16>,
    pub optional_metrics: Memo<FaceQuery, Option<i16>>,
    pub units_per_em: Slot<Option<u16>>,
    pub italic_angle: Slot<Option<f32>>,
    pub line_metrics: Memo<RecordQuery, Option<LineMetrics>>,
    pub script_metrics: Memo<RecordQuery, Option<ScriptMetrics>>,
    pub global_bounding_box: Slot<Rect>,
    pub glyph_index: Memo<char, Option<GlyphId>>,
    pub glyph_variation_index: Memo<(char, char), Option<GlyphId>>,
    pub glyph_advances: Memo<(GlyphQuery, GlyphId), Option<u16>>,
    pub glyph_offsets: Memo<(GlyphQuery, GlyphId), Option<i16>>,
    pub glyph_names: Memo<GlyphId, Option<Vec<u8>>>,
    pub glyph_classes: Memo<GlyphId, Option<GlyphClass>>,
    pub mark_attachment_classes: Memo<GlyphId, u16>,
    pub mark_glyphs: Memo<GlyphId, bool>,
    pub glyph_bounding_boxes: Memo<GlyphId, Option<Rect>>,
    pub svg_images: Memo<GlyphId, Option<Vec<u8>>>,
    pub variation_axes: Slot<Vec<VariationAxis>>,
    pub axes_by_tag: Memo<Tag, Option<VariationAxis>>,
}

#[derive(Debug, Default)]
pub(crate) struct FaceCache {
    pub slots: Slots,
    pub stats: CacheStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttface_core::TtfaceError;

    #[test]
    fn test_slot_computes_once() {
        let mut slot = Slot::default();
        let mut calls = 0;
        for _ in 0..3 {
            let value = slot
                .get_or_try_init(|| {
                    calls += 1;
                    Ok(7)
                })
                .unwrap();
            assert_eq!(value, 7);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_cached_none_is_not_an_empty_slot() {
        let mut slot: Slot<Option<i16>> = Slot::default();
        assert!(!slot.is_filled());
        slot.get_or_try_init(|| Ok(None)).unwrap();
        assert!(slot.is_filled());
        assert_eq!(slot.get(), Some(None));
    }

    #[test]
    fn test_failed_init_leaves_slot_empty() {
        let mut slot: Slot<u16> = Slot::default();
        let err = slot.get_or_try_init(|| Err(TtfaceError::Config("boom".into())));
        assert!(err.is_err());
        assert!(!slot.is_filled());
        assert_eq!(slot.get_or_try_init(|| Ok(3)).unwrap(), 3);
    }

    #[test]
    fn test_memo_keys_are_independent() {
        let mut memo: Memo<char, Option<GlyphId>> = Memo::default();
        memo.get_or_try_init('A', || Ok(Some(1))).unwrap();
        memo.get_or_try_init('B', || Ok(None)).unwrap();

        assert_eq!(memo.len(), 2);
        assert_eq!(memo.get(&'A'), Some(Some(1)));
        assert_eq!(memo.get(&'B'), Some(None));
        assert_eq!(memo.get(&'C'), None);
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
        let stats = CacheStats { hits: 3, misses: 1 };
        assert_eq!(stats.hit_rate(), 0.75);
    }
}
