//! Command implementations

pub mod count;
pub mod dump;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ttface::{Module, ModuleConfig, SharedModule};
use ttface_core::PAGE_SIZE;
use ttface_engine::NativeEngine;

/// Room for scratch records behind the font bytes
const SCRATCH_HEADROOM: u64 = 1 << 20;

pub(crate) fn read_font(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read font file {}", path.display()))
}

/// A module large enough for `font_len` bytes of font
///
/// `TTFACE_MEMORY_PAGES` is honored, but never allowed to be too small for
/// the file at hand.
pub(crate) fn module_for(font_len: usize) -> Result<SharedModule<NativeEngine>> {
    let config = ModuleConfig::from_env()?;
    let needed = (font_len as u64 + SCRATCH_HEADROOM).div_ceil(u64::from(PAGE_SIZE));
    let pages = u32::try_from(needed)
        .ok()
        .filter(|pages| *pages > config.memory_pages)
        .map_or(Ok(config), ModuleConfig::new)?;
    if pages != config {
        log::debug!(
            "Growing memory to {} pages to fit {} font bytes",
            pages.memory_pages,
            font_len
        );
    }
    Ok(Module::with_config(NativeEngine::new(), pages)?.shared())
}
