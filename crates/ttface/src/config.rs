// this_file: crates/ttface/src/config.rs

//! Module configuration
//!
//! One knob matters before the first engine call: how many pages the linear
//! memory grows by when a [`Module`](crate::Module) starts. Every face's
//! font bytes and scratch records must fit inside that growth.
//!
//! # Environment Variable
//!
//! Set `TTFACE_MEMORY_PAGES` to override the default:
//!
//! ```bash
//! TTFACE_MEMORY_PAGES=64 ./my_app
//! ```

use ttface_core::{Result, TtfaceError, MAX_PAGES, PAGE_SIZE};

/// Environment variable read by [`ModuleConfig::from_env`]
pub const MEMORY_PAGES_ENV: &str = "TTFACE_MEMORY_PAGES";

/// Pages grown at start-up when nothing else is configured (32 000 KiB)
pub const DEFAULT_MEMORY_PAGES: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleConfig {
    /// Pages of 64 KiB added to the engine's memory at start-up
    pub memory_pages: u32,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            memory_pages: DEFAULT_MEMORY_PAGES,
        }
    }
}

impl ModuleConfig {
    pub fn new(memory_pages: u32) -> Result<Self> {
        if memory_pages > MAX_PAGES {
            return Err(TtfaceError::Config(format!(
                "memory_pages must be at most {MAX_PAGES}, got {memory_pages}"
            )));
        }
        Ok(Self { memory_pages })
    }

    /// Reads [`MEMORY_PAGES_ENV`], falling back to the default when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var(MEMORY_PAGES_ENV) {
            Ok(value) => {
                let config = Self::parse(&value).map_err(|err| {
                    log::warn!("Rejecting {MEMORY_PAGES_ENV}={value:?}: {err}");
                    err
                })?;
                log::info!(
                    "ttface memory set to {} pages via {MEMORY_PAGES_ENV}",
                    config.memory_pages
                );
                Ok(config)
            }
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(err) => Err(TtfaceError::Config(format!("{MEMORY_PAGES_ENV}: {err}"))),
        }
    }

    /// Parses a page count as written in the environment
    pub fn parse(value: &str) -> Result<Self> {
        let pages = value.trim().parse::<u32>().map_err(|err| {
            TtfaceError::Config(format!("{MEMORY_PAGES_ENV} is not a page count: {err}"))
        })?;
        Self::new(pages)
    }

    /// Bytes added by the start-up growth
    pub fn memory_bytes(&self) -> u64 {
        u64::from(self.memory_pages) * u64::from(PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_hundred_pages() {
        let config = ModuleConfig::default();
        assert_eq!(config.memory_pages, 500);
        assert_eq!(config.memory_bytes(), 32_768_000);
    }

    #[test]
    fn test_parse_accepts_whitespace() {
        assert_eq!(ModuleConfig::parse(" 64\n").unwrap().memory_pages, 64);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ModuleConfig::parse("lots"),
            Err(TtfaceError::Config(_))
        ));
        assert!(matches!(
            ModuleConfig::parse("-1"),
            Err(TtfaceError::Config(_))
        ));
    }

    #[test]
    fn test_new_rejects_more_than_the_address_space() {
        assert!(ModuleConfig::new(MAX_PAGES).is_ok());
        assert!(matches!(
            ModuleConfig::new(MAX_PAGES + 1),
            Err(TtfaceError::Config(_))
        ));
    }
}
