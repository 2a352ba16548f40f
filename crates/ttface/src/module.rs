// this_file: crates/ttface/src/module.rs

//! One engine instance and the memory it shares
//!
//! A [`Module`] is created once per engine, grows the memory up front and
//! remembers how wide the engine's face state is. Faces share it through
//! a [`SharedModule`]; every engine call happens under its lock.

use std::sync::Arc;

use parking_lot::Mutex;
use ttface_core::{Engine, Ptr, Result};

use crate::config::ModuleConfig;

/// A module shared by any number of faces
pub type SharedModule<E> = Arc<Mutex<Module<E>>>;

#[derive(Debug)]
pub struct Module<E: Engine> {
    engine: E,
    face_size: u32,
}

impl<E: Engine> Module<E> {
    /// Starts `engine` with the default configuration
    pub fn new(engine: E) -> Result<Self> {
        Self::with_config(engine, ModuleConfig::default())
    }

    /// Starts `engine`, growing its memory by `config.memory_pages`
    pub fn with_config(mut engine: E, config: ModuleConfig) -> Result<Self> {
        engine.memory_mut().grow(config.memory_pages)?;
        let face_size = engine.face_size_of()?;
        log::debug!(
            "Module ready: {} pages, heap base {}, face state {} bytes",
            engine.memory().pages(),
            engine.heap_base(),
            face_size
        );
        Ok(Self { engine, face_size })
    }

    /// Wraps the module for sharing between faces
    pub fn shared(self) -> SharedModule<E> {
        Arc::new(Mutex::new(self))
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Width of the engine's face state block, queried once at start-up
    pub fn face_size(&self) -> u32 {
        self.face_size
    }

    pub fn heap_base(&self) -> Ptr {
        self.engine.heap_base()
    }

    pub fn memory_size(&self) -> u64 {
        self.engine.memory().size()
    }
}
