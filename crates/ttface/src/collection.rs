// this_file: crates/ttface/src/collection.rs

use ttface_core::{Engine, Result, TtfaceError};

use crate::module::SharedModule;

/// Number of faces in a font collection
///
/// Returns `None` when `data` is not a collection, including when it is a
/// perfectly good single font. Nothing is cached; the bytes are copied to
/// the start of the heap and forgotten after the call.
pub fn fonts_in_collection<E: Engine>(module: &SharedModule<E>, data: &[u8]) -> Result<Option<u32>> {
    let len = u32::try_from(data.len()).map_err(|_| TtfaceError::SourceTooLarge(data.len()))?;
    let mut module = module.lock();
    let at = module.heap_base();
    let engine = module.engine_mut();
    engine.memory_mut().write(at, data)?;
    let count = engine.fonts_in_collection(at, len)?;
    log::trace!("{} bytes hold {} faces", len, count);
    Ok(u32::try_from(count).ok())
}
