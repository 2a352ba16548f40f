// this_file: crates/ttface-core/src/memory.rs

//! The one buffer both sides share
//!
//! The engine only understands absolute 32-bit addresses into a single
//! growable byte buffer. [`LinearMemory`] is that buffer; [`View`] is a
//! bounds-checked window into it that decodes little-endian scalars and
//! fixed-layout records.
//!
//! A view borrows the memory, so it has to be consumed (copied into an
//! owned value) before the next engine call can take `&mut` access again.

use std::ops::Range;

use bytemuck::{AnyBitPattern, NoUninit, Pod};

use crate::error::{Result, TtfaceError};

/// Size of one memory page in bytes
pub const PAGE_SIZE: u32 = 64 * 1024;

/// Page limit of a 32-bit linear memory (4 GiB)
pub const MAX_PAGES: u32 = 65_536;

/// A scalar stored little-endian in linear memory
pub trait Scalar: AnyBitPattern + NoUninit {
    /// Converts between little-endian storage and native order.
    ///
    /// The conversion is its own inverse, so it serves both directions.
    fn swap_le(self) -> Self;
}

macro_rules! int_scalar {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                #[inline]
                fn swap_le(self) -> Self {
                    <$ty>::from_le(self)
                }
            }
        )*
    };
}

int_scalar!(u8, i8, u16, i16, u32, i32);

impl Scalar for f32 {
    #[inline]
    fn swap_le(self) -> Self {
        f32::from_bits(u32::from_le(self.to_bits()))
    }
}

/// A fixed-layout struct the engine reads or writes in one piece
///
/// Field order and widths are part of the engine contract. Implementors are
/// `#[repr(C)]` without implicit padding.
pub trait Record: Pod {
    /// Byte width of the record in linear memory
    const SIZE: u32 = std::mem::size_of::<Self>() as u32;

    /// Swaps every field between little-endian storage and native order
    fn swap_le(self) -> Self;
}

/// Growable, page-granular byte buffer shared with the engine
#[derive(Debug, Clone, Default)]
pub struct LinearMemory {
    bytes: Vec<u8>,
}

impl LinearMemory {
    /// Creates a memory of `pages` zeroed pages
    pub fn new(pages: u32) -> Result<Self> {
        let mut memory = Self::default();
        memory.grow(pages)?;
        Ok(memory)
    }

    /// Current size in pages
    pub fn pages(&self) -> u32 {
        (self.bytes.len() / PAGE_SIZE as usize) as u32
    }

    /// Current size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Adds `delta` pages and returns the previous page count
    ///
    /// Growing may move the buffer, which is why nothing outside this type
    /// ever holds a raw pointer into it.
    pub fn grow(&mut self, delta: u32) -> Result<u32> {
        let previous = self.pages();
        let requested = u64::from(previous) + u64::from(delta);
        if requested > u64::from(MAX_PAGES) {
            return Err(TtfaceError::GrowFailed {
                requested,
                limit: MAX_PAGES,
            });
        }
        self.bytes.resize(requested as usize * PAGE_SIZE as usize, 0);
        log::trace!("linear memory grown from {} to {} pages", previous, requested);
        Ok(previous)
    }

    fn span(&self, offset: u32, len: usize) -> Result<Range<usize>> {
        let start = offset as usize;
        start
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .map(|end| start..end)
            .ok_or_else(|| TtfaceError::out_of_bounds(offset, len as u64, self.size()))
    }

    /// Borrows `len` bytes at `offset`
    pub fn bytes(&self, offset: u32, len: usize) -> Result<&[u8]> {
        let span = self.span(offset, len)?;
        Ok(&self.bytes[span])
    }

    /// Mutably borrows `len` bytes at `offset`
    pub fn bytes_mut(&mut self, offset: u32, len: usize) -> Result<&mut [u8]> {
        let span = self.span(offset, len)?;
        Ok(&mut self.bytes[span])
    }

    /// Copies `data` into memory at `offset`
    pub fn write(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        self.bytes_mut(offset, data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// Opens a typed view over `len` bytes at `offset`
    pub fn view(&self, offset: u32, len: usize) -> Result<View<'_>> {
        Ok(View {
            offset,
            bytes: self.bytes(offset, len)?,
        })
    }

    /// Reads one little-endian scalar
    pub fn read<T: Scalar>(&self, offset: u32) -> Result<T> {
        self.view(offset, std::mem::size_of::<T>())?.scalar(0)
    }

    /// Writes one scalar in little-endian order
    pub fn write_scalar<T: Scalar>(&mut self, offset: u32, value: T) -> Result<()> {
        self.write(offset, bytemuck::bytes_of(&value.swap_le()))
    }

    /// Reads a fixed-layout record
    pub fn read_record<R: Record>(&self, offset: u32) -> Result<R> {
        self.view(offset, R::SIZE as usize)?.record(0)
    }

    /// Writes a fixed-layout record in little-endian order
    pub fn write_record<R: Record>(&mut self, offset: u32, record: R) -> Result<()> {
        self.write(offset, bytemuck::bytes_of(&record.swap_le()))
    }
}

/// A bounds-checked window into [`LinearMemory`]
///
/// All offsets taken by the accessors are relative to the start of the view.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    offset: u32,
    bytes: &'a [u8],
}

impl<'a> View<'a> {
    /// Absolute address of the first byte
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw bytes of the view
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Bytes up to (not including) the first NUL, or all of them
    pub fn until_nul(&self) -> &'a [u8] {
        let end = self
            .bytes
            .iter()
            .position(|byte| *byte == 0)
            .unwrap_or(self.bytes.len());
        &self.bytes[..end]
    }

    fn slice(&self, at: usize, len: usize) -> Result<&'a [u8]> {
        at.checked_add(len)
            .and_then(|end| self.bytes.get(at..end))
            .ok_or_else(|| {
                TtfaceError::out_of_bounds(
                    u64::from(self.offset) + at as u64,
                    len as u64,
                    u64::from(self.offset) + self.bytes.len() as u64,
                )
            })
    }

    /// Decodes the scalar starting `at` bytes into the view
    pub fn scalar<T: Scalar>(&self, at: usize) -> Result<T> {
        let raw: T = bytemuck::pod_read_unaligned(self.slice(at, std::mem::size_of::<T>())?);
        Ok(raw.swap_le())
    }

    /// Decodes `N` consecutive scalars starting `at` bytes into the view
    pub fn array<T: Scalar, const N: usize>(&self, at: usize) -> Result<[T; N]> {
        let mut out = [T::zeroed(); N];
        for (index, slot) in out.iter_mut().enumerate() {
            *slot = self.scalar(at + index * std::mem::size_of::<T>())?;
        }
        Ok(out)
    }

    /// Decodes a fixed-layout record starting `at` bytes into the view
    pub fn record<R: Record>(&self, at: usize) -> Result<R> {
        let raw: R = bytemuck::pod_read_unaligned(self.slice(at, R::SIZE as usize)?);
        Ok(raw.swap_le())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_returns_previous_pages() {
        let mut memory = LinearMemory::new(1).unwrap();
        assert_eq!(memory.grow(2).unwrap(), 1);
        assert_eq!(memory.pages(), 3);
        assert_eq!(memory.size(), 3 * u64::from(PAGE_SIZE));
    }

    #[test]
    fn test_grow_past_limit_fails() {
        let mut memory = LinearMemory::default();
        let err = memory.grow(MAX_PAGES + 1).unwrap_err();
        assert!(matches!(err, TtfaceError::GrowFailed { .. }));
        assert_eq!(memory.pages(), 0);
    }

    #[test]
    fn test_write_outside_extent_is_rejected() {
        let mut memory = LinearMemory::new(1).unwrap();
        let last = PAGE_SIZE - 2;
        assert!(memory.write(last, &[1, 2]).is_ok());
        assert!(matches!(
            memory.write(last, &[1, 2, 3]),
            Err(TtfaceError::OutOfBounds { .. })
        ));
        assert!(memory.bytes(u32::MAX, 2).is_err());
    }

    #[test]
    fn test_scalars_are_little_endian_and_unaligned() {
        let mut memory = LinearMemory::new(1).unwrap();
        memory.write(101, &[0x34, 0x12, 0xfe, 0xff]).unwrap();
        assert_eq!(memory.read::<u16>(101).unwrap(), 0x1234);
        assert_eq!(memory.read::<i16>(103).unwrap(), -2);

        memory.write_scalar(7, 1.5f32).unwrap();
        assert_eq!(memory.bytes(7, 4).unwrap(), &1.5f32.to_le_bytes());
        assert_eq!(memory.read::<f32>(7).unwrap(), 1.5);
    }

    #[test]
    fn test_view_arrays_and_nul_termination() {
        let mut memory = LinearMemory::new(1).unwrap();
        memory.write(10, &[1, 0, 2, 0, 3, 0, b'a', b'b', 0, b'z']).unwrap();
        let view = memory.view(10, 10).unwrap();
        assert_eq!(view.offset(), 10);
        assert_eq!(view.array::<u16, 3>(0).unwrap(), [1, 2, 3]);
        assert!(view.array::<u16, 6>(0).is_err());

        let name = memory.view(16, 4).unwrap();
        assert_eq!(name.until_nul(), b"ab");
        let unterminated = memory.view(16, 2).unwrap();
        assert_eq!(unterminated.until_nul(), b"ab");
    }
}
