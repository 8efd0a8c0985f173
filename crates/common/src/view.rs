//! # ByteView: Bounds-Checked Read-Only Window
//!
//! Every structured read of an IFC buffer goes through [`ByteView`]. Records
//! are decoded field by field from a little-endian [`Cursor`] over a slice of
//! exactly the record's size, so no language-level struct layout is ever
//! overlaid on file bytes.
//!
//! Offsets and lengths are `u64` so span arithmetic can be checked without
//! truncation; a span is only converted to `usize` after it has been proven
//! to lie inside the buffer.

use crate::IfcError;
use std::fmt;
use std::marker::PhantomData;

/// A fixed-size record that can be decoded from its literal byte layout.
pub trait Decode: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Decodes one record. The cursor holds exactly [`Decode::SIZE`] bytes.
    fn decode(cursor: &mut Cursor<'_>) -> Self;
}

/// Little-endian reader over an exactly-sized record slice.
///
/// # Panics
/// Reading past the end of the slice panics; this only happens when a
/// [`Decode`] impl reads more than its declared `SIZE`.
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current position relative to the start of the record.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    pub fn u8(&mut self) -> u8 {
        let [b] = self.array::<1>();
        b
    }

    pub fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.array())
    }

    pub fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.array())
    }

    pub fn skip(&mut self, n: usize) {
        self.pos += n;
    }
}

/// Read-only view over a borrowed byte buffer.
#[derive(Clone, Copy)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns `[offset, offset + len)` if the span lies entirely inside the buffer.
    ///
    /// # Examples
    /// ```
    /// # use common::ByteView;
    /// let view = ByteView::new(b"abcdef");
    /// assert_eq!(view.subslice(2, 3).unwrap(), b"cde");
    /// assert!(view.subslice(4, 3).is_err());
    /// ```
    pub fn subslice(&self, offset: u64, len: u64) -> Result<&'a [u8], IfcError> {
        let limit = self.bytes.len() as u64;
        match offset.checked_add(len) {
            Some(end) if end <= limit => Ok(&self.bytes[offset as usize..end as usize]),
            _ => Err(IfcError::out_of_bounds(offset, len, limit)),
        }
    }

    /// Decodes one `T` starting at `offset`.
    pub fn read_fixed<T: Decode>(&self, offset: u64) -> Result<T, IfcError> {
        let bytes = self.subslice(offset, T::SIZE as u64)?;
        Ok(T::decode(&mut Cursor::new(bytes)))
    }

    /// Returns a lazy view of `count` consecutive `T` records at `offset`.
    ///
    /// The whole span is bounds-checked up front, so the result is never
    /// shorter than `count`.
    pub fn read_slice<T: Decode>(&self, offset: u64, count: u64) -> Result<Records<'a, T>, IfcError> {
        let limit = self.bytes.len() as u64;
        let len = count
            .checked_mul(T::SIZE as u64)
            .ok_or_else(|| IfcError::out_of_bounds(offset, u64::MAX, limit))?;
        let bytes = self.subslice(offset, len)?;
        Ok(Records {
            bytes,
            count: count as usize,
            _record: PhantomData,
        })
    }

    /// Returns the bytes from `offset` up to (not including) the first NUL
    /// before `limit`.
    ///
    /// Fails with `OutOfBounds` when `limit` exceeds the buffer, when
    /// `offset` is not below `limit`, or when no terminator occurs in the
    /// window.
    pub fn read_cstr(&self, offset: u64, limit: u64) -> Result<&'a [u8], IfcError> {
        let size = self.bytes.len() as u64;
        if limit > size {
            return Err(IfcError::out_of_bounds(
                offset,
                limit.saturating_sub(offset),
                size,
            ));
        }
        if offset >= limit {
            return Err(IfcError::out_of_bounds(offset, 1, limit));
        }
        let window = &self.bytes[offset as usize..limit as usize];
        match window.iter().position(|&b| b == 0) {
            Some(end) => Ok(&window[..end]),
            None => Err(IfcError::out_of_bounds(
                offset,
                window.len() as u64 + 1,
                limit,
            )),
        }
    }
}

impl fmt::Debug for ByteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView").field("len", &self.len()).finish()
    }
}

/// Lazily decoded, restartable sequence of fixed-size records.
///
/// Holds only the borrowed span; each access decodes from the buffer.
pub struct Records<'a, T> {
    bytes: &'a [u8],
    count: usize,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: Decode> Records<'a, T> {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Raw bytes spanned by all records.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.count {
            return None;
        }
        let start = index * T::SIZE;
        let record = &self.bytes[start..start + T::SIZE];
        Some(T::decode(&mut Cursor::new(record)))
    }

    pub fn iter(&self) -> RecordIter<'a, T> {
        RecordIter {
            records: *self,
            index: 0,
        }
    }
}

impl<T> Clone for Records<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Records<'_, T> {}

impl<T> fmt::Debug for Records<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Records").field("count", &self.count).finish()
    }
}

impl<'a, T: Decode> IntoIterator for Records<'a, T> {
    type Item = T;
    type IntoIter = RecordIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Decode> IntoIterator for &Records<'a, T> {
    type Item = T;
    type IntoIter = RecordIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`Records`].
pub struct RecordIter<'a, T> {
    records: Records<'a, T>,
    index: usize,
}

impl<T: Decode> Iterator for RecordIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.records.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: Decode> ExactSizeIterator for RecordIter<'_, T> {}
