//! raw font bytes

use std::ops::{Bound, Range, RangeBounds};

use bytemuck::AnyBitPattern;
use tt_types::{FixedSize, Scalar};

use crate::read::{FontReadWithArgs, ReadError};

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data. Every read is bounds checked; a
/// read past the end of the data is a [`ReadError::OutOfBounds`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    total_pos: u32,
    bytes: &'a [u8],
}

/// A cursor for validating bytes during parsing.
///
/// The position advances even when a read fails, so that a sequence of reads
/// can be checked with `?` at each step.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    ///
    /// You generally don't need to do this? It is handled for you when loading
    /// a [`FontRef`](crate::FontRef), but may be useful in tests.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData {
            total_pos: 0,
            bytes,
        }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The position of the start of this data in the font file it was
    /// sliced from.
    pub fn position(&self) -> u32 {
        self.total_pos
    }

    /// Returns self[pos..]
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData {
            bytes,
            total_pos: self.total_pos.saturating_add(pos as u32),
        })
    }

    /// Returns self[..pos], and updates self to = self[pos..];
    pub fn take_up_to(&mut self, pos: usize) -> Option<FontData<'a>> {
        if pos > self.len() {
            return None;
        }
        let (head, tail) = self.bytes.split_at(pos);
        let result = FontData {
            bytes: head,
            total_pos: self.total_pos,
        };
        self.total_pos = self.total_pos.saturating_add(pos as u32);
        self.bytes = tail;
        Some(result)
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(i) => *i,
            Bound::Excluded(i) => i.saturating_add(1),
        };

        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let total_pos = self.total_pos.saturating_add(start as u32);
        self.bytes
            .get(bounds)
            .map(|bytes| FontData { bytes, total_pos })
    }

    /// Read a scalar at the provided location in the data.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(|bytes| bytes.get(..T::RAW_BYTE_LEN))
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    pub fn read_with_args<T>(&self, range: Range<usize>, args: &T::Args) -> Result<T, ReadError>
    where
        T: FontReadWithArgs<'a>,
    {
        self.slice(range)
            .ok_or(ReadError::OutOfBounds)
            .and_then(|data| T::read_with_args(data, args))
    }

    /// Interpret the bytes at the provided offset as a reference to `T`.
    ///
    /// `T` is one of the `repr(packed)` record types in this crate, or a
    /// [`BigEndian`](tt_types::BigEndian) scalar.
    pub fn read_ref_at<T: AnyBitPattern + FixedSize>(
        &self,
        offset: usize,
    ) -> Result<&'a T, ReadError> {
        let bytes = self
            .bytes
            .get(offset..)
            .and_then(|bytes| bytes.get(..T::RAW_BYTE_LEN))
            .ok_or(ReadError::OutOfBounds)?;
        bytemuck::try_from_bytes(bytes).map_err(|_| ReadError::OutOfBounds)
    }

    /// Interpret the bytes in `range` as a slice of `T`.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self.bytes.get(range).ok_or(ReadError::OutOfBounds)?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::InvalidArrayLen)
    }

    pub(crate) fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    /// Return the data as a byte slice
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    pub(crate) fn advance<T: FixedSize>(&mut self) {
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
    }

    pub(crate) fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    pub(crate) fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.advance::<T>();
        temp
    }

    pub(crate) fn read_array<T: AnyBitPattern + FixedSize>(
        &mut self,
        len: usize,
    ) -> Result<&'a [T], ReadError> {
        let len = len
            .checked_mul(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        let end = self.pos.checked_add(len).ok_or(ReadError::OutOfBounds)?;
        let temp = self.data.read_array(self.pos..end);
        self.pos = end;
        temp
    }

    /// return the current position, or an error if we are out of bounds
    pub(crate) fn position(&self) -> Result<usize, ReadError> {
        self.data.check_in_bounds(self.pos).map(|_| self.pos)
    }

    // used when handling fields with an implicit length, which must be at the
    // end of a table.
    pub(crate) fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub(crate) fn remaining(self) -> Option<FontData<'a>> {
        self.data.split_off(self.pos)
    }
}

impl FontData<'_> {
    fn check_in_bounds(&self, offset: usize) -> Result<(), ReadError> {
        self.bytes
            .get(..offset)
            .ok_or(ReadError::OutOfBounds)
            .map(|_| ())
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_types::BigEndian;

    #[test]
    fn reads_are_bounds_checked() {
        let data = FontData::new(&[0, 1, 2, 3, 4]);
        assert_eq!(data.read_at::<u16>(0).unwrap(), 1);
        assert_eq!(data.read_at::<u32>(1).unwrap(), 0x01020304);
        assert!(matches!(data.read_at::<u32>(2), Err(ReadError::OutOfBounds)));
        assert!(matches!(
            data.read_at::<u16>(usize::MAX),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn slices_track_position() {
        let data = FontData::new(&[0; 32]);
        let sub = data.slice(4..12).unwrap();
        assert_eq!(sub.position(), 4);
        assert_eq!(sub.len(), 8);
        assert_eq!(sub.split_off(2).unwrap().position(), 6);
        assert!(data.slice(30..40).is_none());
    }

    #[test]
    fn take_up_to() {
        let mut data = FontData::new(&[1, 2, 3, 4]);
        let head = data.take_up_to(1).unwrap();
        assert_eq!(head.as_bytes(), &[1]);
        assert_eq!(data.as_bytes(), &[2, 3, 4]);
        assert_eq!(data.position(), 1);
        assert!(data.take_up_to(4).is_none());
    }

    #[test]
    fn arrays() {
        let data = FontData::new(&[0, 1, 0, 2, 0xFF]);
        let array: &[BigEndian<u16>] = data.read_array(0..4).unwrap();
        assert_eq!(array.iter().map(|x| x.get()).collect::<Vec<_>>(), [1, 2]);
        assert!(matches!(
            data.read_array::<BigEndian<u16>>(0..5),
            Err(ReadError::InvalidArrayLen)
        ));
        assert!(matches!(
            data.read_array::<BigEndian<u16>>(2..6),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn cursor_advances_past_failures() {
        let data = FontData::new(&[0, 7, 0]);
        let mut cursor = data.cursor();
        assert_eq!(cursor.read::<u16>().unwrap(), 7);
        assert!(cursor.read::<u16>().is_err());
        assert!(cursor.position().is_err());
    }
}
