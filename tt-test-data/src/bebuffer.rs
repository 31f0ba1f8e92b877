//! small utilities used in tests

use std::collections::HashMap;
use tt_types::Scalar;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
    tagged_locations: HashMap<String, usize>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer contains zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return a reference to the contents of the buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write a scalar and remember its position, so it can be patched later
    /// with [`BeBuffer::write_at`].
    pub fn push_with_tag(mut self, item: impl Scalar, tag: &str) -> Self {
        self.tagged_locations
            .insert(tag.to_string(), self.data.len());
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    /// Append raw bytes.
    pub fn extend_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn offset_for(&self, tag: &str) -> usize {
        // panic on unrecognized tags
        self.tagged_locations.get(tag).copied().unwrap()
    }

    /// Overwrite the scalar previously pushed with `tag`.
    pub fn write_at(&mut self, tag: &str, item: impl Scalar) {
        let offset = self.offset_for(tag);
        let raw = item.to_raw();
        let new_data: &[u8] = raw.as_ref();
        let data = &mut self.data[offset..];
        if data.len() < new_data.len() {
            panic!("not enough room left in buffer for the requested write.");
        }
        data[..new_data.len()].copy_from_slice(new_data);
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// Build a [`BeBuffer`] from a comma separated list of scalars.
///
/// Each item is a single token tree: a literal (`4u16`), a bracketed list of
/// scalars of the same type (`[1u16, 2, 3]`), or any other expression wrapped
/// in parentheses (`(Tag::new(b"cmap"))`, `(-2i16)`).
#[macro_export]
macro_rules! be_buffer {
    ( $( $item:tt ),* $(,)? ) => {{
        let builder = $crate::bebuffer::BeBuffer::new();
        $(
            let builder = $crate::be_buffer_add!(builder, $item);
        )*
        builder
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! be_buffer_add {
    ($builder:ident, [ $( $x:expr ),* $(,)? ]) => {
        $builder.extend([ $( $x ),* ])
    };
    ($builder:ident, $x:expr) => {
        $builder.push($x)
    };
}

#[cfg(test)]
mod tests {
    use tt_types::Tag;

    #[test]
    fn macro_layout() {
        let buf = be_buffer! {
            1u16,
            (Tag::new(b"head")),
            [3i16, (-4i16)],
            (-1i8)
        };
        assert_eq!(
            buf.as_slice(),
            &[0, 1, b'h', b'e', b'a', b'd', 0, 3, 0xFF, 0xFC, 0xFF]
        );
    }

    #[test]
    fn patch_tagged_location() {
        let mut buf = super::BeBuffer::new()
            .push(7u16)
            .push_with_tag(0u32, "len")
            .push(9u8);
        buf.write_at("len", 0xAABBCCDDu32);
        assert_eq!(buf.offset_for("len"), 2);
        assert_eq!(buf.as_slice(), &[0, 7, 0xAA, 0xBB, 0xCC, 0xDD, 9]);
    }
}
