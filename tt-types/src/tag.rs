use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// A 4-byte table tag, such as `cmap` or `glyf`.
///
/// Tags in a font's table directory are supposed to contain only printable
/// ascii (`0x20..=0x7E`), padded on the right with spaces. Tags read from a
/// font are never validated, since a directory may legitimately carry
/// entries we don't understand; tags constructed from user input should go
/// through [`Tag::new_checked`] (or [`FromStr`]).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::AnyBitPattern))]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a `Tag` from raw bytes, without validation.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Attempt to create a `Tag` from 1 to 4 printable ascii bytes.
    ///
    /// Shorter input is padded with spaces. A space may not be the first
    /// byte, and may only be followed by further spaces.
    pub const fn new_checked(src: &[u8]) -> Result<Self, InvalidTag> {
        if src.is_empty() || src.len() > 4 {
            return Err(InvalidTag::InvalidLength(src.len()));
        }
        let mut raw = [b' '; 4];
        let mut seen_space = false;
        let mut i = 0;
        while i < src.len() {
            let byte = src[i];
            match byte {
                b' ' if i == 0 => return Err(InvalidTag::InvalidByte { pos: i, byte }),
                b' ' => seen_space = true,
                0..=0x1F | 0x7F.. => return Err(InvalidTag::InvalidByte { pos: i, byte }),
                _ if seen_space => return Err(InvalidTag::ByteAfterSpace { pos: i }),
                _ => (),
            }
            raw[i] = byte;
            i += 1;
        }
        Ok(Tag(raw))
    }

    /// Construct a tag from a big-endian `u32`, as tags are often written
    /// in C code.
    pub const fn from_u32(src: u32) -> Self {
        Self::from_be_bytes(src.to_be_bytes())
    }

    /// Create a tag from raw big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Return the memory representation of this tag.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }

    /// The tag as a big-endian `u32`.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

/// An error representing an invalid tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTag {
    /// The tag was not between 1 and 4 bytes in length.
    InvalidLength(usize),
    /// The tag contained a byte outside of the printable ascii range, or
    /// started with a space.
    InvalidByte { pos: usize, byte: u8 },
    /// The tag contained one or more non-space characters after a space.
    ByteAfterSpace { pos: usize },
}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Tag::new_checked(src.as_bytes())
    }
}

impl crate::raw::Scalar for Tag {
    type Raw = [u8; 4];

    fn to_raw(self) -> Self::Raw {
        self.to_be_bytes()
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self::from_be_bytes(raw)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidTag {}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{byte:02X}}}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl Display for InvalidTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTag::InvalidLength(len) => write!(f, "Invalid length ({len})"),
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "Invalid byte 0x{byte:X} at index {pos}")
            }
            InvalidTag::ByteAfterSpace { .. } => write!(f, "Non-space character after first space"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            let s = std::str::from_utf8(&self.0).map_err(serde::ser::Error::custom)?;
            serializer.serialize_str(s)
        } else {
            self.0.serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; 4]>::deserialize(deserializer).map(|raw| Tag::new(&raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_construction() {
        assert!(Tag::new_checked(b"").is_err());
        assert!(Tag::new_checked(b" ").is_err());
        assert!(Tag::new_checked(b"abcde").is_err());
        assert!(Tag::new_checked(b"b c").is_err());
        assert!(Tag::new_checked(&[0x7F]).is_err());
        assert_eq!(Tag::new_checked(b"cvt"), Ok(Tag::new(b"cvt ")));
        assert_eq!("glyf".parse::<Tag>(), Ok(Tag::new(b"glyf")));
    }

    #[test]
    fn u32_round_trip() {
        // how the tag is spelled as a C macro: TAG('c', 'm', 'a', 'p')
        let raw = (b'c' as u32) << 24 | (b'm' as u32) << 16 | (b'a' as u32) << 8 | b'p' as u32;
        let tag = Tag::from_u32(raw);
        assert_eq!(tag, Tag::new(b"cmap"));
        assert_eq!(tag.to_u32(), raw);
    }

    #[test]
    #[cfg(feature = "std")]
    fn display_escapes_unprintable() {
        let bad_tag = Tag::new(&[0x19, b'z', b'@', 0x7F]);
        assert_eq!(bad_tag.to_string(), "{0x19}z@{0x7F}");
        assert_eq!(format!("{:?}", Tag::new(b"loca")), "Tag(loca)");
    }
}
