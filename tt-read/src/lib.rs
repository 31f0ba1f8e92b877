//! Reading TrueType tables
//!
//! This crate provides memory safe, bounds checked parsing of the parts of a
//! TrueType font file needed to outline a glyph: the table directory and the
//! `head`, `hhea`, `hmtx`, `cmap`, `loca` and `glyf` tables.
//!
//! Tables are views that borrow the font bytes; nothing is copied until a
//! glyph's points are decoded. Every read is checked, and malformed or
//! truncated data produces a [`ReadError`] rather than a panic.
//!
//! For turning glyphs into renderable point sequences, see the `tt-outline`
//! crate.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use tt_read::{FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let head = font.head().expect("missing 'head' table");
//! let hhea = font.hhea().expect("missing 'hhea' table");
//!
//! println!("{} units per em, ascender {}", head.units_per_em(), hhea.ascender());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

#[cfg(not(feature = "std"))]
extern crate alloc;

mod font_data;
mod read;
mod table_directory;
mod table_provider;
pub mod tables;

pub use font_data::FontData;
pub use read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use table_directory::{TableDirectory, TableRecord};
pub use table_provider::{TableProvider, TopLevelTable};

/// Public re-export of the tt-types crate.
pub extern crate tt_types as types;

use core::ops::Range;

use types::{Tag, TRUE_SFNT_VERSION, TT_SFNT_VERSION};

/// Reference to an in-memory font.
///
/// This is a simple implementation of the [`TableProvider`] trait backed
/// by a borrowed slice containing font data.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    table_directory: TableDirectory<'a>,
    table_directory_sorted: bool,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must begin with a [table directory] whose version identifies
    /// TrueType outlines (`0x00010000` or `'true'`).
    ///
    /// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let table_directory = TableDirectory::read(data)?;
        let version = table_directory.sfnt_version();
        if ![TT_SFNT_VERSION, TRUE_SFNT_VERSION].contains(&version) {
            return Err(ReadError::InvalidSfnt(version));
        }
        let table_directory_sorted = table_directory.is_sorted();
        if !table_directory_sorted {
            log::warn!("table directory is not sorted by tag, falling back to linear lookup");
        }
        log::debug!(
            "loaded font with {} tables",
            table_directory.table_records().len()
        );
        Ok(FontRef {
            data,
            table_directory,
            table_directory_sorted,
        })
    }

    /// Returns the underlying font data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// Returns the associated table directory.
    pub fn table_directory(&self) -> &TableDirectory<'a> {
        &self.table_directory
    }

    /// Returns the directory record for the table with the specified tag.
    pub fn table_record(&self, tag: Tag) -> Option<&'a TableRecord> {
        let records = self.table_directory.table_records();
        let idx = if self.table_directory_sorted {
            records.binary_search_by(|rec| rec.tag().cmp(&tag)).ok()
        } else {
            records.iter().position(|rec| rec.tag() == tag)
        };
        idx.and_then(|idx| records.get(idx))
    }

    /// The byte range of the table with the specified tag.
    ///
    /// The range is not checked against the length of the font data.
    pub fn table_range(&self, tag: Tag) -> Option<Range<usize>> {
        self.table_record(tag)?.data_range()
    }

    /// Returns the data for the table with the specified tag, if present.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        self.checked_table_data(tag).ok()
    }

    /// Returns the data for the table with the specified tag.
    ///
    /// This distinguishes a table that is absent from the directory
    /// ([`ReadError::TableIsMissing`]) from one whose record points outside
    /// the font data ([`ReadError::OutOfBounds`]).
    pub fn checked_table_data(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        let record = self
            .table_record(tag)
            .ok_or(ReadError::TableIsMissing(tag))?;
        record
            .data_range()
            .and_then(|range| self.data.slice(range))
            .ok_or(ReadError::OutOfBounds)
    }

    /// Computes the checksum of the table with the given tag.
    ///
    /// This is the sum of the table's big-endian u32 words, with the last
    /// word zero-padded. It can be compared against [`TableRecord::checksum`];
    /// note that for `head` the stored value is computed with
    /// `checksumAdjustment` set to zero.
    pub fn compute_checksum(&self, tag: Tag) -> Result<u32, ReadError> {
        let data = self.checked_table_data(tag)?;
        Ok(checksum(data.as_bytes()))
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_data(tag)
    }

    fn expect_data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.checked_table_data(tag)
    }
}

fn checksum(bytes: &[u8]) -> u32 {
    let mut chunks = bytes.chunks_exact(4);
    let mut sum = chunks
        .by_ref()
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .fold(0u32, u32::wrapping_add);
    let rest = chunks.remainder();
    if !rest.is_empty() {
        let mut last = [0u8; 4];
        last[..rest.len()].copy_from_slice(rest);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

#[cfg(test)]
mod tests {
    use tt_test_data::{be_buffer, FontBuilder, SyntheticFont};

    use super::*;

    fn three_table_font() -> Vec<u8> {
        FontBuilder::new()
            .add_raw(Tag::new(b"head"), SyntheticFont::simple().head())
            .add_raw(Tag::new(b"loca"), vec![0u8; 4])
            .add_raw(Tag::new(b"glyf"), vec![1u8, 2, 3])
            .build()
    }

    #[test]
    fn resolve_three_tables() {
        let data = three_table_font();
        let font = FontRef::new(&data).unwrap();
        assert_eq!(font.table_directory().num_tables(), 3);
        for (tag, len) in [(b"head", 54), (b"loca", 4), (b"glyf", 3)] {
            let table = font.table_data(Tag::new(tag)).unwrap();
            assert_eq!(table.len(), len);
        }
        assert_eq!(
            font.expect_data_for_tag(Tag::new(b"cmap")).unwrap_err(),
            ReadError::TableIsMissing(Tag::new(b"cmap"))
        );
        assert!(matches!(
            font.cmap(),
            Err(ReadError::TableIsMissing(tag)) if tag == Tag::new(b"cmap")
        ));
    }

    #[test]
    fn accepts_true_version() {
        let data = FontBuilder::new()
            .sfnt_version(TRUE_SFNT_VERSION)
            .add_raw(Tag::new(b"glyf"), vec![0u8; 2])
            .build();
        assert!(FontRef::new(&data).is_ok());
    }

    #[test]
    fn rejects_cff_version() {
        let data = FontBuilder::new()
            .sfnt_version(types::CFF_SFNT_VERSION)
            .add_raw(Tag::new(b"CFF "), vec![0u8; 2])
            .build();
        assert_eq!(
            FontRef::new(&data).err(),
            Some(ReadError::InvalidSfnt(types::CFF_SFNT_VERSION))
        );
    }

    #[test]
    fn out_of_range_record_only_fails_that_table() {
        let data = be_buffer! {
            0x00010000u32, 2u16, 32u16, 1u16, 0u16,
            (Tag::new(b"glyf")), 0u32, 44u32, 4u32,
            (Tag::new(b"loca")), 0u32, 1000u32, 4u32,
            [1u8, 2, 3, 4]
        };
        let font = FontRef::new(&data).unwrap();
        assert_eq!(
            font.table_data(Tag::new(b"glyf")).unwrap().as_bytes(),
            &[1, 2, 3, 4]
        );
        assert_eq!(
            font.checked_table_data(Tag::new(b"loca")).err(),
            Some(ReadError::OutOfBounds)
        );
        assert!(font.table_data(Tag::new(b"loca")).is_none());
        assert_eq!(font.table_range(Tag::new(b"loca")), Some(1000..1004));
    }

    #[test]
    fn unsorted_directory_lookup() {
        let _ = env_logger::builder().is_test(true).try_init();
        let data = be_buffer! {
            0x74727565u32, 2u16, 32u16, 1u16, 0u16,
            (Tag::new(b"loca")), 0u32, 44u32, 2u32,
            (Tag::new(b"glyf")), 0u32, 46u32, 2u32,
            [9u8, 9, 7, 7]
        };
        let font = FontRef::new(&data).unwrap();
        assert_eq!(
            font.table_data(Tag::new(b"glyf")).unwrap().as_bytes(),
            &[7, 7]
        );
        assert_eq!(
            font.table_data(Tag::new(b"loca")).unwrap().as_bytes(),
            &[9, 9]
        );
    }

    #[test]
    fn checksums_match_builder() {
        let data = three_table_font();
        let font = FontRef::new(&data).unwrap();
        for record in font.table_directory().table_records() {
            assert_eq!(
                font.compute_checksum(record.tag()).unwrap(),
                record.checksum(),
                "{}",
                record.tag()
            );
        }
        // three bytes, zero padded
        assert_eq!(
            font.compute_checksum(Tag::new(b"glyf")).unwrap(),
            0x0102_0300
        );
    }

    #[test]
    fn truncated_font() {
        let data = three_table_font();
        assert_eq!(FontRef::new(&data[..20]).err(), Some(ReadError::OutOfBounds));
    }
}
