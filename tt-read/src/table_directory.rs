//! The [table directory] at the start of every font file.
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

use std::ops::Range;

use tt_types::{BigEndian, FixedSize, Tag};

use crate::{FontData, FontRead, ReadError};

/// The offset subtable and the table records that follow it.
#[derive(Clone)]
pub struct TableDirectory<'a> {
    sfnt_version: u32,
    num_tables: u16,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    table_records: &'a [TableRecord],
}

/// Record for a table in a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: BigEndian<Tag>,
    /// Checksum for the table.
    pub checksum: BigEndian<u32>,
    /// Offset from the beginning of the font data.
    pub offset: BigEndian<u32>,
    /// Length of the table.
    pub length: BigEndian<u32>,
}

impl FixedSize for TableRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl TableRecord {
    pub fn tag(&self) -> Tag {
        self.tag.get()
    }

    pub fn checksum(&self) -> u32 {
        self.checksum.get()
    }

    pub fn offset(&self) -> u32 {
        self.offset.get()
    }

    pub fn length(&self) -> u32 {
        self.length.get()
    }

    /// The byte range of the table in the font file, if it does not overflow.
    pub fn data_range(&self) -> Option<Range<usize>> {
        let start = self.offset() as usize;
        start
            .checked_add(self.length() as usize)
            .map(|end| start..end)
    }
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let search_range = cursor.read()?;
        let entry_selector = cursor.read()?;
        let range_shift = cursor.read()?;
        let table_records = cursor.read_array(num_tables as usize)?;
        Ok(TableDirectory {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
            table_records,
        })
    }
}

impl<'a> TableDirectory<'a> {
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    pub fn search_range(&self) -> u16 {
        self.search_range
    }

    pub fn entry_selector(&self) -> u16 {
        self.entry_selector
    }

    pub fn range_shift(&self) -> u16 {
        self.range_shift
    }

    pub fn table_records(&self) -> &'a [TableRecord] {
        self.table_records
    }

    /// Returns `true` if the records are in ascending tag order, which allows
    /// lookup by binary search.
    pub fn is_sorted(&self) -> bool {
        self.table_records
            .windows(2)
            .all(|pair| pair[0].tag() < pair[1].tag())
    }
}

impl std::fmt::Debug for TableDirectory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableDirectory")
            .field("sfnt_version", &format_args!("0x{:08X}", self.sfnt_version))
            .field("num_tables", &self.num_tables)
            .field("table_records", &self.table_records)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use tt_test_data::be_buffer;

    use super::*;

    #[test]
    fn read_records() {
        let buf = be_buffer! {
            0x00010000u32, 2u16, 32u16, 1u16, 0u16,
            (Tag::new(b"glyf")), 0xDEADBEEFu32, 44u32, 10u32,
            (Tag::new(b"head")), 0u32, 54u32, 54u32
        };
        let directory = TableDirectory::read(FontData::new(&buf)).unwrap();
        assert_eq!(directory.num_tables(), 2);
        assert_eq!(directory.search_range(), 32);
        let records = directory.table_records();
        assert_eq!(records[0].tag(), Tag::new(b"glyf"));
        assert_eq!(records[0].checksum(), 0xDEADBEEF);
        assert_eq!(records[1].data_range(), Some(54..108));
        assert!(directory.is_sorted());
    }

    #[test]
    fn truncated_records() {
        // claims three tables, but only carries one record
        let buf = be_buffer! {
            0x00010000u32, 3u16, 32u16, 1u16, 16u16,
            (Tag::new(b"head")), 0u32, 28u32, 54u32
        };
        assert!(matches!(
            TableDirectory::read(FontData::new(&buf)),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn truncated_header() {
        let buf = be_buffer! { 0x00010000u32, 3u16 };
        assert!(matches!(
            TableDirectory::read(FontData::new(&buf)),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn unsorted() {
        let buf = be_buffer! {
            0x00010000u32, 2u16, 32u16, 1u16, 0u16,
            (Tag::new(b"loca")), 0u32, 0u32, 0u32,
            (Tag::new(b"head")), 0u32, 0u32, 0u32
        };
        let directory = TableDirectory::read(FontData::new(&buf)).unwrap();
        assert!(!directory.is_sorted());
    }
}
