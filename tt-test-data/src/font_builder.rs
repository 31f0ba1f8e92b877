//! Assemble raw tables into a font file with a table directory.

use std::collections::BTreeMap;

use tt_types::{Tag, TT_SFNT_VERSION};

const TABLE_RECORD_LEN: usize = 16;

/// Build a font from some set of raw tables.
///
/// Tables are written in tag order, each padded to a four byte boundary,
/// and the directory carries real checksums.
#[derive(Debug, Clone)]
pub struct FontBuilder {
    sfnt_version: u32,
    tables: BTreeMap<Tag, Vec<u8>>,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self {
            sfnt_version: TT_SFNT_VERSION,
            tables: Default::default(),
        }
    }
}

impl FontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the version written at the start of the offset subtable.
    pub fn sfnt_version(&mut self, version: u32) -> &mut Self {
        self.sfnt_version = version;
        self
    }

    /// A builder method to add raw data for the provided tag
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Vec<u8>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Assemble all the tables into a binary font file.
    pub fn build(&self) -> Vec<u8> {
        let header_len = 12 + self.tables.len() * TABLE_RECORD_LEN;
        let (search_range, entry_selector, range_shift) = search_range(self.tables.len());

        let mut data = Vec::new();
        data.extend(self.sfnt_version.to_be_bytes());
        data.extend((self.tables.len() as u16).to_be_bytes());
        data.extend(search_range.to_be_bytes());
        data.extend(entry_selector.to_be_bytes());
        data.extend(range_shift.to_be_bytes());

        let mut position = header_len as u32;
        for (tag, table) in &self.tables {
            data.extend(tag.to_be_bytes());
            data.extend(checksum(table).to_be_bytes());
            data.extend(position.to_be_bytes());
            data.extend((table.len() as u32).to_be_bytes());
            position += round4(table.len()) as u32;
        }
        for table in self.tables.values() {
            data.extend_from_slice(table);
            data.resize(round4(data.len()), 0);
        }
        data
    }
}

/// The binary search assists stored in the offset subtable.
fn search_range(num_tables: usize) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let entry_selector = (num_tables as u32).ilog2() as u16;
    let search_range = (1u16 << entry_selector) * TABLE_RECORD_LEN as u16;
    let range_shift = (num_tables * TABLE_RECORD_LEN) as u16 - search_range;
    (search_range, entry_selector, range_shift)
}

fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

/// Sum of the table as big-endian u32 words, zero padded.
pub fn checksum(table: &[u8]) -> u32 {
    table.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_search_assists() {
        // Based on Roboto's num tables
        assert_eq!(search_range(0x16), (256, 4, 96));
        assert_eq!(search_range(3), (32, 1, 16));
    }

    #[test]
    fn tables_are_padded() {
        let mut builder = FontBuilder::new();
        builder
            .add_raw(Tag::new(b"bbbb"), vec![1u8; 5])
            .add_raw(Tag::new(b"aaaa"), vec![2u8; 2]);
        let bytes = builder.build();
        // header + 2 records + 4 + 8
        assert_eq!(bytes.len(), 12 + 32 + 4 + 8);
        // 'aaaa' sorts first and starts right after the directory
        assert_eq!(&bytes[12..16], b"aaaa");
        assert_eq!(&bytes[44..46], &[2, 2]);
    }

    #[test]
    fn checksum_pads_last_word() {
        assert_eq!(checksum(&[0, 0, 0, 1, 0x80]), 0x8000_0001);
    }
}
