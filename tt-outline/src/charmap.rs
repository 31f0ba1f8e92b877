//! Mapping of characters (codepoints, not graphemes) to nominal glyph identifiers.
//!
//! If you have never run into character to glyph mapping before
//! [Glyph IDs and the 'cmap' table](https://rsheeter.github.io/font101/#glyph-ids-and-the-cmap-table)
//! might be informative.

use raw::{
    tables::cmap::{Cmap, Cmap4, Cmap4Iter, EncodingRecord, PlatformId},
    types::GlyphId,
    ReadError, TableProvider,
};

const WINDOWS_SYMBOL_ENCODING: u16 = 0;
const WINDOWS_UNICODE_BMP_ENCODING: u16 = 1;

/// Mapping of characters to nominal glyph identifiers.
///
/// The mappings are derived from a format 4 subtable of the
/// [cmap](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap)
/// table.
///
/// ## Selection strategy
///
/// The first format 4 subtable found in this order is used:
///
/// * Windows Unicode BMP (platform 3, encoding 1)
/// * any Unicode platform subtable (platform 0)
/// * Windows symbol (platform 3, encoding 0)
///
/// If none of these exist, the subtable of the first encoding record is used,
/// which fails if it is not format 4.
#[derive(Clone, Debug)]
pub struct Charmap<'a> {
    subtable: Cmap4<'a>,
    platform_id: PlatformId,
    encoding_id: u16,
}

impl<'a> Charmap<'a> {
    /// Creates a new character map from the given font.
    pub fn new(font: &impl TableProvider<'a>) -> Result<Self, ReadError> {
        Self::from_cmap(&font.cmap()?)
    }

    /// Creates a new character map from a parsed cmap table.
    pub fn from_cmap(cmap: &Cmap<'a>) -> Result<Self, ReadError> {
        let data = cmap.offset_data();
        let records = cmap.encoding_records();
        let preferred: [fn(&EncodingRecord) -> bool; 3] = [
            |rec| {
                rec.platform_id() == PlatformId::Windows
                    && rec.encoding_id() == WINDOWS_UNICODE_BMP_ENCODING
            },
            |rec| rec.platform_id() == PlatformId::Unicode,
            |rec| {
                rec.platform_id() == PlatformId::Windows
                    && rec.encoding_id() == WINDOWS_SYMBOL_ENCODING
            },
        ];
        for matches in preferred {
            for record in records.iter().filter(|rec| matches(rec)) {
                if record.format(data) != Ok(4) {
                    continue;
                }
                match record.subtable(data) {
                    Ok(subtable) => return Ok(Self::with_record(subtable, record)),
                    Err(e) => log::warn!(
                        "skipping cmap subtable ({:?}, {}): {e}",
                        record.platform_id(),
                        record.encoding_id()
                    ),
                }
            }
        }
        let record = records
            .first()
            .ok_or(ReadError::MalformedData("cmap has no encoding records"))?;
        log::debug!("no preferred cmap subtable, using the first record");
        Ok(Self::with_record(record.subtable(data)?, record))
    }

    fn with_record(subtable: Cmap4<'a>, record: &EncodingRecord) -> Self {
        log::debug!(
            "selected cmap subtable ({:?}, {})",
            record.platform_id(),
            record.encoding_id()
        );
        Self {
            subtable,
            platform_id: record.platform_id(),
            encoding_id: record.encoding_id(),
        }
    }

    /// Maps a character to a nominal glyph identifier.
    ///
    /// Returns `None` if a mapping does not exist.
    pub fn map(&self, ch: impl Into<u32>) -> Option<GlyphId> {
        self.subtable.map_codepoint(ch)
    }

    /// Maps a character to a glyph identifier, falling back to
    /// [`GlyphId::NOTDEF`] if no mapping exists.
    pub fn glyph_id_for(&self, ch: impl Into<u32>) -> GlyphId {
        self.map(ch).unwrap_or(GlyphId::NOTDEF)
    }

    pub fn platform_id(&self) -> PlatformId {
        self.platform_id
    }

    pub fn encoding_id(&self) -> u16 {
        self.encoding_id
    }

    /// The selected subtable.
    pub fn subtable(&self) -> &Cmap4<'a> {
        &self.subtable
    }

    /// Returns an iterator over all mappings of codepoint to nominal glyph
    /// identifiers in the character map.
    pub fn mappings(&self) -> Cmap4Iter<'a> {
        self.subtable.iter()
    }
}
