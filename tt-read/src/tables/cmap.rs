//! The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table
//!
//! Only the format 4 (segment mapping to delta values) subtable is decoded;
//! encoding records pointing at other formats are still listed, and report
//! their format.

use std::ops::Range;

use tt_types::{BigEndian, FixedSize, GlyphId, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap)
#[derive(Clone)]
pub struct Cmap<'a> {
    data: FontData<'a>,
    version: u16,
    encoding_records: &'a [EncodingRecord],
}

impl TopLevelTable for Cmap<'_> {
    const TAG: Tag = Tag::new(b"cmap");
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let encoding_records = cursor.read_array(num_tables as usize)?;
        Ok(Cmap {
            data,
            version,
            encoding_records,
        })
    }
}

impl<'a> Cmap<'a> {
    /// Table version number (0).
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Number of encoding tables that follow.
    pub fn num_tables(&self) -> u16 {
        self.encoding_records.len() as u16
    }

    pub fn encoding_records(&self) -> &'a [EncodingRecord] {
        self.encoding_records
    }

    /// The data of the whole table, which subtable offsets are relative to.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }

    /// The subtable of the first encoding record, regardless of its
    /// platform and encoding.
    pub fn first_subtable(&self) -> Result<Cmap4<'a>, ReadError> {
        self.encoding_records
            .first()
            .ok_or(ReadError::MalformedData("cmap has no encoding records"))?
            .subtable(self.data)
    }

    /// Map a codepoint to a nominal glyph identifier
    ///
    /// This uses the first available subtable that provides a valid mapping.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        self.encoding_records
            .iter()
            .filter_map(|record| record.subtable(self.data).ok())
            .find_map(|subtable| subtable.map_codepoint(codepoint))
    }
}

impl std::fmt::Debug for Cmap<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmap")
            .field("version", &self.version)
            .field("encoding_records", &self.encoding_records)
            .finish()
    }
}

/// Encoding record within a [cmap] table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct EncodingRecord {
    /// Platform ID.
    pub platform_id: BigEndian<u16>,
    /// Platform-specific encoding ID.
    pub encoding_id: BigEndian<u16>,
    /// Byte offset from beginning of the [`Cmap`] table to the subtable for this
    /// encoding.
    pub subtable_offset: BigEndian<u32>,
}

impl FixedSize for EncodingRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl EncodingRecord {
    pub fn platform_id(&self) -> PlatformId {
        PlatformId::new(self.platform_id.get())
    }

    pub fn encoding_id(&self) -> u16 {
        self.encoding_id.get()
    }

    pub fn subtable_offset(&self) -> u32 {
        self.subtable_offset.get()
    }

    /// The format of the subtable this record points to.
    pub fn format(&self, data: FontData<'_>) -> Result<u16, ReadError> {
        data.read_at(self.subtable_offset() as usize)
    }

    /// Resolve the subtable; only format 4 is supported.
    ///
    /// `data` is the data of the whole [`Cmap`] table.
    pub fn subtable<'a>(&self, data: FontData<'a>) -> Result<Cmap4<'a>, ReadError> {
        let data = data
            .split_off(self.subtable_offset() as usize)
            .ok_or(ReadError::OutOfBounds)?;
        Cmap4::read(data)
    }
}

/// <https://docs.microsoft.com/en-us/typography/opentype/spec/name#platform-ids>
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlatformId {
    Unicode,
    Mac,
    Iso,
    Windows,
    Custom,
    Unknown(u16),
}

impl PlatformId {
    pub fn new(raw: u16) -> Self {
        match raw {
            0 => Self::Unicode,
            1 => Self::Mac,
            2 => Self::Iso,
            3 => Self::Windows,
            4 => Self::Custom,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            Self::Unicode => 0,
            Self::Mac => 1,
            Self::Iso => 2,
            Self::Windows => 3,
            Self::Custom => 4,
            Self::Unknown(other) => other,
        }
    }
}

/// [cmap Format 4](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values): Segment mapping to delta values
#[derive(Clone)]
pub struct Cmap4<'a> {
    data: FontData<'a>,
    length: u16,
    language: u16,
    seg_count_x2: u16,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    end_code: &'a [BigEndian<u16>],
    start_code: &'a [BigEndian<u16>],
    id_delta: &'a [BigEndian<i16>],
    id_range_offsets: &'a [BigEndian<u16>],
    id_range_offsets_pos: usize,
    glyph_id_array: &'a [BigEndian<u16>],
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        if format != 4 {
            return Err(ReadError::InvalidFormat(format as _));
        }
        let length: u16 = data.read_at(2)?;
        let data = data.slice(..length as usize).ok_or(ReadError::OutOfBounds)?;
        let mut cursor = data.cursor();
        cursor.advance::<u16>();
        cursor.advance::<u16>();
        let language = cursor.read()?;
        let seg_count_x2: u16 = cursor.read()?;
        let search_range = cursor.read()?;
        let entry_selector = cursor.read()?;
        let range_shift = cursor.read()?;
        let seg_count = (seg_count_x2 / 2) as usize;
        let glyph_id_count = (length as i64 - 16) / 2 - 4 * seg_count as i64;
        if glyph_id_count < 0 {
            return Err(ReadError::MalformedData(
                "cmap4 length is too small for its segments",
            ));
        }
        let end_code: &[BigEndian<u16>] = cursor.read_array(seg_count)?;
        cursor.advance::<u16>();
        let start_code = cursor.read_array(seg_count)?;
        let id_delta = cursor.read_array(seg_count)?;
        let id_range_offsets_pos = cursor.position()?;
        let id_range_offsets = cursor.read_array(seg_count)?;
        let glyph_id_array = cursor.read_array(glyph_id_count as usize)?;
        if end_code.windows(2).any(|pair| pair[0].get() > pair[1].get()) {
            return Err(ReadError::MalformedData("cmap4 end codes are not sorted"));
        }
        Ok(Cmap4 {
            data,
            length,
            language,
            seg_count_x2,
            search_range,
            entry_selector,
            range_shift,
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            id_range_offsets_pos,
            glyph_id_array,
        })
    }
}

impl<'a> Cmap4<'a> {
    /// This is the length in bytes of the subtable.
    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn language(&self) -> u16 {
        self.language
    }

    /// 2 × segCount.
    pub fn seg_count_x2(&self) -> u16 {
        self.seg_count_x2
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

    /// End characterCode for each segment, last=0xFFFF.
    pub fn end_code(&self) -> &'a [BigEndian<u16>] {
        self.end_code
    }

    /// Start character code for each segment.
    pub fn start_code(&self) -> &'a [BigEndian<u16>] {
        self.start_code
    }

    /// Delta for all character codes in segment.
    pub fn id_delta(&self) -> &'a [BigEndian<i16>] {
        self.id_delta
    }

    /// Offsets into glyphIdArray or 0
    pub fn id_range_offsets(&self) -> &'a [BigEndian<u16>] {
        self.id_range_offsets
    }

    /// Glyph index array (arbitrary length)
    pub fn glyph_id_array(&self) -> &'a [BigEndian<u16>] {
        self.glyph_id_array
    }

    /// Maps a codepoint to a nominal glyph identifier.
    ///
    /// Returns `None` for codepoints that map to the missing glyph, or whose
    /// mapping points outside the subtable.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        self.glyph_id_for(codepoint)
            .ok()
            .filter(|gid| *gid != GlyphId::NOTDEF)
    }

    /// Maps a codepoint to a glyph identifier, [`GlyphId::NOTDEF`] if it is
    /// not covered.
    ///
    /// This fails only if the segment covering the codepoint addresses data
    /// outside of the subtable.
    pub fn glyph_id_for(&self, codepoint: impl Into<u32>) -> Result<GlyphId, ReadError> {
        let codepoint = codepoint.into();
        let Ok(codepoint) = u16::try_from(codepoint) else {
            return Ok(GlyphId::NOTDEF);
        };
        // end codes are sorted, so this is the first segment that can contain
        // the codepoint
        let index = self.end_code.partition_point(|end| end.get() < codepoint);
        match self.start_code.get(index) {
            Some(start) if start.get() <= codepoint => {
                self.lookup_glyph_id(codepoint, index, start.get())
            }
            _ => Ok(GlyphId::NOTDEF),
        }
    }

    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable.
    pub fn iter(&self) -> Cmap4Iter<'a> {
        Cmap4Iter::new(self.clone())
    }

    /// Does the final phase of glyph id lookup.
    ///
    /// Shared between Self::glyph_id_for and Cmap4Iter.
    fn lookup_glyph_id(
        &self,
        codepoint: u16,
        index: usize,
        start_code: u16,
    ) -> Result<GlyphId, ReadError> {
        let delta = self
            .id_delta
            .get(index)
            .ok_or(ReadError::OutOfBounds)?
            .get();
        let range_offset = self
            .id_range_offsets
            .get(index)
            .ok_or(ReadError::OutOfBounds)?
            .get() as usize;
        if range_offset == 0 {
            return Ok(GlyphId::new(codepoint.wrapping_add_signed(delta)));
        }
        // the offset is relative to the location of the range offset itself
        let pos = self.id_range_offsets_pos
            + index * u16::RAW_BYTE_LEN
            + range_offset
            + (codepoint - start_code) as usize * u16::RAW_BYTE_LEN;
        let gid: u16 = self.data.read_at(pos)?;
        if gid == 0 {
            return Ok(GlyphId::NOTDEF);
        }
        Ok(GlyphId::new(gid.wrapping_add_signed(delta)))
    }

    /// Returns the [start_code, end_code] range at the given index.
    fn code_range(&self, index: usize) -> Option<Range<u32>> {
        // Extend to u32 to ensure we don't overflow on the end + 1 bound
        // below.
        let start = self.start_code.get(index)?.get() as u32;
        let end = self.end_code.get(index)?.get() as u32;
        // Use end + 1 here because the range in the table is inclusive
        Some(start..end + 1)
    }
}

impl std::fmt::Debug for Cmap4<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmap4")
            .field("length", &self.length)
            .field("language", &self.language)
            .field("seg_count", &(self.seg_count_x2 / 2))
            .field("glyph_id_array_len", &self.glyph_id_array.len())
            .finish()
    }
}

/// Iterator over all (codepoint, glyph identifier) pairs in
/// the subtable.
#[derive(Clone)]
pub struct Cmap4Iter<'a> {
    subtable: Cmap4<'a>,
    cur_range: Range<u32>,
    cur_start_code: u16,
    cur_range_ix: usize,
}

impl<'a> Cmap4Iter<'a> {
    fn new(subtable: Cmap4<'a>) -> Self {
        let cur_range = subtable.code_range(0).unwrap_or_default();
        let cur_start_code = cur_range.start as u16;
        Self {
            subtable,
            cur_range,
            cur_start_code,
            cur_range_ix: 0,
        }
    }
}

impl Iterator for Cmap4Iter<'_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(codepoint) = self.cur_range.next() {
                let glyph_id = self
                    .subtable
                    .lookup_glyph_id(codepoint as u16, self.cur_range_ix, self.cur_start_code)
                    .ok()?;
                // The table might explicitly map some codepoints to 0. Avoid
                // returning those here.
                if glyph_id == GlyphId::NOTDEF {
                    continue;
                }
                return Some((codepoint, glyph_id));
            } else {
                self.cur_range_ix += 1;
                self.cur_range = self.subtable.code_range(self.cur_range_ix)?;
                self.cur_start_code = self.cur_range.start as u16;
            }
        }
    }
}
