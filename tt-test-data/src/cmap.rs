//! cmap test data for scenarios not readily produced with font tools

use crate::{be_buffer, bebuffer::BeBuffer};

/// A format 4 segment as it is stored in the font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: u16,
    pub end: u16,
    pub id_delta: i16,
    pub id_range_offset: u16,
}

impl Segment {
    pub const fn new(start: u16, end: u16, id_delta: i16, id_range_offset: u16) -> Self {
        Self {
            start,
            end,
            id_delta,
            id_range_offset,
        }
    }
}

/// Writes a format 4 subtable from explicit segments and glyph id array.
///
/// The `length` field is computed so that the glyph id array exactly fills
/// the table.
pub fn cmap4(segments: &[Segment], glyph_ids: &[u16]) -> BeBuffer {
    let seg_count = segments.len() as u16;
    let length = 16 + 8 * seg_count + 2 * glyph_ids.len() as u16;
    be_buffer! {
        4u16,               // format
        length,             // length
        0u16,               // language
        (seg_count * 2),    // segCountX2
        0u16,               // searchRange, unused
        0u16,               // entrySelector, unused
        0u16                // rangeShift, unused
    }
    .extend(segments.iter().map(|seg| seg.end))
    .push(0u16) // reservedPad
    .extend(segments.iter().map(|seg| seg.start))
    .extend(segments.iter().map(|seg| seg.id_delta))
    .extend(segments.iter().map(|seg| seg.id_range_offset))
    .extend(glyph_ids.iter().copied())
}

/// Builds format 4 subtables from mappings, computing range offsets.
#[derive(Clone, Debug, Default)]
pub struct Cmap4Builder {
    segments: Vec<(u16, u16, SegmentMapping)>,
}

#[derive(Clone, Debug)]
enum SegmentMapping {
    Delta(i16),
    Glyphs(Vec<u16>),
}

impl Cmap4Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `start..=end` to `code + delta`.
    pub fn delta(mut self, start: u16, end: u16, delta: i16) -> Self {
        self.segments.push((start, end, SegmentMapping::Delta(delta)));
        self
    }

    /// Maps `start..` to the given glyphs through the glyph id array.
    pub fn glyphs(mut self, start: u16, glyphs: &[u16]) -> Self {
        let end = start + glyphs.len() as u16 - 1;
        self.segments
            .push((start, end, SegmentMapping::Glyphs(glyphs.to_vec())));
        self
    }

    /// Appends the conventional `0xFFFF` terminating segment.
    pub fn terminator(self) -> Self {
        self.delta(0xFFFF, 0xFFFF, 1)
    }

    pub fn build(&self) -> BeBuffer {
        let seg_count = self.segments.len();
        let mut segments = Vec::with_capacity(seg_count);
        let mut glyph_ids = Vec::new();
        for (i, (start, end, mapping)) in self.segments.iter().enumerate() {
            let segment = match mapping {
                SegmentMapping::Delta(delta) => Segment::new(*start, *end, *delta, 0),
                SegmentMapping::Glyphs(glyphs) => {
                    // offset from the idRangeOffset slot to our run in the array
                    let range_offset = 2 * (seg_count - i + glyph_ids.len());
                    glyph_ids.extend_from_slice(glyphs);
                    Segment::new(*start, *end, 0, range_offset as u16)
                }
            };
            segments.push(segment);
        }
        cmap4(&segments, &glyph_ids)
    }
}

/// Writes a cmap table with one encoding record per subtable.
///
/// Each entry is `(platform_id, encoding_id, subtable_bytes)`; subtables are
/// laid out in order after the records.
pub fn cmap(subtables: &[(u16, u16, &[u8])]) -> BeBuffer {
    let mut buf = be_buffer! {
        0u16,                       // version
        (subtables.len() as u16)    // numTables
    };
    let mut offset = 4 + 8 * subtables.len() as u32;
    for (platform_id, encoding_id, data) in subtables {
        buf = buf.push(*platform_id).push(*encoding_id).push(offset);
        offset += data.len() as u32;
    }
    for (_, _, data) in subtables {
        buf = buf.extend_bytes(data);
    }
    buf
}

/// The segment from the single-character scenario: 'A' maps to glyph 65
/// through a zero delta.
pub fn identity_a_cmap4() -> BeBuffer {
    cmap4(&[Segment::new(65, 65, 0, 0)], &[])
}

/// Contains two codepoint ranges, both [6, 64]. Surely you don't duplicate them?
pub fn repetitive_cmap4() -> BeBuffer {
    cmap4(
        &[Segment::new(6, 64, 0, 0), Segment::new(6, 64, 0, 0)],
        &[],
    )
}
