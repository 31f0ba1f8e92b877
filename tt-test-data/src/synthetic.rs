//! Complete fonts assembled from the other fixtures.

use tt_types::Tag;

use crate::{
    be_buffer,
    cmap::{self, Cmap4Builder},
    glyf, FontBuilder,
};

/// A small but complete TrueType font description.
///
/// Glyph records are stored pre-encoded; an empty record yields an empty
/// `loca` range.
#[derive(Clone, Debug)]
pub struct SyntheticFont {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub long_loca: bool,
    pub glyphs: Vec<Vec<u8>>,
    /// `(advance, left side bearing)` pairs; glyphs beyond these take only a
    /// trailing side bearing, with the last advance.
    pub h_metrics: Vec<(u16, i16)>,
    pub trailing_side_bearings: Vec<i16>,
    /// A complete `cmap` table.
    pub cmap: Vec<u8>,
}

impl SyntheticFont {
    /// The four glyph fixture used throughout the tests.
    ///
    /// | char  | glyph | contents                               |
    /// |-------|-------|----------------------------------------|
    /// |       | 0     | notdef box, 500x700                    |
    /// | `A`   | 1     | triangle, all on-curve                 |
    /// | `O`   | 2     | diamond of four off-curve points       |
    /// | space | 3     | empty                                  |
    /// | `C`   | 4     | composite referencing glyph 2          |
    pub fn simple() -> Self {
        let notdef = glyf::simple_glyph(&[&[
            (0, 0, true),
            (500, 0, true),
            (500, 700, true),
            (0, 700, true),
        ]]);
        let a = glyf::simple_glyph(&[&[(0, 0, true), (600, 0, true), (300, 700, true)]]);
        let o = glyf::simple_glyph(&[&[
            (300, 0, false),
            (600, 350, false),
            (300, 700, false),
            (0, 350, false),
        ]]);
        let cmap4 = Cmap4Builder::new()
            .delta(0x20, 0x20, -0x1D)
            .delta(0x41, 0x41, -0x40)
            .glyphs(0x43, &[4])
            .delta(0x4F, 0x4F, -0x4D)
            .terminator()
            .build();
        SyntheticFont {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 90,
            long_loca: false,
            glyphs: vec![notdef, a, o, Vec::new(), glyf::composite_glyph(2)],
            h_metrics: vec![(500, 0), (600, 0), (600, 0)],
            trailing_side_bearings: vec![0, 0],
            cmap: cmap::cmap(&[(3, 1, cmap4.as_slice())]).into_vec(),
        }
    }

    /// Assemble the binary font.
    pub fn build(&self) -> Vec<u8> {
        let (glyf, offsets) = self.glyf_and_offsets();
        FontBuilder::new()
            .add_raw(Tag::new(b"head"), self.head())
            .add_raw(Tag::new(b"hhea"), self.hhea())
            .add_raw(Tag::new(b"hmtx"), self.hmtx())
            .add_raw(Tag::new(b"cmap"), self.cmap.clone())
            .add_raw(Tag::new(b"loca"), loca(&offsets, self.long_loca))
            .add_raw(Tag::new(b"glyf"), glyf)
            .build()
    }

    /// The concatenated glyph records and the `loca` offsets into them.
    ///
    /// Records are padded to an even length, as short offsets require.
    pub fn glyf_and_offsets(&self) -> (Vec<u8>, Vec<u32>) {
        let mut data = Vec::new();
        let mut offsets = vec![0];
        for glyph in &self.glyphs {
            data.extend_from_slice(glyph);
            if data.len() % 2 != 0 {
                data.push(0);
            }
            offsets.push(data.len() as u32);
        }
        (data, offsets)
    }

    pub fn head(&self) -> Vec<u8> {
        be_buffer! {
            1u16, 0u16,             // version
            0x00010000u32,          // fontRevision
            0u32,                   // checksumAdjustment
            0x5F0F3CF5u32,          // magicNumber
            0x000Bu16,              // flags
            (self.units_per_em),
            0i64,                   // created
            0i64,                   // modified
            0i16, (self.descender), 600i16, (self.ascender),
            0u16,                   // macStyle
            8u16,                   // lowestRecPPEM
            2i16,                   // fontDirectionHint
            (self.long_loca as i16),
            0i16                    // glyphDataFormat
        }
        .into_vec()
    }

    pub fn hhea(&self) -> Vec<u8> {
        let max_advance = self.h_metrics.iter().map(|m| m.0).max().unwrap_or(0);
        be_buffer! {
            1u16, 0u16,             // version
            (self.ascender),
            (self.descender),
            (self.line_gap),
            max_advance,
            0i16,                   // minLeftSideBearing
            0i16,                   // minRightSideBearing
            600i16,                 // xMaxExtent
            1i16, 0i16, 0i16,       // caret slope rise, run, offset
            [0i16, 0, 0, 0],        // reserved
            0i16,                   // metricDataFormat
            (self.h_metrics.len() as u16)
        }
        .into_vec()
    }

    pub fn hmtx(&self) -> Vec<u8> {
        let mut buf = crate::BeBuffer::new();
        for (advance, lsb) in &self.h_metrics {
            buf = buf.push(*advance).push(*lsb);
        }
        buf.extend(self.trailing_side_bearings.iter().copied())
            .into_vec()
    }
}

/// Encodes `loca`, halving offsets for the short format.
pub fn loca(offsets: &[u32], long: bool) -> Vec<u8> {
    let buf = crate::BeBuffer::new();
    if long {
        buf.extend(offsets.iter().copied()).into_vec()
    } else {
        buf.extend(offsets.iter().map(|off| (off / 2) as u16))
            .into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        let font = SyntheticFont::simple();
        assert_eq!(font.head().len(), 54);
        assert_eq!(font.hhea().len(), 36);
        assert_eq!(font.hmtx().len(), 3 * 4 + 2 * 2);
        let (_, offsets) = font.glyf_and_offsets();
        assert_eq!(offsets.len(), font.glyphs.len() + 1);
        assert_eq!(offsets[3], offsets[4]);
    }
}
