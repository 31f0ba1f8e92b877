//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use std::ops::Range;

use tt_types::{BigEndian, GlyphId, Tag};

use super::glyf::{Glyf, Glyph};
use crate::{FontData, FontRead, FontReadWithArgs, ReadArgs, ReadError, TopLevelTable};

/// The [loca] table.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Debug)]
pub enum Loca<'a> {
    Short(&'a [BigEndian<u16>]),
    Long(&'a [BigEndian<u32>]),
}

impl TopLevelTable for Loca<'_> {
    const TAG: Tag = Tag::new(b"loca");
}

impl<'a> Loca<'a> {
    pub fn read(data: FontData<'a>, is_long: bool) -> Result<Self, ReadError> {
        Self::read_with_args(data, &is_long)
    }

    /// The number of glyphs; one less than the number of offsets.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len().saturating_sub(1),
            Loca::Long(data) => data.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempt to return the offset for a given glyph id.
    ///
    /// Short offsets are stored divided by two; this returns the actual
    /// byte offset.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(idx).map(|x| x.get() as u32 * 2),
            Loca::Long(data) => data.get(idx).map(|x| x.get()),
        }
    }

    /// The byte range of the glyph's record in the `glyf` table.
    pub fn glyph_range(&self, gid: GlyphId) -> Result<Range<usize>, ReadError> {
        let idx = gid.to_u16() as usize;
        if idx >= self.len() {
            return Err(ReadError::InvalidGlyphId(gid));
        }
        let start = self.get_raw(idx).ok_or(ReadError::OutOfBounds)? as usize;
        let end = self.get_raw(idx + 1).ok_or(ReadError::OutOfBounds)? as usize;
        if end < start {
            return Err(ReadError::MalformedData("loca offsets are not ascending"));
        }
        Ok(start..end)
    }

    /// Returns the glyph, or `None` if it has no outline (such as a space).
    pub fn get_glyf(&self, gid: GlyphId, glyf: &Glyf<'a>) -> Result<Option<Glyph<'a>>, ReadError> {
        let range = self.glyph_range(gid)?;
        if range.is_empty() {
            return Ok(None);
        }
        let data = glyf
            .offset_data()
            .slice(range)
            .ok_or(ReadError::OutOfBounds)?;
        Glyph::read(data).map(Some)
    }
}

impl ReadArgs for Loca<'_> {
    type Args = bool;
}

impl<'a> FontReadWithArgs<'a> for Loca<'a> {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let is_long = *args;
        if is_long {
            data.read_array(0..data.len()).map(Loca::Long)
        } else {
            data.read_array(0..data.len()).map(Loca::Short)
        }
    }
}

#[cfg(test)]
mod tests {
    use tt_test_data::{be_buffer, synthetic, SyntheticFont};

    use super::*;

    #[test]
    fn short_offsets_are_doubled() {
        let data = be_buffer! { 0u16, 10u16, 10u16, 24u16 };
        let loca = Loca::read(FontData::new(&data), false).unwrap();
        assert_eq!(loca.len(), 3);
        assert_eq!(loca.get_raw(1), Some(20));
        assert_eq!(loca.glyph_range(GlyphId::new(0)), Ok(0..20));
        assert_eq!(loca.glyph_range(GlyphId::new(1)), Ok(20..20));
        assert_eq!(loca.glyph_range(GlyphId::new(2)), Ok(20..48));
    }

    #[test]
    fn long_offsets() {
        let data = be_buffer! { 0u32, 70000u32, 70010u32 };
        let loca = Loca::read(FontData::new(&data), true).unwrap();
        assert_eq!(loca.len(), 2);
        assert_eq!(loca.glyph_range(GlyphId::new(1)), Ok(70000..70010));
    }

    #[test]
    fn out_of_range_glyph() {
        let data = be_buffer! { 0u16, 10u16 };
        let loca = Loca::read(FontData::new(&data), false).unwrap();
        assert_eq!(
            loca.glyph_range(GlyphId::new(1)),
            Err(ReadError::InvalidGlyphId(GlyphId::new(1)))
        );
    }

    #[test]
    fn descending_offsets() {
        let data = be_buffer! { 0u16, 10u16, 4u16 };
        let loca = Loca::read(FontData::new(&data), false).unwrap();
        assert!(matches!(
            loca.glyph_range(GlyphId::new(1)),
            Err(ReadError::MalformedData(_))
        ));
    }

    #[test]
    fn odd_length_long_loca() {
        let data = be_buffer! { 0u32, 8u16 };
        assert!(matches!(
            Loca::read(FontData::new(&data), true),
            Err(ReadError::InvalidArrayLen)
        ));
    }

    #[test]
    fn empty_glyph_and_bad_glyf_range() {
        let font = SyntheticFont::simple();
        let (glyf_data, offsets) = font.glyf_and_offsets();
        let loca_data = synthetic::loca(&offsets, false);
        let loca = Loca::read(FontData::new(&loca_data), false).unwrap();
        let glyf = Glyf::read(FontData::new(&glyf_data)).unwrap();
        assert!(loca.get_glyf(GlyphId::new(1), &glyf).unwrap().is_some());
        // space
        assert!(loca.get_glyf(GlyphId::new(3), &glyf).unwrap().is_none());

        // a glyf table that is too short for the offsets in loca
        let short_glyf = Glyf::read(FontData::new(&glyf_data[..10])).unwrap();
        assert!(matches!(
            loca.get_glyf(GlyphId::new(2), &short_glyf),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn long_and_short_agree() {
        let (glyf_data, offsets) = SyntheticFont::simple().glyf_and_offsets();
        let glyf = Glyf::read(FontData::new(&glyf_data)).unwrap();
        let short = synthetic::loca(&offsets, false);
        let long = synthetic::loca(&offsets, true);
        let short = Loca::read(FontData::new(&short), false).unwrap();
        let long = Loca::read(FontData::new(&long), true).unwrap();
        assert_eq!(short.len(), long.len());
        for gid in 0..short.len() as u16 {
            let gid = GlyphId::new(gid);
            assert_eq!(short.glyph_range(gid), long.glyph_range(gid));
            let a = short.get_glyf(gid, &glyf).unwrap().map(|g| g.number_of_contours());
            let b = long.get_glyf(gid, &glyf).unwrap().map(|g| g.number_of_contours());
            assert_eq!(a, b);
        }
    }
}
