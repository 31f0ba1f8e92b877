//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use tt_types::{BigEndian, FixedSize, GlyphId, Tag};

use crate::{FontData, FontReadWithArgs, ReadArgs, ReadError, TopLevelTable};

/// The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table
#[derive(Clone, Copy, Debug)]
pub struct Hmtx<'a> {
    h_metrics: &'a [LongMetric],
    left_side_bearings: &'a [BigEndian<i16>],
}

/// An advance width and left side bearing pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct LongMetric {
    /// Advance width, in font design units.
    pub advance: BigEndian<u16>,
    /// Glyph left side bearing, in font design units.
    pub side_bearing: BigEndian<i16>,
}

impl FixedSize for LongMetric {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl TopLevelTable for Hmtx<'_> {
    const TAG: Tag = Tag::new(b"hmtx");
}

impl ReadArgs for Hmtx<'_> {
    type Args = u16;
}

impl<'a> FontReadWithArgs<'a> for Hmtx<'a> {
    fn read_with_args(data: FontData<'a>, args: &u16) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let h_metrics = cursor.read_array(*args as usize)?;
        // whatever is left is the trailing bearing array; a stray odd byte is ignored
        let n_bearings = cursor.remaining_bytes() / i16::RAW_BYTE_LEN;
        let left_side_bearings = cursor.read_array(n_bearings)?;
        Ok(Hmtx {
            h_metrics,
            left_side_bearings,
        })
    }
}

impl<'a> Hmtx<'a> {
    pub fn read(data: FontData<'a>, number_of_long_metrics: u16) -> Result<Self, ReadError> {
        Self::read_with_args(data, &number_of_long_metrics)
    }

    pub fn h_metrics(&self) -> &'a [LongMetric] {
        self.h_metrics
    }

    /// Side bearings for glyph ids greater than or equal to the number of
    /// long metrics.
    pub fn left_side_bearings(&self) -> &'a [BigEndian<i16>] {
        self.left_side_bearings
    }

    /// The number of glyphs with metrics in this table.
    pub fn num_glyphs(&self) -> usize {
        self.h_metrics.len() + self.left_side_bearings.len()
    }

    /// Returns the advance width for the given glyph identifier.
    ///
    /// Glyphs past the end of the long metrics share the last advance.
    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        let ix = glyph_id.to_u16() as usize;
        if ix >= self.num_glyphs() {
            return None;
        }
        self.h_metrics
            .get(ix)
            .or_else(|| self.h_metrics.last())
            .map(|metric| metric.advance.get())
    }

    /// Returns the left side bearing for the given glyph identifer.
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        let ix = glyph_id.to_u16() as usize;
        match self.h_metrics.get(ix) {
            Some(metric) => Some(metric.side_bearing.get()),
            None => self
                .left_side_bearings
                .get(ix - self.h_metrics.len())
                .map(|lsb| lsb.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tt_test_data::be_buffer;

    use super::*;

    #[test]
    fn trailing_side_bearings() {
        let data = be_buffer! {
            500u16, 10i16,
            600u16, (-20i16),
            // trailing bearings
            30i16, (-40i16)
        };
        let hmtx = Hmtx::read(FontData::new(&data), 2).unwrap();
        assert_eq!(hmtx.num_glyphs(), 4);
        assert_eq!(hmtx.advance(GlyphId::new(0)), Some(500));
        assert_eq!(hmtx.side_bearing(GlyphId::new(1)), Some(-20));
        assert_eq!(hmtx.advance(GlyphId::new(3)), Some(600));
        assert_eq!(hmtx.side_bearing(GlyphId::new(2)), Some(30));
        assert_eq!(hmtx.side_bearing(GlyphId::new(3)), Some(-40));
        assert_eq!(hmtx.advance(GlyphId::new(4)), None);
        assert_eq!(hmtx.side_bearing(GlyphId::new(4)), None);
    }

    #[test]
    fn too_many_long_metrics() {
        let data = be_buffer! { 500u16, 10i16 };
        assert!(matches!(
            Hmtx::read(FontData::new(&data), 2),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn odd_trailing_byte() {
        let data = be_buffer! { 500u16, 10i16, 7i16, 1u8 };
        let hmtx = Hmtx::read(FontData::new(&data), 1).unwrap();
        assert_eq!(hmtx.left_side_bearings().len(), 1);
    }
}
