//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use tt_types::{BigEndian, FixedSize, MajorMinor, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea)
/// (horizontal header) table.
#[derive(Clone, Copy, Debug)]
pub struct Hhea<'a> {
    fields: &'a HheaFields,
}

#[derive(Clone, Copy, Debug, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct HheaFields {
    pub version: BigEndian<MajorMinor>,
    pub ascender: BigEndian<i16>,
    pub descender: BigEndian<i16>,
    pub line_gap: BigEndian<i16>,
    pub advance_width_max: BigEndian<u16>,
    pub min_left_side_bearing: BigEndian<i16>,
    pub min_right_side_bearing: BigEndian<i16>,
    pub x_max_extent: BigEndian<i16>,
    pub caret_slope_rise: BigEndian<i16>,
    pub caret_slope_run: BigEndian<i16>,
    pub caret_offset: BigEndian<i16>,
    pub reserved0: BigEndian<i16>,
    pub reserved1: BigEndian<i16>,
    pub reserved2: BigEndian<i16>,
    pub reserved3: BigEndian<i16>,
    pub metric_data_format: BigEndian<i16>,
    pub number_of_long_metrics: BigEndian<u16>,
}

impl FixedSize for HheaFields {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl TopLevelTable for Hhea<'_> {
    const TAG: Tag = Tag::new(b"hhea");
}

impl<'a> FontRead<'a> for Hhea<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.read_ref_at(0).map(|fields| Hhea { fields })
    }
}

impl<'a> Hhea<'a> {
    pub fn fields(&self) -> &'a HheaFields {
        self.fields
    }

    pub fn version(&self) -> MajorMinor {
        self.fields.version.get()
    }

    /// Distance from baseline to the highest ascender, in font units.
    pub fn ascender(&self) -> i16 {
        self.fields.ascender.get()
    }

    /// Distance from baseline to the lowest descender, in font units.
    pub fn descender(&self) -> i16 {
        self.fields.descender.get()
    }

    pub fn line_gap(&self) -> i16 {
        self.fields.line_gap.get()
    }

    pub fn advance_width_max(&self) -> u16 {
        self.fields.advance_width_max.get()
    }

    pub fn min_left_side_bearing(&self) -> i16 {
        self.fields.min_left_side_bearing.get()
    }

    pub fn min_right_side_bearing(&self) -> i16 {
        self.fields.min_right_side_bearing.get()
    }

    pub fn x_max_extent(&self) -> i16 {
        self.fields.x_max_extent.get()
    }

    pub fn caret_slope_rise(&self) -> i16 {
        self.fields.caret_slope_rise.get()
    }

    pub fn caret_slope_run(&self) -> i16 {
        self.fields.caret_slope_run.get()
    }

    pub fn caret_offset(&self) -> i16 {
        self.fields.caret_offset.get()
    }

    pub fn metric_data_format(&self) -> i16 {
        self.fields.metric_data_format.get()
    }

    /// Number of advance/side bearing pairs in the `hmtx` table.
    pub fn number_of_long_metrics(&self) -> u16 {
        self.fields.number_of_long_metrics.get()
    }

    /// The factor that maps the ascender to descender span onto `height`
    /// pixels.
    ///
    /// Returns 0.0 if the font declares an empty vertical extent.
    pub fn scale_for_pixel_height(&self, height: f32) -> f32 {
        let extent = self.ascender() as i32 - self.descender() as i32;
        if extent == 0 {
            return 0.0;
        }
        height / extent as f32
    }
}

#[cfg(test)]
mod tests {
    use tt_test_data::SyntheticFont;

    use super::*;

    #[test]
    fn read_fields() {
        let data = SyntheticFont::simple().hhea();
        assert_eq!(data.len(), HheaFields::RAW_BYTE_LEN);
        let hhea = Hhea::read(FontData::new(&data)).unwrap();
        assert_eq!(hhea.version(), MajorMinor::VERSION_1_0);
        assert_eq!(hhea.ascender(), 800);
        assert_eq!(hhea.descender(), -200);
        assert_eq!(hhea.line_gap(), 90);
        assert_eq!(hhea.advance_width_max(), 600);
        assert_eq!(hhea.caret_slope_rise(), 1);
        assert_eq!(hhea.number_of_long_metrics(), 3);
    }

    #[test]
    fn pixel_scale() {
        let data = SyntheticFont::simple().hhea();
        let hhea = Hhea::read(FontData::new(&data)).unwrap();
        assert_eq!(hhea.scale_for_pixel_height(100.0), 0.1);
        assert_eq!(hhea.scale_for_pixel_height(0.0), 0.0);
    }

    #[test]
    fn zero_extent_scale() {
        let mut font = SyntheticFont::simple();
        font.ascender = 0;
        font.descender = 0;
        let data = font.hhea();
        let hhea = Hhea::read(FontData::new(&data)).unwrap();
        assert_eq!(hhea.scale_for_pixel_height(64.0), 0.0);
    }
}
