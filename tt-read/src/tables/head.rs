//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use tt_types::{BigEndian, BoundingBox, Fixed, LongDateTime, MajorMinor, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The expected value of [`Head::magic_number`].
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
/// (font header) table.
#[derive(Clone, Copy, Debug)]
pub struct Head<'a> {
    fields: &'a HeadFields,
}

/// The fixed size contents of the `head` table, as they are laid out in the
/// font.
#[derive(Clone, Copy, Debug, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct HeadFields {
    pub version: BigEndian<MajorMinor>,
    pub font_revision: BigEndian<Fixed>,
    pub checksum_adjustment: BigEndian<u32>,
    pub magic_number: BigEndian<u32>,
    pub flags: BigEndian<u16>,
    pub units_per_em: BigEndian<u16>,
    pub created: BigEndian<LongDateTime>,
    pub modified: BigEndian<LongDateTime>,
    pub x_min: BigEndian<i16>,
    pub y_min: BigEndian<i16>,
    pub x_max: BigEndian<i16>,
    pub y_max: BigEndian<i16>,
    pub mac_style: BigEndian<u16>,
    pub lowest_rec_ppem: BigEndian<u16>,
    pub font_direction_hint: BigEndian<i16>,
    pub index_to_loc_format: BigEndian<i16>,
    pub glyph_data_format: BigEndian<i16>,
}

impl tt_types::FixedSize for HeadFields {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl TopLevelTable for Head<'_> {
    const TAG: Tag = Tag::new(b"head");
}

impl<'a> FontRead<'a> for Head<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.read_ref_at(0).map(|fields| Head { fields })
    }
}

impl<'a> Head<'a> {
    /// The raw fields of the table.
    pub fn fields(&self) -> &'a HeadFields {
        self.fields
    }

    pub fn version(&self) -> MajorMinor {
        self.fields.version.get()
    }

    pub fn font_revision(&self) -> Fixed {
        self.fields.font_revision.get()
    }

    pub fn checksum_adjustment(&self) -> u32 {
        self.fields.checksum_adjustment.get()
    }

    /// Set to 0x5F0F3CF5.
    pub fn magic_number(&self) -> u32 {
        self.fields.magic_number.get()
    }

    pub fn flags(&self) -> u16 {
        self.fields.flags.get()
    }

    /// Set to a value from 16 to 16384. Any value in this range is valid.
    /// In fonts that have TrueType outlines, a power of 2 is recommended as
    /// this allows performance optimization in some rasterizers.
    pub fn units_per_em(&self) -> u16 {
        self.fields.units_per_em.get()
    }

    pub fn created(&self) -> LongDateTime {
        self.fields.created.get()
    }

    pub fn modified(&self) -> LongDateTime {
        self.fields.modified.get()
    }

    /// The union of all glyph bounding boxes.
    pub fn bounding_box(&self) -> BoundingBox<i16> {
        BoundingBox {
            x_min: self.fields.x_min.get(),
            y_min: self.fields.y_min.get(),
            x_max: self.fields.x_max.get(),
            y_max: self.fields.y_max.get(),
        }
    }

    pub fn mac_style(&self) -> u16 {
        self.fields.mac_style.get()
    }

    /// Smallest readable size in pixels.
    pub fn lowest_rec_ppem(&self) -> u16 {
        self.fields.lowest_rec_ppem.get()
    }

    pub fn font_direction_hint(&self) -> i16 {
        self.fields.font_direction_hint.get()
    }

    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub fn index_to_loc_format(&self) -> i16 {
        self.fields.index_to_loc_format.get()
    }

    /// `true` if the `loca` table uses 32-bit offsets.
    pub fn is_long_loca(&self) -> bool {
        self.index_to_loc_format() != 0
    }

    pub fn glyph_data_format(&self) -> i16 {
        self.fields.glyph_data_format.get()
    }
}
