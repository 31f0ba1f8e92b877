//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use std::ops::Range;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use tt_types::{BigEndian, BoundingBox, FixedSize, Point, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table
///
/// This table has no header; glyph records are located with the
/// [`loca`](super::loca) table.
#[derive(Clone, Copy, Debug)]
pub struct Glyf<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Glyf<'_> {
    const TAG: Tag = Tag::new(b"glyf");
}

impl<'a> FontRead<'a> for Glyf<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Glyf { data })
    }
}

impl<'a> Glyf<'a> {
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// The header shared by simple and composite glyphs.
#[derive(Clone, Copy, Debug, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct GlyphHeader {
    /// If the number of contours is greater than or equal to zero,
    /// this is a simple glyph. If negative, this is a composite glyph.
    pub number_of_contours: BigEndian<i16>,
    pub x_min: BigEndian<i16>,
    pub y_min: BigEndian<i16>,
    pub x_max: BigEndian<i16>,
    pub y_max: BigEndian<i16>,
}

impl FixedSize for GlyphHeader {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl GlyphHeader {
    pub fn bounding_box(&self) -> BoundingBox<i16> {
        BoundingBox {
            x_min: self.x_min.get(),
            y_min: self.y_min.get(),
            x_max: self.x_max.get(),
            y_max: self.y_max.get(),
        }
    }
}

/// A glyph record.
#[derive(Clone, Debug)]
pub enum Glyph<'a> {
    Simple(SimpleGlyph<'a>),
    /// Recognized so that it can be reported; composite outlines are not
    /// decoded.
    Composite(CompositeGlyph<'a>),
}

impl<'a> FontRead<'a> for Glyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let number_of_contours: i16 = data.read_at(0)?;
        if number_of_contours >= 0 {
            SimpleGlyph::read(data).map(Glyph::Simple)
        } else {
            CompositeGlyph::read(data).map(Glyph::Composite)
        }
    }
}

impl<'a> Glyph<'a> {
    pub fn header(&self) -> &'a GlyphHeader {
        match self {
            Self::Simple(glyph) => glyph.header,
            Self::Composite(glyph) => glyph.header,
        }
    }

    pub fn number_of_contours(&self) -> i16 {
        self.header().number_of_contours.get()
    }

    pub fn bounding_box(&self) -> BoundingBox<i16> {
        self.header().bounding_box()
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    /// Returns the simple glyph, or [`ReadError::CompositeGlyph`].
    pub fn as_simple(&self) -> Result<&SimpleGlyph<'a>, ReadError> {
        match self {
            Self::Simple(glyph) => Ok(glyph),
            Self::Composite(_) => Err(ReadError::CompositeGlyph),
        }
    }

    /// Decodes the outline points of a simple glyph.
    pub fn points(&self) -> Result<GlyphPoints, ReadError> {
        self.as_simple()?.points()
    }
}

/// A glyph defined by its own contours.
#[derive(Clone)]
pub struct SimpleGlyph<'a> {
    header: &'a GlyphHeader,
    end_pts_of_contours: &'a [BigEndian<u16>],
    instructions: &'a [u8],
    glyph_data: &'a [u8],
}

impl<'a> FontRead<'a> for SimpleGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let header: &GlyphHeader = data.read_ref_at(0)?;
        let number_of_contours = header.number_of_contours.get();
        if number_of_contours < 0 {
            return Err(ReadError::CompositeGlyph);
        }
        let mut cursor = data.cursor();
        cursor.advance::<GlyphHeader>();
        let end_pts_of_contours: &[BigEndian<u16>] =
            cursor.read_array(number_of_contours as usize)?;
        let instruction_length: u16 = cursor.read()?;
        let instructions = cursor.read_array(instruction_length as usize)?;
        let glyph_data = cursor
            .remaining()
            .ok_or(ReadError::OutOfBounds)?
            .as_bytes();
        if end_pts_of_contours
            .windows(2)
            .any(|pair| pair[0].get() >= pair[1].get())
        {
            return Err(ReadError::MalformedData(
                "contour end points are not strictly increasing",
            ));
        }
        Ok(SimpleGlyph {
            header,
            end_pts_of_contours,
            instructions,
            glyph_data,
        })
    }
}

impl<'a> SimpleGlyph<'a> {
    pub fn number_of_contours(&self) -> i16 {
        self.header.number_of_contours.get()
    }

    pub fn bounding_box(&self) -> BoundingBox<i16> {
        self.header.bounding_box()
    }

    /// Array of point indices for the last point of each contour,
    /// in increasing numeric order.
    pub fn end_pts_of_contours(&self) -> &'a [BigEndian<u16>] {
        self.end_pts_of_contours
    }

    /// Total number of bytes for instructions.
    pub fn instruction_length(&self) -> u16 {
        self.instructions.len() as u16
    }

    /// The hinting instructions; these are not interpreted.
    pub fn instructions(&self) -> &'a [u8] {
        self.instructions
    }

    /// The packed flags and coordinates that follow the instructions.
    pub fn glyph_data(&self) -> &'a [u8] {
        self.glyph_data
    }

    /// Returns the total number of points.
    pub fn num_points(&self) -> usize {
        self.end_pts_of_contours
            .last()
            .map(|last| last.get() as usize + 1)
            .unwrap_or(0)
    }

    /// Decodes the flags and absolute coordinates of every point.
    pub fn points(&self) -> Result<GlyphPoints, ReadError> {
        let n_points = self.num_points();
        let mut cursor = FontData::new(self.glyph_data).cursor();
        let mut flags = Vec::with_capacity(n_points);
        while flags.len() < n_points {
            let flag = SimpleGlyphFlags::from_bits(cursor.read::<u8>()?);
            let mut count = 1;
            if flag.repeat() {
                let repeat = cursor.read::<u8>()? as usize;
                let remaining = n_points - flags.len() - 1;
                if repeat > remaining {
                    log::warn!("repeat count {repeat} exceeds the {remaining} remaining points");
                }
                count += repeat.min(remaining);
            }
            flags.extend(std::iter::repeat(flag).take(count));
        }
        let mut points = vec![Point::default(); n_points];
        let mut x = 0i32;
        for (flag, point) in flags.iter().zip(points.iter_mut()) {
            let delta =
                read_coordinate_delta(&mut cursor, flag.x_short(), flag.x_same_or_positive())?;
            x = x.wrapping_add(delta);
            point.x = x;
        }
        let mut y = 0i32;
        for (flag, point) in flags.iter().zip(points.iter_mut()) {
            let delta =
                read_coordinate_delta(&mut cursor, flag.y_short(), flag.y_same_or_positive())?;
            y = y.wrapping_add(delta);
            point.y = y;
        }
        log::trace!(
            "decoded {n_points} points in {} contours",
            self.end_pts_of_contours.len()
        );
        Ok(GlyphPoints {
            end_pts_of_contours: self.end_pts_of_contours.iter().map(|end| end.get()).collect(),
            flags,
            points,
        })
    }
}

fn read_coordinate_delta(
    cursor: &mut crate::font_data::Cursor,
    short: bool,
    same_or_positive: bool,
) -> Result<i32, ReadError> {
    Ok(match (short, same_or_positive) {
        (true, true) => cursor.read::<u8>()? as i32,
        (true, false) => -(cursor.read::<u8>()? as i32),
        (false, true) => 0,
        (false, false) => cursor.read::<i16>()? as i32,
    })
}

impl std::fmt::Debug for SimpleGlyph<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleGlyph")
            .field("header", self.header)
            .field("end_pts_of_contours", &self.end_pts_of_contours)
            .field("instruction_length", &self.instructions.len())
            .finish()
    }
}

/// A glyph assembled from other glyphs.
#[derive(Clone, Debug)]
pub struct CompositeGlyph<'a> {
    header: &'a GlyphHeader,
    component_data: &'a [u8],
}

impl<'a> FontRead<'a> for CompositeGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let header = data.read_ref_at(0)?;
        let component_data = data
            .split_off(GlyphHeader::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?
            .as_bytes();
        Ok(CompositeGlyph {
            header,
            component_data,
        })
    }
}

impl<'a> CompositeGlyph<'a> {
    pub fn bounding_box(&self) -> BoundingBox<i16> {
        self.header.bounding_box()
    }

    /// The undecoded component records.
    pub fn component_data(&self) -> &'a [u8] {
        self.component_data
    }
}

/// Flags describing a point of a simple glyph.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/glyf#simple-glyph-description>
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleGlyphFlags(u8);

impl SimpleGlyphFlags {
    /// Bit 0: If set, the point is on the curve; otherwise, it is off the curve.
    pub const ON_CURVE_POINT: u8 = 0x01;
    /// Bit 1: If set, the corresponding x-coordinate is 1 byte long,
    /// and the sign is determined by `X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR`.
    pub const X_SHORT_VECTOR: u8 = 0x02;
    /// Bit 2: If set, the corresponding y-coordinate is 1 byte long.
    pub const Y_SHORT_VECTOR: u8 = 0x04;
    /// Bit 3: If set, the next byte specifies the number of additional
    /// times this flag byte is to be repeated in the logical flags array.
    pub const REPEAT_FLAG: u8 = 0x08;
    /// Bit 4: positive short x vector, or x-coordinate same as previous.
    pub const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: u8 = 0x10;
    /// Bit 5: positive short y vector, or y-coordinate same as previous.
    pub const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: u8 = 0x20;
    /// Bit 6: If set, contours in the glyph description may overlap.
    pub const OVERLAP_SIMPLE: u8 = 0x40;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    pub const fn is_on_curve(self) -> bool {
        self.contains(Self::ON_CURVE_POINT)
    }

    pub const fn x_short(self) -> bool {
        self.contains(Self::X_SHORT_VECTOR)
    }

    pub const fn y_short(self) -> bool {
        self.contains(Self::Y_SHORT_VECTOR)
    }

    pub const fn repeat(self) -> bool {
        self.contains(Self::REPEAT_FLAG)
    }

    pub const fn x_same_or_positive(self) -> bool {
        self.contains(Self::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR)
    }

    pub const fn y_same_or_positive(self) -> bool {
        self.contains(Self::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR)
    }

    pub const fn overlap_simple(self) -> bool {
        self.contains(Self::OVERLAP_SIMPLE)
    }
}

impl std::fmt::Debug for SimpleGlyphFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimpleGlyphFlags({:#04x}", self.0)?;
        if self.is_on_curve() {
            write!(f, ", on-curve")?;
        }
        write!(f, ")")
    }
}

/// The decoded points of a simple glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphPoints {
    /// Index of the last point of each contour.
    pub end_pts_of_contours: Vec<u16>,
    /// Expanded flags, one per point.
    pub flags: Vec<SimpleGlyphFlags>,
    /// Absolute coordinates in font units.
    pub points: Vec<Point<i32>>,
}

impl GlyphPoints {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The range of point indices that make up each contour.
    pub fn contours(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let mut start = 0;
        self.end_pts_of_contours.iter().map(move |end| {
            let end = *end as usize + 1;
            let range = start..end;
            start = end;
            range
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tt_test_data::{be_buffer, glyf};

    use super::*;

    fn read_simple(data: &[u8]) -> GlyphPoints {
        SimpleGlyph::read(FontData::new(data))
            .unwrap()
            .points()
            .unwrap()
    }

    #[test]
    fn triangle() {
        let data = glyf::simple_glyph(&[&[(0, 0, true), (100, 0, true), (50, 300, true)]]);
        let glyph = Glyph::read(FontData::new(&data)).unwrap();
        assert_eq!(glyph.number_of_contours(), 1);
        assert_eq!(
            glyph.bounding_box(),
            BoundingBox {
                x_min: 0,
                y_min: 0,
                x_max: 100,
                y_max: 300
            }
        );
        let points = glyph.points().unwrap();
        assert_eq!(points.end_pts_of_contours, vec![2]);
        assert!(points.flags.iter().all(|f| f.is_on_curve()));
        assert_eq!(
            points.points,
            vec![Point::new(0, 0), Point::new(100, 0), Point::new(50, 300)]
        );
    }

    #[test]
    fn coordinates_accumulate_across_contours() {
        let contours: [&[(i32, i32, bool)]; 2] = [
            &[(-300, 20, true), (-300, 20, false), (1000, -1000, true)],
            &[(5, 5, false), (260, -250, true), (0, 0, true), (0, 700, false)],
        ];
        let data = glyf::simple_glyph(&contours);
        let points = read_simple(&data);
        assert_eq!(points.end_pts_of_contours, vec![2, 6]);
        let expected: Vec<_> = contours
            .iter()
            .flat_map(|c| c.iter())
            .map(|(x, y, _)| Point::new(*x, *y))
            .collect();
        assert_eq!(points.points, expected);
        let on_curve: Vec<_> = points.flags.iter().map(|f| f.is_on_curve()).collect();
        assert_eq!(on_curve, [true, false, true, false, true, true, false]);
        assert_eq!(points.contours().collect::<Vec<_>>(), vec![0..3, 3..7]);
    }

    #[test]
    fn coordinate_sub_codes() {
        let data = be_buffer! {
            1i16, 0i16, 0i16, 0i16, 0i16,
            3u16,               // four points
            0u16,               // no instructions
            0x37u8,             // on curve, x +u8, y +u8
            0x03u8,             // on curve, x -u8, y i16
            0x14u8,             // x same, y -u8
            0x20u8,             // x i16, y same
            10u8, 4u8, 300i16,
            5u8, (-1000i16), 7u8
        };
        let points = read_simple(&data);
        assert_eq!(
            points.points,
            vec![
                Point::new(10, 5),
                Point::new(6, -995),
                Point::new(6, -1002),
                Point::new(306, -1002),
            ]
        );
    }

    #[test]
    fn repeated_flags() {
        let data = be_buffer! {
            1i16, 0i16, 0i16, 0i16, 0i16,
            4u16,
            0u16,
            // one flag repeated four more times: on curve, x and y unchanged
            0x39u8, 4u8
        };
        let points = read_simple(&data);
        assert_eq!(points.flags.len(), 5);
        assert!(points.flags.iter().all(|f| f.bits() == 0x39));
        assert_eq!(points.points, vec![Point::new(0, 0); 5]);
    }

    #[test]
    fn repeat_count_is_clamped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let data = be_buffer! {
            1i16, 0i16, 0i16, 0i16, 0i16,
            2u16,
            0u16,
            0x39u8, 200u8,
            // never reached as flags
            0x02u8, 9u8
        };
        let glyph = SimpleGlyph::read(FontData::new(&data)).unwrap();
        let points = glyph.points().unwrap();
        assert_eq!(points.flags.len(), 3);
        assert_eq!(points.points, vec![Point::new(0, 0); 3]);
    }

    #[test]
    fn instructions_are_opaque() {
        let data = glyf::simple_glyph_with_instructions(
            &[&[(0, 0, true), (10, 0, true), (10, 10, true)]],
            &[0xB0, 0x01, 0x2F],
        );
        let glyph = SimpleGlyph::read(FontData::new(&data)).unwrap();
        assert_eq!(glyph.instruction_length(), 3);
        assert_eq!(glyph.instructions(), &[0xB0, 0x01, 0x2F]);
        assert_eq!(glyph.points().unwrap().len(), 3);
    }

    #[test]
    fn composite_is_recognized_not_outlined() {
        let data = glyf::composite_glyph(2);
        let glyph = Glyph::read(FontData::new(&data)).unwrap();
        assert!(glyph.is_composite());
        assert_eq!(glyph.number_of_contours(), -1);
        assert_eq!(glyph.points(), Err(ReadError::CompositeGlyph));
        assert!(matches!(
            SimpleGlyph::read(FontData::new(&data)),
            Err(ReadError::CompositeGlyph)
        ));
    }

    #[test]
    fn contour_ends_must_increase() {
        let data = be_buffer! {
            2i16, 0i16, 0i16, 0i16, 0i16,
            [3u16, 3u16],
            0u16,
            [0x31u8, 0x31, 0x31, 0x31]
        };
        assert!(matches!(
            SimpleGlyph::read(FontData::new(&data)),
            Err(ReadError::MalformedData(_))
        ));
    }

    #[test]
    fn truncated_coordinates() {
        let data = glyf::simple_glyph(&[&[(0, 0, true), (1000, 0, true), (500, 700, true)]]);
        let glyph = SimpleGlyph::read(FontData::new(&data[..data.len() - 1])).unwrap();
        assert_eq!(glyph.points(), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn truncated_header() {
        let data = be_buffer! { 1i16, 0i16 };
        assert!(matches!(
            Glyph::read(FontData::new(&data)),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn zero_contours() {
        let data = be_buffer! { 0i16, 0i16, 0i16, 0i16, 0i16, 0u16 };
        let points = read_simple(&data);
        assert!(points.is_empty());
        assert_eq!(points.contours().count(), 0);
    }

    #[test]
    fn flag_accessors() {
        let flags = SimpleGlyphFlags::from_bits(0x7F);
        assert!(flags.is_on_curve());
        assert!(flags.x_short() && flags.y_short());
        assert!(flags.repeat());
        assert!(flags.x_same_or_positive() && flags.y_same_or_positive());
        assert!(flags.overlap_simple());
        let flags = SimpleGlyphFlags::from_bits(0x00);
        assert!(!flags.is_on_curve() && !flags.repeat() && !flags.overlap_simple());
    }
}
