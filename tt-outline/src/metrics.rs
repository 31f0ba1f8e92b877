//! Global font and glyph specific metrics.
//!
//! Metrics come in two flavors:
//!
//! * Global metrics: these are applicable to all glyphs in a font. The
//!   ascender, descender and line gap from the
//!   [hhea](https://learn.microsoft.com/en-us/typography/opentype/spec/hhea)
//!   table determine where the baseline sits and how far apart lines are.
//!
//! * Glyph metrics: these apply to single glyphs. For example, the advance
//!   width value describes the distance between two consecutive glyphs on a
//!   line.

use raw::{
    tables::{hhea::Hhea, hmtx::Hmtx},
    types::{BoundingBox, GlyphId},
    ReadError, TableProvider,
};

/// Metrics that apply to all glyphs in a font, in font units.
///
/// These are derived from the following tables:
/// * [head](https://learn.microsoft.com/en-us/typography/opentype/spec/head): `units_per_em`, `bounds`
/// * [hhea](https://learn.microsoft.com/en-us/typography/opentype/spec/hhea): `ascender`, `descender`,
///   `line_gap`, `max_advance`
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Metrics {
    /// Number of font design units per em unit.
    pub units_per_em: u16,
    /// Distance from the baseline to the top of the alignment box.
    pub ascender: i16,
    /// Distance from the baseline to the bottom of the alignment box.
    pub descender: i16,
    /// Recommended additional spacing between lines.
    pub line_gap: i16,
    /// Maximum advance width of all glyphs in the font.
    pub max_advance: u16,
    /// Union of all glyph bounding boxes.
    pub bounds: BoundingBox<i16>,
}

impl Metrics {
    /// Creates new metrics for the given font.
    pub fn new<'a>(font: &impl TableProvider<'a>) -> Result<Self, ReadError> {
        let head = font.head()?;
        let hhea = font.hhea()?;
        Ok(Self {
            units_per_em: head.units_per_em(),
            ascender: hhea.ascender(),
            descender: hhea.descender(),
            line_gap: hhea.line_gap(),
            max_advance: hhea.advance_width_max(),
            bounds: head.bounding_box(),
        })
    }

    /// The factor that maps the ascender to descender span onto `height`
    /// pixels.
    ///
    /// Returns 0.0 if the span is empty. See [`Hhea::scale_for_pixel_height`].
    pub fn scale_for_pixel_height(&self, height: f32) -> f32 {
        let extent = self.ascender as i32 - self.descender as i32;
        if extent == 0 {
            return 0.0;
        }
        height / extent as f32
    }
}

impl From<&Hhea<'_>> for Metrics {
    fn from(hhea: &Hhea<'_>) -> Self {
        Self {
            ascender: hhea.ascender(),
            descender: hhea.descender(),
            line_gap: hhea.line_gap(),
            max_advance: hhea.advance_width_max(),
            ..Default::default()
        }
    }
}

/// Glyph specific metrics, scaled by a fixed factor.
#[derive(Clone, Debug)]
pub struct GlyphMetrics<'a> {
    hmtx: Hmtx<'a>,
    scale: f32,
}

impl<'a> GlyphMetrics<'a> {
    /// Creates new glyph metrics from the given font, with all values
    /// multiplied by `scale`.
    pub fn new(font: &impl TableProvider<'a>, scale: f32) -> Result<Self, ReadError> {
        Ok(Self {
            hmtx: font.hmtx()?,
            scale,
        })
    }

    /// Returns the number of glyphs with metrics.
    pub fn glyph_count(&self) -> usize {
        self.hmtx.num_glyphs()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the advance width for the specified glyph.
    ///
    /// Returns `None` if the glyph has no metrics.
    pub fn advance_width(&self, glyph_id: GlyphId) -> Option<f32> {
        self.hmtx
            .advance(glyph_id)
            .map(|advance| advance as f32 * self.scale)
    }

    /// Returns the left side bearing for the specified glyph.
    pub fn left_side_bearing(&self, glyph_id: GlyphId) -> Option<f32> {
        self.hmtx
            .side_bearing(glyph_id)
            .map(|lsb| lsb as f32 * self.scale)
    }
}
