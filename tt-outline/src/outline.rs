//! Character to outline in one call.

use raw::{
    tables::{
        glyf::{Glyf, Glyph, GlyphPoints},
        hhea::Hhea,
        loca::Loca,
    },
    types::GlyphId,
    ReadError, TableProvider,
};

use crate::{
    charmap::Charmap,
    metrics::Metrics,
    path,
    pen::OutlinePen,
    tessellate::{TessellatedOutline, Tessellator, DEFAULT_CURVE_SAMPLES},
};

/// Produces tessellated outlines for the glyphs of a font.
///
/// All of the tables involved are resolved once, up front, so individual
/// lookups only fail on malformed glyph data.
#[derive(Clone, Debug)]
pub struct GlyphOutliner<'a> {
    charmap: Charmap<'a>,
    loca: Loca<'a>,
    glyf: Glyf<'a>,
    hhea: Hhea<'a>,
    curve_samples: usize,
}

impl<'a> GlyphOutliner<'a> {
    /// Creates a new outliner for the given font.
    ///
    /// Fails with [`ReadError::TableIsMissing`] if any of the `cmap`, `head`,
    /// `loca`, `glyf` or `hhea` tables is absent.
    pub fn new(font: &impl TableProvider<'a>) -> Result<Self, ReadError> {
        let charmap = Charmap::new(font)?;
        let loca = font.loca(None)?;
        let glyf = font.glyf()?;
        let hhea = font.hhea()?;
        log::debug!("outliner ready for {} glyphs", loca.len().saturating_sub(1));
        Ok(Self {
            charmap,
            loca,
            glyf,
            hhea,
            curve_samples: DEFAULT_CURVE_SAMPLES,
        })
    }

    /// Sets the number of points sampled along each curve segment.
    pub fn with_curve_samples(self, curve_samples: usize) -> Self {
        Self {
            curve_samples,
            ..self
        }
    }

    pub fn charmap(&self) -> &Charmap<'a> {
        &self.charmap
    }

    /// The global metrics from `hhea`.
    pub fn metrics(&self) -> Metrics {
        Metrics::from(&self.hhea)
    }

    /// See [`Hhea::scale_for_pixel_height`].
    pub fn scale_for_pixel_height(&self, height: f32) -> f32 {
        self.hhea.scale_for_pixel_height(height)
    }

    /// Returns the glyph record, or `None` if the glyph has no outline.
    pub fn glyph(&self, gid: GlyphId) -> Result<Option<Glyph<'a>>, ReadError> {
        self.loca.get_glyf(gid, &self.glyf)
    }

    /// Decodes the points of a simple glyph.
    ///
    /// Glyphs without an outline produce no points. Composite glyphs are not
    /// supported and fail with [`ReadError::CompositeGlyph`].
    pub fn glyph_points(&self, gid: GlyphId) -> Result<GlyphPoints, ReadError> {
        match self.glyph(gid)? {
            Some(glyph) => glyph.points(),
            None => Ok(GlyphPoints::default()),
        }
    }

    /// Tessellates the glyph with every point multiplied by `scale`.
    pub fn outline_glyph(&self, gid: GlyphId, scale: f32) -> Result<TessellatedOutline, ReadError> {
        let points = self.glyph_points(gid)?;
        log::trace!("outlining {gid} at scale {scale}");
        Tessellator::new(scale)
            .with_curve_samples(self.curve_samples)
            .tessellate(&points)
    }

    /// Tessellates the glyph for `ch`, scaled so that the ascender to
    /// descender span is `pixel_height` pixels.
    ///
    /// Unmapped characters produce the outline of the missing glyph.
    pub fn outline_char(
        &self,
        ch: char,
        pixel_height: f32,
    ) -> Result<TessellatedOutline, ReadError> {
        let gid = self.charmap.glyph_id_for(ch);
        self.outline_glyph(gid, self.scale_for_pixel_height(pixel_height))
    }

    /// Emits the curves of the glyph to `pen`, with every point multiplied by
    /// `scale`.
    pub fn draw_glyph(
        &self,
        gid: GlyphId,
        scale: f32,
        pen: &mut impl OutlinePen,
    ) -> Result<(), ReadError> {
        path::draw(&self.glyph_points(gid)?, scale, pen)
    }
}
