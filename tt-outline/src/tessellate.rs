//! Flattening of quadratic contours into point sequences.

use std::ops::Range;

use raw::{tables::glyf::GlyphPoints, types::Point, ReadError};

/// Number of points sampled along each quadratic curve segment.
pub const DEFAULT_CURVE_SAMPLES: usize = 8;

/// Converts simple glyph outlines into polylines.
///
/// Each contour starts at its first on-curve point (FreeType convention, see
/// [`contour_start`]), emits on-curve points as they are, and replaces every
/// quadratic curve with `curve_samples` points evaluated at evenly spaced
/// parameters. Points implied between two consecutive off-curve points are
/// emitted as well. The segment closing the contour ends at the start point,
/// which is not repeated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tessellator {
    /// Factor applied to every emitted point.
    pub scale: f32,
    /// Number of interior samples per curve segment.
    pub curve_samples: usize,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self {
            scale: 1.0,
            curve_samples: DEFAULT_CURVE_SAMPLES,
        }
    }
}

impl Tessellator {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    pub fn with_curve_samples(self, curve_samples: usize) -> Self {
        Self {
            curve_samples,
            ..self
        }
    }

    /// Tessellates the glyph into a new outline.
    pub fn tessellate(&self, glyph: &GlyphPoints) -> Result<TessellatedOutline, ReadError> {
        let mut outline = TessellatedOutline::default();
        self.tessellate_into(glyph, &mut outline)?;
        Ok(outline)
    }

    /// Tessellates the glyph, replacing the contents of `outline`.
    ///
    /// This allows the point storage to be reused across glyphs.
    pub fn tessellate_into(
        &self,
        glyph: &GlyphPoints,
        outline: &mut TessellatedOutline,
    ) -> Result<(), ReadError> {
        outline.clear();
        if glyph.flags.len() != glyph.points.len() {
            return Err(ReadError::MalformedData(
                "glyph point and flag counts differ",
            ));
        }
        for range in glyph.contours() {
            let points = glyph
                .points
                .get(range.clone())
                .ok_or(ReadError::MalformedData("contour end point out of range"))?;
            let on_curve: Vec<bool> = glyph.flags[range]
                .iter()
                .map(|flag| flag.is_on_curve())
                .collect();
            let points: Vec<Point<f32>> = points
                .iter()
                .map(|p| p.map(|coord| coord as f32))
                .collect();
            self.tessellate_contour(&points, &on_curve, &mut outline.points);
            outline.contour_ends.push(outline.points.len());
        }
        log::trace!(
            "tessellated {} points into {}",
            glyph.len(),
            outline.points.len()
        );
        Ok(())
    }

    fn tessellate_contour(
        &self,
        points: &[Point<f32>],
        on_curve: &[bool],
        out: &mut Vec<Point<f32>>,
    ) {
        let Some((start, walk)) = contour_start(points, on_curve) else {
            return;
        };
        let scale = self.scale;
        out.push(start * scale);
        let mut prev = start;
        let mut walk = walk.peekable();
        while let Some(ix) = walk.next() {
            let current = points[ix];
            if on_curve[ix] {
                out.push(current * scale);
                prev = current;
                continue;
            }
            // the curve ends at the next on-curve point, which is implied
            // halfway to the next point if that is also off-curve
            let (end, implied) = match walk.peek() {
                Some(&next) if on_curve[next] => (points[next], false),
                Some(&next) => (current.midpoint(points[next]), true),
                None => (start, false),
            };
            let steps = (self.curve_samples + 1) as f32;
            for k in 1..=self.curve_samples {
                let t = k as f32 / steps;
                out.push(prev.quad_at(current, end, t) * scale);
            }
            if implied {
                out.push(end * scale);
                prev = end;
            }
        }
    }
}

/// Determines where a contour starts, and the indices of the points that
/// follow it.
///
/// The start is the first point if it is on-curve, otherwise the last point if
/// that is on-curve, otherwise the midpoint of the last and first points. The
/// returned indices never include the start point itself, and the contour is
/// closed by returning to it.
pub(crate) fn contour_start(
    points: &[Point<f32>],
    on_curve: &[bool],
) -> Option<(Point<f32>, Range<usize>)> {
    let first = *points.first()?;
    let last = *points.last()?;
    let len = points.len();
    Some(if on_curve[0] {
        (first, 1..len)
    } else if on_curve[len - 1] {
        (last, 0..len - 1)
    } else {
        (last.midpoint(first), 0..len)
    })
}

/// A flattened glyph outline.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TessellatedOutline {
    points: Vec<Point<f32>>,
    contour_ends: Vec<usize>,
}

impl TessellatedOutline {
    /// All points of all contours, in order.
    pub fn points(&self) -> &[Point<f32>] {
        &self.points
    }

    /// For each contour, the index one past its last point in
    /// [`points`](Self::points).
    pub fn contour_ends(&self) -> &[usize] {
        &self.contour_ends
    }

    /// Iterates over the points of each contour.
    pub fn contours(&self) -> impl Iterator<Item = &[Point<f32>]> + '_ {
        let mut start = 0;
        self.contour_ends.iter().map(move |&end| {
            let contour = &self.points[start..end];
            start = end;
            contour
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.contour_ends.clear();
    }
}
