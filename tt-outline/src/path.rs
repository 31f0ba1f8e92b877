//! TrueType style outline to path conversion.

use raw::{tables::glyf::GlyphPoints, types::Point, ReadError};

use super::{pen::OutlinePen, tessellate::contour_start};

/// Converts a simple glyph outline to a sequence of path elements and invokes
/// the appropriate callback on the given pen for each.
///
/// Contours start at the same point chosen by the
/// [`Tessellator`](crate::Tessellator), and every point is multiplied by
/// `scale`. This is roughly equivalent to [`FT_Outline_Decompose`](https://freetype.org/freetype2/docs/reference/ft2-outline_processing.html#ft_outline_decompose).
pub fn draw(glyph: &GlyphPoints, scale: f32, pen: &mut impl OutlinePen) -> Result<(), ReadError> {
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
        let points: Vec<Point<f32>> = points
            .iter()
            .map(|p| p.map(|coord| coord as f32 * scale))
            .collect();
        let on_curve: Vec<bool> = glyph.flags[range]
            .iter()
            .map(|flag| flag.is_on_curve())
            .collect();
        let Some((start, walk)) = contour_start(&points, &on_curve) else {
            continue;
        };
        pen.move_to(start.x, start.y);
        let mut pending = None;
        for ix in walk {
            emit(&mut pending, points[ix], on_curve[ix], pen);
        }
        // end with an explicit on-curve
        if pending.is_some() {
            emit(&mut pending, start, true, pen);
        }
        pen.close();
    }
    Ok(())
}

fn emit(
    pending: &mut Option<Point<f32>>,
    point: Point<f32>,
    on_curve: bool,
    pen: &mut impl OutlinePen,
) {
    match (pending.take(), on_curve) {
        (None, true) => pen.line_to(point.x, point.y),
        (None, false) => *pending = Some(point),
        (Some(control), true) => pen.quad_to(control.x, control.y, point.x, point.y),
        (Some(control), false) => {
            let end = control.midpoint(point);
            pen.quad_to(control.x, control.y, end.x, end.y);
            *pending = Some(point);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use raw::{tables::glyf::SimpleGlyph, FontData, FontRead};
    use tt_test_data::glyf;

    use super::*;
    use crate::pen::{PathElement, SvgPen};

    fn glyph_points(contours: &[&[(i32, i32, bool)]]) -> GlyphPoints {
        let data = glyf::simple_glyph(contours);
        SimpleGlyph::read(FontData::new(&data))
            .unwrap()
            .points()
            .unwrap()
    }

    fn svg(glyph: &GlyphPoints, scale: f32) -> String {
        let mut pen = SvgPen::new();
        draw(glyph, scale, &mut pen).unwrap();
        pen.to_string()
    }

    #[test]
    fn lines_only() {
        let glyph = glyph_points(&[&[(0, 0, true), (600, 0, true), (300, 700, true)]]);
        assert_eq!(svg(&glyph, 1.0), "M0,0 L600,0 L300,700 Z");
    }

    #[test]
    fn scaled() {
        let glyph = glyph_points(&[&[(0, 0, true), (10, 0, true), (10, 20, true)]]);
        assert_eq!(svg(&glyph, 0.5), "M0,0 L5,0 L5,10 Z");
    }

    #[test]
    fn implied_on_curve_points() {
        let glyph = glyph_points(&[&[
            (0, 0, true),
            (100, 100, false),
            (300, 100, false),
            (400, 0, true),
        ]]);
        assert_eq!(
            svg(&glyph, 1.0),
            "M0,0 Q100,100 200,100 Q300,100 400,0 Z"
        );
    }

    #[test]
    fn trailing_off_curve_closes_with_quad() {
        let glyph = glyph_points(&[&[(0, 0, true), (100, 0, true), (50, 80, false)]]);
        assert_eq!(svg(&glyph, 1.0), "M0,0 L100,0 Q50,80 0,0 Z");
    }

    #[test]
    fn starts_at_last_on_curve() {
        let glyph = glyph_points(&[&[(50, 100, false), (100, 0, true), (0, 0, true)]]);
        assert_eq!(svg(&glyph, 1.0), "M0,0 Q50,100 100,0 Z");
    }

    #[test]
    fn all_off_curve() {
        let glyph = glyph_points(&[&[
            (300, 0, false),
            (600, 350, false),
            (300, 700, false),
            (0, 350, false),
        ]]);
        let mut elements: Vec<PathElement> = Vec::new();
        draw(&glyph, 1.0, &mut elements).unwrap();
        assert_eq!(
            elements,
            [
                PathElement::MoveTo { x: 150.0, y: 175.0 },
                PathElement::QuadTo {
                    cx0: 300.0,
                    cy0: 0.0,
                    x: 450.0,
                    y: 175.0
                },
                PathElement::QuadTo {
                    cx0: 600.0,
                    cy0: 350.0,
                    x: 450.0,
                    y: 525.0
                },
                PathElement::QuadTo {
                    cx0: 300.0,
                    cy0: 700.0,
                    x: 150.0,
                    y: 525.0
                },
                PathElement::QuadTo {
                    cx0: 0.0,
                    cy0: 350.0,
                    x: 150.0,
                    y: 175.0
                },
                PathElement::Close,
            ]
        );
    }

    #[test]
    fn one_subpath_per_contour() {
        let glyph = glyph_points(&[
            &[(0, 0, true), (10, 0, true), (10, 10, true)],
            &[(20, 0, true), (30, 0, true), (30, 10, true)],
        ]);
        assert_eq!(
            svg(&glyph, 1.0),
            "M0,0 L10,0 L10,10 Z M20,0 L30,0 L30,10 Z"
        );
    }
}
