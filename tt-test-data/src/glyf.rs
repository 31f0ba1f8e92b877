//! Encoders for `glyf` records.
//!
//! These write the same compressed representation font compilers produce:
//! short vectors where deltas fit in a byte, the "same" bit for zero deltas
//! and run-length encoded flags.

use crate::{be_buffer, bebuffer::BeBuffer};

const ON_CURVE: u8 = 0x01;
const X_SHORT: u8 = 0x02;
const Y_SHORT: u8 = 0x04;
const REPEAT: u8 = 0x08;
const X_SAME_OR_POSITIVE: u8 = 0x10;
const Y_SAME_OR_POSITIVE: u8 = 0x20;

/// A point as `(x, y, on_curve)` in font units.
pub type RawPoint = (i32, i32, bool);

/// Encodes a simple glyph with no instructions.
pub fn simple_glyph(contours: &[&[RawPoint]]) -> Vec<u8> {
    simple_glyph_with_instructions(contours, &[])
}

/// Encodes a simple glyph, embedding the given (opaque) instruction bytes.
pub fn simple_glyph_with_instructions(contours: &[&[RawPoint]], instructions: &[u8]) -> Vec<u8> {
    let points: Vec<RawPoint> = contours.iter().flat_map(|c| c.iter().copied()).collect();
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut buf = be_buffer! {
        (contours.len() as i16),
        (x_min as i16),
        (y_min as i16),
        (x_max as i16),
        (y_max as i16)
    };
    let mut end = 0u16;
    for contour in contours {
        end += contour.len() as u16;
        buf = buf.push(end - 1);
    }
    buf = buf
        .push(instructions.len() as u16)
        .extend_bytes(instructions);

    let mut flags = Vec::with_capacity(points.len());
    let mut x_bytes = BeBuffer::new();
    let mut y_bytes = BeBuffer::new();
    let (mut last_x, mut last_y) = (0, 0);
    for &(x, y, on_curve) in &points {
        let mut flag = if on_curve { ON_CURVE } else { 0 };
        let (x_flag, x_enc) = encode_delta(x - last_x, X_SHORT, X_SAME_OR_POSITIVE, x_bytes);
        let (y_flag, y_enc) = encode_delta(y - last_y, Y_SHORT, Y_SAME_OR_POSITIVE, y_bytes);
        flag |= x_flag | y_flag;
        x_bytes = x_enc;
        y_bytes = y_enc;
        flags.push(flag);
        last_x = x;
        last_y = y;
    }
    let mut data = buf.into_vec();
    data.extend(run_length_flags(&flags));
    data.extend_from_slice(&x_bytes);
    data.extend_from_slice(&y_bytes);
    data
}

fn encode_delta(delta: i32, short: u8, same_or_positive: u8, buf: BeBuffer) -> (u8, BeBuffer) {
    match delta {
        0 => (same_or_positive, buf),
        1..=255 => (short | same_or_positive, buf.push(delta as u8)),
        -255..=-1 => (short, buf.push((-delta) as u8)),
        _ => (0, buf.push(delta as i16)),
    }
}

fn run_length_flags(flags: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(flags.len());
    let mut i = 0;
    while i < flags.len() {
        let flag = flags[i];
        let run = flags[i..]
            .iter()
            .take(256)
            .take_while(|f| **f == flag)
            .count();
        if run > 1 {
            out.push(flag | REPEAT);
            out.push((run - 1) as u8);
        } else {
            out.push(flag);
        }
        i += run;
    }
    out
}

/// A composite glyph with a single component; only the header matters to
/// readers that reject composites.
pub fn composite_glyph(component: u16) -> Vec<u8> {
    be_buffer! {
        (-1i16),        // numberOfContours
        0i16, 0i16, 100i16, 100i16,
        0x0002u16,      // ARGS_ARE_XY_VALUES
        component,
        0u8, 0u8        // byte args
    }
    .into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_run_length_encoded() {
        assert_eq!(run_length_flags(&[1, 1, 1, 0, 1]), vec![1 | REPEAT, 2, 0, 1]);
        assert_eq!(run_length_flags(&[0x33; 300]).len(), 4);
    }

    #[test]
    fn triangle_layout() {
        let glyph = simple_glyph(&[&[(0, 0, true), (100, 0, true), (50, 300, true)]]);
        let expected = be_buffer! {
            1i16, 0i16, 0i16, 100i16, 300i16,
            2u16,   // end point
            0u16,   // no instructions
            // flags
            (ON_CURVE | X_SAME_OR_POSITIVE | Y_SAME_OR_POSITIVE),
            (ON_CURVE | X_SHORT | X_SAME_OR_POSITIVE | Y_SAME_OR_POSITIVE),
            (ON_CURVE | X_SHORT),
            // x deltas: +100, -50
            100u8, 50u8,
            // y delta: +300
            300i16
        };
        assert_eq!(glyph, expected.as_slice());
    }
}
