//! Types for collecting the output when drawing a glyph outline.

use std::fmt::Write;

/// Interface for accepting a sequence of path commands.
///
/// TrueType outlines are made of lines and quadratic curves only.
pub trait OutlinePen {
    /// Emit a command to begin a new subpath at (x, y).
    fn move_to(&mut self, x: f32, y: f32);

    /// Emit a line segment from the current point to (x, y).
    fn line_to(&mut self, x: f32, y: f32);

    /// Emit a quadratic bezier segment from the current point with a control
    /// point at (cx0, cy0) and ending at (x, y).
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32);

    /// Emit a command to close the current subpath.
    fn close(&mut self);
}

/// Single element of a path.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathElement {
    /// Begin a new subpath at (x, y).
    MoveTo { x: f32, y: f32 },
    /// Draw a line from the current point to (x, y).
    LineTo { x: f32, y: f32 },
    /// Draw a quadratic bezier from the current point with a control point at
    /// (cx0, cy0) and ending at (x, y).
    QuadTo { cx0: f32, cy0: f32, x: f32, y: f32 },
    /// Close the current subpath.
    Close,
}

impl OutlinePen for Vec<PathElement> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push(PathElement::MoveTo { x, y })
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(PathElement::LineTo { x, y })
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.push(PathElement::QuadTo { cx0, cy0, x, y })
    }

    fn close(&mut self) {
        self.push(PathElement::Close)
    }
}

/// Pen that generates SVG style path data.
#[derive(Clone, Default, Debug)]
pub struct SvgPen {
    path: String,
    precision: Option<usize>,
}

impl SvgPen {
    /// Creates a new SVG pen that formats floating point values with the
    /// standard behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new SVG pen with the given precision (the number of digits
    /// that will be printed after the decimal).
    pub fn with_precision(precision: usize) -> Self {
        Self {
            path: String::new(),
            precision: Some(precision),
        }
    }

    /// Clears the content of the internal string.
    pub fn clear(&mut self) {
        self.path.clear();
    }

    fn push_command(&mut self, command: char, coords: &[f32]) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        self.path.push(command);
        for (i, pair) in coords.chunks(2).enumerate() {
            if i > 0 {
                self.path.push(' ');
            }
            let (x, y) = (pair[0], pair.get(1).copied().unwrap_or_default());
            // writing to a String cannot fail
            let _ = match self.precision {
                Some(prec) => write!(self.path, "{x:.0$},{y:.0$}", prec),
                None => write!(self.path, "{x},{y}"),
            };
        }
    }
}

impl std::ops::Deref for SvgPen {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.path.as_str()
    }
}

impl OutlinePen for SvgPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push_command('M', &[x, y]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push_command('L', &[x, y]);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.push_command('Q', &[cx0, cy0, x, y]);
    }

    fn close(&mut self) {
        self.push_command('Z', &[]);
    }
}

impl AsRef<str> for SvgPen {
    fn as_ref(&self) -> &str {
        self.path.as_ref()
    }
}
