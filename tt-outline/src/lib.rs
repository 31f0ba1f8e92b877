//! Glyph outlines for TrueType fonts.
//!
//! This crate sits above the table parsing in [`tt-read`](raw) and turns a
//! character into something a renderer can draw:
//!
//! * [`Charmap`] selects a character mapping subtable and maps characters to
//!   glyph identifiers.
//! * [`Tessellator`] flattens the quadratic contours of a simple glyph into
//!   a [`TessellatedOutline`], a sequence of points per contour.
//! * [`draw`] instead emits the curves themselves to an [`OutlinePen`].
//! * [`GlyphOutliner`] does all of the above in one call.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use tt_outline::{raw::FontRef, GlyphOutliner};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontRef::new(&font_bytes).unwrap();
//! let outliner = GlyphOutliner::new(&font).unwrap();
//! let outline = outliner.outline_char('A', 64.0).unwrap();
//! for contour in outline.contours() {
//!     println!("{contour:?}");
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Expose our "raw" underlying parser crate.
pub extern crate tt_read as raw;

pub mod charmap;
pub mod metrics;
pub mod outline;
pub mod pen;

mod path;
mod tessellate;

pub use charmap::Charmap;
pub use outline::GlyphOutliner;
pub use path::draw;
pub use pen::{OutlinePen, PathElement, SvgPen};
pub use tessellate::{TessellatedOutline, Tessellator, DEFAULT_CURVE_SAMPLES};

/// Type for a glyph identifier.
pub type GlyphId = raw::types::GlyphId;

/// Type for a 4-byte tag used to identify font tables and other resources.
pub type Tag = raw::types::Tag;
