//! test data shared between the tt-outline crates.
//!
//! Rather than checking binary fonts into the repository, everything here is
//! assembled from big-endian scalars at test time, so each fixture documents
//! its own layout.

pub mod bebuffer;
pub mod cmap;
pub mod font_builder;
pub mod glyf;
pub mod synthetic;

pub use bebuffer::BeBuffer;
pub use font_builder::FontBuilder;
pub use synthetic::SyntheticFont;
