//! Print the tables and glyph outlines of a TrueType font.
//!
//! With no options, this lists the table directory.

use tt_outline::{raw::FontRef, GlyphOutliner};

mod print;

use print::Printer;

const DEFAULT_PIXEL_HEIGHT: f32 = 64.0;

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = flags::Args::from_env().map_err(Error::new)?;
    let bytes = std::fs::read(&args.input)
        .map_err(|e| Error(format!("failed to read {}: {e}", args.input.display())))?;
    let font = FontRef::new(&bytes).map_err(Error::new)?;
    log::debug!("loaded {} bytes from {}", bytes.len(), args.input.display());

    let printer = Printer::new();
    let nothing_selected = !args.list && !args.cmap && !args.metrics && args.char.is_none();
    if args.list || nothing_selected {
        printer.list_tables(&font);
    }
    if args.cmap {
        printer.cmap(&font).map_err(Error::new)?;
    }
    if args.metrics {
        printer.metrics(&font).map_err(Error::new)?;
    }
    if let Some(ch) = args.char.as_deref() {
        let ch = parse_char(ch)?;
        let pixel_height = args.size.unwrap_or(DEFAULT_PIXEL_HEIGHT);
        let outliner = GlyphOutliner::new(&font).map_err(Error::new)?;
        printer
            .outline(&outliner, ch, pixel_height)
            .map_err(Error::new)?;
    }
    Ok(())
}

/// Accepts either a single character or a `U+XXXX` codepoint.
fn parse_char(raw: &str) -> Result<char, Error> {
    let mut chars = raw.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(ch);
    }
    let hex = raw
        .strip_prefix("U+")
        .or_else(|| raw.strip_prefix("u+"))
        .ok_or_else(|| Error(format!("expected a character or U+XXXX, found '{raw}'")))?;
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| Error(format!("invalid codepoint '{raw}'")))
}

#[derive(Debug, Clone)]
struct Error(String);

impl Error {
    fn new(t: impl std::fmt::Display) -> Self {
        Self(t.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {}

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Inspect the tables and glyph outlines of a TrueType font
        cmd args
            {
                required input: PathBuf
                /// List the table directory with checksums
                optional -l, --list
                /// Print the character map encoding records
                optional -c, --cmap
                /// Print the horizontal header metrics
                optional -m, --metrics
                /// Print the tessellated outline of a character
                optional --char char: String
                /// Pixel height used for --char
                optional -s, --size size: f32
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chars() {
        assert_eq!(parse_char("A").unwrap(), 'A');
        assert_eq!(parse_char("é").unwrap(), 'é');
        assert_eq!(parse_char("U+0041").unwrap(), 'A');
        assert_eq!(parse_char("u+1F600").unwrap(), '\u{1F600}');
        assert!(parse_char("AB").is_err());
        assert!(parse_char("U+D800").is_err());
        assert!(parse_char("").is_err());
    }
}
