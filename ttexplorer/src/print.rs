//! printing implementation

use ansi_term::{Color, Style};
use tt_outline::{
    metrics::Metrics,
    raw::{types::Tag, FontRef, ReadError, TableProvider},
    GlyphOutliner,
};

const HEAD: Tag = Tag::new(b"head");
// checksumAdjustment is skipped when checksumming head
const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

pub struct Printer {
    is_tty: bool,
}

impl Printer {
    pub fn new() -> Self {
        Printer {
            is_tty: atty::is(atty::Stream::Stdout),
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.is_tty {
            style
        } else {
            Style::default()
        }
    }

    fn heading(&self, text: &str) {
        println!("{}", self.style(Style::new().bold()).paint(text));
    }

    pub fn list_tables(&self, font: &FontRef) {
        let directory = font.table_directory();
        self.heading(&format!(
            "sfnt version 0x{:08X}, {} tables",
            directory.sfnt_version(),
            directory.num_tables()
        ));
        println!("Tag  Offset  Length  Checksum");
        println!("-------------------------------------");

        let offset_pad = get_offset_width(font);
        let bad = self.style(Color::Red.normal());
        for record in directory.table_records() {
            let status = match computed_checksum(font, record.tag()) {
                Ok(sum) if sum == record.checksum() => "ok".to_string(),
                Ok(sum) => bad.paint(format!("expected 0x{sum:08X}")).to_string(),
                Err(e) => bad.paint(e.to_string()).to_string(),
            };
            println!(
                "{0} 0x{1:02$X} {3:8} 0x{4:08X} {5}",
                record.tag(),
                record.offset(),
                offset_pad,
                record.length(),
                record.checksum(),
                status,
            );
        }
    }

    pub fn cmap(&self, font: &FontRef) -> Result<(), ReadError> {
        let cmap = font.cmap()?;
        self.heading(&format!(
            "cmap version {}, {} encoding records",
            cmap.version(),
            cmap.num_tables()
        ));
        println!("Platform    Encoding  Offset      Format");
        for record in cmap.encoding_records() {
            let format = match record.format(cmap.offset_data()) {
                Ok(format) => format.to_string(),
                Err(e) => self.style(Color::Red.normal()).paint(e.to_string()).to_string(),
            };
            println!(
                "{:<11} {:<9} 0x{:08X}  {}",
                format!("{:?}", record.platform_id()),
                record.encoding_id(),
                record.subtable_offset(),
                format
            );
        }
        Ok(())
    }

    pub fn metrics(&self, font: &FontRef) -> Result<(), ReadError> {
        let hhea = font.hhea()?;
        let metrics = Metrics::new(font)?;
        self.heading("hhea");
        println!("version                 {}", hhea.version());
        println!("unitsPerEm              {}", metrics.units_per_em);
        println!("ascender                {}", metrics.ascender);
        println!("descender               {}", metrics.descender);
        println!("lineGap                 {}", metrics.line_gap);
        println!("advanceWidthMax         {}", metrics.max_advance);
        println!("minLeftSideBearing      {}", hhea.min_left_side_bearing());
        println!("minRightSideBearing     {}", hhea.min_right_side_bearing());
        println!("xMaxExtent              {}", hhea.x_max_extent());
        println!("numberOfHMetrics        {}", hhea.number_of_long_metrics());
        let bounds = metrics.bounds;
        println!(
            "bounds                  ({}, {}) ({}, {})",
            bounds.x_min, bounds.y_min, bounds.x_max, bounds.y_max
        );
        Ok(())
    }

    pub fn outline(
        &self,
        outliner: &GlyphOutliner,
        ch: char,
        pixel_height: f32,
    ) -> Result<(), ReadError> {
        let gid = outliner.charmap().glyph_id_for(ch);
        let scale = outliner.scale_for_pixel_height(pixel_height);
        let outline = outliner.outline_char(ch, pixel_height)?;
        self.heading(&format!(
            "'{}' (U+{:04X}) -> {gid}, {} contours, {} points at {pixel_height}px (scale {scale})",
            ch.escape_default(),
            ch as u32,
            outline.contour_ends().len(),
            outline.len(),
        ));
        let dim = self.style(Color::Fixed(244).normal());
        for (i, contour) in outline.contours().enumerate() {
            println!("{}", dim.paint(format!("contour {i}")));
            for point in contour {
                println!("  {:.3} {:.3}", point.x, point.y);
            }
        }
        Ok(())
    }
}

fn computed_checksum(font: &FontRef, tag: Tag) -> Result<u32, ReadError> {
    let sum = font.compute_checksum(tag)?;
    if tag != HEAD {
        return Ok(sum);
    }
    let adjustment: u32 = font
        .checked_table_data(tag)?
        .read_at(CHECKSUM_ADJUSTMENT_OFFSET)?;
    Ok(sum.wrapping_sub(adjustment))
}

fn get_offset_width(font: &FontRef) -> usize {
    // pick how much padding we use for offsets based on the max offset in directory
    let max_off = font
        .table_directory()
        .table_records()
        .iter()
        .map(|rec| rec.offset())
        .max()
        .unwrap_or_default();
    hex_width(max_off)
}

fn hex_width(val: u32) -> usize {
    match val {
        0..=0xffff => 4usize,
        0x10000..=0xffff_ff => 6,
        0x1000000.. => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_widths() {
        assert_eq!(hex_width(0x1F0), 4);
        assert_eq!(hex_width(0x12345), 6);
        assert_eq!(hex_width(0x1234567), 8);
    }
}
