//! Writes an [`Atlas`] as a C header for the e-paper display driver.
//!
//! The layout matches the driver's `GFXfont`, `GFXglyph` and
//! `UnicodeInterval` structures field for field.

use crate::{
    atlas::Atlas,
    error::{AtlasError, AtlasResult},
};
use std::io::{self, Write};

pub const DEFAULT_DRIVER_HEADER: &str = "epd_driver.h";

const BYTES_PER_LINE: usize = 16;

/// How a code point is shown in comments and log messages. Control
/// characters, non scalar values and the backslash (which would continue a
/// `//` comment onto the next line) are shown as hex.
pub fn display_code_point(code_point: u32) -> String {
    match char::from_u32(code_point) {
        Some(c) if !c.is_control() && c != '\\' => c.to_string(),
        _ => format!("<{code_point:#x}>"),
    }
}

/// Checks that `name` can be used as a prefix for C symbols.
pub fn validate_name(name: &str) -> AtlasResult<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(AtlasError::InvalidName(name.to_string()))
    }
}

pub fn write_header<W: Write>(
    out: &mut W,
    atlas: &Atlas,
    name: &str,
    driver_header: &str,
) -> AtlasResult<()> {
    validate_name(name)?;

    writeln!(out, "// UTF-8")?;
    writeln!(out, "#pragma once")?;
    writeln!(out, "#include \"{driver_header}\"")?;

    writeln!(
        out,
        "const uint8_t {name}Bitmaps[{}] = {{",
        atlas.bitmap.len()
    )?;
    for line in atlas.bitmap.chunks(BYTES_PER_LINE) {
        let bytes: Vec<_> = line.iter().map(|b| format!("0x{b:02X},")).collect();
        writeln!(out, "    {}", bytes.join(" "))?;
    }
    writeln!(out, "}};")?;

    writeln!(out, "const GFXglyph {name}Glyphs[] = {{")?;
    for g in &atlas.glyphs {
        writeln!(
            out,
            "    {{ {}, {}, {}, {}, {}, {}, {}}},// {}",
            g.width,
            g.height,
            g.advance_x,
            g.left,
            g.top,
            g.compressed_size,
            g.data_offset,
            display_code_point(g.code_point)
        )?;
    }
    writeln!(out, "}};")?;

    writeln!(out, "const UnicodeInterval {name}Intervals[] = {{")?;
    for indexed in atlas.plan.indexed() {
        writeln!(
            out,
            "    {{ 0x{:X}, 0x{:X}, 0x{:X} }},",
            indexed.interval.start, indexed.interval.end, indexed.offset
        )?;
    }
    writeln!(out, "}};")?;

    writeln!(out, "const GFXfont {name} = {{")?;
    writeln!(out, "    (uint8_t*){name}Bitmaps,")?;
    writeln!(out, "    (GFXglyph*){name}Glyphs,")?;
    writeln!(out, "    (UnicodeInterval*){name}Intervals,")?;
    writeln!(out, "    {},", atlas.plan.intervals().len())?;
    writeln!(out, "    {},", u8::from(atlas.compressed))?;
    writeln!(out, "    {},", atlas.metrics.line_height)?;
    writeln!(out, "    {},", atlas.metrics.ascender)?;
    writeln!(out, "    {},", atlas.metrics.descender)?;
    writeln!(out, "}};")?;

    Ok(())
}

/// Renders the whole header in memory, so a failure leaves nothing half
/// written.
pub fn render_header(atlas: &Atlas, name: &str, driver_header: &str) -> AtlasResult<String> {
    let mut out = Vec::new();
    write_header(&mut out, atlas, name, driver_header)?;
    String::from_utf8(out).map_err(|e| AtlasError::Io(io::Error::other(e)))
}
