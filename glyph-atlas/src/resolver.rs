use crate::{
    error::{AtlasError, AtlasResult},
    header::display_code_point,
    source::{GlyphSource, RasterizedGlyph},
};
use log::info;

/// A glyph together with the index of the stack entry that rendered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub source_index: usize,
    /// Number of fallback notices logged before a source matched
    pub fallbacks: usize,
    pub glyph: RasterizedGlyph,
}

/// The notice logged when `skipped` has no glyph for `code_point` and the
/// entry at `skipped + 1` (if any) is tried next.
pub fn fallback_notice<S: GlyphSource>(stack: &[S], skipped: usize, code_point: u32) -> String {
    match stack.get(skipped + 1) {
        Some(next) => format!(
            "falling back to font {} ({}) for {}",
            skipped + 1,
            next.label(),
            display_code_point(code_point)
        ),
        None => format!(
            "no font left to fall back to after font {skipped} ({}) for {}",
            stack[skipped].label(),
            display_code_point(code_point)
        ),
    }
}

/// Finds the first source in `stack` that has a glyph for `code_point` and
/// renders it. Every source skipped on the way is logged, including the last
/// one when nothing matches.
pub fn resolve<S: GlyphSource>(stack: &[S], code_point: u32) -> AtlasResult<Resolved> {
    for (source_index, source) in stack.iter().enumerate() {
        if source.has_glyph(code_point) {
            if let Some(glyph) = source.rasterize(code_point) {
                return Ok(Resolved {
                    source_index,
                    fallbacks: source_index,
                    glyph,
                });
            }
        }

        info!("{}", fallback_notice(stack, source_index, code_point));
    }

    Err(AtlasError::UnresolvedCodepoint(code_point))
}
