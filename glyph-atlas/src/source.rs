use crate::{
    error::{AtlasError, AtlasResult},
    metrics::{F26Dot6, SizeMetrics},
};
use fontdue::{Font, FontSettings};
use log::debug;
use std::{fs, path::Path};

pub const DEFAULT_DPI: u32 = 150;

/// A glyph as it comes out of the rasterizer: one byte of coverage per pixel,
/// rows top to bottom with no padding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RasterizedGlyph {
    pub bitmap: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub advance_x: F26Dot6,
    pub bitmap_left: i32,
    pub bitmap_top: i32,
}

/// One entry of the fallback stack.
pub trait GlyphSource {
    /// Name used in log messages
    fn label(&self) -> &str;

    /// Whether the face maps `code_point` to a glyph other than `.notdef`
    fn has_glyph(&self, code_point: u32) -> bool;

    /// Renders `code_point` at the configured size, `None` if the face has no
    /// glyph for it
    fn rasterize(&self, code_point: u32) -> Option<RasterizedGlyph>;

    fn size_metrics(&self) -> SizeMetrics;
}

/// A TrueType/OpenType face rendered with fontdue at a fixed point size.
pub struct FontdueSource {
    label: String,
    font: Font,
    px: f32,
    size_metrics: SizeMetrics,
}

impl FontdueSource {
    pub fn load<P: AsRef<Path>>(path: P, points: u32, dpi: u32) -> AtlasResult<Self> {
        let path = path.as_ref();
        let load_err = |reason: String| AtlasError::SourceLoad {
            path: path.to_path_buf(),
            reason,
        };

        let data = fs::read(path).map_err(|e| load_err(e.to_string()))?;
        let label = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .into_owned();

        Self::from_bytes(label, &data, points, dpi).map_err(|e| match e {
            AtlasError::SourceLoad { reason, .. } => load_err(reason),
            other => other,
        })
    }

    pub fn from_bytes(label: String, data: &[u8], points: u32, dpi: u32) -> AtlasResult<Self> {
        let load_err = |reason: &str| AtlasError::SourceLoad {
            path: label.clone().into(),
            reason: reason.to_string(),
        };

        let px = points as f32 * dpi as f32 / 72.0;
        let settings = FontSettings {
            scale: px,
            ..Default::default()
        };
        let font = Font::from_bytes(data, settings).map_err(load_err)?;
        let line = font
            .horizontal_line_metrics(px)
            .ok_or_else(|| load_err("font has no horizontal line metrics"))?;

        let size_metrics = SizeMetrics {
            height: F26Dot6::from_px(line.new_line_size),
            ascender: F26Dot6::from_px(line.ascent),
            descender: F26Dot6::from_px(line.descent),
        };
        debug!("Loaded {label} at {points}pt / {dpi}dpi ({px}px): {size_metrics:?}");

        Ok(Self {
            label,
            font,
            px,
            size_metrics,
        })
    }

    fn glyph_index(&self, code_point: u32) -> Option<u16> {
        let c = char::from_u32(code_point)?;
        match self.font.lookup_glyph_index(c) {
            0 => None,
            index => Some(index),
        }
    }
}

impl GlyphSource for FontdueSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn has_glyph(&self, code_point: u32) -> bool {
        self.glyph_index(code_point).is_some()
    }

    fn rasterize(&self, code_point: u32) -> Option<RasterizedGlyph> {
        let index = self.glyph_index(code_point)?;
        let (metrics, bitmap) = self.font.rasterize_indexed(index, self.px);
        Some(RasterizedGlyph {
            bitmap,
            width: metrics.width,
            height: metrics.height,
            advance_x: F26Dot6::from_px(metrics.advance_width),
            bitmap_left: metrics.xmin,
            bitmap_top: metrics.ymin + metrics.height as i32,
        })
    }

    fn size_metrics(&self) -> SizeMetrics {
        self.size_metrics
    }
}
