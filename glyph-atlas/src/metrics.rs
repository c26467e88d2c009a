//! Conversion of 26.6 fixed point rasterizer values into whole pixels.
//!
//! The driver clips using these numbers, so the rounding direction differs by
//! field: advances and the descender are floored, the line height and the
//! ascender are ceiled.

/// A 26.6 fixed point value: pixels multiplied by 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct F26Dot6(pub i32);

impl F26Dot6 {
    const ONE: i32 = 1 << 6;

    pub fn from_px(px: f32) -> Self {
        Self((px * Self::ONE as f32).round() as i32)
    }

    pub fn floor_px(self) -> i32 {
        self.0.div_euclid(Self::ONE)
    }

    pub fn ceil_px(self) -> i32 {
        self.floor_px() + i32::from(self.0.rem_euclid(Self::ONE) != 0)
    }
}

/// Font wide vertical metrics as reported by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeMetrics {
    pub height: F26Dot6,
    pub ascender: F26Dot6,
    pub descender: F26Dot6,
}

/// Font wide vertical metrics in whole pixels, as stored in the driver's font
/// descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetrics {
    pub line_height: i32,
    pub ascender: i32,
    pub descender: i32,
}

impl From<SizeMetrics> for FontMetrics {
    fn from(raw: SizeMetrics) -> Self {
        Self {
            line_height: raw.height.ceil_px(),
            ascender: raw.ascender.ceil_px(),
            descender: raw.descender.floor_px(),
        }
    }
}
