use crate::{
    compression::encode_glyph,
    error::{AtlasError, AtlasResult},
    intervals::IntervalPlan,
    metrics::FontMetrics,
    packing::pack_4bpp,
    resolver::resolve,
    source::{GlyphSource, RasterizedGlyph},
};
use log::{debug, info, trace};

/// Character whose owning face supplies the font wide metrics.
pub const DEFAULT_REFERENCE_CHAR: char = '|';

/// One entry of the driver's glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub width: u16,
    pub height: u16,
    pub advance_x: i16,
    pub left: i16,
    pub top: i16,
    /// Bytes this glyph occupies in the bitmap blob, compressed or not
    pub compressed_size: u32,
    /// Start of this glyph's bytes in the bitmap blob
    pub data_offset: u32,
    pub code_point: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtlasStats {
    /// Size of all glyphs after packing
    pub packed_bytes: usize,
    /// Size of the bitmap blob
    pub stored_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasOptions {
    pub compress: bool,
    pub reference_char: char,
}

impl Default for AtlasOptions {
    fn default() -> Self {
        Self {
            compress: false,
            reference_char: DEFAULT_REFERENCE_CHAR,
        }
    }
}

/// Everything the header needs, fully built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    pub glyphs: Vec<GlyphRecord>,
    pub bitmap: Vec<u8>,
    pub plan: IntervalPlan,
    pub compressed: bool,
    pub metrics: FontMetrics,
    pub stats: AtlasStats,
}

impl Atlas {
    /// The bytes of one glyph within the bitmap blob.
    pub fn glyph_data(&self, glyph: &GlyphRecord) -> &[u8] {
        let start = glyph.data_offset as usize;
        &self.bitmap[start..start + glyph.compressed_size as usize]
    }
}

struct AtlasBuilder {
    compress: bool,
    glyphs: Vec<GlyphRecord>,
    bitmap: Vec<u8>,
    packed_bytes: usize,
}

impl AtlasBuilder {
    fn new(compress: bool, glyph_count: usize) -> Self {
        Self {
            compress,
            glyphs: Vec::with_capacity(glyph_count),
            bitmap: Vec::new(),
            packed_bytes: 0,
        }
    }

    fn push(&mut self, code_point: u32, glyph: RasterizedGlyph) -> AtlasResult<()> {
        let packed = pack_4bpp(&glyph.bitmap, glyph.width);
        self.packed_bytes += packed.len();

        let stored = encode_glyph(packed, self.compress)
            .map_err(|source| AtlasError::Compression { code_point, source })?;

        let record = GlyphRecord {
            width: u16::try_from(glyph.width)?,
            height: u16::try_from(glyph.height)?,
            advance_x: i16::try_from(glyph.advance_x.floor_px())?,
            left: i16::try_from(glyph.bitmap_left)?,
            top: i16::try_from(glyph.bitmap_top)?,
            compressed_size: u32::try_from(stored.len())?,
            data_offset: u32::try_from(self.bitmap.len())?,
            code_point,
        };
        trace!("Encoded {record:?}");

        self.bitmap.extend_from_slice(&stored);
        self.glyphs.push(record);
        Ok(())
    }
}

/// Resolves, packs and (optionally) compresses every code point of `plan`
/// against the fallback `stack`.
///
/// Fails on the first code point no source can provide; nothing is returned
/// in that case.
pub fn assemble<S: GlyphSource>(
    stack: &[S],
    plan: &IntervalPlan,
    options: AtlasOptions,
) -> AtlasResult<Atlas> {
    let mut builder = AtlasBuilder::new(options.compress, plan.glyph_count());

    debug!(
        "Encoding {} glyphs in {} intervals",
        plan.glyph_count(),
        plan.intervals().len()
    );
    for code_point in plan.code_points() {
        let resolved = resolve(stack, code_point)?;
        builder.push(code_point, resolved.glyph)?;
    }

    let reference = resolve(stack, options.reference_char as u32)?;
    let metrics = FontMetrics::from(stack[reference.source_index].size_metrics());
    debug!(
        "Font metrics taken from {}: {metrics:?}",
        stack[reference.source_index].label()
    );

    let stats = AtlasStats {
        packed_bytes: builder.packed_bytes,
        stored_bytes: builder.bitmap.len(),
    };
    info!("total {}", stats.packed_bytes);
    info!("compressed {}", stats.stored_bytes);

    Ok(Atlas {
        glyphs: builder.glyphs,
        bitmap: builder.bitmap,
        plan: plan.clone(),
        compressed: options.compress,
        metrics,
        stats,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        compression::decompress,
        intervals::CodepointInterval,
        metrics::F26Dot6,
        packing::{pack_4bpp, packed_len},
        test::{FakeSource, initialize},
    };
    use more_asserts::*;

    const PIPE: u32 = '|' as u32;

    fn single(code_point: u32) -> IntervalPlan {
        IntervalPlan::new(vec![CodepointInterval::new(code_point, code_point)]).unwrap()
    }

    fn all_of(plan: &IntervalPlan) -> Vec<u32> {
        let mut cps: Vec<_> = plan.code_points().collect();
        cps.push(PIPE);
        cps
    }

    fn check_offsets(atlas: &Atlas) {
        assert_eq!(atlas.glyphs[0].data_offset, 0);
        for pair in atlas.glyphs.windows(2) {
            assert_eq!(
                pair[1].data_offset,
                pair[0].data_offset + pair[0].compressed_size
            );
            assert_lt!(pair[0].code_point, pair[1].code_point);
        }
        let last = atlas.glyphs.last().unwrap();
        assert_eq!(
            (last.data_offset + last.compressed_size) as usize,
            atlas.bitmap.len()
        );
    }

    #[test]
    fn test_single_glyph() {
        initialize();
        let font_a = FakeSource::new("a", &[65, PIPE], 1);
        let expected = font_a.rasterize(65).unwrap();

        let atlas = assemble(&[font_a], &single(65), AtlasOptions::default()).unwrap();

        assert_eq!(atlas.glyphs.len(), 1);
        let glyph = atlas.glyphs[0];
        assert_eq!(glyph.code_point, 65);
        assert_eq!(glyph.data_offset, 0);
        assert_eq!(glyph.width as usize, expected.width);
        assert_eq!(glyph.height as usize, expected.height);
        assert_eq!(glyph.advance_x as i32, expected.advance_x.floor_px());
        assert_eq!(glyph.left as i32, expected.bitmap_left);
        assert_eq!(glyph.top as i32, expected.bitmap_top);
        assert_eq!(
            atlas.bitmap.len(),
            packed_len(expected.width, expected.height)
        );
        assert_eq!(atlas.bitmap, pack_4bpp(&expected.bitmap, expected.width));
        assert_eq!(glyph.compressed_size as usize, atlas.bitmap.len());
        assert!(!atlas.compressed);
        assert_eq!(atlas.stats.packed_bytes, atlas.stats.stored_bytes);
    }

    #[test]
    fn test_offsets_and_counts() {
        initialize();
        let plan = IntervalPlan::default();
        let cps = all_of(&plan);
        let stack = [FakeSource::new("a", &cps, 3)];

        for compress in [false, true] {
            let options = AtlasOptions {
                compress,
                ..Default::default()
            };
            let atlas = assemble(&stack, &plan, options).unwrap();
            assert_eq!(atlas.glyphs.len(), plan.glyph_count());
            assert!(
                atlas
                    .glyphs
                    .iter()
                    .map(|g| g.code_point)
                    .eq(plan.code_points())
            );
            assert_eq!(atlas.compressed, compress);
            assert_eq!(atlas.stats.stored_bytes, atlas.bitmap.len());
            check_offsets(&atlas);

            let packed_total: usize = atlas
                .glyphs
                .iter()
                .map(|g| packed_len(g.width as usize, g.height as usize))
                .sum();
            assert_eq!(atlas.stats.packed_bytes, packed_total);
        }
    }

    #[test]
    fn test_compressed_glyphs_decode_alone() {
        initialize();
        let plan = IntervalPlan::new(vec![
            CodepointInterval::new(32, 126),
            CodepointInterval::new(0x104, 0x107),
        ])
        .unwrap();
        let cps = all_of(&plan);
        let stack = [FakeSource::new("a", &cps, 5)];
        let options = AtlasOptions {
            compress: true,
            ..Default::default()
        };
        let atlas = assemble(&stack, &plan, options).unwrap();
        check_offsets(&atlas);

        for glyph in &atlas.glyphs {
            let raster = stack[0].rasterize(glyph.code_point).unwrap();
            let packed = decompress(atlas.glyph_data(glyph)).unwrap();
            assert_eq!(packed, pack_4bpp(&raster.bitmap, raster.width));
        }
    }

    #[test]
    fn test_fallback_metrics() {
        initialize();
        let font_a = FakeSource::new("a", &[65, PIPE], 1);
        let font_b = FakeSource::new("b", &[65, 0x104], 9);
        let expected = font_b.rasterize(0x104).unwrap();

        let plan = IntervalPlan::new(vec![
            CodepointInterval::new(65, 65),
            CodepointInterval::new(0x104, 0x104),
        ])
        .unwrap();
        let atlas = assemble(&[font_a, font_b], &plan, AtlasOptions::default()).unwrap();

        let glyph = atlas.glyphs[1];
        assert_eq!(glyph.code_point, 0x104);
        assert_eq!(glyph.width as usize, expected.width);
        assert_eq!(glyph.left as i32, expected.bitmap_left);
        assert_eq!(glyph.top as i32, expected.bitmap_top);
        assert_eq!(glyph.advance_x as i32, expected.advance_x.floor_px());
    }

    #[test]
    fn test_font_metrics_from_reference_face() {
        initialize();
        let font_a = FakeSource::new("a", &[65], 1);
        let font_b = FakeSource::new("b", &[PIPE], 2);
        let expected = FontMetrics::from(font_b.size_metrics());
        assert_ne!(expected, FontMetrics::from(font_a.size_metrics()));

        let atlas = assemble(&[font_a, font_b], &single(65), AtlasOptions::default()).unwrap();
        assert_eq!(atlas.metrics, expected);
    }

    #[test]
    fn test_custom_reference_char() {
        initialize();
        let font_a = FakeSource::new("a", &[65, PIPE], 1);
        let font_b = FakeSource::new("b", &['H' as u32], 2);
        let expected = FontMetrics::from(font_b.size_metrics());

        let options = AtlasOptions {
            reference_char: 'H',
            ..Default::default()
        };
        let atlas = assemble(&[font_a, font_b], &single(65), options).unwrap();
        assert_eq!(atlas.metrics, expected);
    }

    #[test]
    fn test_unresolved_aborts() {
        initialize();
        let font_a = FakeSource::new("a", &[65, PIPE], 1);
        let font_b = FakeSource::new("b", &[66], 2);
        let plan = IntervalPlan::new(vec![
            CodepointInterval::new(65, 66),
            CodepointInterval::new(160, 160),
        ])
        .unwrap();

        let res = assemble(&[font_a, font_b], &plan, AtlasOptions::default());
        assert!(matches!(res, Err(AtlasError::UnresolvedCodepoint(160))));
    }

    #[test]
    fn test_missing_reference_char() {
        initialize();
        let font_a = FakeSource::new("a", &[65], 1);
        let res = assemble(&[font_a], &single(65), AtlasOptions::default());
        assert!(matches!(res, Err(AtlasError::UnresolvedCodepoint(PIPE))));
    }

    #[test]
    fn test_oversized_glyph() {
        initialize();
        let mut font_a = FakeSource::new("a", &[65, PIPE], 1);
        font_a.set_advance(65, F26Dot6(64 * 40_000));
        let res = assemble(&[font_a], &single(65), AtlasOptions::default());
        assert!(matches!(res, Err(AtlasError::Overflow(_))));
    }
}
