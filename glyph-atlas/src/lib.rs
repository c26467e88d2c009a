//! Builds the glyph atlas consumed by the e-paper display driver's `GFXfont`:
//! 4 bit anti-aliased bitmaps, per glyph metrics and a code point interval
//! index, resolved against a prioritized stack of fonts.

pub mod atlas;
pub mod compression;
pub mod config;
pub mod error;
pub mod header;
pub mod intervals;
pub mod metrics;
pub mod packing;
pub mod resolver;
pub mod source;

pub use atlas::{Atlas, AtlasOptions, GlyphRecord, assemble};
pub use config::AtlasConfig;
pub use error::{AtlasError, AtlasResult};
pub use header::{render_header, write_header};
pub use intervals::{CodepointInterval, IntervalPlan};
pub use source::{FontdueSource, GlyphSource, RasterizedGlyph};
