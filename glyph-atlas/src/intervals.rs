use crate::error::{AtlasError, AtlasResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// An inclusive range of code points, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodepointInterval {
    pub start: u32,
    pub end: u32,
}

impl CodepointInterval {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn glyph_count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn code_points(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Code points included in every atlas unless a config file says otherwise.
pub const DEFAULT_INTERVALS: [CodepointInterval; 7] = [
    CodepointInterval::new(32, 126), // Basic Latin
    CodepointInterval::new(160, 255), // Latin-1 Supplement
    CodepointInterval::new(0x104, 0x107), // Ą ą Ć ć
    CodepointInterval::new(0x118, 0x119), // Ę ę
    CodepointInterval::new(0x141, 0x144), // Ł ł Ń ń
    CodepointInterval::new(0x15A, 0x15B), // Ś ś
    CodepointInterval::new(0x179, 0x17C), // Ź ź Ż ż
];

/// An interval together with the index of its first glyph in the glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedInterval {
    pub interval: CodepointInterval,
    pub offset: usize,
}

/// Ascending, non-overlapping list of intervals. Can only be built through
/// [`IntervalPlan::new`], which checks that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalPlan {
    intervals: Vec<CodepointInterval>,
}

impl IntervalPlan {
    pub fn new(intervals: Vec<CodepointInterval>) -> AtlasResult<Self> {
        if intervals.is_empty() {
            return Err(AtlasError::InvalidIntervals(
                "at least one interval is required".to_string(),
            ));
        }

        if let Some(bad) = intervals.iter().find(|i| i.start > i.end) {
            return Err(AtlasError::InvalidIntervals(format!(
                "interval {:#X}..={:#X} ends before it starts",
                bad.start, bad.end
            )));
        }

        if let Some(pair) = intervals.windows(2).find(|w| w[0].end >= w[1].start) {
            return Err(AtlasError::InvalidIntervals(format!(
                "interval {:#X}..={:#X} overlaps or follows {:#X}..={:#X}",
                pair[1].start, pair[1].end, pair[0].start, pair[0].end
            )));
        }

        Ok(Self { intervals })
    }

    pub fn intervals(&self) -> &[CodepointInterval] {
        &self.intervals
    }

    /// Every code point of every interval, in glyph table order.
    pub fn code_points(&self) -> impl Iterator<Item = u32> + '_ {
        self.intervals.iter().flat_map(CodepointInterval::code_points)
    }

    pub fn glyph_count(&self) -> usize {
        self.intervals.iter().map(CodepointInterval::glyph_count).sum()
    }

    pub fn indexed(&self) -> Vec<IndexedInterval> {
        self.intervals
            .iter()
            .scan(0, |offset, interval| {
                let indexed = IndexedInterval {
                    interval: *interval,
                    offset: *offset,
                };
                *offset += interval.glyph_count();
                Some(indexed)
            })
            .collect()
    }
}

impl Default for IntervalPlan {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS.to_vec(),
        }
    }
}
