//! Turns a container width into per-score placement.
//!
//! Placement, indicator height and hit-testing all derive from the same two
//! numbers: the spacing-adjusted `step_width` and the start of each segment.
//! A ranked score owns the horizontal slot `[offset, offset + step_width)`.
//! Segment gaps are split at their midpoint between the neighbouring scores.

use crate::config::PickerConfig;
use crate::score::{Score, ScoreRange, Segment, RANKED_SCORE_COUNT, SEGMENT_COUNT};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

/// `max(0, (width - spacing * (segments - 1)) / scores)`.
pub fn step_width(width: f32, segment_spacing: f32) -> f32 {
    let total_spacing = segment_spacing * (SEGMENT_COUNT - 1) as f32;
    let step = (width - total_spacing) / RANKED_SCORE_COUNT as f32;
    if step.is_finite() {
        step.max(0.0)
    } else {
        0.0
    }
}

/// Horizontal extent and end heights of one segment background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentFrame {
    pub x: f32,
    pub width: f32,
    pub left_height: f32,
    pub right_height: f32,
}

#[derive(Debug, Clone)]
pub struct LayoutEngine {
    segment_spacing: f32,
    slope: f32,
    width: f32,
    step_width: f32,
}

impl LayoutEngine {
    pub fn new(config: &PickerConfig) -> Self {
        Self {
            segment_spacing: config.segment_spacing.max(0.0),
            slope: config.opening_slope(),
            width: 0.0,
            step_width: 0.0,
        }
    }

    pub fn with_width(config: &PickerConfig, width: f32) -> Self {
        let mut engine = Self::new(config);
        engine.resize(width);
        engine
    }

    /// Recomputes the step width. Returns `false` when the width is unchanged.
    pub fn resize(&mut self, width: f32) -> bool {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if width == self.width {
            return false;
        }
        self.width = width;
        self.step_width = step_width(width, self.segment_spacing);
        debug!(width, step_width = self.step_width, "layout recomputed");
        true
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn step_width(&self) -> f32 {
        self.step_width
    }

    pub fn segment_spacing(&self) -> f32 {
        self.segment_spacing
    }

    /// A zero step width means the container has not been measured yet.
    pub fn is_established(&self) -> bool {
        self.step_width > 0.0
    }

    /// Left edge of a segment background.
    pub fn segment_start(&self, segment: Segment) -> f32 {
        segment.scores_before() as f32 * self.step_width
            + self.segment_spacing * segment.index() as f32
    }

    pub fn segment_frame(&self, segment: Segment) -> SegmentFrame {
        SegmentFrame {
            x: self.segment_start(segment),
            width: segment.len() as f32 * self.step_width,
            left_height: self.height(segment.first()),
            right_height: self.height(segment.last()),
        }
    }

    /// Left edge of the indicator for `score`.
    pub fn offset(&self, score: Score) -> f32 {
        let step = score.rank().saturating_sub(1) as f32;
        let spacing = self.segment_spacing * score.segment_index().unwrap_or(0) as f32;
        self.clamp_offset(step * self.step_width + spacing)
    }

    pub fn clamp_offset(&self, offset: f32) -> f32 {
        let max = (self.width - self.step_width).max(0.0);
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, max)
    }

    /// Linear ramp starting at `step_width` for `x = 0`.
    pub fn height_at_offset(&self, x: f32) -> f32 {
        (self.step_width + x.max(0.0) * self.slope).max(0.0)
    }

    /// Indicator height for a resting score. Skipped has no indicator.
    pub fn height(&self, score: Score) -> f32 {
        if score.is_skipped() {
            return 0.0;
        }
        let step = (score.rank() - 1) as f32;
        self.height_at_offset(step * self.step_width)
    }

    /// Maps a container x to the ramp coordinate by removing every segment
    /// gap (or the covered part of it) left of `x`.
    pub fn ramp_position(&self, x: f32) -> f32 {
        let consumed: f32 = Segment::iter()
            .skip(1)
            .map(|segment| {
                let gap_start = self.segment_start(segment) - self.segment_spacing;
                (x - gap_start).clamp(0.0, self.segment_spacing)
            })
            .sum();
        (x - consumed).max(0.0)
    }

    /// Height of the indicator while it is dragged with its left edge at `x`.
    pub fn height_at_position(&self, x: f32) -> f32 {
        self.height_at_offset(self.ramp_position(x))
    }

    /// Hit-test: the ranked score whose slot contains `x`. Total over all
    /// inputs; an unmeasured layout always yields the lowest ranked score.
    pub fn score_at(&self, x: f32) -> Score {
        let range = ScoreRange::RANKED;
        if !self.is_established() || x.is_nan() {
            return range.lower;
        }

        let half_gap = self.segment_spacing / 2.0;
        let segment = Segment::iter()
            .rev()
            .find(|s| s.index() == 0 || x >= self.offset(s.first()) - half_gap)
            .unwrap_or(Segment::Easy);

        // A tap on `offset(s)` must land on `s`.
        segment
            .ranks()
            .rev()
            .map(|rank| range.clamp(rank as i64))
            .find(|s| x >= self.offset(*s))
            .unwrap_or_else(|| segment.first())
    }
}
