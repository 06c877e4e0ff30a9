//! The picker widget as seen by a host: a bindable score, pointer and rotary
//! input, and a render frame for the current width.

use crate::config::PickerConfig;
use crate::gesture::{GestureController, PickerEvent, PointerEvent};
use crate::layout::{LayoutEngine, SegmentFrame};
use crate::score::{Score, Segment};
use crate::shape::{Point, ShapePath, SlantedTopShape};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct SegmentBackground {
    pub segment: String,
    pub frame: SegmentFrame,
    /// Outline in container coordinates, bottom-aligned with the picker.
    pub path: ShapePath,
    /// One dot per score, centered in its step.
    pub dots: Vec<Point>,
    pub dot_size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicator {
    pub offset: f32,
    pub width: f32,
    pub height: f32,
    pub dragging: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickerFrame {
    pub width: f32,
    pub height: f32,
    pub step_width: f32,
    pub segments: Vec<SegmentBackground>,
    pub indicator: Option<Indicator>,
}

#[derive(Debug, Clone)]
pub struct EffortPicker {
    config: PickerConfig,
    layout: LayoutEngine,
    gesture: GestureController,
    score: Option<Score>,
    score_before_drag: Option<Score>,
    enabled: bool,
}

impl EffortPicker {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            layout: LayoutEngine::new(&config),
            config,
            gesture: GestureController::new(),
            score: None,
            score_before_drag: None,
            enabled: true,
        }
    }

    pub fn with_score(mut self, score: Option<Score>) -> Self {
        self.score = score;
        self
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn set_score(&mut self, score: Option<Score>) {
        self.score = score;
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn resize(&mut self, width: f32) -> bool {
        self.layout.resize(width)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling aborts any drag in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.gesture.is_dragging() {
            self.handle(PointerEvent::Cancel);
        }
        self.enabled = enabled;
    }

    pub fn handle(&mut self, event: PointerEvent) -> Vec<PickerEvent> {
        if !self.enabled {
            return Vec::new();
        }

        let was_dragging = self.gesture.is_dragging();
        if !was_dragging && matches!(event, PointerEvent::Down(_) | PointerEvent::Move(_)) {
            self.score_before_drag = self.score;
        }

        match self.gesture.handle(&self.layout, event) {
            Some(emitted) => {
                self.score = Some(emitted.score());
                vec![emitted]
            }
            None => {
                if was_dragging && matches!(event, PointerEvent::Cancel) {
                    self.score = self.score_before_drag;
                }
                Vec::new()
            }
        }
    }

    pub fn on_step(&mut self, delta: f64) -> Option<PickerEvent> {
        if !self.enabled {
            return None;
        }
        let next = self.gesture.on_step(self.score, delta)?;
        self.apply_rotary(next)
    }

    pub fn set_rotary_value(&mut self, value: f64) -> Option<PickerEvent> {
        if !self.enabled {
            return None;
        }
        let next = self.gesture.score_for_raw_value(value);
        self.apply_rotary(next)
    }

    /// Rotary input position for the current score; the bottom of the range
    /// when nothing is selected.
    pub fn rotary_value(&self) -> f64 {
        self.score
            .filter(|s| !s.is_skipped())
            .unwrap_or(Score::Easy1)
            .rank() as f64
    }

    fn apply_rotary(&mut self, next: Score) -> Option<PickerEvent> {
        if self.score == Some(next) {
            return None;
        }
        self.score = Some(next);
        Some(PickerEvent::ScoreChanged(next))
    }

    /// Explicit confirmation by the host, e.g. a save button.
    pub fn confirm(&self) -> Option<PickerEvent> {
        let score = self.score?;
        debug!(%score, "selection confirmed");
        Some(PickerEvent::ScoreCommitted(score))
    }

    pub fn frame(&self) -> PickerFrame {
        let layout = &self.layout;
        let step = layout.step_width();
        let height = layout.height(Score::AllOut2);

        let segments = if layout.is_established() {
            Segment::iter().map(|s| self.segment_background(s, height)).collect()
        } else {
            Vec::new()
        };

        PickerFrame {
            width: layout.width(),
            height: if layout.is_established() { height } else { 0.0 },
            step_width: step,
            segments,
            indicator: self.indicator(),
        }
    }

    fn indicator(&self) -> Option<Indicator> {
        if !self.layout.is_established() {
            return None;
        }
        if let Some((offset, height)) = self.gesture.drag_indicator(&self.layout) {
            return Some(Indicator {
                offset,
                width: self.layout.step_width(),
                height,
                dragging: true,
            });
        }
        let score = self.score.filter(|s| !s.is_skipped())?;
        Some(Indicator {
            offset: self.layout.offset(score),
            width: self.layout.step_width(),
            height: self.layout.height(score),
            dragging: false,
        })
    }

    fn segment_background(&self, segment: Segment, container_height: f32) -> SegmentBackground {
        let frame = self.layout.segment_frame(segment);
        let step = self.layout.step_width();
        let shape = SlantedTopShape::for_segment(
            step,
            segment.len(),
            frame.left_height,
            frame.right_height,
        );
        let top = container_height - shape.height();
        let path = shape.path().translated(frame.x, top);

        let dot_y = container_height - self.config.dot_bottom_padding - self.config.dot_size / 2.0;
        let dots = (0..segment.len())
            .map(|i| Point::new(frame.x + (i as f32 + 0.5) * step, dot_y))
            .collect();

        SegmentBackground {
            segment: segment.to_string(),
            frame,
            path,
            dots,
            dot_size: self.config.dot_size,
        }
    }
}
