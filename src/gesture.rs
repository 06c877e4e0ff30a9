use crate::layout::LayoutEngine;
use crate::score::{Score, ScoreRange};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "x", rename_all = "snake_case")]
pub enum PointerEvent {
    Down(f32),
    Move(f32),
    Up(f32),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "score", rename_all = "snake_case")]
pub enum PickerEvent {
    /// Live selection while the pointer is down or a rotary input turns.
    ScoreChanged(Score),
    /// Final selection on release or explicit confirmation.
    ScoreCommitted(Score),
}

impl PickerEvent {
    pub fn score(&self) -> Score {
        match *self {
            PickerEvent::ScoreChanged(s) | PickerEvent::ScoreCommitted(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        x: f32,
    },
}

/// Translates pointer positions into score events.
///
/// Owns only the ephemeral drag position; the selected score belongs to the
/// caller.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
    last_emitted: Option<Score>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn score_at(&self, layout: &LayoutEngine, x: f32) -> Score {
        layout.score_at(x)
    }

    pub fn on_pointer_down(&mut self, layout: &LayoutEngine, x: f32) -> PickerEvent {
        self.state = GestureState::Dragging { x };
        let score = self.score_at(layout, x);
        self.last_emitted = Some(score);
        PickerEvent::ScoreChanged(score)
    }

    /// Emits only when the score under the pointer differs from the last
    /// emission. A move without a preceding down starts a drag.
    pub fn on_pointer_move(&mut self, layout: &LayoutEngine, x: f32) -> Option<PickerEvent> {
        self.state = GestureState::Dragging { x };
        let score = self.score_at(layout, x);
        if self.last_emitted == Some(score) {
            return None;
        }
        self.last_emitted = Some(score);
        Some(PickerEvent::ScoreChanged(score))
    }

    pub fn on_pointer_up(&mut self, layout: &LayoutEngine, x: f32) -> PickerEvent {
        let score = self.score_at(layout, x);
        self.reset();
        debug!(%score, x, "score committed");
        PickerEvent::ScoreCommitted(score)
    }

    pub fn on_pointer_cancel(&mut self) {
        self.reset();
    }

    pub fn handle(&mut self, layout: &LayoutEngine, event: PointerEvent) -> Option<PickerEvent> {
        match event {
            PointerEvent::Down(x) => Some(self.on_pointer_down(layout, x)),
            PointerEvent::Move(x) => self.on_pointer_move(layout, x),
            PointerEvent::Up(x) => Some(self.on_pointer_up(layout, x)),
            PointerEvent::Cancel => {
                self.on_pointer_cancel();
                None
            }
        }
    }

    /// Rotary stepping. Works purely on ranks, independent of geometry.
    /// `None` when the delta rounds to zero steps.
    pub fn on_step(&self, current: Option<Score>, delta: f64) -> Option<Score> {
        let steps = round_to_steps(delta);
        if steps == 0 {
            return None;
        }
        let range = ScoreRange::RANKED;
        let base = current.unwrap_or(range.lower);
        Some(range.advance(base, steps))
    }

    /// Absolute rotary position, rounded and clamped into the ranked range.
    pub fn score_for_raw_value(&self, value: f64) -> Score {
        ScoreRange::RANKED.clamp(round_to_steps(value))
    }

    /// Left edge and height of the indicator while dragging. The indicator
    /// is centered under the pointer and kept inside the container.
    pub fn drag_indicator(&self, layout: &LayoutEngine) -> Option<(f32, f32)> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Dragging { x } => {
                let offset = layout.clamp_offset(x - layout.step_width() / 2.0);
                Some((offset, layout.height_at_position(offset)))
            }
        }
    }

    fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.last_emitted = None;
    }
}

fn round_to_steps(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    // Saturating float-to-int cast.
    value.round() as i64
}
