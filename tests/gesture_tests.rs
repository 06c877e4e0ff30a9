use effort_picker::config::PickerConfig;
use effort_picker::gesture::{GestureController, GestureState, PickerEvent, PointerEvent};
use effort_picker::layout::LayoutEngine;
use effort_picker::picker::EffortPicker;
use effort_picker::score::Score;
use rstest::rstest;

fn picker(score: Option<Score>) -> EffortPicker {
    let mut picker = EffortPicker::new(PickerConfig::default()).with_score(score);
    picker.resize(330.0);
    picker
}

#[test]
fn test_full_drag_sweep() {
    let mut p = picker(None);
    let mut events = p.handle(PointerEvent::Down(0.0));
    let mut x = 0.0;
    while x <= 330.0 {
        events.extend(p.handle(PointerEvent::Move(x)));
        x += 5.0;
    }
    events.extend(p.handle(PointerEvent::Up(330.0)));

    assert_eq!(events.first(), Some(&PickerEvent::ScoreChanged(Score::Easy1)));
    assert_eq!(events.last(), Some(&PickerEvent::ScoreCommitted(Score::AllOut2)));
    for pair in events.windows(2) {
        assert!(pair[1].score() >= pair[0].score(), "{:?}", events);
    }
    // Every ranked score is visited exactly once on a slow sweep.
    let changed = events
        .iter()
        .filter(|e| matches!(e, PickerEvent::ScoreChanged(_)))
        .count();
    assert_eq!(changed, 10);
    assert_eq!(p.score(), Some(Score::AllOut2));
    assert!(!p.gesture().is_dragging());
}

#[test]
fn test_moves_within_one_slot_are_deduplicated() {
    let layout = LayoutEngine::with_width(&PickerConfig::default(), 330.0);
    let mut g = GestureController::new();
    g.on_pointer_down(&layout, 200.0);
    assert_eq!(g.on_pointer_move(&layout, 205.0), None);
    assert_eq!(g.on_pointer_move(&layout, 225.0), None);
    assert_eq!(
        g.on_pointer_move(&layout, 235.0),
        Some(PickerEvent::ScoreChanged(Score::Hard2))
    );
    assert_eq!(g.state(), GestureState::Dragging { x: 235.0 });
}

#[test]
fn test_cancel_restores_previous_score() {
    let mut p = picker(Some(Score::Moderate2));
    p.handle(PointerEvent::Down(10.0));
    p.handle(PointerEvent::Move(300.0));
    assert_eq!(p.score(), Some(Score::AllOut2));

    let events = p.handle(PointerEvent::Cancel);
    assert!(events.is_empty());
    assert_eq!(p.score(), Some(Score::Moderate2));
}

#[test]
fn test_cancel_without_drag_keeps_score() {
    let mut p = picker(Some(Score::Hard1));
    assert!(p.handle(PointerEvent::Cancel).is_empty());
    assert_eq!(p.score(), Some(Score::Hard1));
}

#[test]
fn test_drag_indicator_follows_pointer() {
    let mut p = picker(None);
    p.handle(PointerEvent::Down(150.0));
    let indicator = p.frame().indicator.expect("indicator while dragging");
    assert!(indicator.dragging);
    assert!((indicator.offset - (150.0 - 15.3)).abs() < 1e-3);

    // Clamped at both container edges.
    p.handle(PointerEvent::Move(-50.0));
    assert_eq!(p.frame().indicator.map(|i| i.offset), Some(0.0));
    p.handle(PointerEvent::Move(1000.0));
    let right = p.frame().indicator.map(|i| i.offset + i.width).unwrap();
    assert!((right - 330.0).abs() < 1e-3);
}

// --- ROTARY INPUT ---
#[rstest]
#[case(None, 1.0, Score::Easy2)]
#[case(None, -3.0, Score::Easy1)]
#[case(Some(Score::Moderate1), 2.4, Score::Moderate3)]
#[case(Some(Score::AllOut1), 5.0, Score::AllOut2)]
#[case(Some(Score::Skipped), 1.0, Score::Easy1)]
fn test_on_step(#[case] start: Option<Score>, #[case] delta: f64, #[case] expected: Score) {
    let mut p = picker(start);
    p.on_step(delta);
    assert_eq!(p.score(), Some(expected));
}

#[rstest]
#[case(Some(Score::Skipped), 0.0)]
#[case(None, 0.3)]
#[case(Some(Score::Hard1), -0.4)]
fn test_zero_step_keeps_selection(#[case] start: Option<Score>, #[case] delta: f64) {
    let mut p = picker(start);
    assert_eq!(p.on_step(delta), None);
    assert_eq!(p.score(), start);
}

#[test]
fn test_on_step_at_bound_emits_nothing() {
    let mut p = picker(Some(Score::AllOut2));
    assert_eq!(p.on_step(1.0), None);
}

#[rstest]
#[case(6.6, Score::Hard1)]
#[case(-2.0, Score::Easy1)]
#[case(42.0, Score::AllOut2)]
#[case(f64::NAN, Score::Easy1)]
fn test_rotary_value(#[case] value: f64, #[case] expected: Score) {
    let mut p = picker(None);
    assert_eq!(
        p.set_rotary_value(value),
        Some(PickerEvent::ScoreChanged(expected))
    );
    assert_eq!(p.rotary_value(), expected.rank() as f64);
}

#[test]
fn test_confirm_commits_current_score() {
    let p = picker(Some(Score::Easy3));
    assert_eq!(p.confirm(), Some(PickerEvent::ScoreCommitted(Score::Easy3)));
    assert_eq!(picker(None).confirm(), None);
}
