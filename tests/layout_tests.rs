use effort_picker::config::{PickerConfig, Platform};
use effort_picker::layout::{step_width, LayoutEngine};
use effort_picker::score::{Score, ScoreRange, Segment};
use rstest::rstest;
use strum::IntoEnumIterator;

const EPS: f32 = 1e-3;

fn phone(width: f32) -> LayoutEngine {
    LayoutEngine::with_width(&PickerConfig::default(), width)
}

#[rstest]
#[case(330.0, 8.0, 30.6)]
#[case(330.0, 0.0, 33.0)]
#[case(0.0, 8.0, 0.0)]
#[case(20.0, 8.0, 0.0)]
#[case(f32::NAN, 8.0, 0.0)]
fn test_step_width(#[case] width: f32, #[case] spacing: f32, #[case] expected: f32) {
    assert!((step_width(width, spacing) - expected).abs() < EPS);
}

#[rstest]
#[case(Score::Easy1, 0.0)]
#[case(Score::Easy3, 61.2)]
#[case(Score::Moderate1, 99.8)]
#[case(Score::Hard1, 199.6)]
#[case(Score::AllOut1, 268.8)]
#[case(Score::AllOut2, 299.4)]
fn test_offsets_include_segment_gaps(#[case] score: Score, #[case] expected: f32) {
    let layout = phone(330.0);
    assert!(
        (layout.offset(score) - expected).abs() < EPS,
        "{}: {}",
        score,
        layout.offset(score)
    );
}

#[rstest]
#[case(0.0, Score::Easy1)]
#[case(-40.0, Score::Easy1)]
#[case(93.0, Score::Easy3)] // gap left of midpoint
#[case(97.0, Score::Moderate1)] // gap right of midpoint
#[case(200.0, Score::Hard1)]
#[case(329.9, Score::AllOut2)]
#[case(10_000.0, Score::AllOut2)]
#[case(f32::NAN, Score::Easy1)]
fn test_hit_testing(#[case] x: f32, #[case] expected: Score) {
    assert_eq!(phone(330.0).score_at(x), expected);
}

#[rstest]
#[case(40.37, 0.0)]
#[case(40.74, 0.0)]
#[case(330.0, 8.0)]
#[case(517.3, 3.3)]
#[case(1111.11, 7.7)]
fn test_tap_on_rendered_offset_selects_score(#[case] width: f32, #[case] spacing: f32) {
    let config = PickerConfig {
        segment_spacing: spacing,
        ..Default::default()
    };
    let layout = LayoutEngine::with_width(&config, width);
    for score in ScoreRange::RANKED.iter() {
        assert_eq!(layout.score_at(layout.offset(score)), score, "width {}", width);
    }
}

#[test]
fn test_unmeasured_layout() {
    let layout = phone(0.0);
    assert!(!layout.is_established());
    assert_eq!(layout.step_width(), 0.0);
    assert_eq!(layout.score_at(120.0), Score::Easy1);
    assert_eq!(layout.offset(Score::AllOut2), 0.0);
}

#[test]
fn test_height_is_monotonic_and_starts_at_step() {
    let layout = phone(330.0);
    assert!((layout.height(Score::Easy1) - 30.6).abs() < EPS);
    assert_eq!(layout.height(Score::Skipped), 0.0);

    let heights: Vec<f32> = ScoreRange::RANKED.iter().map(|s| layout.height(s)).collect();
    for pair in heights.windows(2) {
        assert!(pair[1] > pair[0], "heights not increasing: {:?}", heights);
    }
}

#[test]
fn test_segment_frames_tile_the_width() {
    let layout = phone(330.0);
    let mut cursor = 0.0;
    for segment in Segment::iter() {
        let frame = layout.segment_frame(segment);
        assert!((frame.x - cursor).abs() < EPS);
        assert!(frame.left_height <= frame.right_height);
        cursor = frame.x + frame.width + layout.segment_spacing();
    }
    assert!((cursor - layout.segment_spacing() - 330.0).abs() < EPS);
}

#[test]
fn test_drag_height_matches_resting_height() {
    let layout = phone(330.0);
    for score in ScoreRange::RANKED.iter() {
        let resting = layout.height(score);
        let dragged = layout.height_at_position(layout.offset(score));
        assert!((resting - dragged).abs() < EPS, "{}", score);
    }
}

#[test]
fn test_watch_layout_has_narrow_gaps() {
    let config = PickerConfig::for_platform(Platform::Watch);
    let layout = LayoutEngine::with_width(&config, 160.0);
    assert!((layout.step_width() - 15.4).abs() < EPS);
    assert_eq!(layout.score_at(159.0), Score::AllOut2);
}
