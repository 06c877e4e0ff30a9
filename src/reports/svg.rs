use effort_picker::picker::PickerFrame;
use std::fmt::Write;

const SEGMENT_FILL: &str = "#ffffff1f";
const DOT_FILL: &str = "#ffffff4d";
const INDICATOR_FILL: &str = "#ffffff";

/// Standalone SVG of one frame, on a dark background.
pub fn render(frame: &PickerFrame) -> String {
    let mut svg = String::new();
    let w = frame.width.max(1.0);
    let h = frame.height.max(1.0);

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.1}" height="{h:.1}" viewBox="0 0 {w:.3} {h:.3}">"#
    );
    let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="black"/>"#);

    for segment in &frame.segments {
        let _ = writeln!(
            svg,
            r#"  <path data-segment="{}" d="{}" fill="{}"/>"#,
            segment.segment,
            segment.path.to_svg(),
            SEGMENT_FILL
        );
        for dot in &segment.dots {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}"/>"#,
                dot.x,
                dot.y,
                segment.dot_size / 2.0,
                DOT_FILL
            );
        }
    }

    if let Some(indicator) = &frame.indicator {
        let _ = writeln!(
            svg,
            r#"  <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" rx="{:.3}" fill="{}"/>"#,
            indicator.offset,
            h - indicator.height,
            indicator.width,
            indicator.height,
            indicator.width / 2.0,
            INDICATOR_FILL
        );
    }

    svg.push_str("</svg>");
    svg
}
