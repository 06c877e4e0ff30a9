use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use effort_picker::error::PickerResult;
use effort_picker::layout::LayoutEngine;
use effort_picker::score::{ListEntry, Score, ScoreRange};
use std::io::Write;

pub fn layout(engine: &LayoutEngine) {
    println!(
        "\nWidth: {:.1}  Step: {:.3}  Spacing: {:.1}",
        engine.width(),
        engine.step_width(),
        engine.segment_spacing()
    );

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new("Rank"),
        Cell::new("Segment"),
        Cell::new("Offset").fg(Color::Cyan),
        Cell::new("Slot End"),
        Cell::new("Height").fg(Color::Green),
    ]);

    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for score in ScoreRange::RANKED.iter() {
        let offset = engine.offset(score);
        let segment = score
            .segment()
            .map(|s| s.to_string())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(score.to_string()).add_attribute(Attribute::Bold),
            Cell::new(score.rank()),
            Cell::new(segment),
            Cell::new(format!("{:.2}", offset)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", offset + engine.step_width())),
            Cell::new(format!("{:.2}", engine.height(score))).fg(Color::Green),
        ]);
    }
    println!("{}", table);
}

pub fn write_layout_csv<W: Write>(engine: &LayoutEngine, out: W) -> PickerResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["score", "rank", "segment", "offset", "height"])?;
    for score in ScoreRange::RANKED.iter() {
        let segment = score
            .segment()
            .map(|s| s.to_string())
            .unwrap_or_default();
        writer.write_record([
            score.to_string(),
            score.rank().to_string(),
            segment,
            format!("{:.3}", engine.offset(score)),
            format!("{:.3}", engine.height(score)),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn score_list(entries: &[ListEntry], selected: Option<Score>) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mark = |score: Score| if selected == Some(score) { "✓" } else { "" };

    for entry in entries {
        match entry {
            ListEntry::Section { segment, scores } => {
                table.add_row(vec![
                    Cell::new(segment.to_string()).add_attribute(Attribute::Bold),
                    Cell::new(""),
                    Cell::new(""),
                ]);
                for &score in scores {
                    table.add_row(vec![
                        Cell::new(""),
                        Cell::new(format!("{} ({})", score, score.rank())),
                        Cell::new(mark(score)).set_alignment(CellAlignment::Center),
                    ]);
                }
            }
            ListEntry::NoScore(score) => {
                table.add_row(vec![
                    Cell::new("no score").add_attribute(Attribute::Italic),
                    Cell::new(score.to_string()),
                    Cell::new(mark(*score)).set_alignment(CellAlignment::Center),
                ]);
            }
        }
    }
    println!("{}", table);
}
