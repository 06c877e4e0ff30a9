use crate::reports;
use clap::Args;
use effort_picker::config::PickerConfig;
use effort_picker::error::PickerResult;
use effort_picker::layout::LayoutEngine;
use std::io;
use strum_macros::{Display, EnumString};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ReportFormat {
    Table,
    Csv,
}

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub picker: PickerConfig,

    #[arg(short, long, default_value_t = 330.0)]
    pub width: f32,

    #[arg(long, default_value = "table")]
    pub format: ReportFormat,
}

pub fn run(args: &LayoutArgs, config: &PickerConfig) -> PickerResult<()> {
    let layout = LayoutEngine::with_width(config, args.width);
    if !layout.is_established() {
        warn!(
            "Width {} leaves no room for the scores, layout is not established",
            args.width
        );
    }

    match args.format {
        ReportFormat::Table => {
            reports::print_layout_table(&layout);
            Ok(())
        }
        ReportFormat::Csv => reports::write_layout_csv(&layout, io::stdout()),
    }
}
