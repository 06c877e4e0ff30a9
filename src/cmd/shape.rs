use crate::reports;
use clap::Args;
use effort_picker::config::PickerConfig;
use effort_picker::error::PickerResult;
use effort_picker::picker::EffortPicker;
use effort_picker::score::Score;

#[derive(Args, Debug, Clone)]
pub struct ShapeArgs {
    #[command(flatten)]
    pub picker: PickerConfig,

    #[arg(short, long, default_value_t = 330.0)]
    pub width: f32,

    /// Selected score, drawn as the indicator.
    #[arg(short, long, value_parser = super::parse_score)]
    pub score: Option<Score>,

    /// Emit an SVG document instead of JSON.
    #[arg(long, default_value_t = false)]
    pub svg: bool,
}

pub fn run(args: &ShapeArgs, config: &PickerConfig) -> PickerResult<()> {
    let mut picker = EffortPicker::new(config.clone()).with_score(args.score);
    picker.resize(args.width);
    let frame = picker.frame();

    if args.svg {
        println!("{}", reports::render_svg(&frame));
    } else {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    }
    Ok(())
}
