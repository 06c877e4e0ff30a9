use clap::Args;
use effort_picker::config::PickerConfig;
use effort_picker::error::{PickerError, PickerResult};
use effort_picker::gesture::{PickerEvent, PointerEvent};
use effort_picker::picker::EffortPicker;
use effort_picker::score::Score;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub picker: PickerConfig,

    #[arg(short, long, default_value_t = 330.0)]
    pub width: f32,

    /// Comma separated inputs: `down:X`, `move:X`, `up:X`, `cancel`,
    /// `step:N`, `crown:V`, `resize:W`, `confirm`.
    #[arg(short, long)]
    pub trace: String,

    #[arg(short, long, value_parser = super::parse_score)]
    pub initial: Option<Score>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceInput {
    Pointer(PointerEvent),
    Step(f64),
    Crown(f64),
    Resize(f32),
    Confirm,
}

pub fn parse_trace(trace: &str) -> PickerResult<Vec<TraceInput>> {
    trace
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_input)
        .collect()
}

fn parse_input(token: &str) -> PickerResult<TraceInput> {
    let (name, value) = match token.split_once(':') {
        Some((n, v)) => (n.trim().to_lowercase(), Some(v.trim())),
        None => (token.to_lowercase(), None),
    };

    let number = |v: Option<&str>| -> PickerResult<f64> {
        let v = v.ok_or_else(|| {
            PickerError::Validation(format!("Trace input '{}' needs a value", token))
        })?;
        v.parse::<f64>()
            .map_err(|_| PickerError::Validation(format!("Invalid number in trace input '{}'", token)))
    };

    let input = match name.as_str() {
        "down" => TraceInput::Pointer(PointerEvent::Down(number(value)? as f32)),
        "move" => TraceInput::Pointer(PointerEvent::Move(number(value)? as f32)),
        "up" => TraceInput::Pointer(PointerEvent::Up(number(value)? as f32)),
        "cancel" => TraceInput::Pointer(PointerEvent::Cancel),
        "step" => TraceInput::Step(number(value)?),
        "crown" => TraceInput::Crown(number(value)?),
        "resize" => TraceInput::Resize(number(value)? as f32),
        "confirm" => TraceInput::Confirm,
        _ => {
            return Err(PickerError::Validation(format!(
                "Unknown trace input '{}'",
                token
            )))
        }
    };
    Ok(input)
}

pub fn run(args: &SimulateArgs, config: &PickerConfig) -> PickerResult<()> {
    let inputs = parse_trace(&args.trace)?;
    let mut picker = EffortPicker::new(config.clone()).with_score(args.initial);
    picker.resize(args.width);

    for input in inputs {
        debug!(?input, "replaying");
        let events: Vec<PickerEvent> = match input {
            TraceInput::Pointer(event) => picker.handle(event),
            TraceInput::Step(delta) => picker.on_step(delta).into_iter().collect(),
            TraceInput::Crown(value) => picker.set_rotary_value(value).into_iter().collect(),
            TraceInput::Resize(width) => {
                picker.resize(width);
                Vec::new()
            }
            TraceInput::Confirm => picker.confirm().into_iter().collect(),
        };
        for event in events {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    match picker.score() {
        Some(score) => info!("Final score: {} (rank {})", score, score.rank()),
        None => info!("No score selected"),
    }
    Ok(())
}
