use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use effort_picker::config::{Platform, PickerConfig};
use effort_picker::error::PickerResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with picker constants; explicit flags still win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value = "phone")]
    platform: Platform,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Layout(cmd::layout::LayoutArgs),
    Shape(cmd::shape::ShapeArgs),
    Simulate(cmd::simulate::SimulateArgs),
    List(cmd::list::ListArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &clap::ArgMatches) -> PickerResult<()> {
    let (cli_picker, sub_name) = match &cli.command {
        Commands::Layout(args) => (Some(&args.picker), "layout"),
        Commands::Shape(args) => (Some(&args.picker), "shape"),
        Commands::Simulate(args) => (Some(&args.picker), "simulate"),
        Commands::List(_) => (None, "list"),
    };

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading picker config from: {}", path);
            PickerConfig::load_from_file(path)?
        }
        None => PickerConfig::for_platform(cli.platform),
    };

    if let (Some(cli_picker), Some(sub_matches)) =
        (cli_picker, matches.subcommand_matches(sub_name))
    {
        config.merge_from_cli(cli_picker, sub_matches);
        config.validate()?;
    }

    match &cli.command {
        Commands::Layout(args) => cmd::layout::run(args, &config),
        Commands::Shape(args) => cmd::shape::run(args, &config),
        Commands::Simulate(args) => cmd::simulate::run(args, &config),
        Commands::List(args) => cmd::list::run(args),
    }
}
