#![cfg_attr(all(windows, feature = "noconsole"), windows_subsystem = "windows")]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{estimate, inspect};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "ULVA_Auto_MTO")]
#[command(version = VERSION)]
#[command(about = "ULVA cladding take-off from piping isometric PDFs")]
struct Cli {
    /// JSON configuration file (default: ./ulva_mto.json when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    // Used when no subcommand is given.
    #[command(flatten)]
    estimate: estimate::EstimateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate every PDF in the input folder and write the workbook (default)
    Estimate(estimate::EstimateArgs),
    /// Show the parsed take-off and estimate for one PDF without writing anything
    Inspect(inspect::InspectArgs),
    /// Show the effective pipe catalogue, material constants and rates
    Rates,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs { config: cli.config };

    // Launched without a subcommand (e.g. double-clicked): run the estimate.
    let command = cli
        .command
        .unwrap_or(Commands::Estimate(cli.estimate));

    let (json_result, exit_code) = commands::run_json(command, &global);

    // Nothing left to report to if stdout itself is gone.
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
