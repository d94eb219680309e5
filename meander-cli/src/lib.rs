//! Command-line interface for planning routes from JSON requests.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;
pub use plan::PlanMode;

const ARG_REQUEST: &str = "request";
const ENV_REQUEST: &str = "MEANDER_CMDS_PLAN_REQUEST_PATH";
const ARG_OUTPUT: &str = "output";
const ARG_MODE: &str = "mode";
const ARG_SEED: &str = "seed";
const ARG_ANTS: &str = "ants";
const ARG_ITERATIONS: &str = "iterations";
const ARG_GRID_STEP: &str = "grid-step";
const ARG_SPACING: &str = "spacing";

/// Run the Meander CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "meander",
    about = "Plan pedestrian routes across classified map zones",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the walkable graph for a request and route across it.
    Plan(plan::PlanArgs),
}

#[cfg(test)]
mod tests;
