//! Plan command implementation for the Meander CLI.

use std::io::{BufReader, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use meander::pipeline::{self, PlannerConfig};
use meander::RouteRequest;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{create_utf8_file, file_is_file, open_utf8_file};
use crate::{
    ARG_ANTS, ARG_GRID_STEP, ARG_ITERATIONS, ARG_MODE, ARG_OUTPUT, ARG_REQUEST, ARG_SEED,
    ARG_SPACING, CliError, ENV_REQUEST,
};

/// What the `plan` subcommand computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    /// Shortest path between the endpoints (A*).
    #[default]
    Path,
    /// Best way the ant colony finds between the endpoints.
    Best,
    /// Every edge the colony used, weighted by pheromone.
    All,
    /// Influence of every graph vertex after the colony explored the map.
    Simulate,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Build the walkable graph for a JSON request of zones and \
                 points of interest, then route across it. Options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan routes for a request"
)]
#[ortho_config(prefix = "MEANDER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file holding zones and points of interest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Which result to compute.
    #[arg(long = ARG_MODE, value_enum)]
    #[serde(default)]
    pub(crate) mode: Option<PlanMode>,
    /// Write JSON here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Override the seed stored in the request.
    #[arg(long = ARG_SEED)]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Ants per colony iteration.
    #[arg(long = ARG_ANTS)]
    #[serde(default)]
    pub(crate) ants: Option<usize>,
    /// Colony iterations.
    #[arg(long = ARG_ITERATIONS)]
    #[serde(default)]
    pub(crate) iterations: Option<usize>,
    /// Distance between sampled grid points inside zones.
    #[arg(long = ARG_GRID_STEP)]
    #[serde(default)]
    pub(crate) grid_step: Option<f64>,
    /// Longest edge the colony may walk during simulation.
    #[arg(long = ARG_SPACING)]
    #[serde(default)]
    pub(crate) spacing: Option<f64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) mode: PlanMode,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) planner: PlannerConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;

        let mut planner = PlannerConfig::default();
        if let Some(ants) = args.ants {
            planner.colony.ants = ants;
        }
        if let Some(iterations) = args.iterations {
            planner.colony.iterations = iterations;
        }
        if let Some(grid_step) = args.grid_step {
            planner.enrichment.grid_step = grid_step;
        }
        if let Some(spacing) = args.spacing {
            planner.graph.spacing = spacing;
        }

        Ok(Self {
            request_path,
            mode: args.mode.unwrap_or_default(),
            output: args.output,
            seed: args.seed,
            planner,
        })
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

/// Run the command, writing to `--output` when given and `stdout` otherwise.
pub(crate) fn run_plan_with(args: PlanArgs, stdout: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let Some(path) = &config.output else {
        return execute_plan(&config, stdout);
    };
    let file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
        path: path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    execute_plan(&config, &mut writer)?;
    writer.flush().map_err(CliError::WriteOutput)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Load the request, run the planner in the configured mode and write the
/// result as pretty JSON.
pub(crate) fn execute_plan(config: &PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut request = load_request(&config.request_path)?;
    if let Some(seed) = config.seed {
        request.seed = seed;
    }
    let invalid = |source| CliError::InvalidRequest {
        path: config.request_path.clone(),
        source,
    };
    request.validate().map_err(invalid)?;
    config.planner.validate().map_err(invalid)?;
    log::info!(
        "planning {:?} over {} zones and {} points of interest",
        config.mode,
        request.zones.len(),
        request.pois.len()
    );

    let plan = |source| CliError::Plan { source };
    match config.mode {
        PlanMode::Path => write_json(
            writer,
            &pipeline::shortest_path(&request, &config.planner).map_err(plan)?,
        ),
        PlanMode::Best => write_json(
            writer,
            &pipeline::best_way(&request, &config.planner).map_err(plan)?,
        ),
        PlanMode::All => write_json(
            writer,
            &pipeline::all_ways(&request, &config.planner).map_err(plan)?,
        ),
        PlanMode::Simulate => write_json(
            writer,
            &pipeline::simulate(&request, &config.planner).map_err(plan)?,
        ),
    }
}

/// Loads a JSON-encoded [`RouteRequest`] from disk.
pub(crate) fn load_request(path: &Utf8Path) -> Result<RouteRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
