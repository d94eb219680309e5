//! Focused unit tests covering plan CLI configuration and execution.

use super::helpers::{SAMPLE_REQUEST, temp_root, write_utf8};
use super::*;
use crate::plan::{
    PlanArgs, PlanConfig, config_from_layers_for_test, execute_plan, load_request,
};
use camino::Utf8PathBuf;
use geo::Coord;
use meander::{InfluencePoint, PathOutput, RouteError, WayOutput};
use meander::pipeline::PlannerConfig;
use rstest::rstest;

fn config_for(request_path: Utf8PathBuf, mode: PlanMode) -> PlanConfig {
    PlanConfig {
        request_path,
        mode,
        output: None,
        seed: None,
        planner: PlannerConfig::default(),
    }
}

fn run_mode(mode: PlanMode) -> String {
    let (_tmp, root) = temp_root();
    let request_path = root.join("request.json");
    write_utf8(&request_path, SAMPLE_REQUEST.as_bytes());
    let mut config = config_for(request_path, mode);
    config.planner.colony.ants = 6;
    config.planner.colony.iterations = 4;
    let mut buffer = Vec::new();
    execute_plan(&config, &mut buffer).expect("plan should succeed");
    String::from_utf8(buffer).expect("stdout utf-8")
}

#[rstest]
fn converting_without_request_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing request");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(env, ENV_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn flags_override_planner_defaults() {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        mode: Some(PlanMode::Simulate),
        ants: Some(3),
        iterations: Some(2),
        grid_step: Some(7.5),
        spacing: Some(20.0),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.mode, PlanMode::Simulate);
    assert_eq!(config.planner.colony.ants, 3);
    assert_eq!(config.planner.colony.iterations, 2);
    assert_eq!(config.planner.enrichment.grid_step, 7.5);
    assert_eq!(config.planner.graph.spacing, 20.0);
    assert_eq!(config.seed, None);
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let (_tmp, root) = temp_root();
    let config = config_for(root.join("absent.json"), PlanMode::Path);
    match config.validate_sources().expect_err("request is missing") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_REQUEST),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("request.json");
    std::fs::create_dir(request_path.as_std_path()).expect("request directory");
    let config = config_for(request_path.clone(), PlanMode::Path);
    match config.validate_sources().expect_err("directory is not a file") {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_request_decodes_json() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("request.json");
    write_utf8(&request_path, SAMPLE_REQUEST.as_bytes());
    let request = load_request(&request_path).expect("request should decode");
    assert_eq!(request.zones.len(), 1);
    assert_eq!(request.pois.len(), 3);
    assert_eq!((request.start, request.end, request.seed), (Some(10), Some(20), 3));
}

#[rstest]
fn load_request_rejects_invalid_json() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("request.json");
    write_utf8(&request_path, b"{ not valid json");
    match load_request(&request_path).expect_err("invalid json") {
        CliError::ParseRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[rstest]
fn load_request_reports_open_errors() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("missing.json");
    match load_request(&request_path).expect_err("file is missing") {
        CliError::OpenRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenRequest, found {other:?}"),
    }
}

#[rstest]
fn path_mode_prints_route_between_explicit_endpoints() {
    let output: PathOutput = serde_json::from_str(&run_mode(PlanMode::Path)).expect("path JSON");
    assert_eq!(output.start.id, Some(10));
    assert_eq!(output.end.id, Some(20));
    assert_eq!(output.points.last(), Some(&Coord { x: 55.0, y: 55.0 }));
}

#[rstest]
fn best_mode_prints_a_colony_route() {
    let output: PathOutput = serde_json::from_str(&run_mode(PlanMode::Best)).expect("path JSON");
    assert_eq!(output.start.id, Some(10));
    assert!(
        output
            .points
            .first()
            .is_none_or(|first| *first == Coord { x: 5.0, y: 5.0 })
    );
}

#[rstest]
fn all_mode_prints_weighted_ways() {
    let ways: Vec<WayOutput> = serde_json::from_str(&run_mode(PlanMode::All)).expect("ways JSON");
    assert!(!ways.is_empty());
    assert!(ways.iter().all(|way| way.weight >= 0.0));
}

#[rstest]
fn simulate_mode_prints_influence() {
    let points: Vec<InfluencePoint> =
        serde_json::from_str(&run_mode(PlanMode::Simulate)).expect("influence JSON");
    assert!(points.iter().any(|point| point.weight > 0.0));
}

#[rstest]
fn invalid_planner_options_are_reported() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("request.json");
    write_utf8(&request_path, SAMPLE_REQUEST.as_bytes());
    let mut config = config_for(request_path, PlanMode::Best);
    config.planner.colony.ants = 0;
    let mut buffer = Vec::new();
    match execute_plan(&config, &mut buffer).expect_err("zero ants") {
        CliError::InvalidRequest { .. } => {}
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
}

#[rstest]
fn planner_errors_are_wrapped() {
    let (_tmp, root) = temp_root();
    let request_path = root.join("request.json");
    write_utf8(&request_path, SAMPLE_REQUEST.replace("\"end\": 20", "\"end\": 99").as_bytes());
    let config = config_for(request_path, PlanMode::Path);
    let mut buffer = Vec::new();
    match execute_plan(&config, &mut buffer).expect_err("unknown end") {
        CliError::Plan { source } => assert_eq!(source, RouteError::PoiNotFound { poi_id: 99 }),
        other => panic!("expected Plan, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    match config_from_layers_for_test(composer.layers()).expect_err("invalid layer") {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "mode": "all", "ants": 5, "seed": 1 }), None);
    composer.push_environment(json!({
        "request_path": "from-env.json",
        "seed": 2,
    }));
    composer.push_cli(json!({ "mode": "best" }));

    let config = config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.request_path, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.mode, PlanMode::Best);
    assert_eq!(config.seed, Some(2));
    assert_eq!(config.planner.colony.ants, 5);
}
