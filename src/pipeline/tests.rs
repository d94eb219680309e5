//! Unit tests for the request pipeline.

use super::*;
use geo::Coord;
use meander_core::ZoneType;
use meander_core::test_support::{poi, square_zone};
use rstest::{fixture, rstest};

fn origin(x: f64, y: f64) -> Coord<f64> {
    Coord { x, y }
}

#[fixture]
fn request() -> RouteRequest {
    RouteRequest {
        zones: vec![square_zone(1, origin(0.0, 0.0), 60.0, ZoneType::Urban)],
        pois: vec![
            poi(10, 5.0, 5.0, 1.0),
            poi(20, 55.0, 55.0, 2.0),
            poi(30, 5.0, 55.0, 3.0),
        ],
        start: Some(10),
        end: Some(20),
        seed: 4,
    }
}

#[fixture]
fn config() -> PlannerConfig {
    PlannerConfig {
        colony: AntColonyConfig {
            ants: 20,
            iterations: 6,
            ..AntColonyConfig::default()
        },
        ..PlannerConfig::default()
    }
}

#[rstest]
fn explicit_endpoints_are_used(request: RouteRequest) {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let (start, end) = resolve_endpoints(&request, &mut rng).expect("both ids exist");
    assert_eq!((start.id, end.id), (10, 20));
}

#[rstest]
fn unknown_endpoint_id_is_not_found(mut request: RouteRequest) {
    request.end = Some(99);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let err = resolve_endpoints(&request, &mut rng).expect_err("id 99 is missing");
    assert_eq!(err, RouteError::PoiNotFound { poi_id: 99 });
}

#[rstest]
fn drawn_endpoints_differ_and_repeat_per_seed(mut request: RouteRequest) {
    request.start = None;
    request.end = None;
    for seed in 0..32 {
        let (start, end) =
            resolve_endpoints(&request, &mut ChaCha8Rng::seed_from_u64(seed)).expect("drawable");
        assert_ne!(start.id, end.id);
        let again =
            resolve_endpoints(&request, &mut ChaCha8Rng::seed_from_u64(seed)).expect("drawable");
        assert_eq!((start.id, end.id), (again.0.id, again.1.id));
    }
}

#[rstest]
fn single_poi_is_not_enough(mut request: RouteRequest) {
    request.pois.truncate(1);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let err = resolve_endpoints(&request, &mut rng).expect_err("one POI");
    assert_eq!(err, RouteError::NotEnoughPois { found: 1 });
}

#[rstest]
fn shortest_path_runs_from_start_to_end(request: RouteRequest, config: PlannerConfig) {
    let route = shortest_path(&request, &config).expect("route exists");
    assert_eq!(route.start.id, Some(10));
    assert_eq!(route.end.id, Some(20));
    assert_eq!(route.points.first(), Some(&origin(5.0, 5.0)));
    assert_eq!(route.points.last(), Some(&origin(55.0, 55.0)));
    assert!(route.cost > 0.0);
}

#[rstest]
#[expect(clippy::float_arithmetic, reason = "cost comparison needs a tolerance")]
fn colony_never_beats_astar(request: RouteRequest, config: PlannerConfig) {
    let shortest = shortest_path(&request, &config).expect("route exists");
    let best = best_way(&request, &config).expect("route exists");
    assert!(!best.points.is_empty());
    assert!(shortest.cost <= best.cost + 1e-9);
}

#[rstest]
fn disjoint_zones_are_not_bridged(config: PlannerConfig) {
    let request = RouteRequest {
        zones: vec![
            square_zone(1, origin(0.0, 0.0), 20.0, ZoneType::Urban),
            square_zone(2, origin(100.0, 0.0), 20.0, ZoneType::Urban),
        ],
        pois: vec![poi(1, 5.0, 5.0, 1.0), poi(2, 105.0, 5.0, 1.0)],
        start: Some(1),
        end: Some(2),
        seed: 0,
    };
    let shortest = shortest_path(&request, &config).expect("search completes");
    assert!(shortest.points.is_empty(), "bridged via {:?}", shortest.points);
    let best = best_way(&request, &config).expect("exploration completes");
    assert!(best.points.is_empty(), "bridged via {:?}", best.points);
}

#[rstest]
fn poi_inside_restricted_zone_is_not_found(mut request: RouteRequest, config: PlannerConfig) {
    request
        .zones
        .push(square_zone(2, origin(20.0, 20.0), 20.0, ZoneType::Restricted));
    request.pois.push(poi(40, 30.0, 30.0, 1.0));
    request.end = Some(40);
    let err = shortest_path(&request, &config).expect_err("POI 40 is fenced off");
    assert_eq!(err, RouteError::PoiNotFound { poi_id: 40 });
}

#[rstest]
fn invalid_configuration_is_rejected(request: RouteRequest, mut config: PlannerConfig) {
    config.colony.ants = 0;
    let err = best_way(&request, &config).expect_err("no ants");
    assert!(matches!(
        err,
        RouteError::InvalidInput(InputError::InvalidConfig { field: "ants", .. })
    ));
}

#[rstest]
fn all_ways_reports_poi_ids_on_endpoints(request: RouteRequest, config: PlannerConfig) {
    let ways = all_ways(&request, &config).expect("exploration succeeds");
    assert!(!ways.is_empty());
    for end in ways.iter().flat_map(|way| [way.from, way.to]) {
        match end.id {
            Some(id) => assert!([10, 20, 30].contains(&id), "unexpected POI id {id}"),
            None => assert_eq!(end.weight, 0.0, "structural vertex at {:?}", end.point),
        }
    }
    assert!(ways.iter().any(|way| way.weight > 0.0));
}

#[rstest]
fn simulate_reports_every_vertex(request: RouteRequest, config: PlannerConfig) {
    let influence = simulate(&request, &config).expect("simulation succeeds");
    let tessellation = config
        .builder()
        .expect("valid configuration")
        .tessellate(&request.zones, &request.pois)
        .expect("tessellation succeeds");
    assert_eq!(influence.len(), tessellation.len());
    let poi_corner = influence
        .iter()
        .find(|point| point.x == 5.0 && point.y == 55.0)
        .expect("POI 30 is a vertex");
    assert!(poi_corner.weight > 0.0);
}

#[rstest]
fn same_seed_same_simulation(request: RouteRequest, config: PlannerConfig) {
    let first = simulate(&request, &config).expect("simulation succeeds");
    let second = simulate(&request, &config).expect("simulation succeeds");
    assert_eq!(first, second);
}
