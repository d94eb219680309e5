//! Behavioural tests for `AntColony` using rstest-bdd.

use std::cell::RefCell;

use meander_core::test_support::{disconnected_graph, square_graph, weighted_square_graph};
use meander_core::{Graph, RouteError, VertexId};
use meander_solver_aco::{AntColony, AntColonyConfig, BestWay, Exploration};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct ColonyWorld {
    graph: RefCell<Graph>,
    best: RefCell<Option<Result<BestWay, RouteError>>>,
    explorations: RefCell<Vec<Exploration>>,
}

impl ColonyWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn colony() -> AntColony {
        AntColony::with_config(AntColonyConfig {
            ants: 10,
            iterations: 8,
            ..AntColonyConfig::default()
        })
        .expect("valid configuration")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_best(&self) -> BestWay {
        self.best
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
            .expect("expected a best way")
    }

    fn search(&self, start: usize, end: usize) {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let outcome = Self::colony().best_way(
            &*self.graph.borrow(),
            VertexId::new(start),
            VertexId::new(end),
            &mut rng,
        );
        self.best.replace(Some(outcome));
    }
}

#[fixture]
fn world() -> ColonyWorld {
    ColonyWorld::default()
}

#[given("a unit square graph")]
fn given_square(world: &ColonyWorld) {
    world.graph.replace(square_graph());
}

#[given("a graph with two separate edges")]
fn given_disconnected(world: &ColonyWorld) {
    world.graph.replace(disconnected_graph());
}

#[given("a square graph with weighted corners")]
fn given_weighted(world: &ColonyWorld) {
    world
        .graph
        .replace(weighted_square_graph([2.0, 1.0, 3.0, 0.0]));
}

#[when("the colony searches from corner 0 to corner 2 with seed 7")]
fn when_search_across(world: &ColonyWorld) {
    world.search(0, 2);
}

#[when("the colony searches from corner 0 to corner 3 with seed 7")]
fn when_search_disconnected(world: &ColonyWorld) {
    world.search(0, 3);
}

#[when("the colony explores twice with seed 11")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_explore_twice(world: &ColonyWorld) {
    let endpoints = [VertexId::new(0), VertexId::new(1), VertexId::new(2)];
    for _ in 0..2 {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let exploration = ColonyWorld::colony()
            .all_ways(&*world.graph.borrow(), &endpoints, &mut rng)
            .expect("exploration should succeed");
        world.explorations.borrow_mut().push(exploration);
    }
}

#[then("the best way has 2 edges")]
fn then_two_edges(world: &ColonyWorld) {
    assert_eq!(world.expect_best().path.edge_count(), 2);
}

#[then("every ant reached the end")]
fn then_all_succeeded(world: &ColonyWorld) {
    assert_eq!(world.expect_best().successful_walks, 80);
}

#[then("the best way is empty")]
fn then_empty(world: &ColonyWorld) {
    let best = world.expect_best();
    assert!(best.path.is_empty());
    assert_eq!(best.successful_walks, 0);
}

#[then("both explorations are identical")]
fn then_identical(world: &ColonyWorld) {
    let explorations = world.explorations.borrow();
    match explorations.as_slice() {
        [first, second] => assert_eq!(first, second),
        other => panic!("expected two explorations, got {}", other.len()),
    }
}

#[scenario(path = "tests/features/colony.feature", index = 0)]
fn square_best_way(world: ColonyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/colony.feature", index = 1)]
fn unreachable_end(world: ColonyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/colony.feature", index = 2)]
fn repeatable_exploration(world: ColonyWorld) {
    let _ = world;
}
