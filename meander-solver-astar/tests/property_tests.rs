//! Property-based tests for the A* path finder.
//!
//! # Invariants tested
//!
//! - **Optimality:** on random discounted grids the path cost equals a
//!   reference Dijkstra distance.
//! - **Consistency:** the reported cost is the sum of the traversed edges.
//! - **Continuity:** consecutive path vertices are joined by an edge.

use meander_core::test_support::grid_graph;
use meander_core::{Graph, VertexId};
use meander_solver_astar::AStar;
use proptest::prelude::*;

/// Plain O(n²) Dijkstra used as ground truth.
#[expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "reference implementation favours brevity over defensive access"
)]
fn reference_distance(graph: &Graph, start: VertexId, goal: VertexId) -> Option<f64> {
    let mut distance = vec![f64::INFINITY; graph.len()];
    let mut done = vec![false; graph.len()];
    distance[start.index()] = 0.0;
    loop {
        let next = (0..graph.len())
            .filter(|index| !done[*index] && distance[*index].is_finite())
            .min_by(|a, b| distance[*a].total_cmp(&distance[*b]))?;
        if next == goal.index() {
            return Some(distance[next]);
        }
        done[next] = true;
        for neighbour in graph.neighbours(VertexId::new(next)) {
            let candidate = distance[next] + neighbour.cost;
            let slot = &mut distance[neighbour.vertex.index()];
            if candidate < *slot {
                *slot = candidate;
            }
        }
    }
}

fn discounted_grid(side: usize, multipliers: &[f64]) -> Graph {
    grid_graph(side, |a, b| {
        let pick = |id: VertexId| multipliers.get(id.index()).copied().unwrap_or(1.0);
        pick(a).min(pick(b))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: A* matches Dijkstra on grids with Available-style discounts.
    #[test]
    #[expect(
        clippy::float_arithmetic,
        reason = "cost comparison needs a tolerance"
    )]
    fn astar_cost_is_optimal(
        side in 2_usize..8,
        multipliers in proptest::collection::vec(0.3_f64..=1.0, 64),
        goal_seed in 0_usize..64,
    ) {
        let graph = discounted_grid(side, &multipliers);
        let goal = VertexId::new(goal_seed % graph.len());
        let start = VertexId::new(0);
        let path = AStar::new().search(&graph, start, goal).unwrap();
        let expected = reference_distance(&graph, start, goal).unwrap();
        prop_assert!((path.cost() - expected).abs() < 1e-9);
    }

    /// Property: consecutive vertices share an edge and the edges sum to the cost.
    #[test]
    #[expect(
        clippy::float_arithmetic,
        reason = "edge weights are summed to check the reported cost"
    )]
    fn path_is_continuous_and_costed(
        side in 2_usize..8,
        multipliers in proptest::collection::vec(0.3_f64..=1.0, 64),
        goal_seed in 0_usize..64,
    ) {
        let graph = discounted_grid(side, &multipliers);
        let goal = VertexId::new(goal_seed % graph.len());
        let path = AStar::new().search(&graph, VertexId::new(0), goal).unwrap();
        let mut total = 0.0;
        for pair in path.vertices().windows(2) {
            if let [a, b] = pair {
                let edge = graph.edge(*a, *b);
                prop_assert!(edge.is_some());
                total += edge.map_or(0.0, |edge| edge.weight);
            }
        }
        prop_assert!((total - path.cost()).abs() < 1e-9);
        prop_assert_eq!(path.end(), Some(goal));
    }
}
