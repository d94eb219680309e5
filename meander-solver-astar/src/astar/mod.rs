//! `AStar` search with a binary-heap open set.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use meander_core::geometry::euclidean_distance;
use meander_core::{Graph, InputError, Path, PathFinder, RouteError, VertexId, ensure_endpoints};

/// Configuration for [`AStar`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AStarConfig {
    /// Give up with [`RouteError::StepLimitExceeded`] after expanding this
    /// many vertices. `None` searches until the open set is exhausted.
    pub step_limit: Option<usize>,
}

impl AStarConfig {
    /// Reject a zero step limit, which could never expand the start.
    pub const fn validate(&self) -> Result<(), InputError> {
        if matches!(self.step_limit, Some(0)) {
            return Err(InputError::InvalidConfig {
                field: "step_limit",
                reason: "must be at least 1 when set",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    vertex: VertexId,
    cost: f64,
    score: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest score, then the lowest id.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Shortest-path search over a [`Graph`].
///
/// # Examples
/// ```
/// use meander_core::test_support::square_graph;
/// use meander_core::{PathFinder, VertexId};
/// use meander_solver_astar::AStar;
///
/// let graph = square_graph();
/// let path = AStar::new()
///     .find_path(&graph, VertexId::new(0), VertexId::new(2))
///     .unwrap();
/// assert_eq!(path.edge_count(), 2);
/// assert_eq!(path.cost(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AStar {
    config: AStarConfig,
}

impl AStar {
    /// Search without a step limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Search with explicit configuration.
    #[must_use]
    pub const fn with_config(config: AStarConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Cheapest path from `start` to `goal`; empty when none exists.
    ///
    /// Ties on the estimated total cost are broken by the lower vertex id so
    /// repeated searches return the same path.
    #[expect(
        clippy::float_arithmetic,
        reason = "path costs and heuristic estimates are floating point sums"
    )]
    pub fn search(&self, graph: &Graph, start: VertexId, goal: VertexId) -> Result<Path, RouteError> {
        ensure_endpoints(graph, start, goal)?;
        let Some(target) = graph.vertex(goal).map(|vertex| vertex.location) else {
            return Err(RouteError::VertexNotFound { vertex: goal });
        };
        let floor = graph.cost_floor();
        let heuristic = |id: VertexId| {
            graph
                .vertex(id)
                .map_or(0.0, |vertex| euclidean_distance(vertex.location, target) * floor)
        };

        let mut known_costs = vec![f64::INFINITY; graph.len()];
        let mut came_from: Vec<Option<VertexId>> = vec![None; graph.len()];
        let mut queue = BinaryHeap::new();
        if let Some(slot) = known_costs.get_mut(start.index()) {
            *slot = 0.0;
        }
        queue.push(QueueItem {
            vertex: start,
            cost: 0.0,
            score: heuristic(start),
        });

        let mut expanded: usize = 0;
        while let Some(item) = queue.pop() {
            if item.vertex == goal {
                let vertices = reconstruct(&came_from, goal);
                log::debug!(
                    "found path {start} -> {goal} of {} vertices after {expanded} expansions",
                    vertices.len()
                );
                return Ok(Path::resolve(graph, vertices, item.cost));
            }
            // Stale entries stay queued; skip them instead of decreasing keys.
            let known = known_costs
                .get(item.vertex.index())
                .copied()
                .unwrap_or(f64::INFINITY);
            if item.cost > known {
                continue;
            }

            expanded = expanded.saturating_add(1);
            if let Some(limit) = self.config.step_limit
                && expanded > limit
            {
                return Err(RouteError::StepLimitExceeded { limit });
            }

            for neighbour in graph.neighbours(item.vertex) {
                let cost = item.cost + neighbour.cost;
                let Some(slot) = known_costs.get_mut(neighbour.vertex.index()) else {
                    continue;
                };
                if cost >= *slot {
                    continue;
                }
                *slot = cost;
                if let Some(parent) = came_from.get_mut(neighbour.vertex.index()) {
                    *parent = Some(item.vertex);
                }
                queue.push(QueueItem {
                    vertex: neighbour.vertex,
                    cost,
                    score: cost + heuristic(neighbour.vertex),
                });
            }
        }

        log::debug!("no path {start} -> {goal} after {expanded} expansions");
        Ok(Path::empty())
    }
}

impl PathFinder for AStar {
    fn find_path(&self, graph: &Graph, start: VertexId, goal: VertexId) -> Result<Path, RouteError> {
        self.search(graph, start, goal)
    }
}

fn reconstruct(came_from: &[Option<VertexId>], goal: VertexId) -> Vec<VertexId> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = came_from.get(current.index()).copied().flatten() {
        if path.len() > came_from.len() {
            log::warn!("predecessor chain from {goal} does not terminate; truncating");
            break;
        }
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
