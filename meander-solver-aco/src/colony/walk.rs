//! One ant's walk through the graph.

use meander_core::{Adjacency, EdgeKey, Neighbour, VertexId, roulette_index};
use rand::Rng;

use super::{AntColonyConfig, PheromoneTable};

/// Edge costs below this are treated as this when computing visibility.
pub(crate) const MIN_COST: f64 = 1e-9;

/// Where an ant is in its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    AtVertex(VertexId),
    Completed { reached_end: bool },
}

/// Vertices visited by one ant, in order, and what it cost.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Walk {
    pub(crate) vertices: Vec<VertexId>,
    pub(crate) cost: f64,
    pub(crate) reached_end: bool,
}

impl Walk {
    pub(crate) fn edge_keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.vertices
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] => Some(EdgeKey::new(*a, *b)),
                _ => None,
            })
    }
}

/// Read-only view shared by every ant of one iteration.
pub(crate) struct Ant<'a, A: ?Sized> {
    adjacency: &'a A,
    pheromones: &'a PheromoneTable,
    config: &'a AntColonyConfig,
}

impl<'a, A> Ant<'a, A>
where
    A: Adjacency + ?Sized,
{
    pub(crate) const fn new(
        adjacency: &'a A,
        pheromones: &'a PheromoneTable,
        config: &'a AntColonyConfig,
    ) -> Self {
        Self {
            adjacency,
            pheromones,
            config,
        }
    }

    /// Walk from `start` until `end`, a dead end or the step budget.
    #[expect(clippy::float_arithmetic, reason = "walk cost accumulates edge weights")]
    pub(crate) fn walk<R: Rng + ?Sized>(&self, start: VertexId, end: VertexId, rng: &mut R) -> Walk {
        let budget = self
            .config
            .max_steps
            .unwrap_or_else(|| self.adjacency.vertex_count());
        let mut visited = vec![false; self.adjacency.vertex_count()];
        mark(&mut visited, start);
        let mut vertices = vec![start];
        let mut cost = 0.0;
        let mut state = WalkState::AtVertex(start);
        loop {
            state = match state {
                WalkState::AtVertex(current) if current == end => {
                    WalkState::Completed { reached_end: true }
                }
                WalkState::AtVertex(_) if vertices.len() > budget => {
                    WalkState::Completed { reached_end: false }
                }
                WalkState::AtVertex(current) => match self.choose(current, &visited, rng) {
                    Some(next) => {
                        mark(&mut visited, next.vertex);
                        vertices.push(next.vertex);
                        cost += next.cost;
                        WalkState::AtVertex(next.vertex)
                    }
                    None => WalkState::Completed { reached_end: false },
                },
                WalkState::Completed { reached_end } => {
                    return Walk {
                        vertices,
                        cost,
                        reached_end,
                    };
                }
            };
        }
    }

    /// Pick an unvisited neighbour with probability ∝ τ^α · (1/cost)^β.
    ///
    /// Falls back to a uniform choice when every attractiveness underflows
    /// to zero, for instance after total evaporation.
    #[expect(clippy::float_arithmetic, reason = "transition weights are products of powers")]
    fn choose<R: Rng + ?Sized>(
        &self,
        current: VertexId,
        visited: &[bool],
        rng: &mut R,
    ) -> Option<Neighbour> {
        let options: Vec<Neighbour> = self
            .adjacency
            .neighbours(current)
            .iter()
            .filter(|neighbour| !is_visited(visited, neighbour.vertex))
            .copied()
            .collect();
        if options.is_empty() {
            return None;
        }
        let weights: Vec<f64> = options
            .iter()
            .map(|neighbour| {
                let trail = self.pheromones.level(EdgeKey::new(current, neighbour.vertex));
                let visibility = 1.0 / neighbour.cost.max(MIN_COST);
                trail.powf(self.config.alpha) * visibility.powf(self.config.beta)
            })
            .collect();
        let index =
            roulette_index(&weights, rng).unwrap_or_else(|| rng.gen_range(0..options.len()));
        options.get(index).copied()
    }
}

fn mark(visited: &mut [bool], vertex: VertexId) {
    if let Some(slot) = visited.get_mut(vertex.index()) {
        *slot = true;
    }
}

fn is_visited(visited: &[bool], vertex: VertexId) -> bool {
    visited.get(vertex.index()).copied().unwrap_or(true)
}
