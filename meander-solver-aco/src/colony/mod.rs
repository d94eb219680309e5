//! Ant colony optimisation over any [`Adjacency`].

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use meander_core::{
    Adjacency, EdgeKey, Graph, Influence, InputError, Path, PathFinder, RouteError, SelectionError,
    VertexId, ensure_endpoints, roulette_index,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

mod pheromone;
mod walk;

pub use pheromone::PheromoneTable;
use walk::{Ant, MIN_COST, Walk};

/// Tuning knobs for [`AntColony`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AntColonyConfig {
    /// Walks per iteration.
    pub ants: usize,
    /// Number of deposit rounds.
    pub iterations: usize,
    /// Exponent applied to pheromone levels.
    pub alpha: f64,
    /// Exponent applied to inverse edge cost.
    pub beta: f64,
    /// Fraction of pheromone lost after every iteration, in `[0, 1]`.
    pub evaporation: f64,
    /// Level every edge starts with.
    pub initial_pheromone: f64,
    /// Pheromone spread over a successful walk, divided by its cost.
    pub deposit: f64,
    /// Longest walk in edges; `None` allows one step per vertex.
    pub max_steps: Option<usize>,
    /// Stop starting new iterations once this much time has passed.
    pub time_limit: Option<Duration>,
    /// Seed used by the [`PathFinder`] implementation.
    pub seed: u64,
}

impl Default for AntColonyConfig {
    fn default() -> Self {
        Self {
            ants: 20,
            iterations: 50,
            alpha: 1.0,
            beta: 2.0,
            evaporation: 0.5,
            initial_pheromone: 1.0,
            deposit: 1.0,
            max_steps: None,
            time_limit: None,
            seed: 0,
        }
    }
}

impl AntColonyConfig {
    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), InputError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), InputError> {
            Err(InputError::InvalidConfig { field, reason })
        };
        if self.ants == 0 {
            return invalid("ants", "must be at least 1");
        }
        if self.iterations == 0 {
            return invalid("iterations", "must be at least 1");
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return invalid("alpha", "must be finite and non-negative");
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return invalid("beta", "must be finite and non-negative");
        }
        if !(0.0..=1.0).contains(&self.evaporation) {
            return invalid("evaporation", "must lie in [0, 1]");
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return invalid("initial_pheromone", "must be finite and positive");
        }
        if !(self.deposit.is_finite() && self.deposit > 0.0) {
            return invalid("deposit", "must be finite and positive");
        }
        if matches!(self.max_steps, Some(0)) {
            return invalid("max_steps", "must be at least 1 when set");
        }
        Ok(())
    }
}

/// Cheapest successful walk found by [`AntColony::best_way`].
#[derive(Debug, Clone, PartialEq)]
pub struct BestWay {
    /// Best path; empty when no ant reached the end.
    pub path: Path,
    /// Iterations completed before finishing or hitting the time limit.
    pub iterations: usize,
    /// Walks that reached their end vertex.
    pub successful_walks: usize,
}

/// An edge walked during [`AntColony::all_ways`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversedEdge {
    /// Lower endpoint id.
    pub from: VertexId,
    /// Higher endpoint id.
    pub to: VertexId,
    /// Total pheromone deposited on the edge, ignoring evaporation.
    pub weight: f64,
}

/// Everything the colony learnt while ants chose their own endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    /// Every traversed edge, ordered by [`EdgeKey`]. Edges used only by
    /// failed walks carry zero weight.
    pub edges: Vec<TraversedEdge>,
    /// Visits per vertex plus POI weight per visit.
    pub influence: Influence,
    /// Iterations completed.
    pub iterations: usize,
    /// Walks that reached their end vertex.
    pub successful_walks: usize,
    /// Cheapest successful walk of any pair.
    pub best: Path,
}

/// Aggregate state threaded through the iterations of one run.
struct Run {
    pheromones: PheromoneTable,
    deposits: BTreeMap<EdgeKey, f64>,
    influence: Influence,
    best: Option<Walk>,
    iterations: usize,
    successful_walks: usize,
}

/// Pheromone-guided random walks.
///
/// # Examples
/// ```
/// use meander_core::test_support::square_graph;
/// use meander_core::VertexId;
/// use meander_solver_aco::AntColony;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let graph = square_graph();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let best = AntColony::new()
///     .best_way(&graph, VertexId::new(0), VertexId::new(2), &mut rng)
///     .unwrap();
/// assert_eq!(best.path.edge_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AntColony {
    config: AntColonyConfig,
}

impl AntColony {
    /// Colony with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Colony with a validated configuration.
    pub fn with_config(config: AntColonyConfig) -> Result<Self, InputError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AntColonyConfig {
        &self.config
    }

    /// Send every ant from `start` towards `end` and keep the cheapest walk.
    ///
    /// # Errors
    /// [`RouteError::VertexNotFound`] when either endpoint is unknown.
    pub fn best_way<A, R>(
        &self,
        adjacency: &A,
        start: VertexId,
        end: VertexId,
        rng: &mut R,
    ) -> Result<BestWay, RouteError>
    where
        A: Adjacency + ?Sized,
        R: Rng + ?Sized,
    {
        ensure_endpoints(adjacency, start, end)?;
        let run = self.run(adjacency, rng, |_| Some((start, end)));
        log::debug!(
            "best way {start} -> {end}: {} successful walks over {} iterations",
            run.successful_walks,
            run.iterations
        );
        Ok(BestWay {
            path: best_path(adjacency, run.best),
            iterations: run.iterations,
            successful_walks: run.successful_walks,
        })
    }

    /// Let every ant draw its own start and end among `endpoints`, weighted
    /// by vertex weight, and report where the colony went.
    ///
    /// # Errors
    /// - [`RouteError::NotEnoughPois`] with fewer than two endpoints;
    /// - [`RouteError::VertexNotFound`] for an endpoint outside the graph;
    /// - [`SelectionError::ZeroTotalWeight`] when fewer than two endpoints
    ///   carry positive weight.
    pub fn all_ways<A, R>(
        &self,
        adjacency: &A,
        endpoints: &[VertexId],
        rng: &mut R,
    ) -> Result<Exploration, RouteError>
    where
        A: Adjacency + ?Sized,
        R: Rng + ?Sized,
    {
        if endpoints.len() < 2 {
            return Err(RouteError::NotEnoughPois {
                found: endpoints.len(),
            });
        }
        let mut weights = Vec::with_capacity(endpoints.len());
        for &vertex in endpoints {
            let found = adjacency
                .vertex(vertex)
                .ok_or(RouteError::VertexNotFound { vertex })?;
            weights.push(found.weight);
        }
        if weights.iter().filter(|weight| **weight > 0.0).count() < 2 {
            return Err(SelectionError::ZeroTotalWeight.into());
        }

        let run = self.run(adjacency, rng, |ant_rng| draw_pair(endpoints, &weights, ant_rng));
        log::debug!(
            "explored {} edges with {} successful walks",
            run.deposits.len(),
            run.successful_walks
        );
        let edges = run
            .deposits
            .iter()
            .map(|(key, weight)| TraversedEdge {
                from: key.low(),
                to: key.high(),
                weight: *weight,
            })
            .collect();
        Ok(Exploration {
            edges,
            influence: run.influence,
            iterations: run.iterations,
            successful_walks: run.successful_walks,
            best: best_path(adjacency, run.best),
        })
    }

    #[expect(clippy::float_arithmetic, reason = "deposits and influence accumulate")]
    fn run<A, R, F>(&self, adjacency: &A, rng: &mut R, mut assign: F) -> Run
    where
        A: Adjacency + ?Sized,
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> Option<(VertexId, VertexId)>,
    {
        let config = &self.config;
        let mut run = Run {
            pheromones: PheromoneTable::new(config.initial_pheromone),
            deposits: BTreeMap::new(),
            influence: Influence::new(adjacency.vertex_count()),
            best: None,
            iterations: 0,
            successful_walks: 0,
        };
        let started = Instant::now();

        for _ in 0..config.iterations {
            if let Some(limit) = config.time_limit
                && started.elapsed() >= limit
            {
                log::warn!(
                    "ant colony stopped after {} of {} iterations: time limit {limit:?} reached",
                    run.iterations,
                    config.iterations
                );
                break;
            }

            let tasks: Vec<(VertexId, VertexId, u64)> = (0..config.ants)
                .filter_map(|_| {
                    let (start, end) = assign(rng)?;
                    Some((start, end, rng.next_u64()))
                })
                .collect();
            let pheromones = &run.pheromones;
            let walks: Vec<Walk> = tasks
                .par_iter()
                .map(|&(start, end, seed)| {
                    let mut ant_rng = ChaCha8Rng::seed_from_u64(seed);
                    Ant::new(adjacency, pheromones, config).walk(start, end, &mut ant_rng)
                })
                .collect();

            run.pheromones.evaporate(config.evaporation);
            for walk in walks {
                for &vertex in &walk.vertices {
                    let bonus = adjacency.vertex(vertex).map_or(0.0, |found| found.weight);
                    run.influence.add(vertex, 1.0 + bonus);
                }
                if !walk.reached_end {
                    for key in walk.edge_keys() {
                        run.deposits.entry(key).or_insert(0.0);
                    }
                    continue;
                }
                run.successful_walks += 1;
                let amount = config.deposit / walk.cost.max(MIN_COST);
                for key in walk.edge_keys() {
                    run.pheromones.deposit(key, amount);
                    *run.deposits.entry(key).or_insert(0.0) += amount;
                }
                if run.best.as_ref().is_none_or(|best| walk.cost < best.cost) {
                    run.best = Some(walk);
                }
            }
            run.iterations += 1;
        }
        run
    }
}

impl PathFinder for AntColony {
    fn find_path(&self, graph: &Graph, start: VertexId, goal: VertexId) -> Result<Path, RouteError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.best_way(graph, start, goal, &mut rng)
            .map(|best| best.path)
    }
}

fn best_path<A: Adjacency + ?Sized>(adjacency: &A, best: Option<Walk>) -> Path {
    best.map_or_else(Path::empty, |walk| {
        Path::resolve(adjacency, walk.vertices, walk.cost)
    })
}

/// Roulette draw of a start, then of an end among the other endpoints.
fn draw_pair<R: Rng + ?Sized>(
    endpoints: &[VertexId],
    weights: &[f64],
    rng: &mut R,
) -> Option<(VertexId, VertexId)> {
    let first = roulette_index(weights, rng)?;
    let remaining: Vec<f64> = weights
        .iter()
        .enumerate()
        .map(|(index, weight)| if index == first { 0.0 } else { *weight })
        .collect();
    let second = roulette_index(&remaining, rng)?;
    Some((*endpoints.get(first)?, *endpoints.get(second)?))
}
