//! Ant colony route optimiser for Meander graphs.
//!
//! [`AntColony`] explores any [`Adjacency`](meander_core::Adjacency) with
//! pheromone-guided random walks. It finds a best way between two vertices,
//! or lets every ant pick its own weighted endpoints to score the edges and
//! vertices that pedestrians are most likely to use.
//!
//! Walks within an iteration run in parallel on the `rayon` pool. Each ant
//! gets its own `ChaCha8Rng` seeded from the caller's generator before the
//! iteration starts, so results depend only on the caller's seed.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod colony;

pub use colony::{AntColony, AntColonyConfig, BestWay, Exploration, PheromoneTable, TraversedEdge};
