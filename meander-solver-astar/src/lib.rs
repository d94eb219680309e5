//! Deterministic A* path finder for Meander graphs.
//!
//! [`AStar`] implements [`PathFinder`](meander_core::PathFinder) over a
//! materialised [`Graph`](meander_core::Graph). The heuristic scales
//! straight-line distance by the graph's cheapest cost-to-length ratio, so
//! discounted Available edges never make it overestimate.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod astar;

pub use astar::{AStar, AStarConfig};
