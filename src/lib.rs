//! Facade crate for the Meander pedestrian route planner.
//!
//! This crate re-exports the core domain types, exposes the A* and ant
//! colony solvers behind feature flags, and ties them together in
//! [`pipeline`]: one call per request, from zones and points of interest to
//! serialisable output.

#![forbid(unsafe_code)]

pub mod pipeline;

pub use meander_core::{
    Adjacency, Edge, EdgeKey, EnrichmentConfig, Graph, GraphBuilder, GraphConfig, Influence,
    InfluencePoint, InputError, Path, PathFinder, PathOutput, PoiOutput, PointOfInterest,
    RouteError, RouteRequest, SelectionError, Tessellation, Vertex, VertexId, WayOutput, Zone,
    ZoneType, build_graph, geometry, select_poi_by_weight,
};

#[cfg(feature = "solver-astar")]
pub use meander_solver_astar::{AStar, AStarConfig};

#[cfg(feature = "solver-aco")]
pub use meander_solver_aco::{AntColony, AntColonyConfig, BestWay, Exploration, TraversedEdge};

pub use pipeline::PlannerConfig;
