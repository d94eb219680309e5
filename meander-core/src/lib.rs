//! Core domain types and graph construction for the Meander planner.
//!
//! Zones and points of interest are sampled into candidate vertices,
//! triangulated, and filtered into a walkable [`Graph`]. Route solvers live in
//! their own crates and plug in through [`PathFinder`] or the lower level
//! [`Adjacency`] view.
//!
//! Constructors return `Result` to surface invalid input early; nothing in
//! this crate performs I/O.

#![forbid(unsafe_code)]

mod builder;
mod enrich;
mod error;
pub mod geometry;
mod graph;
mod influence;
mod output;
mod path;
mod poi;
mod request;
mod solver;
mod tessellation;
mod zone;
mod zone_index;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use builder::{GraphBuilder, build_graph};
pub use enrich::{
    Enricher, EnrichmentConfig, MAX_LATTICE_SIDE, roulette_index, select_poi_by_weight,
};
pub use error::{InputError, RouteError, SelectionError};
pub use graph::{Adjacency, Edge, EdgeKey, Graph, GraphError, Neighbour, Vertex, VertexId};
pub use influence::Influence;
pub use output::{InfluencePoint, PathOutput, PoiOutput, WayOutput};
pub use path::Path;
pub use poi::PointOfInterest;
pub use request::RouteRequest;
pub use solver::{PathFinder, ensure_endpoints};
pub use tessellation::{
    CrossRestrictedFilter, EdgeDecision, EdgeFilter, FakeEdgeFilter, GraphConfig, Neighbourhood,
    Tessellation,
};
pub use zone::{Zone, ZoneType};
pub use zone_index::ZoneIndex;
