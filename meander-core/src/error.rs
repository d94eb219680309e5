//! Error types shared by the graph builder and the route solvers.
//!
//! "No path exists" is deliberately absent: solvers report it as an empty
//! [`Path`](crate::Path) so callers can tell it apart from [`RouteError`]
//! conditions such as a missing endpoint.

use thiserror::Error;

use crate::VertexId;
use crate::graph::GraphError;

/// Malformed request data or configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A zone ring has fewer than three vertices.
    #[error("zone {zone_id} has {found} ring vertices; at least 3 are required")]
    DegenerateRing {
        /// Identifier of the offending zone.
        zone_id: u64,
        /// Number of vertices after dropping a closing duplicate.
        found: usize,
    },
    /// A zone ring contains `NaN` or an infinite coordinate.
    #[error("zone {zone_id} has a non-finite coordinate")]
    NonFiniteZone {
        /// Identifier of the offending zone.
        zone_id: u64,
    },
    /// A point of interest has `NaN` or an infinite coordinate.
    #[error("point of interest {poi_id} has a non-finite coordinate")]
    NonFinitePoi {
        /// Identifier of the offending point of interest.
        poi_id: u64,
    },
    /// A point of interest weight is negative or not finite.
    #[error("point of interest {poi_id} has invalid weight {weight}")]
    InvalidWeight {
        /// Identifier of the offending point of interest.
        poi_id: u64,
        /// Weight supplied by the caller.
        weight: f64,
    },
    /// A configuration value is out of range.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// Name of the configuration field.
        field: &'static str,
        /// Human readable constraint that was violated.
        reason: &'static str,
    },
}

/// Failure of a weighted random draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// There was nothing to draw from.
    #[error("cannot select from an empty set of points of interest")]
    Empty,
    /// Every candidate had zero weight.
    #[error("total weight of the candidates is zero")]
    ZeroTotalWeight,
}

/// Errors surfaced by graph construction and route computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// The request or configuration was rejected before any work started.
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    /// A start/end pair was required but the request has too few POIs.
    #[error("at least two points of interest are required, found {found}")]
    NotEnoughPois {
        /// Number of POIs in the request.
        found: usize,
    },
    /// A requested POI does not exist or has no vertex in the graph.
    #[error("point of interest {poi_id} is not present in the graph")]
    PoiNotFound {
        /// Identifier of the missing point of interest.
        poi_id: u64,
    },
    /// A requested vertex does not exist in the graph.
    #[error("vertex {vertex} is not present in the graph")]
    VertexNotFound {
        /// Identifier of the missing vertex.
        vertex: VertexId,
    },
    /// A weighted draw of endpoints failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// Graph parts violated a structural invariant.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The triangulation backend rejected the point set.
    #[error("triangulation failed: {reason}")]
    Tessellation {
        /// Diagnostic reported by the backend.
        reason: String,
    },
    /// A* expanded more vertices than its configured limit.
    #[error("search exceeded its limit of {limit} expanded vertices")]
    StepLimitExceeded {
        /// Configured expansion limit.
        limit: usize,
    },
}

impl RouteError {
    /// Whether the error is a missing POI or vertex.
    ///
    /// # Examples
    /// ```
    /// use meander_core::RouteError;
    ///
    /// assert!(RouteError::PoiNotFound { poi_id: 7 }.is_not_found());
    /// assert!(!RouteError::NotEnoughPois { found: 1 }.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PoiNotFound { .. } | Self::VertexNotFound { .. })
    }
}
