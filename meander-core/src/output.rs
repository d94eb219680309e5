//! Serialisable results handed back to callers.

use geo::Coord;

use crate::{PointOfInterest, Vertex};

/// A route endpoint or traversed vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoiOutput {
    /// POI id; `None` for structural vertices.
    pub id: Option<u64>,
    /// Position in map units.
    pub point: Coord<f64>,
    /// POI weight; zero for structural vertices.
    pub weight: f64,
}

impl PoiOutput {
    /// Describe a graph vertex that no POI has claimed.
    #[must_use]
    pub const fn from_vertex(vertex: &Vertex) -> Self {
        Self {
            id: None,
            point: vertex.location,
            weight: vertex.weight,
        }
    }

    /// Describe a point of interest by its own id.
    #[must_use]
    pub const fn from_poi(poi: &PointOfInterest) -> Self {
        Self {
            id: Some(poi.id),
            point: poi.location,
            weight: poi.weight,
        }
    }
}

/// A single route between two POIs.
///
/// An empty `points` list means the POIs are not connected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathOutput {
    /// Starting POI.
    pub start: PoiOutput,
    /// Destination POI.
    pub end: PoiOutput,
    /// Coordinates from start to end.
    pub points: Vec<Coord<f64>>,
    /// Sum of traversed edge weights.
    pub cost: f64,
}

/// An edge walked during exploration and the pheromone it gathered.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayOutput {
    /// First endpoint.
    pub from: PoiOutput,
    /// Second endpoint.
    pub to: PoiOutput,
    /// Cumulative deposit on the edge.
    pub weight: f64,
}

/// Influence accumulated at one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfluencePoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Accumulated influence.
    pub weight: f64,
}

impl InfluencePoint {
    /// Influence `weight` located at `point`.
    #[must_use]
    pub const fn new(point: Coord<f64>, weight: f64) -> Self {
        Self {
            x: point.x,
            y: point.y,
            weight,
        }
    }
}
