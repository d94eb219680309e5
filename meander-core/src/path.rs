//! Ordered walks through a graph.

use geo::Coord;

use crate::{Adjacency, VertexId};

/// A walk from a start vertex to an end vertex.
///
/// An empty path is how solvers report that no route exists.
///
/// # Examples
/// ```
/// use meander_core::Path;
///
/// let path = Path::empty();
/// assert!(path.is_empty());
/// assert_eq!(path.cost(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    vertices: Vec<VertexId>,
    points: Vec<Coord<f64>>,
    cost: f64,
}

impl Path {
    /// The "no route" result.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            points: Vec::new(),
            cost: 0.0,
        }
    }

    /// Build a path from vertex ids, looking up their coordinates.
    ///
    /// Ids unknown to `adjacency` are dropped with a warning; solvers only
    /// produce ids they read from the same adjacency.
    pub fn resolve<A>(adjacency: &A, vertices: Vec<VertexId>, cost: f64) -> Self
    where
        A: Adjacency + ?Sized,
    {
        let mut kept = Vec::with_capacity(vertices.len());
        let mut points = Vec::with_capacity(vertices.len());
        for id in vertices {
            if let Some(vertex) = adjacency.vertex(id) {
                kept.push(id);
                points.push(vertex.location);
            } else {
                log::warn!("vertex {id} missing while resolving a path; dropping it");
                debug_assert!(false, "vertex {id} missing while resolving a path");
            }
        }
        Self {
            vertices: kept,
            points,
            cost,
        }
    }

    /// Whether the path has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex ids from start to end.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Coordinates from start to end.
    #[must_use]
    pub fn points(&self) -> &[Coord<f64>] {
        &self.points
    }

    /// Sum of traversed edge weights.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of edges walked.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// First vertex, if any.
    #[must_use]
    pub fn start(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    /// Last vertex, if any.
    #[must_use]
    pub fn end(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }
}
