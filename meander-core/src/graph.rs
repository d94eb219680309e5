//! Arena-backed pedestrian graph.
//!
//! Vertices live in a `Vec` and are addressed by [`VertexId`], which is the
//! vertex's position in that arena. Edges are undirected and identified by
//! [`EdgeKey`], the sorted pair of their endpoint ids.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use geo::Coord;
use thiserror::Error;

use crate::geometry::{CoordKey, euclidean_distance};

/// Index of a vertex within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VertexId(usize);

impl VertexId {
    /// Wrap an arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena index of the vertex.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A graph vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Arena index.
    pub id: VertexId,
    /// Position in map units.
    pub location: Coord<f64>,
    /// POI weight; zero for sampled structural vertices.
    pub weight: f64,
    /// Set once a second retained edge reuses this vertex.
    pub shared: bool,
}

impl Vertex {
    /// A structural vertex with zero weight.
    #[must_use]
    pub const fn structural(id: VertexId, location: Coord<f64>) -> Self {
        Self {
            id,
            location,
            weight: 0.0,
            shared: false,
        }
    }

    /// Whether the vertex stands for a point of interest.
    #[must_use]
    pub fn is_poi(&self) -> bool {
        self.weight > 0.0
    }
}

/// Undirected identity of an edge: the sorted pair of endpoint ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: VertexId,
    high: VertexId,
}

impl EdgeKey {
    /// Key of the edge between `a` and `b`, in either order.
    ///
    /// # Examples
    /// ```
    /// use meander_core::{EdgeKey, VertexId};
    ///
    /// let a = VertexId::new(3);
    /// let b = VertexId::new(12_000);
    /// assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
    /// assert_ne!(EdgeKey::new(a, b), EdgeKey::new(a, VertexId::new(2)));
    /// ```
    #[must_use]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// The endpoint with the smaller id.
    #[must_use]
    pub const fn low(self) -> VertexId {
        self.low
    }

    /// The endpoint with the larger id.
    #[must_use]
    pub const fn high(self) -> VertexId {
        self.high
    }
}

/// An undirected, weighted edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// First endpoint as discovered.
    pub from: VertexId,
    /// Second endpoint as discovered.
    pub to: VertexId,
    /// Traversal cost.
    pub weight: f64,
}

impl Edge {
    /// Construct an edge.
    #[must_use]
    pub const fn new(from: VertexId, to: VertexId, weight: f64) -> Self {
        Self { from, to, weight }
    }

    /// Undirected identity of the edge.
    #[must_use]
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from, self.to)
    }
}

/// A reachable vertex and the cost of stepping to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    /// Destination vertex.
    pub vertex: VertexId,
    /// Cost of the connecting edge.
    pub cost: f64,
}

/// Read access to vertices and their outgoing transitions.
///
/// Implemented by the materialised [`Graph`] and by
/// [`Tessellation`](crate::Tessellation), which derives transitions lazily.
pub trait Adjacency: Sync {
    /// Number of addressable vertices.
    fn vertex_count(&self) -> usize;

    /// Vertex by id, `None` when out of range.
    fn vertex(&self, id: VertexId) -> Option<&Vertex>;

    /// Outgoing transitions of `id`; empty for dead ends and unknown ids.
    fn neighbours(&self, id: VertexId) -> Cow<'_, [Neighbour]>;
}

/// Structural problems detected while assembling a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex's id does not match its arena position.
    #[error("vertex at position {position} carries id {found}")]
    MisplacedVertex {
        /// Position in the supplied vector.
        position: usize,
        /// Id stored on the vertex.
        found: VertexId,
    },
    /// An edge references a vertex outside the arena.
    #[error("edge {from}-{to} references a missing vertex")]
    DanglingEdge {
        /// First endpoint.
        from: VertexId,
        /// Second endpoint.
        to: VertexId,
    },
    /// An edge connects a vertex to itself.
    #[error("edge {vertex}-{vertex} is a loop")]
    LoopEdge {
        /// The repeated endpoint.
        vertex: VertexId,
    },
    /// Two edges share the same endpoints.
    #[error("edge {from}-{to} appears more than once")]
    DuplicateEdge {
        /// First endpoint.
        from: VertexId,
        /// Second endpoint.
        to: VertexId,
    },
    /// An edge weight is negative or not finite.
    #[error("edge {from}-{to} has an invalid weight")]
    InvalidWeight {
        /// First endpoint.
        from: VertexId,
        /// Second endpoint.
        to: VertexId,
    },
}

/// Vertices and edges produced for one request.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use meander_core::{Edge, Graph, Vertex, VertexId};
///
/// let a = VertexId::new(0);
/// let b = VertexId::new(1);
/// let graph = Graph::new(
///     vec![
///         Vertex::structural(a, Coord { x: 0.0, y: 0.0 }),
///         Vertex::structural(b, Coord { x: 3.0, y: 4.0 }),
///     ],
///     vec![Edge::new(a, b, 5.0)],
/// )
/// .unwrap();
/// assert_eq!(graph.neighbours(a).len(), 1);
/// assert_eq!(graph.vertex_at(Coord { x: 3.0, y: 4.0 }), Some(b));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Neighbour>>,
    edge_index: HashMap<EdgeKey, usize>,
    coord_index: HashMap<CoordKey, VertexId>,
    cost_floor: f64,
}

impl Graph {
    /// Assemble a graph, checking every structural invariant.
    ///
    /// Vertex ids must equal their positions. Edges must join two distinct
    /// existing vertices, appear once, and carry a finite non-negative
    /// weight. Vertices sharing a coordinate resolve to the first one in
    /// [`Self::vertex_at`].
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut coord_index = HashMap::with_capacity(vertices.len());
        for (position, vertex) in vertices.iter().enumerate() {
            if vertex.id.index() != position {
                return Err(GraphError::MisplacedVertex {
                    position,
                    found: vertex.id,
                });
            }
            coord_index
                .entry(CoordKey::from(vertex.location))
                .or_insert(vertex.id);
        }

        let mut adjacency = vec![Vec::new(); vertices.len()];
        let mut edge_index = HashMap::with_capacity(edges.len());
        let mut cost_floor: f64 = 1.0;
        for (position, edge) in edges.iter().enumerate() {
            let (Some(from), Some(to)) = (
                vertices.get(edge.from.index()),
                vertices.get(edge.to.index()),
            ) else {
                return Err(GraphError::DanglingEdge {
                    from: edge.from,
                    to: edge.to,
                });
            };
            if edge.from == edge.to {
                return Err(GraphError::LoopEdge { vertex: edge.from });
            }
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(GraphError::InvalidWeight {
                    from: edge.from,
                    to: edge.to,
                });
            }
            if edge_index.insert(edge.key(), position).is_some() {
                return Err(GraphError::DuplicateEdge {
                    from: edge.from,
                    to: edge.to,
                });
            }
            let length = euclidean_distance(from.location, to.location);
            if length > 0.0 {
                cost_floor = cost_floor.min(edge.weight / length);
            }
            for (source, target) in [(edge.from, edge.to), (edge.to, edge.from)] {
                if let Some(list) = adjacency.get_mut(source.index()) {
                    list.push(Neighbour {
                        vertex: target,
                        cost: edge.weight,
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            edges,
            adjacency,
            edge_index,
            coord_index,
            cost_floor,
        })
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices in id order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertex by id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Vertex sitting exactly at `location`.
    #[must_use]
    pub fn vertex_at(&self, location: Coord<f64>) -> Option<VertexId> {
        self.coord_index.get(&CoordKey::from(location)).copied()
    }

    /// Edge between two vertices, in either direction.
    #[must_use]
    pub fn edge(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.edge_index
            .get(&EdgeKey::new(a, b))
            .and_then(|&position| self.edges.get(position))
    }

    /// Outgoing transitions of a vertex.
    #[must_use]
    pub fn neighbours(&self, id: VertexId) -> &[Neighbour] {
        self.adjacency
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Smallest ratio of edge weight to edge length, capped at 1.
    ///
    /// Scaling straight-line distance by this ratio never overestimates the
    /// remaining cost, whatever zone multipliers produced the weights.
    #[must_use]
    pub const fn cost_floor(&self) -> f64 {
        self.cost_floor
    }
}

impl Adjacency for Graph {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        Self::vertex(self, id)
    }

    fn neighbours(&self, id: VertexId) -> Cow<'_, [Neighbour]> {
        Cow::Borrowed(Self::neighbours(self, id))
    }
}
