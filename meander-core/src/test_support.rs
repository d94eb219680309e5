//! Small zones, POIs and graphs shared by unit and behaviour tests.

use geo::Coord;

use crate::{Edge, Graph, PointOfInterest, Vertex, VertexId, Zone, ZoneType};

/// Axis-aligned square zone with its lower-left corner at `origin`.
///
/// # Panics
/// Panics if `side` is not a positive finite number.
#[must_use]
pub fn square_zone(id: u64, origin: Coord<f64>, side: f64, zone_type: ZoneType) -> Zone {
    let ring = vec![
        origin,
        Coord {
            x: origin.x + side,
            y: origin.y,
        },
        Coord {
            x: origin.x + side,
            y: origin.y + side,
        },
        Coord {
            x: origin.x,
            y: origin.y + side,
        },
    ];
    match Zone::new(id, ring, zone_type) {
        Ok(zone) => zone,
        Err(err) => panic!("invalid test zone: {err}"),
    }
}

/// Point of interest at `(x, y)`.
///
/// # Panics
/// Panics on non-finite input or a negative weight.
#[must_use]
pub fn poi(id: u64, x: f64, y: f64, weight: f64) -> PointOfInterest {
    match PointOfInterest::new(id, Coord { x, y }, weight) {
        Ok(poi) => poi,
        Err(err) => panic!("invalid test POI: {err}"),
    }
}

fn assemble(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Graph {
    match Graph::new(vertices, edges) {
        Ok(graph) => graph,
        Err(err) => panic!("invalid test graph: {err}"),
    }
}

fn vertices(points: &[(f64, f64)]) -> Vec<Vertex> {
    points
        .iter()
        .enumerate()
        .map(|(index, (x, y))| Vertex::structural(VertexId::new(index), Coord { x: *x, y: *y }))
        .collect()
}

/// Unit square `0 -> 1 -> 2 -> 3 -> 0` with unit edges and no diagonals.
///
/// Opposite corners `0` and `2` are two edges apart either way round.
#[must_use]
pub fn square_graph() -> Graph {
    weighted_square_graph([0.0; 4])
}

/// [`square_graph`] with the given POI weight on each corner.
#[must_use]
pub fn weighted_square_graph(weights: [f64; 4]) -> Graph {
    let ids: Vec<VertexId> = (0..4).map(VertexId::new).collect();
    let edges = (0..4)
        .map(|i| Edge::new(ids[i], ids[(i + 1) % 4], 1.0))
        .collect();
    let mut corners = vertices(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    for (vertex, weight) in corners.iter_mut().zip(weights) {
        vertex.weight = weight;
    }
    assemble(corners, edges)
}

/// Two vertices joined by one edge of the given weight.
#[must_use]
pub fn two_vertex_graph(weight: f64) -> Graph {
    assemble(
        vertices(&[(0.0, 0.0), (1.0, 0.0)]),
        vec![Edge::new(VertexId::new(0), VertexId::new(1), weight)],
    )
}

/// Two separate edges, `0 - 1` and `2 - 3`, with nothing between them.
#[must_use]
pub fn disconnected_graph() -> Graph {
    assemble(
        vertices(&[(0.0, 0.0), (1.0, 0.0), (5.0, 0.0), (6.0, 0.0)]),
        vec![
            Edge::new(VertexId::new(0), VertexId::new(1), 1.0),
            Edge::new(VertexId::new(2), VertexId::new(3), 1.0),
        ],
    )
}

/// `side × side` lattice with unit spacing and 4-neighbour edges.
///
/// Vertex `row * side + column` sits at `(column, row)`. Edge weights are
/// the unit length scaled by `cost(from, to)`.
#[must_use]
pub fn grid_graph(side: usize, cost: impl Fn(VertexId, VertexId) -> f64) -> Graph {
    let points: Vec<(f64, f64)> = (0..side)
        .flat_map(|row| (0..side).map(move |column| (column as f64, row as f64)))
        .collect();
    let mut edges = Vec::new();
    for row in 0..side {
        for column in 0..side {
            let here = VertexId::new(row * side + column);
            if column + 1 < side {
                let right = VertexId::new(row * side + column + 1);
                edges.push(Edge::new(here, right, cost(here, right)));
            }
            if row + 1 < side {
                let up = VertexId::new((row + 1) * side + column);
                edges.push(Edge::new(here, up, cost(here, up)));
            }
        }
    }
    assemble(vertices(&points), edges)
}
