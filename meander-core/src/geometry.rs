//! Planar geometry kernel.
//!
//! Rings may be passed open or closed; every routine walks the implied
//! closing segment itself. Points lying on a ring segment count as inside
//! the polygon everywhere in the crate.

use std::collections::HashSet;

use geo::{BoundingRect, Coord, Distance, Euclidean, LineString, Rect, Triangle};
use spade::{DelaunayTriangulation, InsertionError, Point2, Triangulation};

/// Absolute tolerance used for lattice bounds and boundary tests.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Upper bound on refinement passes in [`generate_delaunay_points`].
pub const MAX_REFINEMENT_ROUNDS: usize = 12;

/// Upper bound on the size of the point set built by
/// [`generate_delaunay_points`].
pub const MAX_DENSIFIED_POINTS: usize = 4096;

/// Hashable identity of a coordinate.
///
/// Two coordinates share a key exactly when they compare equal, with
/// `-0.0` folded into `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey(u64, u64);

impl From<Coord<f64>> for CoordKey {
    fn from(coord: Coord<f64>) -> Self {
        Self(fold_zero(coord.x).to_bits(), fold_zero(coord.y).to_bits())
    }
}

fn fold_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Insertion-ordered set of coordinates.
#[derive(Debug, Default, Clone)]
pub struct PointSet {
    points: Vec<Coord<f64>>,
    seen: HashSet<CoordKey>,
}

impl PointSet {
    /// Add a coordinate, returning `false` if it was already present.
    pub fn insert(&mut self, coord: Coord<f64>) -> bool {
        if self.seen.insert(CoordKey::from(coord)) {
            self.points.push(coord);
            true
        } else {
            false
        }
    }

    /// Whether an equal coordinate has been inserted.
    #[must_use]
    pub fn contains(&self, coord: Coord<f64>) -> bool {
        self.seen.contains(&CoordKey::from(coord))
    }

    /// Number of distinct coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinates in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Coord<f64>] {
        &self.points
    }

    /// Consume the set, yielding coordinates in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Coord<f64>> {
        self.points
    }
}

impl Extend<Coord<f64>> for PointSet {
    fn extend<I: IntoIterator<Item = Coord<f64>>>(&mut self, iter: I) {
        for coord in iter {
            self.insert(coord);
        }
    }
}

/// Straight-line distance between two coordinates.
#[must_use]
pub fn euclidean_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(a, b)
}

/// Point halfway between two coordinates.
#[must_use]
pub fn midpoint(a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

fn lerp(a: Coord<f64>, b: Coord<f64>, t: f64) -> Coord<f64> {
    Coord {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Twice the signed area of `(origin, a, b)`; positive when `b` lies left of
/// the directed line `origin -> a`.
fn cross(origin: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - origin.x) * (b.y - origin.y) - (a.y - origin.y) * (b.x - origin.x)
}

/// Consecutive ring segments, including the closing one for open rings.
pub(crate) fn ring_segments(
    ring: &[Coord<f64>],
) -> impl Iterator<Item = (Coord<f64>, Coord<f64>)> + '_ {
    let closed = ring.len() > 1 && ring.first() == ring.last();
    let closing = match (ring.last(), ring.first()) {
        (Some(last), Some(first)) if !closed && ring.len() > 1 => Some((*last, *first)),
        _ => None,
    };
    ring.windows(2)
        .filter_map(|pair| match pair {
            [current, next] => Some((*current, *next)),
            _ => None,
        })
        .chain(closing)
}

/// Whether `point` lies on the segment `a -> b`, within
/// [`GEOMETRY_EPSILON`] scaled by the segment length.
#[must_use]
pub fn point_on_segment(point: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> bool {
    let length = euclidean_distance(a, b);
    let tolerance = GEOMETRY_EPSILON * length.max(1.0);
    if length <= GEOMETRY_EPSILON {
        return euclidean_distance(point, a) <= tolerance;
    }
    if (cross(a, b, point) / length).abs() > tolerance {
        return false;
    }
    point.x >= a.x.min(b.x) - tolerance
        && point.x <= a.x.max(b.x) + tolerance
        && point.y >= a.y.min(b.y) - tolerance
        && point.y <= a.y.max(b.y) + tolerance
}

/// Winding-number point-in-polygon test.
///
/// Upward crossings with the point strictly left of the edge increment the
/// winding number, downward crossings with the point strictly right of it
/// decrement it. Points on the boundary are inside. Rings with fewer than
/// three vertices contain nothing but their own boundary.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use meander_core::geometry::is_point_in_polygon;
///
/// let ring = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 4.0, y: 0.0 },
///     Coord { x: 4.0, y: 4.0 },
///     Coord { x: 0.0, y: 4.0 },
/// ];
/// assert!(is_point_in_polygon(Coord { x: 2.0, y: 2.0 }, &ring));
/// assert!(is_point_in_polygon(Coord { x: 4.0, y: 1.0 }, &ring));
/// assert!(!is_point_in_polygon(Coord { x: 5.0, y: 2.0 }, &ring));
/// ```
#[must_use]
pub fn is_point_in_polygon(point: Coord<f64>, ring: &[Coord<f64>]) -> bool {
    let mut winding = 0_i32;
    for (current, next) in ring_segments(ring) {
        if point_on_segment(point, current, next) {
            return true;
        }
        if current.y <= point.y {
            if next.y > point.y && cross(current, next, point) > 0.0 {
                winding += 1;
            }
        } else if next.y <= point.y && cross(current, next, point) < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Componentwise bounds of a ring, `None` when it is empty.
#[must_use]
pub fn bounding_box(ring: &[Coord<f64>]) -> Option<Rect<f64>> {
    LineString::from(ring.to_vec()).bounding_rect()
}

/// Inclusive lattice from `min` to `max`, row by row.
///
/// `max` itself is produced when the extent is a multiple of `step` up to
/// [`GEOMETRY_EPSILON`]; accumulated rounding never pushes a point past
/// `max`. Non-positive or non-finite steps produce nothing.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use meander_core::geometry::generate_grid_points;
///
/// let points: Vec<_> =
///     generate_grid_points(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 1.0 }, 1.0).collect();
/// assert_eq!(points.len(), 6);
/// assert_eq!(points.last(), Some(&Coord { x: 2.0, y: 1.0 }));
/// ```
pub fn generate_grid_points(
    min: Coord<f64>,
    max: Coord<f64>,
    step: f64,
) -> impl Iterator<Item = Coord<f64>> {
    let columns = lattice_len(min.x, max.x, step);
    let rows = lattice_len(min.y, max.y, step);
    (0..rows).flat_map(move |row| {
        (0..columns).map(move |column| Coord {
            x: lattice_value(min.x, max.x, step, column),
            y: lattice_value(min.y, max.y, step, row),
        })
    })
}

fn lattice_len(low: f64, high: f64, step: f64) -> usize {
    let valid = step.is_finite() && step > 0.0 && low.is_finite() && high.is_finite();
    if !valid || high < low {
        return 0;
    }
    let ratio = ((high - low) / step + GEOMETRY_EPSILON).floor();
    if ratio.is_finite() {
        // The cast saturates for extents far beyond `usize`.
        (ratio as usize).saturating_add(1)
    } else {
        0
    }
}

fn lattice_value(low: f64, high: f64, step: f64, index: usize) -> f64 {
    (low + step * index as f64).min(high)
}

/// Delaunay triangles over a point set, built with `spade`.
///
/// Fewer than three non-collinear points produce no triangles. Coordinates
/// spade cannot represent exactly (NaN, magnitudes beyond
/// [`spade::MAX_ALLOWED_VALUE`], or non-zero values below
/// [`spade::MIN_ALLOWED_VALUE`]) fail the whole triangulation.
pub(crate) fn triangulate(points: &[Coord<f64>]) -> Result<Vec<Triangle<f64>>, InsertionError> {
    let mut triangulation = DelaunayTriangulation::<Point2<f64>>::new();
    for point in points {
        triangulation.insert(Point2::new(point.x, point.y))?;
    }
    Ok(triangulation
        .inner_faces()
        .map(|face| {
            let [a, b, c] = face.positions();
            Triangle::new(
                Coord { x: a.x, y: a.y },
                Coord { x: b.x, y: b.y },
                Coord { x: c.x, y: c.y },
            )
        })
        .collect())
}

/// Densify a polygon until no interior Delaunay edge exceeds
/// `max_edge_length`.
///
/// The result starts with the ring's distinct vertices, adds points that
/// split long ring segments, then refines: each round triangulates the
/// current set and, for every triangle whose centroid lies inside the
/// polygon and whose longest edge is too long, inserts that edge's midpoint
/// when it lies inside the polygon. Refinement stops when a round inserts
/// nothing, after [`MAX_REFINEMENT_ROUNDS`] rounds, or once
/// [`MAX_DENSIFIED_POINTS`] points exist.
///
/// Ring vertices are always returned. Boundary splitting spreads whatever
/// room the cap leaves evenly over the perimeter, so very long rings are
/// split more coarsely than `max_edge_length` asks for.
///
/// Every returned point satisfies [`is_point_in_polygon`] for `ring`.
#[must_use]
pub fn generate_delaunay_points(ring: &[Coord<f64>], max_edge_length: f64) -> Vec<Coord<f64>> {
    let mut points = PointSet::default();
    points.extend(ring_segments(ring).map(|(current, _)| current));
    let usable = max_edge_length.is_finite() && max_edge_length > 0.0;
    if !usable || points.len() < 3 {
        return points.into_vec();
    }

    let room = MAX_DENSIFIED_POINTS.saturating_sub(points.len());
    if room > 0 {
        let perimeter: f64 = ring_segments(ring)
            .map(|(current, next)| euclidean_distance(current, next))
            .sum();
        let boundary_step = max_edge_length.max(perimeter / room as f64);
        'boundary: for (current, next) in ring_segments(ring) {
            for split in split_segment(current, next, boundary_step) {
                if points.len() >= MAX_DENSIFIED_POINTS {
                    break 'boundary;
                }
                points.insert(split);
            }
        }
    }

    for round in 0..MAX_REFINEMENT_ROUNDS {
        if points.len() >= MAX_DENSIFIED_POINTS {
            break;
        }
        let triangles = match triangulate(points.as_slice()) {
            Ok(triangles) => triangles,
            Err(reason) => {
                log::warn!("densification stopped after {round} rounds: {reason}");
                break;
            }
        };
        let mut inserted = 0_usize;
        for triangle in triangles {
            if points.len() >= MAX_DENSIFIED_POINTS {
                break;
            }
            if let Some(candidate) = refinement_point(&triangle, ring, max_edge_length)
                && points.insert(candidate)
            {
                inserted += 1;
            }
        }
        if inserted == 0 {
            break;
        }
    }
    points.into_vec()
}

fn split_segment(
    from: Coord<f64>,
    to: Coord<f64>,
    max_length: f64,
) -> impl Iterator<Item = Coord<f64>> {
    let pieces = (euclidean_distance(from, to) / max_length).ceil();
    let pieces = if pieces.is_finite() && pieces > 1.0 {
        (pieces as usize).min(MAX_DENSIFIED_POINTS)
    } else {
        1
    };
    (1..pieces).map(move |k| lerp(from, to, k as f64 / pieces as f64))
}

fn refinement_point(
    triangle: &Triangle<f64>,
    ring: &[Coord<f64>],
    max_edge_length: f64,
) -> Option<Coord<f64>> {
    let [a, b, c] = triangle.to_array();
    let centroid = Coord {
        x: (a.x + b.x + c.x) / 3.0,
        y: (a.y + b.y + c.y) / 3.0,
    };
    if !is_point_in_polygon(centroid, ring) {
        return None;
    }
    let (p, q) = [(a, b), (b, c), (c, a)]
        .into_iter()
        .max_by(|lhs, rhs| {
            euclidean_distance(lhs.0, lhs.1).total_cmp(&euclidean_distance(rhs.0, rhs.1))
        })?;
    if euclidean_distance(p, q) <= max_edge_length {
        return None;
    }
    let candidate = midpoint(p, q);
    is_point_in_polygon(candidate, ring).then_some(candidate)
}
