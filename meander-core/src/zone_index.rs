//! R\*-tree over zone bounding boxes.
//!
//! Candidate zones are found by envelope and then confirmed with the exact
//! polygon tests from [`crate::geometry`].

use geo::{Coord, Intersects, Line, Polygon};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

use crate::geometry::is_point_in_polygon;
use crate::{Zone, ZoneType};

type ZoneEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

#[derive(Debug, Clone)]
struct IndexedZone {
    zone_type: ZoneType,
    ring: Vec<Coord<f64>>,
    polygon: Polygon<f64>,
}

/// Spatial lookup of the zones of one request.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use meander_core::{Zone, ZoneIndex, ZoneType};
///
/// let square = |x: f64, kind| {
///     Zone::new(
///         1,
///         vec![
///             Coord { x, y: 0.0 },
///             Coord { x: x + 10.0, y: 0.0 },
///             Coord { x: x + 10.0, y: 10.0 },
///             Coord { x, y: 10.0 },
///         ],
///         kind,
///     )
///     .unwrap()
/// };
/// let index = ZoneIndex::new(&[square(0.0, ZoneType::Urban), square(20.0, ZoneType::Restricted)]);
/// assert!(index.is_restricted(Coord { x: 25.0, y: 5.0 }));
/// assert_eq!(
///     index.zone_type_at(Coord { x: 15.0, y: 5.0 }, ZoneType::Available),
///     ZoneType::Available
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ZoneIndex {
    zones: Vec<IndexedZone>,
    tree: RTree<ZoneEnvelope>,
}

impl ZoneIndex {
    /// Index the given zones; zones with an empty ring are ignored.
    #[must_use]
    pub fn new(zones: &[Zone]) -> Self {
        let mut indexed = Vec::with_capacity(zones.len());
        let mut envelopes = Vec::with_capacity(zones.len());
        for zone in zones {
            let Some(bounds) = zone.bounds() else {
                continue;
            };
            let position = indexed.len();
            indexed.push(IndexedZone {
                zone_type: zone.zone_type,
                ring: zone.closed_ring(),
                polygon: zone.polygon(),
            });
            envelopes.push(GeomWithData::new(
                Rectangle::from_corners(
                    [bounds.min().x, bounds.min().y],
                    [bounds.max().x, bounds.max().y],
                ),
                position,
            ));
        }
        Self {
            zones: indexed,
            tree: RTree::bulk_load(envelopes),
        }
    }

    /// Number of indexed zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zone was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    fn candidates(&self, envelope: AABB<[f64; 2]>) -> impl Iterator<Item = &IndexedZone> + '_ {
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|entry| self.zones.get(entry.data))
    }

    fn containing(&self, point: Coord<f64>) -> impl Iterator<Item = &IndexedZone> + '_ {
        self.candidates(AABB::from_point([point.x, point.y]))
            .filter(move |zone| is_point_in_polygon(point, &zone.ring))
    }

    /// Whether any zone contains `point`.
    #[must_use]
    pub fn contains(&self, point: Coord<f64>) -> bool {
        self.containing(point).next().is_some()
    }

    /// Type of the highest-friction zone containing `point`, or `default`
    /// when no zone does.
    #[must_use]
    pub fn zone_type_at(&self, point: Coord<f64>, default: ZoneType) -> ZoneType {
        self.containing(point)
            .map(|zone| zone.zone_type)
            .max_by_key(|zone_type| zone_type.friction_rank())
            .unwrap_or(default)
    }

    /// Whether `point` lies inside or on a Restricted zone.
    #[must_use]
    pub fn is_restricted(&self, point: Coord<f64>) -> bool {
        self.containing(point)
            .any(|zone| zone.zone_type == ZoneType::Restricted)
    }

    /// Whether the segment `a -> b` touches any Restricted zone, boundary
    /// included.
    #[must_use]
    pub fn segment_touches_restricted(&self, a: Coord<f64>, b: Coord<f64>) -> bool {
        let line = Line::new(a, b);
        let envelope = AABB::from_corners([a.x, a.y], [b.x, b.y]);
        self.candidates(envelope)
            .filter(|zone| zone.zone_type == ZoneType::Restricted)
            .any(|zone| line.intersects(&zone.polygon))
    }
}
