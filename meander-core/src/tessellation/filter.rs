//! Decisions on which tessellation edges become walkable.

use geo::Coord;

use crate::geometry::{euclidean_distance, midpoint};
use crate::{ZoneIndex, ZoneType};

/// Outcome of an [`EdgeFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDecision {
    /// The segment is walkable.
    Keep,
    /// The segment must not become an edge.
    Skip,
}

impl EdgeDecision {
    /// Whether the decision keeps the edge.
    #[must_use]
    pub const fn is_keep(self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Judges a candidate segment between two tessellation vertices.
pub trait EdgeFilter: Send + Sync {
    /// Decide whether the segment `from -> to` may become an edge.
    fn decide(&self, from: Coord<f64>, to: Coord<f64>) -> EdgeDecision;
}

/// Skips segments that enter a Restricted zone or leave the playable area.
///
/// A segment is skipped when either endpoint or its midpoint lies in a
/// Restricted zone, when it touches a Restricted polygon anywhere along its
/// length, or when its midpoint lies in no zone and the outside of every
/// zone is itself treated as Restricted.
#[derive(Debug, Clone, Copy)]
pub struct CrossRestrictedFilter<'a> {
    zones: &'a ZoneIndex,
    outside_zone_type: ZoneType,
}

impl<'a> CrossRestrictedFilter<'a> {
    /// Filter over `zones`, treating uncovered ground as `outside_zone_type`.
    #[must_use]
    pub const fn new(zones: &'a ZoneIndex, outside_zone_type: ZoneType) -> Self {
        Self {
            zones,
            outside_zone_type,
        }
    }
}

impl EdgeFilter for CrossRestrictedFilter<'_> {
    fn decide(&self, from: Coord<f64>, to: Coord<f64>) -> EdgeDecision {
        let centre = midpoint(from, to);
        let blocked = self.zones.is_restricted(from)
            || self.zones.is_restricted(to)
            || self.zones.is_restricted(centre)
            || self.zones.segment_touches_restricted(from, to)
            || (self.outside_zone_type == ZoneType::Restricted && !self.zones.contains(centre));
        if blocked {
            EdgeDecision::Skip
        } else {
            EdgeDecision::Keep
        }
    }
}

/// [`CrossRestrictedFilter`] that also skips segments longer than `spacing`.
///
/// Long Delaunay edges usually bridge the convex hull across ground nobody
/// walks; they are treated as artefacts.
#[derive(Debug, Clone, Copy)]
pub struct FakeEdgeFilter<'a> {
    restricted: CrossRestrictedFilter<'a>,
    spacing: f64,
}

impl<'a> FakeEdgeFilter<'a> {
    /// Wrap `restricted` with a maximum segment length.
    #[must_use]
    pub const fn new(restricted: CrossRestrictedFilter<'a>, spacing: f64) -> Self {
        Self {
            restricted,
            spacing,
        }
    }
}

impl EdgeFilter for FakeEdgeFilter<'_> {
    fn decide(&self, from: Coord<f64>, to: Coord<f64>) -> EdgeDecision {
        if euclidean_distance(from, to) > self.spacing {
            return EdgeDecision::Skip;
        }
        self.restricted.decide(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Zone;
    use rstest::{fixture, rstest};

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[fixture]
    fn zones() -> ZoneIndex {
        let rect = |id, x0: f64, x1: f64, zone_type| {
            Zone::new(
                id,
                vec![c(x0, 0.0), c(x1, 0.0), c(x1, 10.0), c(x0, 10.0)],
                zone_type,
            )
            .unwrap()
        };
        ZoneIndex::new(&[
            rect(1, 0.0, 10.0, ZoneType::Urban),
            rect(2, 10.0, 20.0, ZoneType::Restricted),
            rect(3, 20.0, 30.0, ZoneType::Urban),
        ])
    }

    #[rstest]
    #[case(c(1.0, 5.0), c(9.0, 5.0), EdgeDecision::Keep)]
    #[case(c(5.0, 5.0), c(25.0, 5.0), EdgeDecision::Skip)]
    #[case(c(5.0, 5.0), c(15.0, 5.0), EdgeDecision::Skip)]
    #[case(c(1.0, 5.0), c(10.0, 5.0), EdgeDecision::Skip)]
    fn restricted_zones_block_segments(
        zones: ZoneIndex,
        #[case] from: Coord<f64>,
        #[case] to: Coord<f64>,
        #[case] expected: EdgeDecision,
    ) {
        let filter = CrossRestrictedFilter::new(&zones, ZoneType::Urban);
        assert_eq!(filter.decide(from, to), expected);
    }

    #[rstest]
    fn restricted_outside_blocks_uncovered_midpoints(zones: ZoneIndex) {
        let from = c(1.0, 9.0);
        let to = c(1.0, 19.0);
        let open = CrossRestrictedFilter::new(&zones, ZoneType::Urban);
        let closed = CrossRestrictedFilter::new(&zones, ZoneType::Restricted);
        assert_eq!(open.decide(from, to), EdgeDecision::Keep);
        assert_eq!(closed.decide(from, to), EdgeDecision::Skip);
    }

    #[rstest]
    fn fake_edges_are_capped_by_spacing(zones: ZoneIndex) {
        let filter = FakeEdgeFilter::new(CrossRestrictedFilter::new(&zones, ZoneType::Urban), 4.0);
        assert_eq!(filter.decide(c(1.0, 1.0), c(4.0, 1.0)), EdgeDecision::Keep);
        assert_eq!(filter.decide(c(1.0, 1.0), c(9.0, 1.0)), EdgeDecision::Skip);
    }
}
