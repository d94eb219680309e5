//! Classified polygons that shape the pedestrian graph.

use geo::{Coord, LineString, Polygon, Rect};

use crate::InputError;
use crate::geometry::bounding_box;

/// Traversal classification of a [`Zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneType {
    /// Impassable; never sampled and never crossed by an edge.
    Restricted,
    /// Ordinary streets at full walking cost.
    Urban,
    /// Open ground with informal cut-throughs at a reduced cost.
    Available,
}

impl ZoneType {
    /// Distance multiplier applied to edges in a zone of this type.
    ///
    /// Restricted zones never carry edges; they report the Urban cost so a
    /// caller mixing them in by mistake still gets a finite, admissible value.
    #[must_use]
    pub fn cost_multiplier(self, impatience_factor: f64) -> f64 {
        match self {
            Self::Available => impatience_factor,
            Self::Urban | Self::Restricted => 1.0,
        }
    }

    /// Precedence when zones overlap; higher wins.
    pub(crate) const fn friction_rank(self) -> u8 {
        match self {
            Self::Available => 0,
            Self::Urban => 1,
            Self::Restricted => 2,
        }
    }
}

/// A polygon with a traversal classification.
///
/// Regions are stored open: the first vertex is not repeated at the end.
/// A closing duplicate supplied by the caller is dropped on construction.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use meander_core::{Zone, ZoneType};
///
/// let zone = Zone::new(
///     1,
///     vec![
///         Coord { x: 0.0, y: 0.0 },
///         Coord { x: 20.0, y: 0.0 },
///         Coord { x: 20.0, y: 20.0 },
///         Coord { x: 0.0, y: 20.0 },
///     ],
///     ZoneType::Urban,
/// )
/// .unwrap();
/// assert_eq!(zone.closed_ring().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    /// Caller supplied identifier.
    pub id: u64,
    /// Open boundary ring.
    pub region: Vec<Coord<f64>>,
    /// Traversal classification.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub zone_type: ZoneType,
}

impl Zone {
    /// Validate and construct a [`Zone`].
    pub fn new(id: u64, mut region: Vec<Coord<f64>>, zone_type: ZoneType) -> Result<Self, InputError> {
        if region.len() > 1 && region.first() == region.last() {
            region.pop();
        }
        let zone = Self {
            id,
            region,
            zone_type,
        };
        zone.validate()?;
        Ok(zone)
    }

    /// Check the ring of a zone built without [`Self::new`].
    pub fn validate(&self) -> Result<(), InputError> {
        if self
            .region
            .iter()
            .any(|c| !(c.x.is_finite() && c.y.is_finite()))
        {
            return Err(InputError::NonFiniteZone { zone_id: self.id });
        }
        let found = self.open_ring().len();
        if found < 3 {
            return Err(InputError::DegenerateRing {
                zone_id: self.id,
                found,
            });
        }
        Ok(())
    }

    /// The ring with its first vertex repeated at the end.
    #[must_use]
    pub fn closed_ring(&self) -> Vec<Coord<f64>> {
        let open = self.open_ring();
        let mut ring = Vec::with_capacity(open.len() + 1);
        ring.extend_from_slice(open);
        if let Some(first) = open.first() {
            ring.push(*first);
        }
        ring
    }

    /// The zone as a `geo` polygon without holes.
    #[must_use]
    pub fn polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.closed_ring()), Vec::new())
    }

    /// Axis-aligned bounds of the ring, `None` for an empty region.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        bounding_box(&self.region)
    }

    /// The region without a closing duplicate, even if one was deserialised.
    fn open_ring(&self) -> &[Coord<f64>] {
        match self.region.split_last() {
            Some((last, rest)) if self.region.len() > 1 && rest.first() == Some(last) => rest,
            _ => &self.region,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn square() -> Vec<Coord<f64>> {
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
        ]
    }

    #[rstest]
    fn closing_duplicate_is_dropped() {
        let mut ring = square();
        ring.push(Coord { x: 0.0, y: 0.0 });
        let zone = Zone::new(1, ring, ZoneType::Urban).unwrap();
        assert_eq!(zone.region.len(), 4);
        assert_eq!(zone.closed_ring().first(), zone.closed_ring().last());
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }])]
    #[case(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }, Coord { x: 0.0, y: 0.0 }])]
    fn short_rings_are_rejected(#[case] ring: Vec<Coord<f64>>) {
        let err = Zone::new(9, ring, ZoneType::Restricted).unwrap_err();
        assert!(matches!(err, InputError::DegenerateRing { zone_id: 9, .. }));
    }

    #[rstest]
    fn non_finite_ring_is_rejected() {
        let mut ring = square();
        ring.push(Coord { x: f64::NAN, y: 0.0 });
        let err = Zone::new(2, ring, ZoneType::Available).unwrap_err();
        assert_eq!(err, InputError::NonFiniteZone { zone_id: 2 });
    }

    #[rstest]
    #[case(ZoneType::Urban, 1.0)]
    #[case(ZoneType::Available, 0.8)]
    fn multiplier_follows_zone_type(#[case] zone_type: ZoneType, #[case] expected: f64) {
        assert!((zone_type.cost_multiplier(0.8) - expected).abs() < f64::EPSILON);
    }
}
