use geo::Coord;

use crate::InputError;

/// A weighted location that routes start from, end at or pass through.
///
/// Weights bias the random selection of route endpoints: a POI weighing
/// twice as much as another is drawn twice as often. A weight of zero keeps
/// the location in the graph without ever selecting it.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use meander_core::PointOfInterest;
///
/// let poi = PointOfInterest::new(1, Coord { x: 5.0, y: 5.0 }, 2.0).unwrap();
/// assert_eq!(poi.id, 1);
/// assert!(PointOfInterest::new(2, Coord { x: 0.0, y: 0.0 }, -1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Caller supplied identifier.
    pub id: u64,
    /// Position in map units.
    #[cfg_attr(feature = "serde", serde(rename = "point"))]
    pub location: Coord<f64>,
    /// Relative attractiveness, finite and non-negative.
    pub weight: f64,
}

impl PointOfInterest {
    /// Validate and construct a [`PointOfInterest`].
    pub fn new(id: u64, location: Coord<f64>, weight: f64) -> Result<Self, InputError> {
        let poi = Self {
            id,
            location,
            weight,
        };
        poi.validate()?;
        Ok(poi)
    }

    /// Check coordinates and weight of a POI built without [`Self::new`],
    /// e.g. one that was deserialised.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.location.x.is_finite() && self.location.y.is_finite()) {
            return Err(InputError::NonFinitePoi { poi_id: self.id });
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(InputError::InvalidWeight {
                poi_id: self.id,
                weight: self.weight,
            });
        }
        Ok(())
    }
}
