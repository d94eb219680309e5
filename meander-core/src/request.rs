use crate::{InputError, PointOfInterest, Zone};

/// Zones, POIs and routing options for one request.
///
/// Serialised as `{ "zones": [...], "poi": [...], "start": 1, "end": 2,
/// "seed": 7 }`; `start`, `end` and `seed` are optional.
///
/// # Examples
/// ```
/// use meander_core::RouteRequest;
///
/// let request = RouteRequest::default();
/// assert!(request.validate().is_ok());
/// assert_eq!(request.seed, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Classified map polygons.
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<Zone>,
    /// Weighted route endpoints.
    #[cfg_attr(feature = "serde", serde(rename = "poi", default))]
    pub pois: Vec<PointOfInterest>,
    /// Id of the POI to start from; drawn by weight when absent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub start: Option<u64>,
    /// Id of the POI to finish at; drawn by weight when absent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub end: Option<u64>,
    /// Seed for every random draw made while serving the request.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
}

impl RouteRequest {
    /// Validate every zone and POI.
    pub fn validate(&self) -> Result<(), InputError> {
        for zone in &self.zones {
            zone.validate()?;
        }
        for poi in &self.pois {
            poi.validate()?;
        }
        Ok(())
    }

    /// POI with the given id.
    #[must_use]
    pub fn poi(&self, id: u64) -> Option<&PointOfInterest> {
        self.pois.iter().find(|poi| poi.id == id)
    }
}
