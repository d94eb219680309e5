//! Candidate vertex sampling and weighted selection.
//!
//! Enrichment turns zones and POIs into the point set that the tessellation
//! triangulates. Urban zones are sampled on a regular grid; Available zones
//! use the grid too unless Delaunay densification is enabled; Restricted
//! zones contribute nothing and remove any candidate they contain.

use geo::{Coord, Rect};
use rand::Rng;

use crate::geometry::{
    PointSet, euclidean_distance, generate_delaunay_points, generate_grid_points,
    is_point_in_polygon,
};
use crate::{InputError, PointOfInterest, SelectionError, Zone, ZoneIndex, ZoneType};

/// Most lattice rows or columns scanned for a single zone.
///
/// Zones wider than this many grid steps are sampled on a coarser lattice
/// so the scan stays bounded.
pub const MAX_LATTICE_SIDE: usize = 1024;

/// Tuning for [`Enricher`].
///
/// # Examples
/// ```
/// use meander_core::EnrichmentConfig;
///
/// let config = EnrichmentConfig::default();
/// assert_eq!(config.grid_step, 15.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnrichmentConfig {
    /// Lattice spacing in map units; also the densification edge length.
    pub grid_step: f64,
    /// Cap on sampled points per zone, ring vertices excluded.
    pub max_points_per_zone: usize,
    /// Sample Available zones by Delaunay densification instead of a grid.
    pub densify_available: bool,
    /// Cost multiplier for Available zones, in `(0, 1]`.
    pub impatience_factor: f64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            grid_step: 15.0,
            max_points_per_zone: 500,
            densify_available: false,
            impatience_factor: 0.8,
        }
    }
}

impl EnrichmentConfig {
    /// Reject values that would produce an empty lattice or an
    /// inadmissible A* heuristic.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.grid_step.is_finite() || self.grid_step <= 0.0 {
            return Err(InputError::InvalidConfig {
                field: "grid_step",
                reason: "must be finite and positive",
            });
        }
        if !(self.impatience_factor > 0.0 && self.impatience_factor <= 1.0) {
            return Err(InputError::InvalidConfig {
                field: "impatience_factor",
                reason: "must lie in (0, 1]",
            });
        }
        Ok(())
    }
}

/// Samples candidate vertices from zones and POIs.
#[derive(Debug, Clone, Default)]
pub struct Enricher {
    config: EnrichmentConfig,
}

impl Enricher {
    /// Build an enricher from a validated configuration.
    pub fn new(config: EnrichmentConfig) -> Result<Self, InputError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Candidate vertices for the given zones and POIs.
    ///
    /// POI locations come first, followed by each non-Restricted zone's
    /// samples and ring vertices in zone order. Duplicates keep their first
    /// occurrence. Candidates inside or on a Restricted zone are dropped,
    /// POIs included.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use meander_core::{Enricher, EnrichmentConfig, PointOfInterest, Zone, ZoneType};
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
    /// let poi = PointOfInterest::new(1, Coord { x: 5.0, y: 5.0 }, 1.0).unwrap();
    /// let enricher = Enricher::new(EnrichmentConfig::default()).unwrap();
    /// let points = enricher.enrich(&[zone], &[poi]);
    /// assert_eq!(points[0], Coord { x: 5.0, y: 5.0 });
    /// assert!(points.contains(&Coord { x: 20.0, y: 20.0 }));
    /// ```
    #[must_use]
    pub fn enrich(&self, zones: &[Zone], pois: &[PointOfInterest]) -> Vec<Coord<f64>> {
        self.enrich_with_index(zones, pois, &ZoneIndex::new(zones))
    }

    pub(crate) fn enrich_with_index(
        &self,
        zones: &[Zone],
        pois: &[PointOfInterest],
        index: &ZoneIndex,
    ) -> Vec<Coord<f64>> {
        let mut candidates = PointSet::default();
        candidates.extend(pois.iter().map(|poi| poi.location));
        for zone in zones {
            if zone.zone_type == ZoneType::Restricted {
                continue;
            }
            let before = candidates.len();
            candidates.extend(self.sample_zone(zone));
            candidates.extend(zone.region.iter().copied());
            log::debug!(
                "zone {} ({:?}) contributed {} candidates",
                zone.id,
                zone.zone_type,
                candidates.len() - before
            );
        }
        let total = candidates.len();
        let kept: Vec<_> = candidates
            .into_vec()
            .into_iter()
            .filter(|point| !index.is_restricted(*point))
            .collect();
        if kept.len() < total {
            log::debug!(
                "dropped {} candidates inside restricted zones",
                total - kept.len()
            );
        }
        kept
    }

    fn sample_zone(&self, zone: &Zone) -> Vec<Coord<f64>> {
        let ring = zone.closed_ring();
        let limit = self.config.max_points_per_zone;
        if zone.zone_type == ZoneType::Available && self.config.densify_available {
            return generate_delaunay_points(&ring, self.config.grid_step)
                .into_iter()
                .filter(|point| is_point_in_polygon(*point, &ring))
                .take(limit)
                .collect();
        }
        let Some(bounds) = zone.bounds() else {
            return Vec::new();
        };
        generate_grid_points(bounds.min(), bounds.max(), self.lattice_step(bounds))
            .filter(|point| is_point_in_polygon(*point, &ring))
            .take(limit)
            .collect()
    }

    /// `grid_step`, widened when the zone spans more than
    /// [`MAX_LATTICE_SIDE`] steps along either axis.
    fn lattice_step(&self, bounds: Rect<f64>) -> f64 {
        let intervals = (MAX_LATTICE_SIDE - 1) as f64;
        let widest = bounds.width().max(bounds.height());
        let step = self.config.grid_step.max(widest / intervals);
        if step > self.config.grid_step {
            log::debug!(
                "zone spans {widest} units; sampling every {step} instead of {}",
                self.config.grid_step
            );
        }
        step
    }

    /// Travel cost between two points inside a zone of `zone_type`.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use meander_core::{Enricher, EnrichmentConfig, ZoneType};
    ///
    /// let enricher = Enricher::new(EnrichmentConfig {
    ///     impatience_factor: 0.5,
    ///     ..EnrichmentConfig::default()
    /// })
    /// .unwrap();
    /// let (a, b) = (Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 0.0 });
    /// assert_eq!(enricher.effective_distance(a, b, ZoneType::Available), 5.0);
    /// assert_eq!(enricher.effective_distance(a, b, ZoneType::Urban), 10.0);
    /// ```
    #[must_use]
    pub fn effective_distance(&self, a: Coord<f64>, b: Coord<f64>, zone_type: ZoneType) -> f64 {
        euclidean_distance(a, b) * zone_type.cost_multiplier(self.config.impatience_factor)
    }
}

/// Index drawn with probability proportional to its weight.
///
/// Non-positive and non-finite weights are never drawn. Returns `None` when
/// no weight is drawable.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use meander_core::roulette_index;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// assert_eq!(roulette_index(&[0.0, 3.0, 0.0], &mut rng), Some(1));
/// assert_eq!(roulette_index(&[0.0, 0.0], &mut rng), None);
/// ```
pub fn roulette_index<R>(weights: &[f64], rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let drawable = |weight: f64| weight.is_finite() && weight > 0.0;
    let total: f64 = weights.iter().copied().filter(|w| drawable(*w)).sum();
    if !(total.is_finite() && total > 0.0) {
        return None;
    }
    let target = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = None;
    for (index, weight) in weights.iter().copied().enumerate() {
        if !drawable(weight) {
            continue;
        }
        cumulative += weight;
        last = Some(index);
        if target < cumulative {
            return Some(index);
        }
    }
    // Rounding can leave `target` a hair above the final cumulative sum.
    last
}

/// Draw a POI with probability proportional to its weight.
pub fn select_poi_by_weight<'a, R>(
    pois: &'a [PointOfInterest],
    rng: &mut R,
) -> Result<&'a PointOfInterest, SelectionError>
where
    R: Rng + ?Sized,
{
    if pois.is_empty() {
        return Err(SelectionError::Empty);
    }
    let weights: Vec<f64> = pois.iter().map(|poi| poi.weight).collect();
    roulette_index(&weights, rng)
        .and_then(|index| pois.get(index))
        .ok_or(SelectionError::ZeroTotalWeight)
}
