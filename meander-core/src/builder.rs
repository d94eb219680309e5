//! End-to-end graph construction from zones and POIs.

use crate::{
    EnrichmentConfig, Enricher, Graph, GraphConfig, InputError, PointOfInterest, RouteError,
    Tessellation, Zone, ZoneIndex,
};

/// Runs enrichment, tessellation and restricted-zone filtering.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use meander_core::{GraphBuilder, PointOfInterest, Zone, ZoneType};
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
/// let graph = GraphBuilder::default().build(&[zone], &[poi]).unwrap();
/// let centre = graph.vertex_at(Coord { x: 5.0, y: 5.0 }).unwrap();
/// assert!(!graph.neighbours(centre).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    enricher: Enricher,
    config: GraphConfig,
}

impl GraphBuilder {
    /// Builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with explicit configuration, validated up front.
    pub fn with_config(
        enrichment: EnrichmentConfig,
        config: GraphConfig,
    ) -> Result<Self, InputError> {
        config.validate()?;
        Ok(Self {
            enricher: Enricher::new(enrichment)?,
            config,
        })
    }

    /// Enrichment stage used by this builder.
    #[must_use]
    pub const fn enricher(&self) -> &Enricher {
        &self.enricher
    }

    /// Validate the request data, enrich it and triangulate the result.
    pub fn tessellate(
        &self,
        zones: &[Zone],
        pois: &[PointOfInterest],
    ) -> Result<Tessellation, RouteError> {
        for zone in zones {
            zone.validate()?;
        }
        for poi in pois {
            poi.validate()?;
        }
        let index = ZoneIndex::new(zones);
        let points = self.enricher.enrich_with_index(zones, pois, &index);
        log::debug!(
            "enriched {} zones and {} POIs into {} candidate points",
            zones.len(),
            pois.len(),
            points.len()
        );
        Tessellation::with_index(
            &points,
            pois,
            index,
            self.enricher.clone(),
            self.config.clone(),
        )
    }

    /// Build the walkable graph, dropping every segment that touches a
    /// Restricted zone.
    pub fn build(&self, zones: &[Zone], pois: &[PointOfInterest]) -> Result<Graph, RouteError> {
        let tessellation = self.tessellate(zones, pois)?;
        tessellation.materialise(&tessellation.cross_restricted_filter())
    }
}

/// One-shot form of [`GraphBuilder::build`].
pub fn build_graph(
    zones: &[Zone],
    pois: &[PointOfInterest],
    enrichment: &EnrichmentConfig,
    config: &GraphConfig,
) -> Result<Graph, RouteError> {
    GraphBuilder::with_config(enrichment.clone(), config.clone())?.build(zones, pois)
}
