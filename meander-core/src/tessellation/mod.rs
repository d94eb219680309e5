//! Delaunay tessellation of enriched points.
//!
//! A [`Tessellation`] holds deduplicated vertices and the raw neighbour sets
//! produced by triangulation. Edge filters then decide which of those
//! neighbour relations become walkable, either all at once through
//! [`Tessellation::materialise`] or lazily through the [`Adjacency`]
//! implementation.

mod filter;

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use geo::Coord;

use crate::geometry::{CoordKey, PointSet, midpoint, triangulate};
use crate::{
    Adjacency, Edge, Enricher, EnrichmentConfig, Graph, InputError, Neighbour, PointOfInterest,
    RouteError, Vertex, VertexId, Zone, ZoneIndex, ZoneType,
};

pub use filter::{CrossRestrictedFilter, EdgeDecision, EdgeFilter, FakeEdgeFilter};

/// Tuning for edge filtering and weighting.
///
/// # Examples
/// ```
/// use meander_core::{GraphConfig, ZoneType};
///
/// let config = GraphConfig::default();
/// assert_eq!(config.spacing, 45.0);
/// assert_eq!(config.default_zone_type, ZoneType::Restricted);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Longest segment [`FakeEdgeFilter`] accepts.
    pub spacing: f64,
    /// Zone type assumed where no zone covers an edge midpoint.
    ///
    /// The default, `Restricted`, keeps edges inside the playable area.
    /// Urban or Available lets routes cross unzoned ground at that cost.
    pub default_zone_type: ZoneType,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            spacing: 45.0,
            default_zone_type: ZoneType::Restricted,
        }
    }
}

impl GraphConfig {
    /// Reject a spacing no segment could satisfy.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.spacing.is_nan() || self.spacing <= 0.0 {
            return Err(InputError::InvalidConfig {
                field: "spacing",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// Direct neighbours of a point plus the edges among them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighbourhood {
    /// Vertex at the queried point; `None` when the point is not a vertex.
    pub centre: Option<VertexId>,
    /// Neighbours retained by the filter, with their edge cost.
    pub neighbours: Vec<Neighbour>,
    /// Filtered edges joining two of the neighbours.
    pub edges: Vec<Edge>,
}

/// Deduplicated vertices and their Delaunay neighbour sets.
#[derive(Debug, Clone)]
pub struct Tessellation {
    vertices: Vec<Vertex>,
    adjacent: Vec<Vec<VertexId>>,
    coord_index: HashMap<CoordKey, VertexId>,
    zones: ZoneIndex,
    enricher: Enricher,
    config: GraphConfig,
}

impl Tessellation {
    /// Triangulate `points`.
    ///
    /// Vertex ids follow input order after dropping repeated coordinates.
    /// POIs located on a vertex lend it their weight; the first POI wins when
    /// several share a coordinate. Point sets without a triangle (fewer than
    /// three points, or all collinear) are chained in `(x, y)` order instead.
    pub fn new(
        points: &[Coord<f64>],
        pois: &[PointOfInterest],
        zones: &[Zone],
        enrichment: &EnrichmentConfig,
        config: GraphConfig,
    ) -> Result<Self, RouteError> {
        let enricher = Enricher::new(enrichment.clone())?;
        Self::with_index(points, pois, ZoneIndex::new(zones), enricher, config)
    }

    pub(crate) fn with_index(
        points: &[Coord<f64>],
        pois: &[PointOfInterest],
        zones: ZoneIndex,
        enricher: Enricher,
        config: GraphConfig,
    ) -> Result<Self, RouteError> {
        config.validate()?;
        let mut unique = PointSet::default();
        for point in points {
            if point.x.is_finite() && point.y.is_finite() {
                unique.insert(*point);
            } else {
                log::warn!("ignoring non-finite tessellation point {point:?}");
            }
        }
        let locations = unique.into_vec();
        let mut vertices: Vec<Vertex> = locations
            .iter()
            .enumerate()
            .map(|(index, location)| Vertex::structural(VertexId::new(index), *location))
            .collect();
        let coord_index: HashMap<CoordKey, VertexId> = vertices
            .iter()
            .map(|vertex| (CoordKey::from(vertex.location), vertex.id))
            .collect();

        let mut weighted = BTreeSet::new();
        for poi in pois {
            let Some(id) = coord_index.get(&CoordKey::from(poi.location)) else {
                continue;
            };
            if weighted.insert(*id)
                && let Some(vertex) = vertices.get_mut(id.index())
            {
                vertex.weight = poi.weight;
            }
        }

        let adjacent = neighbour_sets(&locations, &coord_index)?;
        log::debug!(
            "tessellated {} vertices from {} points",
            vertices.len(),
            points.len()
        );
        Ok(Self {
            vertices,
            adjacent,
            coord_index,
            zones,
            enricher,
            config,
        })
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether nothing was tessellated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices in id order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex sitting exactly at `location`.
    #[must_use]
    pub fn vertex_at(&self, location: Coord<f64>) -> Option<VertexId> {
        self.coord_index.get(&CoordKey::from(location)).copied()
    }

    /// Unfiltered Delaunay neighbours of a vertex, sorted by id.
    #[must_use]
    pub fn raw_neighbours(&self, id: VertexId) -> &[VertexId] {
        self.adjacent
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Zones the tessellation was built against.
    #[must_use]
    pub const fn zones(&self) -> &ZoneIndex {
        &self.zones
    }

    /// Active graph configuration.
    #[must_use]
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Filter skipping segments that touch Restricted zones.
    #[must_use]
    pub const fn cross_restricted_filter(&self) -> CrossRestrictedFilter<'_> {
        CrossRestrictedFilter::new(&self.zones, self.config.default_zone_type)
    }

    /// [`Self::cross_restricted_filter`] plus the `spacing` cap.
    #[must_use]
    pub const fn fake_edge_filter(&self) -> FakeEdgeFilter<'_> {
        FakeEdgeFilter::new(self.cross_restricted_filter(), self.config.spacing)
    }

    /// Cost of walking from `from` to `to`, judged by the zone at the
    /// segment midpoint.
    fn edge_weight(&self, from: &Vertex, to: &Vertex) -> f64 {
        let centre = midpoint(from.location, to.location);
        let zone_type = self
            .zones
            .zone_type_at(centre, self.config.default_zone_type);
        self.enricher
            .effective_distance(from.location, to.location, zone_type)
    }

    fn edge_if_kept(&self, from: VertexId, to: VertexId, filter: &dyn EdgeFilter) -> Option<Edge> {
        let a = self.vertices.get(from.index())?;
        let b = self.vertices.get(to.index())?;
        filter
            .decide(a.location, b.location)
            .is_keep()
            .then(|| Edge::new(from, to, self.edge_weight(a, b)))
    }

    fn adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.raw_neighbours(a).binary_search(&b).is_ok()
    }

    /// Turn every kept neighbour relation into a [`Graph`] edge.
    ///
    /// All vertices are carried over, isolated ones included. A vertex is
    /// marked shared once a second retained edge touches it.
    pub fn materialise(&self, filter: &dyn EdgeFilter) -> Result<Graph, RouteError> {
        let mut vertices = self.vertices.clone();
        let mut degree = vec![0_usize; vertices.len()];
        let mut edges = Vec::new();
        for (index, targets) in self.adjacent.iter().enumerate() {
            let from = VertexId::new(index);
            for &to in targets.iter().filter(|to| **to > from) {
                let Some(edge) = self.edge_if_kept(from, to, filter) else {
                    continue;
                };
                for endpoint in [from, to] {
                    if let (Some(count), Some(vertex)) = (
                        degree.get_mut(endpoint.index()),
                        vertices.get_mut(endpoint.index()),
                    ) {
                        *count += 1;
                        vertex.shared |= *count > 1;
                    }
                }
                edges.push(edge);
            }
        }
        let candidates: usize = self.adjacent.iter().map(Vec::len).sum::<usize>() / 2;
        log::debug!(
            "materialised {} of {} tessellation edges",
            edges.len(),
            candidates
        );
        Ok(Graph::new(vertices, edges)?)
    }

    /// Filtered neighbours of the vertex at `point` and the filtered edges
    /// joining pairs of them.
    ///
    /// A point that is not a vertex yields an empty neighbourhood.
    #[must_use]
    pub fn neighbourhood(&self, point: Coord<f64>, filter: &dyn EdgeFilter) -> Neighbourhood {
        let Some(centre) = self.vertex_at(point) else {
            return Neighbourhood::default();
        };
        let kept: Vec<Edge> = self
            .raw_neighbours(centre)
            .iter()
            .filter_map(|to| self.edge_if_kept(centre, *to, filter))
            .collect();
        let mut edges = Vec::new();
        for (position, first) in kept.iter().enumerate() {
            for second in kept.iter().skip(position + 1) {
                if self.adjacent(first.to, second.to)
                    && let Some(edge) = self.edge_if_kept(first.to, second.to, filter)
                {
                    edges.push(edge);
                }
            }
        }
        Neighbourhood {
            centre: Some(centre),
            neighbours: kept
                .iter()
                .map(|edge| Neighbour {
                    vertex: edge.to,
                    cost: edge.weight,
                })
                .collect(),
            edges,
        }
    }
}

impl Adjacency for Tessellation {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    fn neighbours(&self, id: VertexId) -> Cow<'_, [Neighbour]> {
        let filter = self.fake_edge_filter();
        Cow::Owned(
            self.raw_neighbours(id)
                .iter()
                .filter_map(|to| self.edge_if_kept(id, *to, &filter))
                .map(|edge| Neighbour {
                    vertex: edge.to,
                    cost: edge.weight,
                })
                .collect(),
        )
    }
}

fn neighbour_sets(
    locations: &[Coord<f64>],
    coord_index: &HashMap<CoordKey, VertexId>,
) -> Result<Vec<Vec<VertexId>>, RouteError> {
    let mut sets = vec![BTreeSet::new(); locations.len()];
    let mut link = |a: VertexId, b: VertexId| {
        if a == b {
            return;
        }
        for (source, target) in [(a, b), (b, a)] {
            if let Some(set) = sets.get_mut(source.index()) {
                set.insert(target);
            }
        }
    };

    let triangles = if locations.len() >= 3 {
        triangulate(locations).map_err(|err| RouteError::Tessellation {
            reason: err.to_string(),
        })?
    } else {
        Vec::new()
    };

    if triangles.is_empty() {
        let mut order: Vec<VertexId> = (0..locations.len()).map(VertexId::new).collect();
        order.sort_by(|a, b| {
            let (pa, pb) = (locations[a.index()], locations[b.index()]);
            pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
        });
        for pair in order.windows(2) {
            if let [a, b] = pair {
                link(*a, *b);
            }
        }
    } else {
        for triangle in &triangles {
            let ids: Vec<VertexId> = triangle
                .to_array()
                .iter()
                .filter_map(|corner| coord_index.get(&CoordKey::from(*corner)).copied())
                .collect();
            if let [a, b, c] = ids[..] {
                link(a, b);
                link(b, c);
                link(c, a);
            } else {
                log::warn!("triangle {triangle:?} has corners outside the vertex set; skipped");
            }
        }
    }

    Ok(sets
        .into_iter()
        .map(|set| set.into_iter().collect())
        .collect())
}
