//! Request-level entry points.
//!
//! Every function validates the configuration, builds the graph for the
//! request, resolves its endpoints and runs one solver. Randomness comes
//! from a `ChaCha8Rng` seeded with [`RouteRequest::seed`], so a request
//! always produces the same answer.

#[cfg(feature = "solver-aco")]
use std::collections::HashMap;
#[cfg(feature = "solver-aco")]
use std::collections::hash_map::Entry;

#[cfg(feature = "solver-aco")]
use geo::Coord;
use meander_core::{
    EnrichmentConfig, GraphBuilder, GraphConfig, InputError, PointOfInterest, RouteError,
    RouteRequest, select_poi_by_weight,
};
#[cfg(any(feature = "solver-astar", feature = "solver-aco"))]
use meander_core::{Graph, Path, PathOutput, PoiOutput, VertexId};
#[cfg(feature = "solver-aco")]
use meander_core::{InfluencePoint, WayOutput};
#[cfg(feature = "solver-aco")]
use meander_solver_aco::{AntColony, AntColonyConfig};
#[cfg(feature = "solver-astar")]
use meander_solver_astar::{AStar, AStarConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Configuration for every stage of the planner.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Zone sampling.
    pub enrichment: EnrichmentConfig,
    /// Triangulation and edge weighting.
    pub graph: GraphConfig,
    /// Shortest-path search.
    #[cfg(feature = "solver-astar")]
    pub astar: AStarConfig,
    /// Ant colony exploration.
    #[cfg(feature = "solver-aco")]
    pub colony: AntColonyConfig,
}

impl PlannerConfig {
    /// Validate every stage.
    pub fn validate(&self) -> Result<(), InputError> {
        self.enrichment.validate()?;
        self.graph.validate()?;
        #[cfg(feature = "solver-astar")]
        self.astar.validate()?;
        #[cfg(feature = "solver-aco")]
        self.colony.validate()?;
        Ok(())
    }

    fn builder(&self) -> Result<GraphBuilder, InputError> {
        GraphBuilder::with_config(self.enrichment.clone(), self.graph.clone())
    }
}

/// Start and end POIs for a request.
///
/// Explicit ids win; otherwise the start is drawn by weight and the end is
/// drawn from the remaining POIs.
///
/// # Errors
/// - [`RouteError::NotEnoughPois`] with fewer than two POIs;
/// - [`RouteError::PoiNotFound`] for an unknown explicit id;
/// - [`RouteError::Selection`] when the weights leave nothing to draw.
pub fn resolve_endpoints(
    request: &RouteRequest,
    rng: &mut ChaCha8Rng,
) -> Result<(PointOfInterest, PointOfInterest), RouteError> {
    if request.pois.len() < 2 {
        return Err(RouteError::NotEnoughPois {
            found: request.pois.len(),
        });
    }
    let start = match request.start {
        Some(poi_id) => request
            .poi(poi_id)
            .ok_or(RouteError::PoiNotFound { poi_id })?,
        None => select_poi_by_weight(&request.pois, rng)?,
    }
    .clone();
    let end = match request.end {
        Some(poi_id) => request
            .poi(poi_id)
            .ok_or(RouteError::PoiNotFound { poi_id })?
            .clone(),
        None => {
            let remaining: Vec<PointOfInterest> = request
                .pois
                .iter()
                .filter(|poi| poi.id != start.id)
                .cloned()
                .collect();
            select_poi_by_weight(&remaining, rng)?.clone()
        }
    };
    Ok((start, end))
}

/// Cheapest route between the request's endpoints, found with A*.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use meander::pipeline::{PlannerConfig, shortest_path};
/// use meander::{PointOfInterest, RouteRequest, Zone, ZoneType};
///
/// let ring = vec![
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 60.0, y: 0.0 },
///     Coord { x: 60.0, y: 60.0 },
///     Coord { x: 0.0, y: 60.0 },
/// ];
/// let request = RouteRequest {
///     zones: vec![Zone::new(1, ring, ZoneType::Urban).unwrap()],
///     pois: vec![
///         PointOfInterest::new(1, Coord { x: 5.0, y: 5.0 }, 1.0).unwrap(),
///         PointOfInterest::new(2, Coord { x: 55.0, y: 55.0 }, 1.0).unwrap(),
///     ],
///     start: Some(1),
///     end: Some(2),
///     seed: 0,
/// };
/// let route = shortest_path(&request, &PlannerConfig::default()).unwrap();
/// assert_eq!(route.start.id, Some(1));
/// assert_eq!(route.points.last(), Some(&Coord { x: 55.0, y: 55.0 }));
/// ```
#[cfg(feature = "solver-astar")]
pub fn shortest_path(
    request: &RouteRequest,
    config: &PlannerConfig,
) -> Result<PathOutput, RouteError> {
    config.validate()?;
    let graph = config.builder()?.build(&request.zones, &request.pois)?;
    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let (start, end) = resolve_endpoints(request, &mut rng)?;
    let from = locate(&graph, &start)?;
    let to = locate(&graph, &end)?;
    let path = AStar::with_config(config.astar).search(&graph, from, to)?;
    Ok(path_output(&start, &end, &path))
}

/// Cheapest route the ant colony finds between the request's endpoints.
#[cfg(feature = "solver-aco")]
pub fn best_way(request: &RouteRequest, config: &PlannerConfig) -> Result<PathOutput, RouteError> {
    config.validate()?;
    let graph = config.builder()?.build(&request.zones, &request.pois)?;
    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let (start, end) = resolve_endpoints(request, &mut rng)?;
    let from = locate(&graph, &start)?;
    let to = locate(&graph, &end)?;
    let best = AntColony::with_config(config.colony.clone())?.best_way(&graph, from, to, &mut rng)?;
    Ok(path_output(&start, &end, &best.path))
}

/// Every edge the colony used while ants travelled between POIs of their
/// own choosing, with the pheromone it gathered.
///
/// POIs whose vertex did not survive graph building are left out of the
/// draw.
#[cfg(feature = "solver-aco")]
pub fn all_ways(
    request: &RouteRequest,
    config: &PlannerConfig,
) -> Result<Vec<WayOutput>, RouteError> {
    config.validate()?;
    let graph = config.builder()?.build(&request.zones, &request.pois)?;
    let (endpoints, poi_ids) = poi_vertices(&request.pois, |location| graph.vertex_at(location))?;
    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let exploration =
        AntColony::with_config(config.colony.clone())?.all_ways(&graph, &endpoints, &mut rng)?;
    let describe = |id: VertexId| {
        graph.vertex(id).map(|vertex| {
            let mut output = PoiOutput::from_vertex(vertex);
            output.id = poi_ids.get(&id).copied();
            output
        })
    };
    Ok(exploration
        .edges
        .iter()
        .filter_map(|edge| {
            Some(WayOutput {
                from: describe(edge.from)?,
                to: describe(edge.to)?,
                weight: edge.weight,
            })
        })
        .collect())
}

/// Influence of every tessellation vertex after the colony explored the
/// request.
///
/// Runs on the lazily filtered tessellation rather than a materialised
/// graph, so every vertex is reported, including ones no ant reached.
#[cfg(feature = "solver-aco")]
pub fn simulate(
    request: &RouteRequest,
    config: &PlannerConfig,
) -> Result<Vec<InfluencePoint>, RouteError> {
    config.validate()?;
    let tessellation = config
        .builder()?
        .tessellate(&request.zones, &request.pois)?;
    let (endpoints, _) =
        poi_vertices(&request.pois, |location| tessellation.vertex_at(location))?;
    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let exploration = AntColony::with_config(config.colony.clone())?.all_ways(
        &tessellation,
        &endpoints,
        &mut rng,
    )?;
    Ok(tessellation
        .vertices()
        .iter()
        .map(|vertex| InfluencePoint::new(vertex.location, exploration.influence.get(vertex.id)))
        .collect())
}

#[cfg(any(feature = "solver-astar", feature = "solver-aco"))]
fn locate(graph: &Graph, poi: &PointOfInterest) -> Result<VertexId, RouteError> {
    graph
        .vertex_at(poi.location)
        .ok_or(RouteError::PoiNotFound { poi_id: poi.id })
}

#[cfg(any(feature = "solver-astar", feature = "solver-aco"))]
fn path_output(start: &PointOfInterest, end: &PointOfInterest, path: &Path) -> PathOutput {
    PathOutput {
        start: PoiOutput::from_poi(start),
        end: PoiOutput::from_poi(end),
        points: path.points().to_vec(),
        cost: path.cost(),
    }
}

/// Vertex of every POI that `lookup` can place, and the POI id of each.
///
/// POIs sharing a vertex are drawn once, under the first POI's id.
#[cfg(feature = "solver-aco")]
fn poi_vertices<F>(
    pois: &[PointOfInterest],
    lookup: F,
) -> Result<(Vec<VertexId>, HashMap<VertexId, u64>), RouteError>
where
    F: Fn(Coord<f64>) -> Option<VertexId>,
{
    if pois.len() < 2 {
        return Err(RouteError::NotEnoughPois { found: pois.len() });
    }
    let mut endpoints = Vec::with_capacity(pois.len());
    let mut ids = HashMap::with_capacity(pois.len());
    for poi in pois {
        let Some(vertex) = lookup(poi.location) else {
            log::warn!("point of interest {} has no vertex; left out of the draw", poi.id);
            continue;
        };
        if let Entry::Vacant(slot) = ids.entry(vertex) {
            slot.insert(poi.id);
            endpoints.push(vertex);
        }
    }
    Ok((endpoints, ids))
}

#[cfg(all(test, feature = "solver-astar", feature = "solver-aco"))]
mod tests;
