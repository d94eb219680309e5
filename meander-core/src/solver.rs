use crate::{Adjacency, Graph, Path, RouteError, VertexId};

/// Find a route between two vertices of a [`Graph`].
///
/// Implementations return an empty [`Path`] when the vertices are not
/// connected and [`RouteError::VertexNotFound`] when either id is outside
/// the graph, rather than panicking.
/// Path finders must be `Send + Sync` so one instance can serve concurrent
/// requests.
pub trait PathFinder: Send + Sync {
    /// Route from `start` to `goal`.
    fn find_path(&self, graph: &Graph, start: VertexId, goal: VertexId)
    -> Result<Path, RouteError>;
}

/// Fail with [`RouteError::VertexNotFound`] unless both endpoints exist.
pub fn ensure_endpoints<A>(adjacency: &A, start: VertexId, goal: VertexId) -> Result<(), RouteError>
where
    A: Adjacency + ?Sized,
{
    for vertex in [start, goal] {
        if adjacency.vertex(vertex).is_none() {
            return Err(RouteError::VertexNotFound { vertex });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Vertex};
    use geo::Coord;
    use rstest::{fixture, rstest};

    struct DirectHop;

    impl PathFinder for DirectHop {
        fn find_path(
            &self,
            graph: &Graph,
            start: VertexId,
            goal: VertexId,
        ) -> Result<Path, RouteError> {
            ensure_endpoints(graph, start, goal)?;
            Ok(graph.edge(start, goal).map_or_else(Path::empty, |edge| {
                Path::resolve(graph, vec![start, goal], edge.weight)
            }))
        }
    }

    #[fixture]
    fn pair() -> Graph {
        let a = VertexId::new(0);
        let b = VertexId::new(1);
        Graph::new(
            vec![
                Vertex::structural(a, Coord { x: 0.0, y: 0.0 }),
                Vertex::structural(b, Coord { x: 1.0, y: 0.0 }),
            ],
            vec![Edge::new(a, b, 1.0)],
        )
        .unwrap()
    }

    #[rstest]
    fn returns_path_between_known_vertices(pair: Graph) {
        let path = DirectHop
            .find_path(&pair, VertexId::new(0), VertexId::new(1))
            .expect("both vertices exist");
        assert_eq!(path.points().len(), 2);
        assert_eq!(path.cost(), 1.0);
    }

    #[rstest]
    fn unknown_goal_is_not_found(pair: Graph) {
        let err = DirectHop
            .find_path(&pair, VertexId::new(0), VertexId::new(4))
            .expect_err("goal is missing");
        assert_eq!(
            err,
            RouteError::VertexNotFound {
                vertex: VertexId::new(4)
            }
        );
    }
}
