//! Per-vertex influence accumulated while routes are scored.

use crate::VertexId;

/// Influence scalars indexed by [`VertexId`].
///
/// Kept apart from the vertices so graph data stays immutable while
/// walks are evaluated; walkers record visits in their own trails and the
/// owner of the accumulator folds them in afterwards.
///
/// # Examples
/// ```
/// use meander_core::{Influence, VertexId};
///
/// let mut influence = Influence::new(2);
/// influence.add(VertexId::new(1), 1.5);
/// influence.add(VertexId::new(1), 0.5);
/// assert_eq!(influence.get(VertexId::new(1)), 2.0);
/// assert_eq!(influence.get(VertexId::new(9)), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Influence {
    values: Vec<f64>,
}

impl Influence {
    /// Zeroed accumulator for `vertex_count` vertices.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            values: vec![0.0; vertex_count],
        }
    }

    /// Add `amount` to a vertex; ids outside the arena are ignored.
    pub fn add(&mut self, id: VertexId, amount: f64) {
        if let Some(value) = self.values.get_mut(id.index()) {
            *value += amount;
        }
    }

    /// Accumulated influence of a vertex, zero when unknown.
    #[must_use]
    pub fn get(&self, id: VertexId) -> f64 {
        self.values.get(id.index()).copied().unwrap_or(0.0)
    }

    /// `(vertex, influence)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (VertexId::new(index), *value))
    }

    /// Number of tracked vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no vertices are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
