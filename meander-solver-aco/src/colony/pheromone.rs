use std::collections::HashMap;

use meander_core::EdgeKey;

/// Pheromone levels keyed by undirected edge.
///
/// Edges no ant has reinforced share an evaporating baseline, so the table
/// only stores the edges that received a deposit.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneTable {
    levels: HashMap<EdgeKey, f64>,
    baseline: f64,
}

impl PheromoneTable {
    /// Table where every edge starts at `initial`.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            levels: HashMap::new(),
            baseline: initial,
        }
    }

    /// Current level on `key`.
    #[must_use]
    pub fn level(&self, key: EdgeKey) -> f64 {
        self.levels.get(&key).copied().unwrap_or(self.baseline)
    }

    /// Level shared by every edge that has never received a deposit.
    #[must_use]
    pub const fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Number of edges holding their own level.
    #[must_use]
    pub fn reinforced_edges(&self) -> usize {
        self.levels.len()
    }

    /// Scale every level by `1 - rate`.
    #[expect(clippy::float_arithmetic, reason = "evaporation is a scaling step")]
    pub fn evaporate(&mut self, rate: f64) {
        let retained = 1.0 - rate;
        self.baseline *= retained;
        for level in self.levels.values_mut() {
            *level *= retained;
        }
    }

    /// Add `amount` to the level on `key`.
    #[expect(clippy::float_arithmetic, reason = "deposits accumulate")]
    pub fn deposit(&mut self, key: EdgeKey, amount: f64) {
        let baseline = self.baseline;
        *self.levels.entry(key).or_insert(baseline) += amount;
    }
}
