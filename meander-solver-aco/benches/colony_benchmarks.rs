//! Criterion benchmarks for the ant colony.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package meander-solver-aco
//! ```

#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use meander_core::VertexId;
use meander_core::test_support::grid_graph;
use meander_solver_aco::{AntColony, AntColonyConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const BENCHMARK_SEED: u64 = 42;

const GRID_SIDES: &[usize] = &[8, 16, 24];

fn bench_best_way(c: &mut Criterion) {
    let mut group = c.benchmark_group("colony_best_way");
    group.sample_size(20);

    let Ok(colony) = AntColony::with_config(AntColonyConfig {
        ants: 16,
        iterations: 10,
        ..AntColonyConfig::default()
    }) else {
        return;
    };

    for &side in GRID_SIDES {
        let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
        let costs: Vec<f64> = (0..side * side).map(|_| rng.gen_range(0.5..=1.0)).collect();
        let graph = grid_graph(side, |a, _| costs.get(a.index()).copied().unwrap_or(1.0));
        let goal = VertexId::new(graph.len().saturating_sub(1));

        group.bench_with_input(BenchmarkId::new("side", side), &side, |b, _| {
            b.iter(|| {
                let mut walk_rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
                black_box(colony.best_way(&graph, VertexId::new(0), goal, &mut walk_rng))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_best_way);
criterion_main!(benches);
