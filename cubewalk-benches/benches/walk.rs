//! Single random-walk benchmarks.
//!
//! Measures one return walk on the cube from each start vertex, with the RNG
//! seeded once per benchmark so the step distribution matches a real run.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use cubewalk_core::{CubeGraph, RandomWalk};

/// Seed used for every RNG in this benchmark.
const SEED: u64 = 42;

fn walk_from_vertex(c: &mut Criterion) {
    let graph = CubeGraph::new();
    let walk = RandomWalk::new(&graph);
    let mut group = c.benchmark_group("walk_from");

    for start in graph.vertices() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        group.bench_with_input(BenchmarkId::from_parameter(start), &start, |b, &origin| {
            b.iter(|| walk.walk_from(black_box(origin), &mut rng));
        });
    }

    group.finish();
}

fn walk_random_start(c: &mut Criterion) {
    let graph = CubeGraph::new();
    let walk = RandomWalk::new(&graph);
    let mut rng = SmallRng::seed_from_u64(SEED);
    c.bench_function("walk_random_start", |b| {
        b.iter(|| walk.walk(&mut rng));
    });
}

criterion_group!(benches, walk_from_vertex, walk_random_start);
criterion_main!(benches);
