//! Generator throughput benchmarks.
//!
//! Covers the linear-time tree decoder, sparse and dense random graph
//! sampling, and DAG construction over a spanning tree.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use stressgen_core::{GraphBuilder, TreeBuilder};

/// Seed used by every benchmark.
const SEED: u64 = 42;

/// Node counts for tree generation.
const TREE_SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Node counts for graph generation.
const GRAPH_SIZES: &[usize] = &[100, 1_000];

fn sqrt_height_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqrt_height_tree");
    for &len in TREE_SIZES {
        let builder = TreeBuilder::init(len).expect("tree size must be valid");
        group.bench_with_input(BenchmarkId::from_parameter(len), &builder, |b, builder| {
            let mut rng = SmallRng::seed_from_u64(SEED);
            b.iter(|| black_box(builder.sqrt_height_tree(&mut rng)));
        });
    }
    group.finish();
}

fn random_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("randomly_gen");
    group.sample_size(20);
    for &len in GRAPH_SIZES {
        let builder = GraphBuilder::init(len).expect("graph size must be valid");
        let maximum = len * (len - 1) / 2;
        for (label, edges) in [("sparse", len * 2), ("dense", maximum * 3 / 4)] {
            group.bench_with_input(
                BenchmarkId::new(label, len),
                &(builder, edges),
                |b, &(builder, edges)| {
                    let mut rng = SmallRng::seed_from_u64(SEED);
                    b.iter(|| {
                        black_box(
                            builder
                                .randomly_gen(&mut rng, edges, false)
                                .expect("edge budget must be feasible"),
                        )
                    });
                },
            );
        }
    }
    group.finish();
}

fn connected_dag(c: &mut Criterion) {
    let mut group = c.benchmark_group("dag");
    group.sample_size(20);
    for &len in GRAPH_SIZES {
        let builder = GraphBuilder::init(len).expect("graph size must be valid");
        group.bench_with_input(BenchmarkId::from_parameter(len), &builder, |b, builder| {
            let mut rng = SmallRng::seed_from_u64(SEED);
            b.iter(|| {
                black_box(
                    builder
                        .dag(&mut rng, len * 3, true)
                        .expect("edge budget must be feasible"),
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, sqrt_height_tree, random_graph, connected_dag);
criterion_main!(benches);
