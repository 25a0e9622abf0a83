//! Criterion benchmarks for Lexnet.
//!
//! Covers hierarchy construction, single and set-valued SAP queries, parallel
//! batches and outcast detection over a generated rooted DAG.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lexnet::graph::Digraph;
use lexnet::outlier::OutlierFinder;
use lexnet::sap::Sap;
use lexnet::vocabulary::VocabularyGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SYNSETS: usize = 20_000;

/// Edges of a random DAG rooted at 0: every other vertex points at one to
/// three lower-numbered vertices.
fn generate_edges(count: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for v in 1..count {
        let parents = rng.random_range(1..=3);
        for _ in 0..parents {
            edges.push((v, rng.random_range(0..v)));
        }
    }
    edges
}

fn generate_relations(count: usize, seed: u64) -> (String, String) {
    let mut synsets = String::new();
    for id in 0..count {
        synsets.push_str(&format!("{id},term{id} alias{},synset number {id}\n", id % 97));
    }

    let mut hypernyms = String::new();
    for (v, w) in generate_edges(count, seed) {
        hypernyms.push_str(&format!("{v},{w}\n"));
    }
    (synsets, hypernyms)
}

fn build_sap(count: usize) -> Sap {
    let mut g = Digraph::new(count);
    for (v, w) in generate_edges(count, 42) {
        g.add_edge(v, w).unwrap();
    }
    Sap::new(g).unwrap()
}

fn bench_construction(c: &mut Criterion) {
    let (synsets, hypernyms) = generate_relations(SYNSETS, 42);

    let mut group = c.benchmark_group("construction");
    group.throughput(Throughput::Elements(SYNSETS as u64));
    group.bench_function("vocabulary_build", |b| {
        b.iter(|| {
            black_box(
                VocabularyGraph::build(synsets.as_bytes(), hypernyms.as_bytes()).unwrap(),
            )
        })
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let sap = build_sap(SYNSETS);
    let mut rng = StdRng::seed_from_u64(7);
    let pairs: Vec<(usize, usize)> = (0..256)
        .map(|_| (rng.random_range(0..SYNSETS), rng.random_range(0..SYNSETS)))
        .collect();

    let mut group = c.benchmark_group("sap");
    group.bench_function("single_pair", |b| {
        b.iter(|| {
            let found = sap.query(black_box(SYNSETS - 1), black_box(SYNSETS / 2));
            black_box(found.unwrap())
        })
    });
    group.bench_function("vertex_sets", |b| {
        let v: Vec<usize> = (SYNSETS - 10..SYNSETS).collect();
        let w: Vec<usize> = (SYNSETS / 2..SYNSETS / 2 + 10).collect();
        b.iter(|| black_box(sap.query_sets(v.iter().copied(), w.iter().copied()).unwrap()))
    });

    group.throughput(Throughput::Elements(pairs.len() as u64));
    group.bench_function("batch_sequential", |b| {
        b.iter(|| {
            for &(v, w) in &pairs {
                black_box(sap.length(v, w).unwrap());
            }
        })
    });
    group.bench_function("batch_parallel", |b| {
        b.iter(|| black_box(sap.lengths(&pairs).unwrap()))
    });
    group.finish();
}

fn bench_outcast(c: &mut Criterion) {
    let (synsets, hypernyms) = generate_relations(SYNSETS, 42);
    let graph = VocabularyGraph::build(synsets.as_bytes(), hypernyms.as_bytes()).unwrap();
    let finder = OutlierFinder::new(&graph);
    let terms: Vec<String> = (0..8).map(|i| format!("term{}", i * 2_311 + 5)).collect();

    c.bench_function("outcast_8_terms", |b| {
        b.iter(|| black_box(finder.outcast(&terms).unwrap()))
    });
}

criterion_group!(benches, bench_construction, bench_queries, bench_outcast);
criterion_main!(benches);
