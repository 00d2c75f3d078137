//! Criterion micro-benchmarks for parameter and result reads.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sluice_bench::chain_profile;
use sluice_core::FlowUnits;
use sluice_engine::Project;
use sluice_toolkit::{link_result, node_param, node_result, LinkResult, NodeParam, NodeResult};

const NODES: usize = 1_000;

fn started(units: FlowUnits) -> Project {
    let mut p = chain_profile(NODES, units).unwrap();
    p.start().unwrap();
    p.step().unwrap();
    p
}

/// Benchmark: read one result code from every node.
fn bench_node_result_sweep(c: &mut Criterion) {
    let p = started(FlowUnits::Cms);
    let code = NodeResult::Depth.code();
    c.bench_function("node_result_sweep_1k", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..NODES as i32 {
                sum += node_result(&p, i, code).unwrap();
            }
            black_box(sum);
        });
    });
}

/// Benchmark: read link flow from every link.
fn bench_link_flow_sweep(c: &mut Criterion) {
    let p = started(FlowUnits::Mgd);
    let code = LinkResult::Flow.code();
    c.bench_function("link_flow_sweep_1k", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..NODES as i32 {
                sum += link_result(&p, i, code).unwrap();
            }
            black_box(sum);
        });
    });
}

/// Benchmark: static parameter read, which needs only an open project.
fn bench_node_param_single(c: &mut Criterion) {
    let p = chain_profile(NODES, FlowUnits::Lps).unwrap();
    let code = NodeParam::InvertElev.code();
    c.bench_function("node_param_single", |b| {
        b.iter(|| black_box(node_param(&p, black_box(500), code).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_node_result_sweep,
    bench_link_flow_sweep,
    bench_node_param_single
);
criterion_main!(benches);
