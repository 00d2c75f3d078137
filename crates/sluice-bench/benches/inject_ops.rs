//! Criterion micro-benchmarks for override writes and a stepped run.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sluice_bench::chain_profile;
use sluice_core::{FlowUnits, ObjectKind};
use sluice_toolkit::{set_link_setting, set_node_inflow};

/// Benchmark: command the outlet gate with reporting disabled.
fn bench_set_link_setting(c: &mut Criterion) {
    let mut p = chain_profile(100, FlowUnits::Cfs).unwrap();
    p.start().unwrap();
    let gate = p.registry().index_of(ObjectKind::Link, "G").unwrap() as i32;
    let mut setting = 0.0;
    c.bench_function("set_link_setting", |b| {
        b.iter(|| {
            setting = 1.0 - setting;
            set_link_setting(&mut p, gate, black_box(setting)).unwrap();
        });
    });
}

/// Benchmark: latch an inflow on a node that already has a record.
fn bench_set_node_inflow(c: &mut Criterion) {
    let mut p = chain_profile(100, FlowUnits::Cfs).unwrap();
    p.start().unwrap();
    set_node_inflow(&mut p, 50, 0.0).unwrap();
    c.bench_function("set_node_inflow", |b| {
        b.iter(|| set_node_inflow(&mut p, 50, black_box(2.5)).unwrap());
    });
}

/// Benchmark: one routing step with an override injected before it.
fn bench_step_with_override(c: &mut Criterion) {
    c.bench_function("step_with_override_100", |b| {
        b.iter_batched(
            || {
                let mut p = chain_profile(100, FlowUnits::Cfs).unwrap();
                p.start().unwrap();
                p
            },
            |mut p| {
                set_node_inflow(&mut p, 0, 3.0).unwrap();
                black_box(p.step().unwrap());
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_set_link_setting,
    bench_set_node_inflow,
    bench_step_with_override
);
criterion_main!(benches);
