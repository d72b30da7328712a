//! Benchmarks for the failure query hot path.
//!
//! Production builds run with injection disabled, so the disabled path must
//! stay a single atomic load.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rpc_chaos::{Config, FailureRegistry};

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let disabled = FailureRegistry::disabled();
    group.bench_function("disabled", |b| {
        b.iter(|| disabled.query(black_box("PushTask")));
    });

    let unknown = FailureRegistry::new(&Config::with_failure_spec("GetObject=1")).unwrap();
    group.bench_function("unconfigured_method", |b| {
        b.iter(|| unknown.query(black_box("PushTask")));
    });

    let exhausted = FailureRegistry::new(&Config::with_failure_spec("PushTask=0")).unwrap();
    group.bench_function("exhausted_budget", |b| {
        b.iter(|| exhausted.query(black_box("PushTask")));
    });

    let active =
        FailureRegistry::new(&Config::with_failure_spec(&format!("PushTask={}", u64::MAX)))
            .unwrap();
    group.bench_function("active_budget", |b| {
        b.iter(|| active.query(black_box("PushTask")));
    });

    group.finish();
}

criterion_group!(benches, bench_query);
criterion_main!(benches);
