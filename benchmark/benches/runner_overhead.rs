// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Harness overhead benchmarks.
//!
//! Measures what the harness itself adds to a measurement: clock reads and
//! the repeated-work loop around a no-op variant.

use clientbench::{work, BenchmarkHarness, TimeSource, Variant};
use clientbench_core::{ClockKind, Repetitions, TargetUrl};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

/// Repetition counts to benchmark.
const REPETITIONS: &[u64] = &[101, 1_000, 10_000];

/// Benchmark a single clock read for each clock kind.
fn bench_clock_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_read");

    for clock in [ClockKind::Real, ClockKind::Cpu] {
        let source = TimeSource::new(clock);
        group.bench_function(clock.as_str(), |b| {
            b.iter(|| black_box(source.now().expect("clock read failed")));
        });
    }

    group.finish();
}

/// Benchmark a full harness run of a no-op variant.
fn bench_noop_variant(c: &mut Criterion) {
    let mut group = c.benchmark_group("noop_variant");
    group.measurement_time(Duration::from_secs(5));

    let url = TargetUrl::new("http://localhost:5000/").expect("valid url");
    let variant = Variant::new("noop", |_| Ok(work(|| Ok(()))));

    for &n in REPETITIONS {
        group.throughput(Throughput::Elements(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let harness = BenchmarkHarness::new(Repetitions::new(n).expect("valid count"), ClockKind::Real)
                .echo(false);

            b.iter(|| {
                let result = harness.run(&variant, &url).expect("noop run failed");
                black_box(result);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clock_read, bench_noop_variant);
criterion_main!(benches);
