//! Benchmarks for gain automation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ratio_voices::dsp::{GainParam, RampStart};

use crate::BLOCK_SIZES;

pub fn bench_param(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/param");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Steady value, no ramp in flight
        let mut steady = GainParam::new(0.15);
        group.bench_with_input(BenchmarkId::new("steady", size), &size, |b, _| {
            b.iter(|| steady.render(black_box(&mut buffer)))
        });

        // Ramp restarted every block so it never settles
        let mut ramping = GainParam::default();
        group.bench_with_input(BenchmarkId::new("ramp", size), &size, |b, _| {
            b.iter(|| {
                ramping.ramp(RampStart::Value(0.0), 0.15, 1.0, 48_000.0);
                ramping.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
