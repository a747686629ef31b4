//! Benchmarks for waveform frames.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ratio_voices::{
    ratio::Ratio,
    scope::{sample_into, WaveConfig},
};

pub fn bench_scope(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/scope");
    let config = WaveConfig::default();
    let all: Vec<Ratio> = ["1/1", "3/2", "5/4", "7/4", "2/1", "9/8", "5/3", "11/8"]
        .iter()
        .map(|r| r.parse().unwrap())
        .collect();
    let mut points = Vec::with_capacity(config.segments + 1);

    for count in [0, 1, 4, 8] {
        let ratios = &all[..count];
        let mut time = 0.0;
        group.bench_with_input(BenchmarkId::new("frame", count), &count, |b, _| {
            b.iter(|| {
                sample_into(&mut points, black_box(time), black_box(ratios), &config);
                time += config.time_step;
            })
        });
    }

    group.finish();
}
