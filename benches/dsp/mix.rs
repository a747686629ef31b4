//! Benchmarks for summing and level metering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ratio_voices::dsp::mix;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let signal_a: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let signal_b: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();

        let mut buffer_a = signal_a.clone();
        group.bench_with_input(BenchmarkId::new("sum_in_place", size), &size, |b, _| {
            b.iter(|| {
                buffer_a.copy_from_slice(&signal_a);
                mix::sum_in_place(black_box(&mut buffer_a), black_box(&signal_b));
            })
        });

        // Meters run on every UI frame
        group.bench_with_input(BenchmarkId::new("peak", size), &size, |b, _| {
            b.iter(|| mix::peak(black_box(&signal_a)))
        });
        group.bench_with_input(BenchmarkId::new("rms", size), &size, |b, _| {
            b.iter(|| mix::rms(black_box(&signal_a)))
        });
    }

    group.finish();
}
