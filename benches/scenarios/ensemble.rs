//! Benchmarks for rendering ensembles of voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ratio_voices::{
    context::OfflineContext,
    engine::{EngineConfig, VoiceEngine},
};

use crate::BLOCK_SIZES;

const RATIOS: [&str; 8] = ["1/1", "3/2", "5/4", "7/4", "2/1", "9/8", "5/3", "11/8"];

/// A playing engine with the first `count` ratios
fn playing(count: usize) -> VoiceEngine<OfflineContext> {
    let mut engine = VoiceEngine::new(OfflineContext::new(48_000.0), EngineConfig::default());
    for ratio in RATIOS.iter().take(count) {
        engine.add_voice_str(ratio, 220.0).unwrap();
    }
    engine.play().unwrap();
    engine
}

pub fn bench_ensemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/ensemble");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for count in [1, 4, 8] {
            let mut engine = playing(count);
            group.bench_with_input(
                BenchmarkId::new(format!("{count}_voices"), size),
                &size,
                |b, _| {
                    b.iter(|| engine.context_mut().render(black_box(&mut buffer)));
                },
            );
        }

        // Retuning every voice each block, as a base frequency drag does
        let mut engine = playing(8);
        let mut base = 220.0;
        group.bench_with_input(BenchmarkId::new("retune_8_voices", size), &size, |b, _| {
            b.iter(|| {
                base = if base > 440.0 { 220.0 } else { base + 1.0 };
                engine.update_frequencies(black_box(base)).unwrap();
                engine.context_mut().render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
