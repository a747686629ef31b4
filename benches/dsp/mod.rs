//! Benchmarks for low-level DSP primitives.

mod amplify;
mod mix;
mod oscillator;
mod param;

pub use amplify::bench_amplify;
pub use mix::bench_mix;
pub use oscillator::bench_oscillator;
pub use param::bench_param;
