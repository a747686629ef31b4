//! Real-world scenario benchmarks.
//!
//! Whole ensembles rendered through the same mixer the audio callback runs,
//! and the per-frame waveform sampling the front end does.

mod ensemble;
mod scope;

pub use ensemble::bench_ensemble;
pub use scope::bench_scope;
