//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs.

/// Signal multiplication (gain application).
pub mod amplify;
/// Additive summing and level measurement.
pub mod mix;
/// Sine phase accumulator.
pub mod oscillator;
/// Gain value with cancellable linear ramps.
pub mod param;

pub use param::{GainParam, RampStart};
