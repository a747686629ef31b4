//! Composable building blocks for the per-voice signal chain.
//!
//! Graph nodes wrap the low-level DSP primitives with block-based rendering.
//! A voice is `OscNode::sine(freq).through(GainNode::silent())`.

/// Fluent combinators (`.through()`).
pub mod extensions;
/// Gain stage with cancellable ramps.
pub mod gain;
/// Core traits shared by all graph nodes.
pub mod node;
/// Retunable sine source.
pub mod oscillator;
/// Serial chaining of two nodes (source → processor).
pub mod through;

pub use node::{GraphNode, RenderCtx};
