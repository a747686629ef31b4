pub mod context; // Audio output: offline and cpal
pub mod dsp;
pub mod engine; // Voice engine: ensemble, transport, deferred release
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod ratio;
pub mod scope; // Waveform sampling for display
pub mod synth; // Audio-thread voices and mixer

pub use context::{AudioContext, ContextState, CpalContext, OfflineContext};
pub use engine::{CommandOutcome, EngineConfig, EnsembleCommand, Transport, VoiceEngine};
pub use error::{EngineError, Result};
pub use ratio::{Ratio, RatioError};
pub use synth::VoiceId;

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Oscillators the mixer holds at once; further voices are refused.
pub const MAX_VOICES: usize = 64;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
