//! Error types for the voice engine.

use thiserror::Error;

use crate::{ratio::RatioError, synth::VoiceId};

/// Everything the engine can report.
///
/// Unknown voice ids are deliberately absent: operations on them are no-ops.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A ratio that cannot be sounded (non-numeric, zero numerator or denominator)
    #[error("malformed ratio: {0}")]
    MalformedRatio(#[from] RatioError),

    /// The audio output could not be opened or resumed
    #[error("audio output unavailable: {0}")]
    AudioOutputUnavailable(String),

    /// Stop requested for an oscillator that is already gone
    #[error("voice {0} was already released")]
    ResourceAlreadyReleased(VoiceId),

    /// Base frequency must be finite and positive
    #[error("invalid base frequency: {0} Hz")]
    InvalidBaseFrequency(f32),

    /// The control → audio message ring is full
    #[error("audio message queue is full")]
    QueueFull,

    /// Every oscillator slot is taken, counting voices still fading out
    #[error("voice limit of {0} reached")]
    VoiceLimit(usize),
}

impl EngineError {
    pub fn output_unavailable(reason: impl std::fmt::Display) -> Self {
        EngineError::AudioOutputUnavailable(reason.to_string())
    }
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
