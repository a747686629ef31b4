use std::fmt;

use rtrb::Consumer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::RampStart;

/// Opaque voice identifier, unique for the lifetime of an engine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceId(u64);

impl VoiceId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Control → audio thread messages. All `Copy`, so pushing never allocates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VoiceMessage {
    /// Start a silent sine oscillator.
    Start { id: VoiceId, frequency: f32 },
    /// Retune immediately.
    SetFrequency { id: VoiceId, frequency: f32 },
    /// Cancel scheduled gain automation, then ramp.
    RampGain {
        id: VoiceId,
        from: RampStart,
        to: f32,
        duration_secs: f32,
    },
    /// Stop the oscillator and release the voice.
    Stop { id: VoiceId },
    /// Stop everything (context teardown).
    StopAll,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<VoiceMessage>;
}

impl MessageReceiver for Consumer<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        Consumer::pop(self).ok()
    }
}
