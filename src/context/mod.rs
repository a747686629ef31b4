//! The shared audio output the engine schedules against.
//!
//! An [`AudioContext`] owns the audio-thread [`VoiceMixer`](crate::synth::VoiceMixer)
//! (directly, or inside a device callback) and the control end of the message
//! ring feeding it. The engine never renders audio itself: it starts, retunes,
//! ramps and stops voices through this trait.
//!
//! Two implementations:
//! - [`OfflineContext`] renders on demand in the calling thread. Deterministic,
//!   used by tests and for bouncing to a buffer.
//! - [`CpalContext`] opens the default output device lazily on first
//!   [`resume`](AudioContext::resume) and renders in the `cpal` callback.

mod offline;
mod realtime;

use std::collections::HashSet;

use rtrb::Producer;

use crate::{
    dsp::RampStart,
    error::{EngineError, Result},
    synth::{VoiceId, VoiceMessage},
};

pub use offline::OfflineContext;
pub use realtime::CpalContext;

/// Capacity of the control → audio message ring.
pub const MESSAGE_QUEUE_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Not opened yet (the suspended state); messages queue up until the
    /// first resume.
    Unopened,
    Running,
    /// Torn down. Cannot be resumed.
    Closed,
}

pub trait AudioContext {
    fn state(&self) -> ContextState;

    /// Open the output on first use; a running context is left alone.
    fn resume(&mut self) -> Result<()>;

    /// Seconds on the audio timeline. Does not advance while not running.
    fn current_time(&self) -> f64;

    /// Start a silent sine oscillator at `frequency`.
    fn start_voice(&mut self, id: VoiceId, frequency: f32) -> Result<()>;

    fn set_frequency(&mut self, id: VoiceId, frequency: f32) -> Result<()>;

    /// Cancel the voice's scheduled gain automation, then ramp `from` → `to`.
    fn ramp_gain(&mut self, id: VoiceId, from: RampStart, to: f32, duration_secs: f32)
        -> Result<()>;

    /// Stop and release the oscillator.
    ///
    /// Fails with [`EngineError::ResourceAlreadyReleased`] when it is already gone.
    fn stop_voice(&mut self, id: VoiceId) -> Result<()>;

    /// Stop every voice and release the output.
    fn close(&mut self);
}

impl<C: AudioContext + ?Sized> AudioContext for Box<C> {
    fn state(&self) -> ContextState {
        (**self).state()
    }

    fn resume(&mut self) -> Result<()> {
        (**self).resume()
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn start_voice(&mut self, id: VoiceId, frequency: f32) -> Result<()> {
        (**self).start_voice(id, frequency)
    }

    fn set_frequency(&mut self, id: VoiceId, frequency: f32) -> Result<()> {
        (**self).set_frequency(id, frequency)
    }

    fn ramp_gain(
        &mut self,
        id: VoiceId,
        from: RampStart,
        to: f32,
        duration_secs: f32,
    ) -> Result<()> {
        (**self).ramp_gain(id, from, to, duration_secs)
    }

    fn stop_voice(&mut self, id: VoiceId) -> Result<()> {
        (**self).stop_voice(id)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Control end of the message ring plus the set of oscillators started on it.
pub(crate) struct VoiceLink {
    tx: Producer<VoiceMessage>,
    live: HashSet<VoiceId>,
}

impl VoiceLink {
    pub(crate) fn new(tx: Producer<VoiceMessage>) -> Self {
        Self {
            tx,
            live: HashSet::new(),
        }
    }

    fn send(&mut self, msg: VoiceMessage) -> Result<()> {
        self.tx.push(msg).map_err(|_| EngineError::QueueFull)
    }

    pub(crate) fn start(&mut self, id: VoiceId, frequency: f32) -> Result<()> {
        self.send(VoiceMessage::Start { id, frequency })?;
        self.live.insert(id);
        Ok(())
    }

    pub(crate) fn set_frequency(&mut self, id: VoiceId, frequency: f32) -> Result<()> {
        self.send(VoiceMessage::SetFrequency { id, frequency })
    }

    pub(crate) fn ramp_gain(
        &mut self,
        id: VoiceId,
        from: RampStart,
        to: f32,
        duration_secs: f32,
    ) -> Result<()> {
        self.send(VoiceMessage::RampGain {
            id,
            from,
            to,
            duration_secs,
        })
    }

    pub(crate) fn stop(&mut self, id: VoiceId) -> Result<()> {
        if !self.live.contains(&id) {
            return Err(EngineError::ResourceAlreadyReleased(id));
        }
        // Still live until the stop is actually on the ring
        self.send(VoiceMessage::Stop { id })?;
        self.live.remove(&id);
        Ok(())
    }

    pub(crate) fn stop_all(&mut self) {
        self.live.clear();
        if self.send(VoiceMessage::StopAll).is_err() {
            log::warn!("message queue full while stopping all voices");
        }
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live.len()
    }
}
