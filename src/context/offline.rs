use rtrb::{Consumer, RingBuffer};

use crate::{
    context::{AudioContext, ContextState, VoiceLink, MESSAGE_QUEUE_LEN},
    dsp::RampStart,
    error::{EngineError, Result},
    synth::{AudioClock, Voice, VoiceId, VoiceMessage, VoiceMixer},
};

/// Renders the ensemble on demand in the calling thread.
///
/// Messages travel through the same ring the realtime context uses, so what
/// is observed here is what the audio callback would do. The clock only
/// advances while the context is running and [`render`](Self::render) is called.
pub struct OfflineContext {
    link: VoiceLink,
    mixer: VoiceMixer<Consumer<VoiceMessage>>,
    state: ContextState,
}

impl OfflineContext {
    pub fn new(sample_rate: f32) -> Self {
        let (tx, rx) = RingBuffer::<VoiceMessage>::new(MESSAGE_QUEUE_LEN);
        Self {
            link: VoiceLink::new(tx),
            mixer: VoiceMixer::new(rx, AudioClock::new(sample_rate)),
            state: ContextState::Unopened,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.mixer.sample_rate()
    }

    pub fn clock(&self) -> &AudioClock {
        self.mixer.clock()
    }

    /// Render into `out`. Silence without advancing time unless running.
    pub fn render(&mut self, out: &mut [f32]) {
        if self.state == ContextState::Running {
            self.mixer.render_block(out);
        } else {
            out.fill(0.0);
        }
    }

    /// Render `seconds` of audio and return it.
    pub fn render_seconds(&mut self, seconds: f64) -> Vec<f32> {
        let frames = (seconds * self.sample_rate() as f64).round() as usize;
        let mut out = vec![0.0; frames];
        self.render(&mut out);
        out
    }

    /// Voice as seen by the audio thread (after the last render).
    pub fn voice(&self, id: VoiceId) -> Option<&Voice> {
        self.mixer.voice(id)
    }

    /// Oscillators alive on the audio thread (after the last render).
    pub fn running_voices(&self) -> usize {
        self.mixer.voice_count()
    }

    /// Oscillators started and not yet stopped, from the control side.
    pub fn live_voices(&self) -> usize {
        self.link.live_count()
    }
}

impl AudioContext for OfflineContext {
    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> Result<()> {
        match self.state {
            ContextState::Closed => Err(EngineError::output_unavailable("context is closed")),
            _ => {
                self.state = ContextState::Running;
                Ok(())
            }
        }
    }

    fn current_time(&self) -> f64 {
        self.mixer.clock().now()
    }

    fn start_voice(&mut self, id: VoiceId, frequency: f32) -> Result<()> {
        self.link.start(id, frequency)
    }

    fn set_frequency(&mut self, id: VoiceId, frequency: f32) -> Result<()> {
        self.link.set_frequency(id, frequency)
    }

    fn ramp_gain(
        &mut self,
        id: VoiceId,
        from: RampStart,
        to: f32,
        duration_secs: f32,
    ) -> Result<()> {
        self.link.ramp_gain(id, from, to, duration_secs)
    }

    fn stop_voice(&mut self, id: VoiceId) -> Result<()> {
        self.link.stop(id)
    }

    fn close(&mut self) {
        // Make room on the ring, then flush the stop through the mixer
        let mut scratch = [0.0f32; 1];
        self.mixer.render_block(&mut scratch);
        self.link.stop_all();
        self.mixer.render_block(&mut scratch);
        self.state = ContextState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspended_context_does_not_advance() {
        let mut ctx = OfflineContext::new(1_000.0);
        let out = ctx.render_seconds(0.5);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(ctx.current_time(), 0.0);

        ctx.resume().unwrap();
        ctx.render_seconds(0.5);
        assert_eq!(ctx.current_time(), 0.5);
    }

    #[test]
    fn double_stop_reports_already_released() {
        let mut ctx = OfflineContext::new(1_000.0);
        let id = VoiceId::from_raw(1);
        ctx.start_voice(id, 100.0).unwrap();
        ctx.stop_voice(id).unwrap();
        assert!(matches!(
            ctx.stop_voice(id),
            Err(EngineError::ResourceAlreadyReleased(v)) if v == id
        ));
    }

    #[test]
    fn stop_on_a_full_ring_keeps_the_voice_live() {
        let mut ctx = OfflineContext::new(1_000.0);
        ctx.resume().unwrap();
        let id = VoiceId::from_raw(1);
        ctx.start_voice(id, 100.0).unwrap();
        ctx.render_seconds(0.01);

        while ctx.set_frequency(id, 200.0).is_ok() {}
        assert!(matches!(ctx.stop_voice(id), Err(EngineError::QueueFull)));
        assert_eq!(ctx.live_voices(), 1);

        ctx.render_seconds(0.01);
        ctx.stop_voice(id).unwrap();
        assert_eq!(ctx.live_voices(), 0);
        ctx.render_seconds(0.01);
        assert_eq!(ctx.running_voices(), 0);
    }

    #[test]
    fn close_gets_through_a_full_ring() {
        let mut ctx = OfflineContext::new(1_000.0);
        ctx.resume().unwrap();
        let id = VoiceId::from_raw(1);
        ctx.start_voice(id, 100.0).unwrap();
        while ctx.set_frequency(id, 200.0).is_ok() {}
        ctx.close();
        assert_eq!(ctx.running_voices(), 0);
    }

    #[test]
    fn closed_context_cannot_resume() {
        let mut ctx = OfflineContext::new(1_000.0);
        ctx.resume().unwrap();
        ctx.start_voice(VoiceId::from_raw(1), 100.0).unwrap();
        ctx.close();
        assert_eq!(ctx.running_voices(), 0);
        assert_eq!(ctx.live_voices(), 0);
        assert!(matches!(
            ctx.resume(),
            Err(EngineError::AudioOutputUnavailable(_))
        ));
    }
}
