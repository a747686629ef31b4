//! Control side of the ensemble.
//!
//! [`VoiceEngine`] keeps the list of active voices and the transport state,
//! and turns every user gesture into messages on an [`AudioContext`]. All
//! gain changes are ramps that first cancel whatever automation the voice
//! still had queued, so rapid add/remove/pause sequences never click.
//!
//! ```text
//!   UI ──EnsembleCommand──▶ VoiceEngine ──VoiceMessage──▶ [ring] ──▶ VoiceMixer ──▶ device
//!                              │  ▲                                      │
//!                              │  └──────── AudioClock (frames) ◀────────┘
//!                              └─▶ ReleaseScheduler (fires from tick())
//! ```

pub mod command;
pub mod config;
pub mod ensemble;
pub mod scheduler;

pub use command::{CommandOutcome, EnsembleCommand};
pub use config::EngineConfig;
pub use ensemble::{ActiveVoice, Ensemble, Transport};
pub use scheduler::ReleaseScheduler;

use crate::{
    context::AudioContext,
    dsp::RampStart,
    error::{EngineError, Result},
    ratio::Ratio,
    synth::VoiceId,
    MAX_VOICES,
};

pub struct VoiceEngine<C: AudioContext> {
    context: C,
    config: EngineConfig,
    ensemble: Ensemble,
    releases: ReleaseScheduler,
    base_frequency: f32,
    next_id: u64,
}

fn check_base_frequency(hz: f32) -> Result<f32> {
    if hz.is_finite() && hz > 0.0 {
        Ok(hz)
    } else {
        Err(EngineError::InvalidBaseFrequency(hz))
    }
}

impl<C: AudioContext> VoiceEngine<C> {
    pub fn new(context: C, config: EngineConfig) -> Self {
        Self {
            context,
            base_frequency: config.base_frequency,
            config,
            ensemble: Ensemble::new(),
            releases: ReleaseScheduler::new(),
            next_id: 0,
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    pub fn voices(&self) -> &[ActiveVoice] {
        self.ensemble.voices()
    }

    pub fn voice(&self, id: VoiceId) -> Option<&ActiveVoice> {
        self.ensemble.get(id)
    }

    pub fn len(&self) -> usize {
        self.ensemble.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ensemble.is_empty()
    }

    pub fn active_ratios(&self) -> Vec<Ratio> {
        self.ensemble.ratios()
    }

    pub fn transport(&self) -> Transport {
        self.ensemble.transport()
    }

    pub fn is_playing(&self) -> bool {
        self.ensemble.is_playing()
    }

    pub fn is_paused(&self) -> bool {
        self.ensemble.is_paused()
    }

    pub fn base_frequency(&self) -> f32 {
        self.base_frequency
    }

    /// Releases scheduled but not yet fired.
    pub fn pending_releases(&self) -> usize {
        self.releases.len()
    }

    /// Start a sine voice at `ratio × base_freq`.
    ///
    /// The oscillator starts silent; it fades in only if the ensemble is
    /// playing. Opens the audio output on first use. Voices still fading
    /// out count towards [`MAX_VOICES`] until released.
    pub fn add_voice(&mut self, ratio: Ratio, base_freq: f32) -> Result<VoiceId> {
        let base_freq = check_base_frequency(base_freq)?;
        if self.ensemble.len() + self.releases.len() >= MAX_VOICES {
            return Err(EngineError::VoiceLimit(MAX_VOICES));
        }
        self.context.resume()?;

        let id = VoiceId::from_raw(self.next_id);
        let frequency = ratio.frequency(base_freq);
        self.context.start_voice(id, frequency)?;
        self.next_id += 1;

        if self.ensemble.is_playing() {
            let result = self.fade_in(id);
            self.contain(id, result);
        }
        self.ensemble.push(ActiveVoice { id, ratio });
        log::debug!("added voice {} at {} ({:.2} Hz)", id, ratio, frequency);
        Ok(id)
    }

    /// [`add_voice`](Self::add_voice) from an `"n/d"` string.
    pub fn add_voice_str(&mut self, ratio: &str, base_freq: f32) -> Result<VoiceId> {
        let ratio: Ratio = ratio.parse()?;
        self.add_voice(ratio, base_freq)
    }

    /// Retune a voice to `numerator/denominator × base_freq`.
    ///
    /// The stored ratio is replaced with the simplified one. Unknown ids are
    /// ignored; the gain and transport are untouched.
    pub fn update_voice(
        &mut self,
        id: VoiceId,
        numerator: u32,
        denominator: u32,
        base_freq: f32,
    ) -> Result<()> {
        if self.ensemble.get(id).is_none() {
            return Ok(());
        }
        let ratio = Ratio::new(numerator, denominator)?;
        let base_freq = check_base_frequency(base_freq)?;

        let frequency = ratio.frequency(base_freq);
        self.context.set_frequency(id, frequency)?;
        if let Some(voice) = self.ensemble.get_mut(id) {
            voice.ratio = ratio;
        }
        log::debug!("voice {} now {} ({:.2} Hz)", id, ratio, frequency);
        Ok(())
    }

    /// Fade a voice out and drop it from the ensemble.
    ///
    /// The oscillator is released once the fade has finished, on a later
    /// [`tick`](Self::tick). Unknown or already removed ids are ignored.
    pub fn remove_voice(&mut self, id: VoiceId) {
        let Some(voice) = self.ensemble.remove(id) else {
            return;
        };
        let result = self.context.ramp_gain(
            id,
            RampStart::Current,
            0.0,
            self.config.remove_fade_secs,
        );
        self.contain(id, result);

        let due = self.context.current_time() + self.config.release_delay_secs as f64;
        self.releases.schedule(id, due);
        log::debug!("removed voice {} ({}), release at {:.3}s", id, voice.ratio, due);
    }

    /// Fade every voice in from silence.
    pub fn play(&mut self) -> Result<()> {
        self.context.resume()?;
        self.ensemble.set_transport(Transport::Playing);
        for id in self.ids() {
            let result = self.fade_in(id);
            self.contain(id, result);
        }
        log::debug!("playing {} voices", self.ensemble.len());
        Ok(())
    }

    /// Fade every voice to silence. Oscillators keep running.
    pub fn pause(&mut self) {
        self.ensemble.set_transport(Transport::Paused);
        for id in self.ids() {
            let result = self.context.ramp_gain(
                id,
                RampStart::Current,
                0.0,
                self.config.pause_fade_secs,
            );
            self.contain(id, result);
        }
        log::debug!("paused");
    }

    /// Move the base frequency and retune every voice to `ratio × base_freq`.
    pub fn update_frequencies(&mut self, base_freq: f32) -> Result<()> {
        self.base_frequency = check_base_frequency(base_freq)?;
        for voice in self.ensemble.voices().to_vec() {
            let result = self
                .context
                .set_frequency(voice.id, voice.ratio.frequency(self.base_frequency));
            self.contain(voice.id, result);
        }
        log::debug!("base frequency {:.2} Hz", self.base_frequency);
        Ok(())
    }

    /// Apply one front-end event against the engine's own base frequency.
    pub fn handle(&mut self, command: EnsembleCommand) -> Result<CommandOutcome> {
        match command {
            EnsembleCommand::SelectRatio(ratio) => {
                let id = self.add_voice_str(&ratio, self.base_frequency)?;
                return Ok(CommandOutcome::Added(id));
            }
            EnsembleCommand::RemoveVoice(id) => self.remove_voice(id),
            EnsembleCommand::EditRatio {
                id,
                numerator,
                denominator,
            } => self.update_voice(id, numerator, denominator, self.base_frequency)?,
            EnsembleCommand::Play => self.play()?,
            EnsembleCommand::Pause => self.pause(),
            EnsembleCommand::SetBaseFrequency(hz) => self.update_frequencies(hz)?,
        }
        Ok(CommandOutcome::Applied)
    }

    /// Fire releases whose time has come on the audio clock.
    ///
    /// Call regularly from the control loop.
    pub fn tick(&mut self) {
        let now = self.context.current_time();
        for id in self.releases.take_due(now) {
            self.release(id);
        }
    }

    /// Stop every oscillator now and close the output.
    pub fn shutdown(&mut self) {
        for id in self.ids() {
            self.ensemble.remove(id);
            self.releases.schedule(id, 0.0);
        }
        for id in self.releases.drain() {
            self.release(id);
        }
        self.context.close();
        // Closing stops whatever a full ring deferred
        self.releases.drain();
        log::debug!("engine shut down");
    }

    fn ids(&self) -> Vec<VoiceId> {
        self.ensemble.voices().iter().map(|v| v.id).collect()
    }

    fn fade_in(&mut self, id: VoiceId) -> Result<()> {
        self.context.ramp_gain(
            id,
            RampStart::Value(0.0),
            self.config.nominal_gain,
            self.config.attack_secs,
        )
    }

    fn release(&mut self, id: VoiceId) {
        match self.context.stop_voice(id) {
            Ok(()) => log::debug!("released voice {}", id),
            Err(EngineError::QueueFull) => {
                // Retry on the next tick once the mixer has drained the ring
                log::warn!("message queue full, release of voice {} deferred", id);
                let now = self.context.current_time();
                self.releases.schedule(id, now);
            }
            Err(e) => self.contain(id, Err(e)),
        }
    }

    /// Log a per-voice failure instead of failing the whole operation.
    fn contain(&self, id: VoiceId, result: Result<()>) {
        match result {
            Ok(()) => {}
            Err(EngineError::ResourceAlreadyReleased(_)) => {
                log::warn!("voice {} was already released", id);
            }
            Err(e) => log::warn!("voice {}: {}", id, e),
        }
    }
}
