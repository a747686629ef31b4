use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    context::{AudioContext, ContextState, VoiceLink, MESSAGE_QUEUE_LEN},
    dsp::RampStart,
    error::{EngineError, Result},
    synth::{AudioClock, VoiceId, VoiceMessage, VoiceMixer},
    MAX_BLOCK_SIZE,
};

/// Capacity of the audio → UI tap ring, in samples.
pub const TAP_LEN: usize = 1 << 15;

/// Default output device, opened on first [`resume`](AudioContext::resume).
///
/// Until then, voice messages queue in the ring and the clock reads zero.
pub struct CpalContext {
    link: VoiceLink,
    /// Audio end of the message ring; moves into the callback on open.
    pending_rx: Option<Consumer<VoiceMessage>>,
    tap_tx: Option<Producer<f32>>,
    tap_rx: Option<Consumer<f32>>,
    clock: Option<AudioClock>,
    stream: Option<cpal::Stream>,
    state: ContextState,
}

impl CpalContext {
    pub fn new() -> Self {
        let (tx, rx) = RingBuffer::<VoiceMessage>::new(MESSAGE_QUEUE_LEN);
        let (tap_tx, tap_rx) = RingBuffer::<f32>::new(TAP_LEN);
        Self {
            link: VoiceLink::new(tx),
            pending_rx: Some(rx),
            tap_tx: Some(tap_tx),
            tap_rx: Some(tap_rx),
            clock: None,
            stream: None,
            state: ContextState::Unopened,
        }
    }

    /// Mono copy of everything the device plays. Can be taken once.
    pub fn take_tap(&mut self) -> Option<Consumer<f32>> {
        self.tap_rx.take()
    }

    /// Device sample rate, once opened.
    pub fn sample_rate(&self) -> Option<f32> {
        self.clock.as_ref().map(AudioClock::sample_rate)
    }

    fn open(&mut self) -> Result<()> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = host
            .default_output_device()
            .ok_or_else(|| EngineError::output_unavailable("no default output device available"))?;
        if let Ok(name) = device.name() {
            log::info!("cpal device: {}", name);
        } else {
            log::info!("cpal device: (no name)");
        }
        let config = device
            .default_output_config()
            .map_err(|e| EngineError::output_unavailable(format!("no output config: {e}")))?;
        if config.sample_format() != cpal::SampleFormat::F32 {
            log::warn!(
                "default sample format is {}, requesting f32 anyway",
                config.sample_format()
            );
        }

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        log::info!("sample rate: {}", sample_rate);
        log::info!("num channels: {}", channels);

        let rx = self
            .pending_rx
            .take()
            .ok_or_else(|| EngineError::output_unavailable("output already opened"))?;
        let clock = AudioClock::new(sample_rate);
        let mut mixer = VoiceMixer::new(rx, clock.clone());
        if let Some(tap) = self.tap_tx.take() {
            mixer = mixer.with_tap(tap);
        }

        // Buffer reused by audio callback
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;
                    while frames_written < total_frames {
                        let frames_remaining = total_frames - frames_written;
                        let frames_to_render = frames_remaining.min(MAX_BLOCK_SIZE);

                        let block = &mut render_buf[..frames_to_render];
                        mixer.render_block(block);

                        // Duplicate mono to all channels and write to device
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                },
                |err| log::error!("stream error: {}", err),
                None,
            )
            .map_err(|e| EngineError::output_unavailable(format!("failed to build output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| EngineError::output_unavailable(format!("failed to start output stream: {e}")))?;

        self.clock = Some(clock);
        self.stream = Some(stream);
        self.state = ContextState::Running;
        Ok(())
    }
}

impl Default for CpalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioContext for CpalContext {
    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> Result<()> {
        match self.state {
            ContextState::Running => Ok(()),
            ContextState::Unopened => self.open().map_err(|e| {
                // The message ring went down with the failed stream
                if self.pending_rx.is_none() {
                    self.state = ContextState::Closed;
                }
                e
            }),
            ContextState::Closed => Err(EngineError::output_unavailable("context is closed")),
        }
    }

    fn current_time(&self) -> f64 {
        self.clock.as_ref().map_or(0.0, AudioClock::now)
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
        self.link.stop_all();
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                log::warn!("failed to pause output stream on close: {}", e);
            }
        }
        self.state = ContextState::Closed;
    }
}

impl Drop for CpalContext {
    fn drop(&mut self) {
        if self.state != ContextState::Closed {
            self.close();
        }
    }
}
