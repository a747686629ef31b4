use rtrb::{Producer, PushError};

use crate::{
    dsp::mix::sum_in_place,
    synth::{
        clock::AudioClock,
        message::{MessageReceiver, VoiceId, VoiceMessage},
        voice::Voice,
    },
    MAX_BLOCK_SIZE, MAX_VOICES,
};

/// Audio-thread side of the ensemble.
///
/// Owns every running voice, applies control messages at block boundaries
/// and sums the voices into the output. This is the only place audio buffers
/// are touched.
pub struct VoiceMixer<R: MessageReceiver> {
    voices: Vec<Voice>,
    rx: R,
    clock: AudioClock,
    temp_buffer: Vec<f32>,
    tap: Option<Producer<f32>>,
}

impl<R: MessageReceiver> VoiceMixer<R> {
    pub fn new(rx: R, clock: AudioClock) -> Self {
        Self {
            voices: Vec::with_capacity(MAX_VOICES),
            rx,
            clock,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            tap: None,
        }
    }

    /// Copy the mono mix into `tap` as it is rendered (drops on overflow).
    pub fn with_tap(mut self, tap: Producer<f32>) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn clock(&self) -> &AudioClock {
        &self.clock
    }

    pub fn sample_rate(&self) -> f32 {
        self.clock.sample_rate()
    }

    pub fn voice(&self, id: VoiceId) -> Option<&Voice> {
        self.voices.iter().find(|v| v.id() == id)
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(msg) = self.rx.pop() {
            self.apply(msg);
        }

        // Mix voices
        out.fill(0.0);
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let time = self.clock.now();
            let temp = &mut self.temp_buffer[..chunk.len()];
            for voice in &mut self.voices {
                voice.render(temp, time);
                sum_in_place(chunk, temp);
            }
            self.clock.advance(chunk.len());
        }

        self.voices.retain(|v| v.is_active());

        if let Some(tap) = self.tap.as_mut() {
            for &s in out.iter() {
                if let Err(PushError::Full(_)) = tap.push(s) {
                    break; // drop remainder if full
                }
            }
        }
    }

    fn apply(&mut self, msg: VoiceMessage) {
        match msg {
            VoiceMessage::Start { id, frequency } => {
                if self.voice(id).is_some() {
                    return;
                }
                if self.voices.len() >= MAX_VOICES {
                    // Stopped voices may not have been swept yet
                    self.voices.retain(|v| v.is_active());
                }
                // The pool never grows past its capacity on this thread
                if self.voices.len() < MAX_VOICES {
                    let voice = Voice::new(id, frequency, self.sample_rate());
                    self.voices.push(voice);
                }
            }
            VoiceMessage::SetFrequency { id, frequency } => {
                if let Some(voice) = self.find_voice(id) {
                    voice.set_frequency(frequency);
                }
            }
            VoiceMessage::RampGain {
                id,
                from,
                to,
                duration_secs,
            } => {
                if let Some(voice) = self.find_voice(id) {
                    voice.ramp_gain(from, to, duration_secs);
                }
            }
            VoiceMessage::Stop { id } => {
                if let Some(voice) = self.find_voice(id) {
                    voice.stop();
                }
            }
            VoiceMessage::StopAll => {
                for voice in &mut self.voices {
                    voice.stop();
                }
            }
        }
    }

    fn find_voice(&mut self, id: VoiceId) -> Option<&mut Voice> {
        self.voices.iter_mut().find(|v| v.id() == id)
    }
}
