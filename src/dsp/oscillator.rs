use std::f64::consts::TAU;

/*
Sine Phase Accumulator
======================

Every voice in the ensemble is a pure sine: one partial, no overtones. That is
what makes ratio relationships audible as clean beating and fusion instead of
being smeared by harmonics.

The oscillator keeps a normalized phase in [0, 1) and advances it by
frequency / sample_rate each sample:

    phase[n+1] = fract(phase[n] + f / sr)
    out[n]     = sin(2π · phase[n])

Keeping the phase (instead of recomputing sin(2π f t) from absolute time)
means a frequency change takes effect on the next sample without a jump in
the waveform. Retuning a voice therefore never clicks, which is why the
engine retunes immediately while it always ramps gain.

The accumulator is f64: at 48 kHz an f32 phase increment for low notes loses
enough precision over minutes of playback to drift audibly.
*/

pub struct OscillatorBlock {
    phase: f64,
}

impl OscillatorBlock {
    pub fn sine() -> Self {
        Self { phase: 0.0 }
    }

    /// Fill `destination` with a sine at `frequency` Hz.
    pub fn render(&mut self, destination: &mut [f32], frequency: f32, sample_rate: f32) {
        let increment = frequency as f64 / sample_rate as f64;
        for sample in destination.iter_mut() {
            *sample = (TAU * self.phase).sin() as f32;
            self.phase = (self.phase + increment).fract();
        }
    }

    /// Current normalized phase in [0, 1).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl Default for OscillatorBlock {
    fn default() -> Self {
        Self::sine()
    }
}
