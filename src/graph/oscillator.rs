use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Voice Oscillator
================

The sound source of every voice: a sine at `base · n/d` Hz.

Unlike a keyboard synth, the pitch does not come from a note number in the
render context. Each oscillator owns its frequency and is retuned directly,
either because its ratio was edited or because the shared base frequency
moved. Retuning is immediate; the phase accumulator in `OscillatorBlock`
keeps the waveform continuous across the change.

A stopped oscillator renders silence and reports inactive, which is the
mixer's cue to drop the voice.

Example usage:
  let mut osc = OscNode::sine(330.0);
  osc.set_frequency(495.0);   // 3/2 over 330 Hz
  osc.stop();
*/

pub struct OscNode {
    osc: OscillatorBlock,
    frequency: f32,
    stopped: bool,
}

impl OscNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency: sanitize(frequency),
            stopped: false,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Retune. Non-finite or negative input is clamped to silence-safe 0 Hz.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = sanitize(frequency);
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

fn sanitize(frequency: f32) -> f32 {
    if frequency.is_finite() {
        frequency.max(0.0)
    } else {
        0.0
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.stopped {
            out.fill(0.0);
            return;
        }
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }

    fn is_active(&self) -> bool {
        !self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let ctx = RenderCtx::new(sample_rate, 0.0);
        let mut osc = OscNode::sine(440.0);

        let mut buffer = vec![0.0f32; 128];
        osc.render_block(&mut buffer, &ctx);

        // sample n should be sin(2pi f n / sr)
        let sample_index = 12;
        let expected = (TAU * 440.0 * sample_index as f32 / sample_rate).sin();
        let actual = buffer[sample_index];
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn stopped_oscillator_is_silent() {
        let mut osc = OscNode::sine(220.0);
        osc.stop();
        let mut buffer = vec![1.0f32; 16];
        osc.render_block(&mut buffer, &RenderCtx::new(48_000.0, 0.0));
        assert!(buffer.iter().all(|&s| s == 0.0));
        assert!(!osc.is_active());
    }

    #[test]
    fn rejects_non_finite_frequency() {
        let mut osc = OscNode::sine(f32::NAN);
        assert_eq!(osc.frequency(), 0.0);
        osc.set_frequency(f32::INFINITY);
        assert_eq!(osc.frequency(), 0.0);
    }
}
