use crate::MIN_TIME;

/*
Automatable Gain
================

A voice's loudness is never switched, only ramped. Stepping the amplitude of a
running sine from 0.15 to 0.0 between two samples puts a discontinuity in the
waveform, and a discontinuity is broadband energy: a click. Spreading the same
change over a few milliseconds turns it into a smooth fade.

Vocabulary
----------

  value       The gain currently applied to the signal (0.0 = silent).

  automation  A scheduled change of `value` over time. Here there is only one
              kind: a linear ramp from a start value to a target value across
              a fixed number of samples.

  cancel      Drop whatever automation is in flight and hold `value` where it
              is right now. Ramps never stack: scheduling on top of a live ramp
              would leave two curves fighting over the same value.


The Shape
---------

    gain
    0.15 ┤        ╭──────────────╮
         │       ╱                ╲
         │      ╱                  ╲
    0.0  ┼─────╯                    ╰──────→ t
            play (10 ms)       pause (100 ms)

Fade-ins are short (a few ms is already inaudible as a click), fade-outs are
longer so the tail does not sound chopped.


The Math
--------

At ramp start we snapshot `start` and compute the ramp length in samples:

    total = round(duration · sample_rate), at least 1

then each sample:

    value = start + (target - start) · elapsed / total

so the ramp lands exactly on `target` after `total` samples regardless of
float accumulation error. This is the same snapshot-and-interpolate approach
an ADSR uses for its release stage.
*/

/// Where a ramp starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RampStart {
    /// Whatever the gain is at the moment the ramp is applied.
    Current,
    /// An explicit value, jumped to before the ramp begins.
    Value(f32),
}

#[derive(Debug, Clone, Copy)]
struct LinearRamp {
    start: f32,
    target: f32,
    total_samples: u32,
    elapsed_samples: u32,
}

/// A gain value with at most one linear ramp scheduled on it.
#[derive(Debug, Clone)]
pub struct GainParam {
    value: f32,
    ramp: Option<LinearRamp>,
}

impl GainParam {
    pub fn new(value: f32) -> Self {
        Self { value, ramp: None }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target of the ramp in flight, or the held value.
    pub fn target(&self) -> f32 {
        self.ramp.map_or(self.value, |r| r.target)
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    /// Drop any scheduled automation and hold the current value.
    pub fn cancel_scheduled_values(&mut self) {
        self.ramp = None;
    }

    /// Jump to `value`. Only valid with no automation in flight.
    pub fn set_value(&mut self, value: f32) {
        debug_assert!(self.ramp.is_none(), "set_value during a scheduled ramp");
        self.value = value;
    }

    /// Schedule a linear ramp from the current value to `target`.
    ///
    /// Precondition: no ramp is in flight. Call
    /// [`cancel_scheduled_values`](Self::cancel_scheduled_values) first.
    pub fn linear_ramp_to(&mut self, target: f32, duration_secs: f32, sample_rate: f32) {
        debug_assert!(
            self.ramp.is_none(),
            "ramp scheduled on top of an uncancelled ramp"
        );

        let total_samples = if duration_secs <= MIN_TIME {
            1
        } else {
            (duration_secs * sample_rate).round().max(1.0) as u32
        };

        self.ramp = Some(LinearRamp {
            start: self.value,
            target,
            total_samples,
            elapsed_samples: 0,
        });
    }

    /// Cancel, optionally jump to a start value, then ramp to `target`.
    ///
    /// This is the only path the voice uses, so every audibility change
    /// cancels before it schedules.
    pub fn ramp(&mut self, from: RampStart, target: f32, duration_secs: f32, sample_rate: f32) {
        self.cancel_scheduled_values();
        if let RampStart::Value(start) = from {
            self.set_value(start);
        }
        self.linear_ramp_to(target, duration_secs, sample_rate);
    }

    /// Produce the gain for the next sample and advance the ramp.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if let Some(ramp) = self.ramp.as_mut() {
            let progress = ramp.elapsed_samples as f32 / ramp.total_samples as f32;
            self.value = ramp.start + (ramp.target - ramp.start) * progress;
            ramp.elapsed_samples = ramp.elapsed_samples.saturating_add(1);

            if ramp.elapsed_samples >= ramp.total_samples {
                let target = ramp.target;
                self.ramp = None;
                // The sample just produced still carries the interpolated value;
                // the next one sits on the target.
                let current = self.value;
                self.value = target;
                return current;
            }
        }
        self.value
    }

    /// Write one gain value per sample into `buffer`.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

impl Default for GainParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    #[test]
    fn ramp_lands_on_target() {
        let mut gain = GainParam::new(0.0);
        gain.ramp(RampStart::Value(0.0), 0.15, 0.01, SAMPLE_RATE);

        let mut buf = [0.0; 10];
        gain.render(&mut buf);
        assert_eq!(buf[0], 0.0, "ramp starts from the start value");
        assert!(buf.windows(2).all(|w| w[1] >= w[0]), "fade-in is monotonic");
        assert!(!gain.is_ramping());
        assert_eq!(gain.value(), 0.15);
        assert_eq!(gain.next_sample(), 0.15);
    }

    #[test]
    fn ramp_from_current_starts_where_gain_is() {
        let mut gain = GainParam::new(0.0);
        gain.ramp(RampStart::Value(0.0), 1.0, 0.1, SAMPLE_RATE);
        let mut buf = [0.0; 50];
        gain.render(&mut buf);
        let halfway = gain.value();
        assert!((halfway - 0.5).abs() < 0.02);

        gain.ramp(RampStart::Current, 0.0, 0.1, SAMPLE_RATE);
        assert!((gain.next_sample() - halfway).abs() < 1e-6);
        assert_eq!(gain.target(), 0.0);
    }

    #[test]
    fn cancel_holds_current_value() {
        let mut gain = GainParam::new(0.0);
        gain.ramp(RampStart::Value(0.0), 1.0, 0.1, SAMPLE_RATE);
        let mut buf = [0.0; 20];
        gain.render(&mut buf);
        let held = gain.value();

        gain.cancel_scheduled_values();
        gain.render(&mut buf);
        assert!(buf.iter().all(|&g| g == held));
    }

    #[test]
    fn zero_duration_is_a_single_sample_ramp() {
        let mut gain = GainParam::new(0.3);
        gain.ramp(RampStart::Current, 0.0, 0.0, SAMPLE_RATE);
        gain.next_sample();
        assert_eq!(gain.value(), 0.0);
        assert!(!gain.is_ramping());
    }
}
