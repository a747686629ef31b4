//! Signal multiplication primitive.

/*
Signal Multiplication
=====================

A voice is a sine multiplied by its gain curve, sample by sample:

    output[i] = signal[i] × gain[i]

Vocabulary
----------

  amplitude     The "height" of a signal. A sine from the oscillator swings
                between -1.0 and +1.0.

  gain          A multiplier applied to amplitude.
                  gain = 1.0  →  unchanged (unity gain)
                  gain < 1.0  →  quieter (attenuation)
                  gain = 0.0  →  silence

Because the gain is a per-sample buffer rather than one number per block, a
ramp that starts halfway through a block is applied exactly where it starts.

    Oscillator: [ 0.8, -0.6,  0.9, -0.7, ...]
    Gain ramp:  [ 0.0, 0.05, 0.10, 0.15, ...]
    Output:     [ 0.0, -0.03, 0.09, -0.105, ...]

Decibels, for reference (dB = 20 × log₁₀(gain)):
    ×1.0   =   0 dB
    ×0.15  ≈ -16 dB   (one voice at nominal loudness)
    ×0.01  = -40 dB
*/

/// Multiply a signal by a modulator, writing result into signal buffer (in-place).
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}
