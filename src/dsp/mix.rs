//! Additive mixing and level measurement.

/*
Additive Mixing
===============

The ensemble is mixed by plain summation: every voice is added into the
output at its own gain, no weighting, no bus processing.

    out[i] = voice_1[i] + voice_2[i] + ... + voice_n[i]

With a nominal per-voice gain of 0.15, six voices in phase peak at 0.9, so the
sum stays inside [-1.0, +1.0] for typical ensembles. Larger ensembles can clip;
that is accepted rather than hidden behind automatic normalization, which
would make the loudness of existing voices jump whenever one is added.

  peak   max |x| over a buffer
  rms    sqrt(mean(x²)), closer to perceived loudness than peak
*/

/// Add signal B into signal A in-place (summing).
///
/// ⚠️ WARNING: Can exceed [-1.0, +1.0] range!
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

/// Largest absolute sample value.
pub fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

/// Root mean square level. Zero for an empty buffer.
pub fn rms(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_without_weighting() {
        let mut a = [0.1, 0.2, -0.3];
        sum_in_place(&mut a, &[0.1, -0.2, -0.3]);
        assert_eq!(a, [0.2, 0.0, -0.6]);
    }

    #[test]
    fn levels_of_a_square() {
        let buf = [0.5, -0.5, 0.5, -0.5];
        assert_eq!(peak(&buf), 0.5);
        assert!((rms(&buf) - 0.5).abs() < 1e-6);
        assert_eq!(rms(&[]), 0.0);
    }
}
