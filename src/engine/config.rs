#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Loudness and timing of the voice engine.
///
/// Defaults: each voice sits at 0.15, fades in over 10 ms, fades out over
/// 100 ms, and its oscillator is released 150 ms after removal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Gain of one audible voice.
    pub nominal_gain: f32,
    /// Fade-in used by add (while playing) and play.
    pub attack_secs: f32,
    /// Fade-out used by pause.
    pub pause_fade_secs: f32,
    /// Fade-out used by remove.
    pub remove_fade_secs: f32,
    /// Delay between remove and oscillator release. Must cover the fade.
    pub release_delay_secs: f32,
    /// Base frequency the engine starts with, in Hz.
    pub base_frequency: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nominal_gain: 0.15,
            attack_secs: 0.01,
            pause_fade_secs: 0.1,
            remove_fade_secs: 0.1,
            release_delay_secs: 0.15,
            base_frequency: 220.0,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nominal_gain(mut self, gain: f32) -> Self {
        self.nominal_gain = gain.clamp(0.0, 1.0);
        self
    }

    pub fn attack(mut self, secs: f32) -> Self {
        self.attack_secs = secs.max(0.0);
        self
    }

    pub fn pause_fade(mut self, secs: f32) -> Self {
        self.pause_fade_secs = secs.max(0.0);
        self
    }

    /// Set the remove fade; the release delay is stretched to cover it.
    pub fn remove_fade(mut self, secs: f32) -> Self {
        self.remove_fade_secs = secs.max(0.0);
        self.release_delay_secs = self.release_delay_secs.max(self.remove_fade_secs);
        self
    }

    pub fn release_delay(mut self, secs: f32) -> Self {
        self.release_delay_secs = secs.max(self.remove_fade_secs);
        self
    }

    pub fn base_frequency(mut self, hz: f32) -> Self {
        self.base_frequency = hz;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_never_precedes_the_fade() {
        let config = EngineConfig::new().remove_fade(0.4);
        assert_eq!(config.release_delay_secs, 0.4);

        let config = EngineConfig::new().release_delay(0.01);
        assert_eq!(config.release_delay_secs, config.remove_fade_secs);
    }

    #[test]
    fn gain_is_clamped() {
        assert_eq!(EngineConfig::new().nominal_gain(3.0).nominal_gain, 1.0);
    }
}
