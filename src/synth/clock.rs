use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Frames rendered so far, shared between the audio thread and control side.
///
/// The mixer is the only writer. Readers turn the count into seconds, which is
/// the timeline gain ramps and deferred releases are scheduled against.
#[derive(Debug, Clone)]
pub struct AudioClock {
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

impl AudioClock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Seconds of audio rendered.
    pub fn now(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub(crate) fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_count() {
        let clock = AudioClock::new(1_000.0);
        let reader = clock.clone();
        clock.advance(250);
        assert_eq!(reader.frames(), 250);
        assert_eq!(reader.now(), 0.25);
    }
}
