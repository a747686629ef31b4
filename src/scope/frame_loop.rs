use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    ratio::Ratio,
    scope::sampler::{Point, WaveConfig, WaveSampler},
};

/// Receives the points of each frame.
pub trait FrameSink {
    fn draw(&mut self, points: &[Point]);
}

impl<F: FnMut(&[Point])> FrameSink for F {
    fn draw(&mut self, points: &[Point]) {
        self(points)
    }
}

/// Stops a [`RenderLoop`] from anywhere it was cloned to.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The per-frame waveform task, one iteration per [`step`](Self::step).
///
/// Each step samples the latest ratios, hands the points to the sink and
/// advances time. Pacing is up to the caller.
#[derive(Debug)]
pub struct RenderLoop {
    sampler: WaveSampler,
    cancel: CancelHandle,
    frames: u64,
}

impl RenderLoop {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            sampler: WaveSampler::new(config),
            cancel: CancelHandle::new(),
            frames: 0,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn sampler(&self) -> &WaveSampler {
        &self.sampler
    }

    /// Iterations performed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one iteration. Returns `false`, doing nothing, once cancelled.
    pub fn step<S: FrameSink + ?Sized>(&mut self, ratios: &[Ratio], sink: &mut S) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        sink.draw(self.sampler.frame(ratios));
        self.sampler.advance();
        self.frames += 1;
        true
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(WaveConfig::default())
    }
}
