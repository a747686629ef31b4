//! The waveform picture of the ensemble, regenerated once per frame.

pub mod frame_loop;
pub mod sampler;

pub use frame_loop::{CancelHandle, FrameSink, RenderLoop};
pub use sampler::{sample, sample_into, Point, WaveConfig, WaveSampler};
