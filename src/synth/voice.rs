use crate::{
    dsp::RampStart,
    graph::{
        extensions::NodeExt,
        gain::GainNode,
        node::{GraphNode, RenderCtx},
        oscillator::OscNode,
        through::Through,
    },
    synth::message::VoiceId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Running, // Oscillator running, audible or not depending on gain
    Stopped, // Oscillator stopped, waiting to be dropped by the mixer
}

/// One oscillator + gain pair on the audio thread.
pub struct Voice {
    id: VoiceId,
    state: VoiceState,
    sample_rate: f32,
    graph: Through<OscNode, GainNode>,
}

impl Voice {
    /// A running sine with its gain at zero.
    pub fn new(id: VoiceId, frequency: f32, sample_rate: f32) -> Self {
        Self {
            id,
            state: VoiceState::Running,
            sample_rate,
            graph: OscNode::sine(frequency).through(GainNode::silent()),
        }
    }

    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn frequency(&self) -> f32 {
        self.graph.source().frequency()
    }

    pub fn gain(&self) -> f32 {
        self.graph.filter().value()
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.graph.source_mut().set_frequency(frequency);
    }

    pub fn ramp_gain(&mut self, from: RampStart, to: f32, duration_secs: f32) {
        let sample_rate = self.sample_rate;
        self.graph
            .filter_mut()
            .ramp(from, to, duration_secs, sample_rate);
    }

    pub fn stop(&mut self) {
        self.graph.source_mut().stop();
        self.state = VoiceState::Stopped;
    }

    pub fn render(&mut self, out: &mut [f32], time: f64) {
        let ctx = RenderCtx::new(self.sample_rate, time);
        self.graph.render_block(out, &ctx);
    }

    pub fn is_active(&self) -> bool {
        self.state == VoiceState::Running && self.graph.is_active()
    }
}
