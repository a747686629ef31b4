use crate::{
    dsp::{amplify::multiply_in_place, GainParam, RampStart},
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// In-place gain stage driven by a [`GainParam`].
///
/// Renders the gain curve for the block into a scratch buffer and multiplies
/// the incoming signal by it, so ramps are applied per sample.
pub struct GainNode {
    gain: GainParam,
    temp_buffer: Vec<f32>,
}

impl GainNode {
    pub fn new(initial: f32) -> Self {
        Self {
            gain: GainParam::new(initial),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Silent until ramped up.
    pub fn silent() -> Self {
        Self::new(0.0)
    }

    pub fn value(&self) -> f32 {
        self.gain.value()
    }

    /// Cancel any scheduled ramp, then ramp from `from` to `to`.
    pub fn ramp(&mut self, from: RampStart, to: f32, duration_secs: f32, sample_rate: f32) {
        self.gain.ramp(from, to, duration_secs, sample_rate);
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        // Slice temp buffer to match output size (RT-safe, no allocation)
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let frames = &mut self.temp_buffer[..chunk.len()];
            self.gain.render(frames);
            multiply_in_place(chunk, frames);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_signal_by_held_gain() {
        let mut node = GainNode::new(0.5);
        let mut buf = [1.0, -1.0, 0.5];
        node.render_block(&mut buf, &RenderCtx::new(48_000.0, 0.0));
        assert_eq!(buf, [0.5, -0.5, 0.25]);
    }

    #[test]
    fn silent_node_fades_in_without_a_step() {
        let mut node = GainNode::silent();
        assert_eq!(node.value(), 0.0);

        node.ramp(RampStart::Value(0.0), 0.15, 0.01, 1_000.0);

        let mut buf = [1.0f32; 12];
        node.render_block(&mut buf, &RenderCtx::new(1_000.0, 0.0));
        assert_eq!(buf[0], 0.0);
        assert!(buf.windows(2).all(|w| w[1] - w[0] <= 0.0151));
        assert_eq!(node.value(), 0.15);
    }
}
