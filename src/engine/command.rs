use crate::synth::VoiceId;

/// Events a front end sends to the engine.
///
/// One variant per UI gesture; the engine fills in its own base frequency
/// where an operation needs it.
#[derive(Debug, Clone, PartialEq)]
pub enum EnsembleCommand {
    /// A ratio was picked, in `"n/d"` form.
    SelectRatio(String),
    RemoveVoice(VoiceId),
    EditRatio {
        id: VoiceId,
        numerator: u32,
        denominator: u32,
    },
    Play,
    Pause,
    SetBaseFrequency(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(VoiceId),
    Applied,
}
