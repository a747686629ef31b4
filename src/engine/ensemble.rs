use crate::{ratio::Ratio, synth::VoiceId};

/// Play/pause state of the whole ensemble.
///
/// One enum instead of two flags, so playing and paused cannot both hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Never played.
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Control-side record of a voice. The audio handles live in the mixer,
/// addressed by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveVoice {
    pub id: VoiceId,
    pub ratio: Ratio,
}

/// Active voices in insertion (display) order plus transport state.
#[derive(Debug, Default)]
pub struct Ensemble {
    transport: Transport,
    voices: Vec<ActiveVoice>,
}

impl Ensemble {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub(crate) fn set_transport(&mut self, transport: Transport) {
        self.transport = transport;
    }

    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.transport == Transport::Paused
    }

    pub fn voices(&self) -> &[ActiveVoice] {
        &self.voices
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn get(&self, id: VoiceId) -> Option<&ActiveVoice> {
        self.voices.iter().find(|v| v.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: VoiceId) -> Option<&mut ActiveVoice> {
        self.voices.iter_mut().find(|v| v.id == id)
    }

    pub(crate) fn push(&mut self, voice: ActiveVoice) {
        debug_assert!(self.get(voice.id).is_none(), "duplicate voice id {}", voice.id);
        self.voices.push(voice);
    }

    /// Remove preserving the order of the rest.
    pub(crate) fn remove(&mut self, id: VoiceId) -> Option<ActiveVoice> {
        let index = self.voices.iter().position(|v| v.id == id)?;
        Some(self.voices.remove(index))
    }

    pub fn ratios(&self) -> Vec<Ratio> {
        self.voices.iter().map(|v| v.ratio).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(raw: u64, n: u32, d: u32) -> ActiveVoice {
        ActiveVoice {
            id: VoiceId::from_raw(raw),
            ratio: Ratio::new(n, d).unwrap(),
        }
    }

    #[test]
    fn removal_keeps_display_order() {
        let mut ensemble = Ensemble::new();
        ensemble.push(voice(1, 1, 1));
        ensemble.push(voice(2, 3, 2));
        ensemble.push(voice(3, 5, 4));

        let removed = ensemble.remove(VoiceId::from_raw(2)).unwrap();
        assert_eq!(removed.ratio.to_string(), "3/2");
        assert_eq!(
            ensemble.ratios(),
            vec![Ratio::new(1, 1).unwrap(), Ratio::new(5, 4).unwrap()]
        );
        assert!(ensemble.remove(VoiceId::from_raw(2)).is_none());
    }

    #[test]
    fn transport_flags_are_exclusive() {
        let mut ensemble = Ensemble::new();
        assert!(!ensemble.is_playing() && !ensemble.is_paused());
        ensemble.set_transport(Transport::Playing);
        assert!(ensemble.is_playing() && !ensemble.is_paused());
        ensemble.set_transport(Transport::Paused);
        assert!(!ensemble.is_playing() && ensemble.is_paused());
    }
}
