// Purpose: audio-thread voice management
// This layer sits above graph nodes: it receives control messages and mixes voices

pub mod clock;
pub mod message;
pub mod mixer;
pub mod voice;

pub use clock::AudioClock;
pub use message::{MessageReceiver, VoiceId, VoiceMessage};
pub use mixer::VoiceMixer;
pub use voice::{Voice, VoiceState};
