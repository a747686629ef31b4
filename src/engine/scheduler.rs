use crate::synth::VoiceId;

#[derive(Debug, Clone, Copy)]
struct PendingRelease {
    id: VoiceId,
    due: f64,
}

/// Deferred oscillator releases, keyed by voice id and due on the audio clock.
///
/// A removed voice fades out first; its oscillator is only stopped once the
/// fade has had time to finish. Scheduling an id that is already pending is a
/// no-op, so a repeated remove cannot double-release.
#[derive(Debug, Default)]
pub struct ReleaseScheduler {
    pending: Vec<PendingRelease>,
}

impl ReleaseScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `id` for release at `due` seconds. Returns `false` if it was
    /// already pending.
    pub fn schedule(&mut self, id: VoiceId, due: f64) -> bool {
        if self.is_pending(id) {
            return false;
        }
        self.pending.push(PendingRelease { id, due });
        true
    }

    pub fn is_pending(&self, id: VoiceId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every release due at or before `now`, oldest first.
    pub fn take_due(&mut self, now: f64) -> Vec<VoiceId> {
        let mut due: Vec<PendingRelease> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due.into_iter().map(|p| p.id).collect()
    }

    /// Remove and return everything, due or not.
    pub fn drain(&mut self) -> Vec<VoiceId> {
        self.pending.drain(..).map(|p| p.id).collect()
    }
}
