//! Round completion edge detector
//!
//! Polling observes the round state at discrete ticks and may skip
//! intermediate states. The watcher compares each observation with the
//! previous one and fires exactly once per round when it enters `complete`.

use jp_core::{JackpotStatus, RoundState};
use jp_strip::participants_key;

/// Identity of a round: its jackpot id, or the participant key when the
/// authority sent none.
pub fn round_key(status: &JackpotStatus) -> String {
    match status.jackpot_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => participants_key(&status.participants),
    }
}

#[derive(Debug, Default)]
pub struct RoundWatcher {
    previous: Option<RoundState>,
    last_fired: Option<String>,
}

impl RoundWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation. Returns `true` on the edge into `complete`.
    ///
    /// A second `complete` for the same round is ignored. A `complete` for a
    /// different round fires even without an intervening state.
    pub fn observe(&mut self, status: &JackpotStatus) -> bool {
        let state = status.state;

        if let Some(previous) = self.previous {
            if !previous.can_transition_to(state) {
                log::debug!(
                    "Skipped states between polls: {} -> {}",
                    previous.name(),
                    state.name()
                );
            }
        }

        let previous = self.previous.replace(state);
        if state != RoundState::Complete {
            return false;
        }

        let key = round_key(status);
        let entered = previous != Some(RoundState::Complete);
        let new_round = self.last_fired.as_deref() != Some(key.as_str());

        if entered || new_round {
            self.last_fired = Some(key);
            true
        } else {
            log::debug!("Round {} already complete, ignoring", key);
            false
        }
    }

    /// Last observed state
    pub fn previous(&self) -> Option<RoundState> {
        self.previous
    }

    /// Key of the last round that fired
    pub fn last_fired(&self) -> Option<&str> {
        self.last_fired.as_deref()
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.last_fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jp_core::Participant;

    fn status(state: RoundState, id: Option<&str>) -> JackpotStatus {
        JackpotStatus {
            state,
            total_pot: 3.0,
            participants: vec![
                Participant::new("a", "alice", 1.0),
                Participant::new("b", "bob", 2.0),
            ],
            jackpot_id: id.map(String::from),
            ..JackpotStatus::idle()
        }
    }

    #[test]
    fn test_fires_once_per_round() {
        let mut watcher = RoundWatcher::new();
        assert!(!watcher.observe(&status(RoundState::Active, Some("r1"))));
        assert!(!watcher.observe(&status(RoundState::Spinning, Some("r1"))));
        assert!(watcher.observe(&status(RoundState::Complete, Some("r1"))));
        assert!(!watcher.observe(&status(RoundState::Complete, Some("r1"))));
        assert!(!watcher.observe(&status(RoundState::Complete, Some("r1"))));
        assert_eq!(watcher.last_fired(), Some("r1"));
    }

    #[test]
    fn test_first_observation_complete_fires() {
        let mut watcher = RoundWatcher::new();
        assert!(watcher.observe(&status(RoundState::Complete, Some("r1"))));
    }

    #[test]
    fn test_back_to_back_rounds() {
        let mut watcher = RoundWatcher::new();
        assert!(watcher.observe(&status(RoundState::Complete, Some("r1"))));
        // poller missed idle/waiting/active/spinning entirely
        assert!(watcher.observe(&status(RoundState::Complete, Some("r2"))));
    }

    #[test]
    fn test_reentering_complete_fires() {
        let mut watcher = RoundWatcher::new();
        assert!(watcher.observe(&status(RoundState::Complete, None)));
        assert!(!watcher.observe(&status(RoundState::Idle, None)));
        assert!(watcher.observe(&status(RoundState::Complete, None)));
    }

    #[test]
    fn test_round_key_fallback() {
        assert_eq!(round_key(&status(RoundState::Idle, Some("jp_1"))), "jp_1");
        assert_eq!(round_key(&status(RoundState::Idle, None)), "a:1|b:2");
        assert_eq!(round_key(&status(RoundState::Idle, Some(""))), "a:1|b:2");
    }

    #[test]
    fn test_reset() {
        let mut watcher = RoundWatcher::new();
        watcher.observe(&status(RoundState::Complete, Some("r1")));
        watcher.reset();
        assert_eq!(watcher.previous(), None);
        assert!(watcher.observe(&status(RoundState::Complete, Some("r1"))));
    }
}
