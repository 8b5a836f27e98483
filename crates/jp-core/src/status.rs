//! Round status payload
//!
//! The round authority is polled periodically and answers with a
//! [`JackpotStatus`]. The visualizer treats it as read-only truth.

use serde::{Deserialize, Serialize};

use crate::participant::{Participant, total_stake};

/// Hard cap on players per round
pub const MAX_PARTICIPANTS: usize = 50;
/// Players required before the countdown starts
pub const MIN_PARTICIPANTS: usize = 2;
/// How long a single player waits for an opponent before refund (s)
pub const WAITING_WINDOW_SECS: u64 = 600;
/// Countdown once enough players joined (s)
pub const ACTIVE_COUNTDOWN_SECS: u64 = 30;
/// Server keeps a completed round visible this long before resetting (s)
pub const COMPLETE_RESET_SECS: u64 = 10;

/// Round lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundState {
    /// No participants
    #[default]
    Idle,
    /// One participant, waiting for a second
    Waiting,
    /// Countdown running
    Active,
    /// Authority is drawing the winner
    Spinning,
    /// Winner published
    Complete,
}

impl RoundState {
    pub fn name(&self) -> &'static str {
        match self {
            RoundState::Idle => "idle",
            RoundState::Waiting => "waiting",
            RoundState::Active => "active",
            RoundState::Spinning => "spinning",
            RoundState::Complete => "complete",
        }
    }

    /// Legal lifecycle edges. Staying in the same state is always legal.
    pub fn can_transition_to(&self, next: RoundState) -> bool {
        use RoundState::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Idle, Waiting)
                | (Waiting, Active)
                // refund after the waiting window expires
                | (Waiting, Idle)
                | (Active, Spinning)
                | (Spinning, Complete)
                | (Complete, Idle)
        )
    }

    /// Does the authority still accept joins in this state?
    pub fn accepts_joins(&self) -> bool {
        matches!(self, RoundState::Idle | RoundState::Waiting | RoundState::Active)
    }
}

/// Polled status of the current round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JackpotStatus {
    pub state: RoundState,
    pub total_pot: f64,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub countdown_seconds: Option<u64>,
    #[serde(default)]
    pub winner: Option<Participant>,
    /// Authoritative index of the winner in `participants`
    #[serde(default)]
    pub winner_index: Option<usize>,
    #[serde(default)]
    pub jackpot_id: Option<String>,
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,
    #[serde(default)]
    pub is_full: bool,
}

fn default_max_participants() -> usize {
    MAX_PARTICIPANTS
}

impl Default for JackpotStatus {
    fn default() -> Self {
        Self::idle()
    }
}

/// Payload inconsistencies worth logging. None of them stop the visualizer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsistencyIssue {
    #[error("total_pot {reported} does not match stake sum {computed}")]
    PotMismatch { reported: f64, computed: f64 },

    #[error("{count} participants exceed the cap of {max}")]
    OverCapacity { count: usize, max: usize },

    #[error("is_full={reported} but {count}/{max} participants")]
    FullFlagMismatch {
        reported: bool,
        count: usize,
        max: usize,
    },

    #[error("duplicate participant {0}")]
    DuplicateParticipant(String),

    #[error("participant {0} has a non-positive stake")]
    InvalidStake(String),
}

impl JackpotStatus {
    /// Empty idle round
    pub fn idle() -> Self {
        Self {
            state: RoundState::Idle,
            total_pot: 0.0,
            participants: Vec::new(),
            countdown_seconds: None,
            winner: None,
            winner_index: None,
            jackpot_id: None,
            max_participants: MAX_PARTICIPANTS,
            is_full: false,
        }
    }

    /// Parse a payload from JSON
    pub fn from_json(json: &str) -> crate::JpResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_complete(&self) -> bool {
        self.state == RoundState::Complete
    }

    /// Collect inconsistencies between reported and derivable fields
    pub fn consistency_issues(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();

        let computed = total_stake(&self.participants);
        if (computed - self.total_pot).abs() > 0.005 {
            issues.push(ConsistencyIssue::PotMismatch {
                reported: self.total_pot,
                computed,
            });
        }

        let count = self.participants.len();
        if count > self.max_participants {
            issues.push(ConsistencyIssue::OverCapacity {
                count,
                max: self.max_participants,
            });
        }
        if self.is_full != (count >= self.max_participants) {
            issues.push(ConsistencyIssue::FullFlagMismatch {
                reported: self.is_full,
                count,
                max: self.max_participants,
            });
        }

        for (i, p) in self.participants.iter().enumerate() {
            if self.participants[..i].iter().any(|q| q.user_id == p.user_id) {
                issues.push(ConsistencyIssue::DuplicateParticipant(p.user_id.clone()));
            }
            if !p.has_valid_stake() {
                issues.push(ConsistencyIssue::InvalidStake(p.user_id.clone()));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE_JSON: &str = r#"{
        "state": "complete",
        "total_pot": 10.0,
        "participants": [
            {"user_id": "u1", "username": "alice", "bet_amount": 1.0, "win_chance": 10.0},
            {"user_id": "u2", "username": "bob", "bet_amount": 1.0, "win_chance": 10.0, "avatar": "a.png"},
            {"user_id": "u3", "username": "carol", "bet_amount": 8.0, "win_chance": 80.0, "jackpot_pattern": "pattern_flames"}
        ],
        "countdown_seconds": 0,
        "winner": {"user_id": "u3", "username": "carol", "bet_amount": 8.0, "win_chance": 80.0},
        "winner_index": 2,
        "jackpot_id": "jp_abc123",
        "max_participants": 50,
        "is_full": false
    }"#;

    #[test]
    fn test_parse_complete_payload() {
        let status = JackpotStatus::from_json(COMPLETE_JSON).unwrap();
        assert_eq!(status.state, RoundState::Complete);
        assert_eq!(status.participants.len(), 3);
        assert_eq!(status.winner_index, Some(2));
        assert_eq!(status.jackpot_id.as_deref(), Some("jp_abc123"));
        assert_eq!(
            status.participants[2].jackpot_pattern.as_deref(),
            Some("pattern_flames")
        );
        assert!(status.consistency_issues().is_empty());
    }

    #[test]
    fn test_parse_minimal_idle() {
        let status = JackpotStatus::from_json(r#"{"state": "idle", "total_pot": 0.0}"#).unwrap();
        assert_eq!(status, JackpotStatus::idle());
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&RoundState::Spinning).unwrap();
        assert_eq!(json, "\"spinning\"");
    }

    #[test]
    fn test_transitions() {
        use RoundState::*;
        assert!(Idle.can_transition_to(Waiting));
        assert!(Waiting.can_transition_to(Active));
        assert!(Waiting.can_transition_to(Idle));
        assert!(Active.can_transition_to(Spinning));
        assert!(Spinning.can_transition_to(Complete));
        assert!(Complete.can_transition_to(Idle));
        assert!(Complete.can_transition_to(Complete));

        assert!(!Idle.can_transition_to(Complete));
        assert!(!Active.can_transition_to(Complete));
        assert!(!Complete.can_transition_to(Active));
    }

    #[test]
    fn test_consistency_issues() {
        let mut status = JackpotStatus::from_json(COMPLETE_JSON).unwrap();
        status.total_pot = 12.0;
        status.is_full = true;
        status.participants.push(status.participants[0].clone());

        let issues = status.consistency_issues();
        assert!(issues
            .iter()
            .any(|i| matches!(i, ConsistencyIssue::PotMismatch { .. })));
        assert!(issues
            .iter()
            .any(|i| matches!(i, ConsistencyIssue::FullFlagMismatch { .. })));
        assert!(issues
            .iter()
            .any(|i| matches!(i, ConsistencyIssue::DuplicateParticipant(id) if id == "u1")));
    }

    #[test]
    fn test_accepts_joins() {
        assert!(RoundState::Active.accepts_joins());
        assert!(!RoundState::Spinning.accepts_joins());
        assert!(!RoundState::Complete.accepts_joins());
    }
}
