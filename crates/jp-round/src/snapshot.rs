//! Frozen round snapshot
//!
//! Taken at the completion edge. The strip, the target and the reveal all
//! read from this copy, so later polls cannot change what is on screen.

use serde::Serialize;

use jp_core::{JackpotStatus, Participant, total_stake};

use crate::error::{VisualizerError, VisualizerResult};
use crate::state::round_key;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrozenRound {
    /// Jackpot id, if the authority sent one
    pub jackpot_id: Option<String>,
    /// Round identity used for logging and deduplication
    pub round_key: String,
    pub participants: Vec<Participant>,
    /// Authoritative index into `participants`
    pub winner_index: usize,
    pub total_pot: f64,
}

impl FrozenRound {
    /// Freeze a completed round, checking that the winner index and the
    /// reported winner agree.
    pub fn capture(status: &JackpotStatus) -> VisualizerResult<Self> {
        let round_key = round_key(status);

        let Some(winner_index) = status.winner_index else {
            return Err(VisualizerError::MissingWinnerIndex { round: round_key });
        };

        let Some(indexed) = status.participants.get(winner_index) else {
            return Err(VisualizerError::WinnerOutOfRange {
                winner_index,
                participant_count: status.participants.len(),
            });
        };

        if let Some(winner) = &status.winner {
            if winner.user_id != indexed.user_id {
                return Err(VisualizerError::WinnerMismatch {
                    winner_index,
                    expected: winner.user_id.clone(),
                    found: indexed.user_id.clone(),
                });
            }
        }

        Ok(Self {
            jackpot_id: status.jackpot_id.clone().filter(|id| !id.is_empty()),
            round_key,
            participants: status.participants.clone(),
            winner_index,
            total_pot: total_stake(&status.participants),
        })
    }

    pub fn winner(&self) -> Option<&Participant> {
        self.participants.get(self.winner_index)
    }

    /// Id the tile shuffle is seeded from
    pub fn seed_id(&self) -> Option<&str> {
        self.jackpot_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jp_core::RoundState;

    fn complete(winner_index: Option<usize>, winner: Option<&str>) -> JackpotStatus {
        let participants = vec![
            Participant::new("u1", "alice", 1.0),
            Participant::new("u2", "bob", 1.0),
            Participant::new("u3", "carol", 8.0),
        ];
        let winner = winner.and_then(|id| participants.iter().find(|p| p.user_id == id).cloned());
        JackpotStatus {
            state: RoundState::Complete,
            total_pot: 10.0,
            participants,
            winner,
            winner_index,
            jackpot_id: Some("jp_1".into()),
            ..JackpotStatus::idle()
        }
    }

    #[test]
    fn test_capture() {
        let frozen = FrozenRound::capture(&complete(Some(2), Some("u3"))).unwrap();
        assert_eq!(frozen.winner().unwrap().username, "carol");
        assert_eq!(frozen.seed_id(), Some("jp_1"));
        assert_eq!(frozen.round_key, "jp_1");
        assert_eq!(frozen.total_pot, 10.0);
    }

    #[test]
    fn test_capture_without_reported_winner() {
        let frozen = FrozenRound::capture(&complete(Some(0), None)).unwrap();
        assert_eq!(frozen.winner_index, 0);
    }

    #[test]
    fn test_missing_index() {
        let err = FrozenRound::capture(&complete(None, Some("u3"))).unwrap_err();
        assert!(matches!(err, VisualizerError::MissingWinnerIndex { .. }));
        assert!(!err.is_desync());
    }

    #[test]
    fn test_out_of_range() {
        let err = FrozenRound::capture(&complete(Some(3), None)).unwrap_err();
        assert_eq!(
            err,
            VisualizerError::WinnerOutOfRange {
                winner_index: 3,
                participant_count: 3
            }
        );
        assert!(err.is_desync());
    }

    #[test]
    fn test_mismatch() {
        let err = FrozenRound::capture(&complete(Some(0), Some("u3"))).unwrap_err();
        assert!(matches!(err, VisualizerError::WinnerMismatch { .. }));
        assert!(err.is_desync());
    }

    #[test]
    fn test_empty_id_is_dropped() {
        let mut status = complete(Some(2), None);
        status.jackpot_id = Some(String::new());
        let frozen = FrozenRound::capture(&status).unwrap();
        assert_eq!(frozen.seed_id(), None);
        assert_eq!(frozen.round_key, "u1:1|u2:1|u3:8");
    }
}
