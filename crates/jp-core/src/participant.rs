//! Jackpot participants

use serde::{Deserialize, Serialize};

/// One entry in a jackpot round, as reported by the round authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique within a round
    pub user_id: String,
    pub username: String,
    /// Stake placed into the pot
    pub bet_amount: f64,
    /// Reported win chance in percent, rounded to 2 decimals by the server.
    /// Display only; the visualizer derives exact shares from the stakes.
    #[serde(default)]
    pub win_chance: f64,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Owned cosmetic pattern id, if any
    #[serde(default)]
    pub jackpot_pattern: Option<String>,
}

impl Participant {
    /// Create a participant without avatar or pattern
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, bet_amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            bet_amount,
            win_chance: 0.0,
            avatar: None,
            jackpot_pattern: None,
        }
    }

    /// Attach an owned pattern
    pub fn with_pattern(mut self, pattern_id: impl Into<String>) -> Self {
        self.jackpot_pattern = Some(pattern_id.into());
        self
    }

    /// Fraction of `total_pot` this stake represents (0.0 when the pot is empty)
    #[inline]
    pub fn share_of(&self, total_pot: f64) -> f64 {
        if total_pot > 0.0 {
            self.bet_amount / total_pot
        } else {
            0.0
        }
    }

    /// Stake usable for weighting (finite and positive)
    #[inline]
    pub fn has_valid_stake(&self) -> bool {
        self.bet_amount.is_finite() && self.bet_amount > 0.0
    }
}

/// Sum of all stakes
pub fn total_stake(participants: &[Participant]) -> f64 {
    participants.iter().map(|p| p.bet_amount).sum()
}

/// Recompute `win_chance` (percent, 2 decimals) from stakes, the way the
/// round authority reports it.
pub fn refresh_win_chances(participants: &mut [Participant]) {
    let total = total_stake(participants);
    for p in participants.iter_mut() {
        p.win_chance = if total > 0.0 {
            (p.bet_amount / total * 10_000.0).round() / 100.0
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_share_of() {
        let p = Participant::new("u1", "alice", 2.5);
        assert_abs_diff_eq!(p.share_of(10.0), 0.25);
        assert_eq!(p.share_of(0.0), 0.0);
    }

    #[test]
    fn test_shares_sum_to_one() {
        let participants = vec![
            Participant::new("a", "a", 1.0),
            Participant::new("b", "b", 1.0),
            Participant::new("c", "c", 8.0),
        ];
        let total = total_stake(&participants);
        let sum: f64 = participants.iter().map(|p| p.share_of(total)).sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_refresh_win_chances() {
        let mut participants = vec![
            Participant::new("a", "a", 1.0),
            Participant::new("b", "b", 2.0),
        ];
        refresh_win_chances(&mut participants);
        assert_abs_diff_eq!(participants[0].win_chance, 33.33);
        assert_abs_diff_eq!(participants[1].win_chance, 66.67);
    }

    #[test]
    fn test_valid_stake() {
        assert!(Participant::new("a", "a", 0.01).has_valid_stake());
        assert!(!Participant::new("a", "a", 0.0).has_valid_stake());
        assert!(!Participant::new("a", "a", f64::NAN).has_valid_stake());
    }
}
