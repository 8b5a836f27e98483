//! Poll sequences for simulated rounds

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use jp_core::{
    ACTIVE_COUNTDOWN_SECS, COMPLETE_RESET_SECS, JackpotStatus, MAX_PARTICIPANTS,
    MIN_PARTICIPANTS, Participant, RoundState, WAITING_WINDOW_SECS, refresh_win_chances,
    total_stake,
};

/// Stake range for random rounds
const MAX_RANDOM_BET: f64 = 50.0;
const MIN_RANDOM_BET: f64 = 0.5;

/// One poll result per tick, in order
#[derive(Debug, Clone)]
pub struct Scenario {
    pub round_id: String,
    pub polls: Vec<JackpotStatus>,
}

fn participants(bets: &[f64]) -> Vec<Participant> {
    bets.iter()
        .enumerate()
        .map(|(i, &bet)| Participant::new(format!("user_{i}"), format!("player{}", i + 1), bet))
        .collect()
}

fn snapshot(
    state: RoundState,
    round_id: &str,
    mut players: Vec<Participant>,
    countdown: Option<u64>,
) -> JackpotStatus {
    refresh_win_chances(&mut players);
    JackpotStatus {
        state,
        total_pot: total_stake(&players),
        is_full: players.len() >= MAX_PARTICIPANTS,
        participants: players,
        countdown_seconds: countdown,
        jackpot_id: Some(round_id.to_string()),
        ..JackpotStatus::idle()
    }
}

/// Polls that land inside the authority's completed-round hold
fn complete_polls(poll_interval_ms: f64) -> usize {
    let hold_ms = COMPLETE_RESET_SECS as f64 * 1000.0;
    if poll_interval_ms.is_finite() && poll_interval_ms > 0.0 {
        ((hold_ms / poll_interval_ms).ceil() as usize).max(1)
    } else {
        1
    }
}

/// idle → waiting → active → spinning → complete, with one join per poll.
/// The completed round repeats for as many polls as the authority holds it.
pub fn demo(
    bets: &[f64],
    winner: usize,
    round_id: &str,
    poll_interval_ms: f64,
) -> Result<Scenario> {
    ensure!(!bets.is_empty(), "at least one bet is required");
    ensure!(
        bets.len() <= MAX_PARTICIPANTS,
        "{} bets exceed the {} player cap",
        bets.len(),
        MAX_PARTICIPANTS
    );
    if winner >= bets.len() {
        bail!("winner index {} out of range for {} bets", winner, bets.len());
    }

    let players = participants(bets);
    let mut polls = vec![JackpotStatus::idle()];

    for joined in 1..=players.len() {
        let (state, countdown) = if joined < MIN_PARTICIPANTS {
            (RoundState::Waiting, Some(WAITING_WINDOW_SECS))
        } else {
            (RoundState::Active, Some(ACTIVE_COUNTDOWN_SECS))
        };
        polls.push(snapshot(state, round_id, players[..joined].to_vec(), countdown));
    }

    polls.push(snapshot(RoundState::Spinning, round_id, players.clone(), Some(0)));

    let mut complete = snapshot(RoundState::Complete, round_id, players, Some(0));
    complete.winner = complete.participants.get(winner).cloned();
    complete.winner_index = Some(winner);
    polls.extend(std::iter::repeat_n(complete, complete_polls(poll_interval_ms)));
    polls.push(JackpotStatus::idle());

    Ok(Scenario {
        round_id: round_id.to_string(),
        polls,
    })
}

/// Random stakes and a stake-weighted winner, reproducible from `seed`
pub fn random(players: usize, seed: u64, poll_interval_ms: f64) -> Result<Scenario> {
    ensure!(
        (1..=MAX_PARTICIPANTS).contains(&players),
        "player count must be 1..={}",
        MAX_PARTICIPANTS
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let bets: Vec<f64> = (0..players)
        .map(|_| (rng.random_range(MIN_RANDOM_BET..MAX_RANDOM_BET) * 100.0).round() / 100.0)
        .collect();

    let winner = weighted_pick(&bets, rng.random_range(0.0..1.0));

    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    let id = uuid::Builder::from_random_bytes(bytes).into_uuid().simple().to_string();
    let round_id = format!("jp_{}", &id[..12]);

    log::debug!("Random round {}: bets {:?}, winner {}", round_id, bets, winner);
    demo(&bets, winner, &round_id, poll_interval_ms)
}

/// Index whose cumulative stake share first exceeds `roll` (0..1)
fn weighted_pick(bets: &[f64], roll: f64) -> usize {
    let total: f64 = bets.iter().sum();
    let mut cumulative = 0.0;
    for (i, bet) in bets.iter().enumerate() {
        cumulative += bet / total;
        if roll < cumulative {
            return i;
        }
    }
    bets.len().saturating_sub(1)
}

/// Read a JSON array of status payloads
pub fn load_replay(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let polls: Vec<JackpotStatus> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let round_id = polls
        .iter()
        .rev()
        .find_map(|p| p.jackpot_id.clone())
        .unwrap_or_else(|| "replay".to_string());

    Ok(Scenario { round_id, polls })
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLL_MS: f64 = 2_000.0;

    #[test]
    fn test_demo_sequence() {
        let scenario = demo(&[1.0, 1.0, 8.0], 2, "roundA", POLL_MS).unwrap();
        let states: Vec<RoundState> = scenario.polls.iter().map(|p| p.state).collect();
        assert_eq!(
            states,
            vec![
                RoundState::Idle,
                RoundState::Waiting,
                RoundState::Active,
                RoundState::Active,
                RoundState::Spinning,
                RoundState::Complete,
                RoundState::Complete,
                RoundState::Complete,
                RoundState::Complete,
                RoundState::Complete,
                RoundState::Idle,
            ]
        );
        for pair in states.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]));
        }
        assert_eq!(scenario.polls[1].countdown_seconds, Some(WAITING_WINDOW_SECS));
        assert_eq!(scenario.polls[2].countdown_seconds, Some(ACTIVE_COUNTDOWN_SECS));

        // players only ever join while the round is open
        for pair in scenario.polls.windows(2) {
            if pair[1].participants.len() > pair[0].participants.len() {
                assert!(pair[1].state.accepts_joins());
            }
        }

        let complete = &scenario.polls[5];
        assert_eq!(complete.winner_index, Some(2));
        assert_eq!(complete.winner.as_ref().map(|w| w.user_id.as_str()), Some("user_2"));
        assert_eq!(complete.total_pot, 10.0);
        assert_eq!(complete.participants[2].win_chance, 80.0);
        assert!(complete.consistency_issues().is_empty());
    }

    #[test]
    fn test_complete_hold_follows_poll_interval() {
        assert_eq!(complete_polls(2_000.0), 5);
        assert_eq!(complete_polls(3_000.0), 4);
        assert_eq!(complete_polls(60_000.0), 1);
        assert_eq!(complete_polls(0.0), 1);

        let turbo = demo(&[1.0, 2.0], 0, "r", 1_000.0).unwrap();
        let held = turbo.polls.iter().filter(|p| p.is_complete()).count();
        assert_eq!(held, 10);
    }

    #[test]
    fn test_demo_rejects_bad_winner() {
        assert!(demo(&[1.0, 2.0], 2, "r", POLL_MS).is_err());
        assert!(demo(&[], 0, "r", POLL_MS).is_err());
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = random(6, 7, POLL_MS).unwrap();
        let b = random(6, 7, POLL_MS).unwrap();
        assert_eq!(a.round_id, b.round_id);
        assert_eq!(a.polls, b.polls);
        assert!(a.round_id.starts_with("jp_"));
        assert_eq!(a.round_id.len(), 15);

        let c = random(6, 8, POLL_MS).unwrap();
        assert_ne!(a.round_id, c.round_id);
    }

    #[test]
    fn test_random_player_bounds() {
        assert!(random(0, 1, POLL_MS).is_err());
        assert!(random(MAX_PARTICIPANTS + 1, 1, POLL_MS).is_err());
        assert!(random(MAX_PARTICIPANTS, 1, POLL_MS).is_ok());
    }

    #[test]
    fn test_weighted_pick() {
        let bets = [1.0, 1.0, 8.0];
        assert_eq!(weighted_pick(&bets, 0.0), 0);
        assert_eq!(weighted_pick(&bets, 0.15), 1);
        assert_eq!(weighted_pick(&bets, 0.5), 2);
        assert_eq!(weighted_pick(&bets, 0.999_999), 2);
    }

    #[test]
    fn test_replay_file() {
        let scenario = demo(&[2.0, 3.0], 0, "jp_file", POLL_MS).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polls.json");
        fs::write(&path, serde_json::to_string(&scenario.polls).unwrap()).unwrap();

        let replay = load_replay(&path).unwrap();
        assert_eq!(replay.round_id, "jp_file");
        assert_eq!(replay.polls, scenario.polls);
    }
}
