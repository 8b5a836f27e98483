//! Weighted tile builder
//!
//! Each participant gets a number of tiles proportional to their share of
//! the pot, at least one. The combined list is shuffled with a seed derived
//! from the round id.

use serde::Serialize;

use jp_core::{Participant, total_stake};

use crate::rng::{seed_from, shuffle};

/// Tiles a participant holding the whole pot would own
pub const TOTAL_TILES: usize = 100;

/// One cell of the strip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    /// Owner
    pub user_id: String,
    /// Owner's position in the participant list. This is what "the winner"
    /// refers to, not the tile's own position.
    pub original_index: usize,
    /// Stable render key, unique within the strip
    pub key: String,
}

/// Tiles owed to a participant with win chance `chance` (0..=1)
#[inline]
pub fn tile_count(chance: f64) -> usize {
    let raw = (chance * TOTAL_TILES as f64).round();
    if raw.is_finite() && raw >= 1.0 {
        raw as usize
    } else {
        1
    }
}

/// `user_id:bet_amount` pairs in list order, joined with `|`
pub fn participants_key(participants: &[Participant]) -> String {
    participants
        .iter()
        .map(|p| format!("{}:{}", p.user_id, p.bet_amount))
        .collect::<Vec<_>>()
        .join("|")
}

/// Memoization key for a strip
pub fn cache_key(participants: &[Participant], round_id: Option<&str>) -> String {
    format!("{}@{}", participants_key(participants), round_id.unwrap_or(""))
}

/// Text the shuffle seed is derived from: the round id, or the participant
/// key when no id is known.
pub fn seed_text(participants: &[Participant], round_id: Option<&str>) -> String {
    match round_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => participants_key(participants),
    }
}

/// Build the shuffled tile list for a round.
///
/// Returns an empty list when there is nothing to weight (no participants
/// or a non-positive pot). Callers treat that as "cannot animate".
pub fn build_tiles(participants: &[Participant], round_id: Option<&str>) -> Vec<Tile> {
    let total_pot = total_stake(participants);
    if participants.is_empty() || !total_pot.is_finite() || total_pot <= 0.0 {
        return Vec::new();
    }

    let mut tiles = Vec::with_capacity(TOTAL_TILES + participants.len());
    for (original_index, participant) in participants.iter().enumerate() {
        let count = tile_count(participant.share_of(total_pot));
        for n in 0..count {
            tiles.push(Tile {
                user_id: participant.user_id.clone(),
                original_index,
                key: format!("{}-{}", participant.user_id, n),
            });
        }
    }

    let seed = seed_from(&seed_text(participants, round_id));
    shuffle(&mut tiles, seed);

    log::debug!(
        "Built {} tiles for {} participants (seed {})",
        tiles.len(),
        participants.len(),
        seed
    );

    tiles
}

/// Tiles per participant index
pub fn tile_counts(tiles: &[Tile], participant_count: usize) -> Vec<usize> {
    let mut counts = vec![0; participant_count];
    for tile in tiles {
        if let Some(count) = counts.get_mut(tile.original_index) {
            *count += 1;
        }
    }
    counts
}
