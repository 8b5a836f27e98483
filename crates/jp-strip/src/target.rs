//! Winner target locator

use serde::Serialize;

use crate::error::{StripError, StripResult};
use crate::tiles::Tile;

/// Default minimum spin distance, in tile widths
pub const DEFAULT_MIN_SPIN_TILES: usize = 300;
/// Largest accepted minimum spin distance, in tile widths
pub const MAX_MIN_SPIN_TILES: usize = 5_000;

/// Where the spin should come to rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetLocation {
    /// Position of the chosen tile in the strip
    pub position: usize,
    /// Tiles the winner owns
    pub occurrences: usize,
    /// The strip is too short on its own: offset geometry adds whole laps
    pub needs_laps: bool,
}

/// Every strip position owned by `winner_index`
pub fn winner_positions(tiles: &[Tile], winner_index: usize) -> Vec<usize> {
    tiles
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.original_index == winner_index)
        .map(|(pos, _)| pos)
        .collect()
}

/// Pick the tile the spin lands on.
///
/// Prefers the first winner-owned tile lying beyond `min_spin_tiles`;
/// otherwise takes the last winner-owned tile and flags that laps are
/// needed. Fails when the winner owns no tile at all.
pub fn locate_target(
    tiles: &[Tile],
    winner_index: usize,
    min_spin_tiles: usize,
) -> StripResult<TargetLocation> {
    let positions = winner_positions(tiles, winner_index);

    let Some(&last) = positions.last() else {
        return Err(StripError::WinnerNotInStrip {
            winner_index,
            tile_count: tiles.len(),
        });
    };

    let location = match positions.iter().find(|&&pos| pos > min_spin_tiles) {
        Some(&position) => TargetLocation {
            position,
            occurrences: positions.len(),
            needs_laps: false,
        },
        None => TargetLocation {
            position: last,
            occurrences: positions.len(),
            needs_laps: true,
        },
    };

    Ok(location)
}
