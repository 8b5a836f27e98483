//! Single-entry tile memo
//!
//! Re-renders ask for the strip many times per round. Only the most recent
//! key is kept: a new round or a changed participant list replaces it.

use std::sync::Arc;

use jp_core::Participant;

use crate::tiles::{Tile, build_tiles, cache_key};

#[derive(Debug, Default)]
pub struct TileCache {
    entry: Option<(String, Arc<[Tile]>)>,
    hits: u64,
    misses: u64,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached strip for these inputs, building it on a miss
    pub fn get_or_build(&mut self, participants: &[Participant], round_id: Option<&str>) -> Arc<[Tile]> {
        let key = cache_key(participants, round_id);
        if let Some((cached_key, tiles)) = &self.entry {
            if *cached_key == key {
                self.hits += 1;
                return Arc::clone(tiles);
            }
        }

        self.misses += 1;
        let tiles: Arc<[Tile]> = build_tiles(participants, round_id).into();
        log::debug!("Tile cache miss for {} ({} tiles)", key, tiles.len());
        self.entry = Some((key, Arc::clone(&tiles)));
        tiles
    }

    /// Drop the cached entry
    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
