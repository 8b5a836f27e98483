//! Jackpot visualizer driver
//!
//! Owns everything stateful about the jackpot view: the round watcher, the
//! tile cache, the poll timer and the spin animator. The host feeds it
//! polled payloads and frame timestamps; it answers with what to draw.
//!
//! The completion edge runs freeze → build → locate → offset → start in one
//! call. Nothing else can interleave with it.

use std::sync::Arc;

use serde::Serialize;

use jp_core::{JackpotPattern, JackpotStatus, Participant, resolve_pattern};
use jp_motion::{AnimationHandle, FrameEvent, SpinAnimator, SpinPhase, SpinPlan, SpinTiming};
use jp_strip::{SafeWindow, TargetLocation, Tile, TileCache, locate_target};

use crate::config::VisualizerConfig;
use crate::error::{VisualizerError, VisualizerResult};
use crate::poll::PollScheduler;
use crate::snapshot::FrozenRound;
use crate::state::RoundWatcher;

/// A tile ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripTile {
    /// Stable render key
    pub key: String,
    pub user_id: String,
    pub username: String,
    /// Owner's index in the participant list
    pub original_index: usize,
    pub pattern: &'static JackpotPattern,
}

/// Attach participant names and resolved patterns to a tile list
pub fn materialize(tiles: &[Tile], participants: &[Participant]) -> Vec<StripTile> {
    tiles
        .iter()
        .filter_map(|tile| {
            let owner = participants.get(tile.original_index)?;
            Some(StripTile {
                key: tile.key.clone(),
                user_id: tile.user_id.clone(),
                username: owner.username.clone(),
                original_index: tile.original_index,
                pattern: resolve_pattern(&owner.user_id, owner.jackpot_pattern.as_deref()),
            })
        })
        .collect()
}

/// Lay `tiles` out over the whole rendered window: leading buffer, every
/// lap of the loop, trailing buffer. Keys carry the copy number so each
/// entry stays unique and stable.
pub fn render_window(tiles: &[StripTile], window: &SafeWindow) -> Vec<StripTile> {
    if tiles.len() != window.tile_count {
        return Vec::new();
    }
    (0..window.rendered_tiles())
        .map(|strip_index| {
            let base = &tiles[window.tile_at(strip_index)];
            StripTile {
                key: format!("{}#{}", base.key, window.copy_at(strip_index)),
                ..base.clone()
            }
        })
        .collect()
}

/// What a started spin is going to do
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinSummary {
    pub round_key: String,
    pub handle: AnimationHandle,
    pub tile_count: usize,
    pub winner_index: usize,
    pub winner_user_id: String,
    pub target: TargetLocation,
    /// Unwrapped scroll distance (px)
    pub distance: f64,
    pub window: SafeWindow,
}

/// One rendered frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualFrame {
    /// Strip translation (px)
    pub offset: f64,
    pub progress: f64,
    pub spinning: bool,
    pub show_winner: bool,
    /// Frozen winner while the banner is up
    pub winner: Option<Participant>,
    pub event: Option<FrameEvent>,
}

#[derive(Debug)]
pub struct JackpotVisualizer {
    config: VisualizerConfig,
    watcher: RoundWatcher,
    poller: PollScheduler,
    animator: SpinAnimator,
    cache: TileCache,
    /// Tiles behind `strip`, to skip re-materializing on cache hits
    tiles: Option<Arc<[Tile]>>,
    strip: Vec<StripTile>,
    /// Layout of the spin on screen and the strip drawn over it
    window: Option<SafeWindow>,
    rendered: Vec<StripTile>,
    frozen: Option<FrozenRound>,
    target: Option<TargetLocation>,
    error: Option<VisualizerError>,
}

impl JackpotVisualizer {
    pub fn new(config: VisualizerConfig) -> VisualizerResult<Self> {
        config
            .validate()
            .map_err(|e| VisualizerError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            poller: PollScheduler::new(config.timing.poll_interval_ms),
            animator: SpinAnimator::new(config.timing.clone()),
            config,
            watcher: RoundWatcher::new(),
            cache: TileCache::new(),
            tiles: None,
            strip: Vec::new(),
            window: None,
            rendered: Vec::new(),
            frozen: None,
            target: None,
            error: None,
        })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Replace spin timing. A spin in flight keeps its old timing.
    pub fn set_timing(&mut self, timing: SpinTiming) {
        self.poller.set_interval_ms(timing.poll_interval_ms);
        self.animator.set_timing(timing.clone());
        self.config.timing = timing;
    }

    /// Measured viewport width; applies to the next spin. Widths the
    /// geometry rejects are ignored.
    pub fn set_container_width(&mut self, width: f64) {
        let mut geometry = self.config.geometry;
        geometry.container_width = width;
        match geometry.validate() {
            Ok(()) => self.config.geometry = geometry,
            Err(e) => log::debug!("Ignoring container width: {}", e),
        }
    }

    /// Feed one polled payload
    ///
    /// Returns the started spin on the edge into `complete`. Errors are also
    /// kept as the visible error state; the round is not animated.
    pub fn on_status(
        &mut self,
        status: &JackpotStatus,
        now_ms: f64,
    ) -> VisualizerResult<Option<SpinSummary>> {
        self.poller.mark_polled(now_ms);

        for issue in status.consistency_issues() {
            log::warn!("Status payload: {}", issue);
        }

        if self.watcher.observe(status) {
            return match self.start_round(status, now_ms) {
                Ok(summary) => Ok(summary),
                Err(e) => {
                    log::error!("Round cannot be animated: {}", e);
                    self.error = Some(e.clone());
                    Err(e)
                }
            };
        }

        if !self.animator.is_busy() && !status.is_complete() {
            if status.participants.is_empty() {
                self.error = None;
            }
            self.refresh_preview(status);
        }

        Ok(None)
    }

    /// freeze → build → locate → offset → start
    fn start_round(
        &mut self,
        status: &JackpotStatus,
        now_ms: f64,
    ) -> VisualizerResult<Option<SpinSummary>> {
        let frozen = FrozenRound::capture(status)?;

        let tiles = self.cache.get_or_build(&frozen.participants, frozen.seed_id());
        if tiles.is_empty() {
            log::info!(
                "Round {} has nothing to weight, skipping spin",
                frozen.round_key
            );
            return Ok(None);
        }

        let settings = &self.config.strip;
        let geometry = self.config.geometry;
        let target = locate_target(&tiles, frozen.winner_index, settings.min_spin_tiles)?;
        let distance =
            geometry.spin_distance(target.position, tiles.len(), settings.min_spin_tiles)?;
        let window = SafeWindow::new(
            &geometry,
            tiles.len(),
            settings.buffer_margin_tiles,
            settings.window_laps,
        )?;

        self.set_strip(&tiles, &frozen.participants);
        self.rendered = render_window(&self.strip, &window);
        self.window = Some(window);

        self.poller.suspend();
        let handle = self.animator.start(
            SpinPlan {
                target_distance: distance,
                window,
            },
            now_ms,
        );

        let winner_user_id = frozen
            .winner()
            .map(|w| w.user_id.clone())
            .unwrap_or_default();

        log::info!(
            "Round {}: {} tiles, winner #{} ({}) at tile {}, offset {:.1}px",
            frozen.round_key,
            tiles.len(),
            frozen.winner_index,
            winner_user_id,
            target.position,
            distance
        );

        let summary = SpinSummary {
            round_key: frozen.round_key.clone(),
            handle,
            tile_count: tiles.len(),
            winner_index: frozen.winner_index,
            winner_user_id,
            target,
            distance,
            window,
        };

        self.frozen = Some(frozen);
        self.target = Some(target);
        self.error = None;
        Ok(Some(summary))
    }

    /// Pre-spin strip, built from the live participant list
    fn refresh_preview(&mut self, status: &JackpotStatus) {
        let tiles = self
            .cache
            .get_or_build(&status.participants, status.jackpot_id.as_deref());
        self.set_strip(&tiles, &status.participants);
    }

    fn set_strip(&mut self, tiles: &Arc<[Tile]>, participants: &[Participant]) {
        if let Some(current) = &self.tiles {
            if Arc::ptr_eq(current, tiles) {
                return;
            }
        }
        self.strip = materialize(tiles, participants);
        self.tiles = Some(Arc::clone(tiles));
    }

    /// Advance the spin to `now_ms`
    pub fn on_frame(&mut self, now_ms: f64) -> VisualFrame {
        let output = self.animator.tick(now_ms);

        if output.event == Some(FrameEvent::RevealFinished) {
            if let Some(frozen) = self.frozen.take() {
                log::info!("Round {} reveal finished, polling resumed", frozen.round_key);
            }
            self.clear_spin();
            self.poller.resume();
        }

        let winner = if output.show_winner {
            self.frozen
                .as_ref()
                .and_then(|f| f.winner())
                .cloned()
        } else {
            None
        };

        VisualFrame {
            offset: output.offset,
            progress: output.progress,
            spinning: output.spinning,
            show_winner: output.show_winner,
            winner,
            event: output.event,
        }
    }

    /// Should the host poll the round status now?
    pub fn should_poll(&self, now_ms: f64) -> bool {
        !self.animator.is_busy() && self.poller.due(now_ms)
    }

    /// The viewport went away. Cancels any spin and resumes polling.
    pub fn detach(&mut self) {
        if let Some(handle) = self.animator.cancel() {
            log::warn!("Viewport lost during spin {}, cancelled", handle.id());
        }
        self.frozen = None;
        self.clear_spin();
        self.poller.resume();
    }

    fn clear_spin(&mut self) {
        self.target = None;
        self.window = None;
        self.rendered.clear();
    }

    /// Release everything: spin, cached strip, round history
    pub fn teardown(&mut self) {
        self.detach();
        self.cache.clear();
        self.tiles = None;
        self.strip.clear();
        self.watcher.reset();
        self.error = None;
        log::debug!("Visualizer torn down");
    }

    /// Tiles to render, in strip order
    pub fn strip(&self) -> &[StripTile] {
        &self.strip
    }

    /// Tiles to render while a spin is on screen, laid out over its
    /// `SafeWindow`; `VisualFrame::offset` indexes into this list. Empty
    /// when idle, where `strip()` is drawn instead.
    pub fn rendered_strip(&self) -> &[StripTile] {
        &self.rendered
    }

    /// Layout of the spin on screen
    pub fn window(&self) -> Option<SafeWindow> {
        self.window
    }

    pub fn phase(&self) -> SpinPhase {
        self.animator.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.animator.is_busy()
    }

    /// Snapshot of the round on screen
    pub fn frozen(&self) -> Option<&FrozenRound> {
        self.frozen.as_ref()
    }

    pub fn target(&self) -> Option<TargetLocation> {
        self.target
    }

    /// Last error that stopped a round from animating
    pub fn error_state(&self) -> Option<&VisualizerError> {
        self.error.as_ref()
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }
}
