//! Offset geometry and the safe rendering window

use serde::{Deserialize, Serialize};

use crate::error::{StripError, StripResult};

/// Extra tiles kept beyond the viewport on each side of the strip
pub const DEFAULT_BUFFER_MARGIN_TILES: usize = 2;
/// Copies of the tile list inside the wrap loop (kept even)
pub const DEFAULT_WINDOW_LAPS: usize = 4;
/// Upper bound on wrap-loop laps
pub const MAX_WINDOW_LAPS: usize = 64;
/// Upper bound on the buffer margin
pub const MAX_BUFFER_MARGIN_TILES: usize = 64;
/// Widest viewport accepted, in tile widths
pub const MAX_VIEWPORT_TILES: f64 = 512.0;

/// Tile and viewport dimensions (px)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripGeometry {
    pub tile_width: f64,
    /// Margin on each side of a tile
    pub tile_margin: f64,
    /// Width of the visible viewport; the marker sits at its midpoint
    pub container_width: f64,
}

impl Default for StripGeometry {
    fn default() -> Self {
        Self {
            tile_width: 120.0,
            tile_margin: 4.0,
            container_width: 800.0,
        }
    }
}

impl StripGeometry {
    pub fn new(tile_width: f64, tile_margin: f64, container_width: f64) -> Self {
        Self {
            tile_width,
            tile_margin,
            container_width,
        }
    }

    /// Width of one tile including both margins
    #[inline]
    pub fn tile_total(&self) -> f64 {
        self.tile_width + 2.0 * self.tile_margin
    }

    /// Width of one full pass over `tile_count` tiles
    #[inline]
    pub fn list_width(&self, tile_count: usize) -> f64 {
        tile_count as f64 * self.tile_total()
    }

    /// Minimum spin distance in pixels
    #[inline]
    pub fn min_spin_px(&self, min_spin_tiles: usize) -> f64 {
        min_spin_tiles as f64 * self.tile_total()
    }

    pub fn validate(&self) -> StripResult<()> {
        if !(self.tile_width.is_finite() && self.tile_width > 0.0) {
            return Err(StripError::InvalidGeometry(format!(
                "tile width must be positive, got {}",
                self.tile_width
            )));
        }
        if !(self.tile_margin.is_finite() && self.tile_margin >= 0.0) {
            return Err(StripError::InvalidGeometry(format!(
                "tile margin must be non-negative, got {}",
                self.tile_margin
            )));
        }
        if !(self.container_width.is_finite() && self.container_width > 0.0) {
            return Err(StripError::InvalidGeometry(format!(
                "container width must be positive, got {}",
                self.container_width
            )));
        }
        if self.container_width / self.tile_total() > MAX_VIEWPORT_TILES {
            return Err(StripError::InvalidGeometry(format!(
                "container width {} spans more than {} tiles",
                self.container_width, MAX_VIEWPORT_TILES
            )));
        }
        Ok(())
    }

    /// Total scroll distance that lands `target_position` under the marker,
    /// padded with whole laps until it reaches the minimum spin distance.
    pub fn spin_distance(
        &self,
        target_position: usize,
        tile_count: usize,
        min_spin_tiles: usize,
    ) -> StripResult<f64> {
        if tile_count == 0 {
            return Err(StripError::EmptyStrip);
        }
        self.validate()?;

        let raw = raw_offset(
            target_position,
            self.tile_width,
            self.tile_margin,
            self.container_width,
        );
        Ok(pad_to_minimum(
            raw,
            self.list_width(tile_count),
            self.min_spin_px(min_spin_tiles),
        ))
    }
}

/// Scroll offset that puts the center of tile `target_position` under the
/// viewport midpoint.
#[inline]
pub fn raw_offset(
    target_position: usize,
    tile_width: f64,
    tile_margin: f64,
    container_width: f64,
) -> f64 {
    let tile_total = tile_width + 2.0 * tile_margin;
    target_position as f64 * tile_total + tile_margin - container_width / 2.0 + tile_total / 2.0
}

/// Add the fewest whole `list_width` laps that bring `offset` up to
/// `min_distance`
pub fn pad_to_minimum(offset: f64, list_width: f64, min_distance: f64) -> f64 {
    if list_width <= 0.0 || !list_width.is_finite() || !min_distance.is_finite() {
        return offset;
    }
    if offset >= min_distance {
        return offset;
    }
    let laps = ((min_distance - offset) / list_width).ceil().max(0.0);
    let padded = offset + laps * list_width;
    // division rounding can leave it one ulp short
    if padded < min_distance {
        padded + list_width
    } else {
        padded
    }
}

/// Bounded window of the rendered strip the viewport stays inside.
///
/// The rendered strip is `buffer | laps × list | buffer`. The visible offset
/// wraps inside the loop section, and the buffers are wider than the
/// viewport, so neither end of the rendered strip ever comes into view.
/// The loop holds an even number of whole lists, so wrapping never changes
/// which tile sits under the marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafeWindow {
    pub tile_total: f64,
    pub tile_count: usize,
    pub container_width: f64,
    /// Tiles rendered before and after the loop section
    pub buffer_tiles: usize,
    /// Whole tile lists inside the loop section
    pub laps: usize,
    pub buffer_px: f64,
    pub loop_width: f64,
    pub strip_width: f64,
}

impl SafeWindow {
    pub fn new(
        geometry: &StripGeometry,
        tile_count: usize,
        margin_tiles: usize,
        laps: usize,
    ) -> StripResult<Self> {
        if tile_count == 0 {
            return Err(StripError::EmptyStrip);
        }
        geometry.validate()?;

        let tile_total = geometry.tile_total();
        let margin_tiles = margin_tiles.min(MAX_BUFFER_MARGIN_TILES);
        let buffer_tiles = (geometry.container_width / tile_total).ceil() as usize + margin_tiles;
        // clamp, then round up to an even count
        let laps = laps.clamp(2, MAX_WINDOW_LAPS).div_ceil(2) * 2;

        let buffer_px = buffer_tiles as f64 * tile_total;
        let loop_width = laps as f64 * geometry.list_width(tile_count);
        let strip_width = 2.0 * buffer_px + loop_width;

        Ok(Self {
            tile_total,
            tile_count,
            container_width: geometry.container_width,
            buffer_tiles,
            laps,
            buffer_px,
            loop_width,
            strip_width,
        })
    }

    /// Centered starting offset inside the loop
    #[inline]
    pub fn base_offset(&self) -> f64 {
        self.loop_width / 2.0
    }

    /// On-screen offset for a cumulative (unwrapped) scroll distance
    #[inline]
    pub fn visual_offset(&self, cumulative: f64) -> f64 {
        self.buffer_px + (self.base_offset() + cumulative).rem_euclid(self.loop_width)
    }

    /// Is `offset` inside `[buffer_px, strip_width - buffer_px]`?
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.buffer_px && offset <= self.strip_width - self.buffer_px
    }

    /// Number of tiles to render
    pub fn rendered_tiles(&self) -> usize {
        2 * self.buffer_tiles + self.laps * self.tile_count
    }

    /// Which list tile is rendered at `strip_index`
    #[inline]
    pub fn tile_at(&self, strip_index: usize) -> usize {
        let n = self.tile_count as isize;
        (strip_index as isize - self.buffer_tiles as isize).rem_euclid(n) as usize
    }

    /// Rendered strip index under the viewport midpoint at `visual_offset`
    pub fn strip_index_under_marker(&self, visual_offset: f64) -> usize {
        let marker_x = visual_offset + self.container_width / 2.0;
        (marker_x / self.tile_total).floor().max(0.0) as usize
    }

    /// List tile under the viewport midpoint at `visual_offset`
    pub fn tile_under_marker(&self, visual_offset: f64) -> usize {
        self.tile_at(self.strip_index_under_marker(visual_offset))
    }

    /// Which copy of the list `strip_index` belongs to. The leading buffer
    /// is copy -1.
    #[inline]
    pub fn copy_at(&self, strip_index: usize) -> isize {
        let n = self.tile_count as isize;
        (strip_index as isize - self.buffer_tiles as isize).div_euclid(n)
    }
}
