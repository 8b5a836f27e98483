//! Visualizer configuration
//!
//! Stored as JSON. Every section carries `#[serde(default)]`, so a partial
//! or older file still loads and missing values take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jp_core::{JpError, JpResult};
use jp_motion::SpinTiming;
use jp_strip::{
    DEFAULT_BUFFER_MARGIN_TILES, DEFAULT_MIN_SPIN_TILES, DEFAULT_WINDOW_LAPS,
    MAX_BUFFER_MARGIN_TILES, MAX_MIN_SPIN_TILES, MAX_WINDOW_LAPS, StripGeometry,
};

/// Strip and landing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripSettings {
    /// Tiles the strip must scroll past before landing
    pub min_spin_tiles: usize,
    /// Extra tiles rendered beyond the viewport on each side
    pub buffer_margin_tiles: usize,
    /// Tile lists inside the wrap loop (rounded up to even)
    pub window_laps: usize,
}

impl Default for StripSettings {
    fn default() -> Self {
        Self {
            min_spin_tiles: DEFAULT_MIN_SPIN_TILES,
            buffer_margin_tiles: DEFAULT_BUFFER_MARGIN_TILES,
            window_laps: DEFAULT_WINDOW_LAPS,
        }
    }
}

/// Complete visualizer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub geometry: StripGeometry,
    pub timing: SpinTiming,
    pub strip: StripSettings,
}

impl VisualizerConfig {
    /// Load from the standard location
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load from `path`, falling back to defaults when the file is missing,
    /// unreadable or invalid
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(JpError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate `path`
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> JpResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the standard location
    pub fn save(&self) -> JpResult<()> {
        self.save_to(Self::default_path())
    }

    /// Save to `path`, creating parent directories
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> JpResult<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Default config file path
    pub fn default_path() -> PathBuf {
        let base = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .map(|h| h.join("Library/Application Support/Jackpot Visualizer"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .map(|d| d.join("Jackpot Visualizer"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            dirs::config_dir()
                .map(|d| d.join("jackpot-visualizer"))
                .unwrap_or_else(|| PathBuf::from("."))
        };
        base.join("visualizer.json")
    }

    pub fn validate(&self) -> JpResult<()> {
        self.geometry
            .validate()
            .map_err(|e| JpError::InvalidParam(e.to_string()))?;

        if !self.timing.is_valid() {
            return Err(JpError::InvalidParam(format!(
                "durations must be non-negative and the poll interval positive \
                 (spin {}ms, reveal {}ms, poll {}ms)",
                self.timing.spin_duration_ms,
                self.timing.reveal_duration_ms,
                self.timing.poll_interval_ms
            )));
        }

        let strip = &self.strip;
        if !(1..=MAX_WINDOW_LAPS).contains(&strip.window_laps) {
            return Err(JpError::InvalidParam(format!(
                "window_laps must be 1..={}, got {}",
                MAX_WINDOW_LAPS, strip.window_laps
            )));
        }
        if strip.min_spin_tiles > MAX_MIN_SPIN_TILES {
            return Err(JpError::InvalidParam(format!(
                "min_spin_tiles must be at most {}, got {}",
                MAX_MIN_SPIN_TILES, strip.min_spin_tiles
            )));
        }
        if strip.buffer_margin_tiles > MAX_BUFFER_MARGIN_TILES {
            return Err(JpError::InvalidParam(format!(
                "buffer_margin_tiles must be at most {}, got {}",
                MAX_BUFFER_MARGIN_TILES, strip.buffer_margin_tiles
            )));
        }

        Ok(())
    }
}
