//! Timing profiles for the jackpot spin

use serde::{Deserialize, Serialize};

use crate::curve::EaseCurve;

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast/Turbo mode
    Turbo,
    /// No animation (tests, reduced motion)
    Instant,
    /// Scaled or hand-edited values
    Custom,
}

/// Spin timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTiming {
    /// Profile type
    pub profile: TimingProfile,

    /// Scroll duration from start to rest (ms)
    pub spin_duration_ms: f64,

    /// Winner banner display after the strip stops (ms)
    pub reveal_duration_ms: f64,

    /// Status polling interval outside of spins (ms)
    pub poll_interval_ms: f64,

    /// Deceleration curve
    pub curve: EaseCurve,
}

impl SpinTiming {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            spin_duration_ms: 10_000.0,
            reveal_duration_ms: 8_000.0,
            poll_interval_ms: 2_000.0,
            curve: EaseCurve::QuartOut,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            spin_duration_ms: 4_000.0,
            reveal_duration_ms: 3_000.0,
            poll_interval_ms: 1_000.0,
            curve: EaseCurve::QuartOut,
        }
    }

    /// Jump straight to the result
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            spin_duration_ms: 0.0,
            reveal_duration_ms: 0.0,
            poll_interval_ms: 2_000.0,
            curve: EaseCurve::Linear,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale spin and reveal durations by factor (< 1.0 = faster).
    /// Polling is not scaled.
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        Self {
            profile: TimingProfile::Custom,
            spin_duration_ms: self.spin_duration_ms * factor,
            reveal_duration_ms: self.reveal_duration_ms * factor,
            poll_interval_ms: self.poll_interval_ms,
            curve: self.curve,
        }
    }

    /// Linear progress after `elapsed_ms`, clamped to 0.0 - 1.0.
    /// A zero duration is complete immediately.
    #[inline]
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        if self.spin_duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.spin_duration_ms).clamp(0.0, 1.0)
    }

    /// Eased progress after `elapsed_ms`
    #[inline]
    pub fn eased_at(&self, elapsed_ms: f64) -> f64 {
        self.curve.evaluate(self.progress_at(elapsed_ms))
    }

    /// Spin plus reveal
    pub fn total_busy_ms(&self) -> f64 {
        self.spin_duration_ms + self.reveal_duration_ms
    }

    pub fn is_valid(&self) -> bool {
        self.spin_duration_ms.is_finite()
            && self.spin_duration_ms >= 0.0
            && self.reveal_duration_ms.is_finite()
            && self.reveal_duration_ms >= 0.0
            && self.poll_interval_ms.is_finite()
            && self.poll_interval_ms > 0.0
    }
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self::normal()
    }
}
