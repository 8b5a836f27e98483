//! Easing Curves
//!
//! Ease-out curves for the spin deceleration. All map 0.0 → 0.0 and
//! 1.0 → 1.0 exactly, so a finished spin sits precisely on its target.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Easing curve for the spin scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EaseCurve {
    /// Constant speed
    Linear = 0,
    /// Sine ease-out (gentle)
    SineOut = 1,
    /// 1 - (1 - t)^3
    CubicOut = 2,
    /// 1 - (1 - t)^4
    #[default]
    QuartOut = 3,
    /// 1 - (1 - t)^5 (long crawl at the end)
    QuintOut = 4,
}

impl EaseCurve {
    /// Convert from u8 index
    #[inline]
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => EaseCurve::Linear,
            1 => EaseCurve::SineOut,
            2 => EaseCurve::CubicOut,
            3 => EaseCurve::QuartOut,
            4 => EaseCurve::QuintOut,
            _ => EaseCurve::QuartOut,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            EaseCurve::Linear => "Linear",
            EaseCurve::SineOut => "SineOut",
            EaseCurve::CubicOut => "CubicOut",
            EaseCurve::QuartOut => "QuartOut",
            EaseCurve::QuintOut => "QuintOut",
        }
    }

    /// Evaluate curve at progress t (clamped to 0.0 - 1.0)
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;

        match self {
            EaseCurve::Linear => t,
            EaseCurve::SineOut => (t * FRAC_PI_2).sin(),
            EaseCurve::CubicOut => 1.0 - inv * inv * inv,
            EaseCurve::QuartOut => 1.0 - inv.powi(4),
            EaseCurve::QuintOut => 1.0 - inv.powi(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EaseCurve; 5] = [
        EaseCurve::Linear,
        EaseCurve::SineOut,
        EaseCurve::CubicOut,
        EaseCurve::QuartOut,
        EaseCurve::QuintOut,
    ];

    #[test]
    fn test_curve_boundaries() {
        for curve in ALL {
            assert_eq!(curve.evaluate(0.0), 0.0, "{:?} at 0.0", curve);
            assert_eq!(curve.evaluate(1.0), 1.0, "{:?} at 1.0", curve);

            let mid = curve.evaluate(0.5);
            assert!(mid > 0.0 && mid < 1.0, "{:?} at 0.5 = {}", curve, mid);
        }
    }

    #[test]
    fn test_curve_monotonic() {
        for curve in ALL {
            let mut prev = 0.0;
            for i in 0..=1000 {
                let t = i as f64 / 1000.0;
                let val = curve.evaluate(t);
                assert!(val >= prev, "{:?}: {} < {} at t={}", curve, val, prev, t);
                prev = val;
            }
        }
    }

    #[test]
    fn test_quart_out_values() {
        let curve = EaseCurve::QuartOut;
        assert!((curve.evaluate(0.5) - 0.9375).abs() < 1e-12);
        // out-of-range progress clamps
        assert_eq!(curve.evaluate(-1.0), 0.0);
        assert_eq!(curve.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(EaseCurve::from_index(0), EaseCurve::Linear);
        assert_eq!(EaseCurve::from_index(3), EaseCurve::QuartOut);
        assert_eq!(EaseCurve::from_index(255), EaseCurve::QuartOut);
    }
}
