//! Jackpot tile patterns
//!
//! Every participant tile is painted with a pattern. Participants who own a
//! premium pattern get it; everyone else gets one of the free default colors,
//! picked from a hash of their user id so the same user keeps the same color
//! across rounds and re-renders.

use serde::Serialize;

use crate::hash::fold_hash;

/// Pattern tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternTier {
    Free,
    Standard,
    Premium,
    Legendary,
}

/// A tile pattern from the cosmetics catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JackpotPattern {
    pub id: &'static str,
    pub display_name: &'static str,
    /// CSS color or gradient
    pub value: &'static str,
    pub asset_path: Option<&'static str>,
    pub tier: PatternTier,
}

impl JackpotPattern {
    /// Is this a purchasable (non-default) pattern?
    pub fn is_premium(&self) -> bool {
        self.tier != PatternTier::Free
    }
}

/// Free colors assigned to participants without an owned pattern
pub static DEFAULT_PATTERNS: [JackpotPattern; 5] = [
    JackpotPattern {
        id: "default_lightblue",
        display_name: "Sky Blue",
        value: "#38BDF8",
        asset_path: None,
        tier: PatternTier::Free,
    },
    JackpotPattern {
        id: "default_pink",
        display_name: "Rose Pink",
        value: "#F472B6",
        asset_path: None,
        tier: PatternTier::Free,
    },
    JackpotPattern {
        id: "default_red",
        display_name: "Crimson Red",
        value: "#EF4444",
        asset_path: None,
        tier: PatternTier::Free,
    },
    JackpotPattern {
        id: "default_orange",
        display_name: "Sunset Orange",
        value: "#F97316",
        asset_path: None,
        tier: PatternTier::Free,
    },
    JackpotPattern {
        id: "default_yellow",
        display_name: "Golden Yellow",
        value: "#FACC15",
        asset_path: None,
        tier: PatternTier::Free,
    },
];

/// Owned patterns
pub static PREMIUM_PATTERNS: [JackpotPattern; 3] = [
    JackpotPattern {
        id: "pattern_flames",
        display_name: "Inferno",
        value: "linear-gradient(180deg, #FF4500 0%, #FF8C00 50%, #FFD700 100%)",
        asset_path: Some("/assets/patterns/flames.png"),
        tier: PatternTier::Standard,
    },
    JackpotPattern {
        id: "pattern_northern_lights",
        display_name: "Northern Lights",
        value: "linear-gradient(135deg, #00FF87 0%, #60EFFF 50%, #B967FF 100%)",
        asset_path: Some("/assets/patterns/northern_lights.png"),
        tier: PatternTier::Premium,
    },
    JackpotPattern {
        id: "pattern_void",
        display_name: "Void Walker",
        value: "linear-gradient(180deg, #0D0221 0%, #3D1A78 30%, #6B21A8 60%, #F472B6 100%)",
        asset_path: Some("/assets/patterns/void.png"),
        tier: PatternTier::Legendary,
    },
];

/// Look up any catalog pattern by id
pub fn find_pattern(id: &str) -> Option<&'static JackpotPattern> {
    DEFAULT_PATTERNS
        .iter()
        .chain(PREMIUM_PATTERNS.iter())
        .find(|p| p.id == id)
}

/// Deterministic default color for a user
pub fn default_pattern_for(user_id: &str) -> &'static JackpotPattern {
    let idx = fold_hash(user_id).unsigned_abs() as usize % DEFAULT_PATTERNS.len();
    &DEFAULT_PATTERNS[idx]
}

/// Resolve the pattern to paint for a participant.
///
/// Unknown owned ids fall back to the hashed default.
pub fn resolve_pattern(user_id: &str, owned: Option<&str>) -> &'static JackpotPattern {
    match owned.and_then(find_pattern) {
        Some(pattern) => pattern,
        None => {
            if let Some(id) = owned {
                log::debug!("Unknown jackpot pattern '{}' for {}, using default", id, user_id);
            }
            default_pattern_for(user_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stable() {
        let a = default_pattern_for("user_42");
        let b = default_pattern_for("user_42");
        assert_eq!(a.id, b.id);
        assert!(!a.is_premium());
    }

    #[test]
    fn test_default_known_bucket() {
        // fold_hash("a") = 97, 97 % 5 = 2
        assert_eq!(default_pattern_for("a").id, "default_red");
        assert_eq!(default_pattern_for("").id, "default_lightblue");
    }

    #[test]
    fn test_owned_pattern_wins() {
        let p = resolve_pattern("user_1", Some("pattern_void"));
        assert_eq!(p.id, "pattern_void");
        assert!(p.is_premium());
        assert_eq!(p.tier, PatternTier::Legendary);
    }

    #[test]
    fn test_unknown_pattern_falls_back() {
        let p = resolve_pattern("user_1", Some("pattern_missing"));
        assert_eq!(p.id, default_pattern_for("user_1").id);
    }

    #[test]
    fn test_owned_default_color() {
        let p = resolve_pattern("user_1", Some("default_yellow"));
        assert_eq!(p.value, "#FACC15");
    }
}
