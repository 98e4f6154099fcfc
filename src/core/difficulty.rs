//! Difficulty tiers and per-puzzle eligibility.
//!
//! A tier determines how many puzzles the chain generator targets and
//! whether advanced-only puzzles may enter the candidate pool.

use serde::{Deserialize, Serialize};

/// Game difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 4 puzzles, basic catalog only.
    Easy,
    /// 7 puzzles, basic catalog only.
    Medium,
    /// 10 puzzles, full catalog.
    Hard,
    /// Every eligible puzzle in the catalog.
    Expert,
}

impl Difficulty {
    /// Number of puzzles to target given the eligible catalog size.
    ///
    /// `Expert` always uses the whole eligible catalog; the fixed tiers
    /// may exceed it, which the generator clamps (with a diagnostic).
    #[must_use]
    pub fn target_count(self, eligible: usize) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 7,
            Difficulty::Hard => 10,
            Difficulty::Expert => eligible,
        }
    }

    /// Whether advanced-only puzzles are in play at this tier.
    #[must_use]
    pub fn allows_advanced(self) -> bool {
        matches!(self, Difficulty::Hard | Difficulty::Expert)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        };
        write!(f, "{name}")
    }
}

/// Which tiers a puzzle definition may appear in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    /// Available at every tier.
    #[default]
    Any,
    /// Restricted to Hard and Expert.
    AdvancedOnly,
}

impl Eligibility {
    /// Check whether a puzzle with this eligibility can be picked at `tier`.
    #[must_use]
    pub fn allowed_at(self, tier: Difficulty) -> bool {
        match self {
            Eligibility::Any => true,
            Eligibility::AdvancedOnly => tier.allows_advanced(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_counts() {
        assert_eq!(Difficulty::Easy.target_count(20), 4);
        assert_eq!(Difficulty::Medium.target_count(20), 7);
        assert_eq!(Difficulty::Hard.target_count(20), 10);
        assert_eq!(Difficulty::Expert.target_count(20), 20);
    }

    #[test]
    fn test_advanced_eligibility() {
        assert!(Eligibility::Any.allowed_at(Difficulty::Easy));
        assert!(!Eligibility::AdvancedOnly.allowed_at(Difficulty::Easy));
        assert!(!Eligibility::AdvancedOnly.allowed_at(Difficulty::Medium));
        assert!(Eligibility::AdvancedOnly.allowed_at(Difficulty::Hard));
        assert!(Eligibility::AdvancedOnly.allowed_at(Difficulty::Expert));
    }
}
