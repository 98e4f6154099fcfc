//! The consumable reward pool.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

use super::id::RewardId;

/// Pool of concrete rewards assigned to puzzles at generation time.
///
/// Draws are uniform and without replacement: a given reward can back at
/// most one puzzle per game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPool {
    rewards: Vec<RewardId>,
}

impl RewardPool {
    /// Build a pool from reward identifiers.
    #[must_use]
    pub fn new(rewards: impl IntoIterator<Item = RewardId>) -> Self {
        Self {
            rewards: rewards.into_iter().collect(),
        }
    }

    /// Draw one reward at random, consuming it.
    #[must_use]
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<RewardId> {
        if self.rewards.is_empty() {
            return None;
        }
        let index = rng.pick_index(self.rewards.len());
        Some(self.rewards.remove(index))
    }

    /// Number of rewards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// True when nothing is left to assign.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Whether any remaining reward belongs to `class`.
    #[must_use]
    pub fn contains_class(&self, class: &str) -> bool {
        self.rewards.iter().any(|r| r.matches_class(class))
    }

    /// Remaining rewards, in pool order.
    #[must_use]
    pub fn remaining(&self) -> &[RewardId] {
        &self.rewards
    }
}

impl FromIterator<RewardId> for RewardPool {
    fn from_iter<T: IntoIterator<Item = RewardId>>(iter: T) -> Self {
        Self::new(iter)
    }
}
