//! Puzzle instances - per-game mutable puzzle state.
//!
//! A `PuzzleInstance` is created when the chain generator commits a chain
//! at game start and lives until the session is discarded. It carries a
//! copy of its definition; the terminal gate's requirement copy is
//! rewritten during generation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{PuzzleDefinition, PuzzleId};
use crate::requirement::Requirement;
use crate::rewards::{RewardCategory, RewardId};

/// Unlock state of a puzzle instance.
///
/// Transitions: `Locked → Available` when the requirement holds against
/// live state, `Available → Locked` when it stops holding (a consumed
/// prerequisite), `Available → Solved` via an explicit solve. `Solved`
/// is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleState {
    /// Requirement not met; actions are refused with a hint.
    #[default]
    Locked,
    /// Requirement met; the puzzle can be worked on.
    Available,
    /// Solved. Terminal.
    Solved,
}

/// A puzzle in a running game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleInstance {
    /// The definition this instance was created from.
    pub definition: PuzzleDefinition,

    /// Live requirement. Copied from the definition; the terminal gate's
    /// is configured post-generation.
    pub requirement: Requirement,

    /// Concrete reward assigned during generation, if any.
    pub assigned_reward: Option<RewardId>,

    /// Current unlock state.
    pub state: PuzzleState,

    /// Behavior scratch state (vent opened, projector parts inserted).
    #[serde(default)]
    pub progress: FxHashMap<String, i64>,

    /// Identifiers consumed *into* this puzzle by its own behavior.
    ///
    /// A prerequisite fed to the puzzle itself still counts as fulfilled
    /// when the requirement is re-evaluated, so a half-opened vent does
    /// not re-lock after the screwdriver is used up on it.
    #[serde(default)]
    pub consumed: Vec<String>,
}

impl PuzzleInstance {
    /// Create an instance from a definition with an assigned reward.
    #[must_use]
    pub fn from_definition(definition: &PuzzleDefinition, assigned_reward: Option<RewardId>) -> Self {
        Self {
            requirement: definition.requirement.clone(),
            definition: definition.clone(),
            assigned_reward,
            state: PuzzleState::Locked,
            progress: FxHashMap::default(),
            consumed: Vec::new(),
        }
    }

    /// The instance's puzzle ID.
    #[must_use]
    pub fn id(&self) -> &PuzzleId {
        &self.definition.id
    }

    /// Whether this instance is the terminal gate.
    #[must_use]
    pub fn is_terminal_gate(&self) -> bool {
        self.definition.is_terminal_gate()
    }

    /// Reward category of the underlying definition.
    #[must_use]
    pub fn reward_category(&self) -> RewardCategory {
        self.definition.reward
    }

    /// Whether the puzzle can currently be solved.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state == PuzzleState::Available
    }

    /// Whether the puzzle has been solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.state == PuzzleState::Solved
    }
}
