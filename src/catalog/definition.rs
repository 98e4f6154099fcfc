//! Puzzle definitions - static puzzle data.
//!
//! `PuzzleDefinition` holds the immutable properties of a puzzle: what it
//! needs, what it grants, where it may appear, and how it reacts to the
//! player. Per-game state (unlock, assigned reward, progress) is stored
//! separately in `session::PuzzleInstance`.

use serde::{Deserialize, Serialize};

use crate::behavior::Behavior;
use crate::core::Eligibility;
use crate::requirement::{Requirement, SignalId};
use crate::rewards::{RewardCategory, RewardId};

/// Unique identifier for a puzzle definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleId(String);

impl PuzzleId {
    /// Create a puzzle ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PuzzleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Static puzzle definition.
///
/// ## Example
///
/// ```
/// use escape_core::behavior::Behavior;
/// use escape_core::catalog::PuzzleDefinition;
/// use escape_core::requirement::Requirement;
/// use escape_core::rewards::RewardCategory;
///
/// let chest = PuzzleDefinition::new("demo_keyLock", "Cofre de Madera", Behavior::UseItem { consume: true })
///     .with_requirement(Requirement::item("Item_Llave_Dorada"))
///     .with_reward(RewardCategory::Item)
///     .with_hint("Un cofre cerrado con una cerradura dorada.");
///
/// assert_eq!(chest.id.as_str(), "demo_keyLock");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    /// Unique identifier.
    pub id: PuzzleId,

    /// Player-facing name.
    pub name: String,

    /// Base hint/description text.
    pub hint: String,

    /// Prerequisites checked before the puzzle unlocks.
    pub requirement: Requirement,

    /// What kind of reward solving grants.
    pub reward: RewardCategory,

    /// Which difficulty tiers this puzzle may appear in.
    pub eligibility: Eligibility,

    /// How the puzzle reacts to player actions.
    pub behavior: Behavior,

    /// Signal this puzzle sets when solved (Signal category only).
    pub emits_signal: Option<SignalId>,

    /// Reward intrinsic to the puzzle, bypassing the pool draw.
    pub fixed_reward: Option<RewardId>,
}

impl PuzzleDefinition {
    /// Create a definition with no requirement and no reward.
    #[must_use]
    pub fn new(id: impl Into<PuzzleId>, name: impl Into<String>, behavior: Behavior) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hint: String::new(),
            requirement: Requirement::none(),
            reward: RewardCategory::None,
            eligibility: Eligibility::Any,
            behavior,
            emits_signal: None,
            fixed_reward: None,
        }
    }

    /// Set the requirement (builder).
    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Set the reward category (builder).
    #[must_use]
    pub fn with_reward(mut self, reward: RewardCategory) -> Self {
        self.reward = reward;
        self
    }

    /// Set the base hint text (builder).
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Restrict to Hard/Expert tiers (builder).
    #[must_use]
    pub fn advanced_only(mut self) -> Self {
        self.eligibility = Eligibility::AdvancedOnly;
        self
    }

    /// Set the signal this puzzle emits when solved (builder).
    ///
    /// Also sets the reward category to `Signal`.
    #[must_use]
    pub fn emitting_signal(mut self, signal: SignalId) -> Self {
        self.emits_signal = Some(signal);
        self.reward = RewardCategory::Signal;
        self
    }

    /// Set a fixed reward granted instead of a pool draw (builder).
    #[must_use]
    pub fn with_fixed_reward(mut self, reward: RewardId) -> Self {
        self.fixed_reward = Some(reward);
        self
    }

    /// Whether this is the terminal gate.
    #[must_use]
    pub fn is_terminal_gate(&self) -> bool {
        self.reward == RewardCategory::Victory
    }
}
