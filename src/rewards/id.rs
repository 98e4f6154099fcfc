//! Reward identifiers.

use serde::{Deserialize, Serialize};

/// What kind of reward a puzzle distributes when solved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardCategory {
    /// A tangible item spawned into the world as a pickup.
    Item,
    /// Knowledge added straight to the inventory.
    Clue,
    /// A boolean signal enabling another puzzle.
    Signal,
    /// Solving this puzzle completes the game.
    Victory,
    /// No reward at all.
    #[default]
    None,
}

/// A concrete reward identifier.
///
/// Format: `Class` or `Class (payload)`. The class is everything before
/// the payload; the payload carries instance detail such as a decoded
/// code.
///
/// ## Example
///
/// ```
/// use escape_core::rewards::{RewardCategory, RewardId};
///
/// let clue = RewardId::new("Clue_Codigo_Safe (123)");
/// assert_eq!(clue.class(), "Clue_Codigo_Safe");
/// assert_eq!(clue.payload(), Some("123"));
/// assert_eq!(clue.category(), RewardCategory::Clue);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RewardId(String);

impl RewardId {
    /// Wrap a reward identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The full identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The class portion: everything before the first space.
    #[must_use]
    pub fn class(&self) -> &str {
        self.0.split(' ').next().unwrap_or(&self.0)
    }

    /// The payload inside parentheses, if present.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        let start = self.0.find('(')? + 1;
        let end = self.0.rfind(')')?;
        (start <= end).then(|| &self.0[start..end])
    }

    /// Category inferred from the class prefix.
    #[must_use]
    pub fn category(&self) -> RewardCategory {
        if self.0.starts_with("Item_") {
            RewardCategory::Item
        } else if self.0.starts_with("Clue_") {
            RewardCategory::Clue
        } else {
            RewardCategory::None
        }
    }

    /// Whether this identifier belongs to the given class.
    #[must_use]
    pub fn matches_class(&self, class: &str) -> bool {
        self.0.starts_with(class)
    }
}

impl std::fmt::Display for RewardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RewardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
