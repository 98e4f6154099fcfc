//! Puzzle catalog for definition lookup.
//!
//! The `PuzzleCatalog` stores all puzzle definitions and provides lookup
//! by `PuzzleId`. Iteration follows registration order so that chain
//! generation is reproducible under a fixed seed.

use rustc_hash::FxHashMap;

use crate::core::Difficulty;

use super::definition::{PuzzleDefinition, PuzzleId};

/// Registry of puzzle definitions.
///
/// ## Example
///
/// ```
/// use escape_core::behavior::Behavior;
/// use escape_core::catalog::{PuzzleCatalog, PuzzleDefinition, PuzzleId};
///
/// let mut catalog = PuzzleCatalog::new();
/// catalog.register(PuzzleDefinition::new("liftRug", "Levantar Alfombra", Behavior::Examine));
///
/// let found = catalog.get(&PuzzleId::new("liftRug")).unwrap();
/// assert_eq!(found.name, "Levantar Alfombra");
/// ```
#[derive(Clone, Debug, Default)]
pub struct PuzzleCatalog {
    puzzles: FxHashMap<PuzzleId, PuzzleDefinition>,
    order: Vec<PuzzleId>,
}

impl PuzzleCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a puzzle definition.
    ///
    /// Panics if a puzzle with the same ID already exists.
    pub fn register(&mut self, puzzle: PuzzleDefinition) {
        if self.puzzles.contains_key(&puzzle.id) {
            panic!("Puzzle with ID {:?} already registered", puzzle.id);
        }
        self.order.push(puzzle.id.clone());
        self.puzzles.insert(puzzle.id.clone(), puzzle);
    }

    /// Get a puzzle definition by ID.
    #[must_use]
    pub fn get(&self, id: &PuzzleId) -> Option<&PuzzleDefinition> {
        self.puzzles.get(id)
    }

    /// Check if a puzzle ID is registered.
    #[must_use]
    pub fn contains(&self, id: &PuzzleId) -> bool {
        self.puzzles.contains_key(id)
    }

    /// Number of registered puzzles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PuzzleDefinition> {
        self.order.iter().filter_map(|id| self.puzzles.get(id))
    }

    /// Definitions eligible as chain candidates at the given tier.
    ///
    /// The terminal gate is never a candidate; it is configured and
    /// appended separately after the chain is built.
    pub fn candidates(&self, tier: Difficulty) -> impl Iterator<Item = &PuzzleDefinition> {
        self.iter()
            .filter(move |d| !d.is_terminal_gate() && d.eligibility.allowed_at(tier))
    }

    /// The terminal gate definition, if the catalog has one.
    #[must_use]
    pub fn terminal_gate(&self) -> Option<&PuzzleDefinition> {
        self.iter().find(|d| d.is_terminal_gate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::rewards::RewardCategory;

    fn sample(id: &str) -> PuzzleDefinition {
        PuzzleDefinition::new(id, id, Behavior::Examine)
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = PuzzleCatalog::new();
        catalog.register(sample("a"));

        assert!(catalog.get(&PuzzleId::new("a")).is_some());
        assert!(catalog.get(&PuzzleId::new("b")).is_none());
        assert!(catalog.contains(&PuzzleId::new("a")));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut catalog = PuzzleCatalog::new();
        catalog.register(sample("a"));
        catalog.register(sample("a"));
    }

    #[test]
    fn test_iteration_follows_registration_order() {
        let mut catalog = PuzzleCatalog::new();
        for id in ["c", "a", "b"] {
            catalog.register(sample(id));
        }

        let ids: Vec<_> = catalog.iter().map(|d| d.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_candidates_exclude_gate_and_restricted() {
        let mut catalog = PuzzleCatalog::new();
        catalog.register(sample("open"));
        catalog.register(sample("advanced").advanced_only());
        catalog.register(sample("door").with_reward(RewardCategory::Victory));

        let easy: Vec<_> = catalog
            .candidates(Difficulty::Easy)
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(easy, vec!["open"]);

        let expert: Vec<_> = catalog
            .candidates(Difficulty::Expert)
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(expert, vec!["open", "advanced"]);

        assert_eq!(catalog.terminal_gate().unwrap().id.as_str(), "door");
    }
}
