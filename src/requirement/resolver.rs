//! Requirement evaluation against live or simulated state.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use super::atom::{Atom, Requirement, SignalId};

/// What a requirement is checked against.
///
/// Implemented by the live session view (inventory classes plus active
/// signals) and by [`SimulatedState`] during generation, so the resolver
/// has a single evaluation path.
pub trait RequirementState {
    /// Whether any held reward identifier starts with `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Whether the given signal has been set.
    fn signal_set(&self, signal: &SignalId) -> bool;
}

/// Outcome of evaluating a requirement.
///
/// `missing` lists every atom that failed, not just the first, so hint
/// text can name everything still needed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub satisfied: bool,
    pub missing: Vec<Atom>,
}

impl Evaluation {
    /// Human-readable list of what is still missing.
    #[must_use]
    pub fn missing_text(&self) -> String {
        self.missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Evaluator for requirements. Pure and order-independent.
pub struct RequirementResolver;

impl RequirementResolver {
    /// Evaluate `requirement` against `state`.
    ///
    /// An empty requirement is vacuously satisfied. Every atom is checked
    /// independently; no short-circuiting.
    pub fn evaluate(requirement: &Requirement, state: &impl RequirementState) -> Evaluation {
        let missing: Vec<Atom> = requirement
            .atoms()
            .iter()
            .filter(|atom| !Self::atom_holds(atom, state))
            .cloned()
            .collect();

        Evaluation {
            satisfied: missing.is_empty(),
            missing,
        }
    }

    fn atom_holds(atom: &Atom, state: &impl RequirementState) -> bool {
        match atom {
            Atom::HasItemClass(class) | Atom::HasClueClass(class) => state.has_class(class),
            Atom::SignalSet(signal) => state.signal_set(signal),
        }
    }
}

/// Hypothetical inventory/signal set used during chain generation.
///
/// Accumulates the *classes* of assigned rewards and the signals of
/// appended puzzles, proving each step satisfiable before any puzzle is
/// shown to the player. Persistent sets keep snapshots for diagnostics
/// cheap.
#[derive(Clone, Debug, Default)]
pub struct SimulatedState {
    classes: ImHashSet<String>,
    signals: ImHashSet<SignalId>,
}

impl SimulatedState {
    /// Fresh, empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a granted reward class.
    pub fn grant_class(&mut self, class: impl Into<String>) {
        self.classes.insert(class.into());
    }

    /// Record a set signal.
    pub fn set_signal(&mut self, signal: SignalId) {
        self.signals.insert(signal);
    }

    /// Sorted snapshot of everything accumulated, for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .classes
            .iter()
            .cloned()
            .chain(self.signals.iter().map(|s| s.as_str().to_string()))
            .collect();
        all.sort();
        all
    }
}

impl RequirementState for SimulatedState {
    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|held| held.starts_with(class))
    }

    fn signal_set(&self, signal: &SignalId) -> bool {
        self.signals.contains(signal)
    }
}
