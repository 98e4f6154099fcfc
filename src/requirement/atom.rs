//! Requirement atoms and the requirement expression itself.
//!
//! Atoms reference reward *classes*, not concrete identifiers: a chest
//! needing `Item_Llave_Dorada` is satisfied by any held item whose
//! identifier starts with that class, because concrete rewards carry
//! instance detail (a clue embeds its decoded value).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifier of a one-way boolean signal.
///
/// Signals are set once by a puzzle and read as prerequisites by others,
/// independent of the inventory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalId(String);

impl SignalId {
    /// Create a signal identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The signal name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Smallest unit of a requirement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Atom {
    /// A held item whose identifier starts with this class.
    HasItemClass(String),
    /// A held clue whose identifier starts with this class.
    HasClueClass(String),
    /// A signal that has been set this game.
    SignalSet(SignalId),
}

impl Atom {
    /// The reward class this atom matches, if it is an inventory atom.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match self {
            Atom::HasItemClass(c) | Atom::HasClueClass(c) => Some(c),
            Atom::SignalSet(_) => None,
        }
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::HasItemClass(c) | Atom::HasClueClass(c) => write!(f, "{c}"),
            Atom::SignalSet(s) => write!(f, "{s}"),
        }
    }
}

/// A prerequisite expression: zero or more atoms, all of which must hold.
///
/// The empty requirement is vacuously satisfied — puzzles without
/// prerequisites rely on this.
///
/// ## Example
///
/// ```
/// use escape_core::requirement::Requirement;
///
/// let req = Requirement::item("Item_Destornillador")
///     .and_item("Item_Linterna_UV");
///
/// assert_eq!(req.atoms().len(), 2);
/// assert!(!req.is_empty());
/// assert!(Requirement::none().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    atoms: SmallVec<[Atom; 2]>,
}

impl Requirement {
    /// The always-satisfied requirement.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Require a held item of the given class.
    #[must_use]
    pub fn item(class: impl Into<String>) -> Self {
        Self::none().and_item(class)
    }

    /// Require a held clue of the given class.
    #[must_use]
    pub fn clue(class: impl Into<String>) -> Self {
        Self::none().and_clue(class)
    }

    /// Require a set signal.
    #[must_use]
    pub fn signal(id: SignalId) -> Self {
        Self::none().and_signal(id)
    }

    /// Add an item atom.
    #[must_use]
    pub fn and_item(mut self, class: impl Into<String>) -> Self {
        self.atoms.push(Atom::HasItemClass(class.into()));
        self
    }

    /// Add a clue atom.
    #[must_use]
    pub fn and_clue(mut self, class: impl Into<String>) -> Self {
        self.atoms.push(Atom::HasClueClass(class.into()));
        self
    }

    /// Add a signal atom.
    #[must_use]
    pub fn and_signal(mut self, id: SignalId) -> Self {
        self.atoms.push(Atom::SignalSet(id));
        self
    }

    /// All atoms in this requirement.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// True if there is nothing to satisfy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// First item class referenced, if any. Used by behaviors that expect
    /// a specific item to be applied.
    #[must_use]
    pub fn first_item_class(&self) -> Option<&str> {
        self.atoms.iter().find_map(|a| match a {
            Atom::HasItemClass(c) => Some(c.as_str()),
            _ => None,
        })
    }

    /// First clue class referenced, if any.
    #[must_use]
    pub fn first_clue_class(&self) -> Option<&str> {
        self.atoms.iter().find_map(|a| match a {
            Atom::HasClueClass(c) => Some(c.as_str()),
            _ => None,
        })
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.atoms.is_empty() {
            return write!(f, "(ninguno)");
        }
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{atom}")?;
        }
        Ok(())
    }
}
