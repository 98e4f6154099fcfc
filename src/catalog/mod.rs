//! Static puzzle definitions and their registry.
//!
//! Definitions are immutable for the process lifetime; per-game mutable
//! state lives on `session::PuzzleInstance`.

mod builtin;
mod definition;
mod registry;

pub use builtin::{
    standard_catalog, standard_rewards, ENABLE_BOOK_PUZZLE, FALLBACK_DOOR_CLASS,
    FINAL_CODE_CLASS,
};
pub use definition::{PuzzleDefinition, PuzzleId};
pub use registry::PuzzleCatalog;
