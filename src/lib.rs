//! # escape-core
//!
//! The content-logic core of a single-player escape-room game: a chain
//! generator that assembles a guaranteed-solvable puzzle sequence for a
//! chosen difficulty, and a runtime engine that tracks unlock state,
//! validates prerequisites against held items/clues/signals, and
//! distributes rewards that unlock downstream puzzles.
//!
//! ## Design Principles
//!
//! 1. **Solvable by construction**: the generator appends a puzzle only
//!    when its requirement is satisfiable by the rewards and signals of
//!    everything appended before it.
//!
//! 2. **One evaluation path**: the same resolver checks requirements
//!    against the generation-time simulation accumulator and the live
//!    inventory/signal state.
//!
//! 3. **Injected collaborators**: the world, inventory, and UI event
//!    sink are passed in at construction. No global singletons, no
//!    decisions outside the core.
//!
//! 4. **Degrade, never crash**: stuck generation, an exhausted reward
//!    pool, or a misconfigured exit door produce structured diagnostics
//!    and a playable (possibly degraded) game.
//!
//! ## Modules
//!
//! - `core`: deterministic RNG, difficulty tiers
//! - `requirement`: atom/requirement model and the resolver
//! - `rewards`: reward identifiers and the consumable pool
//! - `catalog`: static puzzle definitions and the built-in room content
//! - `behavior`: per-puzzle-kind reaction to player actions
//! - `generate`: the chain generator and its diagnostics
//! - `session`: per-game instances, state machine, and the engine
//! - `ports`: collaborator traits and the emitted event stream

pub mod behavior;
pub mod catalog;
pub mod core;
pub mod generate;
pub mod ports;
pub mod requirement;
pub mod rewards;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Difficulty, Eligibility, GameRng};

pub use crate::requirement::{
    Atom, Evaluation, Requirement, RequirementResolver, RequirementState, SignalId,
    SimulatedState,
};

pub use crate::rewards::{RewardCategory, RewardId, RewardPool};

pub use crate::catalog::{
    standard_catalog, standard_rewards, PuzzleCatalog, PuzzleDefinition, PuzzleId,
};

pub use crate::behavior::{Behavior, BehaviorOutcome, CodeAnswer, PlayerAction};

pub use crate::generate::{ChainGenerator, Diagnostic, Generation};

pub use crate::session::{
    ActionResult, GameSession, PuzzleEngine, PuzzleInstance, PuzzleState, SolveOutcome,
};

pub use crate::ports::{
    BasicInventory, CoreEvent, EventSink, Inventory, PickupHandle, RecordingWorld, World,
    WorldPos, DEFAULT_PICKUP_POS,
};
