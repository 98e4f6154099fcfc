//! Collaborator interfaces.
//!
//! The core never reaches out to globals: the engine receives its
//! collaborators at construction and talks to them through these traits.
//! The world builds meshes, the inventory owns what the player holds,
//! and the event sink renders — none of them make decisions.

use serde::{Deserialize, Serialize};

use crate::catalog::PuzzleId;
use crate::requirement::Requirement;
use crate::rewards::RewardId;

/// A point in world space where a pickup can be spawned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Spawn position used when a solve supplies none.
pub const DEFAULT_PICKUP_POS: WorldPos = WorldPos::new(0.0, 0.5, 0.0);

/// Handle to a spawned world pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickupHandle(pub u32);

/// The player's inventory, owned externally.
///
/// The core reads it through `has_class`/`list` and writes only through
/// the grant path (`add_clue`) and behavior consumption (`remove_item`).
pub trait Inventory {
    /// Whether any held identifier starts with `prefix`.
    fn has_class(&self, prefix: &str) -> bool;

    /// Add a clue directly (clues are knowledge, no pickup step).
    fn add_clue(&mut self, clue: RewardId);

    /// Remove the first held identifier starting with `id`.
    /// Returns whether anything was removed.
    fn remove_item(&mut self, id: &str) -> bool;

    /// Snapshot of everything held.
    fn list(&self) -> Vec<RewardId>;
}

/// The 3D scene, owned externally.
pub trait World {
    /// Spawn a pickup for an item reward at `pos`.
    fn spawn_pickup(&mut self, reward: &RewardId, pos: WorldPos) -> PickupHandle;

    /// Configure a static scene object for an active puzzle.
    fn configure_static_object(&mut self, puzzle: &PuzzleId, requirement: &Requirement, hint: &str);
}

/// Events the core emits for display. Never queried back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CoreEvent {
    /// Tooltip/hint text changed for a puzzle.
    HintChanged { puzzle: PuzzleId, text: String },
    /// A puzzle was solved.
    PuzzleSolved {
        puzzle: PuzzleId,
        solved: u32,
        total: u32,
    },
    /// A generation diagnostic, pre-rendered for display.
    GenerationDiagnostic { message: String },
    /// The terminal gate was solved.
    GameCompleted,
}

/// Consumer of [`CoreEvent`]s (UI, audio cues, observability).
pub trait EventSink {
    /// Receive one event.
    fn emit(&mut self, event: CoreEvent);
}

/// Collecting sink for tests and headless runs.
impl EventSink for Vec<CoreEvent> {
    fn emit(&mut self, event: CoreEvent) {
        self.push(event);
    }
}

/// Simple vector-backed inventory for tests and headless play.
#[derive(Clone, Debug, Default)]
pub struct BasicInventory {
    held: Vec<RewardId>,
}

impl BasicInventory {
    /// Empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add any reward identifier directly (e.g. a collected pickup).
    pub fn add(&mut self, reward: RewardId) {
        self.held.push(reward);
    }

    /// Number of held identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Whether nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl Inventory for BasicInventory {
    fn has_class(&self, prefix: &str) -> bool {
        self.held.iter().any(|r| r.matches_class(prefix))
    }

    fn add_clue(&mut self, clue: RewardId) {
        self.held.push(clue);
    }

    fn remove_item(&mut self, id: &str) -> bool {
        if let Some(index) = self.held.iter().position(|r| r.as_str().starts_with(id)) {
            self.held.remove(index);
            true
        } else {
            false
        }
    }

    fn list(&self) -> Vec<RewardId> {
        self.held.clone()
    }
}

/// World stub that records spawns; for tests and headless play.
#[derive(Clone, Debug, Default)]
pub struct RecordingWorld {
    /// Every pickup spawned, in order.
    pub pickups: Vec<(RewardId, WorldPos)>,
    /// Every configured static object.
    pub configured: Vec<PuzzleId>,
}

impl RecordingWorld {
    /// Empty recording world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl World for RecordingWorld {
    fn spawn_pickup(&mut self, reward: &RewardId, pos: WorldPos) -> PickupHandle {
        self.pickups.push((reward.clone(), pos));
        PickupHandle(self.pickups.len() as u32 - 1)
    }

    fn configure_static_object(
        &mut self,
        puzzle: &PuzzleId,
        _requirement: &Requirement,
        _hint: &str,
    ) {
        self.configured.push(puzzle.clone());
    }
}
