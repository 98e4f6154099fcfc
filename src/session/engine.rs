//! The runtime puzzle engine.
//!
//! Owns the active session and drives the `Locked → Available → Solved`
//! state machine in response to discrete player actions. Everything runs
//! synchronously: one interaction's `refresh → solve → grant` completes
//! before the next is processed, so counters and reward consumption are
//! race-free by construction.
//!
//! The engine receives its collaborators (inventory, world, event sink)
//! at construction and never reaches a global. After an external
//! inventory change (e.g. a collected pickup), call
//! [`PuzzleEngine::refresh_all`] so unlock states track live state.

use im::HashSet as ImHashSet;
use tracing::{debug, info, warn};

use crate::behavior::{BehaviorContext, BehaviorOutcome, PlayerAction};
use crate::catalog::{PuzzleCatalog, PuzzleId};
use crate::core::{Difficulty, GameRng};
use crate::generate::{ChainGenerator, Diagnostic};
use crate::ports::{CoreEvent, EventSink, Inventory, World, WorldPos, DEFAULT_PICKUP_POS};
use crate::requirement::{
    Atom, Evaluation, Requirement, RequirementResolver, RequirementState, SignalId,
};
use crate::rewards::{RewardCategory, RewardPool};

use super::instance::{PuzzleInstance, PuzzleState};

/// Live evaluation view: inventory classes ∪ session signals, plus the
/// identifiers a puzzle consumed into itself (those still count for it).
struct LiveView<'a, I: Inventory> {
    inventory: &'a I,
    signals: &'a ImHashSet<SignalId>,
    consumed: &'a [String],
}

impl<I: Inventory> RequirementState for LiveView<'_, I> {
    fn has_class(&self, class: &str) -> bool {
        self.inventory.has_class(class) || self.consumed.iter().any(|c| c.starts_with(class))
    }

    fn signal_set(&self, signal: &SignalId) -> bool {
        self.signals.contains(signal)
    }
}

/// One running game: the generated chain plus live bookkeeping.
#[derive(Clone, Debug)]
pub struct GameSession {
    difficulty: Difficulty,
    instances: Vec<PuzzleInstance>,
    solved_count: u32,
    signals: ImHashSet<SignalId>,
    diagnostics: Vec<Diagnostic>,
}

impl GameSession {
    /// The difficulty this session was generated for.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Active instances in chain order (terminal gate last).
    #[must_use]
    pub fn instances(&self) -> &[PuzzleInstance] {
        &self.instances
    }

    /// Look up an instance by puzzle ID.
    #[must_use]
    pub fn instance(&self, id: &PuzzleId) -> Option<&PuzzleInstance> {
        self.instances.iter().find(|i| i.id() == id)
    }

    /// How many instances have been solved this game.
    #[must_use]
    pub fn solved_count(&self) -> u32 {
        self.solved_count
    }

    /// Objective count shown to the player: everything but the gate.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.instances.iter().filter(|i| !i.is_terminal_gate()).count() as u32
    }

    /// Diagnostics recorded while this session was generated.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether a signal has been set this game.
    #[must_use]
    pub fn signal_set(&self, signal: &SignalId) -> bool {
        self.signals.contains(signal)
    }

    fn find(&self, id: &PuzzleId) -> Option<usize> {
        self.instances.iter().position(|i| i.id() == id)
    }
}

/// Result of an explicit solve request.
///
/// Invalid requests (locked or unknown instances) are no-op results,
/// never panics — the game keeps running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Solved; carries the updated counters.
    Solved { solved: u32, total: u32 },
    /// Second solve on the same instance: nothing happened.
    AlreadySolved,
    /// Instance is locked; nothing happened.
    NotAvailable,
    /// No such instance in the active session.
    UnknownPuzzle,
    /// No session is running.
    NoSession,
}

/// Result of routing a player action through a puzzle's behavior.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResult {
    /// The action solved the puzzle.
    Solved { solved: u32, total: u32 },
    /// A step was accepted; the puzzle is not finished.
    Progress { hint: String },
    /// The puzzle wants an external minigame launched.
    MinigameRequested { minigame: String },
    /// The action was refused.
    Rejected { hint: String },
    /// The puzzle is still locked; these atoms are missing.
    Locked { missing: Vec<Atom> },
    /// The puzzle was already solved.
    AlreadySolved,
    /// The action means nothing to this puzzle.
    Ignored,
    /// No such instance in the active session.
    UnknownPuzzle,
    /// No session is running.
    NoSession,
}

/// The content-logic core's public face.
///
/// ## Example
///
/// ```
/// use escape_core::catalog::{standard_catalog, standard_rewards};
/// use escape_core::core::Difficulty;
/// use escape_core::ports::{BasicInventory, CoreEvent, RecordingWorld};
/// use escape_core::session::PuzzleEngine;
///
/// let mut engine = PuzzleEngine::new(
///     standard_catalog(),
///     BasicInventory::new(),
///     RecordingWorld::new(),
///     Vec::<CoreEvent>::new(),
///     42,
/// );
/// let session = engine.start_session(Difficulty::Easy, standard_rewards());
/// assert!(session.total_count() <= 4);
/// ```
pub struct PuzzleEngine<I: Inventory, W: World, E: EventSink> {
    catalog: PuzzleCatalog,
    inventory: I,
    world: W,
    events: E,
    rng: GameRng,
    session: Option<GameSession>,
}

impl<I: Inventory, W: World, E: EventSink> PuzzleEngine<I, W, E> {
    /// Create an engine over a catalog with injected collaborators.
    #[must_use]
    pub fn new(catalog: PuzzleCatalog, inventory: I, world: W, events: E, seed: u64) -> Self {
        Self {
            catalog,
            inventory,
            world,
            events,
            rng: GameRng::new(seed),
            session: None,
        }
    }

    /// Generate and commit a new session, discarding any previous one.
    ///
    /// Generation diagnostics are forwarded to the event sink; static
    /// world objects are configured for every active instance. All
    /// instances start locked and are refreshed once against live state.
    pub fn start_session(&mut self, difficulty: Difficulty, pool: RewardPool) -> &GameSession {
        info!(%difficulty, "starting session");
        let generation = ChainGenerator::new(&self.catalog).generate(difficulty, pool, &mut self.rng);

        for diag in &generation.diagnostics {
            self.events.emit(CoreEvent::GenerationDiagnostic {
                message: diag.to_string(),
            });
        }
        for instance in &generation.instances {
            self.world.configure_static_object(
                instance.id(),
                &instance.requirement,
                &instance.definition.hint,
            );
        }

        self.session = Some(GameSession {
            difficulty,
            instances: generation.instances,
            solved_count: 0,
            signals: ImHashSet::new(),
            diagnostics: generation.diagnostics,
        });
        self.refresh_all();
        self.session.as_ref().expect("session just created")
    }

    /// Discard the running session (new game / back to menu).
    pub fn end_session(&mut self) {
        self.session = None;
    }

    /// The running session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Active instances, empty when no session runs.
    #[must_use]
    pub fn active_instances(&self) -> &[PuzzleInstance] {
        self.session.as_ref().map_or(&[], |s| s.instances.as_slice())
    }

    /// Solved counter of the running session.
    #[must_use]
    pub fn solved_count(&self) -> u32 {
        self.session.as_ref().map_or(0, GameSession::solved_count)
    }

    /// Objective count of the running session.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.session.as_ref().map_or(0, GameSession::total_count)
    }

    /// Shared access to the inventory collaborator.
    #[must_use]
    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Mutable access to the inventory collaborator (pickup collection
    /// flows through here in headless setups).
    pub fn inventory_mut(&mut self) -> &mut I {
        &mut self.inventory
    }

    /// Shared access to the world collaborator.
    #[must_use]
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Shared access to the event sink.
    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Evaluate a requirement against live state.
    #[must_use]
    pub fn check_requirement(&self, requirement: &Requirement) -> Evaluation {
        let no_signals = ImHashSet::new();
        let signals = self.session.as_ref().map_or(&no_signals, |s| &s.signals);
        let view = LiveView {
            inventory: &self.inventory,
            signals,
            consumed: &[],
        };
        RequirementResolver::evaluate(requirement, &view)
    }

    /// Re-evaluate every unsolved instance against live state, flipping
    /// `Locked ↔ Available` in both directions. Solved stays solved.
    pub fn refresh_all(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for instance in &mut session.instances {
            if instance.state == PuzzleState::Solved {
                continue;
            }
            let satisfied = {
                let view = LiveView {
                    inventory: &self.inventory,
                    signals: &session.signals,
                    consumed: &instance.consumed,
                };
                RequirementResolver::evaluate(&instance.requirement, &view).satisfied
            };
            match (instance.state, satisfied) {
                (PuzzleState::Locked, true) => {
                    debug!(puzzle = %instance.id(), "unlocked");
                    instance.state = PuzzleState::Available;
                }
                (PuzzleState::Available, false) => {
                    debug!(puzzle = %instance.id(), "re-locked");
                    instance.state = PuzzleState::Locked;
                }
                _ => {}
            }
        }
    }

    /// Solve an available puzzle, spawning any item reward at the
    /// default position.
    pub fn solve_puzzle(&mut self, id: &PuzzleId) -> SolveOutcome {
        self.solve_puzzle_at(id, None)
    }

    /// Solve an available puzzle, spawning any item reward at `pos`.
    pub fn solve_puzzle_at(&mut self, id: &PuzzleId, pos: Option<WorldPos>) -> SolveOutcome {
        let Some(session) = self.session.as_ref() else {
            return SolveOutcome::NoSession;
        };
        let Some(index) = session.find(id) else {
            warn!(puzzle = %id, "solve requested for unknown instance");
            return SolveOutcome::UnknownPuzzle;
        };
        match session.instances[index].state {
            PuzzleState::Solved => SolveOutcome::AlreadySolved,
            PuzzleState::Locked => {
                warn!(puzzle = %id, "solve requested while locked");
                SolveOutcome::NotAvailable
            }
            PuzzleState::Available => {
                let (solved, total) = self.complete_solve(index, pos);
                SolveOutcome::Solved { solved, total }
            }
        }
    }

    /// Route a player action through the target puzzle's behavior.
    ///
    /// Refreshes first so the action sees current unlock states; locked
    /// puzzles reject the action with the full missing-atom hint.
    pub fn handle_action(&mut self, id: &PuzzleId, action: &PlayerAction) -> ActionResult {
        if self.session.is_none() {
            return ActionResult::NoSession;
        }
        self.refresh_all();

        let held = self.inventory.list();
        let session = self.session.as_mut().expect("session checked above");
        let Some(index) = session.find(id) else {
            return ActionResult::UnknownPuzzle;
        };
        let instance = &mut session.instances[index];

        if instance.is_solved() {
            return ActionResult::AlreadySolved;
        }
        if instance.state == PuzzleState::Locked {
            let eval = {
                let view = LiveView {
                    inventory: &self.inventory,
                    signals: &session.signals,
                    consumed: &instance.consumed,
                };
                RequirementResolver::evaluate(&instance.requirement, &view)
            };
            let text = format!("Necesita: {}", eval.missing_text());
            let puzzle = instance.id().clone();
            self.events.emit(CoreEvent::HintChanged { puzzle, text });
            return ActionResult::Locked {
                missing: eval.missing,
            };
        }

        let outcome = {
            let ctx = BehaviorContext {
                held: &held,
                requirement: &instance.requirement,
                progress: &mut instance.progress,
            };
            instance.definition.behavior.respond(action, ctx)
        };

        match outcome {
            BehaviorOutcome::Solve { consume } => {
                for used in &consume {
                    self.inventory.remove_item(used);
                    instance.consumed.push(used.clone());
                }
                let (solved, total) = self.complete_solve(index, None);
                ActionResult::Solved { solved, total }
            }
            BehaviorOutcome::Progress { hint, consume } => {
                for used in &consume {
                    self.inventory.remove_item(used);
                    instance.consumed.push(used.clone());
                }
                let puzzle = instance.id().clone();
                self.events.emit(CoreEvent::HintChanged {
                    puzzle,
                    text: hint.clone(),
                });
                // Consumption may have re-locked other puzzles.
                self.refresh_all();
                ActionResult::Progress { hint }
            }
            BehaviorOutcome::Launch { minigame } => ActionResult::MinigameRequested { minigame },
            BehaviorOutcome::Reject { hint } => {
                let puzzle = instance.id().clone();
                self.events.emit(CoreEvent::HintChanged {
                    puzzle,
                    text: hint.clone(),
                });
                ActionResult::Rejected { hint }
            }
            BehaviorOutcome::Ignore => ActionResult::Ignored,
        }
    }

    /// Shared tail of every successful solve: state flip, counter,
    /// signal/reward grant, events, downstream refresh. Exactly-once per
    /// instance because callers only reach this from `Available`.
    fn complete_solve(&mut self, index: usize, pos: Option<WorldPos>) -> (u32, u32) {
        let session = self.session.as_mut().expect("caller verified session");
        let total = session.total_count();

        let instance = &mut session.instances[index];
        instance.state = PuzzleState::Solved;
        let id = instance.id().clone();
        let is_gate = instance.is_terminal_gate();
        let reward = instance.assigned_reward.clone();
        let category = instance.reward_category();
        let signal = instance.definition.emits_signal.clone();

        session.solved_count += 1;
        let solved = session.solved_count;

        if category == RewardCategory::Signal {
            if let Some(signal) = signal {
                debug!(puzzle = %id, signal = %signal, "signal set");
                session.signals.insert(signal);
            }
        }

        self.grant(&id, reward.as_ref(), category, pos);

        self.events.emit(CoreEvent::PuzzleSolved {
            puzzle: id.clone(),
            solved,
            total,
        });
        if is_gate {
            info!(puzzle = %id, "terminal gate solved, game complete");
            self.events.emit(CoreEvent::GameCompleted);
        }

        self.refresh_all();
        (solved, total)
    }

    /// Materialize a solved puzzle's assigned reward.
    fn grant(
        &mut self,
        id: &PuzzleId,
        reward: Option<&crate::rewards::RewardId>,
        category: RewardCategory,
        pos: Option<WorldPos>,
    ) {
        let Some(reward) = reward else {
            if matches!(category, RewardCategory::Item | RewardCategory::Clue) {
                warn!(puzzle = %id, "no assigned reward to grant");
            }
            return;
        };
        match reward.category() {
            RewardCategory::Item => {
                let pos = pos.unwrap_or(DEFAULT_PICKUP_POS);
                let handle = self.world.spawn_pickup(reward, pos);
                debug!(puzzle = %id, reward = %reward, ?handle, "pickup spawned");
            }
            RewardCategory::Clue => {
                debug!(puzzle = %id, reward = %reward, "clue granted");
                self.inventory.add_clue(reward.clone());
            }
            _ => {
                warn!(puzzle = %id, reward = %reward, "unrecognized reward kind");
            }
        }
    }
}
