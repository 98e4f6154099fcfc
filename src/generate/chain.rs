//! Greedy randomized forward construction of a solvable puzzle chain.
//!
//! The generator walks the eligible catalog keeping a simulation
//! accumulator of every reward class and signal granted so far. A puzzle
//! is only appended while its requirement is satisfiable against that
//! accumulator, so the committed chain is completable in the generated
//! order before the player ever sees it.

use tracing::{debug, error, warn};

use crate::catalog::{PuzzleCatalog, FALLBACK_DOOR_CLASS, FINAL_CODE_CLASS};
use crate::core::{Difficulty, GameRng};
use crate::requirement::{Requirement, RequirementResolver, SimulatedState};
use crate::rewards::{RewardCategory, RewardId, RewardPool};
use crate::session::PuzzleInstance;

use super::diagnostics::Diagnostic;

/// Attempts allowed per requested puzzle. Termination backstop, not a
/// correctness requirement.
const MAX_ATTEMPTS_FACTOR: usize = 3;

/// Result of a generation run.
///
/// `instances` is the committed chain (terminal gate last, all locked);
/// `unused_pool` is whatever was not assigned; `diagnostics` records
/// every degenerate condition hit along the way.
#[derive(Clone, Debug)]
pub struct Generation {
    pub instances: Vec<PuzzleInstance>,
    pub unused_pool: RewardPool,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    /// The chain without the terminal gate.
    #[must_use]
    pub fn chain(&self) -> &[PuzzleInstance] {
        match self.instances.split_last() {
            Some((last, rest)) if last.is_terminal_gate() => rest,
            _ => &self.instances,
        }
    }
}

/// Builds solvable chains from a catalog.
pub struct ChainGenerator<'a> {
    catalog: &'a PuzzleCatalog,
}

impl<'a> ChainGenerator<'a> {
    /// Create a generator over the given catalog.
    #[must_use]
    pub fn new(catalog: &'a PuzzleCatalog) -> Self {
        Self { catalog }
    }

    /// Generate a chain for `tier`, assigning rewards from `pool`.
    ///
    /// The target count comes from the tier. Candidate picks and pool
    /// draws are uniform over `rng`; a fixed seed reproduces the chain
    /// exactly.
    pub fn generate(&self, tier: Difficulty, pool: RewardPool, rng: &mut GameRng) -> Generation {
        let eligible = self.catalog.candidates(tier).count();
        self.generate_with_target(tier, tier.target_count(eligible), pool, rng)
    }

    /// Generate a chain of up to `requested` puzzles eligible at `tier`.
    pub fn generate_with_target(
        &self,
        tier: Difficulty,
        requested: usize,
        mut pool: RewardPool,
        rng: &mut GameRng,
    ) -> Generation {
        let mut diagnostics = Vec::new();

        let mut remaining: Vec<_> = self.catalog.candidates(tier).collect();
        let target = if requested > remaining.len() {
            warn!(requested, available = remaining.len(), "clamping target count");
            diagnostics.push(Diagnostic::TargetClamped {
                requested,
                available: remaining.len(),
            });
            remaining.len()
        } else {
            requested
        };

        let mut sim = SimulatedState::new();
        let mut instances: Vec<PuzzleInstance> = Vec::with_capacity(target + 1);
        let max_attempts = target * MAX_ATTEMPTS_FACTOR;
        let mut attempts = 0;

        while instances.len() < target && !remaining.is_empty() && attempts < max_attempts {
            attempts += 1;

            let satisfiable: Vec<usize> = remaining
                .iter()
                .enumerate()
                .filter(|(_, d)| {
                    RequirementResolver::evaluate(&d.requirement, &sim).satisfied
                })
                .map(|(i, _)| i)
                .collect();

            if satisfiable.is_empty() {
                let diag = Diagnostic::GenerationStuck {
                    built: instances.len(),
                    requested: target,
                    accumulated: sim.snapshot(),
                    remaining: remaining.iter().map(|d| d.id.to_string()).collect(),
                };
                error!(%diag, "chain generation stuck");
                diagnostics.push(diag);
                break;
            }

            let index = satisfiable[rng.pick_index(satisfiable.len())];
            let definition = remaining.remove(index);
            let assigned = Self::assign_reward(definition, &mut pool, &mut sim, rng, &mut diagnostics);

            debug!(
                puzzle = %definition.id,
                reward = assigned.as_ref().map(RewardId::as_str),
                "appended to chain"
            );
            instances.push(PuzzleInstance::from_definition(definition, assigned));
        }

        if let Some(gate) = self.catalog.terminal_gate() {
            let requirement = Self::gate_requirement(&instances, &mut diagnostics);
            let mut gate_instance = PuzzleInstance::from_definition(gate, None);
            gate_instance.requirement = requirement;
            instances.push(gate_instance);
        }

        Generation {
            instances,
            unused_pool: pool,
            diagnostics,
        }
    }

    /// Assign a reward to a freshly appended puzzle and feed the
    /// simulation accumulator. Classes go into the accumulator, never
    /// concrete instances.
    fn assign_reward(
        definition: &crate::catalog::PuzzleDefinition,
        pool: &mut RewardPool,
        sim: &mut SimulatedState,
        rng: &mut GameRng,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<RewardId> {
        if let Some(fixed) = &definition.fixed_reward {
            sim.grant_class(fixed.class());
            return Some(fixed.clone());
        }

        match definition.reward {
            RewardCategory::Item | RewardCategory::Clue => match pool.draw(rng) {
                Some(reward) => {
                    sim.grant_class(reward.class());
                    Some(reward)
                }
                None => {
                    warn!(puzzle = %definition.id, "reward pool exhausted");
                    diagnostics.push(Diagnostic::RewardPoolExhausted {
                        puzzle: definition.id.to_string(),
                    });
                    None
                }
            },
            RewardCategory::Signal => {
                if let Some(signal) = &definition.emits_signal {
                    sim.set_signal(signal.clone());
                }
                None
            }
            RewardCategory::Victory | RewardCategory::None => None,
        }
    }

    /// Fix the terminal gate's requirement to the chain's final reward,
    /// or fall back when that reward cannot open a door.
    fn gate_requirement(
        instances: &[PuzzleInstance],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Requirement {
        let last_reward = instances.last().and_then(|i| i.assigned_reward.clone());

        match &last_reward {
            Some(r) if r.category() == RewardCategory::Item => Requirement::item(r.class()),
            Some(r) if r.matches_class(FINAL_CODE_CLASS) => Requirement::clue(r.class()),
            _ => {
                let diag = Diagnostic::TerminalGateMisconfigured {
                    last_reward: last_reward.map(|r| r.as_str().to_string()),
                    fallback: FALLBACK_DOOR_CLASS.to_string(),
                };
                warn!(%diag, "terminal gate falling back to default requirement");
                diagnostics.push(diag);
                Requirement::item(FALLBACK_DOOR_CLASS)
            }
        }
    }
}
