//! Chain generator integration tests.
//!
//! These exercise the generator's core guarantee: every committed chain
//! is completable in order, whatever the seed, and every degenerate
//! condition surfaces as a diagnostic instead of a crash.

use escape_core::behavior::Behavior;
use escape_core::catalog::{
    standard_catalog, standard_rewards, PuzzleCatalog, PuzzleDefinition,
};
use escape_core::core::{Difficulty, GameRng};
use escape_core::generate::{ChainGenerator, Diagnostic, Generation};
use escape_core::requirement::{Requirement, RequirementResolver, SimulatedState};
use escape_core::rewards::{RewardCategory, RewardId, RewardPool};

/// Replay a generated chain through a fresh accumulator: every step must
/// have been satisfiable at the moment it was appended.
fn assert_chain_solvable(generation: &Generation) {
    let mut sim = SimulatedState::new();
    for instance in generation.chain() {
        let eval = RequirementResolver::evaluate(&instance.requirement, &sim);
        assert!(
            eval.satisfied,
            "{} appended while missing {}",
            instance.id(),
            eval.missing_text()
        );
        if let Some(reward) = &instance.assigned_reward {
            sim.grant_class(reward.class());
        }
        if let Some(signal) = &instance.definition.emits_signal {
            sim.set_signal(signal.clone());
        }
    }
}

#[test]
fn solvability_holds_across_seeds_and_tiers() {
    let catalog = standard_catalog();
    let generator = ChainGenerator::new(&catalog);

    for seed in 0..200 {
        let mut rng = GameRng::new(seed);
        for tier in [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ] {
            let generation = generator.generate(tier, standard_rewards(), &mut rng);
            assert_chain_solvable(&generation);

            // Terminal gate present and last, exactly once.
            let gates = generation
                .instances
                .iter()
                .filter(|i| i.is_terminal_gate())
                .count();
            assert_eq!(gates, 1);
            assert!(generation.instances.last().unwrap().is_terminal_gate());
        }
    }
}

#[test]
fn rewards_are_never_assigned_twice() {
    let catalog = standard_catalog();
    let generator = ChainGenerator::new(&catalog);

    for seed in 0..100 {
        let mut rng = GameRng::new(seed);
        let generation = generator.generate(Difficulty::Expert, standard_rewards(), &mut rng);

        let mut assigned: Vec<&str> = generation
            .instances
            .iter()
            .filter_map(|i| i.assigned_reward.as_ref())
            .map(|r| r.as_str())
            .collect();
        let total = assigned.len();
        assigned.sort_unstable();
        assigned.dedup();
        assert_eq!(assigned.len(), total, "duplicate assignment at seed {seed}");
    }
}

#[test]
fn fixed_seed_reproduces_the_chain() {
    let catalog = standard_catalog();
    let generator = ChainGenerator::new(&catalog);

    for seed in [0, 1, 42, 0xDEAD_BEEF] {
        let mut rng1 = GameRng::new(seed);
        let mut rng2 = GameRng::new(seed);
        let gen1 = generator.generate(Difficulty::Hard, standard_rewards(), &mut rng1);
        let gen2 = generator.generate(Difficulty::Hard, standard_rewards(), &mut rng2);

        assert_eq!(gen1.instances, gen2.instances);
        assert_eq!(gen1.diagnostics, gen2.diagnostics);
        assert_eq!(gen1.unused_pool, gen2.unused_pool);
    }
}

/// Five-puzzle catalog where one puzzle hands out the key another needs:
/// a two-puzzle chain must contain both, granter strictly first.
#[test]
fn key_granting_puzzle_orders_before_key_requiring() {
    let mut catalog = PuzzleCatalog::new();
    catalog.register(
        PuzzleDefinition::new("keySource", "Fuente", Behavior::Examine)
            .with_reward(RewardCategory::Item),
    );
    catalog.register(
        PuzzleDefinition::new("keySink", "Destino", Behavior::UseItem { consume: true })
            .with_requirement(Requirement::item("Item_Key"))
            .with_reward(RewardCategory::None),
    );
    for id in ["lockedA", "lockedB", "lockedC"] {
        catalog.register(
            PuzzleDefinition::new(id, id, Behavior::Examine)
                .with_requirement(Requirement::clue(format!("Clue_{id}")))
                .with_reward(RewardCategory::None),
        );
    }
    catalog.register(
        PuzzleDefinition::new("door", "Puerta", Behavior::ExitDoor)
            .with_reward(RewardCategory::Victory),
    );

    let generator = ChainGenerator::new(&catalog);
    for seed in 0..20 {
        let mut rng = GameRng::new(seed);
        let pool = RewardPool::new([RewardId::new("Item_Key_Gold")]);
        let generation = generator.generate_with_target(Difficulty::Easy, 2, pool, &mut rng);

        let ids: Vec<&str> = generation.chain().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["keySource", "keySink"]);
        assert_chain_solvable(&generation);
    }
}

/// One item and one clue in the pool, three reward-hungry puzzles: the
/// third proceeds rewardless with a pool-exhausted diagnostic.
#[test]
fn pool_exhaustion_leaves_third_puzzle_rewardless() {
    let mut catalog = PuzzleCatalog::new();
    for id in ["first", "second", "third"] {
        catalog.register(
            PuzzleDefinition::new(id, id, Behavior::Examine).with_reward(RewardCategory::Item),
        );
    }
    catalog.register(
        PuzzleDefinition::new("door", "Puerta", Behavior::ExitDoor)
            .with_reward(RewardCategory::Victory),
    );

    let pool = RewardPool::new([
        RewardId::new("Item_Llave_Dorada"),
        RewardId::new("Clue_Riddle (Tengo ojos...)"),
    ]);
    let generator = ChainGenerator::new(&catalog);
    let mut rng = GameRng::new(21);
    let generation = generator.generate_with_target(Difficulty::Easy, 3, pool, &mut rng);

    assert_eq!(generation.chain().len(), 3);
    let rewardless: Vec<_> = generation
        .chain()
        .iter()
        .filter(|i| i.assigned_reward.is_none())
        .collect();
    assert_eq!(rewardless.len(), 1);
    assert!(generation
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::RewardPoolExhausted { .. })));
    assert!(generation.unused_pool.is_empty());
}

/// A plain clue as the chain's final reward cannot open the door: the
/// gate falls back to the master key class and says so.
#[test]
fn non_door_compatible_final_reward_falls_back() {
    let mut catalog = PuzzleCatalog::new();
    catalog.register(
        PuzzleDefinition::new("only", "Único", Behavior::Examine)
            .with_reward(RewardCategory::Clue),
    );
    catalog.register(
        PuzzleDefinition::new("door", "Puerta", Behavior::ExitDoor)
            .with_reward(RewardCategory::Victory),
    );

    let pool = RewardPool::new([RewardId::new("Clue_Foo (bar)")]);
    let generator = ChainGenerator::new(&catalog);
    let mut rng = GameRng::new(1);
    let generation = generator.generate_with_target(Difficulty::Easy, 1, pool, &mut rng);

    let gate = generation.instances.last().unwrap();
    assert_eq!(gate.requirement, Requirement::item("Item_Llave_Maestra"));

    let diag = generation
        .diagnostics
        .iter()
        .find(|d| matches!(d, Diagnostic::TerminalGateMisconfigured { .. }))
        .expect("misconfiguration diagnostic");
    let Diagnostic::TerminalGateMisconfigured {
        last_reward,
        fallback,
    } = diag
    else {
        unreachable!()
    };
    assert_eq!(last_reward.as_deref(), Some("Clue_Foo (bar)"));
    assert_eq!(fallback, "Item_Llave_Maestra");
}

/// An item as the final reward is door-compatible: the gate requires its
/// class and no diagnostic is raised.
#[test]
fn item_final_reward_becomes_the_door_requirement() {
    let mut catalog = PuzzleCatalog::new();
    catalog.register(
        PuzzleDefinition::new("only", "Único", Behavior::Examine)
            .with_reward(RewardCategory::Item),
    );
    catalog.register(
        PuzzleDefinition::new("door", "Puerta", Behavior::ExitDoor)
            .with_reward(RewardCategory::Victory),
    );

    let pool = RewardPool::new([RewardId::new("Item_Llave_Dorada")]);
    let generator = ChainGenerator::new(&catalog);
    let mut rng = GameRng::new(1);
    let generation = generator.generate_with_target(Difficulty::Easy, 1, pool, &mut rng);

    let gate = generation.instances.last().unwrap();
    assert_eq!(gate.requirement, Requirement::item("Item_Llave_Dorada"));
    assert!(generation.diagnostics.is_empty());
}

#[test]
fn oversized_target_clamps_with_diagnostic() {
    let mut catalog = PuzzleCatalog::new();
    catalog.register(
        PuzzleDefinition::new("only", "Único", Behavior::Examine)
            .with_reward(RewardCategory::Item),
    );
    catalog.register(
        PuzzleDefinition::new("door", "Puerta", Behavior::ExitDoor)
            .with_reward(RewardCategory::Victory),
    );

    let pool = RewardPool::new([RewardId::new("Item_Llave_Dorada")]);
    let generator = ChainGenerator::new(&catalog);
    let mut rng = GameRng::new(1);
    let generation = generator.generate_with_target(Difficulty::Easy, 10, pool, &mut rng);

    assert_eq!(generation.chain().len(), 1);
    assert!(generation.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::TargetClamped {
            requested: 10,
            available: 1
        }
    )));
}

/// Advanced-only puzzles never enter chains below Hard.
#[test]
fn restricted_puzzles_stay_out_of_lower_tiers() {
    let catalog = standard_catalog();
    let generator = ChainGenerator::new(&catalog);
    let restricted = ["airVent", "projectorPuzzle", "finalKeypad"];

    for seed in 0..50 {
        let mut rng = GameRng::new(seed);
        for tier in [Difficulty::Easy, Difficulty::Medium] {
            let generation = generator.generate(tier, standard_rewards(), &mut rng);
            for instance in generation.chain() {
                assert!(
                    !restricted.contains(&instance.id().as_str()),
                    "{} appeared at {tier:?}",
                    instance.id()
                );
            }
        }
    }
}
