//! Core primitives: deterministic RNG and difficulty tiers.

mod difficulty;
mod rng;

pub use difficulty::{Difficulty, Eligibility};
pub use rng::GameRng;
