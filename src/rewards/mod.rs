//! Concrete rewards and the consumable pool they are drawn from.
//!
//! Reward identifiers follow the game's content format: a class name
//! optionally followed by a parenthesized payload, e.g.
//! `Clue_Codigo_Safe (123)`. Requirements match on the class; behaviors
//! read the payload.

mod id;
mod pool;

pub use id::{RewardCategory, RewardId};
pub use pool::RewardPool;
