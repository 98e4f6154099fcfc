//! Chain generation: assembling a solvable puzzle sequence.

mod chain;
mod diagnostics;

pub use chain::{ChainGenerator, Generation};
pub use diagnostics::Diagnostic;
