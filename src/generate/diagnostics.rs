//! Structured generation diagnostics.
//!
//! Every degenerate condition during chain assembly is recoverable: the
//! generator keeps what it built, records one of these, and the caller
//! decides whether to retry with another seed or accept the result. None
//! of them abort the process.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recoverable condition observed during chain generation.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Diagnostic {
    /// No remaining candidate was satisfiable; the chain is shorter than
    /// requested. Carries the accumulator and pool snapshots for replay.
    #[error(
        "chain generation stuck at {built}/{requested}: no satisfiable candidate \
         (accumulated: [{}], remaining: [{}])",
        .accumulated.join(", "),
        .remaining.join(", ")
    )]
    GenerationStuck {
        built: usize,
        requested: usize,
        accumulated: Vec<String>,
        remaining: Vec<String>,
    },

    /// A puzzle meant to grant a tangible reward found the pool empty and
    /// proceeds rewardless. A later puzzle may become unreachable.
    #[error("reward pool exhausted: no reward left to assign to {puzzle}")]
    RewardPoolExhausted { puzzle: String },

    /// The chain's last reward is not door-compatible; the exit falls
    /// back to a fixed item class that may never have been assigned.
    #[error(
        "terminal gate misconfigured: last reward {last_reward:?} is not door-compatible, \
         falling back to {fallback}"
    )]
    TerminalGateMisconfigured {
        last_reward: Option<String>,
        fallback: String,
    },

    /// Requested more puzzles than the eligible catalog holds.
    #[error("requested {requested} puzzles but only {available} eligible; clamped")]
    TargetClamped { requested: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_context() {
        let diag = Diagnostic::GenerationStuck {
            built: 2,
            requested: 4,
            accumulated: vec!["Item_Llave_Dorada".to_string()],
            remaining: vec!["demo_comboLock".to_string()],
        };
        let text = diag.to_string();
        assert!(text.contains("2/4"));
        assert!(text.contains("Item_Llave_Dorada"));
        assert!(text.contains("demo_comboLock"));
    }

    #[test]
    fn test_serialization() {
        let diag = Diagnostic::RewardPoolExhausted {
            puzzle: "wiresPuzzle".to_string(),
        };
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(diag, back);
    }
}
