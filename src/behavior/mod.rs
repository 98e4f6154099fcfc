//! Per-puzzle interaction behaviors.
//!
//! Each puzzle kind reacts differently to the three player actions the
//! core processes: interacting in the world (possibly with a selected
//! inventory item), submitting text into a code modal, and finishing an
//! external minigame. A [`Behavior`] turns an action into a
//! [`BehaviorOutcome`]; only [`BehaviorOutcome::Solve`] reaches the
//! session state machine.
//!
//! Behaviors never touch the world or the inventory themselves — they
//! report which held identifiers to consume and the engine applies it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::requirement::Requirement;
use crate::rewards::RewardId;

/// Progress key marking a two-stage puzzle as opened.
const KEY_OPENED: &str = "opened";

/// A discrete player action routed into the core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Interact with the puzzle object, optionally with a selected item.
    Interact { selected: Option<String> },
    /// Submit text into the puzzle's code modal.
    Submit { input: String },
    /// An external minigame finished.
    MinigameResult { success: bool },
}

impl PlayerAction {
    /// Plain interaction with nothing selected.
    #[must_use]
    pub fn interact() -> Self {
        PlayerAction::Interact { selected: None }
    }

    /// Interaction with a selected inventory item.
    #[must_use]
    pub fn use_item(selected: impl Into<String>) -> Self {
        PlayerAction::Interact {
            selected: Some(selected.into()),
        }
    }

    /// Code submission.
    #[must_use]
    pub fn submit(input: impl Into<String>) -> Self {
        PlayerAction::Submit {
            input: input.into(),
        }
    }
}

/// Where a code puzzle's expected answer comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeAnswer {
    /// Fixed answer baked into the puzzle.
    Fixed(String),
    /// Answer read from the payload of a held clue of this class.
    FromClue(String),
    /// Payloads of several held clues, concatenated in listed order.
    CombinedClues(Vec<String>),
}

/// How a puzzle responds to player actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Solves on first interaction (rug, picture, photo frame, button).
    Examine,
    /// Holdable object; solves on pickup.
    Pickup,
    /// Solve by applying the required item; optionally consumes it.
    UseItem { consume: bool },
    /// Open with one item (consumed), then reveal with another.
    TwoStage { open_with: String, reveal_with: String },
    /// Insert every listed part (each consumed), any order.
    Assembly { parts: Vec<String> },
    /// Modal code entry.
    CodeEntry { answer: CodeAnswer },
    /// External minigame; the core only sees success/failure.
    Minigame { id: String },
    /// The terminal gate; opens with the configured reward class.
    ExitDoor,
}

/// What a behavior decided about an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BehaviorOutcome {
    /// Puzzle solved; consume these held identifiers.
    Solve { consume: Vec<String> },
    /// Step accepted but puzzle not finished; consume and show hint.
    Progress { hint: String, consume: Vec<String> },
    /// Launch the named external minigame.
    Launch { minigame: String },
    /// Action refused; show hint.
    Reject { hint: String },
    /// Action is meaningless for this behavior.
    Ignore,
}

/// Read/write view a behavior gets while responding.
pub struct BehaviorContext<'a> {
    /// Snapshot of held reward identifiers.
    pub held: &'a [RewardId],
    /// The instance's (possibly post-configured) requirement.
    pub requirement: &'a Requirement,
    /// Instance-local scratch state for multi-step behaviors.
    pub progress: &'a mut FxHashMap<String, i64>,
}

impl Behavior {
    /// Respond to a player action.
    pub fn respond(&self, action: &PlayerAction, ctx: BehaviorContext<'_>) -> BehaviorOutcome {
        match self {
            Behavior::Examine | Behavior::Pickup => match action {
                PlayerAction::Interact { .. } => BehaviorOutcome::Solve { consume: vec![] },
                _ => BehaviorOutcome::Ignore,
            },

            Behavior::UseItem { consume } => Self::respond_use_item(action, &ctx, *consume),

            Behavior::TwoStage {
                open_with,
                reveal_with,
            } => Self::respond_two_stage(action, ctx, open_with, reveal_with),

            Behavior::Assembly { parts } => Self::respond_assembly(action, ctx, parts),

            Behavior::CodeEntry { answer } => Self::respond_code_entry(action, &ctx, answer),

            Behavior::Minigame { id } => match action {
                PlayerAction::Interact { .. } => BehaviorOutcome::Launch {
                    minigame: id.clone(),
                },
                PlayerAction::MinigameResult { success: true } => {
                    BehaviorOutcome::Solve { consume: vec![] }
                }
                PlayerAction::MinigameResult { success: false } => BehaviorOutcome::Reject {
                    hint: "Inténtalo de nuevo.".to_string(),
                },
                PlayerAction::Submit { .. } => BehaviorOutcome::Ignore,
            },

            Behavior::ExitDoor => Self::respond_exit_door(action, &ctx),
        }
    }

    fn respond_use_item(
        action: &PlayerAction,
        ctx: &BehaviorContext<'_>,
        consume: bool,
    ) -> BehaviorOutcome {
        let PlayerAction::Interact { selected } = action else {
            return BehaviorOutcome::Ignore;
        };
        let Some(class) = ctx.requirement.first_item_class() else {
            // No item to apply: degenerate to examine.
            return BehaviorOutcome::Solve { consume: vec![] };
        };

        match selected {
            Some(s) if s.starts_with(class) => BehaviorOutcome::Solve {
                consume: if consume { vec![s.clone()] } else { vec![] },
            },
            _ if held_with_class(ctx.held, class).is_some() => BehaviorOutcome::Reject {
                hint: format!("Necesitas seleccionar {class} del inventario."),
            },
            _ => BehaviorOutcome::Reject {
                hint: format!("Necesita {class}."),
            },
        }
    }

    fn respond_two_stage(
        action: &PlayerAction,
        ctx: BehaviorContext<'_>,
        open_with: &str,
        reveal_with: &str,
    ) -> BehaviorOutcome {
        let PlayerAction::Interact { selected } = action else {
            return BehaviorOutcome::Ignore;
        };
        let opened = ctx.progress.get(KEY_OPENED).copied().unwrap_or(0) != 0;

        if !opened {
            match selected {
                Some(s) if s.starts_with(open_with) => {
                    ctx.progress.insert(KEY_OPENED.to_string(), 1);
                    BehaviorOutcome::Progress {
                        hint: format!("Abierto, pero dentro está oscuro. Necesita {reveal_with}."),
                        consume: vec![s.clone()],
                    }
                }
                _ => BehaviorOutcome::Reject {
                    hint: format!("Necesita {open_with}."),
                },
            }
        } else {
            match selected {
                Some(s) if s.starts_with(reveal_with) => {
                    BehaviorOutcome::Solve { consume: vec![] }
                }
                _ => BehaviorOutcome::Reject {
                    hint: "Está muy oscuro ahí dentro.".to_string(),
                },
            }
        }
    }

    fn respond_assembly(
        action: &PlayerAction,
        ctx: BehaviorContext<'_>,
        parts: &[String],
    ) -> BehaviorOutcome {
        let PlayerAction::Interact { selected } = action else {
            return BehaviorOutcome::Ignore;
        };

        let missing = |progress: &FxHashMap<String, i64>| -> Vec<&String> {
            parts
                .iter()
                .filter(|p| progress.get(p.as_str()).copied().unwrap_or(0) == 0)
                .collect()
        };

        match selected {
            Some(s) => {
                let Some(part) = parts.iter().find(|p| s.starts_with(p.as_str())) else {
                    return BehaviorOutcome::Reject {
                        hint: format!("No puedes usar {s} aquí."),
                    };
                };
                if ctx.progress.get(part.as_str()).copied().unwrap_or(0) != 0 {
                    return BehaviorOutcome::Reject {
                        hint: format!("Ya tiene {part}."),
                    };
                }
                ctx.progress.insert(part.clone(), 1);
                let still_missing = missing(ctx.progress);
                if still_missing.is_empty() {
                    BehaviorOutcome::Solve {
                        consume: vec![s.clone()],
                    }
                } else {
                    BehaviorOutcome::Progress {
                        hint: format!(
                            "Falta: {}",
                            still_missing
                                .iter()
                                .map(|p| p.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                        consume: vec![s.clone()],
                    }
                }
            }
            None => {
                let still_missing = missing(ctx.progress);
                BehaviorOutcome::Reject {
                    hint: format!(
                        "Le falta: {}",
                        still_missing
                            .iter()
                            .map(|p| p.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                }
            }
        }
    }

    fn respond_code_entry(
        action: &PlayerAction,
        ctx: &BehaviorContext<'_>,
        answer: &CodeAnswer,
    ) -> BehaviorOutcome {
        match action {
            PlayerAction::Interact { .. } => BehaviorOutcome::Progress {
                hint: "Introduce el código.".to_string(),
                consume: vec![],
            },
            PlayerAction::Submit { input } => {
                let expected = match Self::expected_code(ctx, answer) {
                    Ok(code) => code,
                    Err(hint) => return BehaviorOutcome::Reject { hint },
                };
                if input.trim().eq_ignore_ascii_case(expected.trim()) {
                    BehaviorOutcome::Solve { consume: vec![] }
                } else {
                    BehaviorOutcome::Reject {
                        hint: "Código incorrecto.".to_string(),
                    }
                }
            }
            PlayerAction::MinigameResult { .. } => BehaviorOutcome::Ignore,
        }
    }

    fn expected_code(ctx: &BehaviorContext<'_>, answer: &CodeAnswer) -> Result<String, String> {
        match answer {
            CodeAnswer::Fixed(code) => Ok(code.clone()),
            CodeAnswer::FromClue(class) => clue_payload(ctx.held, class),
            CodeAnswer::CombinedClues(classes) => {
                let mut combined = String::new();
                for class in classes {
                    combined.push_str(&clue_payload(ctx.held, class)?);
                }
                Ok(combined)
            }
        }
    }

    fn respond_exit_door(action: &PlayerAction, ctx: &BehaviorContext<'_>) -> BehaviorOutcome {
        let PlayerAction::Interact { selected } = action else {
            return BehaviorOutcome::Ignore;
        };

        if let Some(class) = ctx.requirement.first_item_class() {
            return match selected {
                Some(s) if s.starts_with(class) => BehaviorOutcome::Solve {
                    consume: vec![s.clone()],
                },
                _ if held_with_class(ctx.held, class).is_some() => BehaviorOutcome::Reject {
                    hint: format!("Selecciona la {class} para usarla aquí."),
                },
                _ => BehaviorOutcome::Reject {
                    hint: format!("La puerta necesita: {class}."),
                },
            };
        }
        if let Some(class) = ctx.requirement.first_clue_class() {
            return match held_with_class(ctx.held, class) {
                Some(clue) => BehaviorOutcome::Solve {
                    consume: vec![clue.as_str().to_string()],
                },
                None => BehaviorOutcome::Reject {
                    hint: format!("La puerta necesita la pista: {class}."),
                },
            };
        }
        BehaviorOutcome::Reject {
            hint: "La puerta no sabe qué necesita.".to_string(),
        }
    }
}

fn held_with_class<'a>(held: &'a [RewardId], class: &str) -> Option<&'a RewardId> {
    held.iter().find(|r| r.matches_class(class))
}

fn clue_payload(held: &[RewardId], class: &str) -> Result<String, String> {
    let Some(clue) = held_with_class(held, class) else {
        return Err(format!("Falta la pista {class}."));
    };
    clue.payload()
        .map(ToString::to_string)
        .ok_or_else(|| format!("No se pudo leer el código de {clue}."))
}
