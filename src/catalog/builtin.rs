//! The standard escape-room catalog and reward pool.
//!
//! Content data, not logic: every puzzle the room can host, with its
//! prerequisites, reward kind, tier eligibility, and behavior. The
//! reward pool holds every concrete item/clue a puzzle can be assigned.

use crate::behavior::{Behavior, CodeAnswer};
use crate::requirement::{Requirement, SignalId};
use crate::rewards::{RewardCategory, RewardId};

use super::definition::PuzzleDefinition;
use super::registry::PuzzleCatalog;

/// Signal set by the color-sequence puzzle, read by the book swap.
pub const ENABLE_BOOK_PUZZLE: &str = "Enable_Book_Puzzle";

/// Clue class accepted by the exit door as a final code.
pub const FINAL_CODE_CLASS: &str = "Clue_Codigo_Final";

/// Item class the exit door falls back to when the chain's last reward
/// is not door-compatible. The master key is reserved for the end and
/// never enters the pool, so a fallback chain may be unsolvable; the
/// generator surfaces this with a diagnostic.
pub const FALLBACK_DOOR_CLASS: &str = "Item_Llave_Maestra";

/// Every concrete reward puzzles can be assigned, consumed without
/// replacement during generation.
#[must_use]
pub fn standard_rewards() -> crate::rewards::RewardPool {
    [
        "Item_Llave_Dorada",
        "Item_Llave_Pequeña",
        "Item_Destornillador",
        "Clue_Codigo_Vent (789)",
        "Clue_Codigo_Safe (123)",
        "Clue_Riddle (Tengo ojos...)",
        "Clue_Color_Sequence (Rojo, Azul, Verde)",
        "Clue_Book_Sequence (Verde, Rojo, Violeta, Azul)",
        "Item_Linterna_UV",
        "Clue_Password_Panel (HIDDEN)",
        "Item_Diapositiva",
        "Item_Bateria",
        "Clue_Codigo_Final (DOOR456)",
        "Clue_Symbol_Key (Estrella=A...)",
        "Clue_Under_Cube (Símbolo X?)",
    ]
    .into_iter()
    .map(RewardId::new)
    .collect()
}

/// The full puzzle catalog.
#[must_use]
pub fn standard_catalog() -> PuzzleCatalog {
    let mut catalog = PuzzleCatalog::new();

    catalog.register(
        PuzzleDefinition::new("demo_holdableCube", "Cubo Azul", Behavior::Pickup)
            .with_hint("Un cubo azul pesado.")
            .with_reward(RewardCategory::Item)
            .with_fixed_reward(RewardId::new("Item_Cubo_Azul")),
    );

    catalog.register(
        PuzzleDefinition::new(
            "pressurePlate",
            "Placa de Presión",
            Behavior::UseItem { consume: true },
        )
        .with_hint("Una placa en el suelo. Parece necesitar peso.")
        .with_requirement(Requirement::item("Item_Cubo_Azul"))
        .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new(
            "demo_keyLock",
            "Cofre de Madera",
            Behavior::UseItem { consume: true },
        )
        .with_hint("Un cofre cerrado con una cerradura dorada.")
        .with_requirement(Requirement::item("Item_Llave_Dorada"))
        .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new("demo_simpleButton", "Botón de Pared", Behavior::Examine)
            .with_hint("Un simple botón rojo en la pared.")
            .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new(
            "deskDrawer",
            "Cajón del Escritorio",
            Behavior::UseItem { consume: true },
        )
        .with_hint("Un cajón en el escritorio.")
        .with_requirement(Requirement::item("Item_Llave_Pequeña"))
        .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new(
            "airVent",
            "Rejilla de Ventilación",
            Behavior::TwoStage {
                open_with: "Item_Destornillador".to_string(),
                reveal_with: "Item_Linterna_UV".to_string(),
            },
        )
        .with_hint("Una rejilla metálica en lo alto de la pared.")
        .with_requirement(
            Requirement::item("Item_Destornillador").and_item("Item_Linterna_UV"),
        )
        .with_reward(RewardCategory::Clue)
        .advanced_only(),
    );

    catalog.register(
        PuzzleDefinition::new("liftRug", "Levantar Alfombra", Behavior::Examine)
            .with_hint("Una alfombra vieja y polvorienta en el suelo.")
            .with_reward(RewardCategory::Clue),
    );

    catalog.register(
        PuzzleDefinition::new("movePicture", "Mover Cuadro", Behavior::Examine)
            .with_hint("Un cuadro que parece ligeramente torcido.")
            .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new(
            "symbolMatching",
            "Libro de Símbolos",
            Behavior::CodeEntry {
                answer: CodeAnswer::Fixed("SECRETO".to_string()),
            },
        )
        .with_hint("Un libro con símbolos extraños y un espacio para escribir.")
        .with_requirement(Requirement::clue("Clue_Symbol_Key"))
        .with_reward(RewardCategory::Clue),
    );

    catalog.register(
        PuzzleDefinition::new(
            "demo_comboLock",
            "Caja Fuerte",
            Behavior::CodeEntry {
                answer: CodeAnswer::FromClue("Clue_Codigo_Safe".to_string()),
            },
        )
        .with_hint("Una pequeña caja fuerte con un dial numérico.")
        .with_requirement(Requirement::clue("Clue_Codigo_Safe"))
        .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new("demo_2DPuzzleTrigger", "Marco de Fotos", Behavior::Examine)
            .with_hint("Un marco de fotos sencillo sobre una estantería.")
            .with_reward(RewardCategory::Clue),
    );

    catalog.register(
        PuzzleDefinition::new(
            "demo_riddle",
            "Panel de Acertijo",
            Behavior::CodeEntry {
                answer: CodeAnswer::Fixed("aguja".to_string()),
            },
        )
        .with_hint("Una placa de madera con un acertijo grabado.")
        .with_requirement(Requirement::clue("Clue_Riddle"))
        .with_reward(RewardCategory::Clue),
    );

    catalog.register(
        PuzzleDefinition::new(
            "demo_colorSequence",
            "Secuencia de Botones",
            Behavior::Minigame {
                id: "color_sequence".to_string(),
            },
        )
        .with_hint("Una serie de botones de colores en la pared.")
        .with_requirement(Requirement::clue("Clue_Color_Sequence"))
        .emitting_signal(SignalId::new(ENABLE_BOOK_PUZZLE)),
    );

    catalog.register(
        PuzzleDefinition::new(
            "bookSwap",
            "Estantería de Libros",
            Behavior::Minigame {
                id: "book_swap".to_string(),
            },
        )
        .with_hint("Libros de colores en una estantería. Parecen fuera de lugar.")
        .with_requirement(
            Requirement::clue("Clue_Book_Sequence")
                .and_signal(SignalId::new(ENABLE_BOOK_PUZZLE)),
        )
        .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new(
            "demo_uvMessage",
            "Mensaje Oculto en Pared",
            Behavior::UseItem { consume: false },
        )
        .with_hint("Una zona extraña en la pared, casi invisible.")
        .with_requirement(Requirement::item("Item_Linterna_UV"))
        .with_reward(RewardCategory::Clue),
    );

    catalog.register(
        PuzzleDefinition::new(
            "demo_passwordPanel",
            "Panel de Acceso",
            Behavior::CodeEntry {
                answer: CodeAnswer::FromClue("Clue_Password_Panel".to_string()),
            },
        )
        .with_hint("Un panel con teclado numérico o de texto.")
        .with_requirement(Requirement::clue("Clue_Password_Panel"))
        .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new(
            "wiresPuzzle",
            "Panel de Cables",
            Behavior::Minigame {
                id: "wires".to_string(),
            },
        )
        .with_hint("Un panel con cables sueltos y conectores.")
        .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new(
            "simonSays",
            "Panel Simon Says",
            Behavior::Minigame {
                id: "simon".to_string(),
            },
        )
        .with_hint("Un panel con cuatro luces de colores que parpadean.")
        .with_reward(RewardCategory::Item),
    );

    catalog.register(
        PuzzleDefinition::new(
            "projectorPuzzle",
            "Proyector Antiguo",
            Behavior::Assembly {
                parts: vec!["Item_Bateria".to_string(), "Item_Diapositiva".to_string()],
            },
        )
        .with_hint("Un viejo proyector de diapositivas.")
        .with_requirement(Requirement::item("Item_Bateria").and_item("Item_Diapositiva"))
        .with_reward(RewardCategory::Clue)
        .advanced_only(),
    );

    catalog.register(
        PuzzleDefinition::new(
            "finalKeypad",
            "Teclado Final",
            Behavior::CodeEntry {
                answer: CodeAnswer::CombinedClues(vec![
                    "Clue_Codigo_Safe".to_string(),
                    "Clue_Codigo_Vent".to_string(),
                ]),
            },
        )
        .with_hint("Un teclado numérico junto a la puerta de salida.")
        .with_requirement(
            Requirement::clue("Clue_Codigo_Safe").and_clue("Clue_Codigo_Vent"),
        )
        .with_reward(RewardCategory::Clue)
        .advanced_only(),
    );

    catalog.register(
        PuzzleDefinition::new("escapeDoor", "Puerta de Salida", Behavior::ExitDoor)
            .with_hint("La única salida. Parece necesitar una llave maestra o un código final.")
            .with_reward(RewardCategory::Victory),
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Difficulty;

    #[test]
    fn test_catalog_has_one_terminal_gate() {
        let catalog = standard_catalog();
        let gates: Vec<_> = catalog.iter().filter(|d| d.is_terminal_gate()).collect();
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].id.as_str(), "escapeDoor");
    }

    #[test]
    fn test_tier_candidate_counts() {
        let catalog = standard_catalog();
        let basic = catalog.candidates(Difficulty::Easy).count();
        let full = catalog.candidates(Difficulty::Expert).count();

        // Vent, projector and final keypad only appear at higher tiers.
        assert_eq!(full - basic, 3);
        assert_eq!(full, catalog.len() - 1);
    }

    #[test]
    fn test_signal_puzzle_defines_its_signal() {
        let catalog = standard_catalog();
        let seq = catalog
            .get(&"demo_colorSequence".into())
            .expect("color sequence registered");
        assert_eq!(
            seq.emits_signal.as_ref().map(|s| s.as_str()),
            Some(ENABLE_BOOK_PUZZLE)
        );
    }

    #[test]
    fn test_pool_has_no_master_key() {
        let pool = standard_rewards();
        assert_eq!(pool.len(), 15);
        assert!(!pool.contains_class(FALLBACK_DOOR_CLASS));
        assert!(pool.contains_class(FINAL_CODE_CLASS));
    }
}
