//! Intents: everything a caller can ask the engine to do.

use serde::{Deserialize, Serialize};

use crate::game::{CardId, PlannedProgram, PlayerId};
use crate::hex::Axial;

/// A request from a caller (UI, host, test) to the engine.
///
/// Intents never fail. One that does not apply to the current round status
/// is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameIntent {
    /// Select (or clear) a board hex.
    SelectHex {
        /// Selecting player.
        player_id: PlayerId,
        /// Hex, or `None` to clear.
        hex: Option<Axial>,
    },
    /// Select (or clear) a card. Clears the selected frame.
    SelectCard {
        /// Selecting player.
        player_id: PlayerId,
        /// Card, or `None` to clear.
        card_id: Option<CardId>,
    },
    /// Select (or clear) a frame of the selected card.
    SelectFrame {
        /// Selecting player.
        player_id: PlayerId,
        /// Frame index, or `None` to clear.
        frame_index: Option<u32>,
    },
    /// Store a player's program, replacing any earlier one.
    SubmitProgram {
        /// Submitting player.
        player_id: PlayerId,
        /// The program.
        program: PlannedProgram,
    },
    /// Fix initiative order and load the first frame with any action.
    StartRound,
    /// Confirm the active step and move to the next one.
    ContinueResolution,
    /// End the round immediately.
    EndRound,
    /// Drop all programs and the log and return to planning.
    ResetRound,
    /// Reserved.
    EndTurn {
        /// Player ending their turn.
        player_id: PlayerId,
    },
}

impl GameIntent {
    /// Wire name of the intent, e.g. `"START_ROUND"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            GameIntent::SelectHex { .. } => "SELECT_HEX",
            GameIntent::SelectCard { .. } => "SELECT_CARD",
            GameIntent::SelectFrame { .. } => "SELECT_FRAME",
            GameIntent::SubmitProgram { .. } => "SUBMIT_PROGRAM",
            GameIntent::StartRound => "START_ROUND",
            GameIntent::ContinueResolution => "CONTINUE_RESOLUTION",
            GameIntent::EndRound => "END_ROUND",
            GameIntent::ResetRound => "RESET_ROUND",
            GameIntent::EndTurn { .. } => "END_TURN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_intent_wire_format() {
        let json = serde_json::to_string(&GameIntent::ContinueResolution).unwrap();
        assert_eq!(json, r#"{"type":"CONTINUE_RESOLUTION"}"#);
        let back: GameIntent = serde_json::from_str(r#"{"type":"START_ROUND"}"#).unwrap();
        assert_eq!(back, GameIntent::StartRound);
    }

    #[test]
    fn test_field_intent_wire_format() {
        let intent: GameIntent =
            serde_json::from_str(r#"{"type":"SELECT_FRAME","playerId":"p1","frameIndex":2}"#).unwrap();
        assert_eq!(
            intent,
            GameIntent::SelectFrame {
                player_id: "p1".into(),
                frame_index: Some(2),
            }
        );
        assert_eq!(intent.name(), "SELECT_FRAME");
    }

    #[test]
    fn test_submit_program_wire_format() {
        let intent = GameIntent::SubmitProgram {
            player_id: "p1".into(),
            program: PlannedProgram::empty("p1"),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["type"], "SUBMIT_PROGRAM");
        assert_eq!(json["program"]["playerId"], "p1");
    }
}
