//! Seated players.

use serde::{Deserialize, Serialize};

use crate::game::{CardId, CharacterId};

/// Unique identifier for a player, supplied by the lobby.
pub type PlayerId = String;

/// State for a single seated player.
///
/// Seat order is the player's position in [`GameState::players`](crate::game::GameState),
/// which is also the initiative tie-break order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Cards in hand.
    #[serde(default)]
    pub hand: Vec<CardId>,
    /// Characters this player controls.
    #[serde(default)]
    pub characters: Vec<CharacterId>,
}

impl PlayerState {
    /// Create a player with an empty hand and no characters.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hand: Vec::new(),
            characters: Vec::new(),
        }
    }

    /// Display label: the name, or the id when the name is blank.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = PlayerState::new("p1", "Ada");
        assert_eq!(player.id, "p1");
        assert_eq!(player.label(), "Ada");
        assert!(player.hand.is_empty());
        assert!(player.characters.is_empty());
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let player = PlayerState::new("p2", "");
        assert_eq!(player.label(), "p2");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let player: PlayerState = serde_json::from_str(r#"{"id": "p3"}"#).unwrap();
        assert_eq!(player, PlayerState::new("p3", ""));
    }
}
