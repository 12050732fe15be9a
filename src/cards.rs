//! Card and symbol data model.
//!
//! Cards are read-only inputs owned by a [`CardCatalog`]. Programs never hold
//! references into the catalog; they snapshot the frames they need.

mod catalog;
mod sample;
mod schema;
mod symbols;

pub use catalog::{normalize_frames, CardCatalog};
pub use sample::sample_cards;
pub use schema::{validate_card, validate_cards, SchemaViolation};
pub use symbols::{Primitive, RenderMode, SymbolCategory, SymbolInstance, SymbolKind, SymbolMeta};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::CardId;

/// One beat of a card's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Stable id, `"<card>-f<index>"` when the source omits it.
    #[serde(default)]
    pub id: String,
    /// Frame number at which the symbols fire.
    pub index: u32,
    /// Symbols in declaration order.
    #[serde(default)]
    pub symbols: Vec<SymbolInstance>,
}

impl Frame {
    /// Create a frame.
    #[must_use]
    pub fn new(id: impl Into<String>, index: u32, symbols: Vec<SymbolInstance>) -> Self {
        Self {
            id: id.into(),
            index,
            symbols,
        }
    }
}

/// Which program slot a card is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// Turns the piece.
    Rotation,
    /// Moves the piece.
    Movement,
    /// Attacks and special effects.
    Ability,
    /// Fits any slot.
    Utility,
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardKind::Rotation => "rotation",
            CardKind::Movement => "movement",
            CardKind::Ability => "ability",
            CardKind::Utility => "utility",
        };
        f.write_str(name)
    }
}

/// A card as described by the card library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDef {
    /// Unique card id.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Intended slot.
    #[serde(alias = "cardType")]
    pub kind: CardKind,
    /// Initiative this card contributes when played.
    #[serde(default)]
    pub priority: i32,
    /// How many sixths the piece may turn when the card is played.
    #[serde(default)]
    pub rotation_allowance: u8,
    /// Damage dealt on a hit. Required on ability cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    /// Knockback multiplier on a hit. Required on ability cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knockback_factor: Option<f64>,
    /// Frame timeline, not necessarily dense or ordered.
    #[serde(default)]
    pub frames: Vec<Frame>,
    /// Rules text referenced by `TEXT_ACTIVE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_text: Option<String>,
    /// Rules text referenced by `TEXT_PASSIVE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive_text: Option<String>,
}

impl CardDef {
    /// Create a card with no rules text.
    #[must_use]
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        kind: CardKind,
        priority: i32,
        frames: Vec<Frame>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            priority,
            rotation_allowance: 0,
            damage: None,
            knockback_factor: None,
            frames,
            active_text: None,
            passive_text: None,
        }
    }

    /// Set the rotation allowance.
    #[must_use]
    pub fn with_rotation_allowance(mut self, steps: u8) -> Self {
        self.rotation_allowance = steps;
        self
    }

    /// Set the hit damage and knockback multiplier.
    #[must_use]
    pub fn with_damage(mut self, damage: u32, knockback_factor: f64) -> Self {
        self.damage = Some(damage);
        self.knockback_factor = Some(knockback_factor);
        self
    }

    /// Highest frame index on the card, or 0 for a card without frames.
    #[must_use]
    pub fn max_frame_index(&self) -> u32 {
        self.frames.iter().map(|f| f.index).max().unwrap_or(0)
    }
}
