//! Programs: each player's committed card selection for a round.
//!
//! A program holds up to one card per [`Slot`]. Cards are captured as
//! [`ProgramCardRef`] snapshots, so edits to the catalog after submission
//! cannot reach a round that is already running.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::cards::{CardCatalog, CardDef, CardKind, Frame};
use crate::error::ProgramError;
use crate::game::PlayerId;

/// Unique identifier for a card.
pub type CardId = String;

/// Initiative weight of a single card.
pub type Initiative = i32;

/// A program slot. Declaration order is resolution order within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Rotation card, resolves first.
    Rotation,
    /// Movement card, resolves second.
    Movement,
    /// Ability card, resolves last.
    Ability,
}

impl Slot {
    /// Slots in resolution order.
    pub const ORDER: [Slot; 3] = [Slot::Rotation, Slot::Movement, Slot::Ability];

    /// Check whether a card of `kind` may occupy this slot.
    #[must_use]
    pub const fn accepts(self, kind: CardKind) -> bool {
        matches!(
            (self, kind),
            (_, CardKind::Utility)
                | (Slot::Rotation, CardKind::Rotation)
                | (Slot::Movement, CardKind::Movement)
                | (Slot::Ability, CardKind::Ability)
        )
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Rotation => "rotation",
            Slot::Movement => "movement",
            Slot::Ability => "ability",
        };
        f.write_str(name)
    }
}

/// Snapshot of a chosen card: its id, initiative and frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCardRef {
    /// Card this snapshot was taken from.
    pub card_id: CardId,
    /// Initiative contribution.
    #[serde(default)]
    pub initiative: Initiative,
    /// Frame timeline as it was at submission time.
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl ProgramCardRef {
    /// Copy a card's frames, using its printed priority as initiative.
    #[must_use]
    pub fn snapshot(card: &CardDef) -> Self {
        Self {
            card_id: card.id.clone(),
            initiative: card.priority,
            frames: card.frames.clone(),
        }
    }

    /// Override the initiative contribution.
    #[must_use]
    pub fn with_initiative(mut self, initiative: Initiative) -> Self {
        self.initiative = initiative;
        self
    }

    /// Frames firing at `frame_index`, in declaration order.
    pub fn frames_at(&self, frame_index: u32) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(move |f| f.index == frame_index)
    }

    /// Highest frame index, or 0 when there are no frames.
    #[must_use]
    pub fn max_frame_index(&self) -> u32 {
        self.frames.iter().map(|f| f.index).max().unwrap_or(0)
    }
}

/// The three slots of a program. Any subset may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramCards {
    /// Rotation slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<ProgramCardRef>,
    /// Movement slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<ProgramCardRef>,
    /// Ability slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<ProgramCardRef>,
}

impl ProgramCards {
    /// Card in a slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&ProgramCardRef> {
        match slot {
            Slot::Rotation => self.rotation.as_ref(),
            Slot::Movement => self.movement.as_ref(),
            Slot::Ability => self.ability.as_ref(),
        }
    }

    /// Replace the card in a slot.
    pub fn set(&mut self, slot: Slot, card: Option<ProgramCardRef>) {
        match slot {
            Slot::Rotation => self.rotation = card,
            Slot::Movement => self.movement = card,
            Slot::Ability => self.ability = card,
        }
    }

    /// Occupied slots in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &ProgramCardRef)> {
        Slot::ORDER
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|card| (slot, card)))
    }
}

/// A player's committed program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedProgram {
    /// Owner.
    pub player_id: PlayerId,
    /// Chosen cards.
    #[serde(default)]
    pub cards: ProgramCards,
}

impl PlannedProgram {
    /// A program with every slot empty.
    #[must_use]
    pub fn empty(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
            cards: ProgramCards::default(),
        }
    }

    /// Build a program from card ids, snapshotting each card from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::UnknownCard`] if a chosen id is not in the catalog.
    pub fn from_choices(
        player_id: impl Into<PlayerId>,
        choice: &ProgramChoice,
        catalog: &CardCatalog,
    ) -> Result<Self, ProgramError> {
        let mut program = Self::empty(player_id);
        for slot in Slot::ORDER {
            let Some(card_id) = choice.get(slot) else {
                continue;
            };
            let card = catalog.get(card_id).ok_or_else(|| ProgramError::UnknownCard {
                player: program.player_id.clone(),
                card: card_id.clone(),
            })?;
            program.cards.set(slot, Some(ProgramCardRef::snapshot(card)));
        }
        Ok(program)
    }
}

/// Card ids chosen for each slot, before snapshotting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramChoice {
    /// Rotation card id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<CardId>,
    /// Movement card id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<CardId>,
    /// Ability card id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<CardId>,
}

impl ProgramChoice {
    /// Card id chosen for a slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&CardId> {
        match slot {
            Slot::Rotation => self.rotation.as_ref(),
            Slot::Movement => self.movement.as_ref(),
            Slot::Ability => self.ability.as_ref(),
        }
    }
}

/// Fluent construction of a [`PlannedProgram`] from card definitions.
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    program: PlannedProgram,
}

impl ProgramBuilder {
    /// Start an empty program for `player_id`.
    #[must_use]
    pub fn new(player_id: impl Into<PlayerId>) -> Self {
        Self {
            program: PlannedProgram::empty(player_id),
        }
    }

    /// Place a snapshot of `card` in the rotation slot.
    #[must_use]
    pub fn rotation(self, card: &CardDef) -> Self {
        self.card(Slot::Rotation, ProgramCardRef::snapshot(card))
    }

    /// Place a snapshot of `card` in the movement slot.
    #[must_use]
    pub fn movement(self, card: &CardDef) -> Self {
        self.card(Slot::Movement, ProgramCardRef::snapshot(card))
    }

    /// Place a snapshot of `card` in the ability slot.
    #[must_use]
    pub fn ability(self, card: &CardDef) -> Self {
        self.card(Slot::Ability, ProgramCardRef::snapshot(card))
    }

    /// Place an already-built snapshot in `slot`.
    #[must_use]
    pub fn card(mut self, slot: Slot, card: ProgramCardRef) -> Self {
        self.program.cards.set(slot, Some(card));
        self
    }

    /// Finish the program.
    #[must_use]
    pub fn build(self) -> PlannedProgram {
        self.program
    }
}

/// A rule a program breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramViolation {
    /// The slot holds a card the catalog does not know.
    #[error("{slot} slot holds unknown card `{card}`")]
    UnknownCard {
        /// Offending slot.
        slot: Slot,
        /// Card id in the slot.
        card: CardId,
    },
    /// The card's kind does not fit the slot.
    #[error("{slot} slot holds {kind} card `{card}`")]
    WrongKind {
        /// Offending slot.
        slot: Slot,
        /// Card id in the slot.
        card: CardId,
        /// The card's actual kind.
        kind: CardKind,
    },
    /// The card has no frames at all.
    #[error("{slot} slot holds card `{card}` with no frames")]
    NoFrames {
        /// Offending slot.
        slot: Slot,
        /// Card id in the slot.
        card: CardId,
    },
}

/// Check a program against the catalog.
///
/// Returns every violation found, or an empty list if the program is legal.
#[must_use]
pub fn validate_program(program: &PlannedProgram, catalog: &CardCatalog) -> Vec<ProgramViolation> {
    let mut violations = Vec::new();

    for (slot, card_ref) in program.cards.iter() {
        let Some(card) = catalog.get(&card_ref.card_id) else {
            violations.push(ProgramViolation::UnknownCard {
                slot,
                card: card_ref.card_id.clone(),
            });
            continue;
        };

        if !slot.accepts(card.kind) {
            violations.push(ProgramViolation::WrongKind {
                slot,
                card: card.id.clone(),
                kind: card.kind,
            });
        }

        if card_ref.frames.is_empty() {
            violations.push(ProgramViolation::NoFrames {
                slot,
                card: card.id.clone(),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{SymbolInstance, SymbolKind};

    fn catalog() -> CardCatalog {
        CardCatalog::sample()
    }

    #[test]
    fn test_slot_accepts() {
        assert!(Slot::Rotation.accepts(CardKind::Rotation));
        assert!(Slot::Ability.accepts(CardKind::Utility));
        assert!(!Slot::Movement.accepts(CardKind::Ability));
    }

    #[test]
    fn test_snapshot_copies_priority_and_frames() {
        let catalog = catalog();
        let card = catalog.get("movement-advance").unwrap();
        let snapshot = ProgramCardRef::snapshot(card);
        assert_eq!(snapshot.card_id, "movement-advance");
        assert_eq!(snapshot.initiative, 2);
        assert_eq!(snapshot.frames, card.frames);
    }

    #[test]
    fn test_snapshot_is_independent_of_source() {
        let mut card = CardDef::new(
            "c",
            "C",
            CardKind::Movement,
            1,
            vec![Frame::new("c-f1", 1, vec![SymbolInstance::new(SymbolKind::Move)])],
        );
        let snapshot = ProgramCardRef::snapshot(&card);
        card.frames[0].symbols.clear();
        card.priority = 9;
        assert_eq!(snapshot.frames[0].symbols.len(), 1);
        assert_eq!(snapshot.initiative, 1);
    }

    #[test]
    fn test_from_choices() {
        let choice = ProgramChoice {
            rotation: Some("rotation-pivot".into()),
            movement: None,
            ability: Some("ability-frostline".into()),
        };
        let program = PlannedProgram::from_choices("p1", &choice, &catalog()).unwrap();
        assert_eq!(program.player_id, "p1");
        assert!(program.cards.movement.is_none());
        let slots: Vec<Slot> = program.cards.iter().map(|(s, _)| s).collect();
        assert_eq!(slots, vec![Slot::Rotation, Slot::Ability]);
    }

    #[test]
    fn test_from_choices_unknown_card() {
        let choice = ProgramChoice {
            movement: Some("nope".into()),
            ..ProgramChoice::default()
        };
        let err = PlannedProgram::from_choices("p1", &choice, &catalog()).unwrap_err();
        assert!(matches!(err, ProgramError::UnknownCard { card, .. } if card == "nope"));
    }

    #[test]
    fn test_builder_with_override() {
        let catalog = catalog();
        let card = catalog.get("ability-bastion").unwrap();
        let program = ProgramBuilder::new("p2")
            .card(Slot::Ability, ProgramCardRef::snapshot(card).with_initiative(7))
            .build();
        assert_eq!(program.cards.ability.as_ref().unwrap().initiative, 7);
    }

    #[test]
    fn test_validate_legal_program() {
        let catalog = catalog();
        let program = ProgramBuilder::new("p1")
            .rotation(catalog.get("rotation-pivot").unwrap())
            .movement(catalog.get("movement-veilstep").unwrap())
            .ability(catalog.get("utility-breather").unwrap())
            .build();
        assert!(validate_program(&program, &catalog).is_empty());
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let catalog = catalog();
        let program = ProgramBuilder::new("p1")
            .rotation(catalog.get("ability-frostline").unwrap())
            .card(
                Slot::Movement,
                ProgramCardRef {
                    card_id: "ghost".into(),
                    initiative: 0,
                    frames: vec![],
                },
            )
            .card(
                Slot::Ability,
                ProgramCardRef {
                    card_id: "ability-bastion".into(),
                    initiative: 1,
                    frames: vec![],
                },
            )
            .build();

        let violations = validate_program(&program, &catalog);
        assert_eq!(violations.len(), 3);
        assert!(matches!(violations[0], ProgramViolation::WrongKind { slot: Slot::Rotation, .. }));
        assert!(matches!(violations[1], ProgramViolation::UnknownCard { slot: Slot::Movement, .. }));
        assert!(matches!(violations[2], ProgramViolation::NoFrames { slot: Slot::Ability, .. }));
    }

    #[test]
    fn test_program_json_shape() {
        let json = r#"{"playerId": "p1", "cards": {"movement": {"cardId": "m", "initiative": 3, "frames": []}}}"#;
        let program: PlannedProgram = serde_json::from_str(json).unwrap();
        assert_eq!(program.cards.movement.as_ref().unwrap().initiative, 3);
        assert!(program.cards.rotation.is_none());
    }
}
