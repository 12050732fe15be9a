//! Game state: the value every transition consumes and produces.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{SymbolInstance, SymbolKind};
use crate::game::{CardId, PlannedProgram, PlayerId, PlayerState, Slot};
use crate::hex::Axial;

/// Unique identifier for a character piece.
pub type CharacterId = String;

/// Submitted programs, keyed by player.
pub type ProgramsByPlayer = BTreeMap<PlayerId, PlannedProgram>;

/// Coarse game phase, owned by the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Seating and character pick.
    Setup,
    /// Players choose programs.
    #[default]
    Planning,
    /// Programs are revealed.
    Reveal,
    /// The round is being resolved.
    Resolve,
    /// The game is over.
    Complete,
}

/// A character piece on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterState {
    /// Unique id.
    pub id: CharacterId,
    /// Controlling player.
    pub owner_id: PlayerId,
    /// Board position.
    pub position: Axial,
    /// Facing, as a direction index `0..6`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing: Option<u8>,
}

/// Shared ability deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityDeckState {
    /// Cards still to be drawn.
    pub draw_pile: Vec<CardId>,
    /// Spent cards.
    pub discard_pile: Vec<CardId>,
}

/// UI-facing selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Selected board hex.
    #[serde(default)]
    pub selected_hex: Option<Axial>,
    /// Selected card.
    #[serde(default)]
    pub selected_card_id: Option<CardId>,
    /// Selected frame of the selected card.
    #[serde(default)]
    pub selected_frame_index: Option<u32>,
}

/// Round lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Programs are being submitted.
    #[default]
    Planning,
    /// Steps are being confirmed one at a time.
    Resolving,
    /// Every step has been confirmed, or the round was ended early.
    Ended,
}

/// The step waiting to be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveStep {
    /// Acting player.
    pub player_id: PlayerId,
    /// Frame the step belongs to.
    pub frame_index: u32,
}

/// Card ids that contributed symbols to a step, per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCardIds {
    /// Rotation card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<CardId>,
    /// Movement card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<CardId>,
    /// Ability card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<CardId>,
}

impl SourceCardIds {
    /// Record the card for a slot.
    pub fn set(&mut self, slot: Slot, card_id: CardId) {
        match slot {
            Slot::Rotation => self.rotation = Some(card_id),
            Slot::Movement => self.movement = Some(card_id),
            Slot::Ability => self.ability = Some(card_id),
        }
    }

    /// Card recorded for a slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&CardId> {
        match slot {
            Slot::Rotation => self.rotation.as_ref(),
            Slot::Movement => self.movement.as_ref(),
            Slot::Ability => self.ability.as_ref(),
        }
    }
}

/// One player's materialized symbols at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFrameStep {
    /// Frame the step fires at.
    pub frame_index: u32,
    /// Acting player.
    pub player_id: PlayerId,
    /// Cards that contributed.
    pub source_card_ids: SourceCardIds,
    /// Symbols, rotation first, then movement, then ability.
    pub symbols: Vec<SymbolInstance>,
}

impl ResolvedFrameStep {
    /// The `{player, frame}` pair that identifies this step.
    #[must_use]
    pub fn key(&self) -> ActiveStep {
        ActiveStep {
            player_id: self.player_id.clone(),
            frame_index: self.frame_index,
        }
    }

    /// Check whether `active` points at this step.
    #[must_use]
    pub fn matches(&self, active: &ActiveStep) -> bool {
        self.player_id == active.player_id && self.frame_index == active.frame_index
    }
}

/// Kind of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogEntryKind {
    /// A resolved step was confirmed.
    StepConfirmed,
}

/// Permanent audit record of a confirmed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionLogEntry {
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: LogEntryKind,
    /// Frame of the confirmed step.
    pub frame_index: u32,
    /// Player of the confirmed step.
    pub player_id: PlayerId,
    /// Symbol ids of the step, in order.
    pub symbol_ids: Vec<String>,
    /// Confirmation time in milliseconds.
    pub ts: u64,
}

impl ResolutionLogEntry {
    /// Log entry for a confirmed step.
    #[must_use]
    pub fn confirmed(step: &ResolvedFrameStep, ts: u64) -> Self {
        Self {
            kind: LogEntryKind::StepConfirmed,
            frame_index: step.frame_index,
            player_id: step.player_id.clone(),
            symbol_ids: step
                .symbols
                .iter()
                .map(|s| SymbolKind::id(s.id).to_string())
                .collect(),
            ts,
        }
    }
}

/// Round progress: status, frame cursor, step batch and step cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    /// Lifecycle status.
    pub status: RoundStatus,
    /// Frame of the current batch (1 before the round starts).
    pub frame_index: u32,
    /// Initiative order fixed at round start.
    pub order: Vec<PlayerId>,
    /// Steps of the current frame, in initiative order.
    pub resolved_steps: Vec<ResolvedFrameStep>,
    /// Step awaiting confirmation.
    pub active_step: Option<ActiveStep>,
    /// Index of the active step in `resolved_steps`.
    pub step_cursor: usize,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    /// A fresh round in planning.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: RoundStatus::Planning,
            frame_index: 1,
            order: Vec::new(),
            resolved_steps: Vec::new(),
            active_step: None,
            step_cursor: 0,
        }
    }

    /// Check whether steps are being confirmed.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.status == RoundStatus::Resolving
    }

    /// Index of the step to confirm next.
    ///
    /// Locates `active_step` in the batch, falling back to `step_cursor`.
    #[must_use]
    pub fn pending_index(&self) -> Option<usize> {
        let located = self
            .active_step
            .as_ref()
            .and_then(|active| self.resolved_steps.iter().position(|s| s.matches(active)));
        located.or_else(|| (self.step_cursor < self.resolved_steps.len()).then_some(self.step_cursor))
    }

    /// The step to confirm next.
    #[must_use]
    pub fn pending_step(&self) -> Option<&ResolvedFrameStep> {
        self.pending_index().map(|i| &self.resolved_steps[i])
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Game id.
    pub id: String,
    /// Session phase.
    pub phase: Phase,
    /// Players in seat order.
    pub players: Vec<PlayerState>,
    /// Pieces on the board.
    #[serde(default)]
    pub characters: Vec<CharacterState>,
    /// Shared ability deck.
    #[serde(default)]
    pub ability_deck: AbilityDeckState,
    /// Submitted programs.
    #[serde(default)]
    pub programs_by_player: ProgramsByPlayer,
    /// Round progress.
    #[serde(default)]
    pub round: RoundState,
    /// Confirmed steps.
    #[serde(default)]
    pub log: Vec<ResolutionLogEntry>,
    /// UI selection.
    #[serde(default)]
    pub selection: Selection,
}

impl GameState {
    /// Create a game in planning with the given seated players.
    #[must_use]
    pub fn new(id: impl Into<String>, players: Vec<PlayerState>) -> Self {
        Self {
            id: id.into(),
            phase: Phase::Planning,
            players,
            characters: Vec::new(),
            ability_deck: AbilityDeckState::default(),
            programs_by_player: ProgramsByPlayer::new(),
            round: RoundState::new(),
            log: Vec::new(),
            selection: Selection::default(),
        }
    }

    /// Get a player by id.
    #[must_use]
    pub fn player(&self, id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Program submitted by a player.
    #[must_use]
    pub fn program(&self, id: &str) -> Option<&PlannedProgram> {
        self.programs_by_player.get(id)
    }
}
