//! Game layer for Cadence.
//!
//! Defines the data the engine works on:
//! - Seated players and their submitted programs
//! - Round progress, resolved steps and the resolution log
//! - The intent and event vocabulary
//! - Invariant checks over the round state

mod event;
mod intent;
mod invariants;
mod player;
mod program;
mod state;

pub use event::GameEvent;
pub use intent::GameIntent;
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use player::{PlayerId, PlayerState};
pub use program::{
    validate_program, CardId, Initiative, PlannedProgram, ProgramBuilder, ProgramCardRef,
    ProgramCards, ProgramChoice, ProgramViolation, Slot,
};
pub use state::{
    AbilityDeckState, ActiveStep, CharacterId, CharacterState, GameState, LogEntryKind, Phase,
    ProgramsByPlayer, ResolutionLogEntry, ResolvedFrameStep, RoundState, RoundStatus, Selection,
    SourceCardIds,
};
