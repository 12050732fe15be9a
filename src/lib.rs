// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Cadence: a simultaneous-turn program resolution engine.
//!
//! Every player commits a program of up to three cards (rotation, movement,
//! ability). Each card is a timeline of frames holding effect symbols. Once
//! the round starts, the engine merges all programs into a deterministic
//! sequence of steps:
//! - Players act in initiative order (sum of their cards' initiative)
//! - Frames where nobody acts are skipped
//! - One step is confirmed per `CONTINUE_RESOLUTION` and logged
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI / Scenario driver           │
//! ├─────────────────────────────────────┤
//! │  Engine (reducer, resolver)         │
//! ├─────────────────────────────────────┤
//! │  Game model (state, intents)        │
//! ├─────────────────────────────────────┤
//! │  Cards, symbols, hex geometry       │
//! └─────────────────────────────────────┘
//! ```

pub mod cards;
pub mod engine;
pub mod error;
pub mod game;
pub mod hex;
pub mod scenario;

pub use error::{CatalogError, ProgramError, ScenarioError};

// Re-export the types most callers need at crate root
pub use cards::{CardCatalog, CardDef, CardKind, Frame, SymbolInstance, SymbolKind};
pub use engine::{EngineConfig, Reducer, Transition};
pub use game::{GameEvent, GameIntent, GameState, PlannedProgram, PlayerId, RoundStatus};
pub use hex::Axial;
pub use scenario::{run_scenario, RoundReport, Scenario};
