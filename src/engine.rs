//! Resolution engine.
//!
//! ```text
//! GameIntent ──► Reducer::apply ──► Transition { state, events }
//!                    │
//!                    └─► resolver (initiative order, frame batches)
//! ```
//!
//! The resolver is a set of pure functions over programs. The reducer is the
//! only place round state changes, and it always returns a fresh value.

mod clock;
mod config;
mod preview;
mod reach;
mod reducer;
mod resolver;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use preview::{preview, Preview};
pub use reach::{card_reach, CardReach, Piece};
pub use reducer::{Reducer, Transition};
pub use resolver::{
    acting_frame_indices, compute_initiative_order, frame_source_cards, frame_symbols,
    initiative_score, max_frame_index, next_frame_steps, resolve_frame, FrameBatch,
};
