//! Events: what the engine reports after each transition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::PlayerId;

/// Advisory signal for observers. The state is the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameEvent {
    /// A player's program was stored.
    ProgramSubmitted {
        /// Submitting player.
        player_id: PlayerId,
    },
    /// The round began resolving.
    RoundStarted {
        /// Frame the round starts counting from.
        frame_index: u32,
    },
    /// A step was confirmed and logged.
    StepConfirmed {
        /// Frame of the step.
        frame_index: u32,
        /// Player of the step.
        player_id: PlayerId,
    },
    /// Resolution moved on to a later frame.
    FrameAdvanced {
        /// The new frame.
        frame_index: u32,
    },
    /// The round is over.
    RoundEnded,
    /// Diagnostic message.
    Info {
        /// Message text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        msg: Option<String>,
        /// Frame the message refers to.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at: Option<u32>,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::ProgramSubmitted { player_id } => {
                write!(f, "program submitted by {player_id}")
            }
            GameEvent::RoundStarted { frame_index } => {
                write!(f, "round started at frame {frame_index}")
            }
            GameEvent::StepConfirmed {
                frame_index,
                player_id,
            } => write!(f, "frame {frame_index}: step confirmed for {player_id}"),
            GameEvent::FrameAdvanced { frame_index } => {
                write!(f, "advanced to frame {frame_index}")
            }
            GameEvent::RoundEnded => write!(f, "round ended"),
            GameEvent::Info { msg, at } => {
                write!(f, "info: {}", msg.as_deref().unwrap_or("-"))?;
                if let Some(frame) = at {
                    write!(f, " (frame {frame})")?;
                }
                Ok(())
            }
        }
    }
}
