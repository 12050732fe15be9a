//! Error types for the hosts around the engine.
//!
//! The resolution engine itself never fails; these cover loading card
//! catalogs, building programs and reading scenario files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cards::SchemaViolation;
use crate::game::{CardId, PlayerId, ProgramViolation};

/// A symbol id that is not part of [`SymbolKind`](crate::cards::SymbolKind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown symbol id `{0}`")]
pub struct UnknownSymbol(pub String);

/// Failure while loading a card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The catalog JSON is malformed.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Two cards share an id.
    #[error("duplicate card id `{0}`")]
    DuplicateCard(CardId),
    /// Cards break the card schema; every violation is listed.
    #[error("invalid card data:\n{}", join_lines(.0))]
    Schema(Vec<SchemaViolation>),
}

fn join_lines(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failure while turning card choices into a program.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// A chosen card id is not in the catalog.
    #[error("player {player}: unknown card `{card}`")]
    UnknownCard {
        /// Player whose program referenced the card.
        player: PlayerId,
        /// The missing card id.
        card: CardId,
    },
    /// The program breaks one or more rules.
    #[error("player {player}: program rejected ({})", format_violations(.violations))]
    Rejected {
        /// Player whose program was checked.
        player: PlayerId,
        /// Every rule the program breaks.
        violations: Vec<ProgramViolation>,
    },
}

fn format_violations(violations: &[ProgramViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure while loading or running a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The scenario JSON is malformed.
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The embedded catalog is invalid.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A program could not be built.
    #[error(transparent)]
    Program(#[from] ProgramError),
    /// A program was given for a player that is not seated.
    #[error("program given for unknown player `{0}`")]
    UnknownPlayer(PlayerId),
    /// The scenario has no players.
    #[error("scenario has no players")]
    NoPlayers,
}
