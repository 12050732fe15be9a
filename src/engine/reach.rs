//! Where a card can take a piece, for board highlights.
//!
//! Like [`preview`](super::preview), this never touches game state. Each
//! `MOVE`/`JUMP` is measured from the piece's current hex, not chained.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cards::{CardDef, Primitive, SymbolKind};
use crate::hex::{facing_options, move_destination, Axial, Direction, HexKey, RelativeDirection};

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    /// Current hex.
    pub position: Axial,
    /// Current facing.
    pub facing: Direction,
}

impl Piece {
    /// Create a piece.
    #[must_use]
    pub const fn new(position: Axial, facing: Direction) -> Self {
        Self { position, facing }
    }
}

/// Facings and destinations a card offers a piece.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardReach {
    /// Facings within the card's rotation allowance, by direction index.
    pub facings: Vec<Direction>,
    /// On-board destinations of the card's moves, in frame order.
    pub destinations: Vec<Axial>,
}

impl CardReach {
    /// Destination keys, for the same highlight sets [`Preview`](super::Preview) uses.
    #[must_use]
    pub fn highlighted(&self) -> BTreeSet<HexKey> {
        self.destinations.iter().copied().map(Axial::key).collect()
    }
}

fn distance(value: Option<&Primitive>) -> Option<u8> {
    match value {
        Some(Primitive::Int(n)) => u8::try_from(*n).ok(),
        _ => None,
    }
}

/// Facings the card allows and where its moves land.
///
/// Moves are read facing `chosen_facing`, or the piece's facing when none is
/// chosen. Moves with unreadable parameters or landing off a board of
/// `board_radius` are skipped.
#[must_use]
pub fn card_reach(
    card: &CardDef,
    piece: Piece,
    chosen_facing: Option<Direction>,
    board_radius: u32,
) -> CardReach {
    let facing = chosen_facing.unwrap_or(piece.facing);
    let mut destinations = Vec::new();

    let moves = card
        .frames
        .iter()
        .flat_map(|frame| frame.symbols.iter())
        .filter(|symbol| matches!(symbol.id, SymbolKind::Move | SymbolKind::Jump));
    for symbol in moves {
        let relative = match symbol.param("direction") {
            Some(Primitive::Text(d)) => RelativeDirection::parse(d),
            _ => None,
        };
        let (Some(relative), Some(steps)) = (relative, distance(symbol.param("distance"))) else {
            continue;
        };
        let destination = move_destination(piece.position, facing, relative, steps, board_radius);
        if let Some(hex) = destination.filter(|hex| !destinations.contains(hex)) {
            destinations.push(hex);
        }
    }

    CardReach {
        facings: facing_options(piece.facing, card.rotation_allowance),
        destinations,
    }
}
