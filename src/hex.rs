//! Axial hex coordinates and neighbor geometry.
//!
//! Hexes are addressed by axial `(q, r)` pairs and keyed as `"q,r"` strings,
//! the same keys the renderer uses for its highlight sets. Nothing here
//! touches game state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// String key for a hex, formatted as `"q,r"`.
pub type HexKey = String;

/// An axial hex coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Axial {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
}

/// Offsets to the six neighbors, indexed by [`Direction`].
pub const NEIGHBOR_OFFSETS: [Axial; 6] = [
    Axial::new(1, 0),
    Axial::new(1, -1),
    Axial::new(0, -1),
    Axial::new(-1, 0),
    Axial::new(-1, 1),
    Axial::new(0, 1),
];

impl Axial {
    /// The board center.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The key used to address this hex in highlight sets.
    #[must_use]
    pub fn key(self) -> HexKey {
        format!("{},{}", self.q, self.r)
    }

    /// Coordinate shifted by `offset` scaled by `steps`, or `None` if it
    /// leaves the `i32` plane.
    #[must_use]
    pub const fn offset(self, offset: Axial, steps: i32) -> Option<Self> {
        let (Some(dq), Some(dr)) = (offset.q.checked_mul(steps), offset.r.checked_mul(steps)) else {
            return None;
        };
        let (Some(q), Some(r)) = (self.q.checked_add(dq), self.r.checked_add(dr)) else {
            return None;
        };
        Some(Self::new(q, r))
    }

    /// The adjacent hex in the given direction, if representable.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Option<Self> {
        self.offset(direction.vector(), 1)
    }

    /// Adjacent hexes in [`Direction`] order.
    ///
    /// Six for any hex away from the edges of the coordinate range; fewer at
    /// the edges, where some neighbors have no `i32` representation.
    #[must_use]
    pub fn neighbors(self) -> Vec<Axial> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&offset| self.offset(offset, 1))
            .collect()
    }

    /// Hex distance between two coordinates.
    #[must_use]
    pub fn distance(self, other: Axial) -> u64 {
        // Widened so differences across the whole plane cannot overflow.
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        let ds = -dq - dr;
        dq.unsigned_abs().max(dr.unsigned_abs()).max(ds.unsigned_abs())
    }

    /// Check whether this coordinate lies on a hexagonal board of `radius`.
    #[must_use]
    pub fn within_board(self, radius: u32) -> bool {
        self.distance(Self::ORIGIN) <= u64::from(radius)
    }
}

impl fmt::Display for Axial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Absolute facing on the board, indexed like [`NEIGHBOR_OFFSETS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// East.
    E,
    /// South-east.
    Se,
    /// South-west.
    Sw,
    /// West.
    W,
    /// North-west.
    Nw,
    /// North-east.
    Ne,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 6] = [
        Direction::E,
        Direction::Se,
        Direction::Sw,
        Direction::W,
        Direction::Nw,
        Direction::Ne,
    ];

    /// Index in `0..6`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Direction for an index, wrapping modulo 6.
    #[must_use]
    pub const fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(6) as usize]
    }

    /// Unit axial vector for this direction.
    #[must_use]
    pub const fn vector(self) -> Axial {
        NEIGHBOR_OFFSETS[self as usize]
    }

    /// Turn by `steps` sixths (positive turns toward the right).
    #[must_use]
    pub const fn rotate(self, steps: i32) -> Self {
        Self::from_index(self as i32 + steps)
    }

    /// Resolve a facing-relative direction to an absolute one.
    #[must_use]
    pub const fn resolve(self, relative: RelativeDirection) -> Self {
        self.rotate(relative.offset())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::E => "E",
            Direction::Se => "SE",
            Direction::Sw => "SW",
            Direction::W => "W",
            Direction::Nw => "NW",
            Direction::Ne => "NE",
        };
        f.write_str(label)
    }
}

/// Direction relative to a piece's facing, as printed on cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelativeDirection {
    /// Forward.
    F,
    /// Forward-right.
    Fr,
    /// Back-right.
    Br,
    /// Back.
    B,
    /// Back-left.
    Bl,
    /// Forward-left.
    Fl,
}

impl RelativeDirection {
    /// Rotation offset from the facing direction, in sixths.
    #[must_use]
    pub const fn offset(self) -> i32 {
        match self {
            RelativeDirection::F => 0,
            RelativeDirection::Fr => 1,
            RelativeDirection::Br => 2,
            RelativeDirection::B => 3,
            RelativeDirection::Bl => 4,
            RelativeDirection::Fl => 5,
        }
    }

    /// Parse the card notation (`F`, `FR`, ...).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "F" => Some(Self::F),
            "FR" => Some(Self::Fr),
            "BR" => Some(Self::Br),
            "B" => Some(Self::B),
            "BL" => Some(Self::Bl),
            "FL" => Some(Self::Fl),
            _ => None,
        }
    }
}

/// Facings reachable from `facing` by rotating up to `max_steps` either way.
///
/// Sorted by direction index, without duplicates.
#[must_use]
pub fn facing_options(facing: Direction, max_steps: u8) -> Vec<Direction> {
    let max_steps = i32::from(max_steps.min(3));
    let mut options: Vec<Direction> = (-max_steps..=max_steps).map(|s| facing.rotate(s)).collect();
    options.sort_unstable();
    options.dedup();
    options
}

/// Destination of a straight move, or `None` if it leaves the board.
#[must_use]
pub fn move_destination(
    from: Axial,
    facing: Direction,
    relative: RelativeDirection,
    distance: u8,
    board_radius: u32,
) -> Option<Axial> {
    let heading = facing.resolve(relative);
    from.offset(heading.vector(), i32::from(distance))
        .filter(|destination| destination.within_board(board_radius))
}
