use serde::{Deserialize, Serialize};
use std::fmt;

pub const CELL_COUNT: usize = 9;

/// A cell index in `0..9`, row-major:
///
/// ```text
///  0 | 1 | 2
///  3 | 4 | 5
///  6 | 7 | 8
/// ```
///
/// Out-of-range indices cannot be represented; a `Move` is built either by the
/// checked constructor or by `Board::available_moves`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Move(u8);

impl Move {
    pub const CENTER: Move = Move(4);

    pub fn new(index: usize) -> Option<Move> {
        if index < CELL_COUNT {
            Some(Move(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / 3
    }

    pub fn col(self) -> usize {
        self.index() % 3
    }

    pub fn from_row_col(row: usize, col: usize) -> Option<Move> {
        if row < 3 && col < 3 {
            Move::new(row * 3 + col)
        } else {
            None
        }
    }

    /// All nine cells in ascending order.
    pub fn all() -> impl Iterator<Item = Move> {
        (0..CELL_COUNT as u8).map(Move)
    }
}

impl TryFrom<u8> for Move {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Move::new(value as usize).ok_or_else(|| format!("cell index {} out of range", value))
    }
}

impl From<Move> for u8 {
    fn from(mv: Move) -> u8 {
        mv.0
    }
}

impl fmt::Display for Move {
    // 人間向けは 1-9 表記
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}
