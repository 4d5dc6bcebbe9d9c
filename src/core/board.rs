use super::r#move::{Move, CELL_COUNT};
use super::types::Player;
use std::fmt;
use std::str::FromStr;

/// 盤面
///
/// Nine cells, row-major. The board does not track whose turn it is; the side
/// to move is derived from the mark counts (X always moves first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Option<Player>; CELL_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell index {0} is out of range")]
    OutOfRange(usize),
    #[error("cell {} is already taken", .0 + 1)]
    Occupied(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected 9 cells, got {0}")]
    WrongLength(usize),
    #[error("invalid cell character: '{0}'")]
    InvalidCell(char),
}

pub fn empty_board() -> Board {
    Board::new()
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [None; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Option<Player>; CELL_COUNT]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Option<Player>; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, mv: Move) -> Option<Player> {
        self.cells[mv.index()]
    }

    /// Empty cells in ascending index order. Search and tie-breaking depend on
    /// this order.
    pub fn available_moves(&self) -> Vec<Move> {
        Move::all().filter(|&mv| self.get(mv).is_none()).collect()
    }

    /// Places `player`'s mark. Only moves taken from `available_moves` are
    /// valid here; placing onto an occupied cell panics.
    pub fn apply(&mut self, mv: Move, player: Player) {
        assert!(
            self.cells[mv.index()].is_none(),
            "apply on occupied cell {}",
            mv.index()
        );
        self.cells[mv.index()] = Some(player);
    }

    /// Clears a cell placed by `apply`.
    pub fn undo(&mut self, mv: Move) {
        debug_assert!(self.cells[mv.index()].is_some(), "undo on empty cell");
        self.cells[mv.index()] = None;
    }

    /// Checks an untrusted 0-based index against the board.
    pub fn validate(&self, index: usize) -> Result<Move, MoveError> {
        let mv = Move::new(index).ok_or(MoveError::OutOfRange(index))?;
        if self.get(mv).is_some() {
            return Err(MoveError::Occupied(index));
        }
        Ok(mv)
    }

    /// Checked placement for untrusted input (0-based index).
    pub fn try_apply(&mut self, index: usize, player: Player) -> Result<Move, MoveError> {
        let mv = self.validate(index)?;
        self.apply(mv, player);
        Ok(mv)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    pub fn move_count(&self) -> usize {
        CELL_COUNT - self.available_moves().len()
    }

    pub fn side_to_move(&self) -> Player {
        if self.count(Player::X) > self.count(Player::O) {
            Player::O
        } else {
            Player::X
        }
    }
}

impl fmt::Display for Board {
    /// Compact form: rows separated by `/`, `.` for an empty cell.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                write!(f, "/")?;
            }
            match cell {
                Some(p) => write!(f, "{}", p)?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();
        if chars.len() != CELL_COUNT {
            return Err(BoardParseError::WrongLength(chars.len()));
        }

        let mut cells = [None; CELL_COUNT];
        for (cell, c) in cells.iter_mut().zip(chars) {
            *cell = match c {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '_' | '-' => None,
                other => return Err(BoardParseError::InvalidCell(other)),
            };
        }
        Ok(Board { cells })
    }
}
