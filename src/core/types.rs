use serde::{Deserialize, Serialize};
use std::fmt;

/// プレイヤー (マーク)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X, // 先手
    O, // 後手
}

impl Default for Player {
    fn default() -> Self {
        Player::X
    }
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn display_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_char())
    }
}

/// Classification of a board from the maximizer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    MaximizerWin,
    MinimizerWin,
    Draw,
    Ongoing,
}

impl Outcome {
    /// Draw and Ongoing share the same score; callers that care use `is_full`.
    pub fn score(self) -> i32 {
        match self {
            Outcome::MaximizerWin => 1,
            Outcome::MinimizerWin => -1,
            Outcome::Draw | Outcome::Ongoing => 0,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}
