pub mod board;
pub mod r#move;
pub mod types;

pub use board::{empty_board, Board, BoardParseError, MoveError};
pub use r#move::{Move, CELL_COUNT};
pub use types::{Outcome, Player};
