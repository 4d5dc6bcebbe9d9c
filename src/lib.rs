//! Tic-tac-toe with an exhaustive minimax opponent.
//!
//! The engine (`core`, `logic`, `player::ai`) searches every continuation to
//! the end of the game and returns a provably optimal move. The rest of the
//! crate is the terminal game around it: players, game loop, JSON-lines game
//! log, replay and self-play.
//!
//! ```
//! use tictactoe_minimax::{best_move, Board, Player};
//!
//! let board: Board = "OO./XX./...".parse().unwrap();
//! assert_eq!(best_move(&board, Player::O).map(|m| m.index()), Some(2));
//! ```

pub mod config;
pub mod core;
pub mod display;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;


pub use crate::core::{empty_board, Board, Move, MoveError, Outcome, Player};
pub use crate::logic::{evaluate, is_game_over, outcome, prefer_among, winner};
pub use crate::player::ai::{best_move, best_move_parallel, best_move_with_value, minimax};

/// The AI's mark in the classic human-first game.
pub const DEFAULT_MAXIMIZER: Player = Player::O;
