//! Root move selection shared by every search strategy.
//!
//! The selector walks the root moves in ascending cell order, asks a
//! [`GameSearch`] for the value of each resulting position with the opponent
//! to move, and keeps the first move with the strictly greatest value.

use super::alpha_beta::AlphaBeta;
use super::minimax::Minimax;
use crate::core::{Board, Move, Player};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A full-depth game-tree search from a fixed maximizer's point of view.
pub trait GameSearch {
    /// Game-theoretic value of `board` with the maximizer (or minimizer) to
    /// move. The board is restored before returning.
    fn value(&mut self, board: &mut Board, maximizing: bool) -> i32;

    /// Nodes visited since construction.
    fn nodes(&self) -> u64;

    fn name(&self) -> &str;
}

/// Which search the AI player drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    #[default]
    Minimax,
    AlphaBeta,
    ParallelRoot,
}

/// Result of one root selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub best_move: Move,
    pub value: i32,
    pub nodes: u64,
}

/// Picks the best move for `maximizer` using `search`.
///
/// Returns `None` only when the board has no empty cell.
pub fn select_move<S: GameSearch>(search: &mut S, board: &Board, maximizer: Player) -> Option<Selection> {
    // 呼び出し元の盤面は触らない
    let mut work = *board;
    let start_nodes = search.nodes();

    let mut best: Option<(Move, i32)> = None;
    for mv in work.available_moves() {
        work.apply(mv, maximizer);
        let value = search.value(&mut work, false);
        work.undo(mv);

        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((mv, value));
        }
    }

    let (best_move, value) = best?;
    let nodes = search.nodes() - start_nodes;
    debug!(
        search = search.name(),
        board = %board,
        best_move = best_move.index(),
        value,
        nodes,
        "root search finished"
    );
    Some(Selection {
        best_move,
        value,
        nodes,
    })
}

/// Same selection as [`select_move`] with a [`Minimax`] search, but every root
/// move is searched on its own board copy on the rayon pool.
pub fn select_move_parallel(board: &Board, maximizer: Player) -> Option<Selection> {
    let root_moves = board.available_moves();

    // collect() keeps the ascending order of root_moves
    let scored: Vec<(Move, i32, u64)> = root_moves
        .par_iter()
        .map(|&mv| {
            let mut branch = *board;
            branch.apply(mv, maximizer);
            let mut search = Minimax::new(maximizer);
            let value = search.value(&mut branch, false);
            (mv, value, search.nodes())
        })
        .collect();

    let nodes = scored.iter().map(|&(_, _, n)| n).sum();
    let mut best: Option<(Move, i32)> = None;
    for &(mv, value, _) in &scored {
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((mv, value));
        }
    }

    let (best_move, value) = best?;
    debug!(
        search = "parallel-root",
        board = %board,
        best_move = best_move.index(),
        value,
        nodes,
        "root search finished"
    );
    Some(Selection {
        best_move,
        value,
        nodes,
    })
}

/// Runs the selection with the given strategy.
pub fn select_with(strategy: SearchStrategy, board: &Board, maximizer: Player) -> Option<Selection> {
    match strategy {
        SearchStrategy::Minimax => select_move(&mut Minimax::new(maximizer), board, maximizer),
        SearchStrategy::AlphaBeta => select_move(&mut AlphaBeta::new(maximizer), board, maximizer),
        SearchStrategy::ParallelRoot => select_move_parallel(board, maximizer),
    }
}

/// Best move for `maximizer`, or `None` if the board is full.
pub fn best_move(board: &Board, maximizer: Player) -> Option<Move> {
    best_move_with_value(board, maximizer).map(|(mv, _)| mv)
}

pub fn best_move_with_value(board: &Board, maximizer: Player) -> Option<(Move, i32)> {
    select_move(&mut Minimax::new(maximizer), board, maximizer).map(|s| (s.best_move, s.value))
}

pub fn best_move_parallel(board: &Board, maximizer: Player) -> Option<Move> {
    select_move_parallel(board, maximizer).map(|s| s.best_move)
}
