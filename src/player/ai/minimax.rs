use super::search::{select_with, GameSearch, SearchStrategy};
use crate::core::{Board, Move, Player};
use crate::logic::evaluate;
use crate::player::PlayerController;
use std::cell::Cell;
use tracing::{debug, warn};

/// Plain full-depth minimax.
pub struct Minimax {
    maximizer: Player,
    nodes: u64,
}

impl Minimax {
    pub fn new(maximizer: Player) -> Self {
        Self {
            maximizer,
            nodes: 0,
        }
    }

    fn search(&mut self, board: &mut Board, is_maximizing: bool) -> i32 {
        self.nodes += 1;

        let score = evaluate(board, self.maximizer);
        if score != 0 || board.is_full() {
            return score;
        }

        let mark = if is_maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };

        if is_maximizing {
            let mut best = i32::MIN;
            for mv in board.available_moves() {
                board.apply(mv, mark);
                let value = self.search(board, false);
                board.undo(mv);
                if value > best {
                    best = value;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in board.available_moves() {
                board.apply(mv, mark);
                let value = self.search(board, true);
                board.undo(mv);
                if value < best {
                    best = value;
                }
            }
            best
        }
    }
}

impl GameSearch for Minimax {
    fn value(&mut self, board: &mut Board, maximizing: bool) -> i32 {
        self.search(board, maximizing)
    }

    fn nodes(&self) -> u64 {
        self.nodes
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

/// Game value of `board` for `maximizer`, searched to the end of the game.
pub fn minimax(board: &mut Board, maximizing: bool, maximizer: Player) -> i32 {
    Minimax::new(maximizer).value(board, maximizing)
}

pub struct MinimaxAI {
    pub player: Player,
    pub name: String,
    pub strategy: SearchStrategy,
    nodes_evaluated: Cell<u64>,
    last_value: Cell<Option<i32>>,
}

impl MinimaxAI {
    pub fn new(player: Player, name: &str) -> Self {
        Self::with_strategy(player, name, SearchStrategy::default())
    }

    pub fn with_strategy(player: Player, name: &str, strategy: SearchStrategy) -> Self {
        Self {
            player,
            name: name.to_string(),
            strategy,
            nodes_evaluated: Cell::new(0),
            last_value: Cell::new(None),
        }
    }

    /// Total nodes searched by this player so far.
    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_evaluated.get()
    }

    /// Root value of the most recent selection.
    pub fn last_value(&self) -> Option<i32> {
        self.last_value.get()
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move> {
        if legal_moves.is_empty() {
            return None;
        }

        let selection = select_with(self.strategy, board, self.player)?;
        self.nodes_evaluated
            .set(self.nodes_evaluated.get() + selection.nodes);
        self.last_value.set(Some(selection.value));

        if !legal_moves.contains(&selection.best_move) {
            warn!(
                chosen = selection.best_move.index(),
                "search picked a move outside the offered list"
            );
            return None;
        }

        debug!(
            player = %self.player,
            strategy = ?self.strategy,
            cell = selection.best_move.index(),
            value = selection.value,
            "AI move"
        );
        Some(selection.best_move)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
