use super::search::GameSearch;
use crate::core::{Board, Player};
use crate::logic::evaluate;

const LOSS: i32 = -1;
const WIN: i32 = 1;

/// Minimax with alpha-beta cutoffs.
///
/// Scores never leave `[LOSS, WIN]`, so searching with that window returns
/// the exact minimax value (a fail-soft result at or beyond a bound can only be
/// the bound itself). The root selector therefore sees the same values and
/// picks the same move as [`super::minimax::Minimax`], with fewer nodes.
pub struct AlphaBeta {
    maximizer: Player,
    nodes: u64,
}

impl AlphaBeta {
    pub fn new(maximizer: Player) -> Self {
        Self {
            maximizer,
            nodes: 0,
        }
    }

    fn alpha_beta(&mut self, board: &mut Board, alpha: i32, beta: i32, is_maximizing: bool) -> i32 {
        self.nodes += 1;

        let score = evaluate(board, self.maximizer);
        if score != 0 || board.is_full() {
            return score;
        }

        if is_maximizing {
            let mut max_eval = i32::MIN;
            let mut alpha = alpha;
            for mv in board.available_moves() {
                board.apply(mv, self.maximizer);
                let eval = self.alpha_beta(board, alpha, beta, false);
                board.undo(mv);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            let mut beta = beta;
            for mv in board.available_moves() {
                board.apply(mv, self.maximizer.opponent());
                let eval = self.alpha_beta(board, alpha, beta, true);
                board.undo(mv);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}

impl GameSearch for AlphaBeta {
    fn value(&mut self, board: &mut Board, maximizing: bool) -> i32 {
        self.alpha_beta(board, LOSS, WIN, maximizing)
    }

    fn nodes(&self) -> u64 {
        self.nodes
    }

    fn name(&self) -> &str {
        "alpha-beta"
    }
}
