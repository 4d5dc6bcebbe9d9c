use crate::core::{Board, Move};

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// `None` means the player gives up the game (human abort) or has no move.
    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move>;
    fn name(&self) -> &str;

    /// Human players get the interactive board; AIs get a thinking delay.
    fn is_human(&self) -> bool {
        false
    }
}
