use crate::core::{Board, Move, Outcome, Player};

/// 勝ちライン (行, 列, 対角)
pub const LINES: [[usize; 3]; 8] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // cols
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // diags
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the owner of the first completed line, if any.
///
/// This is a pure function of the nine cells. It does not check that the
/// position is reachable, so a board with two winners reports whichever line
/// comes first in `LINES`.
pub fn winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}

/// The winner together with the three cells of its line.
pub fn winning_line(board: &Board) -> Option<(Player, [usize; 3])> {
    let cells = board.cells();
    for line in &LINES {
        let [a, b, c] = *line;
        if let Some(p) = cells[a] {
            if cells[b] == Some(p) && cells[c] == Some(p) {
                return Some((p, *line));
            }
        }
    }
    None
}

pub fn has_won(board: &Board, player: Player) -> bool {
    let cells = board.cells();
    LINES.iter().any(|line| line.iter().all(|&i| cells[i] == Some(player)))
}

/// +1 if `maximizer` has a line, -1 if the opponent has one, else 0.
///
/// Draw and ongoing positions both score 0.
pub fn evaluate(board: &Board, maximizer: Player) -> i32 {
    if has_won(board, maximizer) {
        1
    } else if has_won(board, maximizer.opponent()) {
        -1
    } else {
        0
    }
}

pub fn outcome(board: &Board, maximizer: Player) -> Outcome {
    match evaluate(board, maximizer) {
        1 => Outcome::MaximizerWin,
        -1 => Outcome::MinimizerWin,
        _ if board.is_full() => Outcome::Draw,
        _ => Outcome::Ongoing,
    }
}

/// 終局判定
pub fn is_game_over(board: &Board) -> bool {
    winner(board).is_some() || board.is_full()
}

/// Legal moves for the side to move. Empty once the game is decided.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    if winner(board).is_some() {
        return Vec::new();
    }
    board.available_moves()
}

/// First cell of `priority` that is still available.
pub fn prefer_among(available: &[Move], priority: &[usize]) -> Option<Move> {
    priority
        .iter()
        .filter_map(|&i| Move::new(i))
        .find(|mv| available.contains(mv))
}
