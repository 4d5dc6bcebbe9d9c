pub mod log;
pub mod replay;

use crate::core::{Board, Move, MoveError, Player};
use crate::display::{render_board, DisplayState};
use crate::logic::{legal_moves, prefer_among, winner, winning_line};
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

pub use log::{append_entry, read_log, LogEntry};

/// Cells tried in order when an AI returns no move on a non-full board.
///
/// The engine only returns `None` for a full board, so this never fires while
/// the board is maintained through `Game::step`.
pub const FALLBACK_ORDER: [usize; 5] = [4, 0, 2, 6, 8];

/// One entry of the move history, logged as `{"player": "X", "pos": 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub pos: Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Winner(Player),
    Draw,
    Aborted,
}

/// Result label written to the game log, from the human's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    HumanWin,
    AiWin,
    Draw,
    Aborted,
}

impl GameResult {
    pub fn from_end(end: GameEnd, human: Player) -> Self {
        match end {
            GameEnd::Winner(p) if p == human => GameResult::HumanWin,
            GameEnd::Winner(_) => GameResult::AiWin,
            GameEnd::Draw => GameResult::Draw,
            GameEnd::Aborted => GameResult::Aborted,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GameResult::HumanWin => "Congratulations! You win!",
            GameResult::AiWin => "AI wins. Better luck next time!",
            GameResult::Draw => "It's a draw!",
            GameResult::Aborted => "Game aborted.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameView {
    /// Render every turn and pause before AI moves.
    Interactive { think_delay: Duration },
    Silent,
}

pub struct Game {
    pub board: Board,
    pub current_player: Player,
    pub history: Vec<MoveRecord>,
    pub view: GameView,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            current_player: Player::X,
            history: Vec::new(),
            view: GameView::Silent,
        }
    }

    pub fn with_view(view: GameView) -> Self {
        Game {
            view,
            ..Self::new()
        }
    }

    /// Validated move for the side to move; records it and passes the turn.
    pub fn step(&mut self, mv: Move) -> Result<(), MoveError> {
        self.board.try_apply(mv.index(), self.current_player)?;
        self.history.push(MoveRecord {
            player: self.current_player,
            pos: mv,
        });
        self.current_player = self.current_player.opponent();
        Ok(())
    }

    /// `None` while the game is still running.
    pub fn end(&self) -> Option<GameEnd> {
        if let Some(p) = winner(&self.board) {
            Some(GameEnd::Winner(p))
        } else if self.board.is_full() {
            Some(GameEnd::Draw)
        } else {
            None
        }
    }

    pub fn play(
        &mut self,
        x_player: &dyn PlayerController,
        o_player: &dyn PlayerController,
    ) -> anyhow::Result<GameEnd> {
        loop {
            if let Some(end) = self.end() {
                return Ok(end);
            }

            let controller = match self.current_player {
                Player::X => x_player,
                Player::O => o_player,
            };
            let moves = legal_moves(&self.board);

            if let GameView::Interactive { think_delay } = self.view {
                if !controller.is_human() {
                    let mut state = DisplayState::default();
                    state.last_move = self.history.last().map(|r| r.pos);
                    state.status_msg = Some(format!(
                        "{} ({}) is thinking...",
                        controller.name(),
                        self.current_player
                    ));
                    render_board(&self.board, &state)?;

                    // 思考ウェイト中に終了判定
                    if crossterm::event::poll(think_delay)? {
                        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                            if key.code == crossterm::event::KeyCode::Char('q') {
                                info!("game interrupted by user");
                                return Ok(GameEnd::Aborted);
                            }
                        }
                    }
                }
            }

            let mv = match controller.choose_move(&self.board, &moves) {
                Some(mv) => mv,
                None if controller.is_human() => {
                    info!(player = %self.current_player, "game aborted by player");
                    return Ok(GameEnd::Aborted);
                }
                None => {
                    warn!(
                        board = %self.board,
                        "AI returned no move on an unfinished board, using fallback order"
                    );
                    match prefer_among(&moves, &FALLBACK_ORDER) {
                        Some(mv) => mv,
                        None => return Ok(GameEnd::Aborted),
                    }
                }
            };

            self.step(mv)?;
        }
    }

    /// Final screen for interactive games.
    pub fn render_final(&self, message: &str) -> anyhow::Result<()> {
        let mut state = DisplayState::default();
        state.last_move = self.history.last().map(|r| r.pos);
        state.highlights = winning_line(&self.board)
            .map(|(_, line)| line.to_vec())
            .unwrap_or_default();
        state.status_msg = Some(message.to_string());
        state.footer = Some("Press any key to continue.".to_string());
        render_board(&self.board, &state)?;
        Ok(())
    }
}
