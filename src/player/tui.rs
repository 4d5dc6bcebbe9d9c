use crate::core::{Board, Move, Player};
use crate::display::{render_board, DisplayState};
use crate::player::PlayerController;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;
use tracing::warn;

pub struct TuiController {
    player: Player,
    name: String,
}

impl TuiController {
    pub fn new(player: Player, name: &str) -> Self {
        Self {
            player,
            name: name.to_string(),
        }
    }

    fn read_key(&self) -> std::io::Result<Option<KeyCode>> {
        if !event::poll(Duration::from_millis(100))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => Ok(Some(code)),
            _ => Ok(None),
        }
    }
}

/// Digit key `1`-`9` to a 0-based cell index.
pub fn cell_for_key(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d @ 1..=9) => Some(d as usize - 1),
        _ => None,
    }
}

/// Cursor movement on the 3x3 grid, clamped at the edges.
pub fn step_cursor(cursor: Move, code: KeyCode) -> Move {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match code {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Move::from_row_col(row, col).unwrap_or(cursor)
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }

    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move> {
        let mut state = DisplayState::default();
        state.show_cursor = true;
        state.status_msg = Some(format!("{}'s turn ({})", self.name, self.player));
        state.footer = Some(
            "[1-9]: Place | [Arrows]: Move | [Enter]: Place at cursor | [q]: Quit".to_string(),
        );
        // 空きマスにカーソルを合わせる
        if let Some(&first) = legal_moves.first() {
            if board.get(state.cursor).is_some() {
                state.cursor = first;
            }
        }

        let mut dirty = true;
        loop {
            if dirty {
                if let Err(e) = render_board(board, &state) {
                    warn!("render failed: {}", e);
                    return None;
                }
                dirty = false;
            }

            let code = match self.read_key() {
                Ok(Some(code)) => code,
                Ok(None) => continue,
                Err(e) => {
                    warn!("terminal input failed: {}", e);
                    return None;
                }
            };

            let picked = match code {
                KeyCode::Char('q') | KeyCode::Esc => return None,
                KeyCode::Enter | KeyCode::Char(' ') => Some(state.cursor.index()),
                KeyCode::Char(c) => match cell_for_key(c) {
                    Some(index) => Some(index),
                    None => continue,
                },
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                    state.cursor = step_cursor(state.cursor, code);
                    dirty = true;
                    None
                }
                _ => None,
            };

            let Some(index) = picked else {
                continue;
            };
            match board.validate(index) {
                Ok(mv) if legal_moves.contains(&mv) => return Some(mv),
                Ok(mv) => {
                    state.status_msg = Some(format!("Cell {} is not playable now.", mv));
                }
                Err(e) => {
                    state.status_msg = Some(format!("{}. Choose another.", e));
                }
            }
            state.cursor = Move::new(index).unwrap_or(state.cursor);
            dirty = true;
        }
    }
}
