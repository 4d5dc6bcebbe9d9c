use crate::core::{Board, Move, Player};
use crossterm::event::{self, Event};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::time::Duration;
use std::io::{self, stdout, Write};

pub struct DisplayState {
    pub cursor: Move,
    pub show_cursor: bool,
    pub highlights: Vec<usize>,
    pub status_msg: Option<String>,
    pub last_move: Option<Move>,
    pub footer: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            // 中央から
            cursor: Move::CENTER,
            show_cursor: false,
            highlights: Vec::new(),
            status_msg: None,
            last_move: None,
            footer: None,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    print!("=== Tic-Tac-Toe (Minimax) ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    for row in 0..3 {
        print!("   ");
        for col in 0..3 {
            let Some(mv) = Move::from_row_col(row, col) else {
                continue;
            };
            let is_cursor = state.show_cursor && state.cursor == mv;
            let is_highlight = state.highlights.contains(&mv.index());
            let is_last_move = state.last_move == Some(mv);

            let (prefix, suffix) = if is_cursor {
                ("[", "]")
            } else if is_last_move {
                ("{", "}")
            } else {
                (" ", " ")
            };

            let piece = board.get(mv);
            let char_str = match piece {
                Some(p) => p.to_string(),
                None => mv.to_string(),
            };
            let cell_text = format!("{}{}{}", prefix, char_str, suffix);

            if is_highlight {
                print!("{}", cell_text.green().bold());
            } else if is_cursor {
                print!("{}", cell_text.yellow());
            } else if is_last_move {
                print!("{}", cell_text.red());
            } else {
                match piece {
                    Some(Player::X) => print!("{}", cell_text.cyan()),
                    Some(Player::O) => print!("{}", cell_text.magenta()),
                    None => print!("{}", cell_text.dark_grey()),
                }
            }

            if col < 2 {
                print!("|");
            }
        }
        print!("\r\n");
        if row < 2 {
            print!("   ---+---+---\r\n");
        }
    }
    print!("\r\n");

    if let Some(footer) = &state.footer {
        print!("{}\r\n", footer);
    }
    out.flush()
}

/// Blocks until any key is pressed.
pub fn wait_for_key() -> io::Result<()> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}
