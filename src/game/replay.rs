use super::{GameResult, LogEntry};
use crate::core::{Board, Move};
use crate::display::{render_board, wait_for_key, DisplayState};
use crate::logic::winning_line;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use std::io;
use std::path::Path;
use std::time::Duration;

/// How many of the most recent games the selector offers.
const RECENT_GAMES: usize = 9;

pub struct ReplayViewer {
    entry: LogEntry,
    boards: Vec<Board>,
    current_index: usize,
}

impl ReplayViewer {
    /// Pre-calculates every position of the logged game.
    pub fn new(entry: LogEntry) -> anyhow::Result<Self> {
        let mut board = Board::new();
        let mut boards = vec![board];

        for (i, record) in entry.moves.iter().enumerate() {
            board
                .try_apply(record.pos.index(), record.player)
                .with_context(|| format!("invalid move #{} in logged game", i + 1))?;
            boards.push(board);
        }

        Ok(Self {
            entry,
            boards,
            current_index: 0,
        })
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn current_board(&self) -> &Board {
        &self.boards[self.current_index]
    }

    pub fn forward(&mut self) {
        if self.current_index + 1 < self.boards.len() {
            self.current_index += 1;
        }
    }

    pub fn back(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    fn last_move(&self) -> Option<Move> {
        if self.current_index > 0 {
            Some(self.entry.moves[self.current_index - 1].pos)
        } else {
            None
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut dirty = true;
        loop {
            if dirty {
                let board = self.current_board();
                let mut state = DisplayState::default();
                state.last_move = self.last_move();
                state.highlights = winning_line(board)
                    .map(|(_, line)| line.to_vec())
                    .unwrap_or_default();
                state.status_msg = Some(format!(
                    "Replay {} | result: {}",
                    self.entry.timestamp,
                    result_label(self.entry.result)
                ));
                state.footer = Some(format!(
                    "Move {}/{} | [←/→] Navigate | [q] Quit",
                    self.current_index,
                    self.entry.moves.len()
                ));
                render_board(board, &state)?;
                dirty = false;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Right | KeyCode::Char('n') => {
                            self.forward();
                            dirty = true;
                        }
                        KeyCode::Left | KeyCode::Char('p') => {
                            self.back();
                            dirty = true;
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }
}

fn result_label(result: GameResult) -> &'static str {
    match result {
        GameResult::HumanWin => "human win",
        GameResult::AiWin => "AI win",
        GameResult::Draw => "draw",
        GameResult::Aborted => "aborted",
    }
}

/// The most recent games, newest first.
pub fn recent_entries(entries: &[LogEntry]) -> Vec<&LogEntry> {
    entries.iter().rev().take(RECENT_GAMES).collect()
}

/// Lists the recent games of the log and replays the one picked with 1-9.
pub fn run_replay_selector(log_path: &Path) -> anyhow::Result<()> {
    let entries = super::read_log(log_path)?;
    let recent = recent_entries(&entries);

    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0)
    )?;
    print!("=== Logged Games ({}) ===\r\n\r\n", log_path.display());

    if recent.is_empty() {
        print!("No games logged yet.\r\n\r\nPress any key to return.\r\n");
        wait_for_key()?;
        return Ok(());
    }

    for (i, entry) in recent.iter().enumerate() {
        print!(
            "{}. {} | {} moves | {}\r\n",
            i + 1,
            entry.timestamp,
            entry.moves.len(),
            result_label(entry.result)
        );
    }
    print!("\r\n[1-{}]: Replay | [q]: Back\r\n", recent.len());

    let choice = loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(c) => {
                        if let Some(d) = c.to_digit(10) {
                            let d = d as usize;
                            if (1..=recent.len()).contains(&d) {
                                break d - 1;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    };

    let mut viewer = ReplayViewer::new(recent[choice].clone())?;
    viewer.run()
}
