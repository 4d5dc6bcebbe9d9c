//! JSON-lines game log.
//!
//! One object per finished game:
//! `{"timestamp":"2025-01-01T12:00:00.000000Z","moves":[{"player":"X","pos":4}],"result":"draw"}`

use super::{GameResult, MoveRecord};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub moves: Vec<MoveRecord>,
    pub result: GameResult,
}

impl LogEntry {
    /// Entry stamped with the current UTC time.
    pub fn new(moves: Vec<MoveRecord>, result: GameResult) -> Self {
        Self {
            timestamp: chrono::Utc::now()
                .format("%Y-%m-%dT%H:%M:%S%.6fZ")
                .to_string(),
            moves,
            result,
        }
    }
}

pub fn append_entry(path: &Path, entry: &LogEntry) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open game log {}", path.display()))?;

    let line = serde_json::to_string(entry)?;
    writeln!(file, "{}", line)?;
    debug!(path = %path.display(), moves = entry.moves.len(), "game logged");
    Ok(())
}

/// All entries in file order. A missing file is an empty log.
pub fn read_log(path: &Path) -> anyhow::Result<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file =
        File::open(path).with_context(|| format!("failed to open game log {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: LogEntry = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed log entry", path.display(), i + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}
