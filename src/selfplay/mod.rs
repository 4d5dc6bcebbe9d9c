use crate::config::{OpponentKind, SelfPlaySettings};
use crate::core::Player;
use crate::game::{Game, GameEnd};
use crate::player::ai::SearchStrategy;
use crate::player::{MinimaxAI, PlayerController, RandomAI};
use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub opponent: OpponentKind,
    pub strategy: SearchStrategy,
}

impl SelfPlayConfig {
    pub fn from_settings(settings: &SelfPlaySettings, strategy: SearchStrategy) -> Self {
        Self {
            num_games: settings.games,
            opponent: settings.opponent,
            strategy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub ai_mark: Player,
    pub winner: Option<Player>,
    pub moves: usize,
    pub time_ms: u128,
}

impl GameSummary {
    pub fn ai_lost(&self) -> bool {
        self.winner == Some(self.ai_mark.opponent())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub ai_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub opponent: OpponentKind,
    pub strategy: SearchStrategy,
    pub games: Vec<GameSummary>,
}

impl SelfPlayStats {
    pub fn new(opponent: OpponentKind, strategy: SearchStrategy) -> Self {
        Self {
            total_games: 0,
            ai_wins: 0,
            opponent_wins: 0,
            draws: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            opponent,
            strategy,
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: GameSummary) {
        self.total_games += 1;
        match result.winner {
            Some(p) if p == result.ai_mark => self.ai_wins += 1,
            Some(_) => self.opponent_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }
}

/// Plays `num_games` independent games on the rayon pool. The AI takes X in
/// even-numbered games and O in odd-numbered ones.
pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let summaries: Vec<GameSummary> = (0..config.num_games)
        .into_par_iter()
        .map(|game_num| play_one(game_num, config))
        .collect::<anyhow::Result<_>>()?;

    let mut stats = SelfPlayStats::new(config.opponent, config.strategy);
    for summary in summaries {
        stats.add_result(summary);
    }

    if stats.opponent_wins > 0 {
        warn!(losses = stats.opponent_wins, "AI lost games in self-play");
    }
    info!(
        games = stats.total_games,
        ai_wins = stats.ai_wins,
        draws = stats.draws,
        "self-play finished"
    );
    Ok(stats)
}

fn play_one(game_num: usize, config: &SelfPlayConfig) -> anyhow::Result<GameSummary> {
    let start_time = Instant::now();
    let ai_mark = if game_num % 2 == 0 { Player::X } else { Player::O };

    let ai = MinimaxAI::with_strategy(ai_mark, "AI", config.strategy);
    let opponent: Box<dyn PlayerController> = match config.opponent {
        OpponentKind::Random => Box::new(RandomAI::new(ai_mark.opponent(), "Random")),
        OpponentKind::Minimax => Box::new(MinimaxAI::with_strategy(
            ai_mark.opponent(),
            "Opponent AI",
            config.strategy,
        )),
    };

    let ai_ref: &dyn PlayerController = &ai;
    let (x_player, o_player) = match ai_mark {
        Player::X => (ai_ref, opponent.as_ref()),
        Player::O => (opponent.as_ref(), ai_ref),
    };

    let mut game = Game::new();
    let end = game
        .play(x_player, o_player)
        .with_context(|| format!("self-play game {} failed", game_num + 1))?;

    let winner = match end {
        GameEnd::Winner(p) => Some(p),
        GameEnd::Draw | GameEnd::Aborted => None,
    };

    Ok(GameSummary {
        ai_mark,
        winner,
        moves: game.history.len(),
        time_ms: start_time.elapsed().as_millis(),
    })
}

pub fn save_stats(stats: &SelfPlayStats, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let filename = dir.join(format!(
        "selfplay_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let file = std::fs::File::create(&filename)?;
    serde_json::to_writer_pretty(file, stats)?;
    Ok(filename)
}

/// Summary lines, raw-mode friendly.
pub fn summary_lines(stats: &SelfPlayStats) -> Vec<String> {
    let pct = |n: usize| {
        if stats.total_games == 0 {
            0.0
        } else {
            n as f64 / stats.total_games as f64 * 100.0
        }
    };

    vec![
        "=== Self-Play Results ===".to_string(),
        format!(
            "Games: {} (AI {:?} vs {:?})",
            stats.total_games, stats.strategy, stats.opponent
        ),
        format!("AI Wins: {} ({:.1}%)", stats.ai_wins, pct(stats.ai_wins)),
        format!(
            "Opponent Wins: {} ({:.1}%)",
            stats.opponent_wins,
            pct(stats.opponent_wins)
        ),
        format!("Draws: {} ({:.1}%)", stats.draws, pct(stats.draws)),
        format!("Avg Moves: {:.1}", stats.avg_moves),
        format!("Avg Time: {:.1}ms", stats.avg_time_ms),
    ]
}
