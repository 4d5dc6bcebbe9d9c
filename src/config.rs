use crate::player::ai::SearchStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "tictactoe_config.json";
pub const CONFIG_ENV_VAR: &str = "TICTACTOE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub version: String,
    /// JSON-lines file that receives one record per finished game.
    pub log_file: PathBuf,
    pub ai: AiSettings,
    pub selfplay: SelfPlaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub name: String,
    pub think_delay_ms: u64,
    pub strategy: SearchStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    Random,
    Minimax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlaySettings {
    pub games: usize,
    pub opponent: OpponentKind,
    pub save_stats: bool,
    pub stats_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            version: "1.0".to_string(),
            log_file: PathBuf::from("game_logs.jsonl"),
            ai: AiSettings::default(),
            selfplay: SelfPlaySettings::default(),
        }
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        AiSettings {
            name: "AI".to_string(),
            think_delay_ms: 600,
            strategy: SearchStrategy::Minimax,
        }
    }
}

impl Default for SelfPlaySettings {
    fn default() -> Self {
        SelfPlaySettings {
            games: 100,
            opponent: OpponentKind::Random,
            save_stats: true,
            stats_dir: PathBuf::from("selfplay_stats"),
        }
    }
}

impl AiSettings {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}

impl AppConfig {
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Reads `$TICTACTOE_CONFIG`, then `tictactoe_config.json`; falls back to
    /// defaults when neither exists or the file does not parse.
    pub fn load_or_default() -> Self {
        let path = match std::env::var(CONFIG_ENV_VAR) {
            Ok(p) => PathBuf::from(p),
            Err(_) => PathBuf::from(DEFAULT_CONFIG_PATH),
        };

        if !path.exists() {
            debug!("no config at {}, using built-in defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("failed to load {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
