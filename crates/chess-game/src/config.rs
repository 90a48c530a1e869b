//! Configuration file loading.
//!
//! Player names and AI tuning come from a TOML file, `chess.toml` in the
//! current directory by default. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use chess_ai::Difficulty;
use chess_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::GameSettings;
use crate::status::GameMode;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The `[players]` table.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlayersConfig {
    #[serde(default = "default_white")]
    pub white: String,
    #[serde(default = "default_black")]
    pub black: String,
}

fn default_white() -> String {
    "White".to_string()
}

fn default_black() -> String {
    "Computer".to_string()
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            white: default_white(),
            black: default_black(),
        }
    }
}

/// The `[ai]` table.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// Defaults to medium.
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    /// Side the AI plays. Defaults to black.
    #[serde(default = "default_ai_color")]
    pub color: Color,
    /// Upper bound on search nodes per move.
    #[serde(default)]
    pub node_limit: Option<u64>,
    /// Seed for reproducible Easy play.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

fn default_ai_color() -> Color {
    Color::Black
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            difficulty: default_difficulty(),
            color: default_ai_color(),
            node_limit: None,
            seed: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub players: PlayersConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

impl GameConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Loads the configuration from `path`, or the defaults if it does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns `chess.toml` in the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    /// Builds game settings for `mode`. The difficulty is only carried for
    /// AI games.
    pub fn settings(&self, mode: GameMode) -> GameSettings {
        let difficulty = match mode {
            GameMode::HumanVsAi => Some(self.ai.difficulty),
            GameMode::HumanVsHuman => None,
        };
        GameSettings {
            mode,
            difficulty,
            white: self.players.white.clone(),
            black: self.players.black.clone(),
            ai_color: self.ai.color,
        }
    }
}
