//! Game status and mode enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    NotStarted,
    Active,
    Checkmate,
    Stalemate,
    /// Kept for persisted games; never assigned by the controller.
    Draw,
}

impl GameStatus {
    /// Returns true for statuses that end a game.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStatus::NotStarted => "not_started",
            GameStatus::Active => "active",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw => "draw",
        };
        write!(f, "{}", name)
    }
}

/// Who plays the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "player_vs_player")]
    HumanVsHuman,
    #[serde(rename = "player_vs_ai")]
    HumanVsAi,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::HumanVsHuman => "player_vs_player",
            GameMode::HumanVsAi => "player_vs_ai",
        };
        write!(f, "{}", name)
    }
}
