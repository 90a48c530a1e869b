//! Serializable view of a game.

use chess_ai::Difficulty;
use chess_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::status::{GameMode, GameStatus};

/// Display names of the two players.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Players {
    pub white: String,
    pub black: String,
}

/// Everything a caller needs to render or persist a game.
///
/// `board[rank][file]` holds piece symbols, row 0 being rank 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[Option<char>; 8]; 8],
    pub turn: Color,
    pub status: GameStatus,
    pub winner: Option<Color>,
    /// The king in check, White tested first.
    pub in_check: Option<Color>,
    pub move_history: Vec<[String; 2]>,
    pub players: Players,
    pub game_mode: Option<GameMode>,
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_color: Option<Color>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
