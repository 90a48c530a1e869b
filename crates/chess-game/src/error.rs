//! Game controller errors.

use chess_core::{Color, PlacementError};
use chess_engine::{InvariantError, MoveError};
use thiserror::Error;

use crate::status::GameStatus;

/// Reasons a game request is refused.
///
/// Display strings are the messages shown to players. A refused request
/// leaves the game untouched, except [`GameError::AiHasNoMove`], which
/// refreshes the terminal status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game is not active. Status: {status}")]
    NotActive { status: GameStatus },

    #[error("No piece at the starting position.")]
    NoPiece,

    #[error("It's {turn}'s turn, not {color}'s.")]
    WrongTurn { turn: Color, color: Color },

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("Invalid algebraic notation '{0}'. Use format like 'a2'.")]
    InvalidSquare(String),

    #[error("Invalid difficulty. Choose from 'easy', 'medium', or 'hard'.")]
    MissingDifficulty,

    #[error("No AI player configured for {0}.")]
    NoAgent(Color),

    #[error("AI has no legal moves. Game status: {status}")]
    AiHasNoMove { status: GameStatus },

    #[error("Game not started.")]
    NotStarted,
}

/// Errors reading a persisted game.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid board: {0}")]
    Placement(#[from] PlacementError),

    #[error("Inconsistent board: {0}")]
    Invariant(#[from] InvariantError),

    #[error("Invalid square in move history: '{0}'")]
    InvalidSquare(String),

    #[error("Snapshot of a game that was never started")]
    NotStarted,

    #[error("AI game without a difficulty")]
    MissingDifficulty,
}
