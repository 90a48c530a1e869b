//! Game controller for the chess engine and AI.
//!
//! - [`Game`] - turn handling, status machine and AI moves
//! - [`GameSnapshot`] - serializable game state (JSON)
//! - [`GameConfig`] - player names and AI tuning (TOML)
//!
//! # Example
//!
//! ```
//! use chess_ai::Difficulty;
//! use chess_game::{Game, GameSettings, GameStatus};
//!
//! let mut game = Game::new();
//! game.start(GameSettings::human_vs_ai(Difficulty::Easy, "Alice", "Computer"))
//!     .unwrap();
//! game.submit_move_algebraic("e2", "e4").unwrap();
//! let reply = game.request_ai_move().unwrap();
//! assert_eq!(reply.status, GameStatus::Active);
//! ```

mod config;
mod error;
mod game;
mod snapshot;
mod status;

pub use config::{AiConfig, ConfigError, GameConfig, PlayersConfig};
pub use error::{GameError, SnapshotError};
pub use game::{Game, GameSettings, MoveReport};
pub use snapshot::{GameSnapshot, Players};
pub use status::{GameMode, GameStatus};
