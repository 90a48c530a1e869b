//! Chess AI with difficulty tiers.
//!
//! - [`evaluation`] - material + piece-square tables + repetition penalty
//! - [`ordering`] - capture-first move ordering
//! - [`Searcher`] - minimax with alpha-beta pruning and an optional node budget
//! - [`AiAgent`] - picks moves for one color at a [`Difficulty`]
//!
//! # Example
//!
//! ```
//! use chess_ai::{AiAgent, Difficulty};
//! use chess_core::Color;
//! use chess_engine::Position;
//!
//! let mut position = Position::standard();
//! let mut agent = AiAgent::new(Difficulty::Medium, Color::White);
//! let mv = agent.get_best_move(&mut position).unwrap();
//! assert!(position.attempts_move(mv.from(), mv.to()));
//! ```

mod agent;
pub mod evaluation;
pub mod ordering;
mod search;

pub use agent::{AiAgent, Difficulty, DifficultyParseError};
pub use evaluation::evaluate;
pub use search::{Searcher, INFINITY};
