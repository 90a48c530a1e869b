//! Difficulty-tiered move selection.

use std::fmt;
use std::str::FromStr;

use chess_core::{Color, Move};
use chess_engine::{legal_moves, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evaluation::piece_value;
use crate::search::Searcher;

/// How hard the agent tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Best capture by victim value, otherwise a random legal move.
    Easy,
    /// Two-ply alpha-beta search.
    Medium,
    /// Three-ply alpha-beta search.
    Hard,
}

impl Difficulty {
    /// Search depth in plies, or `None` for Easy.
    pub const fn depth(self) -> Option<u32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(2),
            Difficulty::Hard => Some(3),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{0}', expected easy, medium or hard")]
pub struct DifficultyParseError(pub String);

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyParseError(s.to_string())),
        }
    }
}

/// A computer player bound to one color.
///
/// Holds no game state between calls apart from its random generator.
#[derive(Debug, Clone)]
pub struct AiAgent {
    difficulty: Difficulty,
    color: Color,
    rng: StdRng,
    node_limit: Option<u64>,
}

impl AiAgent {
    /// Creates an agent seeded from system entropy.
    pub fn new(difficulty: Difficulty, color: Color) -> Self {
        AiAgent {
            difficulty,
            color,
            rng: StdRng::from_entropy(),
            node_limit: None,
        }
    }

    /// Reseeds the random generator for reproducible Easy play.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Bounds each search to roughly `limit` nodes.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Picks a move for the agent's color, or `None` if it has no legal move.
    ///
    /// The position is searched in place and is unchanged on return.
    pub fn get_best_move(&mut self, position: &mut Position) -> Option<Move> {
        let moves = legal_moves(position, self.color);
        if moves.is_empty() {
            return None;
        }

        match self.difficulty.depth() {
            None => {
                let mut best: Option<(i32, Move)> = None;
                for &mv in &moves {
                    if let Some(victim) = position.piece_at(mv.to()) {
                        let value = piece_value(victim.kind());
                        if best.map_or(true, |(score, _)| value > score) {
                            best = Some((value, mv));
                        }
                    }
                }
                match best {
                    Some((_, mv)) => Some(mv),
                    None => moves.as_slice().choose(&mut self.rng).copied(),
                }
            }
            Some(depth) => {
                let mut searcher = Searcher::new(self.color);
                if let Some(limit) = self.node_limit {
                    searcher = searcher.with_node_limit(limit);
                }
                searcher.search(position, depth).1
            }
        }
    }
}
