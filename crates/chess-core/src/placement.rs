//! Piece placement notation parsing.
//!
//! A placement is the first field of a FEN string: eight ranks from 8 down to
//! 1 separated by `/`, runs of empty squares written as digits. It may be
//! followed by a side-to-move tag (`w` or `b`), which is also the format of a
//! position fingerprint.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing a placement string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("invalid placement: expected 1 or 2 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid placement: expected 8 ranks, got {0}")]
    InvalidRankCount(usize),

    #[error("invalid character '{character}' in rank {rank}")]
    InvalidCharacter { character: char, rank: u8 },

    #[error("rank {rank} has {squares} squares, expected 8")]
    InvalidRankLength { rank: u8, squares: u32 },

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidSideToMove(String),
}

/// A parsed piece placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Pieces in the order they appear (rank 8 first, a-file to h-file).
    pub pieces: Vec<(Square, PieceKind, Color)>,
    /// Side to move, when the string carried a tag.
    pub side_to_move: Option<Color>,
}

impl Placement {
    /// The standard starting placement.
    pub const STANDARD: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Parses `placement` or `placement w|b`.
    pub fn parse(s: &str) -> Result<Self, PlacementError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.is_empty() || fields.len() > 2 {
            return Err(PlacementError::InvalidFieldCount(fields.len()));
        }

        let side_to_move = match fields.get(1) {
            None => None,
            Some(tag) => {
                let mut chars = tag.chars();
                match (chars.next().and_then(Color::from_tag), chars.next()) {
                    (Some(color), None) => Some(color),
                    _ => return Err(PlacementError::InvalidSideToMove(tag.to_string())),
                }
            }
        };

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::InvalidRankCount(ranks.len()));
        }

        let mut pieces = Vec::with_capacity(32);
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file: u32 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip;
                } else if let Some((kind, color)) = PieceKind::from_symbol(c) {
                    if file < 8 {
                        pieces.push((Square::at(file as u8, rank), kind, color));
                    }
                    file += 1;
                } else {
                    return Err(PlacementError::InvalidCharacter {
                        character: c,
                        rank: rank + 1,
                    });
                }
            }
            if file != 8 {
                return Err(PlacementError::InvalidRankLength {
                    rank: rank + 1,
                    squares: file,
                });
            }
        }

        Ok(Placement {
            pieces,
            side_to_move,
        })
    }
}
