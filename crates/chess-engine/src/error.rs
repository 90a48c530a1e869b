//! Engine error types.

use chess_core::{Color, Square};
use thiserror::Error;

/// Reasons a requested move is refused.
///
/// A refused move never changes the position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("No piece at the starting position.")]
    EmptySquare(Square),

    #[error("Invalid move for this piece.")]
    Unreachable { from: Square, to: Square },

    #[error("Invalid move: your king would be in check.")]
    LeavesKingInCheck { from: Square, to: Square },
}

/// A structural inconsistency found by [`Position::check_invariants`](crate::Position::check_invariants).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{color} has {count} kings")]
    ExtraKings { color: Color, count: usize },

    #[error("piece on {slot} records its square as {recorded}")]
    StraySquare { slot: Square, recorded: Square },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_error_messages() {
        assert_eq!(
            MoveError::EmptySquare(Square::E1).to_string(),
            "No piece at the starting position."
        );
        assert_eq!(
            MoveError::Unreachable {
                from: Square::E1,
                to: Square::E8
            }
            .to_string(),
            "Invalid move for this piece."
        );
        assert_eq!(
            MoveError::LeavesKingInCheck {
                from: Square::E1,
                to: Square::D1
            }
            .to_string(),
            "Invalid move: your king would be in check."
        );
    }

    #[test]
    fn invariant_error_messages() {
        assert_eq!(
            InvariantError::MissingKing(Color::Black).to_string(),
            "black has no king"
        );
        assert_eq!(
            InvariantError::ExtraKings {
                color: Color::White,
                count: 2
            }
            .to_string(),
            "white has 2 kings"
        );
        assert_eq!(
            InvariantError::StraySquare {
                slot: Square::A1,
                recorded: Square::H8
            }
            .to_string(),
            "piece on a1 records its square as h8"
        );
    }
}
