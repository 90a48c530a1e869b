//! Terminal-state detection.
//!
//! Checkmate and stalemate are the only outcomes decided from the board.
//! Repetitions are counted by [`Position`] but never adjudicated.

use crate::movegen::{has_legal_move, is_king_attacked};
use crate::Position;
use chess_core::Color;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The side to move is mated.
    Checkmate { winner: Color },
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

/// Returns true if `color` is in check and has no legal move.
pub fn is_checkmate(position: &mut Position, color: Color) -> bool {
    is_king_attacked(position, color) && !has_legal_move(position, color)
}

/// Returns true if `color` is not in check but has no legal move.
pub fn is_stalemate(position: &mut Position, color: Color) -> bool {
    !is_king_attacked(position, color) && !has_legal_move(position, color)
}

/// Returns the outcome if `side_to_move` has no legal move.
pub fn outcome(position: &mut Position, side_to_move: Color) -> Option<Outcome> {
    if has_legal_move(position, side_to_move) {
        return None;
    }
    if is_king_attacked(position, side_to_move) {
        Some(Outcome::Checkmate {
            winner: side_to_move.opposite(),
        })
    } else {
        Some(Outcome::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    fn play(position: &mut Position, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            let from = Square::from_algebraic(from).unwrap();
            let to = Square::from_algebraic(to).unwrap();
            position.try_move(from, to).unwrap();
        }
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut position = Position::standard();
        play(
            &mut position,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert!(is_checkmate(&mut position, Color::White));
        assert!(!is_stalemate(&mut position, Color::White));
        assert_eq!(
            outcome(&mut position, Color::White),
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn stalemate() {
        let mut position = Position::from_placement("8/8/8/8/8/1q6/2k5/K7 w").unwrap();
        assert!(is_stalemate(&mut position, Color::White));
        assert!(!is_checkmate(&mut position, Color::White));
        assert_eq!(
            outcome(&mut position, Color::White),
            Some(Outcome::Stalemate)
        );
    }

    #[test]
    fn ongoing_game_has_no_outcome() {
        let mut position = Position::standard();
        assert_eq!(outcome(&mut position, Color::White), None);
        assert_eq!(outcome(&mut position, Color::Black), None);
    }

    #[test]
    fn check_with_escape_is_not_mate() {
        let mut position = Position::from_placement("4r3/8/8/8/8/8/8/4K3 w").unwrap();
        assert!(!is_checkmate(&mut position, Color::White));
        assert_eq!(outcome(&mut position, Color::White), None);
    }
}
