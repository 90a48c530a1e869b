//! Capture-first move ordering (most valuable victim, least valuable attacker).

use std::cmp::Reverse;

use chess_core::Move;
use chess_engine::{MoveList, Position};

use crate::evaluation::piece_value;

/// `10 × victim − attacker` for captures, 0 for quiet moves.
pub fn capture_score(position: &Position, mv: Move) -> i32 {
    match (position.piece_at(mv.from()), position.piece_at(mv.to())) {
        (Some(attacker), Some(victim)) => {
            10 * piece_value(victim.kind()) - piece_value(attacker.kind())
        }
        _ => 0,
    }
}

/// Sorts moves by descending capture score. Ties keep their generation order.
pub fn order_moves(position: &Position, moves: &mut MoveList) {
    moves
        .as_mut_slice()
        .sort_by_key(|mv| Reverse(capture_score(position, *mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;
    use chess_engine::legal_moves;

    fn mv(from: &str, to: &str) -> Move {
        Move::from_algebraic_pair(from, to).unwrap()
    }

    #[test]
    fn scores_captures_by_victim_then_attacker() {
        let pos = Position::from_placement("4k3/8/8/3q4/2P2N2/8/8/4K3 w").unwrap();
        assert_eq!(capture_score(&pos, mv("c4", "d5")), 9000 - 100);
        assert_eq!(capture_score(&pos, mv("e1", "e2")), 0);
        // Empty origin scores as quiet
        assert_eq!(capture_score(&pos, mv("a1", "d5")), 0);
    }

    #[test]
    fn order_puts_best_capture_first_and_keeps_ties_stable() {
        let mut pos = Position::from_placement("4k3/8/8/3q4/2P2N2/8/8/4K3 w").unwrap();
        let mut moves = legal_moves(&mut pos, Color::White);
        let quiet_before: Vec<Move> = moves
            .as_slice()
            .iter()
            .copied()
            .filter(|m| capture_score(&pos, *m) == 0)
            .collect();

        order_moves(&pos, &mut moves);

        // Pawn takes queen beats knight takes queen
        assert_eq!(moves[0], mv("c4", "d5"));
        assert_eq!(moves[1], mv("f4", "d5"));
        let quiet_after: Vec<Move> = moves.as_slice()[2..].to_vec();
        assert_eq!(quiet_after, quiet_before);
    }
}
