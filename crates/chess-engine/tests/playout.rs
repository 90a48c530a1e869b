//! Randomized playouts from the standard position.
//!
//! Each case plays a sequence of legal moves chosen by index and checks the
//! board invariants and the agreement between generation and validation
//! along the way.

use chess_core::{Color, Move, Square};
use chess_engine::{legal_moves, pseudo_legal_destinations, Position};
use proptest::prelude::*;
use proptest::sample::Index;

/// Plays up to `choices.len()` legal moves, calling `visit` before each one.
fn playout(choices: &[Index], mut visit: impl FnMut(&mut Position, Color)) -> Position {
    let mut position = Position::standard();
    let mut side = Color::White;
    for choice in choices {
        visit(&mut position, side);
        let moves = legal_moves(&mut position, side);
        if moves.is_empty() {
            break;
        }
        let mv = *choice.get(moves.as_slice());
        position
            .try_move(mv.from(), mv.to())
            .expect("generated move must be accepted");
        side = side.opposite();
        position.record_position(side);
    }
    position
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn invariants_hold_after_every_move(choices in prop::collection::vec(any::<Index>(), 0..60)) {
        let mut plies = 0;
        let position = playout(&choices, |position, _| {
            assert!(position.check_invariants().is_ok());
            assert_eq!(position.move_history().len(), plies);
            plies += 1;
        });
        prop_assert!(position.check_invariants().is_ok());
    }

    #[test]
    fn rejected_moves_leave_position_untouched(
        choices in prop::collection::vec(any::<Index>(), 0..40),
        attempts in prop::collection::vec((0u8..64, 0u8..64), 8),
    ) {
        playout(&choices, |position, side| {
            for &(a, b) in &attempts {
                let from = Square::at(a % 8, a / 8);
                let to = Square::at(b % 8, b / 8);
                let before = position.clone();
                let fingerprint = position.fingerprint(side);
                let mut scratch = position.clone();
                if !scratch.attempts_move(from, to) {
                    assert_eq!(scratch.fingerprint(side), fingerprint);
                    assert_eq!(&scratch, &before);
                }
                assert_eq!(*position, before);
            }
        });
    }

    #[test]
    fn generation_agrees_with_validation(choices in prop::collection::vec(any::<Index>(), 0..40)) {
        playout(&choices, |position, side| {
            let legal = legal_moves(position, side);
            let pieces: Vec<_> = position.pieces(side).collect();
            for piece in pieces {
                for to in pseudo_legal_destinations(&piece, position) {
                    let mv = Move::new(piece.square(), to);
                    let mut scratch = position.clone();
                    assert_eq!(
                        legal.contains(&mv),
                        scratch.attempts_move(mv.from(), mv.to()),
                        "disagreement on {}",
                        mv
                    );
                }
            }
        });
    }
}

#[test]
fn fools_mate_leaves_white_without_moves() {
    let mut position = Position::standard();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        let mv = Move::from_algebraic_pair(from, to).unwrap();
        position.try_move(mv.from(), mv.to()).unwrap();
    }
    assert!(chess_engine::is_checkmate(&mut position, Color::White));
    assert!(legal_moves(&mut position, Color::White).is_empty());
    assert_eq!(position.move_history().len(), 4);
}

#[test]
fn stalemate_position() {
    let mut position = Position::from_placement("8/8/8/8/8/1q6/2k5/K7 w").unwrap();
    assert!(!chess_engine::is_king_attacked(&position, Color::White));
    assert!(!chess_engine::has_legal_move(&mut position, Color::White));
    assert!(chess_engine::is_stalemate(&mut position, Color::White));
}

#[test]
fn shuffling_knights_repeats_the_start() {
    let mut position = Position::standard();
    let mut side = Color::White;
    for _ in 0..2 {
        for (from, to) in [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")] {
            let mv = Move::from_algebraic_pair(from, to).unwrap();
            position.try_move(mv.from(), mv.to()).unwrap();
            side = side.opposite();
            position.record_position(side);
        }
    }
    assert_eq!(side, Color::White);
    assert_eq!(position.repetition_count(Color::White), 3);
}
