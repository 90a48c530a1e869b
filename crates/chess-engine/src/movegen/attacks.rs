//! Attack detection.
//!
//! Attacks are found by looking outward from the target square: pawn
//! diagonals, knight jumps, then the eight rays up to their first occupant.

use chess_core::{Color, PieceKind, Square};

use crate::Position;

/// Knight jump offsets as (file, rank) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

/// Diagonal ray directions.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Orthogonal ray directions.
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// The eight king steps, diagonals first.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
];

/// Returns true if any piece of color `by` attacks `sq`.
pub fn is_square_attacked(position: &Position, sq: Square, by: Color) -> bool {
    let is = |target: Option<Square>, kind: PieceKind| {
        target
            .and_then(|s| position.piece_at(s))
            .is_some_and(|p| p.color() == by && p.kind() == kind)
    };

    // An attacking pawn stands one rank behind the target from its own side
    let behind = -by.pawn_direction();
    if is(sq.offset(-1, behind), PieceKind::Pawn) || is(sq.offset(1, behind), PieceKind::Pawn) {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| is(sq.offset(df, dr), PieceKind::Knight))
    {
        return true;
    }

    for &(df, dr) in &KING_OFFSETS {
        let diagonal = df != 0 && dr != 0;
        let mut distance = 1;
        let mut current = sq.offset(df, dr);
        while let Some(s) = current {
            if let Some(piece) = position.piece_at(s) {
                if piece.color() == by {
                    let kind = piece.kind();
                    let slides = if diagonal {
                        kind.slides_diagonally()
                    } else {
                        kind.slides_orthogonally()
                    };
                    if slides || (distance == 1 && kind == PieceKind::King) {
                        return true;
                    }
                }
                break;
            }
            distance += 1;
            current = s.offset(df, dr);
        }
    }

    false
}

/// Returns true if the king of the given color is attacked.
///
/// A side without a king is never in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    match position.king_square(king_color) {
        Some(king_sq) => is_square_attacked(position, king_sq, king_color.opposite()),
        None => false,
    }
}
