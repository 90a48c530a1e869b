//! Move generation.
//!
//! Pseudo-legal destinations come from a single `match` over the piece kind.
//! Legal moves are the pseudo-legal ones that survive a probe without leaving
//! the mover's king attacked.

mod attacks;
pub mod perft;

use crate::Position;
use chess_core::{Color, Move, Piece, PieceKind, Square};

pub use attacks::{is_king_attacked, is_square_attacked};
use attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns a mutable slice of the moves, e.g. for ordering.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    /// Returns true if the list contains `m`.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Squares the piece could move to by geometry and occupancy alone.
///
/// Self-check is ignored. There is no castling, en passant or promotion.
pub fn pseudo_legal_destinations(piece: &Piece, position: &Position) -> Vec<Square> {
    let from = piece.square();
    let color = piece.color();
    let mut out = Vec::with_capacity(27);

    match piece.kind() {
        PieceKind::Pawn => {
            let dir = color.pawn_direction();
            if let Some(one) = from.offset(0, dir).filter(|s| position.piece_at(*s).is_none()) {
                out.push(one);
                if from.rank() == color.pawn_rank() {
                    if let Some(two) = one
                        .offset(0, dir)
                        .filter(|s| position.piece_at(*s).is_none())
                    {
                        out.push(two);
                    }
                }
            }
            for df in [-1, 1] {
                if let Some(target) = from.offset(df, dir) {
                    if position
                        .piece_at(target)
                        .is_some_and(|p| p.color() != color)
                    {
                        out.push(target);
                    }
                }
            }
        }
        PieceKind::Knight => push_steps(position, from, color, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => push_rays(position, from, color, &DIAGONALS, &mut out),
        PieceKind::Rook => push_rays(position, from, color, &ORTHOGONALS, &mut out),
        PieceKind::Queen => {
            push_rays(position, from, color, &ORTHOGONALS, &mut out);
            push_rays(position, from, color, &DIAGONALS, &mut out);
        }
        PieceKind::King => push_steps(position, from, color, &KING_OFFSETS, &mut out),
    }

    out
}

/// Single-step targets that are empty or hold an enemy.
fn push_steps(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if position.piece_at(to).map_or(true, |p| p.color() != color) {
                out.push(to);
            }
        }
    }
}

/// Ray targets up to (and including) the first enemy, stopping before own pieces.
fn push_rays(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(df, dr) in directions {
        let mut current = from.offset(df, dr);
        while let Some(to) = current {
            match position.piece_at(to) {
                None => out.push(to),
                Some(p) => {
                    if p.color() != color {
                        out.push(to);
                    }
                    break;
                }
            }
            current = to.offset(df, dr);
        }
    }
}

/// Pseudo-legal moves of `color` that keep its king safe, appended in
/// generation order. Returns early once `limit` moves were found.
fn collect_legal(position: &mut Position, color: Color, limit: usize, moves: &mut MoveList) {
    let origins: Vec<Piece> = position.pieces(color).collect();
    for piece in origins {
        for to in pseudo_legal_destinations(&piece, position) {
            let mv = Move::new(piece.square(), to);
            let probe = position.probe(mv);
            if !is_king_attacked(&probe, color) {
                drop(probe);
                moves.push(mv);
                if moves.len() >= limit {
                    return;
                }
            }
        }
    }
}

/// Generates all legal moves for `color` in board-scan order.
///
/// Origins are scanned file-major (a1, a2, ..., h8) and each origin's
/// destinations keep their generation order.
pub fn legal_moves(position: &mut Position, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    collect_legal(position, color, MoveList::MAX_MOVES, &mut moves);
    moves
}

/// Returns true as soon as one legal move for `color` is found.
pub fn has_legal_move(position: &mut Position, color: Color) -> bool {
    let mut moves = MoveList::new();
    collect_legal(position, color, 1, &mut moves);
    !moves.is_empty()
}

/// Returns true if `mv` is legal for the piece standing on its origin square.
pub fn is_legal(position: &mut Position, mv: Move) -> bool {
    let Some(piece) = position.piece_at(mv.from()) else {
        return false;
    };
    if !pseudo_legal_destinations(&piece, position).contains(&mv.to()) {
        return false;
    }
    let probe = position.probe(mv);
    !is_king_attacked(&probe, piece.color())
}

/// Legal destinations for the piece on `from`, in generation order.
pub fn legal_destinations(position: &mut Position, from: Square) -> Vec<Square> {
    let Some(piece) = position.piece_at(from) else {
        return Vec::new();
    };
    pseudo_legal_destinations(&piece, position)
        .into_iter()
        .filter(|&to| {
            let probe = position.probe(Move::new(from, to));
            !is_king_attacked(&probe, piece.color())
        })
        .collect()
}
