//! Chess position representation.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::ops::{Deref, DerefMut};

use chess_core::{Color, Move, Piece, PieceKind, Placement, PlacementError, Square};
use tracing::debug;

use crate::error::{InvariantError, MoveError};
use crate::movegen::{is_king_attacked, pseudo_legal_destinations};

/// Back-rank piece order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Board state plus the history needed for repetition tracking.
///
/// The board is an 8×8 mailbox indexed `[file][rank]`. Every occupied slot
/// owns exactly one [`Piece`] whose recorded square equals the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [[Option<Piece>; 8]; 8],
    /// Moves finalized through [`Position::try_move`], oldest first.
    move_log: Vec<Move>,
    /// Fingerprint to number of times it was recorded.
    repetitions: HashMap<String, u32>,
}

/// A move that has been applied and can be reverted exactly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Applied {
    mv: Move,
    captured: Option<Piece>,
}

impl Position {
    /// Creates a position with no pieces and no history.
    pub fn empty() -> Self {
        Position {
            board: [[None; 8]; 8],
            move_log: Vec::new(),
            repetitions: HashMap::new(),
        }
    }

    /// Creates the standard starting position with White to move recorded once.
    pub fn standard() -> Self {
        let mut position = Self::empty();
        position.place_standard_setup();
        position.record_position(Color::White);
        position
    }

    /// Places the 32 pieces of the standard setup.
    ///
    /// Existing occupants of the affected squares are replaced; other squares
    /// are left alone.
    pub fn place_standard_setup(&mut self) {
        for color in Color::BOTH {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as u8;
                self.put(Square::at(file, color.back_rank()), *kind, color);
                self.put(Square::at(file, color.pawn_rank()), PieceKind::Pawn, color);
            }
        }
    }

    /// Builds a position from a piece placement such as
    /// `"8/8/8/8/8/1q6/2k5/K7 w"`.
    ///
    /// The position is recorded once for the tagged side to move, or for
    /// White when the placement carries no tag.
    pub fn from_placement(s: &str) -> Result<Self, PlacementError> {
        let placement = Placement::parse(s)?;
        let mut position = Self::empty();
        for (square, kind, color) in placement.pieces {
            position.put(square, kind, color);
        }
        position.record_position(placement.side_to_move.unwrap_or(Color::White));
        Ok(position)
    }

    /// Builds a position from a symbol grid (row 0 = rank 1) without recording it.
    pub fn from_symbols(grid: &[[Option<char>; 8]; 8]) -> Result<Self, PlacementError> {
        let mut position = Self::empty();
        for (rank, row) in grid.iter().enumerate() {
            for (file, symbol) in row.iter().enumerate() {
                let Some(c) = *symbol else { continue };
                let (kind, color) =
                    PieceKind::from_symbol(c).ok_or(PlacementError::InvalidCharacter {
                        character: c,
                        rank: rank as u8 + 1,
                    })?;
                position.put(Square::at(file as u8, rank as u8), kind, color);
            }
        }
        Ok(position)
    }

    /// Puts a new piece on `square`, returning whatever stood there before.
    pub fn put(&mut self, square: Square, kind: PieceKind, color: Color) -> Option<Piece> {
        self.slot_mut(square)
            .replace(Piece::new(kind, color, square))
    }

    /// Removes and returns the piece on `square`.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.slot_mut(square).take()
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.file() as usize][square.rank() as usize]
    }

    #[inline]
    fn slot_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.board[square.file() as usize][square.rank() as usize]
    }

    /// Iterates over all pieces in board-scan order.
    pub fn occupants(&self) -> impl Iterator<Item = Piece> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq))
    }

    /// Iterates over the pieces of one color in board-scan order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.occupants().filter(move |p| p.color() == color)
    }

    /// Returns the square of the first king of `color` in scan order.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|p| p.kind() == PieceKind::King)
            .map(|p| p.square())
    }

    /// Moves the piece on `mv.from()` to `mv.to()`, dropping any occupant.
    ///
    /// # Panics
    ///
    /// Panics if the origin square is empty. Callers only apply generated moves.
    pub(crate) fn apply(&mut self, mv: Move) -> Applied {
        let mut piece = self
            .remove(mv.from())
            .expect("apply: no piece on origin square");
        piece.set_square(mv.to());
        let captured = self.slot_mut(mv.to()).replace(piece);
        Applied { mv, captured }
    }

    /// Reverts an [`Applied`] move exactly.
    pub(crate) fn undo(&mut self, applied: Applied) {
        let mv = applied.mv;
        let mut piece = self
            .remove(mv.to())
            .expect("undo: no piece on destination square");
        piece.set_square(mv.from());
        *self.slot_mut(mv.from()) = Some(piece);
        *self.slot_mut(mv.to()) = applied.captured;
    }

    /// Applies `mv` speculatively. The move is undone when the guard drops.
    ///
    /// The move must come from the pseudo-legal set of the piece on its
    /// origin square. Probes nest: an inner guard must drop before the outer.
    pub fn probe(&mut self, mv: Move) -> Probe<'_> {
        let applied = self.apply(mv);
        Probe {
            position: self,
            applied: Some(applied),
        }
    }

    /// Plays a legal move and appends it to the move log.
    ///
    /// The piece on `from` must be able to reach `to` and the move must not
    /// leave the mover's king attacked. On failure the position is unchanged.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<Move, MoveError> {
        let piece = self.piece_at(from).ok_or(MoveError::EmptySquare(from))?;
        if !pseudo_legal_destinations(&piece, self).contains(&to) {
            debug!(%from, %to, "rejected move: unreachable");
            return Err(MoveError::Unreachable { from, to });
        }

        let probe = self.probe(Move::new(from, to));
        if is_king_attacked(&probe, piece.color()) {
            debug!(%from, %to, "rejected move: king left in check");
            return Err(MoveError::LeavesKingInCheck { from, to });
        }
        Ok(probe.commit())
    }

    /// Returns true if [`try_move`](Position::try_move) succeeded.
    pub fn attempts_move(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Canonical placement string plus side-to-move tag, e.g.
    /// `"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"`.
    pub fn fingerprint(&self, side_to_move: Color) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::at(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(out, "{}", empty);
                            empty = 0;
                        }
                        out.push(piece.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(out, "{}", empty);
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push(' ');
        out.push(side_to_move.tag());
        out
    }

    /// Counts one more occurrence of the current position.
    pub fn record_position(&mut self, side_to_move: Color) {
        let key = self.fingerprint(side_to_move);
        *self.repetitions.entry(key).or_insert(0) += 1;
    }

    /// How many times the current position was recorded (0 if never).
    pub fn repetition_count(&self, side_to_move: Color) -> u32 {
        self.repetitions
            .get(&self.fingerprint(side_to_move))
            .copied()
            .unwrap_or(0)
    }

    /// Finalized moves, oldest first.
    pub fn move_history(&self) -> &[Move] {
        &self.move_log
    }

    /// Appends moves to the log without playing them. Used when restoring a
    /// position whose board already reflects those moves.
    pub fn extend_history(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.move_log.extend(moves);
    }

    /// Symbol grid with row 0 = rank 1 and column 0 = a-file.
    pub fn symbols(&self) -> [[Option<char>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for piece in self.occupants() {
            let sq = piece.square();
            grid[sq.rank() as usize][sq.file() as usize] = Some(piece.symbol());
        }
        grid
    }

    /// Verifies one king per color and that every piece records its own slot.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq) {
                if piece.square() != sq {
                    return Err(InvariantError::StraySquare {
                        slot: sq,
                        recorded: piece.square(),
                    });
                }
            }
        }
        for color in Color::BOTH {
            let count = self
                .pieces(color)
                .filter(|p| p.kind() == PieceKind::King)
                .count();
            match count {
                0 => return Err(InvariantError::MissingKing(color)),
                1 => {}
                count => return Err(InvariantError::ExtraKings { color, count }),
            }
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

/// Scope guard for a speculatively applied move.
///
/// Dereferences to the position in its post-move state. Dropping the guard
/// restores the position, including during unwinding.
pub struct Probe<'a> {
    position: &'a mut Position,
    applied: Option<Applied>,
}

impl Probe<'_> {
    /// The move held by this guard.
    pub fn mv(&self) -> Move {
        self.applied.map(|a| a.mv).unwrap_or(Move::NULL)
    }

    /// Keeps the move on the board and logs it.
    pub(crate) fn commit(mut self) -> Move {
        let mv = self.mv();
        self.applied = None;
        self.position.move_log.push(mv);
        mv
    }
}

impl Deref for Probe<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        if let Some(applied) = self.applied.take() {
            self.position.undo(applied);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_setup() {
        let pos = Position::standard();
        assert_eq!(pos.occupants().count(), 32);
        assert_eq!(
            pos.piece_at(Square::E1).map(|p| (p.kind(), p.color())),
            Some((PieceKind::King, Color::White))
        );
        assert_eq!(
            pos.piece_at(Square::D8).map(|p| (p.kind(), p.color())),
            Some((PieceKind::Queen, Color::Black))
        );
        assert_eq!(pos.piece_at(sq("e4")), None);
        assert!(pos.check_invariants().is_ok());
    }

    #[test]
    fn standard_fingerprint() {
        let pos = Position::standard();
        assert_eq!(
            pos.fingerprint(Color::White),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"
        );
        assert_eq!(pos.repetition_count(Color::White), 1);
        assert_eq!(pos.repetition_count(Color::Black), 0);
    }

    #[test]
    fn from_placement_records_once() {
        let pos = Position::from_placement("8/8/8/8/8/1q6/2k5/K7 w").unwrap();
        assert_eq!(pos.fingerprint(Color::White), "8/8/8/8/8/1q6/2k5/K7 w");
        assert_eq!(pos.repetition_count(Color::White), 1);
        assert_eq!(pos.king_square(Color::White), Some(Square::A1));
        assert_eq!(pos.king_square(Color::Black), Some(sq("c2")));
    }

    #[test]
    fn from_placement_rejects_garbage() {
        assert!(Position::from_placement("not a board").is_err());
    }

    #[test]
    fn symbols_round_trip() {
        let pos = Position::standard();
        let grid = pos.symbols();
        assert_eq!(grid[0][4], Some('K'));
        assert_eq!(grid[7][3], Some('q'));
        assert_eq!(grid[3][4], None);

        let rebuilt = Position::from_symbols(&grid).unwrap();
        assert_eq!(
            rebuilt.fingerprint(Color::White),
            pos.fingerprint(Color::White)
        );
        assert_eq!(rebuilt.repetition_count(Color::White), 0);
    }

    #[test]
    fn from_symbols_rejects_unknown_symbol() {
        let mut grid = [[None; 8]; 8];
        grid[2][5] = Some('x');
        assert_eq!(
            Position::from_symbols(&grid),
            Err(PlacementError::InvalidCharacter {
                character: 'x',
                rank: 3
            })
        );
    }

    #[test]
    fn try_move_logs_and_moves_piece() {
        let mut pos = Position::standard();
        let mv = pos.try_move(sq("e2"), sq("e4")).unwrap();
        assert_eq!(mv, Move::new(sq("e2"), sq("e4")));
        assert_eq!(pos.piece_at(sq("e2")), None);
        assert_eq!(pos.piece_at(sq("e4")).map(|p| p.square()), Some(sq("e4")));
        assert_eq!(pos.move_history(), &[mv]);
    }

    #[test]
    fn try_move_failures() {
        let mut pos = Position::standard();
        assert_eq!(
            pos.try_move(sq("e4"), sq("e5")),
            Err(MoveError::EmptySquare(sq("e4")))
        );
        assert_eq!(
            pos.try_move(sq("e2"), sq("e5")),
            Err(MoveError::Unreachable {
                from: sq("e2"),
                to: sq("e5")
            })
        );

        // Pinned bishop: moving it exposes the king to the rook
        let mut pinned = Position::from_placement("4r3/8/8/8/8/8/4B3/4K3 w").unwrap();
        let before = pinned.clone();
        assert_eq!(
            pinned.try_move(sq("e2"), sq("d3")),
            Err(MoveError::LeavesKingInCheck {
                from: sq("e2"),
                to: sq("d3")
            })
        );
        assert_eq!(pinned, before);
    }

    #[test]
    fn probe_reverts_on_drop() {
        let mut pos = Position::from_placement("4k3/8/8/3p4/8/4N3/8/4K3 w").unwrap();
        let before = pos.clone();
        {
            let probe = pos.probe(Move::new(sq("e3"), sq("d5")));
            assert_eq!(
                probe.piece_at(sq("d5")).map(|p| p.kind()),
                Some(PieceKind::Knight)
            );
            assert_eq!(probe.piece_at(sq("e3")), None);
            assert_eq!(probe.occupants().count(), 3);
        }
        assert_eq!(pos, before);
    }

    #[test]
    fn nested_guards_revert() {
        let mut pos = Position::standard();
        let before = pos.clone();
        {
            let mut outer = pos.probe(Move::new(sq("e2"), sq("e4")));
            {
                let inner = outer.probe(Move::new(sq("d7"), sq("d5")));
                assert!(inner.piece_at(sq("d5")).is_some());
            }
            assert!(outer.piece_at(sq("d5")).is_none());
            assert!(outer.piece_at(sq("e4")).is_some());
        }
        assert_eq!(pos, before);
    }

    #[test]
    fn probe_reverts_during_unwind() {
        let mut pos = Position::standard();
        let before = pos.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _probe = pos.probe(Move::new(sq("g1"), sq("f3")));
            panic!("search aborted");
        }));
        assert!(result.is_err());
        assert_eq!(pos, before);
    }

    #[test]
    fn record_and_count_repetitions() {
        let mut pos = Position::standard();
        pos.record_position(Color::White);
        assert_eq!(pos.repetition_count(Color::White), 2);
        pos.record_position(Color::Black);
        assert_eq!(pos.repetition_count(Color::Black), 1);
    }

    #[test]
    fn invariants_detect_problems() {
        let mut pos = Position::from_placement("8/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(
            pos.check_invariants(),
            Err(InvariantError::MissingKing(Color::Black))
        );

        pos.put(sq("e8"), PieceKind::King, Color::Black);
        pos.put(sq("a8"), PieceKind::King, Color::Black);
        assert_eq!(
            pos.check_invariants(),
            Err(InvariantError::ExtraKings {
                color: Color::Black,
                count: 2
            })
        );
        pos.remove(sq("a8"));
        assert!(pos.check_invariants().is_ok());

        pos.board[0][0] = Some(Piece::new(PieceKind::Rook, Color::White, Square::H8));
        assert_eq!(
            pos.check_invariants(),
            Err(InvariantError::StraySquare {
                slot: Square::A1,
                recorded: Square::H8
            })
        );
    }

    #[test]
    fn extend_history_does_not_move_pieces() {
        let mut pos = Position::standard();
        let mv = Move::new(sq("e2"), sq("e4"));
        pos.extend_history([mv]);
        assert_eq!(pos.move_history(), &[mv]);
        assert!(pos.piece_at(sq("e2")).is_some());
    }
}
