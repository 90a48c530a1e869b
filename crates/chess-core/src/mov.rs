//! Move representation.

use crate::Square;
use std::fmt;

/// A chess move as an origin and destination square.
///
/// There are no special moves (castling, en passant, promotion), so the two
/// squares fully describe a move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the move as a pair of algebraic squares, e.g. `["e2", "e4"]`.
    pub fn to_algebraic_pair(self) -> [String; 2] {
        [self.from.to_algebraic(), self.to.to_algebraic()]
    }

    /// Parses a move from two algebraic squares.
    pub fn from_algebraic_pair(from: &str, to: &str) -> Option<Self> {
        Some(Move::new(
            Square::from_algebraic(from)?,
            Square::from_algebraic(to)?,
        ))
    }

    /// Returns the UCI notation for this move (e.g., "e2e4").
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::new(Square::A1, Square::A1);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_squares() {
        let e2 = Square::at(4, 1);
        let e4 = Square::at(4, 3);
        let m = Move::new(e2, e4);

        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
    }

    #[test]
    fn move_uci() {
        let m = Move::new(Square::at(4, 1), Square::at(4, 3));
        assert_eq!(m.to_uci(), "e2e4");
    }

    #[test]
    fn algebraic_pair() {
        let m = Move::from_algebraic_pair("d8", "h4").unwrap();
        assert_eq!(m.to_algebraic_pair(), ["d8".to_string(), "h4".to_string()]);
        assert!(Move::from_algebraic_pair("d8", "h9").is_none());
    }

    #[test]
    fn move_null() {
        assert_eq!(Move::NULL.from(), Square::A1);
        assert_eq!(Move::NULL.to(), Square::A1);
    }

    #[test]
    fn move_debug_display() {
        let m = Move::new(Square::at(4, 1), Square::at(4, 3));
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");
    }
}
