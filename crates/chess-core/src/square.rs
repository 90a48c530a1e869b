//! Board square representation.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A square on the chess board as a (file, rank) pair.
///
/// Both coordinates are 0-indexed: file 0 is the a-file, rank 0 is the first
/// rank, so `(0, 0)` is a1 and `(7, 7)` is h8.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from coordinates known to be on the board.
    ///
    /// # Panics
    /// Panics if either coordinate is outside 0-7.
    #[inline]
    pub const fn at(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square coordinates out of range");
        Square { file, rank }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    ///
    /// Only a lowercase file letter `a`-`h` followed by a digit `1`-`8` is
    /// accepted.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let &[file, rank] = s.as_bytes() else {
            return None;
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Square {
            file: file - b'a',
            rank: rank - b'1',
        })
    }

    /// Returns the file (0-7).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank (0-7).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the square shifted by the given deltas, if it stays on the board.
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        }
    }

    /// Iterates over all 64 squares in board-scan order.
    ///
    /// Scan order is file-major: a1, a2, ..., a8, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Square { file, rank }))
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let mut s = String::with_capacity(2);
        s.push((b'a' + self.file) as char);
        s.push((b'1' + self.rank) as char);
        s
    }

    // Common squares
    pub const A1: Square = Square::at(0, 0);
    pub const D1: Square = Square::at(3, 0);
    pub const E1: Square = Square::at(4, 0);
    pub const H1: Square = Square::at(7, 0);
    pub const A8: Square = Square::at(0, 7);
    pub const D8: Square = Square::at(3, 7);
    pub const E8: Square = Square::at(4, 7);
    pub const H8: Square = Square::at(7, 7);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_algebraic())
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Square::from_algebraic(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid square '{}'", s)))
    }
}
