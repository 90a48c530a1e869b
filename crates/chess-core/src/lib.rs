//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the engine, the search
//! and the game controller:
//! - [`Color`] for the two sides
//! - [`PieceKind`] and [`Piece`] for board occupants
//! - [`Square`] for board coordinates and algebraic notation
//! - [`Move`] for (from, to) pairs
//! - [`Placement`] for FEN-style piece placement strings

mod color;
mod mov;
mod piece;
mod placement;
mod square;

pub use color::{Color, ColorParseError};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use placement::{Placement, PlacementError};
pub use square::Square;
