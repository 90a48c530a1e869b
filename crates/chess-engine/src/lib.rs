//! Chess rules engine on an 8×8 mailbox board.
//!
//! This crate provides:
//! - [`Position`] - board state, move log and repetition counts
//! - [`Probe`] - scope guard that applies a move and reverts it on drop
//! - Legal move generation and attack detection ([`movegen`])
//! - Checkmate and stalemate detection ([`rules`])
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Square};
//! use chess_engine::{legal_moves, Position};
//!
//! let mut position = Position::standard();
//! assert_eq!(legal_moves(&mut position, Color::White).len(), 20);
//!
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! position.try_move(e2, e4).unwrap();
//! assert_eq!(position.move_history().len(), 1);
//! ```

mod error;
pub mod movegen;
mod position;
pub mod rules;

pub use error::{InvariantError, MoveError};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    has_legal_move, is_king_attacked, is_legal, is_square_attacked, legal_destinations,
    legal_moves, pseudo_legal_destinations, MoveList,
};
pub use position::{Position, Probe};
pub use rules::{is_checkmate, is_stalemate, outcome, Outcome};
