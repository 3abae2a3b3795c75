//! Chess board representation and rules.
//!
//! Holds the piece layout, side to move, castling rights and en passant
//! state; applies and unapplies moves with an internal undo stack; and
//! generates the full legal move set for the side to move.
//!
//! # Example
//! ```
//! use chess_rules::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.legal_moves();
//! assert_eq!(moves.len(), 20);
//! ```

mod attack_tables;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod state;
mod types;


pub use error::{FenError, HistoryError, IllegalMove, MoveError, SquareError};
pub use state::Board;
pub use types::{CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece, Square};
