pub mod board;
pub mod query;

pub use board::{Board, Color, Move, Piece, Square};
pub use query::{handle_request, query, QueryError, QueryResponse};
