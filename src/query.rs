//! Adapter layer: replay a move list onto a starting position and report
//! the legal move set for both sides.
//!
//! One request owns one [`Board`]; nothing is shared or cached between
//! requests. The opponent's moves are enumerated by pushing a null move,
//! generating, and popping — the null move itself never appears in the
//! output.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::{
    Board, FenError, HistoryError, IllegalMove, Move, MoveError, Piece,
};

/// Request shape: starting position plus the moves already played.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub board: String,
    #[serde(default)]
    pub moves_made: Vec<String>,
}

/// One legal move, tagged with the position it leads to.
///
/// `promotion` uses the legacy output vocabulary in which a queen is an
/// "ADVISOR" and a king a "MONARCH"; existing callers depend on it.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedMove {
    pub from: String,
    pub to: String,
    pub command: String,
    pub promotion: Option<&'static str>,
    pub player: &'static str,
    #[serde(rename = "fenAfterMove")]
    pub fen_after_move: String,
}

/// Response shape: own-side moves first, then the opponent's.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub moves: Vec<AnnotatedMove>,
    pub turn: &'static str,
    pub current_state: String,
}

/// Everything that can abort a query. Parsing and validation failures abort
/// immediately; no partial result is ever returned.
#[derive(Debug)]
pub enum QueryError {
    /// Starting position text failed to parse
    MalformedPosition(FenError),
    /// A replayed move failed to parse
    MalformedMove(MoveError),
    /// A replayed move is not in the legal set of its position
    IllegalMove(IllegalMove),
    /// Replay produced a contradictory position
    InvalidPosition { fen: String },
    /// Undo-stack underflow; an internal logic defect, not a user error
    EmptyHistory(HistoryError),
    /// Request JSON failed to parse or response failed to serialize
    MalformedRequest(serde_json::Error),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::MalformedPosition(err) => write!(f, "Malformed position: {err}"),
            QueryError::MalformedMove(err) => write!(f, "Malformed move: {err}"),
            QueryError::IllegalMove(err) => write!(f, "{err}"),
            QueryError::InvalidPosition { fen } => {
                write!(f, "Replay produced an invalid position: {fen}")
            }
            QueryError::EmptyHistory(err) => write!(f, "{err}"),
            QueryError::MalformedRequest(err) => write!(f, "Malformed request: {err}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::MalformedPosition(err) => Some(err),
            QueryError::MalformedMove(err) => Some(err),
            QueryError::IllegalMove(err) => Some(err),
            QueryError::InvalidPosition { .. } => None,
            QueryError::EmptyHistory(err) => Some(err),
            QueryError::MalformedRequest(err) => Some(err),
        }
    }
}

impl From<FenError> for QueryError {
    fn from(err: FenError) -> Self {
        QueryError::MalformedPosition(err)
    }
}

impl From<MoveError> for QueryError {
    fn from(err: MoveError) -> Self {
        QueryError::MalformedMove(err)
    }
}

impl From<IllegalMove> for QueryError {
    fn from(err: IllegalMove) -> Self {
        QueryError::IllegalMove(err)
    }
}

impl From<HistoryError> for QueryError {
    fn from(err: HistoryError) -> Self {
        QueryError::EmptyHistory(err)
    }
}

/// Replay `moves_made` onto `board`, then report every legal move for the
/// side to move and, via a null move, every legal move the opponent would
/// have if it were their turn.
pub fn query<S: AsRef<str>>(board: &str, moves_made: &[S]) -> Result<QueryResponse, QueryError> {
    let mut board = Board::try_from_fen(board)?;
    for notation in moves_made {
        let mv: Move = notation.as_ref().parse()?;
        board.push(mv)?;
    }

    if !board.is_valid() {
        return Err(QueryError::InvalidPosition {
            fen: board.to_fen(),
        });
    }

    let mut moves = annotate_legal_moves(&mut board)?;
    let own = moves.len();
    board.push_null();
    moves.extend(annotate_legal_moves(&mut board)?);
    board.pop()?;
    debug!(
        "query: {} moves replayed, {} legal for {}, {} for the opponent",
        moves_made.len(),
        own,
        board.side_to_move().label(),
        moves.len() - own
    );

    Ok(QueryResponse {
        turn: board.side_to_move().label(),
        current_state: board.to_fen(),
        moves,
    })
}

/// Annotate each legal move with the serialized position it produces,
/// restoring the board after every candidate.
fn annotate_legal_moves(board: &mut Board) -> Result<Vec<AnnotatedMove>, QueryError> {
    let player = board.side_to_move().label();
    let legal = board.legal_moves();
    let mut annotated = Vec::with_capacity(legal.len());

    for mv in legal {
        board.push_unchecked(mv);
        let fen_after_move = board.to_fen();
        board.pop()?;
        annotated.push(AnnotatedMove {
            from: mv.from.to_string(),
            to: mv.to.to_string(),
            command: mv.to_string(),
            promotion: mv.promotion.map(Piece::label),
            player,
            fen_after_move,
        });
    }

    Ok(annotated)
}

/// JSON entry point: `{"board": ..., "moves_made": [...]}` in, the full
/// response JSON out.
pub fn handle_request(json: &str) -> Result<String, QueryError> {
    let request: QueryRequest =
        serde_json::from_str(json).map_err(QueryError::MalformedRequest)?;
    let response = query(&request.board, &request.moves_made)?;
    serde_json::to_string(&response).map_err(QueryError::MalformedRequest)
}
