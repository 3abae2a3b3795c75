use super::types::{CastlingRights, Color, Move, Piece, Square};

/// One entry of the board's internal undo stack. `mv` is `None` for a null
/// move (turn pass); `captured` records where the captured piece stood,
/// which differs from the destination square for en passant.
#[derive(Clone, Debug)]
pub(crate) struct UndoRecord {
    pub(crate) mv: Option<Move>,
    pub(crate) captured: Option<(Square, Color, Piece)>,
    pub(crate) previous_castling_rights: CastlingRights,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_fullmove_number: u32,
}

/// A chess position with its undo stack.
///
/// The piece layout is a 64-entry mailbox indexed by [`Square::as_index`].
/// Moves are applied and unapplied with stack discipline: every
/// [`push`](Board::push) records how to undo itself, and
/// [`pop`](Board::pop) restores all fields exactly.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) squares: [Option<(Color, Piece)>; 64],
    pub(crate) white_to_move: bool,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) history: Vec<UndoRecord>,
}

impl Board {
    /// Standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square(0, file), Color::White, *piece);
            board.set_piece(Square(7, file), Color::Black, *piece);
            board.set_piece(Square(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square(6, file), Color::Black, Piece::Pawn);
        }
        board.castling_rights = CastlingRights::all();
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            white_to_move: true,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.squares[sq.as_index()] = Some((color, piece));
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) {
        self.squares[sq.as_index()] = None;
    }

    /// Piece and color on a square, if any
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.as_index()]
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    #[inline]
    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.as_index()].is_none()
    }

    /// Side to move
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// En passant target square, set only immediately after a double pawn push
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Castling rights
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Plies since the last capture or pawn move
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Move pair counter, incremented after Black's move
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of moves (including null moves) pending on the undo stack
    #[must_use]
    pub fn ply_depth(&self) -> usize {
        self.history.len()
    }

    fn king_count(&self, color: Color) -> usize {
        self.squares
            .iter()
            .filter(|entry| **entry == Some((color, Piece::King)))
            .count()
    }

    /// A position is valid when each side has exactly one king and the side
    /// that is NOT to move is not in check (it cannot have just moved into
    /// check).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.king_count(Color::White) == 1
            && self.king_count(Color::Black) == 1
            && !self.is_in_check(self.side_to_move().opponent())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
