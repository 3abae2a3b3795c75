use super::attack_tables::{
    BISHOP_DIRECTIONS, KING_TARGETS, KNIGHT_TARGETS, PAWN_CAPTURE_SOURCES, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};
use super::types::{Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};
use super::Board;

impl Board {
    pub(crate) fn find_king(&self, color: Color) -> Option<Square> {
        (0..64)
            .map(Square::from_index)
            .find(|&sq| self.piece_at(sq) == Some((color, Piece::King)))
    }

    /// True iff any piece of `attacker_color` has a pseudo-legal attack
    /// pattern reaching `square`. Pawn pushes do not attack; pawn captures do.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, attacker_color: Color) -> bool {
        let target_idx = square.as_index();
        let c_idx = match attacker_color {
            Color::White => 0,
            Color::Black => 1,
        };

        for &from in &PAWN_CAPTURE_SOURCES[c_idx][target_idx] {
            if self.piece_at(from) == Some((attacker_color, Piece::Pawn)) {
                return true;
            }
        }

        for &from in &KNIGHT_TARGETS[target_idx] {
            if self.piece_at(from) == Some((attacker_color, Piece::Knight)) {
                return true;
            }
        }

        for &from in &KING_TARGETS[target_idx] {
            if self.piece_at(from) == Some((attacker_color, Piece::King)) {
                return true;
            }
        }

        // Sliders: walk each ray until the first occupied square.
        for (directions, reaches) in [
            (&ROOK_DIRECTIONS, [Piece::Rook, Piece::Queen]),
            (&BISHOP_DIRECTIONS, [Piece::Bishop, Piece::Queen]),
        ] {
            for &(dr, df) in directions {
                let mut current = square;
                while let Some(next) = current.offset(dr, df) {
                    if let Some((color, piece)) = self.piece_at(next) {
                        if color == attacker_color && reaches.contains(&piece) {
                            return true;
                        }
                        break;
                    }
                    current = next;
                }
            }
        }

        false
    }

    /// True iff that side's king square is attacked by the opposite side
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opponent()),
            None => false,
        }
    }

    /// All legal moves for the side to move, in unspecified order.
    ///
    /// Pseudo-legal moves are generated per piece type, then each candidate
    /// is applied and rejected if it leaves the mover's own king in check.
    pub fn legal_moves(&mut self) -> MoveList {
        let mover = self.side_to_move();
        let opponent = mover.opponent();
        let pseudo = self.pseudo_legal_moves();
        let mut legal = MoveList::new();

        for &mv in &pseudo {
            let is_castling = self.piece_on(mv.from) == Some(Piece::King)
                && mv.from.file().abs_diff(mv.to.file()) == 2;
            if is_castling {
                // The king may not castle out of, through, or into check.
                let mid_file = (mv.from.file() + mv.to.file()) / 2;
                let path = [mv.from, Square(mv.from.rank(), mid_file), mv.to];
                if path
                    .iter()
                    .any(|&sq| self.is_square_attacked(sq, opponent))
                {
                    continue;
                }
            }

            self.push_unchecked(mv);
            if !self.is_in_check(mover) {
                legal.push(mv);
            }
            self.pop().expect("pop after push");
        }

        legal
    }

    fn pseudo_legal_moves(&self) -> MoveList {
        let color = self.side_to_move();
        let mut moves = MoveList::new();

        for idx in 0..64 {
            let from = Square::from_index(idx);
            let Some((piece_color, piece)) = self.piece_at(from) else {
                continue;
            };
            if piece_color != color {
                continue;
            }
            match piece {
                Piece::Pawn => self.pawn_moves(from, color, &mut moves),
                Piece::Knight => self.leaper_moves(from, color, &KNIGHT_TARGETS[idx], &mut moves),
                Piece::Bishop => self.slider_moves(from, color, &BISHOP_DIRECTIONS, &mut moves),
                Piece::Rook => self.slider_moves(from, color, &ROOK_DIRECTIONS, &mut moves),
                Piece::Queen => self.slider_moves(from, color, &QUEEN_DIRECTIONS, &mut moves),
                Piece::King => self.king_moves(from, color, &mut moves),
            }
        }

        moves
    }

    fn push_pawn_move(from: Square, to: Square, promotion_rank: usize, moves: &mut MoveList) {
        if to.rank() == promotion_rank {
            for promo in PROMOTION_PIECES {
                moves.push(Move::promotion(from, to, promo));
            }
        } else {
            moves.push(Move::new(from, to));
        }
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let dir = color.pawn_direction();
        let promotion_rank = color.pawn_promotion_rank();

        if let Some(forward) = from.offset(dir, 0) {
            if self.is_empty(forward) {
                Self::push_pawn_move(from, forward, promotion_rank, moves);
                if from.rank() == color.pawn_start_rank() {
                    if let Some(double) = forward.offset(dir, 0) {
                        if self.is_empty(double) {
                            moves.push(Move::new(from, double));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(target) = from.offset(dir, df) else {
                continue;
            };
            if let Some((target_color, _)) = self.piece_at(target) {
                if target_color != color {
                    Self::push_pawn_move(from, target, promotion_rank, moves);
                }
            } else if Some(target) == self.en_passant_target {
                moves.push(Move::new(from, target));
            }
        }
    }

    fn leaper_moves(
        &self,
        from: Square,
        color: Color,
        targets: &[Square],
        moves: &mut MoveList,
    ) {
        for &to in targets {
            if self.color_on(to) != Some(color) {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn slider_moves(
        &self,
        from: Square,
        color: Color,
        directions: &[(isize, isize)],
        moves: &mut MoveList,
    ) {
        for &(dr, df) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, df) {
                match self.color_on(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(blocker) => {
                        if blocker != color {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }

    fn king_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        self.leaper_moves(from, color, &KING_TARGETS[from.as_index()], moves);

        let back_rank = color.back_rank();
        if from != Square(back_rank, 4) {
            return;
        }
        if self.castling_rights.has(color, true)
            && self.is_empty(Square(back_rank, 5))
            && self.is_empty(Square(back_rank, 6))
            && self.piece_at(Square(back_rank, 7)) == Some((color, Piece::Rook))
        {
            moves.push(Move::new(from, Square(back_rank, 6)));
        }
        if self.castling_rights.has(color, false)
            && self.is_empty(Square(back_rank, 1))
            && self.is_empty(Square(back_rank, 2))
            && self.is_empty(Square(back_rank, 3))
            && self.piece_at(Square(back_rank, 0)) == Some((color, Piece::Rook))
        {
            moves.push(Move::new(from, Square(back_rank, 2)));
        }
    }

    /// Count leaf nodes of the legal move tree to the given depth.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for &mv in &moves {
            self.push_unchecked(mv);
            nodes += self.perft(depth - 1);
            self.pop().expect("pop after push");
        }

        nodes
    }
}
