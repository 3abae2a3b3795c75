//! Applying and unapplying moves with full state restoration.
//!
//! Capture, castling, en passant and double-push handling are derived from
//! the position at apply time; the move itself carries only from/to/promotion.

use super::error::{HistoryError, IllegalMove};
use super::state::UndoRecord;
use super::types::{Color, Move, Piece, Square};
use super::Board;

impl Board {
    /// Apply a move after verifying it is in the legal move set.
    pub fn push(&mut self, mv: Move) -> Result<(), IllegalMove> {
        if !self.legal_moves().contains(mv) {
            return Err(IllegalMove {
                notation: mv.to_string(),
            });
        }
        self.push_unchecked(mv);
        Ok(())
    }

    /// Apply a move assumed to come from the legal move generator.
    pub(crate) fn push_unchecked(&mut self, mv: Move) {
        let color = self.side_to_move();
        let (_, moving_piece) = self
            .piece_at(mv.from)
            .expect("push on empty origin square");

        let is_castling =
            moving_piece == Piece::King && mv.from.file().abs_diff(mv.to.file()) == 2;
        let is_en_passant = moving_piece == Piece::Pawn
            && mv.from.file() != mv.to.file()
            && self.is_empty(mv.to);

        let previous_castling_rights = self.castling_rights;
        let previous_en_passant_target = self.en_passant_target;
        let previous_halfmove_clock = self.halfmove_clock;
        let previous_fullmove_number = self.fullmove_number;

        // Remove the captured piece. For en passant the victim stands on the
        // mover's rank, not the destination square.
        let captured = if is_en_passant {
            let victim_sq = Square(mv.from.rank(), mv.to.file());
            self.piece_at(victim_sq)
                .map(|(c, p)| (victim_sq, c, p))
        } else {
            self.piece_at(mv.to).map(|(c, p)| (mv.to, c, p))
        };
        if let Some((sq, _, _)) = captured {
            self.remove_piece(sq);
        }

        self.remove_piece(mv.from);
        let placed = mv.promotion.unwrap_or(moving_piece);
        self.set_piece(mv.to, color, placed);

        if is_castling {
            let rank = mv.from.rank();
            let (rook_from, rook_to) = if mv.to.file() == 6 { (7, 5) } else { (0, 3) };
            let (rook_color, rook) = self
                .piece_at(Square(rank, rook_from))
                .expect("castling without rook");
            self.remove_piece(Square(rank, rook_from));
            self.set_piece(Square(rank, rook_to), rook_color, rook);
        }

        // En passant target lives for exactly one ply.
        self.en_passant_target = None;
        if moving_piece == Piece::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            let passed_rank = (mv.from.rank() + mv.to.rank()) / 2;
            self.en_passant_target = Some(Square(passed_rank, mv.from.file()));
        }

        if moving_piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        if moving_piece == Piece::King {
            self.castling_rights.remove(color, true);
            self.castling_rights.remove(color, false);
        } else if moving_piece == Piece::Rook {
            let back_rank = color.back_rank();
            if mv.from == Square(back_rank, 0) {
                self.castling_rights.remove(color, false);
            } else if mv.from == Square(back_rank, 7) {
                self.castling_rights.remove(color, true);
            }
        }
        if let Some((sq, cap_color, Piece::Rook)) = captured {
            let back_rank = cap_color.back_rank();
            if sq == Square(back_rank, 0) {
                self.castling_rights.remove(cap_color, false);
            } else if sq == Square(back_rank, 7) {
                self.castling_rights.remove(cap_color, true);
            }
        }

        self.white_to_move = !self.white_to_move;
        self.history.push(UndoRecord {
            mv: Some(mv),
            captured,
            previous_castling_rights,
            previous_en_passant_target,
            previous_halfmove_clock,
            previous_fullmove_number,
        });
    }

    /// Pass the turn without moving a piece. Used only to enumerate the
    /// opponent's replies; never part of the legal move set. The en passant
    /// target is cleared so the opponent cannot be offered a phantom capture,
    /// and restored on [`pop`](Board::pop).
    pub fn push_null(&mut self) {
        self.history.push(UndoRecord {
            mv: None,
            captured: None,
            previous_castling_rights: self.castling_rights,
            previous_en_passant_target: self.en_passant_target,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
        });
        self.en_passant_target = None;
        self.white_to_move = !self.white_to_move;
    }

    /// Undo the most recent push (real or null), restoring every field.
    pub fn pop(&mut self) -> Result<(), HistoryError> {
        let record = self.history.pop().ok_or(HistoryError::Empty)?;

        self.white_to_move = !self.white_to_move;
        self.castling_rights = record.previous_castling_rights;
        self.en_passant_target = record.previous_en_passant_target;
        self.halfmove_clock = record.previous_halfmove_clock;
        self.fullmove_number = record.previous_fullmove_number;

        let Some(mv) = record.mv else {
            return Ok(());
        };

        let color = self.side_to_move();
        let (_, piece_on_to) = self
            .piece_at(mv.to)
            .expect("pop with empty destination square");

        let was_castling =
            piece_on_to == Piece::King && mv.from.file().abs_diff(mv.to.file()) == 2;

        self.remove_piece(mv.to);
        let original = if mv.promotion.is_some() {
            Piece::Pawn
        } else {
            piece_on_to
        };
        self.set_piece(mv.from, color, original);

        if was_castling {
            let rank = mv.from.rank();
            let (rook_from, rook_to) = if mv.to.file() == 6 { (7, 5) } else { (0, 3) };
            let (rook_color, rook) = self
                .piece_at(Square(rank, rook_to))
                .expect("pop castling without rook");
            self.remove_piece(Square(rank, rook_to));
            self.set_piece(Square(rank, rook_from), rook_color, rook);
        }

        if let Some((sq, cap_color, cap_piece)) = record.captured {
            self.set_piece(sq, cap_color, cap_piece);
        }

        Ok(())
    }
}
