//! Precomputed leaper attack tables.
//!
//! Knight and king targets never depend on occupancy, so they are built once
//! per square. Sliding pieces are resolved by walking rays over the board in
//! `movegen` instead, since blockers change every move.

use once_cell::sync::Lazy;

use super::types::{Color, Square};

pub(crate) const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub(crate) const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(crate) const QUEEN_DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn targets_from(deltas: &[(isize, isize)]) -> [Vec<Square>; 64] {
    let mut tables: [Vec<Square>; 64] = std::array::from_fn(|_| Vec::new());
    for (idx, table) in tables.iter_mut().enumerate() {
        let sq = Square::from_index(idx);
        for &(dr, df) in deltas {
            if let Some(to) = sq.offset(dr, df) {
                table.push(to);
            }
        }
    }
    tables
}

pub(crate) static KNIGHT_TARGETS: Lazy<[Vec<Square>; 64]> =
    Lazy::new(|| targets_from(&KNIGHT_DELTAS));

pub(crate) static KING_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| targets_from(&KING_DELTAS));

/// Squares from which a pawn of the given color would capture onto the
/// indexed square. Indexed `[color][square]`; White = 0, Black = 1.
pub(crate) static PAWN_CAPTURE_SOURCES: Lazy<[[Vec<Square>; 64]; 2]> = Lazy::new(|| {
    let mut tables: [[Vec<Square>; 64]; 2] = [
        std::array::from_fn(|_| Vec::new()),
        std::array::from_fn(|_| Vec::new()),
    ];
    for idx in 0..64 {
        let sq = Square::from_index(idx);
        for (c_idx, color) in [Color::White, Color::Black].into_iter().enumerate() {
            // A white pawn captures upward, so its source sits one rank below.
            let dr = -color.pawn_direction();
            for df in [-1, 1] {
                if let Some(from) = sq.offset(dr, df) {
                    tables[c_idx][idx].push(from);
                }
            }
        }
    }
    tables
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_targets_corner_and_center() {
        assert_eq!(KNIGHT_TARGETS[Square(0, 0).as_index()].len(), 2);
        assert_eq!(KNIGHT_TARGETS[Square(3, 3).as_index()].len(), 8);
    }

    #[test]
    fn test_king_targets_corner_and_center() {
        assert_eq!(KING_TARGETS[Square(0, 0).as_index()].len(), 3);
        assert_eq!(KING_TARGETS[Square(4, 4).as_index()].len(), 8);
    }

    #[test]
    fn test_pawn_capture_sources() {
        // White pawns capture onto e4 from d3 and f3
        let sources = &PAWN_CAPTURE_SOURCES[0][Square(3, 4).as_index()];
        assert!(sources.contains(&Square(2, 3)));
        assert!(sources.contains(&Square(2, 5)));
        assert_eq!(sources.len(), 2);

        // Black pawns capture onto e4 from d5 and f5
        let sources = &PAWN_CAPTURE_SOURCES[1][Square(3, 4).as_index()];
        assert!(sources.contains(&Square(4, 3)));
        assert!(sources.contains(&Square(4, 5)));

        // No white pawn can capture onto rank 1
        assert!(PAWN_CAPTURE_SOURCES[0][Square(0, 4).as_index()].is_empty());
    }
}
