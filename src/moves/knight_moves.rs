//! Knight destination generation.

use crate::board::Board;
use crate::moves::shared::try_destination;
use crate::piece::Color;
use crate::square::Square;

/// The eight fixed L-offsets.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Every square this knight can jump to: the L-offsets filtered to board
/// bounds and to empty-or-enemy destinations.
pub fn knight_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::new();
    for (d_file, d_rank) in KNIGHT_OFFSETS {
        if let Some(to) = from.offset(d_file, d_rank) {
            try_destination(board, color, to, &mut out);
        }
    }
    out
}
