//! Queen destination generation: the rook and bishop rays combined.

use crate::board::Board;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::rook_moves::ROOK_DIRECTIONS;
use crate::moves::shared::follow_ray;
use crate::piece::Color;
use crate::square::Square;

pub fn queen_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::new();
    for (d_file, d_rank) in ROOK_DIRECTIONS.iter().chain(BISHOP_DIRECTIONS.iter()) {
        follow_ray(board, from, color, *d_file, *d_rank, &mut out);
    }
    out
}
