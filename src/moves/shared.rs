//! Helpers shared by the per-piece destination generators.

use crate::board::Board;
use crate::piece::Color;
use crate::square::Square;

/// Adds `to` to the destination list when it is empty or enemy-occupied.
///
/// # Returns
/// * `true` if a ray through `to` may continue (the square was empty).
/// * `false` if the ray stops here (own piece, or enemy piece just captured).
pub(crate) fn try_destination(
    board: &Board,
    color: Color,
    to: Square,
    out: &mut Vec<Square>,
) -> bool {
    match board.piece_at(to) {
        None => {
            out.push(to);
            true
        }
        Some(other) if other.color != color => {
            out.push(to);
            false
        }
        Some(_) => false,
    }
}

/// Follows one direction vector from `from` until the board edge, an own
/// piece (stop before), or an enemy piece (include, then stop).
pub(crate) fn follow_ray(
    board: &Board,
    from: Square,
    color: Color,
    d_file: i8,
    d_rank: i8,
    out: &mut Vec<Square>,
) {
    let mut current = from;
    while let Some(next) = current.offset(d_file, d_rank) {
        if !try_destination(board, color, next, out) {
            break;
        }
        current = next;
    }
}
