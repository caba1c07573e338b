//! Attack and check detection.
//!
//! A square is attacked by a side iff some piece of that side has the square
//! in its raw destination set. Two deliberate asymmetries keep this sound:
//! pawns only attack their capture diagonals (a forward advance threatens
//! nothing), and an attacking king contributes its raw adjacency rather than
//! its check-filtered move set, so two kings' move generation cannot recurse
//! into each other.

use crate::board::Board;
use crate::errors::ChessError;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::king_adjacent_destinations;
use crate::moves::knight_moves::knight_destinations;
use crate::moves::pawn_moves::pawn_attack_destinations;
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;
use crate::piece::{Color, PieceKind};
use crate::square::Square;

/// True iff any piece of `by_color` attacks `square`.
///
/// Used for check detection and for the "king does not move into or castle
/// through check" rules.
pub fn is_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    for (from, piece) in board.pieces() {
        if piece.color != by_color {
            continue;
        }
        let reachable = match piece.kind {
            PieceKind::Pawn => pawn_attack_destinations(board, from, by_color),
            PieceKind::Knight => knight_destinations(board, from, by_color),
            PieceKind::Bishop => bishop_destinations(board, from, by_color),
            PieceKind::Rook => rook_destinations(board, from, by_color),
            PieceKind::Queen => queen_destinations(board, from, by_color),
            PieceKind::King => king_adjacent_destinations(board, from, by_color),
        };
        if reachable.contains(&square) {
            return true;
        }
    }
    false
}

/// Locates `color`'s king and asks whether the opponent attacks it.
///
/// # Returns
/// * `Ok(bool)` - Whether the king stands in check.
/// * `Err(ChessError::KingMissing)` - The board holds no such king; the game
///   state is corrupt.
pub fn is_king_in_check(board: &Board, color: Color) -> Result<bool, ChessError> {
    let king = board.king_square(color)?;
    Ok(is_attacked(board, king, color.opposite()))
}
