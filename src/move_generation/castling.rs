//! Castling validation.
//!
//! A castle is available when the relevant right is still held (the rights
//! table is authoritative; piece identity is never re-derived from a tag),
//! the king and rook stand unmoved on their starting squares, every square
//! strictly between them is empty, and the king's current square, the square
//! it passes through, and its destination are all free of enemy attack. Note
//! that on the queenside the b-file square must be empty but need not be
//! safe: only the king's own path is attack-checked.

use crate::board::Board;
use crate::chess_move::CastleSide;
use crate::move_generation::attack::is_attacked;
use crate::piece::{Color, PieceKind};
use crate::square::Square;

/// True iff `color` may castle on `side` right now.
pub fn can_castle(board: &Board, color: Color, side: CastleSide) -> bool {
    if !board.castling.allows(color, side) {
        return false;
    }

    let rank = color.back_rank();
    let at = |file: u8| Square::from_file_rank(file, rank).expect("back-rank file in range");

    match board.piece_at(at(4)) {
        Some(p) if p.kind == PieceKind::King && p.color == color && !p.has_moved => (),
        _ => return false,
    }
    let rook_file = match side {
        CastleSide::KingSide => 7,
        CastleSide::QueenSide => 0,
    };
    match board.piece_at(at(rook_file)) {
        Some(p) if p.kind == PieceKind::Rook && p.color == color && !p.has_moved => (),
        _ => return false,
    }

    let between: &[u8] = match side {
        CastleSide::KingSide => &[5, 6],
        CastleSide::QueenSide => &[1, 2, 3],
    };
    if between.iter().any(|&file| board.piece_at(at(file)).is_some()) {
        return false;
    }

    // King's start, transit, and destination squares.
    let king_path: &[u8] = match side {
        CastleSide::KingSide => &[4, 5, 6],
        CastleSide::QueenSide => &[4, 3, 2],
    };
    let opponent = color.opposite();
    !king_path
        .iter()
        .any(|&file| is_attacked(board, at(file), opponent))
}
