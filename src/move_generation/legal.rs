//! Pseudo-legal and legal move generation.
//!
//! `pseudo_legal_moves` dispatches on the piece kind and returns every
//! square reachable by its movement rule. `legal_moves` then applies each
//! candidate to a scratch copy of the board and keeps only the moves that do
//! not leave the mover's own king in check. The self-check filter is uniform
//! across every piece kind: a pinned piece may never move, not just a king
//! stepping into an attacked square.

use crate::board::Board;
use crate::chess_move::{CastleSide, Move};
use crate::errors::ChessError;
use crate::move_generation::attack::{is_attacked, is_king_in_check};
use crate::move_generation::castling::can_castle;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::king_adjacent_destinations;
use crate::moves::knight_moves::knight_destinations;
use crate::moves::pawn_moves::pawn_destinations;
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;
use crate::piece::{Color, PieceKind};
use crate::square::Square;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Every square reachable by the movement rule of the piece on `square`,
/// ignoring whether the move would expose the mover's own king.
///
/// King destinations are already filtered against enemy attack here;
/// castling destinations are not included (see
/// [`crate::move_generation::castling::can_castle`]).
///
/// # Returns
/// * `Ok(Vec<Square>)` - The pseudo-legal destination set.
/// * `Err(ChessError::EmptySquare)` - No piece stands on `square`.
pub fn pseudo_legal_moves(board: &Board, square: Square) -> Result<Vec<Square>, ChessError> {
    let piece = board
        .piece_at(square)
        .ok_or(ChessError::EmptySquare(square))?;
    let destinations = match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, square, piece.color),
        PieceKind::Knight => knight_destinations(board, square, piece.color),
        PieceKind::Bishop => bishop_destinations(board, square, piece.color),
        PieceKind::Rook => rook_destinations(board, square, piece.color),
        PieceKind::Queen => queen_destinations(board, square, piece.color),
        PieceKind::King => {
            let opponent = piece.color.opposite();
            king_adjacent_destinations(board, square, piece.color)
                .into_iter()
                .filter(|&to| !is_attacked(board, to, opponent))
                .collect()
        }
    };
    Ok(destinations)
}

/// The pseudo-legal destinations that do not leave the mover's own king in
/// check once the move is hypothetically applied.
///
/// # Returns
/// * `Ok(Vec<Square>)` - The legal destination set.
/// * `Err(ChessError::EmptySquare)` - No piece stands on `square`.
pub fn legal_moves(board: &Board, square: Square) -> Result<Vec<Square>, ChessError> {
    let piece = board
        .piece_at(square)
        .ok_or(ChessError::EmptySquare(square))?;
    let mut result = Vec::new();
    for to in pseudo_legal_moves(board, square)? {
        // The promotion kind is irrelevant to the self-check question; any
        // placeholder lets apply_move run on the scratch board.
        let promotion = (piece.kind == PieceKind::Pawn
            && to.rank() == piece.color.promotion_rank())
        .then_some(PieceKind::Queen);
        let mut trial = board.clone();
        trial.apply_move(&Move {
            from: square,
            to,
            promotion,
        })?;
        if !is_king_in_check(&trial, piece.color)? {
            result.push(to);
        }
    }
    Ok(result)
}

/// Every legal move for one side, promotions expanded to all four kinds and
/// castles included.
pub fn all_legal_moves(board: &Board, color: Color) -> Result<Vec<Move>, ChessError> {
    let mut result = Vec::new();
    let from_squares: Vec<Square> = board
        .pieces()
        .filter(|(_, p)| p.color == color)
        .map(|(sq, _)| sq)
        .collect();
    for from in from_squares {
        let piece = board.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
        for to in legal_moves(board, from)? {
            if piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank() {
                for kind in PROMOTION_KINDS {
                    result.push(Move::with_promotion(from, to, kind));
                }
            } else {
                result.push(Move::new(from, to));
            }
        }
    }
    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        if can_castle(board, color, side) {
            result.push(Move::castle(color, side));
        }
    }
    Ok(result)
}

/// Whether `color` has at least one legal move. Drives the checkmate and
/// stalemate derivation.
pub fn side_has_any_legal_move(board: &Board, color: Color) -> Result<bool, ChessError> {
    let from_squares: Vec<Square> = board
        .pieces()
        .filter(|(_, p)| p.color == color)
        .map(|(sq, _)| sq)
        .collect();
    for from in from_squares {
        if !legal_moves(board, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}
