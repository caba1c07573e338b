//! Pawn destination generation.
//!
//! A pawn moves one square forward onto an empty square, two squares forward
//! from its home rank when both squares are empty, captures diagonally onto
//! enemy-occupied squares, and captures en passant onto the board's
//! en-passant target when the bypassing enemy pawn stands beside it.

use crate::board::Board;
use crate::piece::{Color, PieceKind};
use crate::square::Square;

/// Every square this pawn can reach by its movement rule, ignoring whether
/// the move would expose its own king.
pub fn pawn_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::new();
    let forward = color.pawn_direction();

    // Forward march, then the double step from the home rank.
    if let Some(one) = from.offset(0, forward) {
        if board.piece_at(one).is_none() {
            out.push(one);
            if from.rank() == color.pawn_home_rank() {
                if let Some(two) = one.offset(0, forward) {
                    if board.piece_at(two).is_none() {
                        out.push(two);
                    }
                }
            }
        }
    }

    // Diagonal captures, including en passant onto an empty square.
    for d_file in [-1, 1] {
        let Some(diagonal) = from.offset(d_file, forward) else {
            continue;
        };
        match board.piece_at(diagonal) {
            Some(other) if other.color != color => out.push(diagonal),
            Some(_) => (),
            None => {
                if board.en_passant_target == Some(diagonal)
                    && bypassing_pawn_beside(board, from, d_file, color)
                {
                    out.push(diagonal);
                }
            }
        }
    }

    out
}

/// Squares this pawn attacks: the capture diagonals that are empty or
/// enemy-occupied. A pawn's forward advance threatens nothing.
pub fn pawn_attack_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::new();
    let forward = color.pawn_direction();
    for d_file in [-1, 1] {
        if let Some(diagonal) = from.offset(d_file, forward) {
            match board.piece_at(diagonal) {
                Some(other) if other.color == color => (),
                _ => out.push(diagonal),
            }
        }
    }
    out
}

/// True when the square beside the pawn (same rank, capture file) holds an
/// enemy pawn that just advanced two squares.
fn bypassing_pawn_beside(board: &Board, from: Square, d_file: i8, color: Color) -> bool {
    let Some(beside) = from.offset(d_file, 0) else {
        return false;
    };
    match board.piece_at(beside) {
        Some(other) => {
            other.color != color
                && other.kind == PieceKind::Pawn
                && other.en_passant_capturable
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::Move;
    use crate::errors::ChessError;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    #[test]
    fn home_rank_pawn_has_two_forward_moves() -> Result<(), ChessError> {
        let board = Board::new();
        let moves = pawn_destinations(&board, sq("e2"), Color::White);
        assert_eq!(moves, vec![sq("e3"), sq("e4")]);
        Ok(())
    }

    #[test]
    fn blocked_pawn_cannot_advance() -> Result<(), ChessError> {
        let (board, _, _, _) =
            Board::from_fen("4k3/8/8/8/8/4p3/4P3/4K3 w - - 0 1")?;
        assert!(pawn_destinations(&board, sq("e2"), Color::White).is_empty());
        Ok(())
    }

    #[test]
    fn diagonal_captures_only_hit_enemies() -> Result<(), ChessError> {
        let (board, _, _, _) =
            Board::from_fen("4k3/8/8/8/8/3pN3/4P3/4K3 w - - 0 1")?;
        let moves = pawn_destinations(&board, sq("e2"), Color::White);
        assert!(moves.contains(&sq("d3")), "enemy pawn capturable");
        assert!(!moves.contains(&sq("f3")), "own knight not capturable");
        Ok(())
    }

    #[test]
    fn en_passant_needs_a_flagged_neighbour() -> Result<(), ChessError> {
        let mut board = Board::new();
        board.apply_move(&Move::new(sq("e2"), sq("e4")))?;
        board.apply_move(&Move::new(sq("a7"), sq("a6")))?;
        board.apply_move(&Move::new(sq("e4"), sq("e5")))?;
        board.apply_move(&Move::new(sq("d7"), sq("d5")))?;

        let moves = pawn_destinations(&board, sq("e5"), Color::White);
        assert!(moves.contains(&sq("d6")), "en passant available");

        // A waiting move ends the opportunity.
        board.apply_move(&Move::new(sq("g1"), sq("f3")))?;
        board.apply_move(&Move::new(sq("h7"), sq("h6")))?;
        let moves = pawn_destinations(&board, sq("e5"), Color::White);
        assert!(!moves.contains(&sq("d6")), "en passant expired");
        Ok(())
    }

    #[test]
    fn attacks_are_diagonals_only() {
        let board = Board::new();
        let attacks = pawn_attack_destinations(&board, sq("e2"), Color::White);
        assert_eq!(attacks, vec![sq("d3"), sq("f3")]);
    }
}
