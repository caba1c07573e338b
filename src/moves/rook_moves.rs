//! Rook destination generation.

use crate::board::Board;
use crate::moves::shared::follow_ray;
use crate::piece::Color;
use crate::square::Square;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Slides along the four orthogonals until the board edge, an own piece
/// (stop before), or an enemy piece (include, then stop).
pub fn rook_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::new();
    for (d_file, d_rank) in ROOK_DIRECTIONS {
        follow_ray(board, from, color, d_file, d_rank, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChessError;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    #[test]
    fn starting_rook_is_walled_in() {
        let board = Board::new();
        assert!(rook_destinations(&board, sq("a1"), Color::White).is_empty());
    }

    #[test]
    fn open_file_runs_to_the_edge() -> Result<(), ChessError> {
        let (board, _, _, _) = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1")?;
        let moves = rook_destinations(&board, sq("a1"), Color::White);
        // Seven up the file, three along the rank before the king.
        assert_eq!(moves.len(), 10);
        assert!(moves.contains(&sq("a8")));
        assert!(moves.contains(&sq("d1")));
        assert!(!moves.contains(&sq("e1")), "own king blocks the rank");
        Ok(())
    }
}
