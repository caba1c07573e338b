//! Bishop destination generation.

use crate::board::Board;
use crate::moves::shared::follow_ray;
use crate::piece::Color;
use crate::square::Square;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Slides along the four diagonals until the board edge, an own piece (stop
/// before), or an enemy piece (include, then stop).
pub fn bishop_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::new();
    for (d_file, d_rank) in BISHOP_DIRECTIONS {
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
    fn starting_bishop_is_walled_in() {
        let board = Board::new();
        assert!(bishop_destinations(&board, sq("c1"), Color::White).is_empty());
    }

    #[test]
    fn rays_stop_at_blockers() -> Result<(), ChessError> {
        let (board, _, _, _) = Board::from_fen("4k3/8/8/2p5/8/4B3/5P2/4K3 w - - 0 1")?;
        let moves = bishop_destinations(&board, sq("e3"), Color::White);
        assert!(moves.contains(&sq("c5")), "enemy pawn ends the ray inclusively");
        assert!(!moves.contains(&sq("b6")), "nothing beyond a capture");
        assert!(!moves.contains(&sq("f2")), "own pawn is never a destination");
        assert!(!moves.contains(&sq("g1")), "nothing beyond an own piece");
        assert!(moves.contains(&sq("h6")), "open diagonal runs to the edge");
        Ok(())
    }
}
