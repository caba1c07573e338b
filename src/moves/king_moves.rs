//! King destination generation.
//!
//! Only the raw adjacency rule lives here: the eight neighbouring squares,
//! filtered to board bounds and to empty-or-enemy destinations. Filtering out
//! attacked destinations happens in `move_generation::legal`, and castling is
//! validated separately in `move_generation::castling`. Attack detection must
//! use this raw set for the attacking king, or two kings' move generation
//! would recurse into each other forever.

use crate::board::Board;
use crate::moves::shared::try_destination;
use crate::piece::Color;
use crate::square::Square;

/// The eight adjacent squares that are on the board and empty or
/// enemy-occupied. No check filtering.
pub fn king_adjacent_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::new();
    for d_file in -1..=1 {
        for d_rank in -1..=1 {
            if d_file == 0 && d_rank == 0 {
                continue;
            }
            if let Some(to) = from.offset(d_file, d_rank) {
                try_destination(board, color, to, &mut out);
            }
        }
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
    fn starting_king_is_walled_in() {
        let board = Board::new();
        assert!(king_adjacent_destinations(&board, sq("e1"), Color::White).is_empty());
    }

    #[test]
    fn corner_king_has_three_neighbours() -> Result<(), ChessError> {
        let (board, _, _, _) = Board::from_fen("4k3/8/8/8/8/8/8/K7 w - - 0 1")?;
        assert_eq!(
            king_adjacent_destinations(&board, sq("a1"), Color::White).len(),
            3
        );
        Ok(())
    }

    #[test]
    fn adjacency_ignores_attacks() -> Result<(), ChessError> {
        // b2 is covered by the enemy rook; the raw set still contains it.
        let (board, _, _, _) = Board::from_fen("4k3/8/8/8/8/1r6/8/K7 w - - 0 1")?;
        let moves = king_adjacent_destinations(&board, sq("a1"), Color::White);
        assert!(moves.contains(&sq("b2")));
        Ok(())
    }
}
