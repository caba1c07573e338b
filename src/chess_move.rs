//! Move descriptions.
//!
//! A [`Move`] is a candidate: a pair of squares plus an optional promotion
//! kind. It becomes an [`AppliedMove`] once the board has validated and
//! executed it; the applied form carries the flags the host needs for move
//! history and rendering (capture, en passant, castle, promotion).

use crate::errors::ChessError;
use crate::piece::{Color, PieceKind};
use crate::square::Square;

/// Which wing a castle happens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// A candidate move: not yet checked against any rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Kind a pawn turns into on the far rank. Ignored for any move that is
    /// not a promotion.
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// The king's move for a castle on the given side.
    pub fn castle(color: Color, side: CastleSide) -> Self {
        let rank = color.back_rank();
        let king_file = 4;
        let to_file = match side {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        };
        // Both squares are on the board by construction.
        let from = Square::from_file_rank(king_file, rank).expect("king square in range");
        let to = Square::from_file_rank(to_file, rank).expect("castle target in range");
        Move { from, to, promotion: None }
    }

    /// Parses long algebraic notation such as `"e2e4"` or `"e7e8q"`.
    ///
    /// # Returns
    /// * `Ok(Move)` on success.
    /// * `Err(ChessError::InvalidPosition)` if either square or the optional
    ///   promotion letter is malformed.
    pub fn from_long_algebraic(text: &str) -> Result<Self, ChessError> {
        let text = text.trim();
        let invalid = || ChessError::InvalidPosition(text.to_string());
        if text.len() < 4 || text.len() > 5 || !text.is_ascii() {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&text[0..2])?;
        let to = Square::from_algebraic(&text[2..4])?;
        let promotion = match text.as_bytes().get(4).copied() {
            None => None,
            Some(b'q') | Some(b'Q') => Some(PieceKind::Queen),
            Some(b'r') | Some(b'R') => Some(PieceKind::Rook),
            Some(b'b') | Some(b'B') => Some(PieceKind::Bishop),
            Some(b'n') | Some(b'N') => Some(PieceKind::Knight),
            Some(_) => return Err(invalid()),
        };
        Ok(Move { from, to, promotion })
    }

    /// Long algebraic form, `"e2e4"` / `"e7e8q"`.
    pub fn to_long_algebraic(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            s.push(match kind {
                PieceKind::Queen => 'q',
                PieceKind::Rook => 'r',
                PieceKind::Bishop => 'b',
                PieceKind::Knight => 'n',
                // Pawn/king promotions never validate; default for safety.
                _ => 'q',
            });
        }
        s
    }
}

/// A move after the board accepted and executed it.
///
/// This is what goes into the game history and what the host renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: Move,
    /// Kind that moved, before any promotion.
    pub piece: PieceKind,
    pub color: Color,
    /// Kind of the captured piece, if any (the captured pawn for en passant).
    pub capture: Option<PieceKind>,
    pub en_passant: bool,
    pub castle: Option<CastleSide>,
    /// Kind the pawn promoted to, if the move was a promotion.
    pub promotion: Option<PieceKind>,
}

impl AppliedMove {
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Long algebraic rendering for history lists.
    pub fn long_algebraic(&self) -> String {
        self.mv.to_long_algebraic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_algebraic() -> Result<(), ChessError> {
        let mv = Move::from_long_algebraic("e2e4")?;
        assert_eq!(mv.from, Square::from_algebraic("e2")?);
        assert_eq!(mv.to, Square::from_algebraic("e4")?);
        assert_eq!(mv.promotion, None);

        let mv = Move::from_long_algebraic("e7e8q")?;
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(mv.to_long_algebraic(), "e7e8q");
        Ok(())
    }

    #[test]
    fn rejects_malformed_notation() {
        for bad in ["", "e2", "e2e9", "e2e4x", "e2e4qq"] {
            assert!(Move::from_long_algebraic(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn castle_king_paths() {
        let mv = Move::castle(Color::White, CastleSide::KingSide);
        assert_eq!(mv.to_long_algebraic(), "e1g1");
        let mv = Move::castle(Color::Black, CastleSide::QueenSide);
        assert_eq!(mv.to_long_algebraic(), "e8c8");
    }
}
