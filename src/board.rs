//! Piece placement and the sole mutation point of the engine.
//!
//! [`Board`] owns the 64 squares, the castling rights, and the en-passant
//! target square. It exposes pure lookups, a rank-major rendering snapshot,
//! FEN import/export, and [`Board::apply_move`] — the one operation that
//! mutates a board. All legality questions live in `move_generation`;
//! `apply_move` trusts its caller and only rejects structurally impossible
//! moves (empty source, missing promotion kind, king capture).

use crate::chess_move::{AppliedMove, CastleSide, Move};
use crate::errors::ChessError;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Standard initial position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Four independent castling permissions, true until the relevant king or
/// rook moves or the rook is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub const fn none() -> Self {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_kingside,
            (Color::White, CastleSide::QueenSide) => self.white_queenside,
            (Color::Black, CastleSide::KingSide) => self.black_kingside,
            (Color::Black, CastleSide::QueenSide) => self.black_queenside,
        }
    }

    fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_kingside = false,
            (Color::White, CastleSide::QueenSide) => self.white_queenside = false,
            (Color::Black, CastleSide::KingSide) => self.black_kingside = false,
            (Color::Black, CastleSide::QueenSide) => self.black_queenside = false,
        }
    }

    fn revoke_both(&mut self, color: Color) {
        self.revoke(color, CastleSide::KingSide);
        self.revoke(color, CastleSide::QueenSide);
    }
}

/// The full placement plus the auxiliary flags the special rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    pub castling: CastlingRights,
    /// Square a pawn would land on to capture en passant. Valid only
    /// immediately after a double pawn advance.
    pub en_passant_target: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// A board with the standard initial placement.
    pub fn new() -> Self {
        let (board, _, _, _) =
            Board::from_fen(START_FEN).expect("start position string must have been corrupted");
        board
    }

    /// A board with no pieces and no castling rights.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            castling: CastlingRights::none(),
            en_passant_target: None,
        }
    }

    /// Pure lookup, no side effects.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Iterates over every occupied square.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.squares[sq.index()].map(|p| (sq, p)))
    }

    /// Locates the king of one side.
    pub fn king_square(&self, color: Color) -> Result<Square, ChessError> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
            .ok_or(ChessError::KingMissing(color))
    }

    /// Places a piece while building a position. Test and FEN plumbing; game
    /// play goes through `apply_move`.
    pub fn put(&mut self, square: Square, piece: Piece) {
        self.squares[square.index()] = Some(piece);
    }

    /// Rank-major snapshot of all 64 squares for rendering, rank 8 first.
    /// FEN letters for pieces, `'.'` for empty. Read-only; has no bearing on
    /// the rules.
    pub fn distribution(&self) -> [char; 64] {
        let mut out = ['.'; 64];
        for (i, slot) in out.iter_mut().enumerate() {
            let rank = 7 - (i / 8) as u8;
            let file = (i % 8) as u8;
            let square = Square::from_file_rank(file, rank).expect("grid index in range");
            if let Some(piece) = self.piece_at(square) {
                *slot = piece.symbol();
            }
        }
        out
    }

    /// Applies a move. The sole mutator.
    ///
    /// The caller is responsible for movement-rule legality; this function
    /// executes the move mechanics: en-passant removal, promotion, rook
    /// relocation for a castle, castling-rights and en-passant-target
    /// maintenance. Every failure is detected before any mutation, so a
    /// rejected move leaves the board byte-for-byte unchanged.
    ///
    /// # Arguments
    /// * `mv` - The move to execute.
    ///
    /// # Returns
    /// * `Ok(AppliedMove)` - The move annotated with capture / en-passant /
    ///   castle / promotion flags, for history and UI.
    /// * `Err(ChessError)` - `NoPieceAtSource`, `PromotionKindRequired`, or
    ///   `CannotCaptureKing`; the board is untouched.
    pub fn apply_move(&mut self, mv: &Move) -> Result<AppliedMove, ChessError> {
        let piece = self
            .piece_at(mv.from)
            .ok_or(ChessError::NoPieceAtSource(mv.from))?;
        let color = piece.color;

        // Classification phase: no mutation until every check has passed.
        let castle = if piece.kind == PieceKind::King {
            match mv.to.file() as i8 - mv.from.file() as i8 {
                2 => Some(CastleSide::KingSide),
                -2 => Some(CastleSide::QueenSide),
                _ => None,
            }
        } else {
            None
        };

        let rook_relocation = match castle {
            Some(side) => {
                let rank = color.back_rank();
                let (from_file, to_file) = match side {
                    CastleSide::KingSide => (7, 5),
                    CastleSide::QueenSide => (0, 3),
                };
                let rook_from =
                    Square::from_file_rank(from_file, rank).expect("rook corner in range");
                let rook_to = Square::from_file_rank(to_file, rank).expect("rook stop in range");
                match self.piece_at(rook_from) {
                    Some(rook) if rook.kind == PieceKind::Rook && rook.color == color => {
                        Some((rook_from, rook_to, rook))
                    }
                    _ => return Err(ChessError::NoPieceAtSource(rook_from)),
                }
            }
            None => None,
        };

        let en_passant = piece.kind == PieceKind::Pawn
            && mv.from.file() != mv.to.file()
            && self.piece_at(mv.to).is_none()
            && self.en_passant_target == Some(mv.to);

        // An en-passant victim sits on the mover's rank, not the destination.
        let captured_square = if en_passant {
            Square::from_file_rank(mv.to.file(), mv.from.rank())
        } else {
            self.piece_at(mv.to).map(|_| mv.to)
        };
        let capture = match captured_square {
            Some(sq) => {
                let victim = self.piece_at(sq).ok_or(ChessError::EmptySquare(sq))?;
                if victim.kind == PieceKind::King {
                    return Err(ChessError::CannotCaptureKing(sq));
                }
                Some(victim)
            }
            None => None,
        };

        let promotion = if piece.kind == PieceKind::Pawn
            && mv.to.rank() == color.promotion_rank()
        {
            Some(mv.promotion.ok_or(ChessError::PromotionKindRequired)?)
        } else {
            None
        };

        let double_step = piece.kind == PieceKind::Pawn
            && (mv.to.rank() as i8 - mv.from.rank() as i8).abs() == 2;

        // Mutation phase.

        // En-passant vulnerability expires at the start of the owner's
        // following move.
        for slot in self.squares.iter_mut() {
            if let Some(p) = slot.as_mut() {
                if p.color == color {
                    p.en_passant_capturable = false;
                }
            }
        }

        if let Some(sq) = captured_square {
            self.squares[sq.index()] = None;
        }

        let mut moved = piece;
        moved.has_moved = true;
        moved.en_passant_capturable = double_step;
        if let Some(kind) = promotion {
            moved.kind = kind;
        }
        self.squares[mv.from.index()] = None;
        self.squares[mv.to.index()] = Some(moved);

        if let Some((rook_from, rook_to, mut rook)) = rook_relocation {
            rook.has_moved = true;
            self.squares[rook_from.index()] = None;
            self.squares[rook_to.index()] = Some(rook);
        }

        // Castling rights: lost when the king or a rook moves, or when a
        // rook is captured on its corner.
        if piece.kind == PieceKind::King {
            self.castling.revoke_both(color);
        }
        if piece.kind == PieceKind::Rook {
            if let Some(side) = corner_side(mv.from, color) {
                self.castling.revoke(color, side);
            }
        }
        if let (Some(victim), Some(sq)) = (capture, captured_square) {
            if victim.kind == PieceKind::Rook {
                if let Some(side) = corner_side(sq, victim.color) {
                    self.castling.revoke(victim.color, side);
                }
            }
        }

        self.en_passant_target = if double_step {
            mv.from.offset(0, color.pawn_direction())
        } else {
            None
        };

        Ok(AppliedMove {
            mv: *mv,
            piece: piece.kind,
            color,
            capture: capture.map(|p| p.kind),
            en_passant,
            castle,
            promotion,
        })
    }

    /// Parses a full six-field FEN string.
    ///
    /// # Returns
    /// * `Ok((board, side_to_move, half_move_clock, full_move_count))`.
    /// * `Err(ChessError::InvalidFen)` on any malformed field.
    ///
    /// The per-piece flags are reconstructed: a pawn off its home rank, a
    /// corner rook with no matching castling right, and a king away from its
    /// starting square are marked `has_moved`; the pawn in front of the FEN
    /// en-passant square is flagged en-passant-capturable.
    pub fn from_fen(fen: &str) -> Result<(Self, Color, u16, u16), ChessError> {
        let invalid = || ChessError::InvalidFen(fen.to_string());
        let mut fields = fen.split_ascii_whitespace();

        let placement = fields.next().ok_or_else(invalid)?;
        let mut board = Board::empty();
        let mut rank: i8 = 7;
        let mut file: i8 = 0;
        for c in placement.chars() {
            match c {
                '/' => {
                    rank -= 1;
                    file = 0;
                    if rank < 0 {
                        return Err(invalid());
                    }
                }
                '1'..='8' => {
                    file += c.to_digit(10).expect("digit just matched") as i8;
                    if file > 8 {
                        return Err(invalid());
                    }
                }
                _ => {
                    let (kind, color) = PieceKind::from_fen_char(c).ok_or_else(invalid)?;
                    let square =
                        Square::from_file_rank(file as u8, rank as u8).ok_or_else(invalid)?;
                    board.put(square, Piece::new(kind, color));
                    file += 1;
                }
            }
        }

        let turn = match fields.next().ok_or_else(invalid)? {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid()),
        };

        let mut castling = CastlingRights::none();
        for c in fields.next().ok_or_else(invalid)?.chars() {
            match c {
                'K' => castling.white_kingside = true,
                'Q' => castling.white_queenside = true,
                'k' => castling.black_kingside = true,
                'q' => castling.black_queenside = true,
                '-' => (),
                _ => return Err(invalid()),
            }
        }
        board.castling = castling;

        let en_passant_field = fields.next().ok_or_else(invalid)?;
        board.en_passant_target = match en_passant_field {
            "-" => None,
            text => Some(
                Square::from_algebraic(text).map_err(|_| invalid())?,
            ),
        };

        let half_move_clock: u16 = fields
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        let full_move_count: u16 = fields
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;

        board.reconstruct_flags();
        Ok((board, turn, half_move_clock, full_move_count))
    }

    /// Serializes back to a six-field FEN string.
    pub fn to_fen(&self, turn: Color, half_move_clock: u16, full_move_count: u16) -> String {
        let mut result = String::new();
        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                let square = Square::from_file_rank(file, rank).expect("rank/file in range");
                match self.piece_at(square) {
                    Some(piece) => {
                        if empty_run > 0 {
                            result.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        result.push(piece.symbol());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                result.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                result.push('/');
            }
        }

        result.push(' ');
        result.push(match turn {
            Color::White => 'w',
            Color::Black => 'b',
        });

        result.push(' ');
        if self.castling == CastlingRights::none() {
            result.push('-');
        } else {
            if self.castling.white_kingside {
                result.push('K');
            }
            if self.castling.white_queenside {
                result.push('Q');
            }
            if self.castling.black_kingside {
                result.push('k');
            }
            if self.castling.black_queenside {
                result.push('q');
            }
        }

        result.push(' ');
        match self.en_passant_target {
            Some(square) => result.push_str(&square.algebraic()),
            None => result.push('-'),
        }

        result.push(' ');
        result.push_str(&half_move_clock.to_string());
        result.push(' ');
        result.push_str(&full_move_count.to_string());
        result
    }

    /// Derives `has_moved` / `en_passant_capturable` after a FEN import.
    fn reconstruct_flags(&mut self) {
        for index in 0..Square::COUNT {
            let square = Square::from_index(index as u8).expect("index in range");
            let Some(piece) = self.squares[index] else {
                continue;
            };
            let moved = match piece.kind {
                PieceKind::Pawn => square.rank() != piece.color.pawn_home_rank(),
                PieceKind::King => {
                    square != Square::from_file_rank(4, piece.color.back_rank())
                        .expect("king start in range")
                }
                PieceKind::Rook => match corner_side(square, piece.color) {
                    Some(side) => !self.castling.allows(piece.color, side),
                    None => true,
                },
                _ => false,
            };
            if let Some(p) = self.squares[index].as_mut() {
                p.has_moved = moved;
            }
        }

        if let Some(target) = self.en_passant_target {
            // The pawn that just double-stepped sits one rank past the
            // target, away from its home rank.
            let pawn_color = if target.rank() == 2 {
                Color::White
            } else {
                Color::Black
            };
            if let Some(square) = target.offset(0, pawn_color.pawn_direction()) {
                if let Some(p) = self.squares[square.index()].as_mut() {
                    if p.kind == PieceKind::Pawn && p.color == pawn_color {
                        p.en_passant_capturable = true;
                    }
                }
            }
        }
    }
}

/// Which castle a rook on this square belongs to, if it is a home corner.
fn corner_side(square: Square, color: Color) -> Option<CastleSide> {
    if square.rank() != color.back_rank() {
        return None;
    }
    match square.file() {
        0 => Some(CastleSide::QueenSide),
        7 => Some(CastleSide::KingSide),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    #[test]
    fn initial_placement_matches_standard_layout() -> Result<(), ChessError> {
        let board = Board::new();
        let grid: String = board.distribution().iter().collect();
        assert_eq!(
            grid,
            "rnbqkbnrpppppppp................................PPPPPPPPRNBQKBNR"
        );
        // Spot checks through piece_at as well.
        assert_eq!(
            board.piece_at(sq("e1")).map(|p| (p.kind, p.color)),
            Some((PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")).map(|p| (p.kind, p.color)),
            Some((PieceKind::Queen, Color::Black))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.castling, CastlingRights::all());
        assert_eq!(board.en_passant_target, None);
        Ok(())
    }

    #[test]
    fn fen_round_trips() -> Result<(), ChessError> {
        for fen in [
            START_FEN,
            "1r4k1/7p/3p1bp1/p1pP4/P1P1prP1/1N2R2P/1P1N1PK1/8 b - - 3 31",
            "r1bq1rk1/ppp2ppp/2n5/2bp4/4n3/1P2PNP1/PBP2PBP/RN1Q1RK1 b - - 2 9",
            "rnbqkbnr/ppp1pppp/8/8/3pP1P1/7P/PPPP1P2/RNBQKBNR b KQkq e3 0 3",
        ] {
            let (board, turn, half, full) = Board::from_fen(fen)?;
            assert_eq!(board.to_fen(turn, half, full), fen);
        }
        Ok(())
    }

    #[test]
    fn rejects_malformed_fen() {
        for bad in [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KXkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
        ] {
            assert!(Board::from_fen(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn double_step_sets_en_passant_target() -> Result<(), ChessError> {
        let mut board = Board::new();
        let applied = board.apply_move(&Move::new(sq("e2"), sq("e4")))?;
        assert!(!applied.is_capture());
        assert_eq!(board.en_passant_target, Some(sq("e3")));
        let pawn = board.piece_at(sq("e4")).expect("pawn should have moved");
        assert!(pawn.en_passant_capturable);
        assert!(pawn.has_moved);

        // Any following move by white clears the vulnerability.
        board.apply_move(&Move::new(sq("g8"), sq("f6")))?;
        board.apply_move(&Move::new(sq("g1"), sq("f3")))?;
        assert_eq!(board.en_passant_target, None);
        let pawn = board.piece_at(sq("e4")).expect("pawn still there");
        assert!(!pawn.en_passant_capturable);
        Ok(())
    }

    #[test]
    fn en_passant_removes_the_bypassed_pawn() -> Result<(), ChessError> {
        // e2e4 a7a6 e4e5 d7d5, then exd6 in passing.
        let mut board = Board::new();
        board.apply_move(&Move::new(sq("e2"), sq("e4")))?;
        board.apply_move(&Move::new(sq("a7"), sq("a6")))?;
        board.apply_move(&Move::new(sq("e4"), sq("e5")))?;
        board.apply_move(&Move::new(sq("d7"), sq("d5")))?;
        assert_eq!(board.en_passant_target, Some(sq("d6")));

        let applied = board.apply_move(&Move::new(sq("e5"), sq("d6")))?;
        assert!(applied.en_passant);
        assert_eq!(applied.capture, Some(PieceKind::Pawn));
        assert_eq!(board.piece_at(sq("d5")), None, "bypassed pawn removed");
        assert_eq!(
            board.piece_at(sq("d6")).map(|p| (p.kind, p.color)),
            Some((PieceKind::Pawn, Color::White))
        );
        Ok(())
    }

    #[test]
    fn promotion_requires_a_kind_and_leaves_board_unchanged_on_failure()
    -> Result<(), ChessError> {
        let (mut board, turn, half, full) = Board::from_fen("8/P1k5/8/8/8/8/8/4K3 w - - 0 1")?;
        let before = board.to_fen(turn, half, full);

        let err = board.apply_move(&Move::new(sq("a7"), sq("a8")));
        assert_eq!(err, Err(ChessError::PromotionKindRequired));
        assert_eq!(board.to_fen(turn, half, full), before, "no partial mutation");

        let applied =
            board.apply_move(&Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Queen))?;
        assert_eq!(applied.promotion, Some(PieceKind::Queen));
        assert_eq!(
            board.piece_at(sq("a8")).map(|p| p.kind),
            Some(PieceKind::Queen)
        );
        Ok(())
    }

    #[test]
    fn castle_moves_king_and_rook_together() -> Result<(), ChessError> {
        let (mut board, _, _, _) =
            Board::from_fen("r3k2r/pppqpppp/8/8/8/8/PPPQPPPP/R3K2R w KQkq - 0 1")?;
        let applied = board.apply_move(&Move::new(sq("e1"), sq("g1")))?;
        assert_eq!(applied.castle, Some(CastleSide::KingSide));
        assert_eq!(
            board.piece_at(sq("g1")).map(|p| p.kind),
            Some(PieceKind::King)
        );
        assert_eq!(
            board.piece_at(sq("f1")).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert_eq!(board.piece_at(sq("h1")), None);
        assert!(!board.castling.white_kingside);
        assert!(!board.castling.white_queenside);
        // Black's rights untouched.
        assert!(board.castling.black_kingside);
        assert!(board.castling.black_queenside);
        Ok(())
    }

    #[test]
    fn capturing_a_corner_rook_revokes_the_right() -> Result<(), ChessError> {
        let (mut board, _, _, _) =
            Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")?;
        board.apply_move(&Move::new(sq("a1"), sq("a8")))?;
        assert!(!board.castling.black_queenside, "captured rook's right gone");
        assert!(board.castling.black_kingside);
        assert!(!board.castling.white_queenside, "moved rook's right gone");
        assert!(board.castling.white_kingside);
        Ok(())
    }

    #[test]
    fn kings_are_never_captured() -> Result<(), ChessError> {
        let (mut board, _, _, _) = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1")?;
        let before = board.clone();
        let err = board.apply_move(&Move::new(sq("a1"), sq("a8")));
        assert!(matches!(err, Err(ChessError::CannotCaptureKing(_))));
        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    fn fen_import_reconstructs_flags() -> Result<(), ChessError> {
        let (board, _, _, _) =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP1P1/7P/PPPP1P2/RNBQKBNR b KQkq e3 0 3")?;
        let e4_pawn = board.piece_at(sq("e4")).expect("pawn on e4");
        assert!(e4_pawn.en_passant_capturable);
        assert!(e4_pawn.has_moved);
        let d4_pawn = board.piece_at(sq("d4")).expect("pawn on d4");
        assert!(!d4_pawn.en_passant_capturable);
        let h1_rook = board.piece_at(sq("h1")).expect("rook on h1");
        assert!(!h1_rook.has_moved);

        // Rook without a castling right counts as moved.
        let (board, _, _, _) = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")?;
        let a1_rook = board.piece_at(sq("a1")).expect("rook on a1");
        assert!(a1_rook.has_moved);
        Ok(())
    }
}
