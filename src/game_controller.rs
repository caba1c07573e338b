//! Turn order, move history, and game-status transitions.
//!
//! One [`GameController`] owns one [`Board`] for the lifetime of a game. The
//! host seats two players (first joiner plays white), then funnels moves in
//! through [`GameController::submit_move`] / [`GameController::offer_castle`]
//! one at a time. The controller validates intent, lets the board mutate,
//! records history, flips the turn, and recomputes the game status. It knows
//! nothing about rooms, sessions, or transport: players are opaque
//! identifiers, and outbound rendering goes through the optional
//! [`GameEventSink`] the host injects.

use crate::board::Board;
use crate::chess_move::{AppliedMove, CastleSide, Move};
use crate::errors::ChessError;
use crate::move_generation::attack::is_king_in_check;
use crate::move_generation::castling::can_castle;
use crate::move_generation::legal::{legal_moves, side_has_any_legal_move};
use crate::piece::{Color, PieceKind};
use crate::square::Square;

/// Opaque player identifier supplied by the host. The engine never inspects
/// it beyond equality.
pub type PlayerId = String;

/// Lifecycle of one game.
///
/// `Prepared -> Active -> {Checkmate | Stalemate | Draw}`. The three end
/// states are terminal: no further moves are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Board initialized, waiting for both seats to fill.
    Prepared,
    /// Moves are validated against turn order.
    Active,
    /// The side to move is in check with no legal moves. The previous mover
    /// won.
    Checkmate,
    /// The side to move is not in check but has no legal moves.
    Stalemate,
    /// Insufficient material or fifty-move rule.
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

/// Outbound notification seam. The host renders these; the engine only
/// decides when they fire: a refreshed board view after every accepted move,
/// and exactly one end-of-game notification when a terminal status is
/// reached. The view is white-oriented; flipping for a black-side viewer is
/// the host's presentation concern.
pub trait GameEventSink {
    fn board_refreshed(&mut self, view: &[char; 64]);
    fn game_over(&mut self, status: GameStatus, winner: Option<Color>);
}

/// One game of chess between two seated players.
pub struct GameController {
    board: Board,
    white: Option<PlayerId>,
    black: Option<PlayerId>,
    turn: Color,
    status: GameStatus,
    history: Vec<AppliedMove>,
    half_move_clock: u16,
    full_move_count: u16,
    sink: Option<Box<dyn GameEventSink>>,
}

impl GameController {
    /// A fresh game with the standard initial placement and empty seats.
    pub fn new() -> Self {
        GameController {
            board: Board::new(),
            white: None,
            black: None,
            turn: Color::White,
            status: GameStatus::Prepared,
            history: Vec::new(),
            half_move_clock: 0,
            full_move_count: 1,
            sink: None,
        }
    }

    /// Injects the host's notification sink.
    pub fn with_sink(mut self, sink: Box<dyn GameEventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Restores a game from FEN with both seats filled. Test and rematch
    /// plumbing; the status is re-derived from the position.
    pub fn from_fen(
        fen: &str,
        white: &str,
        black: &str,
    ) -> Result<Self, ChessError> {
        let (board, turn, half_move_clock, full_move_count) = Board::from_fen(fen)?;
        let mut controller = GameController {
            board,
            white: Some(white.to_string()),
            black: Some(black.to_string()),
            turn,
            status: GameStatus::Active,
            history: Vec::new(),
            half_move_clock,
            full_move_count,
            sink: None,
        };
        controller.status = controller.derive_status()?;
        Ok(controller)
    }

    /// Seats a player. The first joiner plays white; the second joiner plays
    /// black and activates the game, fixing `turn = white`.
    ///
    /// # Returns
    /// * `Ok(Color)` - The side the player was seated on.
    /// * `Err(ChessError::SeatUnavailable)` - Both seats taken, or the
    ///   player is already seated.
    pub fn seat_player(&mut self, player: &str) -> Result<Color, ChessError> {
        let unavailable = || ChessError::SeatUnavailable(player.to_string());
        if self.status != GameStatus::Prepared || self.white.as_deref() == Some(player) {
            return Err(unavailable());
        }
        if self.white.is_none() {
            self.white = Some(player.to_string());
            Ok(Color::White)
        } else {
            self.black = Some(player.to_string());
            self.status = GameStatus::Active;
            self.turn = Color::White;
            Ok(Color::Black)
        }
    }

    /// The side a player is seated on, if any.
    pub fn side_of(&self, player: &str) -> Option<Color> {
        if self.white.as_deref() == Some(player) {
            Some(Color::White)
        } else if self.black.as_deref() == Some(player) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Applied moves in order, never reordered or mutated.
    pub fn history(&self) -> &[AppliedMove] {
        &self.history
    }

    /// Current position as a six-field FEN string.
    pub fn to_fen(&self) -> String {
        self.board
            .to_fen(self.turn, self.half_move_clock, self.full_move_count)
    }

    /// Rank-major 64-symbol grid for one viewer. White sees rank 8 first;
    /// for the black-side viewer the row order is flipped. Purely a
    /// presentation transform over the same board state.
    pub fn board_view(&self, viewer: Color) -> [char; 64] {
        let white_view = self.board.distribution();
        match viewer {
            Color::White => white_view,
            Color::Black => {
                let mut flipped = ['.'; 64];
                for row in 0..8 {
                    let src = (7 - row) * 8;
                    flipped[row * 8..row * 8 + 8].copy_from_slice(&white_view[src..src + 8]);
                }
                flipped
            }
        }
    }

    /// Validates and plays one move for `player`.
    ///
    /// Positions are two-character algebraic strings. A two-square king move
    /// along the back rank is routed through the castling rule. The error
    /// ladder runs fully before any mutation: a rejected move leaves board
    /// and controller state byte-for-byte unchanged.
    ///
    /// # Arguments
    /// * `player` - The submitting player's identifier.
    /// * `from` / `to` - Algebraic positions such as `"e2"`, `"e4"`.
    /// * `promotion` - Kind a promoting pawn turns into; required exactly
    ///   when the move puts a pawn on the far rank.
    ///
    /// # Returns
    /// * `Ok(AppliedMove)` - The move as recorded in history.
    /// * `Err(ChessError)` - `GameNotActive`, `InvalidPosition`,
    ///   `NotYourTurn`, `NoPieceAtSource`, `CannotCaptureOwnPiece`,
    ///   `IllegalMove`, or `PromotionKindRequired`.
    pub fn submit_move(
        &mut self,
        player: &str,
        from: &str,
        to: &str,
        promotion: Option<PieceKind>,
    ) -> Result<AppliedMove, ChessError> {
        if self.status != GameStatus::Active {
            return Err(ChessError::GameNotActive);
        }
        let from = Square::from_algebraic(from)?;
        let to = Square::from_algebraic(to)?;
        let side = self.side_of(player).ok_or(ChessError::NotYourTurn)?;
        if side != self.turn {
            return Err(ChessError::NotYourTurn);
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or(ChessError::NoPieceAtSource(from))?;
        if piece.color != side {
            return Err(ChessError::IllegalMove(to));
        }
        if from == to {
            return Err(ChessError::IllegalMove(to));
        }
        // Cheap early guard, redundant with the legality check below.
        if let Some(target) = self.board.piece_at(to) {
            if target.color == side {
                return Err(ChessError::CannotCaptureOwnPiece(to));
            }
        }

        // A king sliding two files is a castle request, validated by the
        // castling rule rather than the per-piece move sets.
        if piece.kind == PieceKind::King
            && from.rank() == side.back_rank()
            && (to.file() as i8 - from.file() as i8).abs() == 2
        {
            let requested = match to.file() {
                6 => Some(CastleSide::KingSide),
                2 => Some(CastleSide::QueenSide),
                _ => None,
            };
            return match requested {
                Some(side_requested) if to.rank() == side.back_rank() => {
                    self.castle_for(side, side_requested, to)
                }
                _ => Err(ChessError::IllegalMove(to)),
            };
        }

        if !legal_moves(&self.board, from)?.contains(&to) {
            return Err(ChessError::IllegalMove(to));
        }

        let applied = self.board.apply_move(&Move { from, to, promotion })?;
        self.finish_move(applied)
    }

    /// Plays a castle for `player` on the given side.
    ///
    /// Delegates to the castling rule; on success king and rook relocate in
    /// one atomic board mutation and the turn flips exactly as for a normal
    /// move.
    pub fn offer_castle(
        &mut self,
        player: &str,
        side: CastleSide,
    ) -> Result<AppliedMove, ChessError> {
        if self.status != GameStatus::Active {
            return Err(ChessError::GameNotActive);
        }
        let color = self.side_of(player).ok_or(ChessError::NotYourTurn)?;
        if color != self.turn {
            return Err(ChessError::NotYourTurn);
        }
        let king_move = Move::castle(color, side);
        self.castle_for(color, side, king_move.to)
    }

    fn castle_for(
        &mut self,
        color: Color,
        side: CastleSide,
        destination: Square,
    ) -> Result<AppliedMove, ChessError> {
        if !can_castle(&self.board, color, side) {
            return Err(ChessError::IllegalMove(destination));
        }
        let applied = self.board.apply_move(&Move::castle(color, side))?;
        self.finish_move(applied)
    }

    /// Shared bookkeeping after the board accepted a move: clocks, history,
    /// turn flip, status derivation, host notifications.
    fn finish_move(&mut self, applied: AppliedMove) -> Result<AppliedMove, ChessError> {
        if applied.piece == PieceKind::Pawn || applied.is_capture() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        if applied.color == Color::Black {
            self.full_move_count += 1;
        }
        self.history.push(applied);
        self.turn = self.turn.opposite();
        self.status = self.derive_status()?;

        if let Some(sink) = self.sink.as_mut() {
            sink.board_refreshed(&self.board.distribution());
            if self.status.is_terminal() {
                let winner = match self.status {
                    // The side that just moved delivered the mate.
                    GameStatus::Checkmate => Some(applied.color),
                    _ => None,
                };
                sink.game_over(self.status, winner);
            }
        }
        Ok(applied)
    }

    /// Status of the side now to move: no legal moves means checkmate when
    /// in check and stalemate otherwise; insufficient material and an
    /// exhausted fifty-move clock are draws; anything else stays active.
    fn derive_status(&self) -> Result<GameStatus, ChessError> {
        if !side_has_any_legal_move(&self.board, self.turn)? {
            return Ok(if is_king_in_check(&self.board, self.turn)? {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            });
        }
        if insufficient_material(&self.board) || self.half_move_clock >= 100 {
            return Ok(GameStatus::Draw);
        }
        Ok(GameStatus::Active)
    }
}

impl Default for GameController {
    fn default() -> Self {
        GameController::new()
    }
}

/// Neither side can force mate: bare kings, or a lone minor piece beside
/// them.
fn insufficient_material(board: &Board) -> bool {
    let mut minors = 0;
    for (_, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => (),
            PieceKind::Bishop | PieceKind::Knight => minors += 1,
            _ => return false,
        }
    }
    minors <= 1
}
