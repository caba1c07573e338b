//! Errors used throughout the rules engine.
//!
//! This module defines the canonical error type returned by game logic,
//! parsing utilities, move generation and the game controller. The enum
//! `ChessError` is used as the single error type across the crate to simplify
//! propagation and matching. Each variant carries contextual information where
//! appropriate to aid diagnostics and user-facing error messages.
//!
//! Usage guidelines:
//! - Functions in the engine return `Result<..., ChessError>` for recoverable
//!   or expected failure modes (invalid input, illegal moves, etc).
//! - Callers should match on `ChessError` to present friendly messages. A
//!   rejected move never mutates engine state; the player simply re-offers.
//! - `KingMissing` and `CannotCaptureKing` indicate a corrupted game state or
//!   a bug in the caller and are not intended to be recovered from by normal
//!   library users.

use thiserror::Error;

use crate::piece::Color;
use crate::square::Square;

/// Unified error type for the rules engine.
///
/// Each variant corresponds to a specific, identifiable failure mode that can
/// occur while parsing positions, validating moves, or driving the game state
/// machine. All variants are recoverable from the caller's point of view:
/// they are reported synchronously and leave the board untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A position string was not a file letter `a`-`h` followed by a rank
    /// digit `1`-`8`.
    ///
    /// Payload: the original string that could not be interpreted.
    #[error("invalid position string {0:?}")]
    InvalidPosition(String),

    /// A query was made against a square that holds no piece.
    #[error("no piece on square {0}")]
    EmptySquare(Square),

    /// A move was submitted from a square that holds no piece.
    #[error("no piece at move source {0}")]
    NoPieceAtSource(Square),

    /// The submitting player is not seated on the side whose turn it is.
    #[error("not this player's turn")]
    NotYourTurn,

    /// The destination is not in the moving piece's legal move set.
    #[error("move to {0} is not legal")]
    IllegalMove(Square),

    /// The destination holds a piece of the mover's own side.
    ///
    /// Reported before the general legality check so the caller sees the
    /// specific cause.
    #[error("cannot capture own piece on {0}")]
    CannotCaptureOwnPiece(Square),

    /// A pawn reached the far rank but the move named no promotion kind.
    #[error("pawn reached the last rank without a promotion kind")]
    PromotionKindRequired,

    /// A move was submitted before both seats were filled or after a
    /// terminal status was reached.
    #[error("game is not active")]
    GameNotActive,

    /// The provided FEN string is invalid or could not be parsed.
    #[error("invalid FEN string {0:?}")]
    InvalidFen(String),

    /// Both seats are already taken, or the player is seated twice.
    #[error("no seat available for player {0:?}")]
    SeatUnavailable(String),

    /// The board holds no king for one side. Indicates a corrupted game
    /// state; callers should treat this as a fatal logic error.
    #[error("no {0} king on the board")]
    KingMissing(Color),

    /// A move tried to remove a king from the board. Kings are never
    /// captured; the game ends by checkmate instead.
    #[error("refusing to capture the king on {0}")]
    CannotCaptureKing(Square),
}
