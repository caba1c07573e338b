//! Crate root module declarations for the Parlor Chess rules engine.
//!
//! This file exposes the engine's subsystems (board model, per-piece move
//! generation, legality pipeline, and the game controller) so hosts, tests,
//! and tooling can import stable module paths. The crate is a pure rules
//! library: one `GameController` per game, no transport, no globals, no
//! threads.

pub mod board;
pub mod chess_move;
pub mod errors;
pub mod game_controller;
pub mod piece;
pub mod square;

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    pub(crate) mod shared;
}

pub mod move_generation {
    pub mod attack;
    pub mod castling;
    pub mod legal;
}
