//! Falling-block puzzle engine.
//!
//! - [`catalog`]: the seven piece kinds and their rotation bitmaps
//! - [`placement`]: the falling piece's kind, origin and rotation
//! - [`grid`]: the settled cells
//! - [`board`]: the [`GameBoard`] state machine (moves, rotations with
//!   kicks, drops, locking and line clears)
//! - [`session`]: a [`GameSession`] driving one board from ticks and
//!   player commands
//!
//! Illegal moves are ordinary results ([`MoveResult`], [`RotateResult`]),
//! never errors. Only construction can fail.

pub use self::{
    board::*,
    catalog::{PieceDefinition, PieceKind, definition_for, random_kind},
    config::*,
    grid::*,
    placement::*,
    session::*,
};

pub mod board;
pub mod catalog;
pub mod config;
pub mod grid;
pub mod placement;
pub mod session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardSizeError {
    #[display("board must be at least 1x1, got {}x{}", _0.width, _0.height)]
    Empty(#[error(not(source))] GameSize),
    #[display(
        "board dimensions are limited to {}, got {}x{}",
        GameSize::MAX_DIMENSION,
        _0.width,
        _0.height
    )]
    TooLarge(#[error(not(source))] GameSize),
}
