//! Error types for the engine and its front ends.

use thiserror::Error;

use crate::board::{Mark, Move};

/// Errors raised by board parsing, move application and the game controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: {mv} is already occupied")]
    Occupied { mv: Move },

    #[error("move ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("game already over")]
    GameOver,

    #[error("not your turn: {expected} is to move")]
    NotYourTurn { expected: Mark },

    #[error("board string has {got} cells, expected {expected} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at cell {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("both X and O hold a completed line")]
    MultipleWinners,

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("invalid mark '{0}' (expected 'X' or 'O')")]
    InvalidMark(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
