//! ttt-rust: a Tic-Tac-Toe engine that always plays a perfect move.
//!
//! The engine is an exhaustive minimax search with alpha-beta pruning over
//! the full 3x3 game tree. Board values are plain `Copy` data and every rule
//! is a pure function, so the search holds no state between calls.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, winning lines and utility values
//! - [`board`] - Marks, moves and the board value type
//! - [`rules`] - Turn order, legal moves, move application and scoring
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`game`] - Human-versus-computer session
//! - [`protocol`] - Line-based text protocol for external front ends
//! - [`console`] - Interactive terminal front end
//!
//! ## Example
//!
//! ```
//! use ttt_rust::board::{Board, parse_coord};
//! use ttt_rust::rules::apply_move;
//! use ttt_rust::search::best_move;
//!
//! // X takes the centre
//! let board = apply_move(&Board::new(), parse_coord("B2").unwrap()).unwrap();
//!
//! // Ask the engine for O's reply
//! let reply = best_move(&board).unwrap();
//! println!("Best move: {reply}");
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod protocol;
pub mod rules;
pub mod search;

pub use error::{Error, Result};
