//! A human-versus-computer game session.
//!
//! The session owns the only mutable board in the crate. The human picks a
//! mark; the computer plays the other one and answers each human move with
//! [`best_move`]. When the computer holds X it opens the game.

use tracing::{debug, info, warn};

use crate::board::{Board, Mark, Move};
use crate::error::{Error, Result};
use crate::rules::{Outcome, apply_move, is_terminal, outcome, whose_turn};
use crate::search::best_move;

/// What happened in one call to [`Game::play`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// The human's move.
    pub human: Move,
    /// The computer's answer, absent if the human's move ended the game.
    pub reply: Option<Move>,
    /// Game state after both moves.
    pub outcome: Outcome,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    human: Mark,
}

impl Game {
    /// Start a new game with the human playing `human`.
    pub fn new(human: Mark) -> Self {
        let mut game = Self {
            board: Board::new(),
            human,
        };
        game.open();
        game
    }

    /// Clear the board and start over, possibly with a different mark.
    pub fn reset(&mut self, human: Mark) {
        info!(human = %human, "new game");
        self.board = Board::new();
        self.human = human;
        self.open();
    }

    fn open(&mut self) {
        if self.computer() == Mark::X {
            self.computer_move();
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human(&self) -> Mark {
        self.human
    }

    pub fn computer(&self) -> Mark {
        self.human.opponent()
    }

    pub fn outcome(&self) -> Outcome {
        outcome(&self.board)
    }

    pub fn is_over(&self) -> bool {
        is_terminal(&self.board)
    }

    /// Play the human's move and, unless it ends the game, the computer's reply.
    ///
    /// Fails without touching the board if the game is over, if it is not
    /// the human's turn, or if the cell is taken.
    pub fn play(&mut self, mv: Move) -> Result<Turn> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        let expected = whose_turn(&self.board);
        if expected != self.human {
            return Err(Error::NotYourTurn { expected });
        }

        self.board = apply_move(&self.board, mv)?;
        debug!(mv = %mv, board = %self.board.to_compact(), "human move");

        let reply = if self.is_over() {
            None
        } else {
            self.computer_move()
        };

        let outcome = self.outcome();
        if outcome != Outcome::InProgress {
            info!(?outcome, "game over");
        }

        Ok(Turn {
            human: mv,
            reply,
            outcome,
        })
    }

    fn computer_move(&mut self) -> Option<Move> {
        let mv = best_move(&self.board)?;
        match apply_move(&self.board, mv) {
            Ok(board) => self.board = board,
            Err(err) => {
                warn!(mv = %mv, %err, "engine move rejected");
                return None;
            }
        }
        debug!(mv = %mv, board = %self.board.to_compact(), "computer move");
        Some(mv)
    }

    /// End-of-game message from the human's point of view.
    pub fn message(&self) -> Option<&'static str> {
        let winner = match self.outcome() {
            Outcome::InProgress => return None,
            Outcome::Draw => return Some("Draw. Try again!"),
            Outcome::XWins => Mark::X,
            Outcome::OWins => Mark::O,
        };
        if winner == self.human {
            Some("You win!")
        } else {
            Some("You lose. Try again!")
        }
    }
}
