//! Interactive terminal front end.
//!
//! Reads moves from any `BufRead` and writes the board and prompts to any
//! `Write`, so the same loop serves stdin/stdout and tests.

use std::io::{BufRead, Write};

use tracing::info;

use crate::board::{Mark, parse_coord};
use crate::game::Game;

/// How the human's mark is chosen at the start of each game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Seat {
    Fixed(Mark),
    /// Coin flip per game.
    Random,
    /// Prompt for X or O.
    Ask,
}

pub struct Console<R, W> {
    input: R,
    output: W,
    seat: Seat,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, seat: Seat) -> Self {
        Self {
            input,
            output,
            seat,
        }
    }

    /// Play games until the user quits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let Some(human) = self.choose_mark()? else {
                return Ok(());
            };
            let mut game = Game::new(human);
            info!(human = %human, "game started");

            writeln!(self.output, "You are {human}.")?;
            if let Some((mv, _)) = game.board().cells().find(|(_, c)| c.is_some()) {
                writeln!(self.output, "Computer plays {mv}")?;
            }

            if !self.play_game(&mut game)? {
                return Ok(());
            }
            if !self.confirm("New game? [y/N] ")? {
                return Ok(());
            }
        }
    }

    /// Returns false if the user quit mid-game.
    fn play_game(&mut self, game: &mut Game) -> anyhow::Result<bool> {
        loop {
            write!(self.output, "\n{}", game.board())?;

            if let Some(message) = game.message() {
                writeln!(self.output, "{message}")?;
                return Ok(true);
            }

            let Some(line) = self.prompt("Your move (e.g. B2, q to quit): ")? else {
                return Ok(false);
            };
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return Ok(false);
            }

            let turn = parse_coord(&line).and_then(|mv| game.play(mv));
            match turn {
                Ok(turn) => {
                    if let Some(reply) = turn.reply {
                        writeln!(self.output, "Computer plays {reply}")?;
                    }
                }
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn choose_mark(&mut self) -> anyhow::Result<Option<Mark>> {
        match self.seat {
            Seat::Fixed(mark) => Ok(Some(mark)),
            Seat::Random => Ok(Some(if fastrand::bool() { Mark::X } else { Mark::O })),
            Seat::Ask => loop {
                let Some(line) = self.prompt("Play as X or O? ")? else {
                    return Ok(None);
                };
                match line.parse::<Mark>() {
                    Ok(mark) => return Ok(Some(mark)),
                    Err(err) => writeln!(self.output, "{err}")?,
                }
            },
        }
    }

    fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        Ok(self.prompt(question)?.is_some_and(|answer| {
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        }))
    }

    /// Print a prompt and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, seat: Seat) -> String {
        let mut output = Vec::new();
        Console::new(input.as_bytes(), &mut output, seat)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_quit_immediately() {
        let text = run("q\n", Seat::Fixed(Mark::X));
        assert!(text.contains("You are X."));
        assert!(text.contains("Your move"));
    }

    #[test]
    fn test_bad_input_is_reported() {
        let text = run("Z9\nB2\nB2\nq\n", Seat::Fixed(Mark::X));
        assert!(text.contains("invalid coordinate 'Z9'"));
        assert!(text.contains("Computer plays"));
        assert!(text.contains("already occupied"));
    }

    #[test]
    fn test_ask_for_mark() {
        let text = run("W\no\n", Seat::Ask);
        assert!(text.contains("invalid mark 'W'"));
        assert!(text.contains("You are O."));
        // Computer holds X and opens
        assert!(text.contains("Computer plays"));
    }

    #[test]
    fn test_full_game_never_won_by_human() {
        // Feed every cell in order; occupied cells are simply rejected
        let moves = "A1\nB1\nC1\nA2\nB2\nC2\nA3\nB3\nC3\n".repeat(2);
        let text = run(&format!("{moves}n\n"), Seat::Fixed(Mark::X));
        assert!(!text.contains("You win!"));
        assert!(text.contains("Try again!"));
    }

    #[test]
    fn test_random_seat_assigns_a_mark() {
        let text = run("q\n", Seat::Random);
        assert!(text.contains("You are X.") || text.contains("You are O."));
    }
}
