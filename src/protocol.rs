//! Line-based text protocol for driving the engine from another program.
//!
//! The framing follows GTP: each command may start with a numeric id, and
//! every response is `=[id] message` on success or `?[id] message` on
//! failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `clear_board` - Reset to the empty board
//! - `setboard <board>` - Load a position such as `XX./OO./...`
//! - `play <mark> <vertex>` - Play a move for the side to move
//! - `genmove <mark>` - Play and return the engine's move (`none` if the game is over)
//! - `showboard`, `legal_moves`, `winner`, `evaluate`
//!
//! ## Example
//!
//! ```ignore
//! use ttt_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::board::{Board, Mark, parse_coord};
use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::error::Error;
use crate::rules::{
    Outcome, apply_move, is_terminal, legal_moves, outcome, validate, whose_turn,
};
use crate::search::{analyze, evaluate};

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "evaluate",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "setboard",
    "showboard",
    "version",
    "winner",
];

/// Protocol engine state: just the current position.
#[derive(Default)]
pub struct ProtocolEngine {
    board: Board,
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse optional command ID
            let (id, command_line) = Self::parse_id(line);

            // Parse command and arguments
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            // Execute command
            let (success, message) = self.execute(&command, args);
            debug!(command = %command, ?args, success, "protocol command");
            if !success {
                warn!(command = %command, message = %message, "command failed");
            }

            // Format and send response
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            // Quit if requested
            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }

        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.board = Board::new();
                (true, String::new())
            }

            "setboard" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let parsed = args.concat().parse::<Board>().and_then(|board| {
                    validate(&board)?;
                    Ok(board)
                });
                match parsed {
                    Ok(board) => {
                        self.board = board;
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                if is_terminal(&self.board) {
                    return (false, Error::GameOver.to_string());
                }
                if let Err(msg) = self.check_mark(args[0]) {
                    return (false, msg);
                }
                let result = parse_coord(args[1]).and_then(|mv| apply_move(&self.board, mv));
                match result {
                    Ok(board) => {
                        self.board = board;
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                let Some(mark) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                if let Err(msg) = self.check_mark(mark) {
                    return (false, msg);
                }
                let Some(mv) = analyze(&self.board).best else {
                    return (true, "none".to_string());
                };
                match apply_move(&self.board, mv) {
                    Ok(board) => {
                        self.board = board;
                        (true, mv.to_string())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.board.to_string().trim_end())),

            "legal_moves" => {
                let moves: Vec<String> = legal_moves(&self.board)
                    .into_iter()
                    .map(|mv| mv.to_string())
                    .collect();
                (true, moves.join(" "))
            }

            "winner" => {
                let result = match outcome(&self.board) {
                    Outcome::XWins => "X",
                    Outcome::OWins => "O",
                    Outcome::Draw => "draw",
                    Outcome::InProgress => "none",
                };
                (true, result.to_string())
            }

            "evaluate" => (true, evaluate(&self.board).to_string()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// The mark named in a command must be the side to move.
    fn check_mark(&self, arg: &str) -> Result<Mark, String> {
        let mark = arg.parse::<Mark>().map_err(|err| err.to_string())?;
        let expected = whose_turn(&self.board);
        if mark != expected {
            return Err(format!("not your turn: {expected} is to move"));
        }
        Ok(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = ProtocolEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = ProtocolEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = ProtocolEngine::new();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "ttt-rust");
    }

    #[test]
    fn test_known_command() {
        let mut engine = ProtocolEngine::new();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = ProtocolEngine::new();

        let (success, _) = engine.execute("play", &["x", "B2"]);
        assert!(success);
        assert_eq!(engine.board().to_compact(), ".../.X./...");

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(*engine.board(), Board::new());
    }

    #[test]
    fn test_play_wrong_mark_and_occupied() {
        let mut engine = ProtocolEngine::new();

        let (success, _) = engine.execute("play", &["o", "A1"]);
        assert!(!success);

        engine.execute("play", &["x", "A1"]);
        let (success, response) = engine.execute("play", &["o", "A1"]);
        assert!(!success);
        assert!(response.contains("occupied"));
    }

    #[test]
    fn test_setboard_and_genmove() {
        let mut engine = ProtocolEngine::new();

        let (success, _) = engine.execute("setboard", &["XX./OO./X.."]);
        assert!(success);

        let (success, response) = engine.execute("genmove", &["o"]);
        assert!(success);
        assert_eq!(response, "C2");

        let (success, response) = engine.execute("winner", &[]);
        assert!(success);
        assert_eq!(response, "O");

        let (success, response) = engine.execute("genmove", &["x"]);
        assert!(success);
        assert_eq!(response, "none");
    }

    #[test]
    fn test_play_after_game_over() {
        let mut engine = ProtocolEngine::new();
        engine.execute("setboard", &["XXX/OO./..."]);
        let before = *engine.board();

        let (success, response) = engine.execute("play", &["o", "C2"]);
        assert!(!success);
        assert_eq!(response, Error::GameOver.to_string());
        assert_eq!(*engine.board(), before);

        let (success, response) = engine.execute("genmove", &["o"]);
        assert!(success);
        assert_eq!(response, "none");
        assert_eq!(*engine.board(), before);
    }

    #[test]
    fn test_setboard_rejects_unreachable() {
        let mut engine = ProtocolEngine::new();
        let (success, _) = engine.execute("setboard", &["XXX/.../..."]);
        assert!(!success);
        assert_eq!(*engine.board(), Board::new());
    }

    #[test]
    fn test_run_loop() {
        let mut engine = ProtocolEngine::new();
        let input = "1 name\n# comment\n\n2 play x A1\nlegal_moves\nquit\nname\n";
        let mut output = Vec::new();
        engine.run(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("=1 ttt-rust\n\n"));
        assert!(text.contains("=2 \n\n"));
        assert!(text.contains("= B1 C1 A2 B2 C2 A3 B3 C3\n\n"));
        // Nothing is processed after quit
        assert_eq!(text.matches("ttt-rust").count(), 1);
    }
}
