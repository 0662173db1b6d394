//! ttt-rust: play Tic-Tac-Toe against a perfect opponent.
//!
//! ## Usage
//!
//! - `ttt-rust` - Play in the terminal
//! - `ttt-rust play --mark o` - Play as O (the computer opens)
//! - `ttt-rust protocol` - Start the text protocol server on stdin/stdout
//! - `ttt-rust best XX./OO./X..` - Print the best move for a position
//! - `ttt-rust demo` - Let the engine play itself

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ttt_rust::board::{Board, Mark};
use ttt_rust::console::{Console, Seat};
use ttt_rust::protocol::ProtocolEngine;
use ttt_rust::rules::{apply_move, outcome, validate, whose_turn};
use ttt_rust::search::analyze;

/// ttt-rust: Tic-Tac-Toe with a minimax opponent
#[derive(Parser)]
#[command(name = "ttt-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "ttt_rust=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine in the terminal
    Play {
        /// Your mark; you are asked when omitted
        #[arg(long, value_enum)]
        mark: Option<MarkArg>,
    },
    /// Start the text protocol server for use by other programs
    Protocol,
    /// Print the engine's move for a position such as "XX./OO./X.."
    Best {
        board: String,
    },
    /// Let the engine play both sides from the empty board
    Demo,
}

#[derive(Copy, Clone, ValueEnum)]
enum MarkArg {
    X,
    O,
    Random,
}

impl From<MarkArg> for Seat {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Seat::Fixed(Mark::X),
            MarkArg::O => Seat::Fixed(Mark::O),
            MarkArg::Random => Seat::Random,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Commands::Play { mark }) => {
            let seat = mark.map(Seat::from).unwrap_or(Seat::Ask);
            Console::new(io::stdin().lock(), io::stdout(), seat).run()
        }
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::new();
            engine.run(io::stdin().lock(), io::stdout())
        }
        Some(Commands::Best { board }) => run_best(&board),
        Some(Commands::Demo) => run_demo(),
        None => Console::new(io::stdin().lock(), io::stdout(), Seat::Ask).run(),
    }
}

/// Logs go to stderr so protocol output on stdout stays clean.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_best(text: &str) -> Result<()> {
    let board: Board = text.parse().context("could not parse board")?;
    validate(&board).context("board cannot arise from legal play")?;

    print!("{board}");
    let analysis = analyze(&board);
    match (analysis.best, analysis.value) {
        (Some(mv), Some(value)) => {
            println!("{} to move: {mv} (value {value:+})", whose_turn(&board));
        }
        _ => println!("Game over: {:?}", outcome(&board)),
    }
    println!(
        "Searched {} positions, {} cutoffs",
        analysis.nodes, analysis.cutoffs
    );
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("ttt-rust: perfect play from the empty board\n");

    let mut board = Board::new();
    while let Some(mv) = analyze(&board).best {
        let mark = whose_turn(&board);
        board = apply_move(&board, mv)?;
        info!(mark = %mark, mv = %mv, "demo move");
        println!("{mark} plays {mv}");
    }

    println!("\n{board}");
    println!("Result: {:?}", outcome(&board));
    Ok(())
}
