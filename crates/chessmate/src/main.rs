//! Line-oriented ChessMate driver.
//!
//! Reads one command per line on stdin and answers on stdout. Logs go to
//! stderr so they never mix with replies.
//!
//! Commands:
//!   move <notation>   play the player's move, then the engine's reply if due
//!   go                make the engine move now
//!   position <fen>    restart the game from a FEN position
//!   new               restart from the initial position
//!   board             print the board
//!   quit

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chessmate_core::{BoardState, Color};
use chessmate_engine::{ChessGame, GameConfig};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Colour the engine plays
    #[arg(long, value_enum, default_value = "black")]
    color: Side,

    /// Search depth is 2 * difficulty + 1 plies
    #[arg(long, default_value_t = 1)]
    difficulty: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let engine_color = Color::from(args.color);
    info!(%engine_color, difficulty = args.difficulty, "starting session");

    let new_game = |board: BoardState| {
        ChessGame::from_board(engine_color, args.difficulty, config, board)
    };
    let mut game = new_game(BoardState::new());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    if game.is_engine_turn() {
        reply_engine(&mut game, &mut stdout)?;
    }

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "move" => match game.apply_player_move(rest.trim()) {
                Ok(reply) => {
                    writeln!(stdout, "{reply}")?;
                    if game.is_engine_turn() {
                        reply_engine(&mut game, &mut stdout)?;
                    }
                }
                Err(err) => writeln!(stdout, "error {err}")?,
            },
            "go" => reply_engine(&mut game, &mut stdout)?,
            "position" => match BoardState::from_fen(rest.trim()) {
                Ok(board) => game = new_game(board),
                Err(err) => writeln!(stdout, "error {err}")?,
            },
            "new" => game = new_game(BoardState::new()),
            "board" => write!(stdout, "{}", game.board())?,
            "quit" => break,
            other => {
                warn!(command = other, "unknown command");
                writeln!(stdout, "error unknown command `{other}`")?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn reply_engine(game: &mut ChessGame, out: &mut impl Write) -> Result<()> {
    match game.engine_move() {
        Ok(reply) => writeln!(out, "{reply}")?,
        Err(err) => writeln!(out, "error {err}")?,
    }
    out.flush()?;
    Ok(())
}
