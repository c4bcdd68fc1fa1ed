// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless driver for a single HexOust game
//!
//! Replays placement indices against one [`Game`] and reports each verdict,
//! either as readable lines or as one JSON object per line. Used for
//! scripted games and integration tests.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hexoust_core::cbor;
use hexoust_core::{Game, GameConfig, GameError, MoveOutcome};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "hexoust-cli",
    about = "HexOust rule engine command-line interface",
    version
)]
pub struct Args {
    /// TOML game configuration
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[clap(long)]
    pub debug: bool,

    /// Output format
    #[clap(short, long, value_enum, default_value = "text")]
    pub format: Format,

    #[clap(subcommand)]
    pub command: Command,
}

/// What to do with the game
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play placements given as arguments, or read them from stdin
    Play {
        /// Cell indices, in order
        moves: Vec<usize>,

        /// Resume from a CBOR snapshot instead of an empty board
        #[clap(long)]
        resume: Option<PathBuf>,

        /// Write a CBOR snapshot of the final position
        #[clap(long)]
        save: Option<PathBuf>,
    },
    /// Replay placements, then list the legal cells for the side to move
    Legal {
        /// Cell indices, in order
        moves: Vec<usize>,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Output format
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human readable lines
    Text,
    /// One JSON object per line
    Json,
}

/// A line of JSON output
#[derive(Serialize)]
#[serde(untagged)]
enum Report<'a> {
    Accepted(&'a MoveOutcome),
    Rejected { index: usize, error: GameError },
    Legal { mover: hexoust_core::Color, moves: &'a [usize] },
}

/// Execute `args`, reading extra moves from `input` and writing verdicts to `out`
pub fn run(args: &Args, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    match &args.command {
        Command::Config => {
            write!(out, "{}", config.to_toml_string()?)?;
        }
        Command::Play {
            moves,
            resume,
            save,
        } => {
            let mut game = match resume {
                Some(path) => load_snapshot(path, config)?,
                None => Game::with_config(config),
            };

            let moves = if moves.is_empty() {
                read_moves(input)?
            } else {
                moves.clone()
            };

            for index in moves {
                let result = game.submit_move(index);
                report(args.format, &game, index, &result, out)?;
            }

            if let Some(path) = save {
                let bytes = cbor::serialize_snapshot(&game.snapshot());
                std::fs::write(path, bytes)
                    .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
                tracing::info!(path = %path.display(), "Snapshot saved");
            }
        }
        Command::Legal { moves } => {
            let mut game = Game::with_config(config);
            for &index in moves {
                game.submit_move(index)
                    .with_context(|| format!("Move {} rejected while replaying", index))?;
            }

            let mover = match game.mover() {
                Some(mover) => mover,
                None => {
                    writeln!(out, "game is over")?;
                    return Ok(());
                }
            };
            let legal = game.legal_moves(mover);
            match args.format {
                Format::Json => {
                    let line = serde_json::to_string(&Report::Legal {
                        mover,
                        moves: &legal,
                    })?;
                    writeln!(out, "{}", line)?;
                }
                Format::Text => {
                    let cells: Vec<String> = legal.iter().map(|i| i.to_string()).collect();
                    writeln!(out, "{} to move: {}", mover, cells.join(" "))?;
                }
            }
        }
    }

    Ok(())
}

fn load_snapshot(path: &Path, config: GameConfig) -> Result<Game> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let snapshot = cbor::deserialize_snapshot(&bytes)
        .with_context(|| format!("Invalid snapshot: {}", path.display()))?;
    Game::restore(snapshot, config)
}

/// Parse whitespace or comma separated indices; `#` starts a comment
fn read_moves(input: impl BufRead) -> Result<Vec<usize>> {
    let mut moves = Vec::new();
    for (number, line) in input.lines().enumerate() {
        let line = line.context("Failed to read moves")?;
        let content = line.split('#').next().unwrap_or_default();
        for token in content.split(|c: char| c.is_whitespace() || c == ',') {
            if token.is_empty() {
                continue;
            }
            let index = token
                .parse()
                .with_context(|| format!("Line {}: '{}' is not a cell index", number + 1, token))?;
            moves.push(index);
        }
    }
    Ok(moves)
}

fn report(
    format: Format,
    game: &Game,
    index: usize,
    result: &Result<MoveOutcome, GameError>,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        Format::Json => {
            let line = match result {
                Ok(outcome) => serde_json::to_string(&Report::Accepted(outcome))?,
                Err(error) => serde_json::to_string(&Report::Rejected {
                    index,
                    error: *error,
                })?,
            };
            writeln!(out, "{}", line)?;
        }
        Format::Text => match result {
            Ok(outcome) => {
                let name = game.player(outcome.color).name;
                write!(out, "{} ({}) placed at {}", name, outcome.color, outcome.index)?;
                if !outcome.captured.is_empty() {
                    let cells: Vec<String> =
                        outcome.captured.iter().map(|i| i.to_string()).collect();
                    write!(out, ", captured {}", cells.join(" "))?;
                }
                if outcome.continuing_capture {
                    write!(out, ", moves again")?;
                }
                writeln!(out)?;
                if let Some(winner) = outcome.winner {
                    writeln!(out, "game over: {} wins", game.player(winner).name)?;
                }
            }
            Err(error) => writeln!(out, "rejected {}: {}", index, error)?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_to_string(argv: &[&str], stdin: &str) -> String {
        let args = Args::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(&args, Cursor::new(stdin.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_play_with_moves() {
        let args =
            Args::try_parse_from(["hexoust-cli", "--format", "json", "play", "0", "8"]).unwrap();
        assert_eq!(args.format, Format::Json);
        assert_eq!(
            args.command,
            Command::Play {
                moves: vec![0, 8],
                resume: None,
                save: None,
            }
        );
    }

    #[test]
    fn rejects_negative_index() {
        assert!(Args::try_parse_from(["hexoust-cli", "play", "--", "-1"]).is_err());
    }

    #[test]
    fn reads_moves_from_input() {
        let moves = read_moves(Cursor::new("0, 8\n# comment\n100 120 # trailing\n")).unwrap();
        assert_eq!(moves, vec![0, 8, 100, 120]);
        assert!(read_moves(Cursor::new("0 x")).is_err());
    }

    #[test]
    fn text_report_mentions_capture_and_winner() {
        let text = run_to_string(&["hexoust-cli", "play", "0", "8", "1", "5"], "");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Red Player (red) placed at 0");
        assert_eq!(lines[2], "Red Player (red) placed at 1, captured 8");
        assert_eq!(lines[3], "game over: Red Player wins");
        assert_eq!(lines[4], "rejected 5: Game is already over");
    }

    #[test]
    fn legal_lists_cells_for_the_mover() {
        let text = run_to_string(&["hexoust-cli", "legal", "0"], "");
        assert!(text.starts_with("blue to move: 1 2 3 "));
    }

    #[test]
    fn config_prints_defaults() {
        let text = run_to_string(&["hexoust-cli", "config"], "");
        assert!(text.contains("first_mover = \"red\""));
    }
}
