// SPDX-License-Identifier: MIT OR Apache-2.0

//! HexOust CLI - Command-line interface for scripted games
//!
//! This binary drives one game without any UI. It's primarily used for
//! integration tests and replaying recorded games.

use anyhow::Result;
use clap::Parser;
use hexoust_cli::{run, Args};
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&args, stdin.lock(), &mut stdout.lock())
}
