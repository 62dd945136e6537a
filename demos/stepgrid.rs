//! Command-line pathfinding demo.
//!
//! Run: cargo run --bin stepgrid -- run --random 7 --diagonal
//! Logging: RUST_LOG=debug (or trace for every expansion)

use anyhow::Result;
use clap::Parser;
use stepgrid_demos::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    Cli::parse().execute()
}
