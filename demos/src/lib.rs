//! Terminal driver for the stepgrid searches.
//!
//! Loads or generates maps, runs a search to completion or step by step,
//! scrubs through its history, and compares the four algorithms on the same
//! map. Everything is printed as ASCII art.

pub mod commands;
pub mod mapgen;
pub mod maps;
pub mod render;
pub mod report;

use anyhow::Result;
use clap::Parser;

pub use mapgen::MapGen;
pub use render::RenderConfig;
pub use report::RunStats;

/// Step-by-step grid pathfinding
#[derive(Debug, Parser)]
#[command(name = "stepgrid")]
#[command(about = "Step-by-step A*, Dijkstra, greedy and uniform-cost search on grids", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Parser)]
pub enum Command {
    /// Search one map with one algorithm
    Run(commands::Run),

    /// Step a search, printing the frontier after every expansion
    Trace(commands::Trace),

    /// Run every algorithm on the same map
    Compare(commands::Compare),

    /// Write a random map
    Generate(commands::Generate),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Command::Run(cmd) => cmd.execute(),
            Command::Trace(cmd) => cmd.execute(),
            Command::Compare(cmd) => cmd.execute(),
            Command::Generate(cmd) => cmd.execute(),
        }
    }
}
