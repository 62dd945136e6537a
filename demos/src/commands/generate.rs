use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use super::parse_density;
use crate::mapgen;
use crate::maps::{self, encode_map};

/// Write a random map (JSON unless the output file says otherwise)
#[derive(Debug, Parser)]
pub struct Generate {
    /// Random seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Grid size
    #[arg(long, value_name = "COLSxROWS", value_parser = maps::parse_size, default_value = "32x18")]
    pub size: (i32, i32),

    /// Obstacle density
    #[arg(long, default_value_t = 0.25, value_parser = parse_density)]
    pub density: f64,

    /// Retry until the start can reach the end
    #[arg(long)]
    pub solvable: bool,

    /// Output file; stdout when absent
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

const SOLVABLE_ATTEMPTS: usize = 100;

impl Generate {
    pub fn execute(self) -> Result<()> {
        let (cols, rows) = self.size;
        let mut generator = mapgen::seeded(self.seed);
        let grid = if self.solvable {
            match generator.solvable_grid(cols, rows, self.density, SOLVABLE_ATTEMPTS)? {
                Some(grid) => grid,
                None => bail!(
                    "no solvable {cols}x{rows} map at density {} in {SOLVABLE_ATTEMPTS} attempts",
                    self.density
                ),
            }
        } else {
            generator.random_grid(cols, rows, self.density)?
        };

        match &self.out {
            Some(path) => maps::save_map(path, &grid),
            None => {
                let text = encode_map(&grid, true)?;
                std::io::stdout().lock().write_all(text.as_bytes())?;
                Ok(())
            }
        }
    }
}
