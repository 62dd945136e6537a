//! `stepgrid` subcommands and their shared options.

mod compare;
mod generate;
mod run;
mod trace;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use log::info;
use stepgrid_core::Grid;
use stepgrid_paths::{Heuristic, SearchConfig};

use crate::mapgen;
use crate::maps::{self, DEFAULT_SIZE};
use crate::render::RenderConfig;

pub use compare::Compare;
pub use generate::Generate;
pub use run::Run;
pub use trace::Trace;

/// Where the grid comes from.
#[derive(Debug, Clone, Args)]
pub struct MapArgs {
    /// Map file: JSON map data, or text art (`.`, `#`, `S`, `E`)
    #[arg(long, value_name = "FILE", conflicts_with = "random")]
    pub map: Option<PathBuf>,

    /// Grid size for JSON and random maps
    #[arg(long, value_name = "COLSxROWS", value_parser = maps::parse_size, default_value = "32x18")]
    pub size: (i32, i32),

    /// Generate a random map from this seed
    #[arg(long, value_name = "SEED")]
    pub random: Option<u64>,

    /// Obstacle density for random maps
    #[arg(long, default_value_t = 0.25, value_parser = parse_density)]
    pub density: f64,
}

impl MapArgs {
    /// Build the grid: a file, a random map, or an empty one.
    pub fn load(&self) -> Result<Grid> {
        if let Some(path) = &self.map {
            return maps::load_map(path, self.size);
        }
        let (cols, rows) = self.size;
        let grid = match self.random {
            Some(seed) => mapgen::seeded(seed).random_grid(cols, rows, self.density)?,
            None => Grid::new(cols, rows)?,
        };
        info!("using {cols}x{rows} grid with {} obstacles", grid.obstacle_count());
        Ok(grid)
    }
}

impl Default for MapArgs {
    fn default() -> Self {
        Self {
            map: None,
            size: DEFAULT_SIZE,
            random: None,
            density: 0.25,
        }
    }
}

/// Movement and heuristic options.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Allow diagonal moves
    #[arg(long)]
    pub diagonal: bool,

    /// Heuristic for A* and greedy search: grid (Manhattan/octile) or squared
    #[arg(long, default_value = "grid")]
    pub heuristic: Heuristic,

    /// Stop after this many expansions
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,
}

impl SearchArgs {
    pub fn config(&self) -> SearchConfig {
        let config = SearchConfig::new()
            .with_diagonal(self.diagonal)
            .with_heuristic(self.heuristic);
        match self.max_iterations {
            Some(max) => config.with_max_iterations(max),
            None => config,
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Print the open nodes' scores under each frame
    #[arg(long)]
    pub scores: bool,

    /// Glyphs for open, closed and path cells
    #[arg(long, value_name = "OCP", default_value = "ox*", value_parser = parse_glyphs)]
    pub glyphs: [char; 3],
}

impl RenderArgs {
    pub fn config(&self) -> RenderConfig {
        let [open, closed, path] = self.glyphs;
        RenderConfig {
            open,
            closed,
            path,
            show_scores: self.scores,
            ..RenderConfig::default()
        }
    }
}

fn parse_density(s: &str) -> Result<f64> {
    let d: f64 = s.parse().with_context(|| format!("bad density {s:?}"))?;
    if !(0.0..=1.0).contains(&d) {
        bail!("density must be between 0 and 1, got {d}");
    }
    Ok(d)
}

fn parse_glyphs(s: &str) -> Result<[char; 3]> {
    let chars: Vec<char> = s.chars().collect();
    match chars[..] {
        [open, closed, path] => Ok([open, closed, path]),
        _ => bail!("expected three glyphs (open, closed, path), got {s:?}"),
    }
}
