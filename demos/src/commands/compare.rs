use anyhow::Result;
use clap::Parser;

use super::{MapArgs, SearchArgs};
use crate::render::{RenderConfig, render_grid};
use crate::report::{compare, format_table};

/// Run all four algorithms on the same map and tabulate the results
#[derive(Debug, Parser)]
pub struct Compare {
    /// Also print the map
    #[arg(long)]
    pub show_map: bool,

    #[command(flatten)]
    pub map: MapArgs,

    #[command(flatten)]
    pub search: SearchArgs,
}

impl Compare {
    pub fn execute(self) -> Result<()> {
        let grid = self.map.load()?;
        if self.show_map {
            print!("{}", render_grid(&grid, &RenderConfig::default()));
        }
        let rows = compare(&grid, self.search.config())?;
        print!("{}", format_table(&rows));
        Ok(())
    }
}
