use anyhow::Result;
use clap::Parser;
use stepgrid_paths::{Algorithm, Search};

use super::{MapArgs, RenderArgs, SearchArgs};
use crate::render::render_snapshot;
use crate::report::{RunStats, summary};

/// Search one map with one algorithm and print the result
#[derive(Debug, Parser)]
pub struct Run {
    /// astar, dijkstra, greedy or ucs
    #[arg(short, long, default_value = "astar")]
    pub algorithm: Algorithm,

    #[command(flatten)]
    pub map: MapArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let grid = self.map.load()?;
        let mut search = Search::new(&grid, self.algorithm, self.search.config());
        let path = search.run_to_completion(grid.start(), grid.end())?;

        print!("{}", render_snapshot(&grid, &search.snapshot(), &self.render.config()));
        println!("{}", summary(&RunStats::from_search(&search)));
        if let Some(path) = path {
            let cells: Vec<String> = path.cells.iter().map(ToString::to_string).collect();
            println!("{}", cells.join(" "));
        }
        Ok(())
    }
}
