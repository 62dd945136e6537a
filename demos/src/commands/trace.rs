use anyhow::Result;
use clap::Parser;
use stepgrid_paths::{Algorithm, Search, SearchHistory};

use super::{MapArgs, RenderArgs, SearchArgs};
use crate::render::render_snapshot;
use crate::report::{RunStats, summary};

/// Step a search and print the open/closed sizes after every expansion
#[derive(Debug, Parser)]
pub struct Trace {
    /// astar, dijkstra, greedy or ucs
    #[arg(short, long, default_value = "astar")]
    pub algorithm: Algorithm,

    /// Print the rendered grid after every step
    #[arg(long)]
    pub frames: bool,

    /// After the search stops, scrub back this many steps and print that frame
    #[arg(long, value_name = "N")]
    pub back: Option<usize>,

    #[command(flatten)]
    pub map: MapArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

impl Trace {
    pub fn execute(self) -> Result<()> {
        let grid = self.map.load()?;
        let render = self.render.config();
        let mut search = Search::new(&grid, self.algorithm, self.search.config());
        search.initialize(grid.start(), grid.end())?;
        let mut history = SearchHistory::new(&search);

        println!("{:>6} {:>6} {:>6}", "step", "open", "closed");
        println!("{:>6} {:>6} {:>6}", 0, history.open_len(), history.closed_len());
        while history.step_forward(&mut search) {
            println!(
                "{:>6} {:>6} {:>6}",
                history.cursor(),
                history.open_len(),
                history.closed_len()
            );
            if self.frames {
                print!("{}", render_snapshot(&grid, &history.snapshot(), &render));
            }
        }
        println!("{}", summary(&RunStats::from_search(&search)));

        if let Some(n) = self.back {
            let target = history.len().saturating_sub(n);
            history.seek(target);
            println!("-- step {} of {} --", history.cursor(), history.len());
            print!("{}", render_snapshot(&grid, &history.snapshot(), &render));
        }
        Ok(())
    }
}
