//! Per-run statistics and the algorithm comparison table.

use stepgrid_core::Grid;
use stepgrid_paths::{Algorithm, Search, SearchConfig, SearchError, SearchStatus, Terrain};

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub algorithm: Algorithm,
    pub status: SearchStatus,
    pub iterations: usize,
    /// Closed nodes.
    pub explored: usize,
    /// Open nodes left when the search stopped.
    pub frontier: usize,
    /// Path cells, 0 when no path was found.
    pub path_len: usize,
    pub cost: Option<f64>,
}

impl RunStats {
    /// Read the statistics of a stopped (or paused) search.
    pub fn from_search<T: Terrain + ?Sized>(search: &Search<'_, T>) -> Self {
        Self {
            algorithm: search.algorithm(),
            status: search.status(),
            iterations: search.iteration_count(),
            explored: search.closed_len(),
            frontier: search.open_len(),
            path_len: search.path().len(),
            cost: search.path_cost(),
        }
    }
}

/// Run every algorithm between the grid's endpoints.
pub fn compare(grid: &Grid, config: SearchConfig) -> Result<Vec<RunStats>, SearchError> {
    Algorithm::ALL
        .iter()
        .map(|&algo| {
            let mut search = Search::new(grid, algo, config);
            search.run_to_completion(grid.start(), grid.end())?;
            Ok(RunStats::from_search(&search))
        })
        .collect()
}

/// Summary line for a single run.
pub fn summary(stats: &RunStats) -> String {
    match stats.cost {
        Some(cost) => format!(
            "{}: path of {} cells, cost {:.3}, {} iterations, {} nodes explored",
            stats.algorithm, stats.path_len, cost, stats.iterations, stats.explored
        ),
        None => format!(
            "{}: no path ({:?}) after {} iterations, {} nodes explored",
            stats.algorithm, stats.status, stats.iterations, stats.explored
        ),
    }
}

/// Fixed-width table, one row per run.
pub fn format_table(rows: &[RunStats]) -> String {
    let mut out = format!(
        "{:<13} {:<11} {:>10} {:>9} {:>6} {:>5} {:>9}\n",
        "algorithm", "status", "iterations", "explored", "open", "path", "cost"
    );
    for r in rows {
        let cost = r.cost.map_or_else(|| "-".to_string(), |c| format!("{c:.3}"));
        out.push_str(&format!(
            "{:<13} {:<11} {:>10} {:>9} {:>6} {:>5} {:>9}\n",
            r.algorithm.to_string(),
            format!("{:?}", r.status),
            r.iterations,
            r.explored,
            r.frontier,
            r.path_len,
            cost
        ));
    }
    out
}
