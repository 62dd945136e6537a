//! Random obstacle layouts.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stepgrid_core::{Grid, GridError, Point};
use stepgrid_paths::{Algorithm, Search, SearchConfig};

/// Map generator scattering obstacles over a [`Grid`].
pub struct MapGen<R: Rng> {
    pub rng: R,
}

/// A generator with a reproducible seed.
pub fn seeded(seed: u64) -> MapGen<StdRng> {
    MapGen::new(StdRng::seed_from_u64(seed))
}

impl<R: Rng> MapGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Turn each free cell into an obstacle with probability `density`
    /// (clamped to `0.0..=1.0`). Endpoints are never covered.
    ///
    /// Returns the number of obstacles placed.
    pub fn scatter(&mut self, grid: &mut Grid, density: f64) -> usize {
        let p = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let cells: Vec<Point> = grid.bounds().iter().collect();
        let mut placed = 0;
        for c in cells {
            if self.rng.random_bool(p) && grid.set_obstacle(c, true) {
                placed += 1;
            }
        }
        placed
    }

    /// A fresh `cols × rows` grid with default endpoints and scattered
    /// obstacles.
    pub fn random_grid(&mut self, cols: i32, rows: i32, density: f64) -> Result<Grid, GridError> {
        let mut grid = Grid::new(cols, rows)?;
        let placed = self.scatter(&mut grid, density);
        debug!("generated {cols}x{rows} map with {placed} obstacles");
        Ok(grid)
    }

    /// Like [`random_grid`](Self::random_grid), but retries until the start
    /// can reach the end (4-way), at most `attempts` times.
    pub fn solvable_grid(
        &mut self,
        cols: i32,
        rows: i32,
        density: f64,
        attempts: usize,
    ) -> Result<Option<Grid>, GridError> {
        for attempt in 1..=attempts {
            let grid = self.random_grid(cols, rows, density)?;
            let mut search = Search::new(&grid, Algorithm::AStar, SearchConfig::new());
            if let Ok(Some(_)) = search.run_to_completion(grid.start(), grid.end()) {
                debug!("solvable map after {attempt} attempt(s)");
                return Ok(Some(grid));
            }
        }
        Ok(None)
    }
}
