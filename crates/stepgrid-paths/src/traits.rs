use stepgrid_core::{CellState, Grid, Point};

/// Read-only occupancy source a search runs on.
///
/// A search borrows its terrain for its whole lifetime, so the layout cannot
/// change while the search is in progress.
pub trait Terrain {
    /// `(columns, rows)`. Valid positions are `[0, cols) × [0, rows)`.
    fn dimensions(&self) -> (i32, i32);

    /// State of the cell at `p`, or `None` outside the terrain.
    fn cell_state(&self, p: Point) -> Option<CellState>;

    /// Whether `p` is an obstacle.
    fn is_obstacle(&self, p: Point) -> bool {
        self.cell_state(p) == Some(CellState::Obstacle)
    }

    /// Whether `p` lies inside the terrain.
    fn contains(&self, p: Point) -> bool {
        let (cols, rows) = self.dimensions();
        p.x >= 0 && p.y >= 0 && p.x < cols && p.y < rows
    }
}

impl Terrain for Grid {
    fn dimensions(&self) -> (i32, i32) {
        Grid::dimensions(self)
    }

    fn cell_state(&self, p: Point) -> Option<CellState> {
        Grid::cell_state(self, p)
    }

    fn is_obstacle(&self, p: Point) -> bool {
        Grid::is_obstacle(self, p)
    }

    fn contains(&self, p: Point) -> bool {
        Grid::contains(self, p)
    }
}
