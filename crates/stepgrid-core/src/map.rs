//! Decoded map files.
//!
//! A map is stored as `{ "start": [x, y], "end": [x, y], "obstacles":
//! [[x, y], ...] }`. The map carries no dimensions; the grid size is chosen
//! by whoever loads it and entries that fall outside are dropped.

use log::warn;

use crate::error::GridError;
use crate::geom::{Point, Range};
use crate::grid::Grid;

/// Plain map contents as found in a map file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapData {
    pub start: [i32; 2],
    pub end: [i32; 2],
    #[cfg_attr(feature = "serde", serde(default))]
    pub obstacles: Vec<[i32; 2]>,
}

impl Grid {
    /// Build a `cols` × `rows` grid from decoded map data.
    ///
    /// The endpoints are placed first. If either falls outside the grid, or
    /// both land on the same cell, the grid keeps its default layout for the
    /// endpoints. Obstacles outside the grid or on an endpoint are skipped.
    pub fn from_map_data(cols: i32, rows: i32, data: &MapData) -> Result<Self, GridError> {
        let start = Point::from(data.start);
        let end = Point::from(data.end);
        let bounds = Range::new(0, 0, cols, rows);

        let mut grid = if bounds.contains(start) && bounds.contains(end) && start != end {
            Grid::with_endpoints(cols, rows, start, end)?
        } else {
            let grid = Grid::new(cols, rows)?;
            warn!(
                "map endpoints {start} / {end} do not fit a {cols}x{rows} grid, using defaults {} / {}",
                grid.start(),
                grid.end()
            );
            grid
        };

        let mut skipped = 0usize;
        for &o in &data.obstacles {
            let p = Point::from(o);
            if !grid.set_obstacle(p, true) && !grid.is_obstacle(p) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!("skipped {skipped} map obstacles outside the grid or on an endpoint");
        }
        Ok(grid)
    }

    /// Export the grid as map data. Obstacles are listed column by column.
    pub fn to_map_data(&self) -> MapData {
        let (cols, rows) = self.dimensions();
        let mut obstacles = Vec::with_capacity(self.obstacle_count());
        for x in 0..cols {
            for y in 0..rows {
                if self.is_obstacle(Point::new(x, y)) {
                    obstacles.push([x, y]);
                }
            }
        }
        MapData {
            start: self.start().into(),
            end: self.end().into(),
            obstacles,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn decodes_map_file_json() {
        let json = r#"{ "start": [1, 2], "end": [5, 2], "obstacles": [[3, 1], [3, 2], [3, 3]] }"#;
        let data: MapData = serde_json::from_str(json).unwrap();
        assert_eq!(data.start, [1, 2]);
        assert_eq!(data.obstacles.len(), 3);
        let g = Grid::from_map_data(8, 5, &data).unwrap();
        assert!(g.is_obstacle(Point::new(3, 2)));
    }

    #[test]
    fn missing_obstacles_default_to_empty() {
        let data: MapData = serde_json::from_str(r#"{ "start": [0, 0], "end": [1, 0] }"#).unwrap();
        assert!(data.obstacles.is_empty());
    }
}
