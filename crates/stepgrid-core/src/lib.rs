//! **stepgrid-core**: occupancy grids for step-by-step pathfinding.
//!
//! This crate provides the grid the searches in `stepgrid-paths` run on:
//! geometry primitives, the [`Grid`] occupancy map with its start and end
//! cells, text-art parsing, and the [`MapData`] shape of map files.

pub mod error;
pub mod geom;
pub mod grid;
pub mod map;

pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{CellState, Endpoint, Grid};
pub use map::MapData;
