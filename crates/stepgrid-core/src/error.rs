use thiserror::Error;

use crate::geom::Point;
use crate::grid::Endpoint;

/// Errors raised while building a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Both dimensions must be positive.
    #[error("grid size must be positive, got {cols}x{rows}")]
    InvalidSize { cols: i32, rows: i32 },
    /// Text art contained no rows.
    #[error("grid text is empty")]
    Empty,
    /// Text-art rows have different widths.
    #[error("grid row {line} has {found} cells, expected {expected}")]
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside `.#SE` was found.
    #[error("invalid grid character {ch:?} at {pos}")]
    InvalidChar { ch: char, pos: Point },
    /// No start or no end cell.
    #[error("grid has no {0} cell")]
    MissingEndpoint(Endpoint),
    /// More than one start or end cell.
    #[error("grid has a second {endpoint} cell at {second} (first at {first})")]
    DuplicateEndpoint {
        endpoint: Endpoint,
        first: Point,
        second: Point,
    },
    /// An explicit endpoint lies outside the grid.
    #[error("{endpoint} position {pos} is outside the grid")]
    EndpointOutOfBounds { endpoint: Endpoint, pos: Point },
    /// Start and end given the same cell on a grid with room for both.
    #[error("start and end both at {0}")]
    SharedEndpoint(Point),
}
