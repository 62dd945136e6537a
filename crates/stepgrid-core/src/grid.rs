//! The occupancy [`Grid`] searched by the pathfinders.
//!
//! A grid is a rectangle of free and obstacle cells with exactly one start
//! and one end position. The endpoints are never obstacles; every editing
//! helper refuses changes that would break that.

use std::fmt;

use crate::error::GridError;
use crate::geom::{Point, Range};

/// Occupancy of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Obstacle,
    Start,
    End,
}

impl CellState {
    /// Text-art glyph used by [`Grid::parse`] and the `Display` impl.
    pub const fn glyph(self) -> char {
        match self {
            Self::Free => '.',
            Self::Obstacle => '#',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Free),
            '#' => Some(Self::Obstacle),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }

    /// Whether a search may step onto the cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Obstacle)
    }
}

/// Which endpoint of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// A 2D occupancy map with one start and one end cell.
///
/// Obstacles are stored row-major; the endpoints are kept as positions and
/// overlaid on top, so [`cell_state`](Grid::cell_state) reports
/// [`CellState::Start`] / [`CellState::End`] for them. On a one-column grid
/// both endpoints may share the single available cell, in which case the
/// cell reports `Start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    bounds: Range,
    obstacles: Vec<bool>,
    start: Point,
    end: Point,
}

impl Grid {
    /// Create an obstacle-free grid with the default endpoint layout:
    /// start at `(1, rows / 2)` and end at `(cols - 2, rows / 2)`. Grids
    /// narrower than four columns use the first and last columns instead.
    pub fn new(cols: i32, rows: i32) -> Result<Self, GridError> {
        if cols <= 0 || rows <= 0 {
            return Err(GridError::InvalidSize { cols, rows });
        }
        let bounds = Range::new(0, 0, cols, rows);
        let (start, end) = Self::default_endpoints(bounds);
        Ok(Self {
            bounds,
            obstacles: vec![false; bounds.len()],
            start,
            end,
        })
    }

    /// Create an obstacle-free grid with explicit endpoints.
    ///
    /// The endpoints must be distinct unless the grid has a single cell.
    pub fn with_endpoints(cols: i32, rows: i32, start: Point, end: Point) -> Result<Self, GridError> {
        let mut grid = Self::new(cols, rows)?;
        for (which, p) in [(Endpoint::Start, start), (Endpoint::End, end)] {
            if !grid.contains(p) {
                return Err(GridError::EndpointOutOfBounds { endpoint: which, pos: p });
            }
        }
        if start == end && grid.bounds.len() > 1 {
            return Err(GridError::SharedEndpoint(start));
        }
        grid.start = start;
        grid.end = end;
        Ok(grid)
    }

    fn default_endpoints(bounds: Range) -> (Point, Point) {
        let cols = bounds.width();
        let y = bounds.height() / 2;
        if cols >= 4 {
            (Point::new(1, y), Point::new(cols - 2, y))
        } else {
            (Point::new(0, y), Point::new(cols - 1, y))
        }
    }

    /// Parse a text-art grid: `.` free, `#` obstacle, `S` start, `E` end.
    ///
    /// Blank lines and surrounding whitespace on each line are ignored, so
    /// indented raw strings work.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let cols = first.chars().count();

        let bounds = Range::new(0, 0, cols as i32, rows.len() as i32);
        let mut obstacles = vec![false; bounds.len()];
        let mut start = None;
        let mut end = None;

        for (y, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::InconsistentSize {
                    line: y,
                    expected: cols,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let state = CellState::from_glyph(ch).ok_or(GridError::InvalidChar { ch, pos: p })?;
                match state {
                    CellState::Free => {}
                    CellState::Obstacle => obstacles[y * cols + x] = true,
                    CellState::Start => Self::place(&mut start, Endpoint::Start, p)?,
                    CellState::End => Self::place(&mut end, Endpoint::End, p)?,
                }
            }
        }

        Ok(Self {
            bounds,
            obstacles,
            start: start.ok_or(GridError::MissingEndpoint(Endpoint::Start))?,
            end: end.ok_or(GridError::MissingEndpoint(Endpoint::End))?,
        })
    }

    fn place(slot: &mut Option<Point>, which: Endpoint, p: Point) -> Result<(), GridError> {
        if let Some(first) = *slot {
            return Err(GridError::DuplicateEndpoint {
                endpoint: which,
                first,
                second: p,
            });
        }
        *slot = Some(p);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// `(columns, rows)`.
    #[inline]
    pub fn dimensions(&self) -> (i32, i32) {
        (self.bounds.width(), self.bounds.height())
    }

    /// The bounding range `[0, cols) × [0, rows)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// State of the cell at `p`, or `None` if out of bounds.
    pub fn cell_state(&self, p: Point) -> Option<CellState> {
        let idx = self.bounds.index_of(p)?;
        Some(if p == self.start {
            CellState::Start
        } else if p == self.end {
            CellState::End
        } else if self.obstacles[idx] {
            CellState::Obstacle
        } else {
            CellState::Free
        })
    }

    /// Whether `p` is an obstacle. Out-of-bounds positions are not.
    #[inline]
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.bounds.index_of(p).is_some_and(|i| self.obstacles[i])
    }

    /// Start position.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// End position.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Position of the given endpoint.
    #[inline]
    pub fn endpoint(&self, which: Endpoint) -> Point {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.iter().filter(|&&o| o).count()
    }

    /// Obstacle positions in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds.iter().filter(|&p| self.is_obstacle(p))
    }

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds
            .iter()
            .filter_map(|p| self.cell_state(p).map(|s| (p, s)))
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Mark or unmark `p` as an obstacle. Returns whether the grid changed.
    /// Endpoints and out-of-bounds positions are left untouched.
    pub fn set_obstacle(&mut self, p: Point, obstacle: bool) -> bool {
        if p == self.start || p == self.end {
            return false;
        }
        let Some(idx) = self.bounds.index_of(p) else {
            return false;
        };
        let changed = self.obstacles[idx] != obstacle;
        self.obstacles[idx] = obstacle;
        changed
    }

    /// Flip the obstacle state of `p`. Returns whether the grid changed.
    pub fn toggle_obstacle(&mut self, p: Point) -> bool {
        let blocked = self.is_obstacle(p);
        self.set_obstacle(p, !blocked)
    }

    /// Move an endpoint to `p`. Refuses obstacles, out-of-bounds positions
    /// and the other endpoint's cell. Returns whether the grid changed.
    pub fn move_endpoint(&mut self, which: Endpoint, p: Point) -> bool {
        if !self.contains(p) || self.is_obstacle(p) || p == self.start || p == self.end {
            return false;
        }
        match which {
            Endpoint::Start => self.start = p,
            Endpoint::End => self.end = p,
        }
        true
    }

    /// Remove every obstacle and restore the default endpoint layout.
    pub fn clear(&mut self) {
        self.obstacles.fill(false);
        let (start, end) = Self::default_endpoints(self.bounds);
        self.start = start;
        self.end = end;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in self.bounds.min.y..self.bounds.max.y {
            for x in self.bounds.min.x..self.bounds.max.x {
                let state = self.cell_state(Point::new(x, y)).unwrap_or_default();
                write!(f, "{}", state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
