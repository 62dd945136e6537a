//! ASCII rendering of grids and search states.

use stepgrid_core::{CellState, Grid, Point};
use stepgrid_paths::Snapshot;

/// Presentation settings. Nothing here affects how a search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub free: char,
    pub obstacle: char,
    pub start: char,
    pub end: char,
    /// Cells with an open node.
    pub open: char,
    /// Expanded cells.
    pub closed: char,
    pub path: char,
    /// Print a `g h f` table of the open nodes under each frame.
    pub show_scores: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            free: CellState::Free.glyph(),
            obstacle: CellState::Obstacle.glyph(),
            start: CellState::Start.glyph(),
            end: CellState::End.glyph(),
            open: 'o',
            closed: 'x',
            path: '*',
            show_scores: false,
        }
    }
}

impl RenderConfig {
    fn cell_glyph(&self, state: CellState) -> char {
        match state {
            CellState::Free => self.free,
            CellState::Obstacle => self.obstacle,
            CellState::Start => self.start,
            CellState::End => self.end,
        }
    }
}

/// Per-cell overlay, higher variants drawn over lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Mark {
    None,
    Open,
    Closed,
    Path,
}

/// Render the bare grid.
pub fn render_grid(grid: &Grid, cfg: &RenderConfig) -> String {
    let (cols, rows) = grid.dimensions();
    let marks = vec![Mark::None; (cols * rows) as usize];
    draw(grid, &marks, cfg)
}

/// Render the grid with a search state drawn over it.
///
/// Endpoints always show through; the path wins over closed cells, which win
/// over open ones.
pub fn render_snapshot(grid: &Grid, snapshot: &Snapshot, cfg: &RenderConfig) -> String {
    let (cols, rows) = grid.dimensions();
    let bounds = grid.bounds();
    let mut marks = vec![Mark::None; (cols * rows) as usize];
    let mut mark = |p: Point, m: Mark| {
        if let Some(i) = bounds.index_of(p) {
            marks[i] = marks[i].max(m);
        }
    };
    for node in &snapshot.open {
        mark(node.pos, Mark::Open);
    }
    for node in &snapshot.closed {
        mark(node.pos, Mark::Closed);
    }
    for &p in &snapshot.path {
        mark(p, Mark::Path);
    }

    let mut out = draw(grid, &marks, cfg);
    if cfg.show_scores {
        out.push_str(&render_scores(snapshot));
    }
    out
}

fn draw(grid: &Grid, marks: &[Mark], cfg: &RenderConfig) -> String {
    let (cols, rows) = grid.dimensions();
    let mut out = String::with_capacity(((cols + 1) * rows) as usize);
    for (i, (_, state)) in grid.iter().enumerate() {
        let ch = match (state, marks[i]) {
            (CellState::Start | CellState::End, _) | (_, Mark::None) => cfg.cell_glyph(state),
            (_, Mark::Open) => cfg.open,
            (_, Mark::Closed) => cfg.closed,
            (_, Mark::Path) => cfg.path,
        };
        out.push(ch);
        if (i as i32 + 1) % cols == 0 {
            out.push('\n');
        }
    }
    out
}

/// Table of the open nodes and their scores, in selection-scan order.
pub fn render_scores(snapshot: &Snapshot) -> String {
    let mut out = format!("{:>10} {:>8} {:>8} {:>8}\n", "open", "g", "h", "f");
    for node in &snapshot.open {
        out.push_str(&format!(
            "{:>10} {:>8.3} {:>8.3} {:>8.3}\n",
            node.pos.to_string(),
            node.g,
            node.h,
            node.f
        ));
    }
    out
}
