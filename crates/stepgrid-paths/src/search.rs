//! The resumable search state machine.
//!
//! A [`Search`] is created idle, armed with [`Search::initialize`], then
//! driven one expansion at a time with [`Search::step`] or all at once with
//! [`Search::run_to_completion`]. Between steps the whole state is readable:
//! open and closed sets, scores, the path once found.
//!
//! ```text
//! Idle ──initialize──▶ Ready ──step──▶ Searching ──step──▶ …
//!                                          │
//!                      Found / Exhausted / OutOfBudget ◀──┘
//! ```

use log::{debug, info, trace};
use stepgrid_core::{Endpoint, Grid, Point, Range};

use crate::algorithm::{Algorithm, DuplicateRule};
use crate::config::SearchConfig;
use crate::error::{EndpointIssue, SearchError};
use crate::frontier::Frontier;
use crate::history::Snapshot;
use crate::neighbors::Neighbors;
use crate::node::{NodeId, SearchNode};
use crate::traits::Terrain;

/// Lifecycle of a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// Not initialized yet.
    #[default]
    Idle,
    /// Initialized, no expansion done.
    Ready,
    /// At least one expansion done, goal not reached.
    Searching,
    /// Goal reached; the path is available.
    Found,
    /// Open set ran empty: no path exists.
    Exhausted,
    /// Iteration cap reached before the goal.
    OutOfBudget,
}

impl SearchStatus {
    /// Whether [`Search::step`] still has work to do.
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Ready | Self::Searching)
    }

    /// Whether the search has stopped for good.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted | Self::OutOfBudget)
    }
}

/// A found path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Cells from start to goal, both included.
    pub cells: Vec<Point>,
    /// Sum of move costs along the path.
    pub cost: f64,
}

impl Path {
    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// In-place cost update of an open node (uniform-cost search only).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relaxation {
    pub node: NodeId,
    pub before: SearchNode,
    pub after: SearchNode,
}

/// Everything one expansion changed.
///
/// Applying the deltas of a search in order reproduces its state after each
/// step; they are also exactly reversible, which is what history scrubbing
/// relies on.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepDelta {
    /// [`Search::generation`] of the run that produced this step.
    pub generation: u64,
    /// Iteration number after this step (1 for the first expansion).
    pub iteration: usize,
    /// Node moved from open to closed.
    pub closed: NodeId,
    /// Other open entries for the closed position, discarded as stale.
    pub dropped: Vec<NodeId>,
    /// Nodes appended to the arena and the open set, in order.
    pub opened: Vec<SearchNode>,
    pub relaxed: Vec<Relaxation>,
    /// The path, when this step reached the goal; empty otherwise.
    pub path: Vec<Point>,
    pub status_before: SearchStatus,
    pub status_after: SearchStatus,
}

/// A resumable best-first search over a borrowed [`Terrain`].
///
/// The terrain is borrowed immutably for the lifetime of the search, so the
/// grid cannot change under a running search; to search a modified grid,
/// build a new `Search`.
pub struct Search<'a, T: Terrain + ?Sized = Grid> {
    terrain: &'a T,
    algorithm: Algorithm,
    config: SearchConfig,
    bounds: Range,
    start: Point,
    goal: Point,
    state: Frontier,
    /// Per-cell closed flags, indexed by `bounds.index_of`.
    closed_cells: Vec<bool>,
    /// Per-cell best open entry. New duplicates are only ever added when
    /// strictly better, so the latest entry is the best one.
    open_best: Vec<Option<NodeId>>,
    nbuf: Neighbors,
    last: Option<StepDelta>,
    /// Bumped by every successful `initialize`.
    generation: u64,
}

impl<'a, T: Terrain + ?Sized> Search<'a, T> {
    /// Create an idle search.
    pub fn new(terrain: &'a T, algorithm: Algorithm, config: SearchConfig) -> Self {
        let (cols, rows) = terrain.dimensions();
        Self {
            terrain,
            algorithm,
            config,
            bounds: Range::new(0, 0, cols.max(0), rows.max(0)),
            start: Point::ZERO,
            goal: Point::ZERO,
            state: Frontier::default(),
            closed_cells: Vec::new(),
            open_best: Vec::new(),
            nbuf: Neighbors::new(),
            last: None,
            generation: 0,
        }
    }

    /// Check an endpoint and return its cell index.
    fn validate(&self, which: Endpoint, p: Point) -> Result<usize, SearchError> {
        let invalid = |reason| SearchError::InvalidEndpoint {
            endpoint: which,
            pos: p,
            reason,
        };
        let Some(idx) = self.cell(p).filter(|_| self.terrain.contains(p)) else {
            return Err(invalid(EndpointIssue::OutOfBounds));
        };
        if self.terrain.is_obstacle(p) {
            return Err(invalid(EndpointIssue::Obstacle));
        }
        Ok(idx)
    }

    #[inline]
    fn cell(&self, p: Point) -> Option<usize> {
        self.bounds.index_of(p)
    }

    fn estimate(&self, p: Point) -> f64 {
        if self.algorithm.uses_heuristic() {
            self.config
                .heuristic
                .estimate(p, self.goal, self.config.allow_diagonal)
        } else {
            0.0
        }
    }

    /// Prepare a fresh search from `start` to `goal`, discarding any previous
    /// state.
    ///
    /// Fails if either endpoint is outside the terrain or on an obstacle.
    /// When `start == goal` the search is immediately [`SearchStatus::Found`]
    /// with the one-cell path `[start]` and zero iterations.
    pub fn initialize(&mut self, start: Point, goal: Point) -> Result<(), SearchError> {
        let start_cell = self.validate(Endpoint::Start, start)?;
        self.validate(Endpoint::End, goal)?;

        self.generation += 1;
        self.start = start;
        self.goal = goal;
        self.last = None;
        self.state = Frontier::default();
        self.closed_cells.clear();
        self.closed_cells.resize(self.bounds.len(), false);
        self.open_best.clear();
        self.open_best.resize(self.bounds.len(), None);

        let h = self.estimate(start);
        let root = SearchNode::root(start, h, self.algorithm.priority(0.0, h));
        let root_id = self.state.next_id();
        self.state.nodes.push(root);

        if start == goal {
            self.state.closed.push(root_id);
            self.closed_cells[start_cell] = true;
            self.state.path = vec![start];
            self.state.status = SearchStatus::Found;
            debug!("{} search {start} -> {goal}: start is the goal", self.algorithm);
            return Ok(());
        }

        self.state.open.push(root_id);
        self.open_best[start_cell] = Some(root_id);
        self.state.status = if self.config.max_iterations == Some(0) {
            SearchStatus::OutOfBudget
        } else {
            SearchStatus::Ready
        };
        debug!(
            "{} search {start} -> {goal} initialized (diagonal: {}, heuristic: {})",
            self.algorithm, self.config.allow_diagonal, self.config.heuristic
        );
        Ok(())
    }

    /// Re-initialize with the current endpoints.
    pub fn restart(&mut self) -> Result<(), SearchError> {
        self.initialize(self.start, self.goal)
    }

    /// Perform one expansion.
    ///
    /// Returns `false` without doing anything when the search is idle or has
    /// stopped (goal found, open set exhausted, or iteration cap reached).
    pub fn step(&mut self) -> bool {
        if !self.state.status.is_active() {
            return false;
        }
        let Some(current) = self.select() else {
            self.state.status = SearchStatus::Exhausted;
            return false;
        };
        let delta = self.expand(current);
        self.commit(delta);
        true
    }

    /// Index of the open node with the lowest `f`, the earliest inserted on
    /// ties.
    fn select(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &id in &self.state.open {
            let f = self.state.node(id).f;
            match best {
                Some((_, bf)) if f >= bf => {}
                _ => best = Some((id, f)),
            }
        }
        best.map(|(id, _)| id)
    }

    fn expand(&mut self, current: NodeId) -> StepDelta {
        let status_before = self.state.status;
        let iteration = self.state.iterations + 1;
        let cur = *self.state.node(current);

        let dropped: Vec<NodeId> = self
            .state
            .open
            .iter()
            .copied()
            .filter(|&id| id != current && self.state.node(id).pos == cur.pos)
            .collect();

        let mut delta = StepDelta {
            generation: self.generation,
            iteration,
            closed: current,
            dropped,
            opened: Vec::new(),
            relaxed: Vec::new(),
            path: Vec::new(),
            status_before,
            status_after: SearchStatus::Searching,
        };

        if cur.pos == self.goal {
            delta.path = self.reconstruct(current);
            delta.status_after = SearchStatus::Found;
            return delta;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        for &(np, cost) in nbuf.moves(self.terrain, cur.pos, self.config.allow_diagonal) {
            let Some(ci) = self.cell(np) else {
                continue;
            };
            if self.closed_cells[ci] {
                continue;
            }
            let g = cur.g + cost;
            let h = self.estimate(np);
            let candidate = SearchNode {
                pos: np,
                parent: Some(current),
                g,
                h,
                f: self.algorithm.priority(g, h),
            };

            let Some(existing_id) = self.open_best[ci] else {
                delta.opened.push(candidate);
                continue;
            };
            let existing = *self.state.node(existing_id);
            match self.algorithm.duplicate_rule() {
                DuplicateRule::KeepBetterG => {
                    if existing.g > candidate.g {
                        delta.opened.push(candidate);
                    }
                }
                DuplicateRule::KeepBetterF => {
                    if existing.f > candidate.f {
                        delta.opened.push(candidate);
                    }
                }
                DuplicateRule::RelaxInPlace => {
                    if existing.g > candidate.g {
                        let after = SearchNode {
                            g: candidate.g,
                            f: candidate.f,
                            parent: candidate.parent,
                            ..existing
                        };
                        delta.relaxed.push(Relaxation {
                            node: existing_id,
                            before: existing,
                            after,
                        });
                    }
                }
            }
        }
        self.nbuf = nbuf;

        let open_after = self.state.open.len() - 1 - delta.dropped.len() + delta.opened.len();
        delta.status_after = if open_after == 0 {
            SearchStatus::Exhausted
        } else if self.config.max_iterations.is_some_and(|max| iteration >= max) {
            SearchStatus::OutOfBudget
        } else {
            SearchStatus::Searching
        };
        delta
    }

    fn commit(&mut self, delta: StepDelta) {
        let first_new = self.state.next_id().0;
        self.state.apply(&delta);

        let closed_pos = self.state.node(delta.closed).pos;
        if let Some(ci) = self.cell(closed_pos) {
            self.closed_cells[ci] = true;
            self.open_best[ci] = None;
        }
        for (i, node) in delta.opened.iter().enumerate() {
            if let Some(ni) = self.cell(node.pos) {
                self.open_best[ni] = Some(NodeId(first_new + i));
            }
        }

        trace!(
            "{} step {}: closed {} (f = {:.3}), +{} open, {} relaxed, {} dropped",
            self.algorithm,
            delta.iteration,
            closed_pos,
            self.state.node(delta.closed).f,
            delta.opened.len(),
            delta.relaxed.len(),
            delta.dropped.len()
        );
        match delta.status_after {
            SearchStatus::Found => info!(
                "{} found a {}-cell path {} -> {} after {} iterations (cost {:.3})",
                self.algorithm,
                self.state.path.len(),
                self.start,
                self.goal,
                delta.iteration,
                self.state.path_cost().unwrap_or_default()
            ),
            SearchStatus::Exhausted => info!(
                "{} found no path {} -> {} ({} nodes closed)",
                self.algorithm,
                self.start,
                self.goal,
                self.state.closed.len()
            ),
            SearchStatus::OutOfBudget => debug!(
                "{} stopped after {} iterations without reaching {}",
                self.algorithm, delta.iteration, self.goal
            ),
            _ => {}
        }
        self.last = Some(delta);
    }

    fn reconstruct(&self, goal: NodeId) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            let node = self.state.node(id);
            path.push(node.pos);
            cur = node.parent;
        }
        path.reverse();
        path
    }

    /// Initialize and step until the search stops.
    ///
    /// Returns `Ok(None)` when no path exists (or the iteration cap was hit;
    /// check [`status`](Self::status) to tell them apart).
    pub fn run_to_completion(&mut self, start: Point, goal: Point) -> Result<Option<Path>, SearchError> {
        self.initialize(start, goal)?;
        while self.step() {}
        Ok(self.result())
    }

    /// The found path, if the search has reached the goal.
    pub fn result(&self) -> Option<Path> {
        let cost = self.state.path_cost()?;
        Some(Path {
            cells: self.state.path.clone(),
            cost,
        })
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn terrain(&self) -> &'a T {
        self.terrain
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn status(&self) -> SearchStatus {
        self.state.status
    }

    /// Whether the goal has been reached.
    pub fn is_finished(&self) -> bool {
        self.state.status == SearchStatus::Found
    }

    /// Number of expansions performed since [`initialize`](Self::initialize).
    pub fn iteration_count(&self) -> usize {
        self.state.iterations
    }

    /// Run counter: 0 while idle, then one more per successful
    /// [`initialize`](Self::initialize) or [`restart`](Self::restart).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Open nodes in insertion order.
    pub fn open_set(&self) -> impl Iterator<Item = &SearchNode> + '_ {
        self.state.open_nodes()
    }

    /// Closed nodes in the order they were closed.
    pub fn closed_set(&self) -> impl Iterator<Item = &SearchNode> + '_ {
        self.state.closed_nodes()
    }

    pub fn open_ids(&self) -> &[NodeId] {
        &self.state.open
    }

    pub fn closed_ids(&self) -> &[NodeId] {
        &self.state.closed
    }

    pub fn open_len(&self) -> usize {
        self.state.open.len()
    }

    pub fn closed_len(&self) -> usize {
        self.state.closed.len()
    }

    /// Every node discovered so far, indexed by [`NodeId`].
    pub fn nodes(&self) -> &[SearchNode] {
        &self.state.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.state.nodes.get(id.0)
    }

    /// Whether `p` has been expanded.
    pub fn is_closed(&self, p: Point) -> bool {
        self.bounds
            .index_of(p)
            .and_then(|i| self.closed_cells.get(i).copied())
            .unwrap_or(false)
    }

    /// Best open node at `p`, if any.
    pub fn open_node_at(&self, p: Point) -> Option<&SearchNode> {
        let i = self.bounds.index_of(p)?;
        let id = (*self.open_best.get(i)?)?;
        Some(self.state.node(id))
    }

    /// The path from start to goal, empty until found.
    pub fn path(&self) -> &[Point] {
        &self.state.path
    }

    /// Cost of the found path.
    pub fn path_cost(&self) -> Option<f64> {
        self.state.path_cost()
    }

    /// Changes made by the latest [`step`](Self::step), if any since
    /// initialization.
    pub fn last_step(&self) -> Option<&StepDelta> {
        self.last.as_ref()
    }

    /// Owned copy of the current open/closed/path state.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub(crate) fn frontier(&self) -> &Frontier {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{Heuristic, chebyshev, manhattan};
    use crate::neighbors::step_cost;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn four_way() -> SearchConfig {
        SearchConfig::new()
    }

    fn eight_way() -> SearchConfig {
        SearchConfig::new().with_diagonal(true)
    }

    fn run(grid: &Grid, algo: Algorithm, config: SearchConfig, from: Point, to: Point) -> Option<Path> {
        Search::new(grid, algo, config)
            .run_to_completion(from, to)
            .unwrap()
    }

    /// Checks that `path` is a walk from `from` to `to` over free cells using
    /// allowed moves, and that its cost adds up.
    fn assert_walk(grid: &Grid, path: &Path, from: Point, to: Point, allow_diagonal: bool) {
        assert_eq!(path.cells.first(), Some(&from));
        assert_eq!(path.cells.last(), Some(&to));
        let mut cost = 0.0;
        for w in path.cells.windows(2) {
            let d = w[1] - w[0];
            assert_eq!(chebyshev(w[0], w[1]), 1, "{} -> {} is not a move", w[0], w[1]);
            if !allow_diagonal {
                assert_eq!(manhattan(w[0], w[1]), 1);
            }
            assert!(!grid.is_obstacle(w[1]));
            cost += step_cost(d);
        }
        assert!((cost - path.cost).abs() < EPS, "cost {} != {}", path.cost, cost);
    }

    fn walled() -> Grid {
        Grid::parse(
            "..#..
             ..#..
             S.#.E
             ..#..
             ..#..",
        )
        .unwrap()
    }

    #[test]
    fn open_grid_four_way() {
        let grid = Grid::new(5, 5).unwrap();
        for algo in [Algorithm::AStar, Algorithm::Dijkstra] {
            let path = run(&grid, algo, four_way(), pt(0, 0), pt(4, 4)).unwrap();
            assert_eq!(path.len(), 9, "{algo}");
            assert_eq!(path.cost, 8.0, "{algo}");
            assert_walk(&grid, &path, pt(0, 0), pt(4, 4), false);
        }
    }

    #[test]
    fn open_grid_eight_way() {
        let grid = Grid::new(5, 5).unwrap();
        for algo in [Algorithm::AStar, Algorithm::Dijkstra] {
            let path = run(&grid, algo, eight_way(), pt(0, 0), pt(4, 4)).unwrap();
            assert_eq!(path.len(), 5, "{algo}");
            assert!((path.cost - 4.0 * std::f64::consts::SQRT_2).abs() < EPS, "{algo}");
            assert_walk(&grid, &path, pt(0, 0), pt(4, 4), true);
        }
    }

    #[test]
    fn every_variant_finds_shortest_walks_on_open_grids() {
        let grid = Grid::new(7, 6).unwrap();
        let pairs = [
            (pt(0, 0), pt(6, 5)),
            (pt(5, 1), pt(1, 4)),
            (pt(3, 3), pt(3, 0)),
            (pt(6, 0), pt(0, 0)),
        ];
        for algo in Algorithm::ALL {
            for &(from, to) in &pairs {
                let path = run(&grid, algo, four_way(), from, to).unwrap();
                assert_eq!(path.len() as i32, manhattan(from, to) + 1, "{algo} {from} -> {to}");
                assert_walk(&grid, &path, from, to, false);

                let path = run(&grid, algo, eight_way(), from, to).unwrap();
                assert_eq!(path.len() as i32, chebyshev(from, to) + 1, "{algo} {from} -> {to}");
                assert_walk(&grid, &path, from, to, true);
            }
        }
    }

    #[test]
    fn wall_exhausts_open_set() {
        let grid = walled();
        for algo in Algorithm::ALL {
            for config in [four_way(), eight_way()] {
                let mut search = Search::new(&grid, algo, config);
                let result = search.run_to_completion(grid.start(), grid.end()).unwrap();
                assert_eq!(result, None);
                assert!(search.path().is_empty());
                assert!(!search.is_finished());
                assert_eq!(search.status(), SearchStatus::Exhausted);
                assert_eq!(search.open_len(), 0);
                assert_eq!(search.closed_len(), 10, "{algo}");
                assert_eq!(search.path_cost(), None);
                assert!(!search.step());
            }
        }
    }

    #[test]
    fn start_is_goal() {
        let grid = Grid::new(5, 5).unwrap();
        for algo in Algorithm::ALL {
            let mut search = Search::new(&grid, algo, four_way());
            let path = search.run_to_completion(pt(2, 2), pt(2, 2)).unwrap().unwrap();
            assert_eq!(path.cells, vec![pt(2, 2)]);
            assert_eq!(path.steps(), 0);
            assert_eq!(path.cost, 0.0);
            assert_eq!(search.iteration_count(), 0);
            assert_eq!(search.status(), SearchStatus::Found);
            assert!(search.is_closed(pt(2, 2)));
            assert_eq!(search.open_len(), 0);
            assert!(!search.step());
        }

        let one = Grid::new(1, 1).unwrap();
        let path = run(&one, Algorithm::AStar, four_way(), one.start(), one.end()).unwrap();
        assert_eq!(path.cells, vec![pt(0, 0)]);
    }

    #[test]
    fn invalid_endpoints() {
        let grid = walled();
        let mut search = Search::new(&grid, Algorithm::AStar, four_way());
        assert_eq!(
            search.initialize(pt(-1, 0), grid.end()),
            Err(SearchError::InvalidEndpoint {
                endpoint: Endpoint::Start,
                pos: pt(-1, 0),
                reason: EndpointIssue::OutOfBounds,
            })
        );
        assert_eq!(
            search.initialize(grid.start(), pt(2, 2)),
            Err(SearchError::InvalidEndpoint {
                endpoint: Endpoint::End,
                pos: pt(2, 2),
                reason: EndpointIssue::Obstacle,
            })
        );
        assert_eq!(
            search.initialize(grid.start(), pt(5, 0)).unwrap_err().to_string(),
            "end position (5, 0) is outside the grid"
        );
        assert_eq!(search.status(), SearchStatus::Idle);
        assert!(!search.step());
    }

    #[test]
    fn failed_initialize_keeps_previous_search() {
        let grid = Grid::new(6, 6).unwrap();
        let mut search = Search::new(&grid, Algorithm::Dijkstra, four_way());
        search.initialize(pt(0, 0), pt(5, 5)).unwrap();
        search.step();
        search.step();
        assert!(search.initialize(pt(9, 9), pt(5, 5)).is_err());
        assert_eq!(search.iteration_count(), 2);
        assert_eq!(search.status(), SearchStatus::Searching);
    }

    #[test]
    fn step_by_step_lifecycle() {
        let grid = Grid::new(6, 4).unwrap();
        let mut search = Search::new(&grid, Algorithm::AStar, four_way());
        assert_eq!(search.status(), SearchStatus::Idle);
        search.initialize(pt(0, 0), pt(5, 3)).unwrap();
        assert_eq!(search.status(), SearchStatus::Ready);
        assert_eq!(search.open_len(), 1);
        assert_eq!(search.closed_len(), 0);
        assert!(search.last_step().is_none());

        assert!(search.step());
        assert_eq!(search.status(), SearchStatus::Searching);
        assert_eq!(search.iteration_count(), 1);
        let first = search.last_step().unwrap();
        assert_eq!(first.status_before, SearchStatus::Ready);
        // (0, 0) only has its down and right neighbors.
        let opened: Vec<Point> = first.opened.iter().map(|n| n.pos).collect();
        assert_eq!(opened, vec![pt(0, 1), pt(1, 0)]);
        let start = search.closed_set().next().unwrap();
        assert_eq!(start.pos, pt(0, 0));
        assert_eq!(start.parent, None);

        while search.step() {}
        assert_eq!(search.status(), SearchStatus::Found);
        assert_eq!(search.result().unwrap().cost, 8.0);

        search.restart().unwrap();
        assert_eq!(search.status(), SearchStatus::Ready);
        assert_eq!(search.iteration_count(), 0);
        assert!(search.path().is_empty());
        assert!(!search.is_closed(pt(0, 0)));
    }

    #[test]
    fn scores_follow_the_cost_policy() {
        let grid = Grid::new(6, 6).unwrap();
        let goal = pt(5, 5);
        for algo in Algorithm::ALL {
            let mut search = Search::new(&grid, algo, eight_way());
            search.initialize(pt(0, 0), goal).unwrap();
            for _ in 0..5 {
                search.step();
            }
            for node in search.open_set().chain(search.closed_set()) {
                let h = if algo.uses_heuristic() {
                    Heuristic::GridDistance.estimate(node.pos, goal, true)
                } else {
                    0.0
                };
                assert_eq!(node.h, h, "{algo} at {}", node.pos);
                assert_eq!(node.f, algo.priority(node.g, node.h), "{algo} at {}", node.pos);
            }
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let grid = Grid::parse(
            "S...#.....
             .##.#.###.
             .#..#...#.
             .#.###..#.
             .......#E.",
        )
        .unwrap();
        for algo in Algorithm::ALL {
            for config in [four_way(), eight_way()] {
                let mut search = Search::new(&grid, algo, config);
                let first = search.run_to_completion(grid.start(), grid.end()).unwrap();
                let snap = search.snapshot();
                let second = search.run_to_completion(grid.start(), grid.end()).unwrap();
                assert!(first.is_some(), "{algo}");
                assert_eq!(first, second, "{algo}");
                assert_eq!(snap.closed_scores(), search.snapshot().closed_scores());
                assert_eq!(snap.open_scores(), search.snapshot().open_scores());
            }
        }
    }

    #[test]
    fn closed_set_grows_and_never_reopens() {
        let grid = Grid::parse(
            "S....#....
             .###.#.##.
             ...#...#..
             ##.####.#.
             ........#E",
        )
        .unwrap();
        for algo in Algorithm::ALL {
            for config in [four_way(), eight_way()] {
                let mut search = Search::new(&grid, algo, config);
                search.initialize(grid.start(), grid.end()).unwrap();
                let mut closed = 0;
                while search.step() {
                    assert_eq!(search.closed_len(), closed + 1, "{algo}");
                    closed = search.closed_len();
                    let mut seen: Vec<Point> = search.closed_set().map(|n| n.pos).collect();
                    seen.sort();
                    seen.dedup();
                    assert_eq!(seen.len(), closed, "{algo}: a position was closed twice");
                    for node in search.open_set() {
                        assert!(!search.is_closed(node.pos), "{algo}: {} is open and closed", node.pos);
                    }
                }
                assert!(search.is_finished(), "{algo}");
            }
        }
    }

    #[test]
    fn open_duplicates_only_when_strictly_better() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grids: Vec<Grid> = (0..20).map(|_| random_grid(&mut rng, 12, 9, 0.3)).collect();
        grids.push(
            Grid::parse(
                "S..#......
                 .#.#.####.
                 .#...#....
                 .####.#.#.
                 ......#.#E",
            )
            .unwrap(),
        );
        let (mut dropped, mut relaxed) = (0, 0);
        for grid in &grids {
            for algo in Algorithm::ALL {
                let mut search = Search::new(grid, algo, eight_way());
                search.initialize(grid.start(), grid.end()).unwrap();
                while search.step() {
                    let ids = search.open_ids();
                    assert!(ids.windows(2).all(|w| w[0] < w[1]));
                    for (i, &a) in ids.iter().enumerate() {
                        for &b in &ids[i + 1..] {
                            let (na, nb) = (search.node(a).unwrap(), search.node(b).unwrap());
                            if na.pos != nb.pos {
                                continue;
                            }
                            match algo.duplicate_rule() {
                                DuplicateRule::KeepBetterG => assert!(nb.g < na.g, "{algo}"),
                                DuplicateRule::KeepBetterF => assert!(nb.f < na.f, "{algo}"),
                                DuplicateRule::RelaxInPlace => {
                                    panic!("{algo}: {} open twice", na.pos)
                                }
                            }
                        }
                    }
                    if let Some(delta) = search.last_step() {
                        for r in &delta.relaxed {
                            assert_eq!(algo, Algorithm::UniformCost);
                            assert!(r.after.g < r.before.g);
                            assert_eq!(r.after.pos, r.before.pos);
                        }
                        if algo == Algorithm::UniformCost {
                            assert!(delta.dropped.is_empty());
                        }
                        dropped += delta.dropped.len();
                        relaxed += delta.relaxed.len();
                    }
                }
            }
        }
        assert!(dropped > 0, "no stale duplicate was ever dropped");
        assert!(relaxed > 0, "no open node was ever relaxed");
    }

    #[test]
    fn iteration_budget() {
        let grid = Grid::new(10, 10).unwrap();
        let config = four_way().with_max_iterations(3);
        let mut search = Search::new(&grid, Algorithm::AStar, config);
        search.initialize(pt(0, 0), pt(9, 9)).unwrap();
        assert!(search.step());
        assert!(search.step());
        assert!(search.step());
        assert!(!search.step());
        assert_eq!(search.status(), SearchStatus::OutOfBudget);
        assert_eq!(search.iteration_count(), 3);
        assert_eq!(search.result(), None);

        let mut none = Search::new(&grid, Algorithm::AStar, four_way().with_max_iterations(0));
        none.initialize(pt(0, 0), pt(9, 9)).unwrap();
        assert_eq!(none.status(), SearchStatus::OutOfBudget);
        assert!(!none.step());

        // A cap that is never reached changes nothing.
        let capped = run(&grid, Algorithm::AStar, four_way().with_max_iterations(500), pt(0, 0), pt(9, 9));
        assert_eq!(capped, run(&grid, Algorithm::AStar, four_way(), pt(0, 0), pt(9, 9)));
    }

    #[test]
    fn astar_expands_no_more_than_dijkstra() {
        let grid = Grid::new(8, 8).unwrap();
        for config in [four_way(), eight_way()] {
            let mut astar = Search::new(&grid, Algorithm::AStar, config);
            astar.run_to_completion(pt(0, 0), pt(7, 7)).unwrap();
            let mut dijkstra = Search::new(&grid, Algorithm::Dijkstra, config);
            dijkstra.run_to_completion(pt(0, 0), pt(7, 7)).unwrap();
            assert!(astar.iteration_count() <= dijkstra.iteration_count());
        }
    }

    #[test]
    fn squared_euclidean_still_reaches_the_goal() {
        let grid = walled();
        let mut open = grid.clone();
        open.clear();
        let config = eight_way().with_heuristic(Heuristic::SquaredEuclidean);
        for algo in [Algorithm::AStar, Algorithm::Greedy] {
            let path = run(&open, algo, config, open.start(), open.end()).unwrap();
            assert_walk(&open, &path, open.start(), open.end(), true);
            assert_eq!(run(&grid, algo, config, grid.start(), grid.end()), None);
        }
    }

    fn random_grid(rng: &mut StdRng, cols: i32, rows: i32, density: f64) -> Grid {
        let mut grid = Grid::new(cols, rows).unwrap();
        for y in 0..rows {
            for x in 0..cols {
                if rng.random_bool(density) {
                    grid.set_obstacle(pt(x, y), true);
                }
            }
        }
        grid
    }

    #[test]
    fn optimal_variants_agree_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut found = 0;
        for _ in 0..60 {
            let grid = random_grid(&mut rng, 14, 10, 0.3);
            for config in [four_way(), eight_way()] {
                let (from, to) = (grid.start(), grid.end());
                let reference = run(&grid, Algorithm::Dijkstra, config, from, to);
                for algo in [Algorithm::AStar, Algorithm::UniformCost, Algorithm::Greedy] {
                    let path = run(&grid, algo, config, from, to);
                    assert_eq!(path.is_some(), reference.is_some(), "{algo}\n{grid}");
                    let (Some(path), Some(best)) = (path, reference.as_ref()) else {
                        continue;
                    };
                    assert_walk(&grid, &path, from, to, config.allow_diagonal);
                    if algo.is_optimal() {
                        assert!((path.cost - best.cost).abs() < EPS, "{algo}\n{grid}");
                    } else {
                        assert!(path.cost >= best.cost - EPS, "{algo}\n{grid}");
                    }
                }
                found += usize::from(reference.is_some());
            }
        }
        assert!(found > 0);
    }

    #[test]
    fn last_step_describes_the_change() {
        let grid = Grid::new(4, 4).unwrap();
        let mut search = Search::new(&grid, Algorithm::UniformCost, eight_way());
        search.initialize(pt(0, 0), pt(3, 3)).unwrap();
        while search.step() {
            let delta = search.last_step().unwrap();
            assert_eq!(delta.iteration, search.iteration_count());
            assert_eq!(search.closed_ids().last(), Some(&delta.closed));
            assert_eq!(delta.status_after, search.status());
        }
        let delta = search.last_step().unwrap();
        assert_eq!(delta.status_after, SearchStatus::Found);
        assert_eq!(delta.path, search.path());
        assert_eq!(search.open_node_at(pt(3, 3)), None);
    }
}
