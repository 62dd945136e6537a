//! Step-by-step history of a search, for scrubbing back and forth.
//!
//! Rather than deep-copying the open and closed sets after every step,
//! [`SearchHistory`] keeps the state at the moment it was created plus the
//! [`StepDelta`] of each later step. Moving the cursor applies or reverts
//! deltas on a private copy; the live search is only stepped when the cursor
//! is already at its latest state.

use log::warn;
use stepgrid_core::Point;

use crate::frontier::Frontier;
use crate::node::SearchNode;
use crate::search::{Search, SearchStatus, StepDelta};
use crate::traits::Terrain;

/// Owned copy of a search's visible state at one iteration boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Open nodes in insertion order.
    pub open: Vec<SearchNode>,
    /// Closed nodes in closing order.
    pub closed: Vec<SearchNode>,
    pub path: Vec<Point>,
    pub finished: bool,
    pub status: SearchStatus,
    pub iteration: usize,
}

impl Snapshot {
    /// Positions and scores of the open nodes, for exact comparisons (node
    /// equality alone only looks at positions).
    pub fn open_scores(&self) -> Vec<(Point, f64, f64)> {
        self.open.iter().map(|n| (n.pos, n.g, n.f)).collect()
    }

    /// Positions and scores of the closed nodes.
    pub fn closed_scores(&self) -> Vec<(Point, f64, f64)> {
        self.closed.iter().map(|n| (n.pos, n.g, n.f)).collect()
    }
}

/// Replayable record of a search's steps.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    /// [`Search::generation`] of the recorded run.
    generation: u64,
    replay: Frontier,
    deltas: Vec<StepDelta>,
    /// Number of deltas currently applied to `replay`.
    cursor: usize,
}

impl SearchHistory {
    /// Start recording from the search's current state (normally right after
    /// [`Search::initialize`]).
    pub fn new<T: Terrain + ?Sized>(search: &Search<'_, T>) -> Self {
        Self {
            generation: search.generation(),
            replay: search.frontier().clone(),
            deltas: Vec::new(),
            cursor: 0,
        }
    }

    /// Iteration number of the recorded state the live search is at.
    fn live_iteration(&self) -> usize {
        self.replay.iterations - self.cursor + self.deltas.len()
    }

    /// Whether `search` is still the recorded run, at its latest recorded
    /// state.
    pub fn is_in_sync<T: Terrain + ?Sized>(&self, search: &Search<'_, T>) -> bool {
        search.generation() == self.generation && search.iteration_count() == self.live_iteration()
    }

    /// Append the search's latest step. Returns `false` if that step is
    /// already recorded, does not follow the last recorded one, or belongs
    /// to another run of the search (it was initialized again since).
    ///
    /// If the cursor was at the latest state it moves along.
    pub fn record<T: Terrain + ?Sized>(&mut self, search: &Search<'_, T>) -> bool {
        let Some(delta) = search.last_step() else {
            return false;
        };
        if delta.generation != self.generation {
            warn!(
                "history: refusing step {} of run {} (recording run {})",
                delta.iteration, delta.generation, self.generation
            );
            return false;
        }
        if delta.iteration != self.live_iteration() + 1 {
            warn!(
                "history: refusing step {} (expected {})",
                delta.iteration,
                self.live_iteration() + 1
            );
            return false;
        }
        let at_end = self.is_live();
        self.deltas.push(delta.clone());
        if at_end {
            self.replay.apply(delta);
            self.cursor += 1;
        }
        true
    }

    /// Move one step forward.
    ///
    /// Replays the next recorded step if the cursor is behind; otherwise
    /// steps the live search and records the result. The live search is
    /// left alone once it has moved on without this history (see
    /// [`is_in_sync`](Self::is_in_sync)). Returns whether the cursor moved.
    pub fn step_forward<T: Terrain + ?Sized>(&mut self, search: &mut Search<'_, T>) -> bool {
        if self.cursor < self.deltas.len() {
            self.replay.apply(&self.deltas[self.cursor]);
            self.cursor += 1;
            return true;
        }
        if !self.is_in_sync(search) {
            warn!(
                "history: search is at run {} iteration {}, recorded run {} iteration {}",
                search.generation(),
                search.iteration_count(),
                self.generation,
                self.live_iteration()
            );
            return false;
        }
        search.step() && self.record(search)
    }

    /// Move one step back. Returns `false` at the first recorded state.
    pub fn step_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.replay.revert(&self.deltas[self.cursor]);
        true
    }

    /// Move the cursor to `n` recorded steps, clamped to what is recorded.
    pub fn seek(&mut self, n: usize) {
        let n = n.min(self.deltas.len());
        while self.cursor < n {
            self.replay.apply(&self.deltas[self.cursor]);
            self.cursor += 1;
        }
        while self.cursor > n {
            self.step_back();
        }
    }

    /// Number of recorded steps applied at the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Whether the cursor is at the latest recorded state.
    pub fn is_live(&self) -> bool {
        self.cursor == self.deltas.len()
    }

    /// The recorded steps.
    pub fn deltas(&self) -> &[StepDelta] {
        &self.deltas
    }

    /// Status at the cursor.
    pub fn status(&self) -> SearchStatus {
        self.replay.status
    }

    /// Whether the state at the cursor has the goal reached.
    pub fn is_finished(&self) -> bool {
        self.replay.status == SearchStatus::Found
    }

    /// Open set size at the cursor.
    pub fn open_len(&self) -> usize {
        self.replay.open.len()
    }

    /// Closed set size at the cursor.
    pub fn closed_len(&self) -> usize {
        self.replay.closed.len()
    }

    /// State at the cursor.
    pub fn snapshot(&self) -> Snapshot {
        self.replay.snapshot()
    }

    /// State after `n` recorded steps, without moving the cursor.
    pub fn snapshot_at(&self, n: usize) -> Option<Snapshot> {
        if n > self.deltas.len() {
            return None;
        }
        let mut f = self.replay.clone();
        let mut at = self.cursor;
        while at < n {
            f.apply(&self.deltas[at]);
            at += 1;
        }
        while at > n {
            at -= 1;
            f.revert(&self.deltas[at]);
        }
        Some(f.snapshot())
    }
}
