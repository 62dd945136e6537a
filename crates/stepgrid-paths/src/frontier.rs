//! Open/closed bookkeeping shared by live searches and history replay.
//!
//! A [`Frontier`] only changes by applying a [`StepDelta`], and every delta
//! can be reverted exactly. The live [`Search`](crate::Search) computes a
//! delta per expansion and applies it; [`SearchHistory`](crate::SearchHistory)
//! applies and reverts the recorded deltas on its own copy.

use stepgrid_core::Point;

use crate::history::Snapshot;
use crate::node::{NodeId, SearchNode};
use crate::search::{SearchStatus, StepDelta};

#[derive(Debug, Clone, Default)]
pub(crate) struct Frontier {
    /// Every node ever discovered, indexed by `NodeId`. Append-only.
    pub(crate) nodes: Vec<SearchNode>,
    /// Open node ids. Ids grow with insertion, so this stays sorted and
    /// iteration order is insertion order.
    pub(crate) open: Vec<NodeId>,
    /// Closed node ids in closing order.
    pub(crate) closed: Vec<NodeId>,
    pub(crate) path: Vec<Point>,
    pub(crate) status: SearchStatus,
    pub(crate) iterations: usize,
}

impl Frontier {
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len())
    }

    pub(crate) fn open_nodes(&self) -> impl Iterator<Item = &SearchNode> + '_ {
        self.open.iter().map(|&id| self.node(id))
    }

    pub(crate) fn closed_nodes(&self) -> impl Iterator<Item = &SearchNode> + '_ {
        self.closed.iter().map(|&id| self.node(id))
    }

    /// Cost of the found path, if any.
    pub(crate) fn path_cost(&self) -> Option<f64> {
        if self.status != SearchStatus::Found {
            return None;
        }
        self.closed.last().map(|&id| self.node(id).g)
    }

    fn remove_open(&mut self, id: NodeId) {
        if let Ok(i) = self.open.binary_search(&id) {
            self.open.remove(i);
        }
    }

    fn insert_open(&mut self, id: NodeId) {
        if let Err(i) = self.open.binary_search(&id) {
            self.open.insert(i, id);
        }
    }

    pub(crate) fn apply(&mut self, delta: &StepDelta) {
        self.remove_open(delta.closed);
        self.closed.push(delta.closed);
        for &id in &delta.dropped {
            self.remove_open(id);
        }
        for node in &delta.opened {
            let id = self.next_id();
            self.nodes.push(*node);
            self.open.push(id);
        }
        for r in &delta.relaxed {
            self.nodes[r.node.0] = r.after;
        }
        if !delta.path.is_empty() {
            self.path.clone_from(&delta.path);
        }
        self.status = delta.status_after;
        self.iterations = delta.iteration;
    }

    pub(crate) fn revert(&mut self, delta: &StepDelta) {
        if !delta.path.is_empty() {
            self.path.clear();
        }
        for r in delta.relaxed.iter().rev() {
            self.nodes[r.node.0] = r.before;
        }
        let kept = self.nodes.len() - delta.opened.len();
        self.nodes.truncate(kept);
        self.open.retain(|id| id.0 < kept);
        for &id in &delta.dropped {
            self.insert_open(id);
        }
        self.closed.pop();
        self.insert_open(delta.closed);
        self.status = delta.status_before;
        self.iterations = delta.iteration - 1;
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            open: self.open_nodes().copied().collect(),
            closed: self.closed_nodes().copied().collect(),
            path: self.path.clone(),
            finished: self.status == SearchStatus::Found,
            status: self.status,
            iteration: self.iterations,
        }
    }
}
