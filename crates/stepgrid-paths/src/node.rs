use std::fmt;

use stepgrid_core::Point;

/// Index of a node in a search's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One discovered position in a search.
///
/// Equality compares positions only: two nodes for the same cell are the
/// same node as far as duplicate detection is concerned, whatever their
/// scores.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub pos: Point,
    /// Node this one was reached from; `None` for the start node.
    pub parent: Option<NodeId>,
    /// Accumulated move cost from the start.
    pub g: f64,
    /// Heuristic estimate to the goal.
    pub h: f64,
    /// Selection key.
    pub f: f64,
}

impl SearchNode {
    /// The start node: no parent, zero cost.
    pub fn root(pos: Point, h: f64, f: f64) -> Self {
        Self {
            pos,
            parent: None,
            g: 0.0,
            h,
            f,
        }
    }

    /// The scores as a tuple, handy when comparing snapshots exactly.
    #[inline]
    pub fn scores(&self) -> (f64, f64, f64) {
        (self.g, self.h, self.f)
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for SearchNode {}
