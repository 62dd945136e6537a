use crate::distance::Heuristic;

/// Per-search settings.
///
/// A search copies its configuration at construction, so changing movement
/// rules means starting a new search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Allow the four diagonal moves (cost √2) besides the orthogonal ones.
    pub allow_diagonal: bool,
    /// Estimate used by A* and greedy search. Ignored by Dijkstra and
    /// uniform-cost search.
    pub heuristic: Heuristic,
    /// Stop after this many expansions without reaching the goal.
    pub max_iterations: Option<usize>,
}

impl SearchConfig {
    /// 4-way movement with the default heuristic and no iteration cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether diagonal moves are allowed.
    pub fn with_diagonal(mut self, allow: bool) -> Self {
        self.allow_diagonal = allow;
        self
    }

    /// Set the heuristic.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Cap the number of expansions.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }
}
