//! Cost policies distinguishing the four searches.
//!
//! Every search runs the same expansion loop; an [`Algorithm`] only decides
//! how a candidate node is scored and what happens when the open set already
//! holds a node for the same position.

use std::fmt;
use std::str::FromStr;

/// What to do with a candidate whose position is already open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateRule {
    /// Drop the candidate if an open entry has `g` no worse; otherwise add
    /// it alongside the existing entries.
    KeepBetterG,
    /// Drop the candidate if an open entry has `f` no worse; otherwise add
    /// it alongside the existing entries.
    KeepBetterF,
    /// Keep a single entry per position and lower its `g`, `f` and parent
    /// in place when the candidate is strictly cheaper.
    RelaxInPlace,
}

/// The search variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Best-first on `g + h`.
    #[default]
    AStar,
    /// Best-first on `g`, blind to the goal.
    Dijkstra,
    /// Best-first on `h`; `g` is tracked for reporting only.
    Greedy,
    /// Best-first on `g` with in-place relaxation of open nodes.
    UniformCost,
}

impl Algorithm {
    /// Every variant, in menu order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::Greedy,
        Algorithm::UniformCost,
    ];

    /// Short identifier accepted by [`FromStr`].
    pub const fn key(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::Dijkstra => "dijkstra",
            Self::Greedy => "greedy",
            Self::UniformCost => "ucs",
        }
    }

    /// Whether `h` is computed for candidates. When false, `h` is zero.
    pub const fn uses_heuristic(self) -> bool {
        matches!(self, Self::AStar | Self::Greedy)
    }

    /// Selection key from accumulated cost and estimate.
    #[inline]
    pub fn priority(self, g: f64, h: f64) -> f64 {
        match self {
            Self::AStar => g + h,
            Self::Greedy => h,
            Self::Dijkstra | Self::UniformCost => g,
        }
    }

    pub const fn duplicate_rule(self) -> DuplicateRule {
        match self {
            Self::AStar | Self::Dijkstra => DuplicateRule::KeepBetterG,
            Self::Greedy => DuplicateRule::KeepBetterF,
            Self::UniformCost => DuplicateRule::RelaxInPlace,
        }
    }

    /// Whether the returned path is a cheapest one (given an admissible
    /// heuristic for A*).
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Greedy)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AStar => "A*",
            Self::Dijkstra => "Dijkstra",
            Self::Greedy => "Greedy",
            Self::UniformCost => "Uniform-Cost",
        })
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "dijkstra" => Ok(Self::Dijkstra),
            "greedy" | "best-first" => Ok(Self::Greedy),
            "ucs" | "uniform" | "uniform-cost" => Ok(Self::UniformCost),
            other => Err(format!(
                "unknown algorithm {other:?} (expected astar, dijkstra, greedy or ucs)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities() {
        assert_eq!(Algorithm::AStar.priority(2.0, 3.0), 5.0);
        assert_eq!(Algorithm::Greedy.priority(2.0, 3.0), 3.0);
        assert_eq!(Algorithm::Dijkstra.priority(2.0, 3.0), 2.0);
        assert_eq!(Algorithm::UniformCost.priority(2.0, 0.0), 2.0);
    }

    #[test]
    fn policies() {
        assert!(Algorithm::AStar.uses_heuristic());
        assert!(Algorithm::Greedy.uses_heuristic());
        assert!(!Algorithm::Dijkstra.uses_heuristic());
        assert!(!Algorithm::UniformCost.uses_heuristic());
        assert_eq!(Algorithm::Dijkstra.duplicate_rule(), DuplicateRule::KeepBetterG);
        assert_eq!(Algorithm::Greedy.duplicate_rule(), DuplicateRule::KeepBetterF);
        assert_eq!(Algorithm::UniformCost.duplicate_rule(), DuplicateRule::RelaxInPlace);
        assert!(!Algorithm::Greedy.is_optimal());
    }

    #[test]
    fn keys_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.key().parse::<Algorithm>(), Ok(algo));
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert!("bfs".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::UniformCost.to_string(), "Uniform-Cost");
    }
}
