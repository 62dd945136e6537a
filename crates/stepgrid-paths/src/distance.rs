use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use stepgrid_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance: the cost of the cheapest 8-way path on an open grid
/// with unit orthogonal and √2 diagonal steps.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let (dx, dy) = a.abs_diff(b);
    let (lo, hi) = (dx.min(dy) as f64, dx.max(dy) as f64);
    hi + (SQRT_2 - 1.0) * lo
}

/// Squared Euclidean distance `dx² + dy²`. Not admissible on unit-cost
/// grids.
#[inline]
pub fn squared_euclidean(a: Point, b: Point) -> f64 {
    let (dx, dy) = a.abs_diff(b);
    let (dx, dy) = (dx as f64, dy as f64);
    dx * dx + dy * dy
}

/// Heuristic family used by A* and greedy search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Manhattan distance for 4-way movement, octile distance for 8-way.
    /// Admissible, so A* paths are optimal.
    #[default]
    GridDistance,
    /// `dx² + dy²` regardless of movement. Overestimates, so A* may return
    /// longer paths; greedy search follows it more aggressively.
    SquaredEuclidean,
}

impl Heuristic {
    /// Estimated remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point, allow_diagonal: bool) -> f64 {
        match self {
            Self::GridDistance if allow_diagonal => octile(from, to),
            Self::GridDistance => manhattan(from, to) as f64,
            Self::SquaredEuclidean => squared_euclidean(from, to),
        }
    }

    /// Whether the estimate never exceeds the true remaining cost.
    pub const fn is_admissible(self) -> bool {
        matches!(self, Self::GridDistance)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridDistance => f.write_str("grid"),
            Self::SquaredEuclidean => f.write_str("squared"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" | "manhattan" | "octile" => Ok(Self::GridDistance),
            "squared" | "squared-euclidean" | "euclidean2" => Ok(Self::SquaredEuclidean),
            other => Err(format!("unknown heuristic {other:?} (expected grid or squared)")),
        }
    }
}

/// Heuristic between two positions as used by every search: octile distance
/// when diagonal moves are allowed, Manhattan distance otherwise.
#[inline]
pub fn heuristic(a: Point, b: Point, allow_diagonal: bool) -> f64 {
    Heuristic::GridDistance.estimate(a, b, allow_diagonal)
}
