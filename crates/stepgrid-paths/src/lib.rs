//! Step-by-step grid searches.
//!
//! This crate runs best-first searches over a [`Terrain`] (normally a
//! [`stepgrid_core::Grid`]) as resumable state machines. The same
//! [`Search`] can be run to completion or advanced one expansion at a time,
//! with its open set, closed set and scores readable between steps:
//!
//! - **A\*** on `g + h`
//! - **Dijkstra** on `g`
//! - **Greedy best-first** on `h`
//! - **Uniform-cost** on `g`, relaxing open nodes in place
//!
//! Every expansion produces a [`StepDelta`]. [`SearchHistory`] records those
//! deltas so a caller can scrub backwards and forwards through a search
//! without keeping a full copy of each intermediate state.
//!
//! # Cost policies
//!
//! | Algorithm | `h` | `f` | Open duplicate |
//! |---|---|---|---|
//! | [`Algorithm::AStar`] | heuristic | `g + h` | kept if `g` strictly better |
//! | [`Algorithm::Dijkstra`] | 0 | `g` | kept if `g` strictly better |
//! | [`Algorithm::Greedy`] | heuristic | `h` | kept if `f` strictly better |
//! | [`Algorithm::UniformCost`] | 0 | `g` | updated in place if `g` strictly better |
//!
//! # Example
//!
//! ```
//! use stepgrid_core::{Grid, Point};
//! use stepgrid_paths::{Algorithm, Search, SearchConfig};
//!
//! let grid = Grid::new(5, 5).unwrap();
//! let mut search = Search::new(&grid, Algorithm::AStar, SearchConfig::new());
//! let path = search
//!     .run_to_completion(Point::new(0, 0), Point::new(4, 4))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(path.len(), 9);
//! assert_eq!(path.cost, 8.0);
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod frontier;
mod history;
mod neighbors;
mod node;
mod search;
mod traits;

pub use algorithm::{Algorithm, DuplicateRule};
pub use config::SearchConfig;
pub use distance::{Heuristic, chebyshev, heuristic, manhattan, octile, squared_euclidean};
pub use error::{EndpointIssue, SearchError};
pub use history::{SearchHistory, Snapshot};
pub use neighbors::{DIAGONAL_COST, Neighbors, STRAIGHT_COST, neighbors_and_costs, step_cost};
pub use node::{NodeId, SearchNode};
pub use search::{Path, Relaxation, Search, SearchStatus, StepDelta};
pub use traits::Terrain;
