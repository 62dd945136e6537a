use std::fmt;

use stepgrid_core::{Endpoint, Point};
use thiserror::Error;

/// Why an endpoint was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointIssue {
    OutOfBounds,
    Obstacle,
}

impl fmt::Display for EndpointIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("is outside the grid"),
            Self::Obstacle => f.write_str("is an obstacle"),
        }
    }
}

/// Errors raised when setting up a search.
///
/// Failing to find a path is not an error; see
/// [`SearchStatus::Exhausted`](crate::SearchStatus::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{endpoint} position {pos} {reason}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        pos: Point,
        reason: EndpointIssue,
    },
}
