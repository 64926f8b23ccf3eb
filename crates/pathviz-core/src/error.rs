//! The [`Error`] type shared by every pathviz crate.

use thiserror::Error;

use crate::geom::{Point, Range};

/// Why a start/end pair was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndpointIssue {
    /// Start and end are the same cell.
    SameCell,
    /// The start cell is a wall.
    StartIsWall,
    /// The end cell is a wall.
    EndIsWall,
    /// The start cell lies outside the grid.
    StartOutOfBounds,
    /// The end cell lies outside the grid.
    EndOutOfBounds,
}

/// Why a search refused to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateIssue {
    /// The grid's walls changed after the search was created or reset.
    StaleGrid { expected: u64, found: u64 },
    /// The grid passed in is not the size the search was built for.
    GridMismatch { expected: Range, found: Range },
}

/// Errors reported by grid and search operations.
///
/// Every variant is recoverable by the caller; nothing is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Grid dimensions must both be at least 1.
    #[error("invalid grid dimensions {cols}x{rows}")]
    InvalidDimensions { cols: i32, rows: i32 },

    /// A coordinate outside the grid was addressed.
    #[error("{pos} is outside {bounds}")]
    OutOfBounds { pos: Point, bounds: Range },

    /// Start/end pair rejected at search construction.
    #[error("invalid endpoints: {0:?}")]
    InvalidEndpoints(EndpointIssue),

    /// The search cannot be stepped against the given grid.
    #[error("invalid search state: {0:?}")]
    InvalidState(StateIssue),
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;
