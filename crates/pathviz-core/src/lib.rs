//! **pathviz-core**: core types for the grid pathfinding visualizer.
//!
//! This crate provides the geometry primitives, the wall [`Grid`] that
//! searches run over, and the [`Error`] type shared across the workspace.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::{EndpointIssue, Error, Result, StateIssue};
pub use geom::{Point, Range};
pub use grid::{Cell, Grid, Neighbors};
