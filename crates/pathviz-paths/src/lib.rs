//! Incremental A* search for grid pathfinding.
//!
//! A [`Search`] holds the bookkeeping of one attempt (open/closed
//! membership, per-cell `g`/`h`/`f`, back-pointers) and advances one
//! expansion per [`Search::step`] call, so a caller can render every
//! intermediate state. Scheduling is entirely the caller's business: step
//! once per frame, per timer tick, or [`Search::run`] to completion.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | bounds, passability, neighbour order |
//! | [`WeightedPather`] : [`Pather`] | edge cost |
//! | [`AstarPather`] : [`WeightedPather`] | heuristic |
//!
//! [`pathviz_core::Grid`] implements all three as a 4-connected, unit-cost
//! grid with the Manhattan heuristic.

mod astar;
mod distance;
mod search;
mod snapshot;
mod traits;

pub use distance::{chebyshev, manhattan};
pub use search::{Membership, NodeInfo, Outcome, Search};
pub use snapshot::Snapshot;
pub use traits::{AstarPather, Pather, WeightedPather};
