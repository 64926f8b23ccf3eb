//! Point-in-time views of a [`Search`] for renderers.

use pathviz_core::Point;

use crate::search::{Membership, Outcome, Search};

/// Everything a renderer needs from one moment of a search.
///
/// Built from a shared borrow, so it can never observe a half-applied step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub start: Point,
    pub end: Point,
    /// Open cells, row-major.
    pub open: Vec<Point>,
    /// Closed cells, row-major.
    pub closed: Vec<Point>,
    pub best_path: Vec<Point>,
    pub outcome: Outcome,
    pub expansions: usize,
}

impl Search {
    /// Cells discovered but not yet expanded, row-major.
    pub fn open_cells(&self) -> Vec<Point> {
        self.cells_with(Membership::Open)
    }

    /// Cells already expanded, row-major.
    pub fn closed_cells(&self) -> Vec<Point> {
        self.cells_with(Membership::Closed)
    }

    /// The predecessor chain of the most recently selected cell, start first.
    ///
    /// Before the first step this is just the start; once the search is
    /// `Found` it is the full path.
    pub fn best_path_so_far(&self) -> Vec<Point> {
        match &self.outcome {
            Outcome::Found(path) => path.clone(),
            _ => self.chain(self.current),
        }
    }

    /// Bundle every accessor into one owned value.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            start: self.start,
            end: self.end,
            open: self.open_cells(),
            closed: self.closed_cells(),
            best_path: self.best_path_so_far(),
            outcome: self.outcome.clone(),
            expansions: self.expansions,
        }
    }

    fn cells_with(&self, membership: Membership) -> Vec<Point> {
        (0..self.nodes.len())
            .filter(|&i| self.membership(i) == membership)
            .map(|i| self.point(i))
            .collect()
    }
}
