use pathviz_core::{Grid, Point, Range};

use crate::distance::manhattan;

/// Minimal pathfinding interface: the searchable area and its passable
/// successors.
pub trait Pather {
    /// Rectangle every searchable point lies in.
    fn bounds(&self) -> Range;

    /// Whether a search may start at, end at or pass through `p`.
    fn passable(&self, p: Point) -> bool;

    /// Append the passable neighbours of `p` into `buf`, in a fixed order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Layout version. A search refuses to step once this moves on from the
    /// value it was reset with.
    fn revision(&self) -> u64 {
        0
    }
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> u32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> u32;
}

// 4-connected, unit cost, Manhattan estimate.

impl Pather for Grid {
    fn bounds(&self) -> Range {
        Grid::bounds(self)
    }

    fn passable(&self, p: Point) -> bool {
        self.is_passable(p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(Grid::neighbors(self, p).filter(|&n| self.is_passable(n)));
    }

    fn revision(&self) -> u64 {
        Grid::revision(self)
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Point, _to: Point) -> u32 {
        1
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> u32 {
        manhattan(from, to)
    }
}
