use std::collections::BinaryHeap;

use log::debug;
use pathviz_core::{EndpointIssue, Error, Point, Range, Result, StateIssue};

use crate::traits::AstarPather;

/// Back-pointer value meaning "no predecessor".
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Set membership of a cell within one search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Membership {
    /// Not discovered yet.
    #[default]
    Unseen,
    /// Discovered, waiting to be expanded.
    Open,
    /// Already expanded; never reopened.
    Closed,
}

/// Result of a [`Search::step`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// More steps are needed.
    Running,
    /// The end was selected. The path runs from start to end inclusive.
    Found(Vec<Point>),
    /// The open set ran dry before reaching the end.
    Unreachable,
}

impl Outcome {
    /// Whether no further step can change the result.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Running)
    }
}

/// Read-only view of one cell's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeInfo {
    pub g: u32,
    pub h: u32,
    pub f: u32,
    pub came_from: Option<Point>,
    pub membership: Membership,
}

// ---------------------------------------------------------------------------
// Internal node arena
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: u32,
    pub(crate) h: u32,
    pub(crate) f: u32,
    pub(crate) parent: usize,
    /// Order in which the cell first entered the open set.
    pub(crate) seq: u32,
    pub(crate) generation: u32,
    pub(crate) membership: Membership,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: NO_PARENT,
            seq: 0,
            generation: 0,
            membership: Membership::Unseen,
        }
    }
}

/// Reference into the node arena, ordered for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: u32,
    pub(crate) seq: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the cell that entered the open set earliest.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One incremental A* attempt between a fixed start and end.
///
/// The search never borrows the grid: every call that needs it takes the
/// pather by reference, and cells are addressed by their flat index. Cloning
/// a `Search` therefore yields an independent snapshot of its bookkeeping.
#[derive(Clone, Debug)]
pub struct Search {
    pub(crate) bounds: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) open: BinaryHeap<NodeRef>,
    pub(crate) open_len: usize,
    pub(crate) next_seq: u32,
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) end_idx: usize,
    pub(crate) revision: u64,
    pub(crate) outcome: Outcome,
    /// Most recently selected node, the tip of the best path so far.
    pub(crate) current: usize,
    pub(crate) expansions: usize,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl Search {
    /// Start a search from `start` to `end` over `pather`.
    ///
    /// Fails with [`Error::InvalidEndpoints`] if either endpoint is outside
    /// the pather's bounds or impassable, or if they coincide.
    pub fn new<P: AstarPather>(pather: &P, start: Point, end: Point) -> Result<Self> {
        let mut search = Self {
            bounds: Range::default(),
            width: 0,
            nodes: Vec::new(),
            generation: 0,
            open: BinaryHeap::new(),
            open_len: 0,
            next_seq: 0,
            start,
            end,
            end_idx: NO_PARENT,
            revision: 0,
            outcome: Outcome::Running,
            current: NO_PARENT,
            expansions: 0,
            nbuf: Vec::with_capacity(4),
        };
        search.reset(pather, start, end)?;
        Ok(search)
    }

    /// Reinitialize in place for a new start/end or a changed layout.
    ///
    /// Equivalent to building a fresh search, but the node arena is reused
    /// unless the pather's bounds changed. On error the search is left as it
    /// was.
    pub fn reset<P: AstarPather>(&mut self, pather: &P, start: Point, end: Point) -> Result<()> {
        validate_endpoints(pather, start, end)?;

        let bounds = pather.bounds();
        if bounds != self.bounds || self.nodes.len() != bounds.len() {
            self.bounds = bounds;
            self.width = bounds.width().max(0) as usize;
            self.nodes.clear();
            self.nodes.resize(bounds.len(), Node::default());
            self.generation = 1;
        } else {
            // Bump generation to lazily invalidate all nodes.
            self.generation = self.generation.wrapping_add(1);
            if self.generation == 0 {
                self.nodes.fill(Node::default());
                self.generation = 1;
            }
        }

        let (Some(start_idx), Some(end_idx)) = (self.idx(start), self.idx(end)) else {
            return Err(Error::InvalidEndpoints(EndpointIssue::StartOutOfBounds));
        };

        let h = pather.estimate(start, end);
        self.nodes[start_idx] = Node {
            g: 0,
            h,
            f: h,
            parent: NO_PARENT,
            seq: 0,
            generation: self.generation,
            membership: Membership::Open,
        };

        self.open.clear();
        self.open.push(NodeRef {
            idx: start_idx,
            f: h,
            seq: 0,
        });
        self.open_len = 1;
        self.next_seq = 1;
        self.start = start;
        self.end = end;
        self.end_idx = end_idx;
        self.revision = pather.revision();
        self.outcome = Outcome::Running;
        self.current = start_idx;
        self.expansions = 0;

        debug!("search reset: {start} -> {end} over {bounds}, h={h}");
        Ok(())
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The end cell.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// The bounds the node arena was built for.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The latest outcome; `Running` until a terminal step.
    #[inline]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether the search reached `Found` or `Unreachable`.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// The found path, once there is one.
    pub fn path(&self) -> Option<&[Point]> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Number of cells moved from open to closed so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Number of cells currently in the open set.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_len
    }

    /// Bookkeeping for `p`, or `None` if outside the search's bounds.
    pub fn node(&self, p: Point) -> Option<NodeInfo> {
        let i = self.idx(p)?;
        let Some(n) = self.live(i) else {
            return Some(NodeInfo::default());
        };
        Some(NodeInfo {
            g: n.g,
            h: n.h,
            f: n.f,
            came_from: (n.parent != NO_PARENT).then(|| self.point(n.parent)),
            membership: n.membership,
        })
    }

    // -----------------------------------------------------------------------
    // Arena helpers
    // -----------------------------------------------------------------------

    /// The node at `i` if it belongs to the current generation.
    #[inline]
    pub(crate) fn live(&self, i: usize) -> Option<&Node> {
        let n = &self.nodes[i];
        (n.generation == self.generation).then_some(n)
    }

    #[inline]
    pub(crate) fn membership(&self, i: usize) -> Membership {
        self.live(i).map_or(Membership::Unseen, |n| n.membership)
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.bounds.min.x;
        let y = (idx / self.width) as i32 + self.bounds.min.y;
        Point::new(x, y)
    }

    /// Walk back-pointers from `idx` to the start and return start-first.
    pub(crate) fn chain(&self, mut idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        while idx != NO_PARENT {
            path.push(self.point(idx));
            idx = self.live(idx).map_or(NO_PARENT, |n| n.parent);
        }
        path.reverse();
        path
    }

    /// Refuse to step against a pather the search was not reset for.
    pub(crate) fn check<P: AstarPather>(&self, pather: &P) -> Result<()> {
        let found = pather.bounds();
        if found != self.bounds {
            return Err(Error::InvalidState(StateIssue::GridMismatch {
                expected: self.bounds,
                found,
            }));
        }
        let found = pather.revision();
        if found != self.revision {
            return Err(Error::InvalidState(StateIssue::StaleGrid {
                expected: self.revision,
                found,
            }));
        }
        Ok(())
    }
}

fn validate_endpoints<P: AstarPather>(pather: &P, start: Point, end: Point) -> Result<()> {
    let bounds = pather.bounds();
    let issue = if !bounds.contains(start) {
        Some(EndpointIssue::StartOutOfBounds)
    } else if !bounds.contains(end) {
        Some(EndpointIssue::EndOutOfBounds)
    } else if start == end {
        Some(EndpointIssue::SameCell)
    } else if !pather.passable(start) {
        Some(EndpointIssue::StartIsWall)
    } else if !pather.passable(end) {
        Some(EndpointIssue::EndIsWall)
    } else {
        None
    };
    match issue {
        Some(issue) => {
            debug!("rejected endpoints {start} -> {end}: {issue:?}");
            Err(Error::InvalidEndpoints(issue))
        }
        None => Ok(()),
    }
}
