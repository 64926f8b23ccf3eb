//! The [`Grid`] type: a fixed-size 2D arrangement of wall flags.
//!
//! Dimensions are set once at construction. Only wall flags change
//! afterwards, and every change bumps [`Grid::revision`] so that searches
//! built against an older layout can tell they are stale.

use crate::error::{Error, Result};
use crate::geom::{Point, Range};

/// The content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub wall: bool,
}

/// A `cols × rows` grid of cells stored row-major.
///
/// Cell identity is the flat index `row * cols + col`; searches use it as an
/// arena handle instead of holding references into the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    revision: u64,
}

impl Grid {
    /// Create a grid with every cell open.
    pub fn new(cols: i32, rows: i32) -> Result<Self> {
        if cols <= 0 || rows <= 0 {
            return Err(Error::InvalidDimensions { cols, rows });
        }
        let bounds = Range::new(0, 0, cols, rows);
        Ok(Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
            revision: 0,
        })
    }

    /// The bounding range `[(0, 0), (cols, rows))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.cols() as usize + p.x as usize)
    }

    /// Point for a flat index produced by [`index`](Grid::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let cols = self.cols() as usize;
        Point::new((idx % cols) as i32, (idx / cols) as i32)
    }

    /// Counter bumped whenever a wall flag actually changes.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether the cell at `p` is a wall.
    pub fn is_wall(&self, p: Point) -> Result<bool> {
        let i = self.checked_index(p)?;
        Ok(self.cells[i].wall)
    }

    /// In bounds and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| !self.cells[i].wall)
    }

    /// Set the wall flag at `p`.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<()> {
        let i = self.checked_index(p)?;
        if self.cells[i].wall != wall {
            self.cells[i].wall = wall;
            self.revision += 1;
        }
        Ok(())
    }

    /// Flip the wall flag at `p` and return the new value.
    ///
    /// Whether start/end cells may be toggled is the caller's policy; the grid
    /// does not know about endpoints.
    pub fn toggle_wall(&mut self, p: Point) -> Result<bool> {
        let i = self.checked_index(p)?;
        let wall = !self.cells[i].wall;
        self.cells[i].wall = wall;
        self.revision += 1;
        Ok(wall)
    }

    /// Clear every wall flag.
    pub fn clear_walls(&mut self) {
        if self.cells.iter().any(|c| c.wall) {
            self.cells.fill(Cell::default());
            self.revision += 1;
        }
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.wall).count()
    }

    /// Row-major iterator over wall positions.
    pub fn walls(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.wall)
            .map(|(i, _)| self.point(i))
    }

    /// In-bounds edge neighbours of `p` in the fixed order `+x, -x, +y, -y`.
    ///
    /// Wall state is not consulted.
    pub fn neighbors(&self, p: Point) -> Neighbors {
        Neighbors {
            candidates: p.neighbors_4(),
            next: 0,
            bounds: self.bounds,
        }
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.point(i), *c))
    }

    fn checked_index(&self, p: Point) -> Result<usize> {
        self.index(p).ok_or(Error::OutOfBounds {
            pos: p,
            bounds: self.bounds,
        })
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// Iterator returned by [`Grid::neighbors`].
#[derive(Debug, Clone)]
pub struct Neighbors {
    candidates: [Point; 4],
    next: usize,
    bounds: Range,
}

impl Iterator for Neighbors {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while self.next < self.candidates.len() {
            let p = self.candidates[self.next];
            self.next += 1;
            if self.bounds.contains(p) {
                return Some(p);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// serde representation
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    cols: i32,
    rows: i32,
    walls: Vec<Point>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(g: Grid) -> Self {
        Self {
            cols: g.cols(),
            rows: g.rows(),
            walls: g.walls().collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = Error;

    fn try_from(r: GridRepr) -> Result<Self> {
        let mut g = Grid::new(r.cols, r.rows)?;
        for p in r.walls {
            g.set_wall(p, true)?;
        }
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(Error::InvalidDimensions { cols: 0, rows: 5 })
        );
        assert_eq!(
            Grid::new(4, -1),
            Err(Error::InvalidDimensions { cols: 4, rows: -1 })
        );
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn new_grid_is_open() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.len(), 12);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.wall_count(), 0);
        for p in g.bounds() {
            assert_eq!(g.is_wall(p), Ok(false));
        }
    }

    #[test]
    fn index_point_round_trip() {
        let g = Grid::new(5, 4).unwrap();
        for p in g.bounds() {
            let i = g.index(p).unwrap();
            assert_eq!(g.point(i), p);
        }
        assert_eq!(g.index(Point::new(1, 2)), Some(11));
        assert_eq!(g.index(Point::new(5, 0)), None);
        assert_eq!(g.index(Point::new(0, -1)), None);
    }

    #[test]
    fn toggle_wall_flips_and_reports() {
        let mut g = Grid::new(3, 3).unwrap();
        let p = Point::new(1, 1);
        assert_eq!(g.toggle_wall(p), Ok(true));
        assert_eq!(g.is_wall(p), Ok(true));
        assert!(!g.is_passable(p));
        assert_eq!(g.toggle_wall(p), Ok(false));
        assert!(g.is_passable(p));
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut g = Grid::new(3, 2).unwrap();
        let p = Point::new(3, 0);
        let err = Error::OutOfBounds {
            pos: p,
            bounds: g.bounds(),
        };
        assert_eq!(g.toggle_wall(p), Err(err));
        assert_eq!(g.is_wall(p), Err(err));
        assert_eq!(g.set_wall(p, true), Err(err));
        assert!(!g.is_passable(p));
        assert_eq!(g.revision(), 0);
    }

    #[test]
    fn revision_tracks_real_changes() {
        let mut g = Grid::new(3, 3).unwrap();
        let p = Point::new(0, 2);
        g.set_wall(p, false).unwrap();
        assert_eq!(g.revision(), 0);
        g.set_wall(p, true).unwrap();
        assert_eq!(g.revision(), 1);
        g.set_wall(p, true).unwrap();
        assert_eq!(g.revision(), 1);
        g.toggle_wall(p).unwrap();
        assert_eq!(g.revision(), 2);
        g.clear_walls();
        assert_eq!(g.revision(), 2);
    }

    #[test]
    fn clear_walls_resets_everything() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_wall(Point::new(0, 0), true).unwrap();
        g.set_wall(Point::new(2, 1), true).unwrap();
        assert_eq!(g.walls().collect::<Vec<_>>(), vec![Point::new(0, 0), Point::new(2, 1)]);
        g.clear_walls();
        assert_eq!(g.wall_count(), 0);
    }

    #[test]
    fn neighbors_order_and_clipping() {
        let g = Grid::new(3, 3).unwrap();
        let centre: Vec<_> = g.neighbors(Point::new(1, 1)).collect();
        assert_eq!(
            centre,
            vec![
                Point::new(2, 1),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(1, 0),
            ]
        );
        let corner: Vec<_> = g.neighbors(Point::new(0, 0)).collect();
        assert_eq!(corner, vec![Point::new(1, 0), Point::new(0, 1)]);
        let far: Vec<_> = g.neighbors(Point::new(2, 2)).collect();
        assert_eq!(far, vec![Point::new(1, 2), Point::new(2, 1)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let g = Grid::new(1, 1).unwrap();
        assert_eq!(g.neighbors(Point::ZERO).count(), 0);
    }

    #[test]
    fn neighbors_ignore_walls() {
        let mut g = Grid::new(2, 1).unwrap();
        g.set_wall(Point::new(1, 0), true).unwrap();
        assert_eq!(g.neighbors(Point::ZERO).collect::<Vec<_>>(), vec![Point::new(1, 0)]);
    }
}
