use log::{info, trace};
use pathviz_core::Result;

use crate::search::{Membership, Node, NodeRef, Outcome, Search};
use crate::traits::AstarPather;

impl Search {
    /// Advance the search by exactly one expansion.
    ///
    /// 1. An empty open set ends the search as [`Outcome::Unreachable`].
    /// 2. Otherwise the open cell with minimum `f` is selected; among equal
    ///    `f` the one that entered the open set first wins.
    /// 3. Selecting the end ends the search as [`Outcome::Found`].
    /// 4. Otherwise the selected cell is closed and each passable, unclosed
    ///    neighbour is opened or relaxed if the new `g` is strictly smaller.
    ///
    /// Once terminal, further calls return the same outcome without touching
    /// any state. Stepping against a pather whose bounds or revision differ
    /// from the last reset fails with `InvalidState`.
    pub fn step<P: AstarPather>(&mut self, pather: &P) -> Result<Outcome> {
        if self.outcome.is_terminal() {
            return Ok(self.outcome.clone());
        }
        self.check(pather)?;

        let Some(ci) = self.pop_min() else {
            debug_assert_eq!(self.open_len, 0);
            self.open_len = 0;
            self.outcome = Outcome::Unreachable;
            info!(
                "no path {} -> {} after {} expansions",
                self.start, self.end, self.expansions
            );
            return Ok(Outcome::Unreachable);
        };

        self.current = ci;

        if ci == self.end_idx {
            let path = self.chain(ci);
            info!(
                "path {} -> {} found: {} cells, {} expansions",
                self.start,
                self.end,
                path.len(),
                self.expansions
            );
            self.outcome = Outcome::Found(path.clone());
            return Ok(Outcome::Found(path));
        }

        self.nodes[ci].membership = Membership::Closed;
        self.open_len -= 1;
        self.expansions += 1;

        let current_g = self.nodes[ci].g;
        let current_point = self.point(ci);
        trace!("expand {current_point} g={current_g}");

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(current_point, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            let tentative_g = current_g + pather.cost(current_point, np);
            let cur_gen = self.generation;

            let n = &mut self.nodes[ni];
            if n.generation != cur_gen {
                *n = Node {
                    generation: cur_gen,
                    ..Node::default()
                };
            }
            match n.membership {
                Membership::Closed => continue,
                Membership::Open if tentative_g >= n.g => continue,
                _ => {}
            }

            n.g = tentative_g;
            n.h = pather.estimate(np, self.end);
            n.f = tentative_g + n.h;
            n.parent = ci;
            if n.membership == Membership::Unseen {
                n.membership = Membership::Open;
                n.seq = self.next_seq;
                self.next_seq += 1;
                self.open_len += 1;
            }

            self.open.push(NodeRef {
                idx: ni,
                f: n.f,
                seq: n.seq,
            });
        }

        self.nbuf = nbuf;
        Ok(Outcome::Running)
    }

    /// Step until the search is terminal and return that outcome.
    pub fn run<P: AstarPather>(&mut self, pather: &P) -> Result<Outcome> {
        loop {
            let outcome = self.step(pather)?;
            if outcome.is_terminal() {
                return Ok(outcome);
            }
        }
    }

    /// Pop the best live open entry, skipping stale heap entries left behind
    /// by relaxations.
    fn pop_min(&mut self) -> Option<usize> {
        while let Some(r) = self.open.pop() {
            if let Some(n) = self.live(r.idx) {
                if n.membership == Membership::Open && n.f == r.f {
                    return Some(r.idx);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{Error, Grid, Point, StateIssue};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn three_by_three_pins_the_route() {
        let g = Grid::new(3, 3).unwrap();
        let mut s = Search::new(&g, p(0, 0), p(2, 2)).unwrap();
        let mut steps = 0;
        let outcome = loop {
            steps += 1;
            let o = s.step(&g).unwrap();
            if o.is_terminal() {
                break o;
            }
        };
        assert_eq!(
            outcome,
            Outcome::Found(vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2)])
        );
        assert_eq!(steps, 9);
        assert_eq!(s.expansions(), 8);
    }

    #[test]
    fn first_step_opens_neighbors_in_scan_order() {
        let g = Grid::new(3, 3).unwrap();
        let mut s = Search::new(&g, p(1, 1), p(2, 2)).unwrap();
        assert_eq!(s.step(&g).unwrap(), Outcome::Running);

        let centre = s.node(p(1, 1)).unwrap();
        assert_eq!(centre.membership, Membership::Closed);
        for (n, seq) in [(p(2, 1), 1), (p(0, 1), 2), (p(1, 2), 3), (p(1, 0), 4)] {
            let info = s.node(n).unwrap();
            assert_eq!(info.membership, Membership::Open);
            assert_eq!(info.g, 1);
            assert_eq!(info.came_from, Some(p(1, 1)));
            let idx = s.idx(n).unwrap();
            assert_eq!(s.nodes[idx].seq, seq);
        }
        assert_eq!(s.open_len(), 4);
    }

    #[test]
    fn detours_around_walls() {
        //   S . .
        //   # # .
        //   E . .
        let mut g = Grid::new(3, 3).unwrap();
        g.set_wall(p(0, 1), true).unwrap();
        g.set_wall(p(1, 1), true).unwrap();
        let mut s = Search::new(&g, p(0, 0), p(0, 2)).unwrap();
        let outcome = s.run(&g).unwrap();
        assert_eq!(
            outcome,
            Outcome::Found(vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2), p(1, 2), p(0, 2)])
        );
    }

    #[test]
    fn unreachable_is_idempotent() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_wall(p(1, 2), true).unwrap();
        g.set_wall(p(2, 1), true).unwrap();
        let mut s = Search::new(&g, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(s.run(&g).unwrap(), Outcome::Unreachable);
        assert_eq!(s.open_len(), 0);
        let snap = s.snapshot();
        assert_eq!(s.step(&g).unwrap(), Outcome::Unreachable);
        assert_eq!(s.step(&g).unwrap(), Outcome::Unreachable);
        assert_eq!(s.snapshot(), snap);
    }

    #[test]
    fn found_is_idempotent() {
        let g = Grid::new(2, 1).unwrap();
        let mut s = Search::new(&g, p(0, 0), p(1, 0)).unwrap();
        assert_eq!(s.step(&g).unwrap(), Outcome::Running);
        let found = s.step(&g).unwrap();
        assert_eq!(found, Outcome::Found(vec![p(0, 0), p(1, 0)]));
        assert_eq!(s.step(&g).unwrap(), found);
        assert_eq!(s.path(), Some(&[p(0, 0), p(1, 0)][..]));
    }

    #[test]
    fn stepping_after_a_wall_edit_is_invalid() {
        let mut g = Grid::new(4, 4).unwrap();
        let mut s = Search::new(&g, p(0, 0), p(3, 3)).unwrap();
        s.step(&g).unwrap();
        g.toggle_wall(p(2, 2)).unwrap();
        assert_eq!(
            s.step(&g),
            Err(Error::InvalidState(StateIssue::StaleGrid {
                expected: 0,
                found: 1
            }))
        );
        s.reset(&g, p(0, 0), p(3, 3)).unwrap();
        assert!(s.run(&g).unwrap().is_terminal());
    }

    #[test]
    fn stepping_against_another_grid_size_is_invalid() {
        let g = Grid::new(4, 4).unwrap();
        let other = Grid::new(5, 4).unwrap();
        let mut s = Search::new(&g, p(0, 0), p(3, 3)).unwrap();
        assert_eq!(
            s.step(&other),
            Err(Error::InvalidState(StateIssue::GridMismatch {
                expected: g.bounds(),
                found: other.bounds()
            }))
        );
    }
}
