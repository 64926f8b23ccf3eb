//! The interaction [`Controller`]: turns user input into grid edits, endpoint
//! moves and search steps.
//!
//! The controller is the single owner of the grid, the endpoints and the
//! current search. Frontends feed it [`Msg`] values and read its state back
//! to paint; it never renders and carries no user-facing text.

use log::debug;
use pathviz_core::{EndpointIssue, Error, Grid, Point, Result};
use pathviz_paths::{Outcome, Search, Snapshot};

use crate::config::AppConfig;

/// What a click on the grid does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Toggle walls.
    #[default]
    DrawWall,
    /// Move the start cell.
    SetStart,
    /// Move the end cell.
    SetEnd,
}

/// Where the controller is in the search lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// No search in progress; edits are accepted.
    #[default]
    Idle,
    /// A search is being stepped by ticks; edits are refused.
    Running,
    /// The last search finished with this outcome.
    Done(Outcome),
}

/// Input to [`Controller::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Msg {
    /// A click on the cell at this position.
    Click(Point),
    /// Switch what clicks do.
    SetMode(Mode),
    /// Begin (or restart) the search.
    Start,
    /// Clear walls, restore default endpoints and stop any search.
    Reset,
    /// Advance a running search by the configured number of steps.
    Tick,
}

/// Machine-readable result of a [`Msg`], for the frontend to phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Nothing to report.
    Ignored,
    /// Input refused because a search is running.
    Busy,
    ModeChanged(Mode),
    WallToggled { pos: Point, wall: bool },
    StartMoved(Point),
    EndMoved(Point),
    /// The core refused the request.
    Rejected(Error),
    /// The search is running.
    Searching,
    Found { len: usize },
    Unreachable,
    /// The previous search was unreachable; reset or move an endpoint first.
    ResetRequired,
    Reset,
}

/// Owner of the grid, the endpoints and the current search.
#[derive(Debug, Clone)]
pub struct Controller {
    config: AppConfig,
    grid: Grid,
    start: Point,
    end: Point,
    mode: Mode,
    phase: Phase,
    search: Option<Search>,
    /// Set by an unreachable outcome; cleared by moving an endpoint or a
    /// reset, but not by wall edits.
    needs_reset: bool,
}

impl Controller {
    /// Build a controller with an open grid and the default endpoints
    /// (top-left start, bottom-right end).
    pub fn new(config: AppConfig) -> Result<Self> {
        let grid = Grid::new(config.cols, config.rows)?;
        let (start, end) = default_endpoints(&grid);
        if start == end {
            return Err(Error::InvalidEndpoints(EndpointIssue::SameCell));
        }
        debug!("controller ready: {}x{} grid", config.cols, config.rows);
        Ok(Self {
            config,
            grid,
            start,
            end,
            mode: Mode::default(),
            phase: Phase::Idle,
            search: None,
            needs_reset: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The search being shown, if any. Discarded whenever the layout or the
    /// endpoints change.
    #[inline]
    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// Point-in-time view of the current search.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.search.as_ref().map(Search::snapshot)
    }

    /// Apply one input.
    pub fn update(&mut self, msg: Msg) -> Notice {
        match msg {
            Msg::Reset => self.reset(),
            Msg::Tick => self.tick(),
            _ if self.is_running() => Notice::Busy,
            Msg::SetMode(mode) => {
                self.mode = mode;
                Notice::ModeChanged(mode)
            }
            Msg::Click(pos) => match self.mode {
                Mode::DrawWall => self.toggle_wall(pos),
                Mode::SetStart => self.move_start(pos),
                Mode::SetEnd => self.move_end(pos),
            },
            Msg::Start => self.start_search(),
        }
    }

    fn toggle_wall(&mut self, pos: Point) -> Notice {
        if pos == self.start || pos == self.end {
            return Notice::Ignored;
        }
        match self.grid.toggle_wall(pos) {
            Ok(wall) => {
                debug!("wall at {pos}: {wall}");
                self.discard_search();
                Notice::WallToggled { pos, wall }
            }
            Err(e) => Notice::Rejected(e),
        }
    }

    fn move_start(&mut self, pos: Point) -> Notice {
        if let Err(e) = self.check_endpoint(pos, self.end, EndpointIssue::StartIsWall) {
            return Notice::Rejected(e);
        }
        debug!("start moved {} -> {pos}", self.start);
        self.start = pos;
        self.needs_reset = false;
        self.discard_search();
        Notice::StartMoved(pos)
    }

    fn move_end(&mut self, pos: Point) -> Notice {
        if let Err(e) = self.check_endpoint(pos, self.start, EndpointIssue::EndIsWall) {
            return Notice::Rejected(e);
        }
        debug!("end moved {} -> {pos}", self.end);
        self.end = pos;
        self.needs_reset = false;
        self.discard_search();
        Notice::EndMoved(pos)
    }

    fn check_endpoint(&self, pos: Point, other: Point, wall_issue: EndpointIssue) -> Result<()> {
        if self.grid.is_wall(pos)? {
            return Err(Error::InvalidEndpoints(wall_issue));
        }
        if pos == other {
            return Err(Error::InvalidEndpoints(EndpointIssue::SameCell));
        }
        Ok(())
    }

    fn start_search(&mut self) -> Notice {
        if self.needs_reset {
            return Notice::ResetRequired;
        }
        let res = match self.search.as_mut() {
            Some(search) => search.reset(&self.grid, self.start, self.end),
            None => Search::new(&self.grid, self.start, self.end).map(|s| {
                self.search = Some(s);
            }),
        };
        match res {
            Ok(()) => {
                debug!("search started {} -> {}", self.start, self.end);
                self.phase = Phase::Running;
                Notice::Searching
            }
            Err(e) => {
                self.discard_search();
                Notice::Rejected(e)
            }
        }
    }

    fn tick(&mut self) -> Notice {
        if !self.is_running() {
            return Notice::Ignored;
        }
        let Some(search) = self.search.as_mut() else {
            self.phase = Phase::Idle;
            return Notice::Ignored;
        };
        for _ in 0..self.config.steps_per_tick.max(1) {
            let outcome = match search.step(&self.grid) {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.discard_search();
                    return Notice::Rejected(e);
                }
            };
            match outcome {
                Outcome::Running => {}
                Outcome::Found(path) => {
                    let len = path.len();
                    self.phase = Phase::Done(Outcome::Found(path));
                    return Notice::Found { len };
                }
                Outcome::Unreachable => {
                    self.needs_reset = true;
                    self.phase = Phase::Done(Outcome::Unreachable);
                    return Notice::Unreachable;
                }
            }
        }
        Notice::Searching
    }

    fn reset(&mut self) -> Notice {
        self.grid.clear_walls();
        let (start, end) = default_endpoints(&self.grid);
        self.start = start;
        self.end = end;
        self.mode = Mode::DrawWall;
        self.needs_reset = false;
        self.discard_search();
        debug!("controller reset");
        Notice::Reset
    }

    fn discard_search(&mut self) {
        self.search = None;
        self.phase = Phase::Idle;
    }
}

fn default_endpoints(grid: &Grid) -> (Point, Point) {
    (Point::ZERO, Point::new(grid.cols() - 1, grid.rows() - 1))
}
