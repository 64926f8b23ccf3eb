//! Pure mapping from controller state to what each cell looks like, plus the
//! status-line wording for controller notices.

use std::collections::HashSet;

use crossterm::style::Color;
use pathviz_app::{Controller, Mode, Notice, Phase};
use pathviz_core::{EndpointIssue, Error, Point};
use pathviz_paths::Outcome;

/// How one grid cell is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Wall,
    Start,
    End,
    Open,
    Closed,
    Path,
}

impl Glyph {
    /// Single-character form used by the headless printout.
    pub fn ascii(self) -> char {
        match self {
            Glyph::Empty => '.',
            Glyph::Wall => '#',
            Glyph::Start => 'S',
            Glyph::End => 'E',
            Glyph::Open => 'o',
            Glyph::Closed => 'x',
            Glyph::Path => '*',
        }
    }

    /// Background colour in the terminal.
    pub fn color(self) -> Color {
        match self {
            Glyph::Empty => Color::Rgb { r: 0x1e, g: 0x2d, b: 0x40 },
            Glyph::Wall => Color::Rgb { r: 0x44, g: 0x44, b: 0x44 },
            Glyph::Start => Color::Rgb { r: 0x28, g: 0xa7, b: 0x45 },
            Glyph::End => Color::Rgb { r: 0xff, g: 0x63, b: 0x47 },
            Glyph::Open => Color::Rgb { r: 0x1e, g: 0x6e, b: 0x78 },
            Glyph::Closed => Color::Rgb { r: 0x6e, g: 0x6e, b: 0x2d },
            Glyph::Path => Color::Rgb { r: 0x00, g: 0xf0, b: 0xff },
        }
    }
}

/// Row-major glyphs for every cell of the controller's grid.
///
/// Endpoints win over the path, the path over set membership, and set
/// membership over plain walls/floor.
pub fn compose(c: &Controller) -> Vec<Glyph> {
    let snapshot = c.snapshot();
    let (open, closed, path): (HashSet<Point>, HashSet<Point>, HashSet<Point>) = match &snapshot {
        Some(s) => (
            s.open.iter().copied().collect(),
            s.closed.iter().copied().collect(),
            s.best_path.iter().copied().collect(),
        ),
        None => Default::default(),
    };

    c.grid()
        .iter()
        .map(|(p, cell)| {
            if p == c.start() {
                Glyph::Start
            } else if p == c.end() {
                Glyph::End
            } else if path.contains(&p) {
                Glyph::Path
            } else if open.contains(&p) {
                Glyph::Open
            } else if closed.contains(&p) {
                Glyph::Closed
            } else if cell.wall {
                Glyph::Wall
            } else {
                Glyph::Empty
            }
        })
        .collect()
}

/// The grid as text, one line per row.
pub fn ascii_lines(c: &Controller) -> Vec<String> {
    let cols = c.grid().cols() as usize;
    compose(c)
        .chunks(cols)
        .map(|row| row.iter().map(|g| g.ascii()).collect())
        .collect()
}

/// Short label for the active click mode.
pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::DrawWall => "draw walls",
        Mode::SetStart => "set start",
        Mode::SetEnd => "set end",
    }
}

/// Status-line text for a notice, or `None` to keep the previous line.
pub fn describe(notice: Notice) -> Option<String> {
    let text = match notice {
        Notice::Ignored | Notice::WallToggled { .. } => return None,
        Notice::Busy => "Search in progress. Press r to reset.".to_string(),
        Notice::ModeChanged(Mode::DrawWall) => "Click cells to toggle walls.".to_string(),
        Notice::ModeChanged(Mode::SetStart) => "Click an empty cell to set the start.".to_string(),
        Notice::ModeChanged(Mode::SetEnd) => "Click an empty cell to set the end.".to_string(),
        Notice::StartMoved(p) => format!("Start moved to {p}."),
        Notice::EndMoved(p) => format!("End moved to {p}."),
        Notice::Rejected(e) => describe_error(e),
        Notice::Searching => "Searching for a path...".to_string(),
        Notice::Found { len } => format!("Path found: {len} cells."),
        Notice::Unreachable => "No path exists. Move walls or reset the grid.".to_string(),
        Notice::ResetRequired => "No path was found. Reset the grid to try again.".to_string(),
        Notice::Reset => "Grid reset. Click to draw walls or set new start/end points.".to_string(),
    };
    Some(text)
}

fn describe_error(e: Error) -> String {
    match e {
        Error::OutOfBounds { .. } => "That cell is outside the grid.".to_string(),
        Error::InvalidEndpoints(EndpointIssue::StartIsWall) => {
            "The start cannot be placed on a wall.".to_string()
        }
        Error::InvalidEndpoints(EndpointIssue::EndIsWall) => {
            "The end cannot be placed on a wall.".to_string()
        }
        Error::InvalidEndpoints(EndpointIssue::SameCell) => {
            "Start and end must be different cells.".to_string()
        }
        other => format!("Rejected: {other}."),
    }
}

/// One-line summary of the controller phase for the header.
pub fn phase_label(phase: &Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Running => "running",
        Phase::Done(Outcome::Found(_)) => "found",
        Phase::Done(Outcome::Unreachable) => "unreachable",
        Phase::Done(Outcome::Running) => "paused",
    }
}
