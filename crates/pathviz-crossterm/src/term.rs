//! Crossterm terminal driver: raw mode, input mapping and drawing.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::debug;
use pathviz_app::{Controller, Mode, Msg};
use pathviz_core::Point;

use crate::view::{compose, mode_label, phase_label};

/// Terminal rows above the grid (title and status line).
pub const HEADER_ROWS: u16 = 2;
/// Terminal columns per grid cell.
pub const CELL_WIDTH: u16 = 2;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Msg(Msg),
    Quit,
}

/// Maps a key press to an [`Input`].
pub fn map_key(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('w') => Some(Input::Msg(Msg::SetMode(Mode::DrawWall))),
        KeyCode::Char('s') => Some(Input::Msg(Msg::SetMode(Mode::SetStart))),
        KeyCode::Char('e') => Some(Input::Msg(Msg::SetMode(Mode::SetEnd))),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Input::Msg(Msg::Start)),
        KeyCode::Char('r') => Some(Input::Msg(Msg::Reset)),
        _ => None,
    }
}

/// Maps a left-button press to a click on the grid cell under it.
pub fn map_mouse(me: MouseEvent) -> Option<Input> {
    match me.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let row = me.row.checked_sub(HEADER_ROWS)?;
            let pos = Point::new((me.column / CELL_WIDTH) as i32, row as i32);
            Some(Input::Msg(Msg::Click(pos)))
        }
        _ => None,
    }
}

/// A terminal in raw mode on the alternate screen. Restored on drop.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    /// Enter raw mode, switch to the alternate screen and capture the mouse.
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        debug!("terminal initialised");
        Ok(Self { out })
    }

    /// Wait up to `timeout` for one input.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let input = match event::read()? {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                map_key(code)
            }
            Event::Mouse(me) => map_mouse(me),
            _ => None,
        };
        Ok(input)
    }

    /// Paint the header, the status line and every grid cell.
    pub fn draw(&mut self, c: &Controller, status: &str) -> io::Result<()> {
        let header = format!(
            "pathviz | mode: {} | {} | [w]alls [s]tart [e]nd [space] run [r]eset [q]uit",
            mode_label(c.mode()),
            phase_label(c.phase())
        );
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            Print(header),
            cursor::MoveTo(0, 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(status)
        )?;

        let cols = c.grid().cols() as usize;
        for (row, glyphs) in compose(c).chunks(cols).enumerate() {
            queue!(self.out, cursor::MoveTo(0, HEADER_ROWS + row as u16))?;
            for g in glyphs {
                queue!(
                    self.out,
                    SetBackgroundColor(g.color()),
                    SetForegroundColor(style::Color::Black),
                    Print(" ".repeat(CELL_WIDTH as usize))
                )?;
            }
            queue!(self.out, ResetColor)?;
        }
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
