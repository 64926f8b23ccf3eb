//! pathviz: watch A* explore a grid in the terminal.
//!
//! Without `--headless` the grid is drawn with crossterm and edited with the
//! mouse. With `--headless` the layout given on the command line is solved
//! immediately and printed as text.

mod term;
mod view;

use std::time::{Duration, Instant};

use clap::Parser;
use log::{info, warn};
use pathviz_app::{AppConfig, Controller, DEFAULT_COLS, DEFAULT_ROWS, Mode, Msg, Notice};
use pathviz_core::Point;

use term::{Input, Terminal};

#[derive(Parser, Debug)]
#[command(name = "pathviz", about = "Step-by-step A* pathfinding on a grid")]
struct Args {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: i32,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: i32,

    /// Search steps per tick.
    #[arg(long, default_value_t = 1)]
    steps_per_tick: u32,

    /// Milliseconds between ticks while a search runs.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Solve once and print the result instead of opening the terminal UI.
    #[arg(long)]
    headless: bool,

    /// Wall cell as `x,y`. May be repeated.
    #[arg(long = "wall", value_parser = parse_point)]
    walls: Vec<Point>,

    /// Start cell as `x,y`.
    #[arg(long, value_parser = parse_point)]
    start: Option<Point>,

    /// End cell as `x,y`.
    #[arg(long, value_parser = parse_point)]
    end: Option<Point>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Quiet by default; RUST_LOG overrides.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = AppConfig {
        cols: args.cols,
        rows: args.rows,
        steps_per_tick: args.steps_per_tick,
        tick_interval: Duration::from_millis(args.tick_ms),
    };
    let mut controller = Controller::new(config)?;
    let mut status = apply_layout(&mut controller, &args);

    if args.headless {
        return run_headless(&mut controller, status);
    }

    let mut terminal = Terminal::init()?;
    if status.is_empty() {
        status = view::describe(Notice::ModeChanged(Mode::DrawWall)).unwrap_or_default();
    }
    run_interactive(&mut terminal, &mut controller, status)?;
    Ok(())
}

/// Push the command-line walls and endpoints through the controller so they
/// obey the same rules as clicks. Returns the last rejection, if any.
fn apply_layout(c: &mut Controller, args: &Args) -> String {
    let mut status = String::new();
    let mut send = |c: &mut Controller, msg: Msg| {
        let notice = c.update(msg);
        if let Notice::Rejected(e) = notice {
            warn!("{msg:?} rejected: {e}");
            status = view::describe(notice).unwrap_or_default();
        }
    };

    // Endpoints first: walls on the default corners only land once they move.
    if let Some(end) = args.end {
        send(c, Msg::SetMode(Mode::SetEnd));
        send(c, Msg::Click(end));
    }
    if let Some(start) = args.start {
        send(c, Msg::SetMode(Mode::SetStart));
        send(c, Msg::Click(start));
    }
    send(c, Msg::SetMode(Mode::DrawWall));
    for &w in &args.walls {
        if c.grid().is_wall(w) != Ok(true) {
            send(c, Msg::Click(w));
        }
    }
    status
}

fn run_headless(c: &mut Controller, status: String) -> Result<(), Box<dyn std::error::Error>> {
    if !status.is_empty() {
        eprintln!("{status}");
    }
    let mut notice = c.update(Msg::Start);
    while notice == Notice::Searching {
        notice = c.update(Msg::Tick);
    }
    for line in view::ascii_lines(c) {
        println!("{line}");
    }
    if let Some(text) = view::describe(notice) {
        println!("{text}");
    }
    if let Some(search) = c.search() {
        info!("{} expansions", search.expansions());
    }
    Ok(())
}

fn run_interactive(
    terminal: &mut Terminal,
    c: &mut Controller,
    mut status: String,
) -> std::io::Result<()> {
    let tick = c.config().tick_interval;
    let mut next_tick = Instant::now() + tick;
    loop {
        terminal.draw(c, &status)?;

        let timeout = if c.is_running() {
            next_tick.saturating_duration_since(Instant::now())
        } else {
            Duration::from_millis(250)
        };
        match terminal.poll(timeout)? {
            Some(Input::Quit) => return Ok(()),
            Some(Input::Msg(msg)) => {
                if let Some(text) = view::describe(c.update(msg)) {
                    status = text;
                }
                if msg == Msg::Start {
                    next_tick = Instant::now() + tick;
                }
            }
            None => {}
        }

        if c.is_running() && Instant::now() >= next_tick {
            if let Some(text) = view::describe(c.update(Msg::Tick)) {
                status = text;
            }
            next_tick = Instant::now() + tick;
        }
    }
}
