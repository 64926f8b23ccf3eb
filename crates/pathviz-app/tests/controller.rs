use pathviz_app::{AppConfig, Controller, Mode, Msg, Notice, Phase};
use pathviz_core::{EndpointIssue, Error, Point};
use pathviz_paths::Outcome;

fn controller(cols: i32, rows: i32) -> Controller {
    Controller::new(AppConfig {
        cols,
        rows,
        ..AppConfig::default()
    })
    .unwrap()
}

fn run_to_end(c: &mut Controller) -> Notice {
    loop {
        let notice = c.update(Msg::Tick);
        if notice != Notice::Searching {
            return notice;
        }
    }
}

#[test]
fn walls_under_endpoints_are_ignored() {
    let mut c = controller(5, 5);
    let start = c.start();
    let end = c.end();

    assert_eq!(c.update(Msg::Click(start)), Notice::Ignored);
    assert_eq!(c.update(Msg::Click(end)), Notice::Ignored);
    assert_eq!(c.grid().is_wall(start), Ok(false));
    assert_eq!(c.grid().is_wall(end), Ok(false));
    assert_eq!(c.grid().revision(), 0);
}

#[test]
fn endpoints_cannot_land_on_walls_or_each_other() {
    let mut c = controller(5, 5);
    let wall = Point::new(2, 2);
    assert_eq!(
        c.update(Msg::Click(wall)),
        Notice::WallToggled { pos: wall, wall: true }
    );

    c.update(Msg::SetMode(Mode::SetStart));
    assert_eq!(
        c.update(Msg::Click(wall)),
        Notice::Rejected(Error::InvalidEndpoints(EndpointIssue::StartIsWall))
    );
    assert_eq!(
        c.update(Msg::Click(c.end())),
        Notice::Rejected(Error::InvalidEndpoints(EndpointIssue::SameCell))
    );
    assert_eq!(c.start(), Point::new(0, 0));

    c.update(Msg::SetMode(Mode::SetEnd));
    assert_eq!(
        c.update(Msg::Click(wall)),
        Notice::Rejected(Error::InvalidEndpoints(EndpointIssue::EndIsWall))
    );
    assert_eq!(
        c.update(Msg::Click(c.start())),
        Notice::Rejected(Error::InvalidEndpoints(EndpointIssue::SameCell))
    );
    assert_eq!(c.end(), Point::new(4, 4));

    // Whatever was attempted, no endpoint is ever a wall.
    assert_eq!(c.grid().is_wall(c.start()), Ok(false));
    assert_eq!(c.grid().is_wall(c.end()), Ok(false));
}

#[test]
fn search_runs_tick_by_tick() {
    let mut c = controller(3, 3);
    assert_eq!(c.update(Msg::Start), Notice::Searching);
    assert!(c.is_running());

    // The 3x3 open grid needs nine steps; the last one finds the end.
    for _ in 0..8 {
        assert_eq!(c.update(Msg::Tick), Notice::Searching);
    }
    assert_eq!(c.update(Msg::Tick), Notice::Found { len: 5 });
    let expected = vec![
        Point::new(0, 0),
        Point::new(1, 0),
        Point::new(2, 0),
        Point::new(2, 1),
        Point::new(2, 2),
    ];
    assert_eq!(c.phase(), &Phase::Done(Outcome::Found(expected.clone())));
    assert_eq!(c.snapshot().unwrap().best_path, expected);
}

#[test]
fn edits_are_refused_while_running() {
    let mut c = controller(6, 6);
    c.update(Msg::Start);
    assert_eq!(c.update(Msg::Click(Point::new(3, 3))), Notice::Busy);
    assert_eq!(c.update(Msg::SetMode(Mode::SetEnd)), Notice::Busy);
    assert_eq!(c.update(Msg::Start), Notice::Busy);
    assert_eq!(c.mode(), Mode::DrawWall);
    assert_eq!(c.grid().wall_count(), 0);
}

#[test]
fn wall_edit_discards_the_finished_search() {
    let mut c = controller(4, 4);
    c.update(Msg::Start);
    assert!(matches!(run_to_end(&mut c), Notice::Found { .. }));
    assert!(c.search().is_some());

    c.update(Msg::Click(Point::new(1, 1)));
    assert!(c.search().is_none());
    assert_eq!(c.phase(), &Phase::Idle);
}

#[test]
fn unreachable_requires_reset_or_endpoint_move() {
    let mut c = controller(4, 4);
    for p in [Point::new(3, 2), Point::new(2, 3)] {
        c.update(Msg::Click(p));
    }
    c.update(Msg::Start);
    assert_eq!(run_to_end(&mut c), Notice::Unreachable);
    assert_eq!(c.snapshot().unwrap().open, Vec::<Point>::new());

    // Removing a wall does not lift the latch.
    c.update(Msg::Click(Point::new(3, 2)));
    assert_eq!(c.update(Msg::Start), Notice::ResetRequired);

    // Moving the end does.
    c.update(Msg::SetMode(Mode::SetEnd));
    assert_eq!(c.update(Msg::Click(Point::new(3, 3))), Notice::EndMoved(Point::new(3, 3)));
    assert_eq!(c.update(Msg::Start), Notice::Searching);
    assert!(matches!(run_to_end(&mut c), Notice::Found { len: 7 }));
}

#[test]
fn reset_clears_walls_endpoints_and_mode() {
    let mut c = controller(5, 4);
    c.update(Msg::Click(Point::new(1, 1)));
    c.update(Msg::SetMode(Mode::SetStart));
    c.update(Msg::Click(Point::new(2, 2)));
    c.update(Msg::Start);
    c.update(Msg::Tick);

    assert_eq!(c.update(Msg::Reset), Notice::Reset);
    assert_eq!(c.grid().wall_count(), 0);
    assert_eq!(c.start(), Point::new(0, 0));
    assert_eq!(c.end(), Point::new(4, 3));
    assert_eq!(c.mode(), Mode::DrawWall);
    assert_eq!(c.phase(), &Phase::Idle);
    assert!(c.search().is_none());
}

#[test]
fn restart_after_moving_end_starts_clean() {
    let mut c = controller(5, 5);
    c.update(Msg::Start);
    for _ in 0..5 {
        c.update(Msg::Tick);
    }
    c.update(Msg::SetMode(Mode::SetEnd));
    // Refused while running.
    assert_eq!(c.update(Msg::Click(Point::new(4, 0))), Notice::Busy);

    c.update(Msg::Reset);
    c.update(Msg::SetMode(Mode::SetEnd));
    c.update(Msg::Click(Point::new(4, 0)));
    c.update(Msg::Start);
    let snap = c.snapshot().unwrap();
    assert_eq!(snap.end, Point::new(4, 0));
    assert_eq!(snap.open, vec![Point::new(0, 0)]);
    assert!(snap.closed.is_empty());
    assert_eq!(snap.expansions, 0);
}
