//! End-to-end runs through the headless host

use std::time::Duration;

use proptest::prelude::*;

use lane_runner::platform::{Banner, HeadlessHost};
use lane_runner::sim::{Key, Outcome, RunState, RunnerGame};
use lane_runner::{CourseLayout, CourseSpec, LanePoint, RunRecords, RunnerConfig};

fn started(config: RunnerConfig, layout: &CourseLayout) -> (RunnerGame, HeadlessHost) {
    let mut game = RunnerGame::with_layout(config, layout);
    let mut host = HeadlessHost::new();
    game.start(&mut host);
    (game, host)
}

#[test]
fn straight_run_hits_first_obstacle() {
    let mut game = RunnerGame::new(RunnerConfig::with_course(CourseSpec::Full));
    let mut host = HeadlessHost::new();
    game.start(&mut host);

    let outcomes = host.advance(&mut game, 200);
    assert_eq!(outcomes.len(), 1);
    match outcomes[0] {
        Outcome::Collision {
            obstacle_index,
            distance,
        } => {
            assert_eq!(obstacle_index, 0);
            assert!((9.0..=10.0).contains(&distance), "hit at {}", distance);
        }
        other => panic!("expected collision, got {:?}", other),
    }
    assert_eq!(game.state(), RunState::GameOver);
    assert!(host.banner_visible(Banner::GameOver));
}

#[test]
fn game_over_resets_after_two_seconds_and_runs_again() {
    let layout = CourseLayout::new(vec![LanePoint::new(0.0, 2.0)]);
    let (mut game, mut host) = started(RunnerConfig::default(), &layout);

    let outcomes = host.advance(&mut game, 20);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(game.state(), RunState::GameOver);

    // 2000 ms is 120 frames at 60 Hz; the loop keeps rendering meanwhile
    host.advance(&mut game, 100);
    assert_eq!(game.state(), RunState::GameOver);
    host.sleep(&mut game, Duration::from_millis(400));
    assert_eq!(game.state(), RunState::Running);
    assert!(!host.banner_visible(Banner::GameOver));
    assert_eq!(game.distance(), 0.0);

    host.advance(&mut game, 5);
    assert!(game.distance() > 0.4);
}

#[test]
fn finish_resets_after_three_seconds() {
    let (mut game, mut host) = started(RunnerConfig::default(), &CourseLayout::empty());

    let outcomes = host.advance(&mut game, 1200);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_finish());
    assert_eq!(game.state(), RunState::Finished);
    assert!(host.banner_visible(Banner::LevelComplete));

    host.sleep(&mut game, Duration::from_millis(3100));
    assert_eq!(game.state(), RunState::Running);
    assert!(!host.banner_visible(Banner::LevelComplete));
}

#[test]
fn paused_game_receives_no_ticks() {
    let (mut game, mut host) = started(RunnerConfig::default(), &CourseLayout::empty());
    host.advance(&mut game, 10);
    let ticks = game.ticks();

    game.on_key_name_down("p", &mut host);
    host.advance(&mut game, 10);
    assert_eq!(game.ticks(), ticks);
    assert_eq!(game.state(), RunState::Paused);

    game.on_key_name_down("R", &mut host);
    host.advance(&mut game, 10);
    assert_eq!(game.ticks(), ticks + 10);
}

#[test]
fn quit_then_reset_restarts_loop() {
    let (mut game, mut host) = started(RunnerConfig::default(), &CourseLayout::empty());
    host.advance(&mut game, 30);
    game.on_key_down(Key::Quit, &mut host);
    assert!(!host.loop_active());

    host.advance(&mut game, 60);
    assert!(game.distance() > 2.9);

    host.advance(&mut game, 70);
    assert!(host.loop_active());
    assert_eq!(game.state(), RunState::Running);
    assert!(game.distance() < 2.0);
}

#[test]
fn quit_during_pending_game_over_resets_once() {
    let layout = CourseLayout::new(vec![LanePoint::new(0.0, 0.1)]);
    let (mut game, mut host) = started(RunnerConfig::default(), &layout);
    host.advance(&mut game, 1);
    assert_eq!(game.state(), RunState::GameOver);
    assert_eq!(host.pending_timers(), 1);

    host.sleep(&mut game, Duration::from_millis(1500));
    game.quit(&mut host);
    assert_eq!(host.pending_timers(), 1);

    // The superseded game-over deadline passes without a reset
    host.sleep(&mut game, Duration::from_millis(1000));
    assert_eq!(game.state(), RunState::GameOver);

    host.sleep(&mut game, Duration::from_millis(1100));
    assert_eq!(game.state(), RunState::Running);
    assert_eq!(host.pending_timers(), 0);
}

#[test]
fn steering_dodges_obstacle() {
    let layout = CourseLayout::new(vec![LanePoint::new(0.0, 10.0)]);
    let (mut game, mut host) = started(RunnerConfig::default(), &layout);

    host.advance(&mut game, 30);
    game.on_key_down(Key::Right, &mut host);
    host.advance(&mut game, 20);
    game.on_key_up(Key::Right);
    assert!((game.character().x - 2.0).abs() < 1e-4);

    let outcomes = host.advance(&mut game, 100);
    assert!(outcomes.is_empty());
    assert!(game.distance() > 11.0);
}

#[test]
fn autopilot_completes_authored_courses() {
    for course in [CourseSpec::Training, CourseSpec::Full] {
        let mut game = RunnerGame::new(RunnerConfig::with_course(course));
        let mut host = HeadlessHost::new();
        game.set_autopilot(true);
        game.start(&mut host);

        let outcomes = host.advance(&mut game, 1200);
        assert_eq!(outcomes.len(), 1, "{:?}", course);
        assert!(outcomes[0].is_finish(), "{:?}: {:?}", course, outcomes[0]);
    }
}

#[test]
fn records_track_session() {
    let layout = CourseLayout::new(vec![LanePoint::new(0.0, 3.0)]);
    let (mut game, mut host) = started(RunnerConfig::default(), &layout);
    let mut records = RunRecords::new();

    for _ in 0..3 {
        for outcome in host.advance(&mut game, 200) {
            records.record(&outcome);
        }
    }
    assert!(records.attempts >= 2);
    assert_eq!(records.finishes, 0);
    assert_eq!(records.deadliest_obstacle(), Some(0));
}

proptest! {
    #[test]
    fn lane_bound_holds(moves in prop::collection::vec((0u8..3, 1u32..40), 1..20)) {
        let (mut game, mut host) = started(RunnerConfig::default(), &CourseLayout::empty());
        for (dir, frames) in moves {
            game.on_key_up(Key::Left);
            game.on_key_up(Key::Right);
            match dir {
                0 => game.on_key_down(Key::Left, &mut host),
                1 => game.on_key_down(Key::Right, &mut host),
                _ => {}
            }
            for _ in 0..frames {
                game.tick(&mut host);
                let x = game.character().x;
                prop_assert!((-2.0..=2.0).contains(&x), "x = {}", x);
            }
        }
    }

    #[test]
    fn distance_monotonic_while_running(seed in any::<u64>(), frames in 1u32..600) {
        let layout = CourseLayout::generated(seed, 15);
        let (mut game, mut host) = started(RunnerConfig::default(), &layout);
        let mut last = game.distance();
        for _ in 0..frames {
            let was_running = game.state() == RunState::Running;
            game.tick(&mut host);
            if was_running {
                prop_assert!(game.distance() > last);
            } else {
                prop_assert_eq!(game.distance(), last);
            }
            last = game.distance();
        }
    }

    #[test]
    fn obstacles_never_move(seed in any::<u64>(), frames in 1u32..400) {
        let layout = CourseLayout::generated(seed, 10);
        let (mut game, mut host) = started(RunnerConfig::default(), &layout);
        game.on_key_down(Key::Left, &mut host);
        host.advance(&mut game, frames);
        for obstacle in game.obstacles() {
            prop_assert_eq!(obstacle.pos, obstacle.home());
        }
    }
}
