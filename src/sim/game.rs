//! The runner game core
//!
//! One `RunnerGame` owns everything that changes during play. The host
//! delivers key events and one `tick()` per frame; the game answers through
//! the `Host` capabilities (render, banners, loop start/stop, reset timers).

use std::time::Duration;

use glam::Vec3;

use super::autopilot::Autopilot;
use super::state::{Character, InputFlags, Key, Obstacle, Outcome, RunState};
use super::view::FrameView;
use crate::config::RunnerConfig;
use crate::course::CourseLayout;
use crate::platform::{Banner, Host, ResetTicket, Scene};

pub struct RunnerGame {
    config: RunnerConfig,
    state: RunState,
    character: Character,
    /// Course order; collision reports index into this
    obstacles: Vec<Obstacle>,
    input: InputFlags,
    view: FrameView,
    /// Running ticks since the last reset
    ticks: u64,
    /// Whether the host was last asked to deliver ticks
    loop_active: bool,
    pending_reset: Option<ResetTicket>,
    next_ticket: u64,
    autopilot: Option<Autopilot>,
}

impl RunnerGame {
    /// Game on the course named by `config`
    pub fn new(config: RunnerConfig) -> Self {
        let layout = config.course.layout();
        Self::with_layout(config, &layout)
    }

    /// Game on an explicit obstacle layout
    pub fn with_layout(config: RunnerConfig, layout: &CourseLayout) -> Self {
        if layout.is_empty() {
            log::warn!("Course has no obstacles");
        } else if layout.length() >= config.finish_distance {
            log::warn!(
                "Course runs to {} but the finish is at {}; later obstacles are unreachable",
                layout.length(),
                config.finish_distance
            );
        }
        Self {
            config,
            state: RunState::Running,
            character: Character::default(),
            obstacles: layout.obstacles.iter().copied().map(Obstacle::new).collect(),
            input: InputFlags::default(),
            view: FrameView::default(),
            ticks: 0,
            loop_active: false,
            pending_reset: None,
            next_ticket: 1,
            autopilot: None,
        }
    }

    /// Ask the host to begin delivering ticks
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        log::info!(
            "Run started: course={}, obstacles={}, finish={}",
            self.config.course.as_str(),
            self.obstacles.len(),
            self.config.finish_distance
        );
        self.set_loop_active(true, host);
        self.render(host);
    }

    // === Accessors ===

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn character(&self) -> Vec3 {
        self.character.pos
    }

    pub fn distance(&self) -> f32 {
        self.character.distance()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn input(&self) -> InputFlags {
        self.input
    }

    pub fn view(&self) -> FrameView {
        self.view
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn loop_active(&self) -> bool {
        self.loop_active
    }

    pub fn pending_reset(&self) -> Option<ResetTicket> {
        self.pending_reset
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot.is_some()
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled.then(|| Autopilot::new(self.config.look_ahead));
        if !enabled {
            self.input.clear();
        }
        log::info!("Autopilot: {}", enabled);
    }

    // === Input ===

    pub fn on_key_down<H: Host + ?Sized>(&mut self, key: Key, host: &mut H) {
        match key {
            Key::Left => self.input.move_left_held = true,
            Key::Right => self.input.move_right_held = true,
            Key::Pause => self.pause(host),
            Key::Resume => self.resume(host),
            Key::Quit => self.quit(host),
            Key::Autopilot => self.set_autopilot(!self.autopilot_enabled()),
        }
    }

    pub fn on_key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.input.move_left_held = false,
            Key::Right => self.input.move_right_held = false,
            _ => {}
        }
    }

    /// Key-down by browser key name; unknown names are ignored
    pub fn on_key_name_down<H: Host + ?Sized>(&mut self, name: &str, host: &mut H) {
        if let Some(key) = Key::from_key_name(name) {
            self.on_key_down(key, host);
        }
    }

    /// Key-up by browser key name; unknown names are ignored
    pub fn on_key_name_up(&mut self, name: &str) {
        if let Some(key) = Key::from_key_name(name) {
            self.on_key_up(key);
        }
    }

    // === Frame ===

    /// Advance one frame. Returns the outcome if the run ended this tick.
    /// Safe in any state; only a running game moves.
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Outcome> {
        if self.state != RunState::Running {
            self.render(host);
            return None;
        }

        self.ticks += 1;

        // Forward
        self.character.pos.z += self.config.forward_speed;
        self.view = FrameView::follow(self.character.pos, self.ticks);

        // Lateral
        if let Some(pilot) = &self.autopilot {
            self.input = pilot.steer(
                self.character.pos,
                &self.obstacles,
                self.config.lane_half_width,
                self.config.lateral_speed,
            );
        }
        let bound = self.config.lane_half_width;
        let x = &mut self.character.pos.x;
        if self.input.move_left_held && *x > -bound {
            *x = (*x - self.config.lateral_speed).max(-bound);
        }
        if self.input.move_right_held && *x < bound {
            *x = (*x + self.config.lateral_speed).min(bound);
        }

        // Collisions (first hit in course order wins)
        let character_box = self.character.bounds();
        if let Some(index) = self
            .obstacles
            .iter()
            .position(|o| o.bounds().intersects(&character_box))
        {
            log::info!("Collision detected with obstacle {}! Game Over.", index);
            let outcome = Outcome::Collision {
                obstacle_index: index,
                distance: self.character.distance(),
            };
            self.end_run(
                RunState::GameOver,
                outcome,
                Banner::GameOver,
                self.config.game_over_reset(),
                host,
            );
            return Some(outcome);
        }

        // Finish line
        if self.character.distance() >= self.config.finish_distance {
            log::info!("Finish line reached at {:.1}", self.character.distance());
            let outcome = Outcome::Finished {
                distance: self.character.distance(),
            };
            self.end_run(
                RunState::Finished,
                outcome,
                Banner::LevelComplete,
                self.config.finish_reset(),
                host,
            );
            return Some(outcome);
        }

        self.render(host);
        None
    }

    fn end_run<H: Host + ?Sized>(
        &mut self,
        state: RunState,
        outcome: Outcome,
        banner: Banner,
        delay: Duration,
        host: &mut H,
    ) {
        log::debug!("Run ended: {:?}", outcome);
        self.state = state;
        host.set_banner(banner, true);
        self.schedule_reset(delay, host);
        self.render(host);
    }

    fn render<H: Host + ?Sized>(&self, host: &mut H) {
        host.render(&Scene {
            character: self.character.pos,
            obstacles: &self.obstacles,
            view: self.view,
            state: self.state,
        });
    }

    // === Control ===

    /// Running -> Paused; stops tick delivery
    pub fn pause<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            self.set_loop_active(false, host);
            log::info!("Game paused");
        }
    }

    /// Paused -> Running; restarts tick delivery
    pub fn resume<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
            self.set_loop_active(true, host);
            log::info!("Game resumed");
        }
    }

    /// Stop tick delivery and reset after the quit delay, from any state
    pub fn quit<H: Host + ?Sized>(&mut self, host: &mut H) {
        log::info!("Game quit ({})", self.state.as_str());
        self.set_loop_active(false, host);
        self.schedule_reset(self.config.quit_reset(), host);
    }

    /// Put everything back to the start of a run
    pub fn reset<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(ticket) = self.pending_reset.take() {
            host.cancel_reset(ticket);
        }

        self.character = Character::default();
        for obstacle in &mut self.obstacles {
            obstacle.restore();
        }
        self.state = RunState::Running;
        self.ticks = 0;
        self.view = FrameView::default();

        for banner in Banner::ALL {
            host.set_banner(banner, false);
        }
        if !self.loop_active {
            self.set_loop_active(true, host);
        }
        self.render(host);
    }

    /// Reset timer callback. Stale tickets are ignored; returns whether a
    /// reset happened.
    pub fn fire_reset<H: Host + ?Sized>(&mut self, ticket: ResetTicket, host: &mut H) -> bool {
        if self.pending_reset != Some(ticket) {
            log::debug!("Ignoring stale reset {:?}", ticket);
            return false;
        }
        log::info!("Resetting run ({})", self.state.as_str());
        self.reset(host);
        true
    }

    /// Replace any pending reset with a new one after `delay`
    fn schedule_reset<H: Host + ?Sized>(&mut self, delay: Duration, host: &mut H) {
        if let Some(old) = self.pending_reset.take() {
            log::debug!("Superseding pending reset {:?}", old);
            host.cancel_reset(old);
        }
        let ticket = ResetTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_reset = Some(ticket);
        host.schedule_reset(ticket, delay);
    }

    fn set_loop_active<H: Host + ?Sized>(&mut self, active: bool, host: &mut H) {
        self.loop_active = active;
        host.set_loop_active(active);
    }
}
