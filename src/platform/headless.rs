//! Headless host on a virtual clock
//!
//! Delivers frames at a fixed 60 Hz while the loop is active and fires
//! reset timers when their due time passes. Used by the native binary and
//! by tests.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{Banner, Hud, Renderer, ResetTicket, Scene, Scheduler};
use crate::consts::FRAME_MS;
use crate::sim::{Outcome, RunnerGame};

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due_ms: f64,
    delay: Duration,
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    /// Virtual time in milliseconds
    now_ms: f64,
    loop_active: bool,
    game_over_visible: bool,
    level_complete_visible: bool,
    timers: BTreeMap<ResetTicket, PendingTimer>,
    renders: u64,
    last_distance: f32,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn loop_active(&self) -> bool {
        self.loop_active
    }

    pub fn banner_visible(&self, banner: Banner) -> bool {
        match banner {
            Banner::GameOver => self.game_over_visible,
            Banner::LevelComplete => self.level_complete_visible,
        }
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Character distance in the most recent render
    pub fn last_rendered_distance(&self) -> f32 {
        self.last_distance
    }

    /// Requested delay of a timer that has not fired yet
    pub fn pending_delay(&self, ticket: ResetTicket) -> Option<Duration> {
        self.timers.get(&ticket).map(|t| t.delay)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Run `frames` frame intervals of virtual time. Ticks are delivered
    /// only while the loop is active; due timers fire in ticket order.
    /// Returns every outcome that occurred.
    pub fn advance(&mut self, game: &mut RunnerGame, frames: u32) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        for _ in 0..frames {
            self.now_ms += FRAME_MS;
            self.fire_due(game);
            if self.loop_active {
                if let Some(outcome) = game.tick(self) {
                    outcomes.push(outcome);
                }
            }
        }
        outcomes
    }

    /// Jump virtual time forward without delivering frames
    pub fn sleep(&mut self, game: &mut RunnerGame, duration: Duration) {
        self.now_ms += duration.as_secs_f64() * 1000.0;
        self.fire_due(game);
    }

    fn fire_due(&mut self, game: &mut RunnerGame) {
        let due: Vec<ResetTicket> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= self.now_ms)
            .map(|(ticket, _)| *ticket)
            .collect();
        for ticket in due {
            self.timers.remove(&ticket);
            game.fire_reset(ticket, self);
        }
    }
}

impl Renderer for HeadlessHost {
    fn render(&mut self, scene: &Scene<'_>) {
        self.renders += 1;
        self.last_distance = scene.character.z;
    }
}

impl Hud for HeadlessHost {
    fn set_banner(&mut self, banner: Banner, visible: bool) {
        match banner {
            Banner::GameOver => self.game_over_visible = visible,
            Banner::LevelComplete => self.level_complete_visible = visible,
        }
    }
}

impl Scheduler for HeadlessHost {
    fn set_loop_active(&mut self, active: bool) {
        self.loop_active = active;
    }

    fn schedule_reset(&mut self, ticket: ResetTicket, delay: Duration) {
        let due_ms = self.now_ms + delay.as_secs_f64() * 1000.0;
        self.timers.insert(ticket, PendingTimer { due_ms, delay });
    }

    fn cancel_reset(&mut self, ticket: ResetTicket) {
        self.timers.remove(&ticket);
    }
}
