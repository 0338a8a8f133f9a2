//! Platform abstraction layer
//!
//! The game core never touches a window, DOM or timer directly. It talks to
//! its host through three capabilities:
//! - `Renderer`: draw the current scene
//! - `Hud`: show/hide the end-of-run banners
//! - `Scheduler`: start/stop frame delivery and fire-once reset timers

pub mod headless;

use std::time::Duration;

use glam::Vec3;

use crate::sim::{FrameView, Obstacle, RunState};

pub use headless::HeadlessHost;

/// Snapshot handed to the renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub character: Vec3,
    pub obstacles: &'a [Obstacle],
    pub view: FrameView,
    pub state: RunState,
}

/// End-of-run banners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Banner {
    GameOver,
    LevelComplete,
}

impl Banner {
    pub const ALL: [Banner; 2] = [Banner::GameOver, Banner::LevelComplete];

    /// DOM id of the banner element
    pub fn element_id(&self) -> &'static str {
        match self {
            Banner::GameOver => "gameOverMessage",
            Banner::LevelComplete => "finishLineMessage",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Banner::GameOver => "Game Over!",
            Banner::LevelComplete => "Level 1 Completed!",
        }
    }
}

/// Identity of a scheduled reset; only the latest one is honored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResetTicket(pub u64);

pub trait Renderer {
    fn render(&mut self, scene: &Scene<'_>);
}

pub trait Hud {
    fn set_banner(&mut self, banner: Banner, visible: bool);
}

pub trait Scheduler {
    /// Start or stop delivering `tick()` calls
    fn set_loop_active(&mut self, active: bool);
    /// Call `RunnerGame::fire_reset(ticket)` once after `delay`
    fn schedule_reset(&mut self, ticket: ResetTicket, delay: Duration);
    /// Drop a reset that has not fired yet (unknown tickets are ignored)
    fn cancel_reset(&mut self, ticket: ResetTicket);
}

/// Everything the game needs from its environment
pub trait Host: Renderer + Hud + Scheduler {}

impl<T: Renderer + Hud + Scheduler> Host for T {}
