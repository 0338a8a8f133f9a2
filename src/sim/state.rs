//! Run state and core gameplay types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;
use crate::course::LanePoint;

/// Where the character starts every run
pub const CHARACTER_START: Vec3 = Vec3::new(0.0, BODY_HEIGHT, 0.0);

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Advancing every tick
    #[default]
    Running,
    /// Player paused; no ticks delivered
    Paused,
    /// Hit an obstacle, waiting for the reset timer
    GameOver,
    /// Reached the finish, waiting for the reset timer
    Finished,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::GameOver => "game over",
            RunState::Finished => "finished",
        }
    }
}

/// The player-controlled cube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec3,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            pos: CHARACTER_START,
        }
    }
}

impl Character {
    /// Bounding box at the current position
    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.pos, BODY_SIZE)
    }

    /// Forward distance travelled
    #[inline]
    pub fn distance(&self) -> f32 {
        self.pos.z
    }
}

/// A static obstacle on the lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec3,
    /// Placement recorded at creation, restored on reset
    home: Vec3,
}

impl Obstacle {
    pub fn new(point: LanePoint) -> Self {
        let home = Vec3::new(point.x, BODY_HEIGHT, point.z);
        Self { pos: home, home }
    }

    pub fn home(&self) -> Vec3 {
        self.home
    }

    /// Put the obstacle back where it was placed
    pub fn restore(&mut self) {
        self.pos = self.home;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.pos, BODY_SIZE)
    }
}

/// Held steering keys (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    pub move_left_held: bool,
    pub move_right_held: bool,
}

impl InputFlags {
    pub fn left() -> Self {
        Self {
            move_left_held: true,
            move_right_held: false,
        }
    }

    pub fn right() -> Self {
        Self {
            move_left_held: false,
            move_right_held: true,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Hit the obstacle at `obstacle_index` (course order)
    Collision { obstacle_index: usize, distance: f32 },
    /// Reached the finish distance
    Finished { distance: f32 },
}

impl Outcome {
    pub fn distance(&self) -> f32 {
        match *self {
            Outcome::Collision { distance, .. } | Outcome::Finished { distance } => distance,
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, Outcome::Finished { .. })
    }
}

/// Recognized keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Pause,
    Resume,
    Quit,
    /// Toggle the autopilot (demo mode)
    Autopilot,
}

impl Key {
    /// Map a browser `KeyboardEvent.key` value; unknown keys yield `None`
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "p" | "P" => Some(Key::Pause),
            "r" | "R" => Some(Key::Resume),
            "q" | "Q" => Some(Key::Quit),
            "i" | "I" => Some(Key::Autopilot),
            _ => None,
        }
    }
}
