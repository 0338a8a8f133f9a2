//! Lane Runner - a lane-dodging endless runner
//!
//! Core modules:
//! - `sim`: Deterministic game core (run state, collisions, reset state machine)
//! - `course`: Obstacle layouts (built-in variants and seeded generation)
//! - `config`: Tunable constants with JSON overrides
//! - `records`: Per-player run statistics
//! - `platform`: Host capabilities (rendering, HUD banners, scheduling)

pub mod config;
pub mod course;
pub mod platform;
pub mod records;
pub mod sim;

pub use config::{ConfigError, RunnerConfig};
pub use course::{CourseLayout, CourseSpec, LanePoint};
pub use records::RunRecords;

/// Game configuration constants
pub mod consts {
    /// Forward advance per tick (units)
    pub const FORWARD_SPEED: f32 = 0.1;
    /// Lateral movement per tick while a direction key is held
    pub const LATERAL_SPEED: f32 = 0.1;
    /// Character x is clamped to [-LANE_HALF_WIDTH, LANE_HALF_WIDTH]
    pub const LANE_HALF_WIDTH: f32 = 2.0;
    /// Forward distance that completes the level
    pub const FINISH_DISTANCE: f32 = 110.0;

    /// Height of every body's centre above the ground
    pub const BODY_HEIGHT: f32 = 0.5;
    /// Edge length of the character and obstacle cubes
    pub const BODY_SIZE: f32 = 1.0;

    /// Reset delays (milliseconds)
    pub const GAME_OVER_RESET_MS: u64 = 2000;
    pub const FINISH_RESET_MS: u64 = 3000;
    pub const QUIT_RESET_MS: u64 = 2000;

    /// Nominal frame length used by the headless host (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Camera sits this far above and behind the character
    pub const CAMERA_HEIGHT: f32 = 5.0;
    pub const CAMERA_TRAIL: f32 = 10.0;
    /// Path plane centre lags the character by this much
    pub const PATH_LAG: f32 = 20.0;
    /// Ground texture scroll per tick
    pub const GROUND_SCROLL_PER_TICK: f32 = 0.02;
}
