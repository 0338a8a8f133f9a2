//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick speeds only
//! - Stable obstacle order (course order)
//! - No rendering or platform dependencies beyond the `platform` traits

pub mod aabb;
pub mod autopilot;
pub mod game;
pub mod state;
pub mod view;

pub use aabb::Aabb;
pub use autopilot::Autopilot;
pub use game::RunnerGame;
pub use state::{CHARACTER_START, Character, InputFlags, Key, Obstacle, Outcome, RunState};
pub use view::FrameView;
