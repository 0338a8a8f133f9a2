//! Camera-follow and path-scroll targets
//!
//! Pure functions of the character position, handed to the renderer.

use glam::Vec3;

use crate::consts::*;

/// Where the renderer should place the camera and scrolling scenery
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub camera_pos: Vec3,
    pub camera_target: Vec3,
    /// Centre of the ground path plane along z
    pub path_z: f32,
    /// Ground texture v-offset (wraps in [0, 1))
    pub ground_offset: f32,
}

impl FrameView {
    /// View for a character at `character` after `ticks` running ticks
    pub fn follow(character: Vec3, ticks: u64) -> Self {
        Self {
            camera_pos: Vec3::new(0.0, CAMERA_HEIGHT, character.z + CAMERA_TRAIL),
            camera_target: character,
            path_z: character.z - PATH_LAG,
            ground_offset: (ticks as f32 * GROUND_SCROLL_PER_TICK).fract(),
        }
    }
}

impl Default for FrameView {
    fn default() -> Self {
        Self::follow(super::state::CHARACTER_START, 0)
    }
}
