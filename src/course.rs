//! Obstacle course layouts
//!
//! A course is an ordered list of obstacle placements on the lane. Two
//! hand-authored variants ship with the game; longer courses can be
//! generated deterministically from a seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Lateral offsets obstacles may occupy
pub const LANE_OFFSETS: [f32; 4] = [-2.0, 0.0, 1.0, 2.0];

/// Repeating lateral pattern of the authored courses
const AUTHORED_PATTERN: [f32; 4] = [0.0, 2.0, -2.0, 1.0];

/// First obstacle distance for every course
const FIRST_OBSTACLE_Z: f32 = 10.0;
/// Spacing of the authored courses
const AUTHORED_SPACING: f32 = 5.0;

/// Generated spacing range (inclusive, whole units)
const MIN_GAP: u32 = 5;
const MAX_GAP: u32 = 10;

/// Obstacle placement on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LanePoint {
    pub x: f32,
    pub z: f32,
}

impl LanePoint {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// Which course to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CourseSpec {
    /// Short 4-obstacle course
    Training,
    /// 20 obstacles spanning the whole level
    #[default]
    Full,
    /// Seeded procedural course
    Generated { seed: u64, count: u32 },
}

impl CourseSpec {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseSpec::Training => "training",
            CourseSpec::Full => "full",
            CourseSpec::Generated { .. } => "generated",
        }
    }

    /// Build the obstacle layout for this course
    pub fn layout(&self) -> CourseLayout {
        match *self {
            CourseSpec::Training => CourseLayout::authored(4),
            CourseSpec::Full => CourseLayout::authored(20),
            CourseSpec::Generated { seed, count } => CourseLayout::generated(seed, count),
        }
    }
}

/// Ordered obstacle placements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseLayout {
    pub obstacles: Vec<LanePoint>,
}

impl CourseLayout {
    pub fn new(obstacles: Vec<LanePoint>) -> Self {
        Self { obstacles }
    }

    /// Layout with no obstacles at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Authored pattern: 0, 2, -2, 1 repeating every 5 units from z = 10
    fn authored(count: usize) -> Self {
        let obstacles = (0..count)
            .map(|i| {
                LanePoint::new(
                    AUTHORED_PATTERN[i % AUTHORED_PATTERN.len()],
                    FIRST_OBSTACLE_Z + i as f32 * AUTHORED_SPACING,
                )
            })
            .collect();
        Self { obstacles }
    }

    /// Seeded course: gaps of 5-10 units, lanes drawn from `LANE_OFFSETS`
    pub fn generated(seed: u64, count: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut z = FIRST_OBSTACLE_Z;
        let mut obstacles = Vec::with_capacity(count as usize);

        for i in 0..count {
            if i > 0 {
                z += rng.random_range(MIN_GAP..=MAX_GAP) as f32;
            }
            let x = LANE_OFFSETS[rng.random_range(0..LANE_OFFSETS.len())];
            obstacles.push(LanePoint::new(x, z));
        }

        log::info!("Generated course: seed={}, obstacles={}, length={}", seed, count, z);
        Self { obstacles }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Distance of the last obstacle (0 for an empty course)
    pub fn length(&self) -> f32 {
        self.obstacles.iter().map(|p| p.z).fold(0.0, f32::max)
    }
}
