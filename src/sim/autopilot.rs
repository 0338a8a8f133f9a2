//! Demo-mode steering
//!
//! Picks a lateral stop that keeps clear of every obstacle inside the
//! look-ahead window and holds the matching direction key.

use glam::Vec3;

use super::state::{InputFlags, Obstacle};
use crate::consts::BODY_SIZE;

/// Lateral spacing of the candidate stops
const STOP_STEP: f32 = 0.5;
/// Extra lateral gap kept from an obstacle's footprint
const CLEARANCE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Obstacles further ahead than this are ignored
    pub look_ahead: f32,
}

impl Autopilot {
    pub fn new(look_ahead: f32) -> Self {
        Self { look_ahead }
    }

    /// Steering for the next tick
    pub fn steer(
        &self,
        character: Vec3,
        obstacles: &[Obstacle],
        lane_half_width: f32,
        lateral_speed: f32,
    ) -> InputFlags {
        let threats: Vec<f32> = obstacles
            .iter()
            .filter(|o| {
                // Not yet passed, and close enough to matter
                o.pos.z > character.z - BODY_SIZE && o.pos.z - character.z <= self.look_ahead
            })
            .map(|o| o.pos.x)
            .collect();

        let target = if threats.is_empty() {
            0.0
        } else {
            self.pick_stop(character.x, &threats, lane_half_width)
        };

        let dead_zone = lateral_speed * 0.5;
        if target < character.x - dead_zone {
            InputFlags::left()
        } else if target > character.x + dead_zone {
            InputFlags::right()
        } else {
            InputFlags::default()
        }
    }

    /// Nearest safe stop to `x`; if none is safe, the one with the widest margin
    fn pick_stop(&self, x: f32, threats: &[f32], lane_half_width: f32) -> f32 {
        let steps = ((2.0 * lane_half_width) / STOP_STEP).floor() as i32;
        let stops = (0..=steps).map(|i| -lane_half_width + i as f32 * STOP_STEP);

        let margin = |s: f32| {
            threats
                .iter()
                .map(|t| (s - t).abs())
                .fold(f32::INFINITY, f32::min)
        };

        let mut best_safe: Option<f32> = None;
        let mut widest = (-lane_half_width, f32::NEG_INFINITY);

        for s in stops {
            let m = margin(s);
            if m > BODY_SIZE + CLEARANCE {
                // Strict comparison keeps the leftmost stop on ties
                match best_safe {
                    Some(b) if (b - x).abs() <= (s - x).abs() => {}
                    _ => best_safe = Some(s),
                }
            }
            if m > widest.1 {
                widest = (s, m);
            }
        }

        best_safe.unwrap_or(widest.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::LanePoint;

    fn obstacles(points: &[(f32, f32)]) -> Vec<Obstacle> {
        points
            .iter()
            .map(|&(x, z)| Obstacle::new(LanePoint::new(x, z)))
            .collect()
    }

    #[test]
    fn test_no_threats_holds_centre() {
        let pilot = Autopilot::new(6.0);
        let obs = obstacles(&[(0.0, 50.0)]);
        let input = pilot.steer(Vec3::new(0.0, 0.5, 0.0), &obs, 2.0, 0.1);
        assert_eq!(input, InputFlags::default());

        // Off-centre with nothing ahead drifts back
        let input = pilot.steer(Vec3::new(1.5, 0.5, 0.0), &obs, 2.0, 0.1);
        assert_eq!(input, InputFlags::left());
    }

    #[test]
    fn test_dodges_obstacle_ahead() {
        let pilot = Autopilot::new(6.0);
        let obs = obstacles(&[(0.0, 10.0)]);
        // Tie between -1.5 and 1.5 goes left
        let input = pilot.steer(Vec3::new(0.0, 0.5, 5.0), &obs, 2.0, 0.1);
        assert_eq!(input, InputFlags::left());

        let input = pilot.steer(Vec3::new(0.3, 0.5, 5.0), &obs, 2.0, 0.1);
        assert_eq!(input, InputFlags::right());
    }

    #[test]
    fn test_stays_put_when_already_clear() {
        let pilot = Autopilot::new(6.0);
        let obs = obstacles(&[(2.0, 15.0), (-2.0, 20.0)]);
        let input = pilot.steer(Vec3::new(0.0, 0.5, 14.5), &obs, 2.0, 0.1);
        assert_eq!(input, InputFlags::default());
    }

    #[test]
    fn test_passed_obstacles_ignored() {
        let pilot = Autopilot::new(6.0);
        let obs = obstacles(&[(0.0, 10.0)]);
        let input = pilot.steer(Vec3::new(0.0, 0.5, 11.5), &obs, 2.0, 0.1);
        assert_eq!(input, InputFlags::default());
    }
}
