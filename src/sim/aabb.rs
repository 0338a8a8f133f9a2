//! Axis-aligned bounding boxes
//!
//! Boxes are rebuilt from the current body position every tick; nothing
//! caches them.

use glam::Vec3;

/// An axis-aligned box given by its two extreme corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box of the given edge lengths centred on `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Cube of edge `edge` centred on `center`
    #[inline]
    pub fn cube(center: Vec3, edge: f32) -> Self {
        Self::from_center_size(center, Vec3::splat(edge))
    }

    /// Overlap on all three axes; touching faces count as intersecting
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_boxes_intersect() {
        let a = Aabb::cube(Vec3::new(0.0, 0.5, 10.0), 1.0);
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_separated_on_single_axis() {
        let a = Aabb::cube(Vec3::new(0.0, 0.5, 0.0), 1.0);
        // Same y/z, x differs by more than the extent
        let b = Aabb::cube(Vec3::new(1.01, 0.5, 0.0), 1.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        let c = Aabb::cube(Vec3::new(0.0, 0.5, -1.5), 1.0);
        assert!(!a.intersects(&c));

        let d = Aabb::cube(Vec3::new(0.0, 2.0, 0.0), 1.0);
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_touching_faces_intersect() {
        let a = Aabb::cube(Vec3::new(0.0, 0.5, 0.0), 1.0);
        let b = Aabb::cube(Vec3::new(1.0, 0.5, 0.0), 1.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_partial_overlap() {
        let a = Aabb::cube(Vec3::new(0.0, 0.5, 9.2), 1.0);
        let b = Aabb::cube(Vec3::new(0.5, 0.5, 10.0), 1.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_from_center_size() {
        let a = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(a.max, Vec3::new(2.0, 4.0, 6.0));
    }
}
