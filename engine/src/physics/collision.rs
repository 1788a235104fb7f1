//! Collision primitives
//!
//! Broad-phase AABB tests for projectiles against targets, plus the
//! continuous ground-plane crossing test used for ground impacts.
//!
//! # Oriented bounds
//!
//! Projectiles and targets rotate, so their world bounds are the AABB of an
//! oriented box: for rotation matrix `R` and local half extents `h`, the
//! world half extents are `|R| * h` (component-wise absolute value).
//!
//! # Example
//!
//! ```ignore
//! use axe_toss_engine::physics::collision::{Aabb, ground_intersection};
//! use glam::{Quat, Vec3};
//!
//! let crate_box = Aabb::from_center(Vec3::new(0.0, 1.0, -10.0), Vec3::splat(0.4));
//! let card = Vec3::new(0.32, 0.5, 0.005);
//! let axe = Aabb::from_oriented(Vec3::new(0.2, 1.1, -10.3), card, Quat::IDENTITY);
//! assert!(axe.intersects(&crate_box));
//!
//! let hit = ground_intersection(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, -0.5, -1.0), 0.0);
//! assert_eq!(hit, Some(Vec3::new(0.0, 0.0, -0.5)));
//! ```

use glam::{Mat3, Quat, Vec3};

use super::types::PARALLEL_EPSILON;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with the given half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Tight world AABB of a box with local `half_extents` rotated by `rotation`.
    pub fn from_oriented(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        let basis = Mat3::from_quat(rotation);
        let half = basis.x_axis.abs() * half_extents.x.abs()
            + basis.y_axis.abs() * half_extents.y.abs()
            + basis.z_axis.abs() * half_extents.z.abs();
        Self::from_center(center, half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Overlap test. Touching faces count as an overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Whether the motion `previous -> current` crossed the ground plane downward.
///
/// Starting exactly on the plane counts; ending exactly on it does not.
#[inline]
pub fn segment_crosses_ground(previous: Vec3, current: Vec3, ground_y: f32) -> bool {
    previous.y >= ground_y && current.y < ground_y
}

/// Exact intersection of the segment `start -> end` with the plane `y = ground_y`.
///
/// Returns `None` when the segment is parallel to the plane or does not reach it.
pub fn ground_intersection(start: Vec3, end: Vec3, ground_y: f32) -> Option<Vec3> {
    let dy = end.y - start.y;
    if dy.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (ground_y - start.y) / dy;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let mut point = start.lerp(end, t);
    point.y = ground_y;
    Some(point)
}

/// Ground impact point for a crossing segment, falling back to the end
/// point's horizontal position when the segment is degenerate.
pub fn ground_impact_point(start: Vec3, end: Vec3, ground_y: f32) -> Vec3 {
    ground_intersection(start, end, ground_y).unwrap_or(Vec3::new(end.x, ground_y, end.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_aabb_center_and_half_extents() {
        let aabb = Aabb::new(Vec3::new(-1.0, 0.0, -3.0), Vec3::new(1.0, 2.0, -1.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 1.0, -2.0));
        assert_eq!(aabb.half_extents(), Vec3::ONE);
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(0.8, 0.0, 0.0), Vec3::splat(0.5));
        let c = Aabb::from_center(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(0.5));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_touching_counts() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_aabb_separated_on_one_axis_only() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(0.0, 0.0, -1.5), Vec3::splat(0.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_oriented_identity_matches_axis_aligned() {
        let half = Vec3::new(0.3, 0.5, 0.01);
        let aabb = Aabb::from_oriented(Vec3::ONE, half, Quat::IDENTITY);
        assert!(approx(aabb.half_extents(), half));
    }

    #[test]
    fn test_oriented_quarter_turn_swaps_axes() {
        let half = Vec3::new(0.3, 0.5, 0.01);
        let aabb = Aabb::from_oriented(Vec3::ZERO, half, Quat::from_rotation_x(FRAC_PI_2));
        // Rotating about X swaps the Y and Z extents
        assert!(approx(aabb.half_extents(), Vec3::new(0.3, 0.01, 0.5)));
    }

    #[test]
    fn test_oriented_cube_grows_when_yawed() {
        let yaw = Quat::from_rotation_y(FRAC_PI_2 * 0.5);
        let aabb = Aabb::from_oriented(Vec3::ZERO, Vec3::splat(0.4), yaw);
        let expected = 0.4 * std::f32::consts::SQRT_2;
        assert!((aabb.half_extents().x - expected).abs() < 1e-5);
        assert!((aabb.half_extents().y - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::new(1.0, -1.0, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(1.1, 0.0, 0.0)));
    }

    #[test]
    fn test_segment_crosses_ground() {
        assert!(segment_crosses_ground(Vec3::new(0.0, 0.1, 0.0), Vec3::new(0.0, -0.1, 0.0), 0.0));
        assert!(segment_crosses_ground(Vec3::ZERO, Vec3::new(0.0, -0.1, 0.0), 0.0));
        // Ending exactly on the plane is not a crossing
        assert!(!segment_crosses_ground(Vec3::new(0.0, 0.1, 0.0), Vec3::ZERO, 0.0));
        // Upward motion from below is not a crossing
        assert!(!segment_crosses_ground(Vec3::new(0.0, -0.2, 0.0), Vec3::new(0.0, -0.1, 0.0), 0.0));
    }

    #[test]
    fn test_ground_intersection_exact_point() {
        let hit =
            ground_intersection(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, -1.0, -4.0), 0.0).unwrap();
        assert!(approx(hit, Vec3::new(1.0, 0.0, -2.0)));
    }

    #[test]
    fn test_ground_intersection_nonzero_plane() {
        let hit =
            ground_intersection(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, 1.0, -2.0), 2.0).unwrap();
        assert!(approx(hit, Vec3::new(0.0, 2.0, -1.0)));
    }

    #[test]
    fn test_ground_intersection_parallel_segment() {
        let hit = ground_intersection(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 0.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_ground_intersection_out_of_segment() {
        let hit = ground_intersection(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_ground_impact_point_fallback() {
        let end = Vec3::new(3.0, 0.0, -7.0);
        let point = ground_impact_point(Vec3::new(2.0, 0.0, -6.0), end, 0.0);
        assert_eq!(point, Vec3::new(3.0, 0.0, -7.0));
    }
}
