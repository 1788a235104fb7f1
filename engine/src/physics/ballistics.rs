//! Ballistics for thrown projectiles
//!
//! Arcade ballistics: gravity only, scaled by a damping factor below 1 so
//! throws hang in the air longer than real ones. No air drag.
//!
//! Integration is semi-implicit Euler, one step per rendered frame:
//! - previous_position = position
//! - velocity.y += gravity * damping * dt
//! - position += velocity * dt
//! - rotation += spin * dt
//!
//! # Example
//!
//! ```ignore
//! use axe_toss_engine::physics::ballistics::{BallisticBody, BallisticsConfig};
//! use glam::Vec3;
//!
//! let config = BallisticsConfig::default();
//! let mut body = BallisticBody::launch(Vec3::ZERO, Vec3::new(0.0, 5.0, -20.0), Vec3::ZERO);
//! body.step(&config, 0.016);
//! // body.velocity.y ~= 4.898
//! ```

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Environment parameters shared by every projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticsConfig {
    /// Vertical gravity acceleration (m/s², negative is down).
    pub gravity: f32,
    /// Multiplier applied to gravity, in (0, 1].
    pub gravity_damping: f32,
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            gravity_damping: 0.65,
        }
    }
}

impl BallisticsConfig {
    /// Vertical acceleration actually applied per second.
    #[inline]
    pub fn effective_gravity(&self) -> f32 {
        self.gravity * self.gravity_damping
    }
}

/// Kinematic state of one thrown body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticBody {
    /// Current position in world space (meters)
    pub position: Vec3,
    /// Position before the last step, for continuous ground-crossing tests
    pub previous_position: Vec3,
    /// Current velocity (m/s)
    pub velocity: Vec3,
    /// Accumulated XYZ Euler rotation (radians)
    pub rotation: Vec3,
    /// Rotation rate per axis (rad/s)
    pub spin: Vec3,
}

impl Default for BallisticBody {
    fn default() -> Self {
        Self::launch(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO)
    }
}

impl BallisticBody {
    /// Body at rest at `position` with the given launch velocity and spin.
    pub fn launch(position: Vec3, velocity: Vec3, spin: Vec3) -> Self {
        Self {
            position,
            previous_position: position,
            velocity,
            rotation: Vec3::ZERO,
            spin,
        }
    }

    /// Advance the body by one frame of `dt` seconds.
    pub fn step(&mut self, config: &BallisticsConfig, dt: f32) {
        self.previous_position = self.position;
        self.velocity.y += config.effective_gravity() * dt;
        self.position += self.velocity * dt;
        self.rotation += self.spin * dt;
    }

    /// Orientation quaternion built from the accumulated Euler rotation.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Displacement covered during the last step.
    #[inline]
    pub fn last_displacement(&self) -> Vec3 {
        self.position - self.previous_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ballistics_config_default() {
        let config = BallisticsConfig::default();
        assert_eq!(config.gravity, -9.81);
        assert_eq!(config.gravity_damping, 0.65);
        assert!((config.effective_gravity() - (-6.3765)).abs() < 1e-4);
    }

    #[test]
    fn test_single_step_matches_hand_computation() {
        let config = BallisticsConfig::default();
        let mut body = BallisticBody::launch(Vec3::ZERO, Vec3::new(0.0, 5.0, -20.0), Vec3::ZERO);

        body.step(&config, 0.016);

        assert!((body.velocity.y - 4.898).abs() < 1e-3, "vy = {}", body.velocity.y);
        assert!((body.position.z - (-0.32)).abs() < 1e-5, "z = {}", body.position.z);
        assert_eq!(body.previous_position, Vec3::ZERO);
    }

    #[test]
    fn test_vertical_velocity_closed_form() {
        let config = BallisticsConfig::default();
        let mut body = BallisticBody::launch(Vec3::ZERO, Vec3::new(1.0, 8.0, -15.0), Vec3::ZERO);
        let steps = [0.016_f32, 0.02, 0.033, 0.001, 0.0, 0.025];

        let mut expected_vy = 8.0;
        for dt in steps {
            body.step(&config, dt);
            expected_vy += config.effective_gravity() * dt;
        }

        assert!((body.velocity.y - expected_vy).abs() < 1e-4);
        // Horizontal velocity is untouched by gravity
        assert_eq!(body.velocity.x, 1.0);
        assert_eq!(body.velocity.z, -15.0);
    }

    #[test]
    fn test_previous_position_tracks_last_step() {
        let config = BallisticsConfig::default();
        let mut body = BallisticBody::launch(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
        );

        body.step(&config, 0.02);
        let after_first = body.position;
        body.step(&config, 0.02);

        assert_eq!(body.previous_position, after_first);
        assert!(body.last_displacement().z < 0.0);
    }

    #[test]
    fn test_spin_accumulates_rotation() {
        let config = BallisticsConfig::default();
        let mut body = BallisticBody::launch(Vec3::ZERO, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));

        for _ in 0..10 {
            body.step(&config, 0.01);
        }

        assert!((body.rotation.x - 1.0).abs() < 1e-5);
        assert_eq!(body.rotation.y, 0.0);
        let expected = Quat::from_rotation_x(1.0);
        assert!(body.orientation().angle_between(expected) < 1e-4);
    }

    #[test]
    fn test_zero_dt_only_shifts_previous_position() {
        let config = BallisticsConfig::default();
        let mut body = BallisticBody::launch(Vec3::ONE, Vec3::new(3.0, 3.0, 3.0), Vec3::ONE);
        let before = body;

        body.step(&config, 0.0);

        assert_eq!(body.position, before.position);
        assert_eq!(body.velocity, before.velocity);
        assert_eq!(body.previous_position, before.position);
    }
}
