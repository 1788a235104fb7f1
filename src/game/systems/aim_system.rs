//! Aim and throw composition.
//!
//! [`AimResolver`] turns a pointer position into a world-space aim point on
//! a fixed depth plane ahead of the eye. [`ThrowController`] tracks the
//! press/release cycle and, on release, composes the launch vector from the
//! aim point and the held duration. Pure game logic, no rendering.

use glam::Vec3;

use crate::camera::{ViewCamera, Viewport, raycast_to_depth_plane, screen_ray};
use crate::game::config::ThrowConfig;
use crate::input::{ChargeState, normalized_charge};

/// Direction and speed of a throw, ready for the projectile pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchVector {
    /// Unit launch direction
    pub direction: Vec3,
    /// Launch speed (m/s)
    pub speed: f32,
}

/// Pointer-to-world aim resolution against the plane `z = plane_z`.
#[derive(Debug, Clone)]
pub struct AimResolver {
    plane_z: f32,
    aim_point: Vec3,
}

impl AimResolver {
    /// Resolver whose initial aim point sits straight ahead of `camera`.
    pub fn new(plane_z: f32, camera: &ViewCamera) -> Self {
        Self {
            plane_z,
            aim_point: Vec3::new(camera.position.x, camera.position.y, plane_z),
        }
    }

    /// Resolve a pointer position and return the current aim point.
    ///
    /// If no valid intersection exists (empty viewport, ray parallel to the
    /// plane, plane behind the eye) the previous aim point is kept.
    pub fn resolve(
        &mut self,
        camera: &ViewCamera,
        viewport: Viewport,
        screen_x: f32,
        screen_y: f32,
    ) -> Vec3 {
        if let Some(point) = screen_ray(camera, screen_x, screen_y, viewport)
            .and_then(|ray| raycast_to_depth_plane(&ray, self.plane_z))
        {
            self.aim_point = point;
        }
        self.aim_point
    }

    /// Last valid aim point (also the aim-indicator position).
    pub fn aim_point(&self) -> Vec3 {
        self.aim_point
    }

    pub fn plane_z(&self) -> f32 {
        self.plane_z
    }

    pub fn reset(&mut self, camera: &ViewCamera) {
        *self = Self::new(self.plane_z, camera);
    }
}

/// Launch vector for a throw from `origin` toward `aim_point` after holding
/// the pointer for `held` seconds.
///
/// The aim direction gets a constant upward bias after normalization and is
/// renormalized, giving throws an arcade arc.
pub fn compose_launch(
    aim_point: Vec3,
    origin: Vec3,
    held: f32,
    config: &ThrowConfig,
) -> LaunchVector {
    let mut direction = (aim_point - origin).normalize_or(Vec3::NEG_Z);
    direction.y += config.upward_bias;
    let direction = direction.normalize_or(Vec3::NEG_Z);

    let charge = normalized_charge(
        held,
        config.charge_time_range.min,
        config.charge_time_range.max,
    );

    LaunchVector {
        direction,
        speed: config.speed_range.lerp(charge),
    }
}

/// Press/release state machine for charged throws.
#[derive(Debug, Clone)]
pub struct ThrowController {
    charge: ChargeState,
    config: ThrowConfig,
}

impl ThrowController {
    pub fn new(config: ThrowConfig) -> Self {
        Self {
            charge: ChargeState::new(),
            config,
        }
    }

    pub fn press(&mut self, time: f64) {
        self.charge.press(time);
    }

    /// Finish the charge and compose the throw. `None` if not charging.
    pub fn release(&mut self, time: f64, aim_point: Vec3, origin: Vec3) -> Option<LaunchVector> {
        let held = self.charge.release(time)?;
        Some(compose_launch(aim_point, origin, held, &self.config))
    }

    pub fn cancel(&mut self) {
        self.charge.cancel();
    }

    pub fn is_charging(&self) -> bool {
        self.charge.is_charging()
    }

    /// Charge-bar progress in [0, 1] at `now` (0 when idle).
    pub fn progress(&self, now: f64) -> f32 {
        self.charge.progress(now, self.config.charge_time_range.max)
    }

    pub fn config(&self) -> &ThrowConfig {
        &self.config
    }
}
