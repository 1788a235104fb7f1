//! Raycast Module
//!
//! Screen-to-world ray construction for a perspective eye camera, and the
//! fixed depth-plane intersection used to turn a pointer position into an
//! aim point.
//!
//! Screen coordinates are pixels with (0,0) at the top-left corner. NDC is
//! (-1..1, -1..1) with +Y up.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::types::PARALLEL_EPSILON;

/// Pixel size of the drawable surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width / height, or `None` for an empty viewport.
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.width > 0.0 && self.height > 0.0).then(|| self.width / self.height)
    }
}

/// A world-space ray with normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// First-person perspective eye.
///
/// Yaw 0 / pitch 0 looks down -Z with +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewCamera {
    /// Eye position in world space
    pub position: Vec3,
    /// Rotation about world Y (radians, positive turns toward +X)
    pub yaw: f32,
    /// Elevation (radians, clamped to +-89 degrees)
    pub pitch: f32,
    /// Vertical field of view (radians)
    pub fov: f32,
    /// Near clip distance
    pub near: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: 70.0_f32.to_radians(),
            near: 0.1,
        }
    }
}

impl ViewCamera {
    const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

    pub fn with_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Set yaw and pitch, clamping pitch short of straight up/down.
    pub fn look(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    pub fn forward(&self) -> Vec3 {
        let pitch = self.pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        Vec3::new(
            self.yaw.sin() * pitch.cos(),
            pitch.sin(),
            -self.yaw.cos() * pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Ray from the eye through a point given in NDC.
    pub fn ray_through_ndc(&self, ndc: Vec2, aspect_ratio: f32) -> Ray {
        let half_fov = (self.fov * 0.5).tan();
        let direction = (self.forward()
            + self.right() * ndc.x * half_fov * aspect_ratio
            + self.up() * ndc.y * half_fov)
            .normalize();

        Ray {
            origin: self.position,
            direction,
        }
    }

    /// Project a world point to screen pixels.
    ///
    /// Returns `None` for points at or behind the near plane, or an empty viewport.
    pub fn world_to_screen(&self, point: Vec3, viewport: Viewport) -> Option<Vec2> {
        let aspect_ratio = viewport.aspect_ratio()?;
        let relative = point - self.position;
        let depth = relative.dot(self.forward());
        if depth <= self.near {
            return None;
        }

        let half_fov = (self.fov * 0.5).tan();
        let ndc_x = relative.dot(self.right()) / (depth * half_fov * aspect_ratio);
        let ndc_y = relative.dot(self.up()) / (depth * half_fov);

        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc_y) * 0.5 * viewport.height,
        ))
    }
}

/// Convert pixel coordinates to NDC.
///
/// Coordinates outside the viewport are clamped to its edges. Returns `None`
/// for an empty viewport.
pub fn screen_to_ndc(screen_x: f32, screen_y: f32, viewport: Viewport) -> Option<Vec2> {
    viewport.aspect_ratio()?;

    let x = sanitize(screen_x).clamp(0.0, viewport.width);
    let y = sanitize(screen_y).clamp(0.0, viewport.height);

    Some(Vec2::new(
        (x / viewport.width) * 2.0 - 1.0,
        -(y / viewport.height) * 2.0 + 1.0,
    ))
}

/// World ray from the camera through a screen pixel.
pub fn screen_ray(
    camera: &ViewCamera,
    screen_x: f32,
    screen_y: f32,
    viewport: Viewport,
) -> Option<Ray> {
    let ndc = screen_to_ndc(screen_x, screen_y, viewport)?;
    let aspect_ratio = viewport.aspect_ratio()?;
    Some(camera.ray_through_ndc(ndc, aspect_ratio))
}

/// Intersect a ray with the plane `z = plane_z`.
///
/// Returns `None` when the ray is parallel to the plane or the plane is
/// behind the ray origin.
pub fn raycast_to_depth_plane(ray: &Ray, plane_z: f32) -> Option<Vec3> {
    if ray.direction.z.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (plane_z - ray.origin.z) / ray.direction.z;
    if t < 0.0 {
        return None;
    }

    let mut hit = ray.at(t);
    hit.z = plane_z;
    Some(hit)
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}
