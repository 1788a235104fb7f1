//! Physics type re-exports from glam
//!
//! Core math types used by the ballistics and collision code. Rotations of
//! thrown projectiles are carried as XYZ Euler triples and converted with
//! [`EulerRot::XYZ`] when an orientation is needed.

pub use glam::{EulerRot, Mat3, Quat, Vec3};

/// Tolerance used to detect parallel rays/segments before dividing.
pub const PARALLEL_EPSILON: f32 = 1e-6;
