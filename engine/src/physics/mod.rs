//! Physics module
//!
//! Hand-written arcade physics for thrown projectiles. No physics engine
//! dependency: motion is a damped-gravity ballistic step, collisions are
//! AABB overlaps plus a continuous ground-plane crossing test.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, seconds for time, radians for angles.
//!
//! # Submodules
//!
//! - [`types`] - glam re-exports
//! - [`ballistics`] - damped-gravity integration of thrown bodies
//! - [`collision`] - AABB bounds, overlap and ground-plane intersection

pub mod ballistics;
pub mod collision;
pub mod types;

pub use ballistics::{BallisticBody, BallisticsConfig};
pub use collision::{Aabb, ground_impact_point, ground_intersection, segment_crosses_ground};
pub use types::{EulerRot, Quat, Vec3};
