//! Game systems: self-contained modules that own state and logic.

pub mod aim_system;
pub mod collision_system;
pub mod effect_system;
pub mod projectile_system;
pub mod target_system;

pub use aim_system::{AimResolver, LaunchVector, ThrowController, compose_launch};
pub use collision_system::{CollisionSystem, ImpactEvent};
pub use effect_system::{Effect, EffectCurve, EffectKind, EffectSystem};
pub use projectile_system::{Projectile, ProjectileSystem};
pub use target_system::{RespawnQueue, Target, TargetId, TargetSystem};
