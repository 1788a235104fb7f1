//! Game Module
//!
//! The throwing game built on top of the engine: configuration, seeded
//! randomness, the gameplay systems and the simulation context that drives
//! them each frame.

pub mod config;
pub mod rng;
pub mod state;
pub mod systems;

pub use config::{ConfigError, SimConfig};
pub use rng::DeterministicRng;
pub use state::{FrameReport, SimClock, Simulation};
pub use systems::{
    AimResolver, CollisionSystem, EffectKind, EffectSystem, ImpactEvent, LaunchVector,
    ProjectileSystem, TargetId, TargetSystem, ThrowController, compose_launch,
};
