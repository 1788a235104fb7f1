//! Config Module
//!
//! Centralized configuration for the throwing game.

pub mod sim_config;

pub use sim_config::{
    AimConfig, ClockConfig, ConfigError, EffectConfig, ProjectileConfig, ScalarRange, SimConfig,
    TargetConfig, ThrowConfig,
};
