//! Simulation Configuration
//!
//! Every tunable of the throwing game in one serde-friendly tree. Game
//! variants (faster throws, bigger pools, longer respawns) are different
//! `SimConfig` values, not different code paths. `Default` is the canonical
//! game.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::ViewCamera;
use crate::physics::BallisticsConfig;

/// Closed interval `[min, max]` of a scalar parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarRange {
    pub min: f32,
    pub max: f32,
}

impl ScalarRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Linear interpolation; `t` is clamped to [0, 1].
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t.clamp(0.0, 1.0)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Projectile pool and launch parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Maximum simultaneously live projectiles
    pub pool_capacity: usize,
    /// Spawn distance from the eye along the launch direction
    pub spawn_offset: f32,
    /// Local half extents of the projectile card
    pub half_extents: Vec3,
    /// Spin rate about X (rad/s), sampled per throw
    pub spin_range: ScalarRange,
    /// Random lateral velocity as a fraction of launch speed (X and Y)
    pub launch_spread: f32,
    /// Projectiles beyond `z < -max_depth` are despawned silently
    pub max_depth: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            pool_capacity: 16,
            spawn_offset: 0.25,
            half_extents: Vec3::new(0.3195, 0.4995, 0.005),
            spin_range: ScalarRange::new(8.0, 12.0),
            launch_spread: 0.007,
            max_depth: 180.0,
        }
    }
}

/// Charge-to-launch mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowConfig {
    /// Launch speed at minimum and full charge (m/s)
    pub speed_range: ScalarRange,
    /// Held time below `min` is a weakest throw, above `max` a full one (seconds)
    pub charge_time_range: ScalarRange,
    /// Added to the normalized aim direction's Y before renormalizing
    pub upward_bias: f32,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            speed_range: ScalarRange::new(12.0, 40.0),
            charge_time_range: ScalarRange::new(0.06, 0.9),
            upward_bias: 0.12,
        }
    }
}

/// Aim plane placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Depth of the plane the pointer ray is intersected with
    pub plane_z: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self { plane_z: -24.0 }
    }
}

/// Target placement, idle motion, respawn and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Targets created at start
    pub count: usize,
    /// Half size of the target cube
    pub half_extent: f32,
    /// Targets spawn with `|x| <= lateral_spread`
    pub lateral_spread: f32,
    /// Spawn height range above ground
    pub height_range: ScalarRange,
    /// Spawn distance ahead of the eye; placed at `z = -depth`
    pub depth_range: ScalarRange,
    /// Seconds a hit target stays down
    pub respawn_delay: f32,
    /// Lateral idle sway amplitude (meters)
    pub wobble_amplitude: f32,
    /// Idle sway angular frequency (rad/s)
    pub wobble_frequency: f32,
    /// Idle yaw rate (rad/s)
    pub spin_rate: f32,
    /// Hue change range applied on respawn (+-)
    pub hue_jitter: f32,
    /// Score awarded per hit
    pub hit_score: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            count: 12,
            half_extent: 0.4,
            lateral_spread: 7.0,
            height_range: ScalarRange::new(0.9, 2.1),
            depth_range: ScalarRange::new(12.0, 60.0),
            respawn_delay: 0.7,
            wobble_amplitude: 0.06,
            wobble_frequency: 2.0,
            spin_rate: 0.6,
            hue_jitter: 0.1,
            hit_score: 100,
        }
    }
}

/// Ring / pop effect timing and shape curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub ring_lifetime: f32,
    /// Extra scale reached at end of life (scale = 1 + p * growth)
    pub ring_growth: f32,
    /// Opacity at spawn, fading linearly to 0
    pub ring_opacity: f32,
    pub pop_lifetime: f32,
    pub pop_growth: f32,
    pub pop_opacity: f32,
    /// Upper bound on allocated slots per effect kind
    pub pool_limit: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            ring_lifetime: 0.45,
            ring_growth: 5.0,
            ring_opacity: 0.9,
            pop_lifetime: 0.35,
            pop_growth: 2.2,
            pop_opacity: 1.0,
            pool_limit: 64,
        }
    }
}

/// Frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Largest step a single frame may integrate (seconds)
    pub max_step: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { max_step: 0.033 }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub projectile: ProjectileConfig,
    pub ballistics: BallisticsConfig,
    pub throw: ThrowConfig,
    pub aim: AimConfig,
    pub camera: ViewCamera,
    pub target: TargetConfig,
    pub effects: EffectConfig,
    pub clock: ClockConfig,
    /// Height of the ground plane
    pub ground_y: f32,
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject configurations the simulation cannot run sensibly.
    ///
    /// Every scalar must be finite; infinities and NaN are rejected along
    /// with out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.projectile;
        check(p.pool_capacity > 0, "projectile.pool_capacity must be at least 1")?;
        check(non_negative(p.spawn_offset), "projectile.spawn_offset must be non-negative")?;
        check(
            p.half_extents.is_finite() && p.half_extents.min_element() >= 0.0,
            "projectile.half_extents must be non-negative",
        )?;
        check(p.spin_range.is_ordered(), "projectile.spin_range must have min <= max")?;
        check(
            (0.0..1.0).contains(&p.launch_spread),
            "projectile.launch_spread must be in [0, 1)",
        )?;
        check(positive(p.max_depth), "projectile.max_depth must be positive")?;

        let b = &self.ballistics;
        check(
            b.gravity_damping > 0.0 && b.gravity_damping <= 1.0,
            "ballistics.gravity_damping must be in (0, 1]",
        )?;
        check(b.gravity.is_finite(), "ballistics.gravity must be finite")?;

        let t = &self.throw;
        check(
            t.speed_range.is_ordered() && t.speed_range.min >= 0.0,
            "throw.speed_range must be non-negative with min <= max",
        )?;
        check(
            t.charge_time_range.is_ordered()
                && t.charge_time_range.min >= 0.0
                && t.charge_time_range.max > t.charge_time_range.min,
            "throw.charge_time_range must be non-negative with min < max",
        )?;
        check(t.upward_bias.is_finite(), "throw.upward_bias must be finite")?;

        check(self.aim.plane_z.is_finite(), "aim.plane_z must be finite")?;

        let c = &self.camera;
        check(
            c.position.is_finite() && c.yaw.is_finite() && c.pitch.is_finite(),
            "camera pose must be finite",
        )?;
        check(
            c.fov > 0.0 && c.fov < std::f32::consts::PI,
            "camera.fov must be in (0, pi)",
        )?;
        check(positive(c.near), "camera.near must be positive")?;

        let g = &self.target;
        check(positive(g.half_extent), "target.half_extent must be positive")?;
        check(non_negative(g.lateral_spread), "target.lateral_spread must be non-negative")?;
        check(g.height_range.is_ordered(), "target.height_range must have min <= max")?;
        check(
            g.depth_range.is_ordered() && g.depth_range.min > 0.0,
            "target.depth_range must be positive with min <= max",
        )?;
        check(non_negative(g.respawn_delay), "target.respawn_delay must be non-negative")?;
        check(
            non_negative(g.wobble_amplitude) && g.wobble_frequency.is_finite(),
            "target wobble must be finite with non-negative amplitude",
        )?;
        check(g.spin_rate.is_finite(), "target.spin_rate must be finite")?;
        check(non_negative(g.hue_jitter), "target.hue_jitter must be non-negative")?;

        let e = &self.effects;
        check(
            positive(e.ring_lifetime) && positive(e.pop_lifetime),
            "effect lifetimes must be positive",
        )?;
        check(
            non_negative(e.ring_growth) && non_negative(e.pop_growth),
            "effect growth must be non-negative",
        )?;
        check(
            (0.0..=1.0).contains(&e.ring_opacity) && (0.0..=1.0).contains(&e.pop_opacity),
            "effect opacity must be in [0, 1]",
        )?;

        check(positive(self.clock.max_step), "clock.max_step must be positive")?;
        check(self.ground_y.is_finite(), "ground_y must be finite")?;

        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn check(condition: bool, message: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading or saving a config.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
    /// Parsed values are out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.projectile.pool_capacity, 16);
        assert_eq!(config.throw.speed_range, ScalarRange::new(12.0, 40.0));
        assert_eq!(config.target.count, 12);
        assert_eq!(config.target.respawn_delay, 0.7);
        assert_eq!(config.aim.plane_z, -24.0);
        assert_eq!(config.clock.max_step, 0.033);
        assert_eq!(config.ground_y, 0.0);
    }

    #[test]
    fn test_scalar_range_lerp_clamps() {
        let range = ScalarRange::new(12.0, 40.0);
        assert_eq!(range.lerp(0.0), 12.0);
        assert_eq!(range.lerp(1.0), 40.0);
        assert_eq!(range.lerp(0.5), 26.0);
        assert_eq!(range.lerp(-3.0), 12.0);
        assert_eq!(range.lerp(7.0), 40.0);
        assert!(range.contains(20.0));
        assert_eq!(range.span(), 28.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(
            r#"{ "projectile": { "pool_capacity": 4 }, "target": { "count": 3 } }"#,
        )
        .unwrap();

        assert_eq!(config.projectile.pool_capacity, 4);
        assert_eq!(config.projectile.spawn_offset, 0.25);
        assert_eq!(config.target.count, 3);
        assert_eq!(config.target.hit_score, 100);
    }

    #[test]
    fn test_json_round_trip_preserves_config() {
        let mut config = SimConfig::default();
        config.throw.upward_bias = 0.2;
        config.camera.position = Vec3::new(0.0, 2.0, 1.0);

        let json = serde_json::to_string(&config).unwrap();
        let back = SimConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_rejects_zero_pool() {
        let err =
            SimConfig::from_json_str(r#"{ "projectile": { "pool_capacity": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("pool_capacity"));
    }

    #[test]
    fn test_rejects_inverted_charge_window() {
        let mut config = SimConfig::default();
        config.throw.charge_time_range = ScalarRange::new(0.9, 0.06);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_scalars() {
        let cases: [fn(&mut SimConfig); 11] = [
            |c| c.target.lateral_spread = f32::INFINITY,
            |c| c.projectile.spawn_offset = f32::NAN,
            |c| c.projectile.max_depth = f32::INFINITY,
            |c| c.target.respawn_delay = f32::INFINITY,
            |c| c.target.wobble_amplitude = f32::NAN,
            |c| c.target.wobble_frequency = f32::INFINITY,
            |c| c.target.spin_rate = f32::NEG_INFINITY,
            |c| c.target.hue_jitter = f32::INFINITY,
            |c| c.effects.ring_lifetime = f32::INFINITY,
            |c| c.effects.pop_lifetime = f32::NAN,
            |c| c.clock.max_step = f32::INFINITY,
        ];
        for (i, apply) in cases.iter().enumerate() {
            let mut config = SimConfig::default();
            apply(&mut config);
            assert!(config.validate().is_err(), "case {i} accepted");
        }
    }

    #[test]
    fn test_rejects_bad_damping() {
        let mut config = SimConfig::default();
        config.ballistics.gravity_damping = 1.5;
        assert!(config.validate().is_err());
        config.ballistics.gravity_damping = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("axe_toss_config_{}", std::process::id()));
        let path = dir.join("nested").join("config.json");

        let mut config = SimConfig::default();
        config.target.respawn_delay = 1.25;
        config.save(&path).unwrap();

        let loaded = SimConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SimConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
