//! Projectile lifecycle management system.
//!
//! Owns the fixed-capacity pool of thrown projectiles and their ballistics
//! config, providing acquire / launch / step / deactivate / iterate
//! operations with zero renderer coupling. Collision is resolved elsewhere;
//! callers report terminal events back through [`ProjectileSystem::deactivate`].

use glam::{Quat, Vec3};
use tracing::debug;

use crate::game::config::ProjectileConfig;
use crate::game::rng::DeterministicRng;
use crate::game::systems::aim_system::LaunchVector;
use crate::physics::{Aabb, BallisticBody, BallisticsConfig};
use crate::pool::{SlotId, SlotPool};

/// One thrown projectile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projectile {
    /// Kinematic state
    pub body: BallisticBody,
    /// Simulated time at which it was acquired (seconds)
    pub spawn_time: f64,
}

impl Projectile {
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    #[inline]
    pub fn previous_position(&self) -> Vec3 {
        self.body.previous_position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    #[inline]
    pub fn spin(&self) -> Vec3 {
        self.body.spin
    }

    pub fn orientation(&self) -> Quat {
        self.body.orientation()
    }

    /// World bounds of the oriented projectile card.
    pub fn bounds(&self, half_extents: Vec3) -> Aabb {
        Aabb::from_oriented(self.body.position, half_extents, self.body.orientation())
    }
}

/// Manages the full lifecycle of thrown projectiles.
pub struct ProjectileSystem {
    pool: SlotPool<Projectile>,
    config: ProjectileConfig,
    ballistics: BallisticsConfig,
}

impl ProjectileSystem {
    pub fn new(config: ProjectileConfig, ballistics: BallisticsConfig) -> Self {
        Self {
            pool: SlotPool::with_capacity(config.pool_capacity),
            config,
            ballistics,
        }
    }

    /// Reserve a slot, reset to a resting projectile.
    ///
    /// Returns `None` when all `pool_capacity` slots are in flight; nothing
    /// is mutated in that case.
    pub fn acquire(&mut self, now: f64) -> Option<SlotId> {
        self.pool.acquire(Projectile {
            body: BallisticBody::default(),
            spawn_time: now,
        })
    }

    /// Put an acquired projectile in flight.
    ///
    /// Spawns at `origin + direction * spawn_offset`. Velocity is
    /// `direction * speed` plus a small random X/Y perturbation of up to
    /// `launch_spread * speed`; spin about X is drawn from `spin_range`.
    /// Returns `false` if `id` is not an active slot.
    pub fn launch(
        &mut self,
        id: SlotId,
        origin: Vec3,
        launch: LaunchVector,
        rng: &mut DeterministicRng,
    ) -> bool {
        let Some(projectile) = self.pool.get_mut(id) else {
            return false;
        };

        let direction = launch.direction.normalize_or(Vec3::NEG_Z);
        let position = origin + direction * self.config.spawn_offset;

        let jitter = launch.speed * self.config.launch_spread;
        let mut velocity = direction * launch.speed;
        velocity.x += rng.spread(jitter);
        velocity.y += rng.spread(jitter);

        let spin = Vec3::new(rng.in_range(self.config.spin_range), 0.0, 0.0);

        projectile.body = BallisticBody::launch(position, velocity, spin);
        true
    }

    /// Acquire and launch in one call. `None` if the pool is exhausted.
    pub fn fire(
        &mut self,
        origin: Vec3,
        launch: LaunchVector,
        now: f64,
        rng: &mut DeterministicRng,
    ) -> Option<SlotId> {
        let Some(id) = self.acquire(now) else {
            debug!(
                capacity = self.pool.capacity(),
                "projectile pool exhausted, throw dropped"
            );
            return None;
        };
        self.launch(id, origin, launch, rng);
        Some(id)
    }

    /// Integrate every projectile in flight by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let ballistics = self.ballistics;
        for (_, projectile) in self.pool.iter_active_mut() {
            projectile.body.step(&ballistics, dt);
        }
    }

    /// Take a projectile out of flight. Idempotent; returns `true` if it was active.
    pub fn deactivate(&mut self, id: SlotId) -> bool {
        self.pool.release(id)
    }

    /// Deactivate every projectile.
    pub fn clear(&mut self) {
        self.pool.release_all();
    }

    pub fn get(&self, id: SlotId) -> Option<&Projectile> {
        self.pool.get(id)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Projectile> {
        self.pool.get_mut(id)
    }

    pub fn is_active(&self, id: SlotId) -> bool {
        self.pool.is_active(id)
    }

    /// Iterate over projectiles in flight.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Projectile)> {
        self.pool.iter_active()
    }

    /// Iterate over every allocated slot with its active flag.
    pub fn iter_slots(&self) -> impl Iterator<Item = (SlotId, &Projectile, bool)> {
        self.pool.iter_slots()
    }

    pub fn active_ids(&self) -> Vec<SlotId> {
        self.pool.active_ids()
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Slots created so far (never exceeds capacity).
    pub fn allocated(&self) -> usize {
        self.pool.allocated()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    pub fn ballistics(&self) -> &BallisticsConfig {
        &self.ballistics
    }
}
