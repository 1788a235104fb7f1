//! Transient impact effects.
//!
//! Two pooled effect kinds, both purely time-driven: an expanding ground
//! ring where a projectile lands and a growing pop where a target was hit.
//! Scale and opacity are pure functions of `elapsed / lifetime`; an effect
//! deactivates itself when its lifetime is used up.

use glam::Vec3;
use tracing::debug;

use crate::game::config::EffectConfig;
use crate::pool::{SlotId, SlotPool};

/// Which effect pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Expanding flat ring at a ground impact
    Ring,
    /// Growing sphere at a target hit
    Pop,
}

/// One running effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub position: Vec3,
    /// Seconds since spawn, never above `lifetime`
    pub elapsed: f32,
    pub lifetime: f32,
    /// Spawned this frame; skipped by the next advance
    fresh: bool,
}

impl Effect {
    /// Normalized age in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.lifetime).clamp(0.0, 1.0)
    }
}

/// Visual curve of one effect kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectCurve {
    pub lifetime: f32,
    pub growth: f32,
    pub opacity: f32,
}

impl EffectCurve {
    /// Uniform scale: 1 at spawn, `1 + growth` at end of life.
    pub fn scale(&self, progress: f32) -> f32 {
        1.0 + progress.clamp(0.0, 1.0) * self.growth
    }

    /// Opacity: full at spawn, fading linearly to 0.
    pub fn opacity(&self, progress: f32) -> f32 {
        self.opacity * (1.0 - progress.clamp(0.0, 1.0))
    }
}

/// Manages the ring and pop effect pools.
pub struct EffectSystem {
    rings: SlotPool<Effect>,
    pops: SlotPool<Effect>,
    config: EffectConfig,
}

impl EffectSystem {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            rings: SlotPool::with_capacity(config.pool_limit),
            pops: SlotPool::with_capacity(config.pool_limit),
            config,
        }
    }

    /// Start an effect at `position`, reusing an idle slot or growing the pool.
    ///
    /// Returns `None` (and drops the effect) once the pool limit is reached.
    pub fn spawn(&mut self, kind: EffectKind, position: Vec3) -> Option<SlotId> {
        let lifetime = self.curve(kind).lifetime;
        let effect = Effect {
            position,
            elapsed: 0.0,
            lifetime,
            fresh: true,
        };

        let id = self.pool_mut(kind).acquire(effect);
        if id.is_none() {
            debug!(?kind, limit = self.config.pool_limit, "effect pool full, effect dropped");
        }
        id
    }

    /// Advance every running effect, expiring those that reach their lifetime.
    ///
    /// Effects spawned since the last advance are left at `elapsed = 0` so
    /// they are drawn once at their starting size.
    pub fn tick(&mut self, dt: f32) {
        Self::advance(&mut self.rings, dt);
        Self::advance(&mut self.pops, dt);
    }

    fn advance(pool: &mut SlotPool<Effect>, dt: f32) {
        let mut expired = Vec::new();
        for (id, effect) in pool.iter_active_mut() {
            if effect.fresh {
                effect.fresh = false;
                continue;
            }
            effect.elapsed = (effect.elapsed + dt).min(effect.lifetime);
            if effect.elapsed >= effect.lifetime {
                expired.push(id);
            }
        }
        for id in expired {
            pool.release(id);
        }
    }

    /// Shape curve of a kind.
    pub fn curve(&self, kind: EffectKind) -> EffectCurve {
        match kind {
            EffectKind::Ring => EffectCurve {
                lifetime: self.config.ring_lifetime,
                growth: self.config.ring_growth,
                opacity: self.config.ring_opacity,
            },
            EffectKind::Pop => EffectCurve {
                lifetime: self.config.pop_lifetime,
                growth: self.config.pop_growth,
                opacity: self.config.pop_opacity,
            },
        }
    }

    /// Current (scale, opacity) of an effect of `kind`.
    pub fn appearance(&self, kind: EffectKind, effect: &Effect) -> (f32, f32) {
        let curve = self.curve(kind);
        let progress = effect.progress();
        (curve.scale(progress), curve.opacity(progress))
    }

    pub fn get(&self, kind: EffectKind, id: SlotId) -> Option<&Effect> {
        self.pool(kind).get(id)
    }

    /// Running effects of one kind.
    pub fn iter(&self, kind: EffectKind) -> impl Iterator<Item = (SlotId, &Effect)> {
        self.pool(kind).iter_active()
    }

    /// Every allocated slot of one kind with its active flag.
    pub fn iter_slots(&self, kind: EffectKind) -> impl Iterator<Item = (SlotId, &Effect, bool)> {
        self.pool(kind).iter_slots()
    }

    pub fn active_count(&self, kind: EffectKind) -> usize {
        self.pool(kind).active_count()
    }

    pub fn allocated(&self, kind: EffectKind) -> usize {
        self.pool(kind).allocated()
    }

    pub fn clear(&mut self) {
        self.rings.release_all();
        self.pops.release_all();
    }

    fn pool(&self, kind: EffectKind) -> &SlotPool<Effect> {
        match kind {
            EffectKind::Ring => &self.rings,
            EffectKind::Pop => &self.pops,
        }
    }

    fn pool_mut(&mut self, kind: EffectKind) -> &mut SlotPool<Effect> {
        match kind {
            EffectKind::Ring => &mut self.rings,
            EffectKind::Pop => &mut self.pops,
        }
    }
}
