//! Target registry system.
//!
//! Owns the fixed set of target crates, their placement policy, idle motion
//! and the deferred respawn queue. A hit target goes down immediately and is
//! brought back by [`TargetSystem::process_respawns`] once its due time has
//! passed on the simulation clock. Respawns are never applied synchronously
//! with the hit.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use tracing::debug;

use crate::game::config::TargetConfig;
use crate::game::rng::DeterministicRng;
use crate::physics::Aabb;

/// Stable index of a target in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

impl TargetId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One target crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: TargetId,
    /// Only alive targets are collided, animated and drawn
    pub alive: bool,
    /// Rest position the idle sway oscillates around
    pub anchor: Vec3,
    /// Current position (anchor + sway)
    pub position: Vec3,
    /// Idle-motion phase time (seconds)
    pub phase: f32,
    /// Rotation about Y (radians)
    pub yaw: f32,
    /// Appearance hue in [0, 1)
    pub hue: f32,
}

impl Target {
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// World bounds of the yawed cube.
    pub fn bounds(&self, half_extent: f32) -> Aabb {
        Aabb::from_oriented(self.position, Vec3::splat(half_extent), self.orientation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledRespawn {
    target: TargetId,
    due: f64,
}

/// Pending respawns keyed by target and due time.
#[derive(Debug, Clone, Default)]
pub struct RespawnQueue {
    entries: Vec<ScheduledRespawn>,
}

impl RespawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `target` for `due`, replacing any earlier entry for it.
    pub fn schedule(&mut self, target: TargetId, due: f64) {
        self.entries.retain(|entry| entry.target != target);
        self.entries.push(ScheduledRespawn { target, due });
    }

    /// Remove and return every entry with `due <= now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<TargetId> {
        let mut due: Vec<ScheduledRespawn> = Vec::new();
        self.entries.retain(|entry| {
            if entry.due <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.target.cmp(&b.target)));
        due.into_iter().map(|entry| entry.target).collect()
    }

    /// Drop a pending respawn. Returns `true` if one existed.
    pub fn cancel(&mut self, target: TargetId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.target != target);
        self.entries.len() != before
    }

    /// Due time of a pending respawn for `target`.
    pub fn pending(&self, target: TargetId) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.target == target)
            .map(|entry| entry.due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Manages target placement, idle motion and respawn.
pub struct TargetSystem {
    targets: Vec<Target>,
    respawns: RespawnQueue,
    config: TargetConfig,
}

impl TargetSystem {
    /// Empty registry; call [`populate`](Self::populate) to create targets.
    pub fn new(config: TargetConfig) -> Self {
        Self {
            targets: Vec::with_capacity(config.count),
            respawns: RespawnQueue::new(),
            config,
        }
    }

    /// Create the configured initial set of targets.
    pub fn populate(&mut self, rng: &mut DeterministicRng) {
        for _ in 0..self.config.count {
            self.spawn(rng);
        }
    }

    /// Create a new alive target at a random position.
    pub fn spawn(&mut self, rng: &mut DeterministicRng) -> TargetId {
        let id = TargetId(self.targets.len());
        let mut target = Target {
            id,
            alive: true,
            anchor: Vec3::ZERO,
            position: Vec3::ZERO,
            phase: 0.0,
            yaw: 0.0,
            hue: rng.unit(),
        };
        self.randomize(&mut target, rng);
        self.targets.push(target);
        id
    }

    /// Bring a target back at a new random position with a nudged hue.
    ///
    /// Clears any pending respawn. Collision applies again immediately.
    pub fn respawn(&mut self, id: TargetId, rng: &mut DeterministicRng) -> bool {
        let config = self.config;
        let Some(target) = self.targets.get_mut(id.0) else {
            return false;
        };

        let mut fresh = *target;
        fresh.hue = (fresh.hue + rng.spread(config.hue_jitter)).rem_euclid(1.0);
        Self::randomize_with(&config, &mut fresh, rng);
        *target = fresh;

        self.respawns.cancel(id);
        debug!(target = id.0, position = ?fresh.position, "target respawned");
        true
    }

    /// Take a target down. Returns `true` on the alive -> dead transition.
    pub fn kill(&mut self, id: TargetId) -> bool {
        match self.targets.get_mut(id.0) {
            Some(target) if target.alive => {
                target.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Queue a respawn `delay` seconds after `now` (simulation time).
    pub fn schedule_respawn(&mut self, id: TargetId, now: f64, delay: f32) {
        if id.0 < self.targets.len() {
            self.respawns.schedule(id, now + delay.max(0.0) as f64);
        }
    }

    /// Respawn every target whose due time has passed. Returns the ids revived.
    pub fn process_respawns(&mut self, now: f64, rng: &mut DeterministicRng) -> Vec<TargetId> {
        let due = self.respawns.drain_due(now);
        for &id in &due {
            self.respawn(id, rng);
        }
        due
    }

    /// Advance idle sway and spin of alive targets.
    ///
    /// Sway is `anchor.x + amplitude * sin(frequency * phase)`, so a target
    /// never drifts further than the amplitude from its anchor.
    pub fn tick(&mut self, dt: f32) {
        let config = self.config;
        for target in self.targets.iter_mut().filter(|t| t.alive) {
            target.phase += dt;
            target.position = Self::swayed(&config, target.anchor, target.phase);
            target.yaw = (target.yaw + config.spin_rate * dt).rem_euclid(TAU);
        }
    }

    /// Move a target's anchor (host placement, scripted scenes).
    pub fn place(&mut self, id: TargetId, anchor: Vec3) -> bool {
        let config = self.config;
        let Some(target) = self.targets.get_mut(id.0) else {
            return false;
        };
        target.anchor = anchor;
        target.position = Self::swayed(&config, anchor, target.phase);
        true
    }

    /// Kill every target and respawn them all fresh, clearing the queue.
    pub fn reset(&mut self, rng: &mut DeterministicRng) {
        self.targets.clear();
        self.respawns.clear();
        self.populate(rng);
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn respawn_queue(&self) -> &RespawnQueue {
        &self.respawns
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    fn randomize(&self, target: &mut Target, rng: &mut DeterministicRng) {
        Self::randomize_with(&self.config, target, rng);
    }

    fn randomize_with(config: &TargetConfig, target: &mut Target, rng: &mut DeterministicRng) {
        target.anchor = Vec3::new(
            rng.spread(config.lateral_spread),
            rng.in_range(config.height_range),
            -rng.in_range(config.depth_range),
        );
        target.phase = rng.range(0.0, TAU);
        target.yaw = 0.0;
        target.alive = true;
        target.position = Self::swayed(config, target.anchor, target.phase);
    }

    fn swayed(config: &TargetConfig, anchor: Vec3, phase: f32) -> Vec3 {
        let sway = config.wobble_amplitude * (config.wobble_frequency * phase).sin();
        Vec3::new(anchor.x + sway, anchor.y, anchor.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(seed: u64) -> (TargetSystem, DeterministicRng) {
        let mut rng = DeterministicRng::new(seed);
        let mut targets = TargetSystem::new(TargetConfig::default());
        targets.populate(&mut rng);
        (targets, rng)
    }

    #[test]
    fn test_populate_creates_configured_count_in_range() {
        let (targets, _) = populated(11);
        let config = TargetConfig::default();

        assert_eq!(targets.len(), 12);
        assert_eq!(targets.alive_count(), 12);
        for target in targets.iter() {
            assert!(target.anchor.x.abs() <= config.lateral_spread);
            assert!(config.height_range.contains(target.anchor.y));
            assert!(target.anchor.z <= -config.depth_range.min);
            assert!(target.anchor.z >= -config.depth_range.max);
            assert!((0.0..1.0).contains(&target.hue));
        }
    }

    #[test]
    fn test_kill_transitions_once() {
        let (mut targets, _) = populated(1);
        assert!(targets.kill(TargetId(3)));
        assert!(!targets.kill(TargetId(3)));
        assert!(!targets.get(TargetId(3)).unwrap().alive);
        assert!(!targets.kill(TargetId(99)));
    }

    #[test]
    fn test_tick_moves_only_alive_within_amplitude() {
        let (mut targets, _) = populated(2);
        targets.kill(TargetId(0));
        let frozen = *targets.get(TargetId(0)).unwrap();

        for _ in 0..200 {
            targets.tick(0.016);
        }

        assert_eq!(*targets.get(TargetId(0)).unwrap(), frozen);
        for target in targets.alive() {
            assert!((target.position.x - target.anchor.x).abs() <= 0.06 + 1e-6);
            assert_eq!(target.position.y, target.anchor.y);
            assert_eq!(target.position.z, target.anchor.z);
            assert!(target.yaw > 0.0);
        }
    }

    #[test]
    fn test_respawn_waits_for_due_time() {
        let (mut targets, mut rng) = populated(4);
        let id = TargetId(5);
        targets.kill(id);
        targets.schedule_respawn(id, 10.0, 0.7);

        assert_eq!(targets.respawn_queue().pending(id), Some(10.0 + 0.7_f32 as f64));
        assert!(targets.process_respawns(10.5, &mut rng).is_empty());
        assert!(!targets.get(id).unwrap().alive);

        let revived = targets.process_respawns(10.7, &mut rng);
        assert_eq!(revived, vec![id]);
        assert!(targets.get(id).unwrap().alive);
        assert!(targets.respawn_queue().is_empty());
    }

    #[test]
    fn test_respawn_moves_target_and_nudges_hue() {
        let (mut targets, mut rng) = populated(6);
        let id = TargetId(0);
        let before = *targets.get(id).unwrap();
        targets.kill(id);
        assert!(targets.respawn(id, &mut rng));

        let after = *targets.get(id).unwrap();
        assert!(after.alive);
        assert_ne!(after.anchor, before.anchor);
        let hue_delta = (after.hue - before.hue).abs();
        assert!(hue_delta <= 0.1 + 1e-6 || hue_delta >= 0.9 - 1e-6);
    }

    #[test]
    fn test_queue_drains_in_due_order() {
        let mut queue = RespawnQueue::new();
        queue.schedule(TargetId(2), 3.0);
        queue.schedule(TargetId(1), 1.0);
        queue.schedule(TargetId(0), 2.0);
        queue.schedule(TargetId(4), 9.0);

        assert_eq!(queue.drain_due(5.0), vec![TargetId(1), TargetId(0), TargetId(2)]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_queue_reschedule_replaces() {
        let mut queue = RespawnQueue::new();
        queue.schedule(TargetId(1), 1.0);
        queue.schedule(TargetId(1), 4.0);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pending(TargetId(1)), Some(4.0));
    }

    #[test]
    fn test_manual_respawn_cancels_pending() {
        let (mut targets, mut rng) = populated(12);
        targets.kill(TargetId(2));
        targets.schedule_respawn(TargetId(2), 0.0, 0.7);
        targets.respawn(TargetId(2), &mut rng);

        assert!(targets.respawn_queue().pending(TargetId(2)).is_none());
        assert!(targets.process_respawns(5.0, &mut rng).is_empty());
    }

    #[test]
    fn test_place_sets_anchor() {
        let (mut targets, _) = populated(8);
        let anchor = Vec3::new(0.0, 1.0, -10.0);
        assert!(targets.place(TargetId(0), anchor));

        let target = targets.get(TargetId(0)).unwrap();
        assert_eq!(target.anchor, anchor);
        assert!((target.position - anchor).length() <= 0.06 + 1e-6);
    }

    #[test]
    fn test_bounds_cover_cube() {
        let target = Target {
            id: TargetId(0),
            alive: true,
            anchor: Vec3::ZERO,
            position: Vec3::new(0.0, 1.0, -10.0),
            phase: 0.0,
            yaw: 0.0,
            hue: 0.0,
        };
        let bounds = target.bounds(0.4);
        assert!(bounds.contains_point(Vec3::new(0.4, 1.4, -10.4)));
        assert!(!bounds.contains_point(Vec3::new(0.5, 1.0, -10.0)));
    }

    #[test]
    fn test_reset_restores_all_targets() {
        let (mut targets, mut rng) = populated(3);
        targets.kill(TargetId(1));
        targets.schedule_respawn(TargetId(1), 0.0, 0.7);
        targets.reset(&mut rng);

        assert_eq!(targets.len(), 12);
        assert_eq!(targets.alive_count(), 12);
        assert!(targets.respawn_queue().is_empty());
    }
}
