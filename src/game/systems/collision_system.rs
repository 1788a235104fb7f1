//! Projectile impact resolution.
//!
//! Runs once per frame after projectiles have moved. Each projectile in
//! flight ends at most one way:
//! 1. overlapping an alive target (first match in registry order)
//! 2. crossing the ground plane between its previous and current position
//! 3. flying past the despawn depth
//!
//! Target hits take precedence over ground crossings in the same frame.
//! The system only reports; scoring and effects are the caller's job.

use glam::Vec3;
use tracing::trace;

use crate::game::systems::projectile_system::ProjectileSystem;
use crate::game::systems::target_system::{TargetId, TargetSystem};
use crate::physics::{ground_impact_point, segment_crosses_ground};
use crate::pool::SlotId;

/// Terminal event of one projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactEvent {
    /// Projectile struck a target; `position` is the target's position.
    TargetHit {
        projectile: SlotId,
        target: TargetId,
        position: Vec3,
    },
    /// Projectile reached the ground plane at `position`.
    GroundHit { projectile: SlotId, position: Vec3 },
}

impl ImpactEvent {
    pub fn projectile(&self) -> SlotId {
        match *self {
            ImpactEvent::TargetHit { projectile, .. }
            | ImpactEvent::GroundHit { projectile, .. } => projectile,
        }
    }

    pub fn position(&self) -> Vec3 {
        match *self {
            ImpactEvent::TargetHit { position, .. } | ImpactEvent::GroundHit { position, .. } => {
                position
            }
        }
    }
}

/// Stateless collision pass over the projectile and target systems.
pub struct CollisionSystem;

impl CollisionSystem {
    /// Resolve every projectile in flight against targets, ground and depth.
    ///
    /// Hit targets are killed and terminated projectiles deactivated before
    /// returning, so a target can be struck by at most one projectile per
    /// frame. Events come back in projectile slot order.
    pub fn resolve(
        projectiles: &mut ProjectileSystem,
        targets: &mut TargetSystem,
        ground_y: f32,
    ) -> Vec<ImpactEvent> {
        let half_extents = projectiles.config().half_extents;
        let max_depth = projectiles.config().max_depth;
        let target_half = targets.config().half_extent;

        let mut events = Vec::new();

        for id in projectiles.active_ids() {
            let Some(projectile) = projectiles.get(id).copied() else {
                continue;
            };
            let bounds = projectile.bounds(half_extents);

            let struck = targets
                .alive()
                .find(|target| bounds.intersects(&target.bounds(target_half)))
                .map(|target| (target.id, target.position));

            if let Some((target, position)) = struck {
                targets.kill(target);
                projectiles.deactivate(id);
                events.push(ImpactEvent::TargetHit {
                    projectile: id,
                    target,
                    position,
                });
                continue;
            }

            let previous = projectile.previous_position();
            let current = projectile.position();
            if segment_crosses_ground(previous, current, ground_y) {
                projectiles.deactivate(id);
                events.push(ImpactEvent::GroundHit {
                    projectile: id,
                    position: ground_impact_point(previous, current, ground_y),
                });
                continue;
            }

            if current.z < -max_depth {
                trace!(projectile = id.index(), z = current.z, "projectile out of range");
                projectiles.deactivate(id);
            }
        }

        events
    }
}
