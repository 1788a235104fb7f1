//! Simulation State
//!
//! Central simulation context that owns every system and drives them once
//! per rendered frame. Pointer callbacks only touch aim and charge state and
//! queue finished throws; the frame tick is the single writer for pools.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use tracing::{info, trace, warn};

use crate::camera::{ViewCamera, Viewport};
use crate::game::config::SimConfig;
use crate::game::rng::DeterministicRng;
use crate::game::systems::{
    AimResolver, CollisionSystem, EffectKind, EffectSystem, ImpactEvent, LaunchVector,
    ProjectileSystem, TargetId, TargetSystem, ThrowController,
};
use crate::input::PointerEvent;
use crate::render::{EntityRef, RenderTransform, TransformSink};

/// Height above the ground at which impact rings are drawn
const RING_LIFT: f32 = 0.01;

/// Frame clock with a clamped step.
///
/// The first call yields `dt = 0`; afterwards `dt = clamp(now - last, 0, max_step)`.
/// `elapsed` is the sum of all steps, i.e. simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    last: Option<f64>,
    elapsed: f64,
    max_step: f32,
}

impl SimClock {
    pub fn new(max_step: f32) -> Self {
        Self {
            last: None,
            elapsed: 0.0,
            max_step,
        }
    }

    /// Advance to host timestamp `now` (seconds) and return the step.
    pub fn advance(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) if now.is_finite() => ((now - last) as f32).clamp(0.0, self.max_step),
            _ => 0.0,
        };
        if now.is_finite() {
            self.last = Some(now);
        }
        self.elapsed += dt as f64;
        dt
    }

    /// Simulated seconds since start or reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn last(&self) -> Option<f64> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.elapsed = 0.0;
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    /// Integrated step (seconds)
    pub dt: f32,
    /// Simulated time after this tick
    pub elapsed: f64,
    /// Impact events resolved this frame, in projectile slot order
    pub events: Vec<ImpactEvent>,
    /// Queued throws that got a projectile
    pub launched: usize,
    /// Queued throws dropped because the pool was full
    pub dropped_throws: usize,
    /// Score after this tick
    pub score: u64,
}

impl FrameReport {
    pub fn hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ImpactEvent::TargetHit { .. }))
            .count()
    }
}

/// The throwing game's simulation context.
pub struct Simulation {
    config: SimConfig,
    rng: DeterministicRng,
    clock: SimClock,

    // === View ===
    camera: ViewCamera,
    viewport: Viewport,

    // === Input ===
    aim: AimResolver,
    throws: ThrowController,
    /// Throws released since the last tick, launched in order at its start
    pending_throws: Vec<LaunchVector>,

    // === Systems ===
    projectiles: ProjectileSystem,
    targets: TargetSystem,
    effects: EffectSystem,

    // === Exposed to UI ===
    score: u64,
    charge_fraction: f32,
    frame: u64,
}

impl Simulation {
    /// Build a simulation and populate its targets from `seed`.
    ///
    /// A config that fails [`SimConfig::validate`] is replaced by the default.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(%err, "config rejected, using defaults");
                SimConfig::default()
            }
        };
        let mut rng = DeterministicRng::new(seed);
        let camera = config.camera;

        let mut targets = TargetSystem::new(config.target);
        targets.populate(&mut rng);

        info!(
            seed,
            pool_capacity = config.projectile.pool_capacity,
            targets = config.target.count,
            "simulation created"
        );

        Self {
            rng,
            clock: SimClock::new(config.clock.max_step),
            camera,
            viewport: Viewport::default(),
            aim: AimResolver::new(config.aim.plane_z, &camera),
            throws: ThrowController::new(config.throw),
            pending_throws: Vec::new(),
            projectiles: ProjectileSystem::new(config.projectile, config.ballistics),
            targets,
            effects: EffectSystem::new(config.effects),
            score: 0,
            charge_fraction: 0.0,
            frame: 0,
            config,
        }
    }

    /// Return to the freshly constructed state for the same seed.
    pub fn reset(&mut self) {
        self.rng.reseed();
        self.clock.reset();
        self.aim.reset(&self.camera);
        self.throws.cancel();
        self.pending_throws.clear();
        self.projectiles.clear();
        self.effects.clear();
        self.targets.reset(&mut self.rng);
        self.score = 0;
        self.charge_fraction = 0.0;
        self.frame = 0;

        info!(seed = self.rng.seed(), "simulation reset");
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_camera(&mut self, camera: ViewCamera) {
        self.camera = camera;
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Pointer pressed: aim and start charging.
    pub fn pointer_down(&mut self, x: f32, y: f32, time: f64) {
        self.aim.resolve(&self.camera, self.viewport, x, y);
        self.throws.press(time);
    }

    /// Pointer moved: re-aim.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.aim.resolve(&self.camera, self.viewport, x, y);
    }

    /// Pointer released: re-aim, compose the throw and queue it for the next tick.
    ///
    /// A release without a press is ignored.
    pub fn pointer_up(&mut self, x: f32, y: f32, time: f64) {
        let aim_point = self.aim.resolve(&self.camera, self.viewport, x, y);
        if let Some(launch) = self.throws.release(time, aim_point, self.camera.position) {
            self.pending_throws.push(launch);
        }
        self.charge_fraction = 0.0;
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y, time } => self.pointer_down(x, y, time),
            PointerEvent::Move { x, y } => self.pointer_move(x, y),
            PointerEvent::Up { x, y, time } => self.pointer_up(x, y, time),
        }
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Advance the whole simulation to host timestamp `now` (seconds).
    pub fn tick(&mut self, now: f64) -> FrameReport {
        let dt = self.clock.advance(now);
        let elapsed = self.clock.elapsed();
        self.frame += 1;

        self.targets.process_respawns(elapsed, &mut self.rng);
        let (launched, dropped_throws) = self.launch_pending(elapsed);

        // (a) charge bar
        self.charge_fraction = if self.throws.is_charging() {
            self.throws.progress(now)
        } else {
            0.0
        };

        // (b) idle motion
        self.targets.tick(dt);

        // (c) flight
        self.projectiles.step(dt);

        // (d) impacts
        let events = CollisionSystem::resolve(
            &mut self.projectiles,
            &mut self.targets,
            self.config.ground_y,
        );
        for event in &events {
            self.dispatch(event, elapsed);
        }

        // (e) effects; those spawned in (d) stay at elapsed = 0 this frame
        self.effects.tick(dt);

        FrameReport {
            dt,
            elapsed,
            events,
            launched,
            dropped_throws,
            score: self.score,
        }
    }

    /// Tick, then hand the frame's transforms to the renderer.
    pub fn frame(&mut self, now: f64, sink: &mut dyn TransformSink) -> FrameReport {
        let report = self.tick(now);
        self.publish(sink);
        report
    }

    /// Write one transform per pool slot plus the aim indicator.
    ///
    /// Inactive slots are written hidden so slot-indexed renderer arrays stay
    /// in sync with the pools. The sink is told a new frame begins first.
    pub fn publish(&self, sink: &mut dyn TransformSink) {
        sink.begin_frame();
        for (id, projectile, active) in self.projectiles.iter_slots() {
            let transform = if active {
                RenderTransform::new(
                    projectile.position(),
                    projectile.orientation(),
                    Vec3::ONE,
                    1.0,
                )
            } else {
                RenderTransform::hidden()
            };
            sink.write(EntityRef::Projectile(id.index()), transform);
        }

        for target in self.targets.iter() {
            let transform = if target.alive {
                RenderTransform::new(target.position, target.orientation(), Vec3::ONE, 1.0)
            } else {
                RenderTransform::hidden()
            };
            sink.write(EntityRef::Target(target.id.index()), transform);
        }

        let flat = Quat::from_rotation_x(-FRAC_PI_2);
        for (id, ring, active) in self.effects.iter_slots(EffectKind::Ring) {
            let transform = if active {
                let (scale, opacity) = self.effects.appearance(EffectKind::Ring, ring);
                let position = ring.position + Vec3::Y * RING_LIFT;
                RenderTransform::new(position, flat, Vec3::splat(scale), opacity)
            } else {
                RenderTransform::hidden()
            };
            sink.write(EntityRef::Ring(id.index()), transform);
        }

        for (id, pop, active) in self.effects.iter_slots(EffectKind::Pop) {
            let transform = if active {
                let (scale, opacity) = self.effects.appearance(EffectKind::Pop, pop);
                RenderTransform::new(pop.position, Quat::IDENTITY, Vec3::splat(scale), opacity)
            } else {
                RenderTransform::hidden()
            };
            sink.write(EntityRef::Pop(id.index()), transform);
        }

        sink.write(
            EntityRef::AimIndicator,
            RenderTransform::new(self.aim.aim_point(), Quat::IDENTITY, Vec3::ONE, 1.0),
        );
    }

    fn launch_pending(&mut self, now: f64) -> (usize, usize) {
        let origin = self.camera.position;
        let mut launched = 0;
        let mut dropped = 0;
        for launch in self.pending_throws.drain(..) {
            match self.projectiles.fire(origin, launch, now, &mut self.rng) {
                Some(_) => launched += 1,
                None => dropped += 1,
            }
        }
        (launched, dropped)
    }

    fn dispatch(&mut self, event: &ImpactEvent, now: f64) {
        trace!(?event, "impact");
        match *event {
            ImpactEvent::TargetHit { target, position, .. } => {
                self.score += self.config.target.hit_score;
                self.effects.spawn(EffectKind::Pop, position);
                self.targets
                    .schedule_respawn(target, now, self.config.target.respawn_delay);
            }
            ImpactEvent::GroundHit { position, .. } => {
                self.effects.spawn(EffectKind::Ring, position);
            }
        }
    }

    // ------------------------------------------------------------------
    // Scripted placement
    // ------------------------------------------------------------------

    /// Move a target's rest position.
    pub fn place_target(&mut self, id: TargetId, anchor: Vec3) -> bool {
        self.targets.place(id, anchor)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Total score; never decreases between resets.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Charge-bar fill in [0, 1], 0 when not charging.
    pub fn charge_fraction(&self) -> f32 {
        self.charge_fraction
    }

    pub fn is_charging(&self) -> bool {
        self.throws.is_charging()
    }

    /// Aim-indicator position.
    pub fn aim_point(&self) -> Vec3 {
        self.aim.aim_point()
    }

    pub fn pending_throws(&self) -> usize {
        self.pending_throws.len()
    }

    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }

    pub fn targets(&self) -> &TargetSystem {
        &self.targets
    }

    pub fn effects(&self) -> &EffectSystem {
        &self.effects
    }

    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
