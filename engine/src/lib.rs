//! Axe Toss Engine Library
//!
//! Real-time simulation core of a first-person axe throwing game. The
//! engine half provides renderer-agnostic building blocks; the game half
//! (mounted from `src/game/`) wires them into a frame-driven simulation.
//!
//! # Modules
//!
//! - [`camera`] - Eye camera, viewport and screen-to-world rays
//! - [`input`] - Normalized pointer events and throw charging
//! - [`physics`] - Ballistic integration, AABB overlap, ground crossing
//! - [`pool`] - Free-list slot pool shared by every entity pool
//! - [`render`] - Per-frame transform hand-off to an external renderer
//! - [`game`] - Configuration, systems and the [`Simulation`] frame driver
//!
//! # Example
//!
//! ```ignore
//! use axe_toss_engine::{FrameTransforms, SimConfig, Simulation, Viewport};
//!
//! let mut sim = Simulation::new(SimConfig::default(), 42);
//! sim.set_viewport(Viewport::new(1280.0, 720.0));
//!
//! let mut frame = FrameTransforms::new();
//! sim.pointer_down(640.0, 360.0, 0.0);
//! sim.pointer_up(640.0, 360.0, 0.5);
//! let report = sim.frame(0.016, &mut frame);
//! println!("score {}", report.score);
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod pool;
pub mod render;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use camera::{Ray, ViewCamera, Viewport};
pub use game::{ConfigError, FrameReport, ImpactEvent, SimConfig, Simulation, TargetId};
pub use input::PointerEvent;
pub use pool::{SlotId, SlotPool};
pub use render::{EntityRef, FrameTransforms, NullSink, RenderTransform, TransformSink};

static_assertions::assert_impl_all!(Simulation: Send);
static_assertions::assert_eq_size!(RenderTransform, [u8; 48]);
