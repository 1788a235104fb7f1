//! Render hand-off
//!
//! Rendering itself lives outside this crate. This module only defines what
//! the simulation publishes each frame: per-entity transforms keyed by a
//! stable slot reference.

pub mod transforms;

pub use transforms::{EntityRef, FrameTransforms, NullSink, RenderTransform, TransformSink};
