//! Renderer hand-off records
//!
//! The simulation never touches scene nodes. Once per frame it writes one
//! [`RenderTransform`] per pool slot into a [`TransformSink`]; the renderer
//! reads those before its own render pass. Records are keyed by
//! [`EntityRef`], whose slot index is stable for the life of the pool, so a
//! renderer can keep a parallel array of meshes.

use glam::{Quat, Vec3};

/// Which simulated entity a transform belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    /// Projectile pool slot
    Projectile(usize),
    /// Target registry index
    Target(usize),
    /// Ground-impact ring effect slot
    Ring(usize),
    /// Target-hit pop effect slot
    Pop(usize),
    /// Aim-point marker
    AimIndicator,
}

/// GPU-ready transform record.
///
/// Layout (48 bytes):
/// - offset 0:  position (vec3<f32>) = 12 bytes
/// - offset 12: opacity (f32) = 4 bytes
/// - offset 16: rotation (vec4<f32>, quaternion xyzw) = 16 bytes
/// - offset 32: scale (vec3<f32>) = 12 bytes
/// - offset 44: visible (u32, 0 or 1) = 4 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderTransform {
    pub position: [f32; 3],
    pub opacity: f32,
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub visible: u32,
}

const _: () = {
    assert!(
        std::mem::size_of::<RenderTransform>() == 48,
        "RenderTransform must be exactly 48 bytes for instance buffers"
    );
};

impl Default for RenderTransform {
    fn default() -> Self {
        Self::hidden()
    }
}

impl RenderTransform {
    /// Visible transform.
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3, opacity: f32) -> Self {
        Self {
            position: position.to_array(),
            opacity,
            rotation: rotation.to_array(),
            scale: scale.to_array(),
            visible: 1,
        }
    }

    /// Transform of an inactive slot.
    pub fn hidden() -> Self {
        Self {
            position: [0.0; 3],
            opacity: 0.0,
            rotation: Quat::IDENTITY.to_array(),
            scale: [1.0; 3],
            visible: 0,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible != 0
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_array(self.rotation)
    }

    pub fn scale(&self) -> Vec3 {
        Vec3::from_array(self.scale)
    }
}

/// Destination for per-frame transforms.
pub trait TransformSink {
    /// Called once before the first write of each published frame.
    fn begin_frame(&mut self) {}

    fn write(&mut self, entity: EntityRef, transform: RenderTransform);
}

/// Sink that keeps every record of the last published frame.
///
/// Starting a new frame drops the previous one, so a single instance can be
/// reused for the whole session.
#[derive(Debug, Clone, Default)]
pub struct FrameTransforms {
    entries: Vec<(EntityRef, RenderTransform)>,
}

impl FrameTransforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Latest transform written for `entity`.
    pub fn get(&self, entity: EntityRef) -> Option<&RenderTransform> {
        self.entries
            .iter()
            .rev()
            .find(|(e, _)| *e == entity)
            .map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(EntityRef, RenderTransform)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|(_, t)| t.is_visible()).count()
    }

    /// Raw bytes of all records in write order, for instance-buffer upload.
    pub fn transform_bytes(&self) -> Vec<u8> {
        let transforms: Vec<RenderTransform> = self.entries.iter().map(|(_, t)| *t).collect();
        bytemuck::cast_slice(&transforms).to_vec()
    }
}

impl TransformSink for FrameTransforms {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn write(&mut self, entity: EntityRef, transform: RenderTransform) {
        self.entries.push((entity, transform));
    }
}

/// Sink that discards everything (headless runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TransformSink for NullSink {
    fn write(&mut self, _entity: EntityRef, _transform: RenderTransform) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_transform() {
        let t = RenderTransform::hidden();
        assert!(!t.is_visible());
        assert_eq!(t.rotation(), Quat::IDENTITY);
        assert_eq!(RenderTransform::default(), t);
    }

    #[test]
    fn test_new_round_trips_fields() {
        let rotation = Quat::from_rotation_y(0.5);
        let t = RenderTransform::new(Vec3::new(1.0, 2.0, 3.0), rotation, Vec3::splat(2.0), 0.25);

        assert!(t.is_visible());
        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.rotation(), rotation);
        assert_eq!(t.scale(), Vec3::splat(2.0));
        assert_eq!(t.opacity, 0.25);
    }

    #[test]
    fn test_bytemuck_layout() {
        let t = RenderTransform::new(Vec3::ONE, Quat::IDENTITY, Vec3::ONE, 1.0);
        let bytes: &[u8] = bytemuck::bytes_of(&t);
        assert_eq!(bytes.len(), 48);

        let back: &RenderTransform = bytemuck::from_bytes(bytes);
        assert_eq!(*back, t);
    }

    #[test]
    fn test_frame_transforms_latest_write_wins() {
        let mut frame = FrameTransforms::new();
        frame.write(EntityRef::Target(0), RenderTransform::hidden());
        frame.write(
            EntityRef::Target(0),
            RenderTransform::new(Vec3::X, Quat::IDENTITY, Vec3::ONE, 1.0),
        );

        assert_eq!(frame.len(), 2);
        assert!(frame.get(EntityRef::Target(0)).unwrap().is_visible());
        assert!(frame.get(EntityRef::Target(1)).is_none());
        assert_eq!(frame.visible_count(), 1);
        assert_eq!(frame.transform_bytes().len(), 96);
    }

    #[test]
    fn test_begin_frame_drops_previous_records() {
        let mut frame = FrameTransforms::new();
        frame.write(EntityRef::Projectile(0), RenderTransform::hidden());
        frame.write(EntityRef::AimIndicator, RenderTransform::hidden());

        frame.begin_frame();
        assert!(frame.is_empty());
        frame.write(EntityRef::AimIndicator, RenderTransform::hidden());
        assert_eq!(frame.len(), 1);
    }
}
