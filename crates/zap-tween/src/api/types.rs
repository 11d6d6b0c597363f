use glam::Vec3;
use slotmap::new_key_type;

use crate::core::scene::NodeHandle;

new_key_type! {
    /// Handle to a tween owned by a `TweenManager`.
    pub struct TweenId;
}

/// Identifier of a sequence inside a `TweenManager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceId(pub u32);

/// Kind of physical contact reported for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Blocking collision.
    Hit,
    /// Begin-overlap.
    Overlap,
}

/// A contact notification delivered by the physics side of the host.
/// Forwarded to tween listeners untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub kind: ContactKind,
    /// The node that was touched.
    pub node: NodeHandle,
    /// The node it touched, if known.
    pub other: Option<NodeHandle>,
    /// Contact point in world space.
    pub point: Vec3,
    /// Contact normal in world space.
    pub normal: Vec3,
}

impl ContactEvent {
    pub fn hit(node: NodeHandle, other: Option<NodeHandle>) -> Self {
        Self { kind: ContactKind::Hit, node, other, point: Vec3::ZERO, normal: Vec3::Z }
    }

    pub fn overlap(node: NodeHandle, other: Option<NodeHandle>) -> Self {
        Self { kind: ContactKind::Overlap, node, other, point: Vec3::ZERO, normal: Vec3::Z }
    }

    pub fn with_point(mut self, point: Vec3, normal: Vec3) -> Self {
        self.point = point;
        self.normal = normal;
        self
    }
}
