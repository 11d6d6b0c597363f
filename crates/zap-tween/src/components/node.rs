use glam::{Quat, Vec3};

use crate::core::rotator::Rotator;
use crate::core::scene::NodeHandle;
use crate::core::transform::Transform;

/// What kind of scene object a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A free-standing object that may be parented to another object.
    Object,
    /// A sub-object attached to an owning node.
    Attached,
}

/// Which contact notifications a node's collider produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResponse {
    /// Blocking contacts.
    pub hit_events: bool,
    /// Begin-overlap contacts.
    pub overlap_events: bool,
}

impl CollisionResponse {
    pub const HIT: Self = Self { hit_events: true, overlap_events: false };
    pub const OVERLAP: Self = Self { hit_events: false, overlap_events: true };
    pub const ALL: Self = Self { hit_events: true, overlap_events: true };
}

/// Fat node: one struct covering objects and attached sub-objects.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Attach parent. Required for `Attached` nodes, set by `Scene::spawn_attached`.
    pub parent: Option<NodeHandle>,
    /// Transform relative to the parent, or to the world for roots.
    pub local: Transform,
    /// Collider settings. Nodes without one never produce contacts.
    pub collision: Option<CollisionResponse>,
}

impl Node {
    /// A root object at the origin.
    pub fn object() -> Self {
        Self::with_kind(NodeKind::Object)
    }

    /// A sub-object. Spawn it with `Scene::spawn_attached`.
    pub fn attached() -> Self {
        Self::with_kind(NodeKind::Attached)
    }

    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            local: Transform::IDENTITY,
            collision: None,
        }
    }

    // -- Builder pattern --

    pub fn with_location(mut self, location: Vec3) -> Self {
        self.local.location = location;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.local.rotation = rotation;
        self
    }

    pub fn with_rotator(mut self, rotator: Rotator) -> Self {
        self.local.rotation = rotator.to_quat();
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.local.scale = scale;
        self
    }

    pub fn with_collision(mut self, collision: CollisionResponse) -> Self {
        self.collision = Some(collision);
        self
    }

    pub fn generates_hits(&self) -> bool {
        self.collision.map_or(false, |c| c.hit_events)
    }

    pub fn generates_overlaps(&self) -> bool {
        self.collision.map_or(false, |c| c.overlap_events)
    }
}
