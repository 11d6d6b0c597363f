// tween/target.rs
//
// Target application layer: routes a computed value to the right accessor
// for the (target kind, write) pair. Targets are non-owning; every access
// checks liveness and the node kind first, and a miss is a no-op.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::error::TweenError;
use crate::components::node::NodeKind;
use crate::core::scene::{NodeHandle, Scene};

/// Which accessor family a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// A free-standing scene object.
    PrimaryObject,
    /// A sub-object attached to an owner.
    AttachedObject,
}

impl TargetKind {
    pub fn node_kind(self) -> NodeKind {
        match self {
            TargetKind::PrimaryObject => NodeKind::Object,
            TargetKind::AttachedObject => NodeKind::Attached,
        }
    }
}

/// Coordinate frame for absolute ("To") tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Space {
    #[default]
    World,
    /// Relative to the attach parent.
    Relative,
}

/// A node reference plus the accessor family to use on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenTarget {
    pub handle: NodeHandle,
    pub kind: TargetKind,
}

impl TweenTarget {
    pub fn object(handle: NodeHandle) -> Self {
        Self { handle, kind: TargetKind::PrimaryObject }
    }

    pub fn attached(handle: NodeHandle) -> Self {
        Self { handle, kind: TargetKind::AttachedObject }
    }

    /// Check the handle is alive and tagged with the right kind.
    pub fn validate(&self, scene: &Scene) -> Result<(), TweenError> {
        let found = scene.kind_of(self.handle).ok_or(TweenError::StaleTarget(self.handle))?;
        if found != self.kind.node_kind() {
            return Err(TweenError::TargetKindMismatch { expected: self.kind, found });
        }
        Ok(())
    }

    pub fn is_valid(&self, scene: &Scene) -> bool {
        self.validate(scene).is_ok()
    }
}

/// A single property write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetWrite {
    Rotation(Space, Quat),
    Location(Space, Vec3),
    Scale(Space, Vec3),
}

/// A single property read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRead {
    Rotation(Space),
    Location(Space),
    Scale(Space),
}

/// Value produced by a [`TargetRead`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetValue {
    Rotation(Quat),
    Vector(Vec3),
}

/// Apply `write` to the target. Returns `false` (and changes nothing) when
/// the target is gone or its tag does not match the node.
pub fn apply(scene: &mut Scene, target: TweenTarget, write: TargetWrite) -> bool {
    if let Err(err) = target.validate(scene) {
        log::trace!("apply skipped: {}", err);
        return false;
    }
    let h = target.handle;
    match (target.kind, write) {
        (TargetKind::PrimaryObject, TargetWrite::Rotation(Space::World, q))
        | (TargetKind::AttachedObject, TargetWrite::Rotation(Space::World, q)) => {
            scene.set_world_rotation(h, q)
        }
        (TargetKind::PrimaryObject, TargetWrite::Rotation(Space::Relative, q))
        | (TargetKind::AttachedObject, TargetWrite::Rotation(Space::Relative, q)) => {
            scene.set_relative_rotation(h, q)
        }
        (TargetKind::PrimaryObject, TargetWrite::Location(Space::World, v))
        | (TargetKind::AttachedObject, TargetWrite::Location(Space::World, v)) => {
            scene.set_world_location(h, v)
        }
        (TargetKind::PrimaryObject, TargetWrite::Location(Space::Relative, v))
        | (TargetKind::AttachedObject, TargetWrite::Location(Space::Relative, v)) => {
            scene.set_relative_location(h, v)
        }
        (TargetKind::PrimaryObject, TargetWrite::Scale(Space::World, v))
        | (TargetKind::AttachedObject, TargetWrite::Scale(Space::World, v)) => {
            scene.set_world_scale(h, v)
        }
        (TargetKind::PrimaryObject, TargetWrite::Scale(Space::Relative, v))
        | (TargetKind::AttachedObject, TargetWrite::Scale(Space::Relative, v)) => {
            scene.set_relative_scale(h, v)
        }
    }
}

/// Read a property from the target, with the same checks as [`apply`].
pub fn read(scene: &Scene, target: TweenTarget, what: TargetRead) -> Result<TargetValue, TweenError> {
    target.validate(scene)?;
    let h = target.handle;
    let value = match what {
        TargetRead::Rotation(Space::World) => scene.world_rotation(h).map(TargetValue::Rotation),
        TargetRead::Rotation(Space::Relative) => scene.relative_rotation(h).map(TargetValue::Rotation),
        TargetRead::Location(Space::World) => scene.world_location(h).map(TargetValue::Vector),
        TargetRead::Location(Space::Relative) => scene.relative_location(h).map(TargetValue::Vector),
        TargetRead::Scale(Space::World) => scene.world_scale(h).map(TargetValue::Vector),
        TargetRead::Scale(Space::Relative) => scene.relative_scale(h).map(TargetValue::Vector),
    };
    value.ok_or(TweenError::StaleTarget(h))
}

pub fn read_rotation(scene: &Scene, target: TweenTarget, space: Space) -> Result<Quat, TweenError> {
    match read(scene, target, TargetRead::Rotation(space))? {
        TargetValue::Rotation(q) => Ok(q),
        TargetValue::Vector(_) => Err(TweenError::StaleTarget(target.handle)),
    }
}

pub fn read_vector(scene: &Scene, target: TweenTarget, what: TargetRead) -> Result<Vec3, TweenError> {
    match read(scene, target, what)? {
        TargetValue::Vector(v) => Ok(v),
        TargetValue::Rotation(_) => Err(TweenError::StaleTarget(target.handle)),
    }
}
