// core/transform.rs
//
// Local transform of a scene node and the parent/child composition math.
// World values are derived by walking the parent chain in Scene.

use glam::{Quat, Vec3};

use super::rotator::Rotator;

/// Location, rotation and scale relative to a parent (or to the world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        location: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: Vec3) -> Self {
        self.location = location;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_rotator(mut self, rotator: Rotator) -> Self {
        self.rotation = rotator.to_quat();
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// World transform of a child whose local transform is `local`,
    /// given that `self` is the parent's world transform.
    ///
    /// Scale is treated per-axis without shear.
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            location: self.location + self.rotation * (self.scale * local.location),
            rotation: (self.rotation * local.rotation).normalize(),
            scale: self.scale * local.scale,
        }
    }

    /// Express a world-space location in this (parent) frame.
    pub fn inverse_location(&self, world: Vec3) -> Vec3 {
        let unrotated = self.rotation.inverse() * (world - self.location);
        safe_div(unrotated, self.scale)
    }

    /// Express a world-space rotation in this (parent) frame.
    pub fn inverse_rotation(&self, world: Quat) -> Quat {
        (self.rotation.inverse() * world).normalize()
    }

    /// Express a world-space scale in this (parent) frame.
    pub fn inverse_scale(&self, world: Vec3) -> Vec3 {
        safe_div(world, self.scale)
    }
}

// Zero components of the divisor leave the value untouched instead of producing inf.
fn safe_div(v: Vec3, by: Vec3) -> Vec3 {
    Vec3::new(
        if by.x != 0.0 { v.x / by.x } else { v.x },
        if by.y != 0.0 { v.y / by.y } else { v.y },
        if by.z != 0.0 { v.z / by.z } else { v.z },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_offsets_by_parent() {
        let parent = Transform::new().with_location(Vec3::new(100.0, 100.0, 0.0));
        let child = Transform::new().with_location(Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(parent.compose(&child).location, Vec3::new(150.0, 100.0, 0.0));
    }

    #[test]
    fn compose_rotates_child_offset() {
        let parent = Transform::new().with_rotator(Rotator::yaw(90.0));
        let child = Transform::new().with_location(Vec3::X);
        let world = parent.compose(&child);
        assert!((world.location - Vec3::Y).length() < 1e-5, "got {:?}", world.location);
    }

    #[test]
    fn inverse_undoes_compose() {
        let parent = Transform::new()
            .with_location(Vec3::new(3.0, -2.0, 1.0))
            .with_rotator(Rotator::new(20.0, 35.0, 10.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        let local = Transform::new()
            .with_location(Vec3::new(1.0, 4.0, -2.0))
            .with_rotator(Rotator::yaw(-60.0));
        let world = parent.compose(&local);

        assert!((parent.inverse_location(world.location) - local.location).length() < 1e-4);
        assert!(parent.inverse_rotation(world.rotation).angle_between(local.rotation) < 1e-3);
    }
}
