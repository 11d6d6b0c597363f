// tween/rotation.rs
//
// Rotation strategy: absolute "To" tweens slerp between two orientations,
// relative "By" tweens blend a per-axis delta and compose it onto the
// orientation the target had when the tween started.

use glam::Quat;
use serde::{Deserialize, Serialize};

use crate::api::error::TweenError;
use crate::core::rotator::{slerp_full_path, RotationValue, Rotator};
use crate::core::scene::Scene;

use super::property::TweenProperty;
use super::target::{self, Space, TargetWrite, TweenTarget};
use super::tween::Tween;

/// Absolute or relative rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotateMode {
    /// Interpolate toward an absolute orientation.
    #[default]
    RotateTo,
    /// Apply a delta on top of the starting orientation.
    RotateBy,
}

/// Which arc a `RotateTo` slerp travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationPath {
    /// The shorter of the two arcs.
    #[default]
    ShortestPath,
    /// The arc described by the quaternion signs, possibly the long one.
    FullPath,
}

/// Where the start value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RotationFrom {
    /// `RotateTo`: the target's rotation in the tween's space when it starts.
    /// `RotateBy`: a zero delta.
    #[default]
    Current,
    /// A fixed start value.
    Explicit(Rotator),
}

/// Rotation tween strategy.
#[derive(Debug, Clone)]
pub struct RotationProperty {
    mode: RotateMode,
    /// `RotateTo` only.
    space: Space,
    /// `RotateTo` only.
    path: RotationPath,
    /// `RotateBy` only.
    local_space: bool,
    from_policy: RotationFrom,
    from: RotationValue,
    to: RotationValue,
    /// Target's relative rotation when a `RotateBy` tween started.
    base_offset: Option<Quat>,
}

/// A tween animating rotation.
pub type RotationTween = Tween<RotationProperty>;

impl RotationProperty {
    /// Absolute rotation toward `to`.
    pub fn rotate_to(to: Rotator, space: Space, path: RotationPath) -> Self {
        Self {
            mode: RotateMode::RotateTo,
            space,
            path,
            local_space: false,
            from_policy: RotationFrom::Current,
            from: RotationValue::IDENTITY,
            to: RotationValue::from_rotator(to),
            base_offset: None,
        }
    }

    /// Relative rotation by `delta`, optionally in the target's own frame.
    pub fn rotate_by(delta: Rotator, local_space: bool) -> Self {
        Self {
            mode: RotateMode::RotateBy,
            space: Space::Relative,
            path: RotationPath::ShortestPath,
            local_space,
            from_policy: RotationFrom::Current,
            from: RotationValue::IDENTITY,
            to: RotationValue::from_rotator(delta),
            base_offset: None,
        }
    }

    pub fn with_from(mut self, from: RotationFrom) -> Self {
        self.from_policy = from;
        if let RotationFrom::Explicit(r) = from {
            self.from = RotationValue::from_rotator(r);
        }
        self
    }

    pub fn mode(&self) -> RotateMode {
        self.mode
    }

    pub fn space(&self) -> Space {
        self.space
    }

    pub fn path(&self) -> RotationPath {
        self.path
    }

    pub fn local_space(&self) -> bool {
        self.local_space
    }

    pub fn from(&self) -> RotationValue {
        self.from
    }

    pub fn to(&self) -> RotationValue {
        self.to
    }

    pub fn base_offset(&self) -> Option<Quat> {
        self.base_offset
    }

    /// Relative rotation a `RotateBy` sample resolves to.
    pub fn compose_delta(&self, delta: Quat) -> Option<Quat> {
        let base = self.base_offset?;
        let delta = if self.local_space {
            // Re-express the delta in the target's own frame.
            base * delta * base.inverse()
        } else {
            delta
        };
        Some((delta * base).normalize())
    }
}

impl TweenProperty for RotationProperty {
    type Value = RotationValue;

    fn prepare(&mut self, scene: &Scene, target: TweenTarget) -> Result<(), TweenError> {
        match self.mode {
            RotateMode::RotateTo => {
                if self.from_policy == RotationFrom::Current {
                    let q = target::read_rotation(scene, target, self.space)?;
                    self.from = RotationValue::from_quat(q);
                }
            }
            RotateMode::RotateBy => {
                let base = target::read_rotation(scene, target, Space::Relative)?;
                if self.base_offset.is_none() {
                    self.base_offset = Some(base);
                }
                if self.from_policy == RotationFrom::Current {
                    self.from = RotationValue::IDENTITY;
                }
            }
        }
        Ok(())
    }

    fn start_value(&self) -> RotationValue {
        self.from
    }

    fn end_value(&self) -> RotationValue {
        self.to
    }

    fn sample(&self, alpha: f32) -> RotationValue {
        match self.mode {
            RotateMode::RotateBy => {
                RotationValue::from_rotator(self.from.rotator().lerp(self.to.rotator(), alpha))
            }
            RotateMode::RotateTo => {
                let (from, to) = (self.from.quat(), self.to.quat());
                let q = match self.path {
                    RotationPath::ShortestPath => from.slerp(to, alpha),
                    RotationPath::FullPath => slerp_full_path(from, to, alpha),
                };
                RotationValue::from_quat(q)
            }
        }
    }

    fn apply(&self, value: &RotationValue, scene: &mut Scene, target: TweenTarget) -> bool {
        let write = match self.mode {
            RotateMode::RotateTo => TargetWrite::Rotation(self.space, value.quat()),
            RotateMode::RotateBy => match self.compose_delta(value.quat()) {
                Some(q) => TargetWrite::Rotation(Space::Relative, q),
                None => return false,
            },
        };
        target::apply(scene, target, write)
    }

    fn swap_endpoints(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;

    fn yaw_of(q: Quat) -> f32 {
        Rotator::from_quat(q).yaw
    }

    #[test]
    fn rotate_to_captures_current_world_rotation() {
        let mut scene = Scene::new();
        let owner = scene.spawn(Node::object().with_rotator(Rotator::yaw(20.0)));
        let part = scene
            .spawn_attached(Node::attached().with_rotator(Rotator::yaw(10.0)), owner)
            .unwrap();

        let mut prop = RotationProperty::rotate_to(Rotator::yaw(90.0), Space::World, RotationPath::ShortestPath);
        prop.prepare(&scene, TweenTarget::attached(part)).unwrap();
        assert!((prop.from().rotator().yaw - 30.0).abs() < 0.01);

        let mut rel = RotationProperty::rotate_to(Rotator::yaw(90.0), Space::Relative, RotationPath::ShortestPath);
        rel.prepare(&scene, TweenTarget::attached(part)).unwrap();
        assert!((rel.from().rotator().yaw - 10.0).abs() < 0.01);
    }

    #[test]
    fn explicit_from_is_kept() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object().with_rotator(Rotator::yaw(50.0)));
        let mut prop = RotationProperty::rotate_to(Rotator::yaw(90.0), Space::World, RotationPath::ShortestPath)
            .with_from(RotationFrom::Explicit(Rotator::yaw(-10.0)));
        prop.prepare(&scene, TweenTarget::object(h)).unwrap();
        assert_eq!(prop.from().rotator(), Rotator::yaw(-10.0));
    }

    #[test]
    fn rotate_by_is_per_axis_linear() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object());
        let mut prop = RotationProperty::rotate_by(Rotator::new(40.0, 300.0, -60.0), false);
        prop.prepare(&scene, TweenTarget::object(h)).unwrap();

        let mid = prop.sample(0.5).rotator();
        assert!(mid.abs_diff_eq(Rotator::new(20.0, 150.0, -30.0), 1e-4), "got {:?}", mid);
    }

    #[test]
    fn base_offset_is_captured_once() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object().with_rotator(Rotator::yaw(30.0)));
        let target = TweenTarget::object(h);
        let mut prop = RotationProperty::rotate_by(Rotator::yaw(90.0), false);
        prop.prepare(&scene, target).unwrap();
        let first = prop.base_offset().unwrap();

        scene.set_relative_rotation(h, Rotator::yaw(-70.0).to_quat());
        prop.prepare(&scene, target).unwrap();
        assert_eq!(prop.base_offset(), Some(first));
    }

    #[test]
    fn rotate_by_composes_onto_base() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object().with_rotator(Rotator::yaw(30.0)));
        let target = TweenTarget::object(h);
        let mut prop = RotationProperty::rotate_by(Rotator::yaw(90.0), false);
        prop.prepare(&scene, target).unwrap();

        let end = prop.end_value();
        assert!(prop.apply(&end, &mut scene, target));
        assert!((yaw_of(scene.relative_rotation(h).unwrap()) - 120.0).abs() < 0.01);
    }

    #[test]
    fn local_space_delta_uses_target_frame() {
        // Target pitched 90 degrees: a local roll becomes a world yaw-ish turn,
        // so parent-frame and local-frame results must differ.
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object().with_rotator(Rotator::new(90.0, 0.0, 0.0)));
        let target = TweenTarget::object(h);

        let mut parent_frame = RotationProperty::rotate_by(Rotator::new(0.0, 0.0, 45.0), false);
        let mut local_frame = RotationProperty::rotate_by(Rotator::new(0.0, 0.0, 45.0), true);
        parent_frame.prepare(&scene, target).unwrap();
        local_frame.prepare(&scene, target).unwrap();

        let delta = Rotator::new(0.0, 0.0, 45.0).to_quat();
        let base = Rotator::new(90.0, 0.0, 0.0).to_quat();
        let a = parent_frame.compose_delta(delta).unwrap();
        let b = local_frame.compose_delta(delta).unwrap();
        assert!(a.angle_between(delta * base) < 1e-3);
        assert!(b.angle_between(base * delta) < 1e-3);
        assert!(a.angle_between(b) > 0.1);
    }

    #[test]
    fn swap_moves_both_forms() {
        let mut prop = RotationProperty::rotate_by(Rotator::yaw(360.0), false);
        prop.swap_endpoints();
        assert_eq!(prop.from().rotator().yaw, 360.0);
        assert_eq!(prop.to().rotator(), Rotator::ZERO);
        assert!(prop.to().quat().angle_between(Quat::IDENTITY) < 1e-5);
    }
}
