// tween/vector.rs
//
// Location and scale tweens. Same lifecycle as rotation, different strategy:
// plain component-wise lerp.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::TweenError;
use crate::core::scene::Scene;

use super::easing::lerp_vec3;
use super::property::TweenProperty;
use super::target::{self, Space, TargetRead, TargetWrite, TweenTarget};
use super::tween::Tween;

/// Which vector property is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorChannel {
    Location,
    Scale,
}

/// Absolute or relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VectorMode {
    /// Interpolate toward an absolute value in the tween's space.
    #[default]
    To,
    /// Location: offset added to the start location. Scale: factor applied
    /// to the start scale.
    By,
}

/// Location/scale tween strategy.
#[derive(Debug, Clone)]
pub struct VectorProperty {
    channel: VectorChannel,
    mode: VectorMode,
    /// `To` only.
    space: Space,
    /// Explicit start value; `None` reads the target (To) or uses the identity delta (By).
    explicit_from: Option<Vec3>,
    from: Vec3,
    to: Vec3,
    /// Target's relative value when a `By` tween started.
    base: Option<Vec3>,
}

/// A tween animating location or scale.
pub type VectorTween = Tween<VectorProperty>;

impl VectorProperty {
    pub fn move_to(to: Vec3, space: Space) -> Self {
        Self::new(VectorChannel::Location, VectorMode::To, space, to)
    }

    pub fn move_by(offset: Vec3) -> Self {
        Self::new(VectorChannel::Location, VectorMode::By, Space::Relative, offset)
    }

    pub fn scale_to(to: Vec3, space: Space) -> Self {
        Self::new(VectorChannel::Scale, VectorMode::To, space, to)
    }

    pub fn scale_by(factor: Vec3) -> Self {
        Self::new(VectorChannel::Scale, VectorMode::By, Space::Relative, factor)
    }

    fn new(channel: VectorChannel, mode: VectorMode, space: Space, to: Vec3) -> Self {
        let from = Self::identity_delta(channel);
        Self { channel, mode, space, explicit_from: None, from, to, base: None }
    }

    pub fn with_from(mut self, from: Vec3) -> Self {
        self.explicit_from = Some(from);
        self.from = from;
        self
    }

    fn identity_delta(channel: VectorChannel) -> Vec3 {
        match channel {
            VectorChannel::Location => Vec3::ZERO,
            VectorChannel::Scale => Vec3::ONE,
        }
    }

    fn read_in(&self, space: Space) -> TargetRead {
        match self.channel {
            VectorChannel::Location => TargetRead::Location(space),
            VectorChannel::Scale => TargetRead::Scale(space),
        }
    }

    pub fn channel(&self) -> VectorChannel {
        self.channel
    }

    pub fn mode(&self) -> VectorMode {
        self.mode
    }

    pub fn from(&self) -> Vec3 {
        self.from
    }

    pub fn to(&self) -> Vec3 {
        self.to
    }

    pub fn base(&self) -> Option<Vec3> {
        self.base
    }
}

impl TweenProperty for VectorProperty {
    type Value = Vec3;

    fn prepare(&mut self, scene: &Scene, target: TweenTarget) -> Result<(), TweenError> {
        match self.mode {
            VectorMode::To => {
                let current = target::read_vector(scene, target, self.read_in(self.space))?;
                if self.explicit_from.is_none() {
                    self.from = current;
                }
            }
            VectorMode::By => {
                let base = target::read_vector(scene, target, self.read_in(Space::Relative))?;
                if self.base.is_none() {
                    self.base = Some(base);
                }
            }
        }
        Ok(())
    }

    fn start_value(&self) -> Vec3 {
        self.from
    }

    fn end_value(&self) -> Vec3 {
        self.to
    }

    fn sample(&self, alpha: f32) -> Vec3 {
        lerp_vec3(self.from, self.to, alpha)
    }

    fn apply(&self, value: &Vec3, scene: &mut Scene, target: TweenTarget) -> bool {
        let (space, v) = match self.mode {
            VectorMode::To => (self.space, *value),
            VectorMode::By => {
                let Some(base) = self.base else { return false };
                let v = match self.channel {
                    VectorChannel::Location => base + *value,
                    VectorChannel::Scale => base * *value,
                };
                (Space::Relative, v)
            }
        };
        let write = match self.channel {
            VectorChannel::Location => TargetWrite::Location(space, v),
            VectorChannel::Scale => TargetWrite::Scale(space, v),
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

    #[test]
    fn move_to_world_under_parent() {
        let mut scene = Scene::new();
        let parent = scene.spawn(Node::object().with_location(Vec3::new(10.0, 0.0, 0.0)));
        let child = scene
            .spawn_attached(Node::attached().with_location(Vec3::new(5.0, 0.0, 0.0)), parent)
            .unwrap();
        let target = TweenTarget::attached(child);

        let mut prop = VectorProperty::move_to(Vec3::new(25.0, 0.0, 0.0), Space::World);
        prop.prepare(&scene, target).unwrap();
        assert_eq!(prop.from(), Vec3::new(15.0, 0.0, 0.0));

        let mid = prop.sample(0.5);
        assert!(prop.apply(&mid, &mut scene, target));
        assert!((scene.world_location(child).unwrap() - Vec3::new(20.0, 0.0, 0.0)).length() < 1e-4);
        assert!((scene.relative_location(child).unwrap() - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn move_by_adds_to_base() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object().with_location(Vec3::new(1.0, 2.0, 3.0)));
        let target = TweenTarget::object(h);
        let mut prop = VectorProperty::move_by(Vec3::new(0.0, 0.0, 10.0));
        prop.prepare(&scene, target).unwrap();

        let end = prop.end_value();
        prop.apply(&end, &mut scene, target);
        assert_eq!(scene.relative_location(h), Some(Vec3::new(1.0, 2.0, 13.0)));
    }

    #[test]
    fn scale_by_multiplies_base() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object().with_scale(Vec3::splat(2.0)));
        let target = TweenTarget::object(h);
        let mut prop = VectorProperty::scale_by(Vec3::splat(3.0));
        prop.prepare(&scene, target).unwrap();

        assert_eq!(prop.start_value(), Vec3::ONE);
        let end = prop.end_value();
        prop.apply(&end, &mut scene, target);
        assert_eq!(scene.relative_scale(h), Some(Vec3::splat(6.0)));
    }
}
