// tween/builder.rs
//
// Construction of ready-to-run tweens. Parameters are collected here,
// normalized per mode, and checked against the scene before a Tween exists.
//
// Usage:
//   let tween = RotationTweenBuilder::rotate_to(TweenTarget::object(h), Rotator::yaw(90.0))
//       .with_duration(0.5)
//       .with_easing(Easing::QuadOut)
//       .build(&scene);   // None (and a warning) if the target is unusable

use glam::Vec3;

use crate::api::config::{LoopType, TweenSettings};
use crate::api::error::TweenError;
use crate::core::rotator::Rotator;
use crate::core::scene::Scene;

use super::curve::CustomCurve;
use super::easing::Easing;
use super::rotation::{RotateMode, RotationFrom, RotationPath, RotationProperty, RotationTween};
use super::target::{Space, TweenTarget};
use super::tween::Tween;
use super::vector::{VectorProperty, VectorTween};

/// Timing, loop and contact options shared by every builder.
macro_rules! common_setters {
    () => {
        /// Replace all shared settings at once (e.g. from a `TweenConfig`).
        pub fn with_settings(mut self, settings: TweenSettings) -> Self {
            self.settings = settings;
            self
        }

        pub fn with_duration(mut self, duration: f32) -> Self {
            self.settings.duration = duration;
            self
        }

        pub fn with_easing(mut self, easing: Easing) -> Self {
            self.settings.easing = easing;
            self
        }

        /// Takes precedence over the named easing.
        pub fn with_curve(mut self, curve: CustomCurve) -> Self {
            self.curve = Some(curve);
            self
        }

        pub fn with_delay(mut self, delay: f32) -> Self {
            self.settings.delay = delay;
            self
        }

        pub fn with_time_scale(mut self, time_scale: f32) -> Self {
            self.settings.time_scale = time_scale;
            self
        }

        /// `count`: -1 forever, 0 none, N extra cycles.
        pub fn with_loops(mut self, count: i32, loop_type: LoopType) -> Self {
            self.settings.loop_count = count;
            self.settings.loop_type = loop_type;
            self
        }

        pub fn delete_on_hit(mut self, enabled: bool) -> Self {
            self.settings.delete_on_hit = enabled;
            self
        }

        pub fn delete_on_overlap(mut self, enabled: bool) -> Self {
            self.settings.delete_on_overlap = enabled;
            self
        }

        pub fn ignore_global_pause(mut self, enabled: bool) -> Self {
            self.settings.ignore_global_pause = enabled;
            self
        }
    };
}

/// Builder for rotation tweens.
#[derive(Debug, Clone)]
pub struct RotationTweenBuilder {
    target: TweenTarget,
    mode: RotateMode,
    to: Rotator,
    from: RotationFrom,
    space: Space,
    path: RotationPath,
    local_space: bool,
    settings: TweenSettings,
    curve: Option<CustomCurve>,
}

impl RotationTweenBuilder {
    /// Rotate to an absolute orientation (world space, shortest path by default).
    pub fn rotate_to(target: TweenTarget, to: Rotator) -> Self {
        Self::new(target, RotateMode::RotateTo, to)
    }

    /// Rotate by a per-axis delta (parent frame by default).
    pub fn rotate_by(target: TweenTarget, by: Rotator) -> Self {
        Self::new(target, RotateMode::RotateBy, by)
    }

    fn new(target: TweenTarget, mode: RotateMode, to: Rotator) -> Self {
        Self {
            target,
            mode,
            to,
            from: RotationFrom::Current,
            space: Space::World,
            path: RotationPath::ShortestPath,
            local_space: false,
            settings: TweenSettings::default(),
            curve: None,
        }
    }

    common_setters!();

    /// Start from a fixed value instead of the target's live rotation.
    pub fn with_from(mut self, from: Rotator) -> Self {
        self.from = RotationFrom::Explicit(from);
        self
    }

    /// `RotateTo` only.
    pub fn with_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    /// `RotateTo` only.
    pub fn with_path(mut self, path: RotationPath) -> Self {
        self.path = path;
        self
    }

    /// `RotateBy` only.
    pub fn with_local_space(mut self, local_space: bool) -> Self {
        self.local_space = local_space;
        self
    }

    /// Build, or explain why the tween cannot exist.
    pub fn try_build(self, scene: &Scene) -> Result<RotationTween, TweenError> {
        self.settings.validate()?;
        self.target.validate(scene)?;

        let property = match self.mode {
            RotateMode::RotateTo => {
                if self.local_space {
                    log::debug!("local_space only applies to RotateBy; ignored");
                }
                RotationProperty::rotate_to(self.to, self.space, self.path)
            }
            RotateMode::RotateBy => {
                if self.space != Space::World || self.path != RotationPath::ShortestPath {
                    log::debug!("space and path only apply to RotateTo; ignored");
                }
                RotationProperty::rotate_by(self.to, self.local_space)
            }
        }
        .with_from(self.from);

        Ok(finish(Tween::new(property, self.target, self.settings), self.curve))
    }

    /// Build, logging and returning `None` if the target is unusable.
    pub fn build(self, scene: &Scene) -> Option<RotationTween> {
        self.try_build(scene)
            .map_err(|err| log::warn!("rotation tween not created: {}", err))
            .ok()
    }
}

/// Builder for location and scale tweens.
#[derive(Debug, Clone)]
pub struct VectorTweenBuilder {
    target: TweenTarget,
    property: VectorProperty,
    settings: TweenSettings,
    curve: Option<CustomCurve>,
}

impl VectorTweenBuilder {
    pub fn move_to(target: TweenTarget, to: Vec3, space: Space) -> Self {
        Self::new(target, VectorProperty::move_to(to, space))
    }

    pub fn move_by(target: TweenTarget, offset: Vec3) -> Self {
        Self::new(target, VectorProperty::move_by(offset))
    }

    pub fn scale_to(target: TweenTarget, to: Vec3, space: Space) -> Self {
        Self::new(target, VectorProperty::scale_to(to, space))
    }

    pub fn scale_by(target: TweenTarget, factor: Vec3) -> Self {
        Self::new(target, VectorProperty::scale_by(factor))
    }

    fn new(target: TweenTarget, property: VectorProperty) -> Self {
        Self { target, property, settings: TweenSettings::default(), curve: None }
    }

    common_setters!();

    pub fn with_from(mut self, from: Vec3) -> Self {
        self.property = self.property.with_from(from);
        self
    }

    pub fn try_build(self, scene: &Scene) -> Result<VectorTween, TweenError> {
        self.settings.validate()?;
        self.target.validate(scene)?;
        Ok(finish(Tween::new(self.property, self.target, self.settings), self.curve))
    }

    pub fn build(self, scene: &Scene) -> Option<VectorTween> {
        self.try_build(scene)
            .map_err(|err| log::warn!("vector tween not created: {}", err))
            .ok()
    }
}

fn finish<P: super::property::TweenProperty>(tween: Tween<P>, curve: Option<CustomCurve>) -> Tween<P> {
    match curve {
        Some(curve) => tween.with_curve(curve),
        None => tween,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;
    use crate::tween::tween::TweenStatus;

    #[test]
    fn dead_target_yields_no_tween() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object());
        scene.despawn(h);
        let builder = RotationTweenBuilder::rotate_to(TweenTarget::object(h), Rotator::yaw(90.0));
        assert!(matches!(builder.clone().try_build(&scene), Err(TweenError::StaleTarget(_))));
        assert!(builder.build(&scene).is_none());
    }

    #[test]
    fn wrong_kind_yields_no_tween() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object());
        let built = VectorTweenBuilder::move_by(TweenTarget::attached(h), Vec3::X).build(&scene);
        assert!(built.is_none());
    }

    #[test]
    fn nan_duration_rejected() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object());
        let result = RotationTweenBuilder::rotate_by(TweenTarget::object(h), Rotator::yaw(10.0))
            .with_duration(f32::NAN)
            .try_build(&scene);
        assert!(matches!(result, Err(TweenError::InvalidParameter { name: "duration", .. })));
    }

    #[test]
    fn rotate_by_ignores_to_only_options() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object());
        let tween = RotationTweenBuilder::rotate_by(TweenTarget::object(h), Rotator::yaw(10.0))
            .with_space(Space::World)
            .with_path(RotationPath::FullPath)
            .with_local_space(true)
            .build(&scene)
            .unwrap();
        assert_eq!(tween.property().mode(), RotateMode::RotateBy);
        assert_eq!(tween.property().space(), Space::Relative);
        assert_eq!(tween.property().path(), RotationPath::ShortestPath);
        assert!(tween.property().local_space());
        assert_eq!(tween.status(), TweenStatus::Created);
    }

    #[test]
    fn rotate_to_forces_local_space_off() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object());
        let tween = RotationTweenBuilder::rotate_to(TweenTarget::object(h), Rotator::yaw(10.0))
            .with_local_space(true)
            .with_space(Space::Relative)
            .build(&scene)
            .unwrap();
        assert!(!tween.property().local_space());
        assert_eq!(tween.property().space(), Space::Relative);
    }

    #[test]
    fn settings_are_carried() {
        let mut scene = Scene::new();
        let h = scene.spawn(Node::object());
        let tween = VectorTweenBuilder::scale_to(TweenTarget::object(h), Vec3::splat(2.0), Space::World)
            .with_duration(3.0)
            .with_delay(0.5)
            .with_loops(2, LoopType::PingPong)
            .ignore_global_pause(true)
            .build(&scene)
            .unwrap();
        assert_eq!(tween.duration(), 3.0);
        assert_eq!(tween.settings().delay, 0.5);
        assert_eq!(tween.loops_remaining(), 2);
        assert!(tween.ignores_global_pause());
    }
}
