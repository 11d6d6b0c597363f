// tween/mod.rs
//
// Tween engine: easing, the generic lifecycle, value strategies, builders
// and the owning container.
//
// Tweens never own their target. They hold a node handle and read/write the
// scene through it, so a despawned target turns writes into no-ops.

pub mod builder;
pub mod curve;
pub mod delegate;
pub mod easing;
pub mod manager;
pub mod property;
pub mod rotation;
pub mod target;
#[allow(clippy::module_inception)]
pub mod tween;
pub mod vector;


pub use builder::{RotationTweenBuilder, VectorTweenBuilder};
pub use curve::CustomCurve;
pub use delegate::{Delegate, DeleteHandle, TweenDelegates};
pub use easing::{compute_custom_easing, compute_easing, ease, lerp, lerp_vec3, Easing};
pub use manager::TweenManager;
pub use property::TweenProperty;
pub use rotation::{RotateMode, RotationFrom, RotationPath, RotationProperty, RotationTween};
pub use target::{Space, TargetKind, TweenTarget};
pub use tween::{Tween, TweenStatus, Tweenable};
pub use vector::{VectorChannel, VectorMode, VectorProperty, VectorTween};
