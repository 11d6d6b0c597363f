pub mod api;
pub mod core;
pub mod components;
pub mod tween;

// Re-export key types at crate root for convenience
pub use api::config::{LoopType, TweenConfig, TweenSettings, INFINITE_LOOPS};
pub use api::error::TweenError;
pub use api::types::{ContactEvent, ContactKind, SequenceId, TweenId};
pub use components::node::{CollisionResponse, Node, NodeKind};
pub use crate::core::rotator::{slerp_full_path, RotationValue, Rotator};
pub use crate::core::scene::{ContactBinding, NodeHandle, Scene};
pub use crate::core::transform::Transform;

pub use tween::{
    Easing, CustomCurve, compute_easing, compute_custom_easing,
    Tween, TweenStatus, Tweenable, TweenProperty, TweenDelegates, Delegate, DeleteHandle,
    RotationTween, RotationProperty, RotateMode, RotationPath, RotationFrom,
    VectorTween, VectorProperty, VectorChannel, VectorMode,
    RotationTweenBuilder, VectorTweenBuilder, TweenManager,
    TweenTarget, TargetKind, Space,
};
