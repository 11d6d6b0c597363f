use std::fmt;

use crate::api::error::TweenError;
use crate::core::scene::Scene;

use super::target::TweenTarget;

/// Interpolation and apply strategy for one kind of animated value.
///
/// `Tween<P>` owns the timing and lifecycle; the property owns the endpoints,
/// how to blend them, and how to push a sample into the scene.
pub trait TweenProperty {
    type Value: Copy + fmt::Debug + 'static;

    /// Capture the start values from the live target. Called once, after
    /// the delay has run out and before the first sample.
    fn prepare(&mut self, scene: &Scene, target: TweenTarget) -> Result<(), TweenError>;

    fn start_value(&self) -> Self::Value;

    fn end_value(&self) -> Self::Value;

    /// Blend the endpoints. `alpha` is already eased and may leave [0, 1].
    fn sample(&self, alpha: f32) -> Self::Value;

    /// Write a value to the target. Returns `false` if nothing was written.
    fn apply(&self, value: &Self::Value, scene: &mut Scene, target: TweenTarget) -> bool;

    /// Exchange start and end.
    fn swap_endpoints(&mut self);
}
