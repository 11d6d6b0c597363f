//! Error types for tween construction and configuration.

use thiserror::Error;

use crate::components::node::NodeKind;
use crate::core::scene::NodeHandle;
use crate::tween::target::TargetKind;

/// Errors that can occur when building a tween or loading its configuration.
///
/// Nothing at tick time produces these; apply-time problems degrade to no-ops.
#[derive(Debug, Error)]
pub enum TweenError {
    /// The target handle does not refer to a live node.
    #[error("Target {0:?} does not exist")]
    StaleTarget(NodeHandle),

    /// The target tag does not match the node it points at.
    #[error("Target kind mismatch: expected {expected:?}, node is {found:?}")]
    TargetKindMismatch { expected: TargetKind, found: NodeKind },

    /// A timing parameter is NaN or infinite.
    #[error("Invalid value for '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    /// JSON configuration failed to parse.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
