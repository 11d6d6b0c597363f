use serde::{Deserialize, Serialize};

use super::error::TweenError;
use crate::tween::easing::Easing;

/// What a tween does when it reaches the end and has loops left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopType {
    /// Jump back to the start value and play forward again.
    #[default]
    Restart,
    /// Swap start and end and play back (yoyo).
    PingPong,
}

/// Loop count meaning "repeat forever".
pub const INFINITE_LOOPS: i32 = -1;

/// Timing and behavior parameters shared by every tween kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenSettings {
    /// Duration in seconds. Zero or negative finishes on the first update.
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default)]
    pub easing: Easing,
    /// Seconds to wait before the start values are captured.
    #[serde(default)]
    pub delay: f32,
    /// Per-tween time multiplier, stacked with the manager's global scale.
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    /// Extra cycles after the first: -1 forever, 0 none, N exactly N more.
    #[serde(default)]
    pub loop_count: i32,
    #[serde(default)]
    pub loop_type: LoopType,
    /// Delete the tween when its target reports a blocking hit.
    #[serde(default)]
    pub delete_on_hit: bool,
    /// Delete the tween when its target reports a begin-overlap.
    #[serde(default)]
    pub delete_on_overlap: bool,
    /// Keep running while the manager is globally paused.
    #[serde(default)]
    pub ignore_global_pause: bool,
}

impl Default for TweenSettings {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            easing: Easing::Linear,
            delay: 0.0,
            time_scale: default_time_scale(),
            loop_count: 0,
            loop_type: LoopType::Restart,
            delete_on_hit: false,
            delete_on_overlap: false,
            ignore_global_pause: false,
        }
    }
}

impl TweenSettings {
    /// Reject NaN and infinite timing values.
    pub fn validate(&self) -> Result<(), TweenError> {
        for (name, value) in [
            ("duration", self.duration),
            ("delay", self.delay),
            ("time_scale", self.time_scale),
        ] {
            if !value.is_finite() {
                return Err(TweenError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

fn default_duration() -> f32 {
    1.0
}

fn default_time_scale() -> f32 {
    1.0
}

/// Configuration for a `TweenManager`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenConfig {
    /// Multiplier applied to every tween's delta time (default: 1.0).
    #[serde(default = "default_time_scale")]
    pub global_time_scale: f32,
    /// Start the manager globally paused.
    #[serde(default)]
    pub start_paused: bool,
    /// Settings new tweens start from when built through the manager's config.
    #[serde(default)]
    pub defaults: TweenSettings,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            global_time_scale: 1.0,
            start_paused: false,
            defaults: TweenSettings::default(),
        }
    }
}

impl TweenConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TweenError> {
        let config: Self = serde_json::from_str(json)?;
        config.defaults.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let config = TweenConfig::from_json("{}").unwrap();
        assert_eq!(config, TweenConfig::default());
    }

    #[test]
    fn parse_config_with_defaults() {
        let json = r#"{
            "global_time_scale": 0.5,
            "defaults": {
                "duration": 2.0,
                "easing": "QuadOut",
                "loop_count": -1,
                "loop_type": "PingPong",
                "delete_on_hit": true
            }
        }"#;
        let config = TweenConfig::from_json(json).unwrap();
        assert_eq!(config.global_time_scale, 0.5);
        assert!(!config.start_paused);
        assert_eq!(config.defaults.duration, 2.0);
        assert_eq!(config.defaults.easing, Easing::QuadOut);
        assert_eq!(config.defaults.loop_count, INFINITE_LOOPS);
        assert_eq!(config.defaults.loop_type, LoopType::PingPong);
        assert!(config.defaults.delete_on_hit);
        assert_eq!(config.defaults.time_scale, 1.0);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let err = TweenConfig::from_json("{ \"global_time_scale\": \"fast\" }").unwrap_err();
        assert!(matches!(err, TweenError::Config(_)));
    }

    #[test]
    fn non_finite_duration_rejected() {
        let settings = TweenSettings { duration: f32::NAN, ..TweenSettings::default() };
        assert!(matches!(
            settings.validate(),
            Err(TweenError::InvalidParameter { name: "duration", .. })
        ));
    }
}
