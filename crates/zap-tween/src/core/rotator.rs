// core/rotator.rs
//
// Per-axis rotation in degrees, and the paired quaternion/per-axis value
// that rotation tweens carry around.

use std::ops::{Add, Neg, Sub};

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

/// Rotation expressed as three independent axis angles, in degrees.
///
/// `yaw` turns about Z, `pitch` about Y, `roll` about X. The composed
/// rotation applies roll first, then pitch, then yaw.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self { pitch: 0.0, yaw: 0.0, roll: 0.0 };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Yaw-only rotation.
    pub const fn yaw(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Compose the three axes into a single quaternion.
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Decompose a quaternion. Angles come back in (-180, 180].
    pub fn from_quat(q: Quat) -> Self {
        let (yaw, pitch, roll) = q.normalize().to_euler(EulerRot::ZYX);
        Self {
            pitch: pitch.to_degrees(),
            yaw: yaw.to_degrees(),
            roll: roll.to_degrees(),
        }
    }

    /// Blend each axis independently.
    #[inline]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            pitch: self.pitch + (to.pitch - self.pitch) * t,
            yaw: self.yaw + (to.yaw - self.yaw) * t,
            roll: self.roll + (to.roll - self.roll) * t,
        }
    }

    /// Axis-by-axis comparison, without wrapping angles.
    pub fn abs_diff_eq(self, other: Self, tolerance: f32) -> bool {
        (self.pitch - other.pitch).abs() <= tolerance
            && (self.yaw - other.yaw).abs() <= tolerance
            && (self.roll - other.roll).abs() <= tolerance
    }
}

impl Add for Rotator {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl Sub for Rotator {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.pitch - rhs.pitch, self.yaw - rhs.yaw, self.roll - rhs.roll)
    }
}

impl Neg for Rotator {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.pitch, -self.yaw, -self.roll)
    }
}

/// A rotation held in both composed and per-axis form.
///
/// The two fields are only ever produced together, so they always describe
/// the same orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationValue {
    quat: Quat,
    rotator: Rotator,
}

impl Default for RotationValue {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RotationValue {
    pub const IDENTITY: Self = Self { quat: Quat::IDENTITY, rotator: Rotator::ZERO };

    /// Keeps the caller's axis angles as given (winding included).
    pub fn from_rotator(rotator: Rotator) -> Self {
        Self { quat: rotator.to_quat(), rotator }
    }

    pub fn from_quat(quat: Quat) -> Self {
        let quat = quat.normalize();
        Self { quat, rotator: Rotator::from_quat(quat) }
    }

    #[inline]
    pub fn quat(&self) -> Quat {
        self.quat
    }

    #[inline]
    pub fn rotator(&self) -> Rotator {
        self.rotator
    }
}

/// Spherical interpolation along the long arc between two orientations.
///
/// Where [`Quat::slerp`] puts `to` on the same hemisphere as `from`, this
/// puts it on the opposite one, so a turn of `theta` degrees is travelled as
/// `360 - theta`. The sign either quaternion is stored with does not matter.
pub fn slerp_full_path(from: Quat, to: Quat, t: f32) -> Quat {
    let (to, dot) = match from.dot(to) {
        d if d > 0.0 => (-to, -d),
        d => (to, d),
    };
    let angle = dot.clamp(-1.0, 0.0).acos();
    let sin_angle = angle.sin();
    if sin_angle.abs() < 1.0e-6 {
        // Same orientation: the long arc is a full turn with no axis to follow.
        return if t < 0.5 { from } else { to };
    }
    let scale_from = ((1.0 - t) * angle).sin() / sin_angle;
    let scale_to = (t * angle).sin() / sin_angle;
    (from * scale_from + to * scale_to).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_round_trips_through_quat() {
        let r = Rotator::new(10.0, 45.0, -20.0);
        let back = Rotator::from_quat(r.to_quat());
        assert!(back.abs_diff_eq(r, 0.01), "got {:?}", back);
    }

    #[test]
    fn lerp_is_per_axis() {
        let mid = Rotator::ZERO.lerp(Rotator::new(90.0, 360.0, -40.0), 0.5);
        assert!(mid.abs_diff_eq(Rotator::new(45.0, 180.0, -20.0), 1e-4));
    }

    #[test]
    fn rotation_value_keeps_winding() {
        let v = RotationValue::from_rotator(Rotator::yaw(360.0));
        assert_eq!(v.rotator().yaw, 360.0);
        assert!(v.quat().angle_between(Quat::IDENTITY) < 1e-3);
    }

    #[test]
    fn full_path_takes_the_long_arc() {
        // 200 degrees of yaw: the short way is -160, the long way +200.
        let from = Quat::IDENTITY;
        let to = Rotator::yaw(200.0).to_quat();
        let long = Rotator::from_quat(slerp_full_path(from, to, 0.5));
        let short = Rotator::from_quat(from.slerp(to, 0.5));
        assert!((long.yaw - 100.0).abs() < 0.5, "long yaw {}", long.yaw);
        assert!((short.yaw + 80.0).abs() < 0.5, "short yaw {}", short.yaw);
    }

    #[test]
    fn quarter_turn_goes_the_long_way() {
        let from = Quat::IDENTITY;
        let to = Rotator::yaw(90.0).to_quat();
        let long = Rotator::from_quat(slerp_full_path(from, to, 0.5));
        let short = Rotator::from_quat(from.slerp(to, 0.5));
        assert!((long.yaw + 135.0).abs() < 0.5, "long yaw {}", long.yaw);
        assert!((short.yaw - 45.0).abs() < 0.5, "short yaw {}", short.yaw);

        let end = slerp_full_path(from, to, 1.0);
        assert!(end.angle_between(to) < 1e-3);
    }

    #[test]
    fn full_path_ignores_quaternion_sign() {
        let to = Rotator::yaw(90.0).to_quat();
        let a = slerp_full_path(Quat::IDENTITY, to, 0.5);
        let b = slerp_full_path(-Quat::IDENTITY, to, 0.5);
        let c = slerp_full_path(Quat::IDENTITY, -to, 0.5);
        assert!(a.angle_between(b) < 1e-3);
        assert!(a.angle_between(c) < 1e-3);
    }
}
