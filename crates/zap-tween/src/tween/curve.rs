//! Caller-supplied easing curves.
//!
//! A curve maps normalized time in `[0, 1]` to an interpolation factor. When a
//! tween has one, it replaces the named easing.

use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
enum CurveKind {
    Function(Rc<dyn Fn(f32) -> f32>),
    /// Sorted by time; at least one key.
    Keys(Rc<[(f32, f32)]>),
}

/// A custom easing curve. Cheap to clone.
#[derive(Clone)]
pub struct CustomCurve {
    kind: CurveKind,
}

impl CustomCurve {
    /// Wrap a closure of normalized time.
    pub fn from_fn(f: impl Fn(f32) -> f32 + 'static) -> Self {
        Self { kind: CurveKind::Function(Rc::new(f)) }
    }

    /// Piecewise-linear curve through `(time, value)` keys.
    ///
    /// Keys are sorted by time; samples outside the key range hold the
    /// nearest key's value. Returns `None` for an empty key list or
    /// non-finite keys.
    pub fn from_keys(keys: impl IntoIterator<Item = (f32, f32)>) -> Option<Self> {
        let mut keys: Vec<(f32, f32)> = keys.into_iter().collect();
        if keys.is_empty() || keys.iter().any(|(t, v)| !t.is_finite() || !v.is_finite()) {
            return None;
        }
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Some(Self { kind: CurveKind::Keys(keys.into()) })
    }

    /// Sample the curve at normalized time `t`.
    pub fn sample(&self, t: f32) -> f32 {
        match &self.kind {
            CurveKind::Function(f) => f(t),
            CurveKind::Keys(keys) => sample_keys(keys, t),
        }
    }
}

fn sample_keys(keys: &[(f32, f32)], t: f32) -> f32 {
    let first = keys[0];
    let last = keys[keys.len() - 1];
    if t <= first.0 {
        return first.1;
    }
    if t >= last.0 {
        return last.1;
    }
    // First key strictly after t; the range checks above guarantee 1..len.
    let upper = keys.partition_point(|(time, _)| *time <= t);
    let (t0, v0) = keys[upper - 1];
    let (t1, v1) = keys[upper];
    let span = t1 - t0;
    if span <= 0.0 {
        return v1;
    }
    v0 + (v1 - v0) * ((t - t0) / span)
}

impl fmt::Debug for CustomCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CurveKind::Function(_) => f.write_str("CustomCurve::Function"),
            CurveKind::Keys(keys) => f.debug_tuple("CustomCurve::Keys").field(&keys.len()).finish(),
        }
    }
}
