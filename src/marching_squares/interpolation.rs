use godot::prelude::*;

use super::types::{Corners, EdgePoint, SampleValues};
use crate::debug_log::{debug_log, debug_log_enabled};

/// Fraction of the way `value` sits between `a` and `b`.
///
/// Returns 0.0 when `a == b` instead of dividing by zero.
#[must_use]
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    (value - a) / (b - a)
}

#[must_use]
#[inline]
pub fn lerp(from: Vector2, to: Vector2, t: f32) -> Vector2 {
    from + (to - from) * t
}

#[inline]
fn sanitize_fraction(t: f32, edge: EdgePoint) -> f32 {
    if t.is_finite() {
        t
    } else {
        if cfg!(debug_assertions) && debug_log_enabled() {
            debug_log(&format!(
                "[interpolate] non-finite fraction {} on {:?}, using 0",
                t, edge
            ));
        }
        0.0
    }
}

/// Clamped crossing fraction along `edge`, measured from its first endpoint.
#[must_use]
pub fn edge_fraction(iso_value: f32, values: &SampleValues, edge: EdgePoint) -> f32 {
    let (from, to) = edge.endpoints();
    let t = inverse_lerp(values.get(from), values.get(to), iso_value);
    sanitize_fraction(t, edge).clamp(0.0, 1.0)
}

/// Crossing points for one triangulation call. Never stored on the square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePoints {
    pub top_center: Vector2,
    pub right_center: Vector2,
    pub bottom_center: Vector2,
    pub left_center: Vector2,
}

impl EdgePoints {
    /// Geometric middle of each edge.
    #[must_use]
    pub fn midpoints(corners: &Corners) -> Self {
        Self::from_fn(|edge| {
            let (from, to) = edge.endpoints();
            lerp(corners.get(from), corners.get(to), 0.5)
        })
    }

    /// Place each point where the field crosses `iso_value`, clamped to its edge.
    #[must_use]
    pub fn interpolate(corners: &Corners, iso_value: f32, values: &SampleValues) -> Self {
        Self::from_fn(|edge| {
            let (from, to) = edge.endpoints();
            let t = edge_fraction(iso_value, values, edge);
            lerp(corners.get(from), corners.get(to), t)
        })
    }

    #[must_use]
    pub fn get(&self, edge: EdgePoint) -> Vector2 {
        match edge {
            EdgePoint::TopCenter => self.top_center,
            EdgePoint::RightCenter => self.right_center,
            EdgePoint::BottomCenter => self.bottom_center,
            EdgePoint::LeftCenter => self.left_center,
        }
    }

    fn from_fn(mut point: impl FnMut(EdgePoint) -> Vector2) -> Self {
        Self {
            top_center: point(EdgePoint::TopCenter),
            right_center: point(EdgePoint::RightCenter),
            bottom_center: point(EdgePoint::BottomCenter),
            left_center: point(EdgePoint::LeftCenter),
        }
    }
}
