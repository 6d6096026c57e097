use kurbo::{Point, Vec2};

/// Segments shorter than this carry no direction.
pub(crate) const GEOM_EPSILON: f64 = 1e-4;

/// Lower bound for any per-segment travel time, in seconds.
pub(crate) const TIME_EPSILON: f64 = 1e-4;

/// Unit normal of `a -> b`, rotated +90 degrees in the XY plane.
pub(crate) fn unit_perp(a: Point, b: Point) -> Option<Vec2> {
    let dir = b - a;
    let len = dir.hypot();
    if len < GEOM_EPSILON {
        return None;
    }
    let n = dir / len;
    Some(Vec2::new(-n.y, n.x))
}

/// Angle of `a -> b` in radians, or `None` for a degenerate segment.
pub(crate) fn heading(a: Point, b: Point) -> Option<f64> {
    let dir = b - a;
    if dir.hypot() < GEOM_EPSILON {
        return None;
    }
    Some(dir.atan2())
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
