use std::fmt;

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Identity of one guide inside a [`crate::GuideChain`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GuideId(pub u32);

impl fmt::Display for GuideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "guide#{}", self.0)
    }
}

/// Clamp an opacity value into `[0, 1]`.
pub fn clamp_opacity(a: f64) -> f64 {
    if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) }
}
