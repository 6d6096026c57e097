use kurbo::Point;

use crate::animation::ease::Ease;
use crate::animation::tween::Fade;

/// Brush trail recorded while a stroke is being traced. Rendering only.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Trail {
    points: Vec<Point>,
    #[serde(skip)]
    min_spacing: f64,
    opacity: f64,
}

impl Trail {
    /// Start a trail at `p`.
    pub fn begin(p: Point, min_spacing: f64) -> Self {
        Self {
            points: vec![p],
            min_spacing,
            opacity: 1.0,
        }
    }

    /// Append `p` if it is far enough from the last recorded point.
    pub fn record(&mut self, p: Point) -> bool {
        let far_enough = self
            .points
            .last()
            .is_none_or(|last| last.distance(p) >= self.min_spacing);
        if far_enough {
            self.points.push(p);
        }
        far_enough
    }

    /// Recorded points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Last recorded point.
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Current opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

/// A finished trail fading out before removal.
#[derive(Clone, Debug)]
pub struct FadingTrail {
    trail: Trail,
    fade: Fade,
}

impl FadingTrail {
    /// Begin fading `trail` to transparent over `duration` seconds.
    pub fn new(trail: Trail, duration: f64) -> Self {
        let fade = Fade::new(trail.opacity, 0.0, duration, Ease::Linear);
        Self { trail, fade }
    }

    /// Advance one frame; `true` once the trail is gone and may be dropped.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.trail.opacity = self.fade.tick(dt);
        self.fade.is_done()
    }

    /// The trail being faded.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }
}
