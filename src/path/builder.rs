//! Source path description to offset polyline.

use kurbo::{BezPath, ParamCurve, Point, Vec2};

use crate::foundation::error::PathError;
use crate::foundation::math::{GEOM_EPSILON, unit_perp};
use crate::path::polyline::Polyline;

/// Where the path points come from.
#[derive(Clone, Debug)]
pub enum PathSource {
    /// Explicit ordered anchor points.
    Points(Vec<Point>),
    /// A Bezier path sampled uniformly per segment.
    Curve {
        /// Source curve in world space.
        path: BezPath,
        /// Samples taken on each segment, excluding the shared start point.
        samples_per_segment: usize,
    },
}

/// How the perpendicular offset is applied to the source points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetMode {
    /// One perpendicular, taken from the first usable segment, applied to every point.
    #[default]
    Uniform,
    /// Each point is pushed along the averaged perpendicular of its neighbouring segments.
    PerSegment,
}

/// Full description of a hint path.
#[derive(Clone, Debug)]
pub struct PathSpec {
    /// Source points or curve.
    pub source: PathSource,
    /// Append a copy of the first point to close the loop.
    pub close_loop: bool,
    /// Perpendicular offset distance in world units.
    pub offset_distance: f64,
    /// Offset policy.
    pub offset_mode: OffsetMode,
}

impl PathSpec {
    /// An open, un-offset path through `points`.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            source: PathSource::Points(points),
            close_loop: false,
            offset_distance: 0.0,
            offset_mode: OffsetMode::Uniform,
        }
    }

    /// An open, un-offset path sampled from `path`.
    pub fn from_curve(path: BezPath, samples_per_segment: usize) -> Self {
        Self {
            source: PathSource::Curve {
                path,
                samples_per_segment,
            },
            close_loop: false,
            offset_distance: 0.0,
            offset_mode: OffsetMode::Uniform,
        }
    }

    /// Set the offset distance and mode.
    pub fn with_offset(mut self, distance: f64, mode: OffsetMode) -> Self {
        self.offset_distance = distance;
        self.offset_mode = mode;
        self
    }

    /// Close (or open) the loop.
    pub fn closed(mut self, close_loop: bool) -> Self {
        self.close_loop = close_loop;
        self
    }

    /// Points produced by the source before loop closing and offsetting.
    pub fn source_points(&self) -> Result<Vec<Point>, PathError> {
        match &self.source {
            PathSource::Points(points) => Ok(points.clone()),
            PathSource::Curve {
                path,
                samples_per_segment,
            } => sample_curve(path, *samples_per_segment),
        }
    }
}

/// Build the offset polyline described by `spec`.
pub fn build_polyline(spec: &PathSpec) -> Result<Polyline, PathError> {
    let mut points = spec.source_points()?;
    if points.len() < 2 {
        return Err(PathError::InsufficientPoints { got: points.len() });
    }
    if spec.close_loop {
        points.push(points[0]);
    }

    let offset = spec.offset_distance;
    let points = if offset == 0.0 {
        points
    } else {
        match spec.offset_mode {
            OffsetMode::Uniform => offset_uniform(&points, offset),
            OffsetMode::PerSegment => offset_per_segment(&points, offset, spec.close_loop),
        }
    };
    Ok(Polyline::new(points, spec.close_loop))
}

fn sample_curve(path: &BezPath, samples: usize) -> Result<Vec<Point>, PathError> {
    if samples == 0 {
        return Err(PathError::InvalidSampling);
    }
    let mut out: Vec<Point> = Vec::new();
    for seg in path.segments() {
        let start = seg.eval(0.0);
        let joined = out
            .last()
            .is_some_and(|last| last.distance(start) < GEOM_EPSILON);
        if !joined {
            out.push(start);
        }
        for i in 1..=samples {
            out.push(seg.eval(i as f64 / samples as f64));
        }
    }
    Ok(out)
}

fn offset_uniform(points: &[Point], distance: f64) -> Vec<Point> {
    let perp = points
        .windows(2)
        .find_map(|w| unit_perp(w[0], w[1]))
        .unwrap_or(Vec2::ZERO);
    points.iter().map(|p| *p + perp * distance).collect()
}

fn offset_per_segment(points: &[Point], distance: f64, closed: bool) -> Vec<Point> {
    let perps: Vec<Option<Vec2>> = points.windows(2).map(|w| unit_perp(w[0], w[1])).collect();
    let wrap_before = perps.iter().rev().find_map(|p| *p);
    let wrap_after = perps.iter().find_map(|p| *p);

    (0..points.len())
        .map(|i| {
            // Nearest usable segment on each side; degenerate ones are skipped.
            let mut before = perps[..i].iter().rev().find_map(|p| *p);
            let mut after = perps[i..].iter().find_map(|p| *p);
            if closed {
                before = before.or(wrap_before);
                after = after.or(wrap_after);
            }
            points[i] + blend_perps(before, after) * distance
        })
        .collect()
}

fn blend_perps(before: Option<Vec2>, after: Option<Vec2>) -> Vec2 {
    match (before, after) {
        (Some(a), Some(b)) => {
            let sum = a + b;
            let len = sum.hypot();
            // A full reversal cancels out; keep the outgoing side.
            if len < GEOM_EPSILON { b } else { sum / len }
        }
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => Vec2::ZERO,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/builder.rs"]
mod tests;
