use std::fmt;

use kurbo::{BezPath, Circle, Line, ParamCurveNearest, Point, Rect, Shape};

/// Opaque containment query answered by an external collision system or by a [`RegionShape`].
pub trait Region {
    /// Whether `p` (world space) lies inside the region.
    fn contains(&self, p: Point) -> bool;
}

impl<F> Region for F
where
    F: Fn(Point) -> bool,
{
    fn contains(&self, p: Point) -> bool {
        self(p)
    }
}

/// Authorable region shapes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionShape {
    /// Disc around `center`.
    Circle {
        /// Centre point.
        center: Point,
        /// Radius in world units.
        radius: f64,
    },
    /// Axis-aligned box spanned by two corners.
    Rect {
        /// One corner.
        min: Point,
        /// Opposite corner.
        max: Point,
    },
    /// Closed polygon (non-zero winding).
    Polygon {
        /// Vertices in order.
        points: Vec<Point>,
    },
    /// Every point within `radius` of the polyline through `points`.
    Capsule {
        /// Spine of the corridor.
        points: Vec<Point>,
        /// Half width.
        radius: f64,
    },
}

impl RegionShape {
    /// Check that the shape can answer containment queries meaningfully.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Circle { radius, .. } if !(*radius > 0.0) => {
                Err(format!("circle radius must be > 0, got {radius}"))
            }
            Self::Polygon { points } if points.len() < 3 => Err(format!(
                "polygon needs at least 3 points, got {}",
                points.len()
            )),
            Self::Capsule { points, .. } if points.is_empty() => {
                Err("capsule needs at least 1 spine point".to_owned())
            }
            Self::Capsule { radius, .. } if !(*radius > 0.0) => {
                Err(format!("capsule radius must be > 0, got {radius}"))
            }
            _ => Ok(()),
        }
    }

    /// A representative point (centre of the shape's bounding box).
    pub fn anchor_point(&self) -> Point {
        match self {
            Self::Circle { center, .. } => *center,
            Self::Rect { min, max } => min.midpoint(*max),
            Self::Polygon { points } | Self::Capsule { points, .. } => {
                bounds(points).map_or(Point::ZERO, |r| r.center())
            }
        }
    }
}

fn bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
    )
}

impl Region for RegionShape {
    fn contains(&self, p: Point) -> bool {
        match self {
            Self::Circle { center, radius } => Circle::new(*center, *radius).contains(p),
            Self::Rect { min, max } => {
                let r = Rect::from_points(*min, *max);
                r.x0 <= p.x && p.x <= r.x1 && r.y0 <= p.y && p.y <= r.y1
            }
            Self::Polygon { points } => {
                let Some((first, rest)) = points.split_first() else {
                    return false;
                };
                let mut path = BezPath::new();
                path.move_to(*first);
                for v in rest {
                    path.line_to(*v);
                }
                path.close_path();
                path.contains(p)
            }
            Self::Capsule { points, radius } => {
                let r2 = radius * radius;
                match points.as_slice() {
                    [] => false,
                    [only] => (p - *only).hypot2() <= r2,
                    spine => spine
                        .windows(2)
                        .any(|w| Line::new(w[0], w[1]).nearest(p, 1e-9).distance_sq <= r2),
                }
            }
        }
    }
}

/// Role of an anchor region within a guide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    /// Where the stroke must begin.
    Start,
    /// Where the stroke completes.
    End,
    /// Interior landmark with a 1-based order.
    Checkpoint(u32),
}

/// The regions one guide validates against.
///
/// A missing piece degrades to the permissive behaviour for that piece.
pub struct GuideRegions {
    start: Option<Box<dyn Region>>,
    end: Option<Box<dyn Region>>,
    corridor: Option<Box<dyn Region>>,
    checkpoints: Vec<(u32, Box<dyn Region>)>,
    enabled: bool,
}

impl fmt::Debug for GuideRegions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuideRegions")
            .field("start", &self.start.is_some())
            .field("end", &self.end.is_some())
            .field("corridor", &self.corridor.is_some())
            .field("checkpoints", &self.checkpoints.len())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Default for GuideRegions {
    fn default() -> Self {
        Self::new()
    }
}

impl GuideRegions {
    /// No regions at all, enabled.
    pub fn new() -> Self {
        Self {
            start: None,
            end: None,
            corridor: None,
            checkpoints: Vec::new(),
            enabled: true,
        }
    }

    /// Set the start-anchor region.
    pub fn with_start(mut self, region: impl Region + 'static) -> Self {
        self.start = Some(Box::new(region));
        self
    }

    /// Set the end-anchor region.
    pub fn with_end(mut self, region: impl Region + 'static) -> Self {
        self.end = Some(Box::new(region));
        self
    }

    /// Set the path corridor.
    pub fn with_corridor(mut self, region: impl Region + 'static) -> Self {
        self.corridor = Some(Box::new(region));
        self
    }

    /// Add a checkpoint region with a 1-based order index.
    pub fn with_checkpoint(mut self, index: u32, region: impl Region + 'static) -> Self {
        self.checkpoints.push((index, Box::new(region)));
        self
    }

    /// Whether a region of this kind was configured.
    pub fn has(&self, kind: AnchorKind) -> bool {
        match kind {
            AnchorKind::Start => self.start.is_some(),
            AnchorKind::End => self.end.is_some(),
            AnchorKind::Checkpoint(i) => self.checkpoints.iter().any(|(idx, _)| *idx == i),
        }
    }

    /// Whether a corridor was configured.
    pub fn has_corridor(&self) -> bool {
        self.corridor.is_some()
    }

    /// Hit test against an anchor; always `false` when missing or disabled.
    pub fn over(&self, kind: AnchorKind, p: Point) -> bool {
        if !self.enabled {
            return false;
        }
        match kind {
            AnchorKind::Start => self.start.as_ref().is_some_and(|r| r.contains(p)),
            AnchorKind::End => self.end.as_ref().is_some_and(|r| r.contains(p)),
            AnchorKind::Checkpoint(i) => self
                .checkpoints
                .iter()
                .any(|(idx, r)| *idx == i && r.contains(p)),
        }
    }

    /// Corridor test; `None` when no corridor is configured.
    pub fn in_corridor(&self, p: Point) -> Option<bool> {
        let corridor = self.corridor.as_ref()?;
        Some(self.enabled && corridor.contains(p))
    }

    /// Indices of every checkpoint region containing `p`.
    pub fn checkpoints_at(&self, p: Point) -> impl Iterator<Item = u32> + '_ {
        self.checkpoints
            .iter()
            .filter(move |(_, r)| self.enabled && r.contains(p))
            .map(|(idx, _)| *idx)
    }

    /// Turn every region off so nothing can hit them again.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Whether regions still answer hits.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/region.rs"]
mod tests;
