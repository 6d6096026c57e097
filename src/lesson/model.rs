use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

use crate::chain::guide::GuideConfig;
use crate::foundation::error::{TraceError, TraceResult};
use crate::hint::follower::FollowerConfig;
use crate::path::builder::{OffsetMode, PathSpec};
use crate::stroke::region::RegionShape;
use crate::stroke::validator::StrokeRules;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub(crate) struct PointDef {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl<'de> Deserialize<'de> for PointDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { x: f64, y: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y]) => Ok(Self { x, y }),
            Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

impl From<PointDef> for Point {
    fn from(p: PointDef) -> Self {
        Point::new(p.x, p.y)
    }
}

fn points(defs: &[PointDef]) -> Vec<Point> {
    defs.iter().copied().map(Point::from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LessonDef {
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) guides: Vec<GuideDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GuideDef {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) next: Option<String>,

    #[serde(default)]
    pub(crate) start: Option<RegionDef>,
    #[serde(default)]
    pub(crate) end: Option<RegionDef>,
    #[serde(default)]
    pub(crate) corridor: Option<RegionDef>,
    #[serde(default)]
    pub(crate) checkpoints: Vec<CheckpointDef>,

    #[serde(default)]
    pub(crate) rules: StrokeRules,
    #[serde(default)]
    pub(crate) settings: GuideConfig,
    #[serde(default)]
    pub(crate) hint: Option<HintDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CheckpointDef {
    pub(crate) index: u32,
    pub(crate) region: RegionDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RegionDef {
    Circle {
        center: PointDef,
        radius: f64,
    },
    Rect {
        min: PointDef,
        max: PointDef,
    },
    Polygon {
        points: Vec<PointDef>,
    },
    Capsule {
        points: Vec<PointDef>,
        radius: f64,
    },
}

impl RegionDef {
    pub(crate) fn to_shape(&self) -> RegionShape {
        match self {
            Self::Circle { center, radius } => RegionShape::Circle {
                center: (*center).into(),
                radius: *radius,
            },
            Self::Rect { min, max } => RegionShape::Rect {
                min: (*min).into(),
                max: (*max).into(),
            },
            Self::Polygon { points: p } => RegionShape::Polygon { points: points(p) },
            Self::Capsule { points: p, radius } => RegionShape::Capsule {
                points: points(p),
                radius: *radius,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct HintDef {
    pub(crate) path: PathDef,
    #[serde(default)]
    pub(crate) motion: FollowerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PathDef {
    pub(crate) source: PathSourceDef,
    #[serde(default)]
    pub(crate) close_loop: bool,
    #[serde(default = "default_offset_distance")]
    pub(crate) offset_distance: f64,
    #[serde(default)]
    pub(crate) offset_mode: OffsetMode,
}

fn default_offset_distance() -> f64 {
    0.2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PathSourceDef {
    Points(Vec<PointDef>),
    Curve {
        /// SVG path data, e.g. `"M0,0 C1,2 3,2 4,0"`.
        svg: String,
        #[serde(default = "default_samples_per_segment")]
        samples_per_segment: usize,
    },
}

fn default_samples_per_segment() -> usize {
    16
}

impl PathDef {
    pub(crate) fn to_spec(&self) -> TraceResult<PathSpec> {
        let spec = match &self.source {
            PathSourceDef::Points(p) => PathSpec::from_points(points(p)),
            PathSourceDef::Curve {
                svg,
                samples_per_segment,
            } => {
                let path = BezPath::from_svg(svg)
                    .map_err(|e| TraceError::config(format!("parse hint curve '{svg}': {e}")))?;
                PathSpec::from_curve(path, *samples_per_segment)
            }
        };
        Ok(spec
            .with_offset(self.offset_distance, self.offset_mode)
            .closed(self.close_loop))
    }
}
