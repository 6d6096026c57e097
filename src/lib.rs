//! stroketrace is a frame-driven stroke tracing engine for letter and shape lessons.
//!
//! A lesson is a chain of guides. Each guide validates one continuous pointer gesture against a
//! start anchor, an end anchor and a path corridor, and plays an idle hint marker along the
//! expected path while nobody is drawing. The public API is frame-oriented:
//!
//! - Load and validate a [`Lesson`]
//! - Build a [`GuideChain`] with [`Lesson::build_chain`]
//! - Feed one [`FrameInput`] per frame to [`GuideChain::frame`] and react to the [`ChainEvent`]s
//!
//! See [`walkthrough`] for the full picture.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub(crate) mod animation;
pub(crate) mod chain;
mod foundation;
pub(crate) mod hint;
pub(crate) mod input;
pub(crate) mod lesson;
pub(crate) mod path;
pub(crate) mod stroke;
pub mod walkthrough;

pub use crate::foundation::core::{BezPath, GuideId, Point, Rect, Vec2, clamp_opacity};
pub use crate::foundation::error::{PathError, TraceError, TraceResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::{Delay, Fade};
pub use crate::chain::guide::{Guide, GuideConfig, GuidePhase, GuideSignal, GuideVisuals};
pub use crate::chain::orchestrator::{ChainEvent, CompletionSink, GuideChain, NullSink};
pub use crate::chain::ownership::HintOwnership;
pub use crate::hint::follower::{
    FollowerConfig, FollowerEvent, FollowerPhase, PathFollower, PlaybackMode, RotationMode,
    StartAnchor, segment_duration,
};
pub use crate::hint::marker::{Marker, VisualHandle};
pub use crate::input::pointer::{FrameInput, PointerEvent};
pub use crate::input::script::{GestureScript, ReplayedEvent};
pub use crate::lesson::document::Lesson;
pub use crate::lesson::validate::{ConfigWarning, WarningKind};
pub use crate::path::builder::{OffsetMode, PathSource, PathSpec, build_polyline};
pub use crate::path::polyline::Polyline;
pub use crate::stroke::checkpoint::CheckpointTracker;
pub use crate::stroke::region::{AnchorKind, GuideRegions, Region, RegionShape};
pub use crate::stroke::trail::{FadingTrail, Trail};
pub use crate::stroke::validator::{
    RejectReason, StrokeOutcome, StrokeRules, StrokeSession, StrokeState, StrokeValidator,
};
