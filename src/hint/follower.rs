//! Idle hint animator: walks a marker along a polyline at constant speed.
//!
//! The original per-frame coroutine is an explicit [`Step`] machine here. Each call to
//! [`PathFollower::tick`] is one frame; every phase stores its own accumulator and is checked
//! again on the next tick, so [`PathFollower::hide`] takes effect before the next frame is drawn.

use kurbo::Point;

use crate::animation::ease::Ease;
use crate::animation::tween::{Delay, Fade};
use crate::foundation::math::{TIME_EPSILON, heading};
use crate::hint::marker::Marker;
use crate::path::builder::{PathSpec, build_polyline};
use crate::path::polyline::Polyline;

/// Time to cover a segment of `length` at `speed` units per second, never below a small epsilon.
pub fn segment_duration(length: f64, speed: f64) -> f64 {
    (length / speed).max(TIME_EPSILON)
}

/// What happens when the marker reaches the end of the path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Fade out, pause, stop and hide.
    Once,
    /// Fade out, pause, jump back to the start anchor and run again.
    #[default]
    Loop,
    /// Fade out, pause, then run back the other way.
    PingPong,
}

/// Which end of the polyline the marker starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartAnchor {
    /// First point, travelling forward.
    #[default]
    First,
    /// Last point, travelling backward.
    Last,
}

/// Marker orientation policy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RotationMode {
    /// Same rotation for the whole run.
    Fixed {
        /// Rotation around Z in degrees.
        degrees: f64,
    },
    /// Face along the current segment, plus a constant offset.
    AlignToPath {
        /// Added to the segment heading, in degrees.
        #[serde(default)]
        offset_degrees: f64,
    },
}

impl Default for RotationMode {
    fn default() -> Self {
        Self::Fixed { degrees: 50.0 }
    }
}

/// Hint playback tunables.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FollowerConfig {
    /// Travel speed in world units per second.
    pub speed: f64,
    /// Fade in/out time in seconds.
    pub fade_duration: f64,
    /// Pause at the end of each pass, in seconds.
    pub pause_duration: f64,
    /// Easing used by both fades.
    pub fade_ease: Ease,
    /// Orientation policy.
    pub rotation: RotationMode,
    /// End-of-path policy.
    pub playback: PlaybackMode,
    /// Starting end of the path.
    pub start_anchor: StartAnchor,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            fade_duration: 0.5,
            pause_duration: 1.0,
            fade_ease: Ease::Linear,
            rotation: RotationMode::default(),
            playback: PlaybackMode::Loop,
            start_anchor: StartAnchor::First,
        }
    }
}

/// Coarse phase of the animator, for callers and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowerPhase {
    /// Not started or hidden.
    Idle,
    /// Fading the marker in at the start anchor.
    FadingIn,
    /// Moving along a segment.
    Traveling,
    /// Fading out at the end of a pass.
    FadingOut,
    /// Waiting before the next pass.
    Paused,
    /// Finished a `Once` run.
    Stopped,
}

/// Notable things that happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowerEvent {
    /// The marker snapped onto the point with this index.
    ReachedPoint(usize),
    /// A new pass began (loop or ping-pong).
    Restarted,
    /// A `Once` run finished and the marker was hidden.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    fn step(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Forward => (index + 1 < len).then_some(index + 1),
            Self::Backward => index.checked_sub(1),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    from: Point,
    to: Point,
    target: usize,
    duration: f64,
    t: f64,
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Idle,
    FadingIn(Fade),
    Traveling(Segment),
    FadingOut(Fade),
    Paused(Delay),
    Stopped,
}

/// Drives a hint marker along the polyline built from a [`PathSpec`].
#[derive(Clone, Debug)]
pub struct PathFollower {
    spec: PathSpec,
    config: FollowerConfig,
    polyline: Option<Polyline>,
    marker: Marker,
    step: Step,
    index: usize,
    direction: Direction,
    enabled: bool,
}

impl PathFollower {
    /// New, hidden follower. Nothing is built until [`Self::show`].
    pub fn new(spec: PathSpec, config: FollowerConfig) -> Self {
        Self {
            spec,
            config,
            polyline: None,
            marker: Marker::default(),
            step: Step::Idle,
            index: 0,
            direction: Direction::Forward,
            enabled: true,
        }
    }

    /// Rebuild the path, place the marker on the start anchor at opacity 0 and begin fading in.
    ///
    /// Returns `false` (and changes nothing) when disabled, when the speed is not positive or when
    /// the path has fewer than two points.
    pub fn show(&mut self) -> bool {
        if !self.rebuild() {
            return false;
        }
        self.rewind();
        self.marker.visible = true;
        self.marker.opacity = 0.0;
        self.step = Step::FadingIn(self.fade_to(1.0));
        tracing::debug!(points = self.polyline.as_ref().map_or(0, Polyline::len), "hint shown");
        true
    }

    /// Like [`Self::show`] but fades in from the current opacity instead of from 0.
    pub fn restart(&mut self) -> bool {
        if !self.rebuild() {
            return false;
        }
        self.rewind();
        self.marker.visible = true;
        self.step = Step::FadingIn(self.fade_to(1.0));
        true
    }

    /// Stop any animation and hide the marker. Always safe to call.
    pub fn hide(&mut self) {
        if !matches!(self.step, Step::Idle) {
            tracing::debug!("hint hidden");
        }
        self.step = Step::Idle;
        self.marker.visible = false;
    }

    /// Hide and refuse any further [`Self::show`] until [`Self::enable`].
    pub fn disable(&mut self) {
        self.hide();
        self.enabled = false;
    }

    /// Allow [`Self::show`] again.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Whether [`Self::show`] is allowed.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `true` while the marker is visible and some phase is running.
    pub fn is_animating(&self) -> bool {
        self.marker.visible && !matches!(self.step, Step::Idle | Step::Stopped)
    }

    /// Current phase.
    pub fn phase(&self) -> FollowerPhase {
        match self.step {
            Step::Idle => FollowerPhase::Idle,
            Step::FadingIn(_) => FollowerPhase::FadingIn,
            Step::Traveling(_) => FollowerPhase::Traveling,
            Step::FadingOut(_) => FollowerPhase::FadingOut,
            Step::Paused(_) => FollowerPhase::Paused,
            Step::Stopped => FollowerPhase::Stopped,
        }
    }

    /// Marker state to render this frame.
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Polyline built by the last successful show.
    pub fn polyline(&self) -> Option<&Polyline> {
        self.polyline.as_ref()
    }

    /// Index of the last point the marker sat on.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Playback tunables.
    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    /// Path description.
    pub fn spec(&self) -> &PathSpec {
        &self.spec
    }

    /// Advance one frame.
    ///
    /// Time left over when a fade or pause finishes carries into the next phase within the same
    /// tick, so zero-length fades and pauses cost no frame. A tick ends at the first event.
    pub fn tick(&mut self, dt: f64) -> Option<FollowerEvent> {
        let mut dt = dt.max(0.0);
        loop {
            match self.step {
                Step::Idle | Step::Stopped => return None,
                Step::FadingIn(mut fade) => {
                    let left = fade.remaining();
                    self.marker.opacity = fade.tick(dt);
                    if !fade.is_done() {
                        self.step = Step::FadingIn(fade);
                        return None;
                    }
                    self.step = self.advance();
                    dt = (dt - left).max(0.0);
                }
                Step::Traveling(mut seg) => {
                    seg.t += dt / seg.duration;
                    if seg.t < 1.0 {
                        self.marker.position = seg.from.lerp(seg.to, seg.t);
                        self.step = Step::Traveling(seg);
                        return None;
                    }
                    // Last frame of the segment: snap, no drift.
                    self.marker.position = seg.to;
                    self.index = seg.target;
                    self.step = self.advance();
                    return Some(FollowerEvent::ReachedPoint(seg.target));
                }
                Step::FadingOut(mut fade) => {
                    let left = fade.remaining();
                    self.marker.opacity = fade.tick(dt);
                    if !fade.is_done() {
                        self.step = Step::FadingOut(fade);
                        return None;
                    }
                    self.step = Step::Paused(Delay::new(self.config.pause_duration));
                    dt = (dt - left).max(0.0);
                }
                Step::Paused(mut delay) => {
                    if !delay.tick(dt) {
                        self.step = Step::Paused(delay);
                        return None;
                    }
                    return self.end_of_pass();
                }
            }
        }
    }

    fn end_of_pass(&mut self) -> Option<FollowerEvent> {
        match self.config.playback {
            PlaybackMode::Once => {
                self.step = Step::Stopped;
                self.marker.visible = false;
                tracing::debug!("hint run finished");
                Some(FollowerEvent::Stopped)
            }
            PlaybackMode::Loop => {
                self.rewind();
                self.step = Step::FadingIn(self.fade_to(1.0));
                Some(FollowerEvent::Restarted)
            }
            PlaybackMode::PingPong => {
                let last = self
                    .polyline
                    .as_ref()
                    .map_or(0, |line| line.len().saturating_sub(1));
                self.direction = self.direction.reversed();
                self.index = self.index.min(last);
                self.step = Step::FadingIn(self.fade_to(1.0));
                Some(FollowerEvent::Restarted)
            }
        }
    }

    fn rebuild(&mut self) -> bool {
        if !self.enabled {
            tracing::debug!("hint disabled; show ignored");
            return false;
        }
        if self.config.speed.is_nan() || self.config.speed <= 0.0 {
            tracing::warn!(speed = self.config.speed, "hint speed must be positive; not showing");
            return false;
        }
        match build_polyline(&self.spec) {
            Ok(line) => {
                self.polyline = Some(line);
                true
            }
            Err(err) => {
                tracing::warn!(%err, "hint path unusable; not showing");
                false
            }
        }
    }

    fn rewind(&mut self) {
        let Some(line) = &self.polyline else {
            return;
        };
        let last = line.len().saturating_sub(1);
        (self.index, self.direction) = match self.config.start_anchor {
            StartAnchor::First => (0, Direction::Forward),
            StartAnchor::Last => (last, Direction::Backward),
        };
        if let Some(p) = line.point(self.index) {
            self.marker.position = p;
        }
        match self.config.rotation {
            RotationMode::Fixed { degrees } => self.marker.rotation_rad = degrees.to_radians(),
            RotationMode::AlignToPath { offset_degrees } => {
                let h = self
                    .direction
                    .step(self.index, line.len())
                    .and_then(|n| heading(line.points()[self.index], line.points()[n]));
                if let Some(h) = h {
                    self.marker.rotation_rad = h + offset_degrees.to_radians();
                }
            }
        }
    }

    fn advance(&mut self) -> Step {
        let Some(line) = &self.polyline else {
            return Step::Idle;
        };
        let Some(target) = self.direction.step(self.index, line.len()) else {
            return Step::FadingOut(self.fade_to(0.0));
        };
        let from = line.points()[self.index];
        let to = line.points()[target];
        if let RotationMode::AlignToPath { offset_degrees } = self.config.rotation {
            if let Some(h) = heading(from, to) {
                self.marker.rotation_rad = h + offset_degrees.to_radians();
            }
        }
        Step::Traveling(Segment {
            from,
            to,
            target,
            duration: segment_duration(from.distance(to), self.config.speed),
            t: 0.0,
        })
    }

    fn fade_to(&self, target: f64) -> Fade {
        Fade::new(
            self.marker.opacity,
            target,
            self.config.fade_duration,
            self.config.fade_ease,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hint/follower.rs"]
mod tests;
