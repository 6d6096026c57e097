//! Per-guide gesture state machine: `Idle -> Tracing -> {Completed | Idle}`.
//!
//! Completion always requires the start anchor to have been touched during the current tracing
//! session. `require_start_on_anchor` only decides whether tracing may begin away from it.

use kurbo::Point;

use crate::stroke::checkpoint::CheckpointTracker;
use crate::stroke::region::{AnchorKind, GuideRegions};
use crate::stroke::trail::Trail;

/// Validation rules for one guide.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokeRules {
    /// Pointer-down must land on the start anchor.
    pub require_start_on_anchor: bool,
    /// The pointer must stay inside the corridor (with grace).
    pub enforce_corridor: bool,
    /// Continuous off-corridor time tolerated before aborting, in seconds.
    pub off_path_grace_secs: f64,
    /// Minimum distance between recorded trail points.
    pub min_point_distance: f64,
}

impl Default for StrokeRules {
    fn default() -> Self {
        Self {
            require_start_on_anchor: true,
            enforce_corridor: true,
            off_path_grace_secs: 0.25,
            min_point_distance: 0.02,
        }
    }
}

/// Coarse validator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeState {
    /// Waiting for a pointer-down.
    Idle,
    /// A gesture is in progress.
    Tracing,
    /// Terminal: the stroke was traced successfully.
    Completed,
}

/// Why a pointer-down did not start tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The guide is already done.
    AlreadyCompleted,
    /// A gesture is already being traced.
    AlreadyTracing,
    /// Start-anchor rule not satisfied.
    NotOnStartAnchor,
    /// Corridor enforcement is on and the point is outside it.
    OutsideCorridor,
}

/// Result of feeding one pointer sample.
#[derive(Clone, Debug, PartialEq)]
pub enum StrokeOutcome {
    /// Nothing to do in the current state.
    Ignored,
    /// Pointer-down dropped; expected during normal play.
    Rejected(RejectReason),
    /// Tracing began.
    Began {
        /// Whether the down point was on the start anchor.
        touched_start: bool,
    },
    /// Still tracing.
    Tracing,
    /// Off-path grace exceeded; trail discarded.
    Aborted,
    /// Lifted or cancelled without completing; trail discarded.
    Discarded,
    /// The stroke completed; the finished trail is handed over.
    Completed(Trail),
}

/// Mutable state of one gesture attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeSession {
    /// Start anchor touched during this session.
    pub touched_start: bool,
    /// End anchor touched during this session.
    pub touched_end: bool,
    /// Continuous time spent outside the corridor.
    pub off_path_timer: f64,
    /// Most recent pointer sample, recorded or not.
    pub last_point: Point,
    /// Recorded brush trail.
    pub trail: Trail,
}

#[derive(Debug)]
enum ValidatorState {
    Idle,
    Tracing(StrokeSession),
    Completed,
}

/// Validates one guide's gestures.
#[derive(Debug)]
pub struct StrokeValidator {
    rules: StrokeRules,
    regions: GuideRegions,
    state: ValidatorState,
    checkpoints: CheckpointTracker,
    new_checkpoints: Vec<u32>,
}

impl StrokeValidator {
    /// Validator over `regions` with `checkpoint_total` ordered checkpoints.
    ///
    /// Missing regions degrade to permissive behaviour and are logged as warnings.
    pub fn new(rules: StrokeRules, regions: GuideRegions, checkpoint_total: u32) -> Self {
        if !regions.has(AnchorKind::Start) {
            tracing::warn!("no start region; tracing may begin anywhere");
        }
        if !regions.has(AnchorKind::End) {
            tracing::warn!("no end region; the stroke completes on release");
        }
        if rules.enforce_corridor && !regions.has_corridor() {
            tracing::warn!("corridor enforcement is on but no corridor is set");
        }
        Self {
            rules,
            regions,
            state: ValidatorState::Idle,
            checkpoints: CheckpointTracker::new(checkpoint_total),
            new_checkpoints: Vec::new(),
        }
    }

    /// Try to begin tracing at `p`.
    pub fn pointer_down(&mut self, p: Point) -> StrokeOutcome {
        match self.state {
            ValidatorState::Completed => {
                return StrokeOutcome::Rejected(RejectReason::AlreadyCompleted);
            }
            ValidatorState::Tracing(_) => {
                return StrokeOutcome::Rejected(RejectReason::AlreadyTracing);
            }
            ValidatorState::Idle => {}
        }

        let start_missing = !self.regions.has(AnchorKind::Start);
        let on_start = self.regions.over(AnchorKind::Start, p);
        if self.rules.require_start_on_anchor && !start_missing && !on_start {
            return StrokeOutcome::Rejected(RejectReason::NotOnStartAnchor);
        }
        if !self.on_path(p) {
            return StrokeOutcome::Rejected(RejectReason::OutsideCorridor);
        }

        let touched_start = on_start || start_missing;
        self.checkpoints.reset();
        self.new_checkpoints.clear();
        self.state = ValidatorState::Tracing(StrokeSession {
            touched_start,
            touched_end: false,
            off_path_timer: 0.0,
            last_point: p,
            trail: Trail::begin(p, self.rules.min_point_distance),
        });
        tracing::debug!(x = p.x, y = p.y, touched_start, "stroke began");
        StrokeOutcome::Began { touched_start }
    }

    /// Feed a drag sample; `dt` is the time since the previous frame.
    pub fn pointer_move(&mut self, p: Point, dt: f64) -> StrokeOutcome {
        let ValidatorState::Tracing(session) = &mut self.state else {
            return StrokeOutcome::Ignored;
        };

        session.last_point = p;
        if grace_exceeded(&self.rules, &self.regions, session, p, dt) {
            return self.abort();
        }

        session.trail.record(p);

        if self.regions.over(AnchorKind::Start, p) {
            session.touched_start = true;
        }
        let over_end = self.regions.over(AnchorKind::End, p);
        if over_end {
            session.touched_end = true;
        }

        for index in self.regions.checkpoints_at(p) {
            if self.checkpoints.register(index) {
                self.new_checkpoints.push(index);
            }
        }

        if session.touched_start && over_end {
            return self.complete();
        }
        StrokeOutcome::Tracing
    }

    /// Pointer still pressed at its last sample for another `dt` seconds.
    ///
    /// Only the off-path timer advances; anchors and checkpoints cannot change without motion.
    pub fn pointer_hold(&mut self, dt: f64) -> StrokeOutcome {
        let ValidatorState::Tracing(session) = &mut self.state else {
            return StrokeOutcome::Ignored;
        };
        let p = session.last_point;
        if grace_exceeded(&self.rules, &self.regions, session, p, dt) {
            return self.abort();
        }
        StrokeOutcome::Tracing
    }

    /// Pointer lifted at `p`.
    pub fn pointer_up(&mut self, p: Point) -> StrokeOutcome {
        let ValidatorState::Tracing(session) = &self.state else {
            return StrokeOutcome::Ignored;
        };
        let end_reached = if self.regions.has(AnchorKind::End) {
            self.regions.over(AnchorKind::End, p)
        } else {
            true
        };
        if session.touched_start && end_reached {
            return self.complete();
        }
        tracing::debug!("stroke lifted before completion");
        self.state = ValidatorState::Idle;
        StrokeOutcome::Discarded
    }

    /// Drop any gesture in progress.
    pub fn cancel(&mut self) -> StrokeOutcome {
        if !matches!(self.state, ValidatorState::Tracing(_)) {
            return StrokeOutcome::Ignored;
        }
        self.state = ValidatorState::Idle;
        StrokeOutcome::Discarded
    }

    /// Turn off corridor and anchors so the guide cannot be re-entered.
    pub fn disable_regions(&mut self) {
        self.regions.disable();
    }

    /// Coarse state.
    pub fn state(&self) -> StrokeState {
        match self.state {
            ValidatorState::Idle => StrokeState::Idle,
            ValidatorState::Tracing(_) => StrokeState::Tracing,
            ValidatorState::Completed => StrokeState::Completed,
        }
    }

    /// `true` while a gesture is in progress.
    pub fn is_tracing(&self) -> bool {
        matches!(self.state, ValidatorState::Tracing(_))
    }

    /// `true` once completed.
    pub fn is_completed(&self) -> bool {
        matches!(self.state, ValidatorState::Completed)
    }

    /// The session in progress, if any.
    pub fn session(&self) -> Option<&StrokeSession> {
        match &self.state {
            ValidatorState::Tracing(session) => Some(session),
            _ => None,
        }
    }

    /// Checkpoint progress of the latest session.
    pub fn checkpoints(&self) -> &CheckpointTracker {
        &self.checkpoints
    }

    /// Checkpoints newly counted since the last call.
    pub fn drain_checkpoint_hits(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.new_checkpoints)
    }

    /// Rules in force.
    pub fn rules(&self) -> &StrokeRules {
        &self.rules
    }

    /// Regions validated against.
    pub fn regions(&self) -> &GuideRegions {
        &self.regions
    }

    fn on_path(&self, p: Point) -> bool {
        !self.rules.enforce_corridor || self.regions.in_corridor(p).unwrap_or(true)
    }

    fn abort(&mut self) -> StrokeOutcome {
        if let ValidatorState::Tracing(session) = &self.state {
            tracing::debug!(
                off_path = session.off_path_timer,
                "stroke aborted: left the corridor"
            );
        }
        self.state = ValidatorState::Idle;
        StrokeOutcome::Aborted
    }

    fn complete(&mut self) -> StrokeOutcome {
        let ValidatorState::Tracing(session) =
            std::mem::replace(&mut self.state, ValidatorState::Completed)
        else {
            return StrokeOutcome::Ignored;
        };
        tracing::debug!(points = session.trail.points().len(), "stroke completed");
        StrokeOutcome::Completed(session.trail)
    }
}

/// Advance or reset the off-path timer for a sample at `p`; `true` once grace is used up.
fn grace_exceeded(
    rules: &StrokeRules,
    regions: &GuideRegions,
    session: &mut StrokeSession,
    p: Point,
    dt: f64,
) -> bool {
    if !rules.enforce_corridor {
        return false;
    }
    match regions.in_corridor(p) {
        Some(false) => {
            session.off_path_timer += dt.max(0.0);
            session.off_path_timer >= rules.off_path_grace_secs
        }
        Some(true) => {
            session.off_path_timer = 0.0;
            false
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/validator.rs"]
mod tests;
