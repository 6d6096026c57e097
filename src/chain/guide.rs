//! One trace-and-validate unit: a stroke validator, an optional idle hint and the visuals that
//! react to completion.

use kurbo::Point;

use crate::animation::ease::Ease;
use crate::animation::tween::{Delay, Fade};
use crate::chain::ownership::HintOwnership;
use crate::foundation::core::GuideId;
use crate::hint::follower::PathFollower;
use crate::hint::marker::Marker;
use crate::stroke::checkpoint::CheckpointTracker;
use crate::stroke::trail::{FadingTrail, Trail};
use crate::stroke::validator::{StrokeOutcome, StrokeState, StrokeValidator};

/// Per-guide timing and presentation settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Claims the hint token on activation when nobody holds it.
    pub starter: bool,
    /// Wait before (re)showing the idle hint, in seconds.
    pub idle_hint_delay: f64,
    /// Wait between completion and handoff, in seconds.
    pub delay_before_next: f64,
    /// Fade the guide itself out after handoff.
    pub fade_out_on_complete: bool,
    /// Guide fade-out time in seconds.
    pub fade_duration: f64,
    /// Fade the finished trail instead of dropping it.
    pub fade_trail_on_complete: bool,
    /// Trail fade-out time in seconds.
    pub trail_fade_duration: f64,
    /// Fill fade-in time in seconds.
    pub fill_fade_duration: f64,
    /// The guide has a fill visual revealed on completion.
    pub has_fill: bool,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            starter: false,
            idle_hint_delay: 0.3,
            delay_before_next: 0.5,
            fade_out_on_complete: true,
            fade_duration: 0.25,
            fade_trail_on_complete: false,
            trail_fade_duration: 0.2,
            fill_fade_duration: 0.3,
            has_fill: false,
        }
    }
}

/// Lifecycle of a guide inside a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidePhase {
    /// Not yet reached by the chain.
    Inactive,
    /// Accepting strokes.
    Active,
    /// Stroke done; waiting for handoff or fading out.
    Completing,
    /// Fully deactivated.
    Retired,
}

/// Something the chain has to act on after a guide tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuideSignal {
    /// The post-completion delay elapsed; hand off to the successor now.
    HandoffDue,
    /// The guide finished fading and is deactivated.
    Retired,
}

/// Render snapshot of one guide.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GuideVisuals {
    /// Opacity of the guide artwork.
    pub opacity: f64,
    /// Fill opacity once revealed; `None` while hidden or when the guide has no fill.
    pub fill_opacity: Option<f64>,
    /// Trail being drawn right now.
    pub live_trail: Option<Trail>,
    /// Finished trails still fading out.
    pub fading_trails: Vec<Trail>,
    /// Hint marker, when the guide has a hint.
    pub hint: Option<Marker>,
}

#[derive(Clone, Copy, Debug)]
enum Finish {
    AwaitHandoff(Delay),
    FadingOut(Fade),
}

#[derive(Clone, Copy, Debug)]
struct Fill {
    opacity: f64,
    fade: Fade,
}

/// A guide: validator, idle hint and completion visuals.
#[derive(Debug)]
pub struct Guide {
    id: GuideId,
    config: GuideConfig,
    validator: StrokeValidator,
    hint: Option<PathFollower>,
    phase: GuidePhase,
    pending_hint: Option<Delay>,
    suppress_activation_delay: bool,
    held_hint_at_completion: bool,
    finish: Option<Finish>,
    opacity: f64,
    fill: Option<Fill>,
    fading_trails: Vec<FadingTrail>,
}

impl Guide {
    /// Inactive guide with default settings and no hint.
    pub fn new(id: GuideId, validator: StrokeValidator) -> Self {
        Self {
            id,
            config: GuideConfig::default(),
            validator,
            hint: None,
            phase: GuidePhase::Inactive,
            pending_hint: None,
            suppress_activation_delay: false,
            held_hint_at_completion: false,
            finish: None,
            opacity: 1.0,
            fill: None,
            fading_trails: Vec::new(),
        }
    }

    /// Replace the settings.
    pub fn with_config(mut self, config: GuideConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach an idle hint.
    pub fn with_hint(mut self, hint: PathFollower) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Identity within the chain.
    pub fn id(&self) -> GuideId {
        self.id
    }

    /// Settings.
    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> GuidePhase {
        self.phase
    }

    /// Validator state.
    pub fn stroke_state(&self) -> StrokeState {
        self.validator.state()
    }

    /// The stroke was traced successfully.
    pub fn is_completed(&self) -> bool {
        self.validator.is_completed()
    }

    /// A stroke is in progress.
    pub fn is_tracing(&self) -> bool {
        self.validator.is_tracing()
    }

    /// Checkpoint credit of the latest stroke.
    pub fn checkpoints(&self) -> &CheckpointTracker {
        self.validator.checkpoints()
    }

    /// The idle hint, if configured.
    pub fn hint(&self) -> Option<&PathFollower> {
        self.hint.as_ref()
    }

    /// `true` while the hint marker is visible and animating.
    pub fn hint_active(&self) -> bool {
        self.hint.as_ref().is_some_and(PathFollower::is_animating)
    }

    /// A delayed hint is waiting to show.
    pub fn hint_pending(&self) -> bool {
        self.pending_hint.is_some()
    }

    /// Whether this guide held the hint token when its stroke completed.
    pub fn held_hint_at_completion(&self) -> bool {
        self.held_hint_at_completion
    }

    /// Render snapshot.
    pub fn visuals(&self) -> GuideVisuals {
        GuideVisuals {
            opacity: self.opacity,
            fill_opacity: self.fill.map(|f| f.opacity),
            live_trail: self.validator.session().map(|s| s.trail.clone()),
            fading_trails: self
                .fading_trails
                .iter()
                .map(|t| t.trail().clone())
                .collect(),
            hint: self.hint.as_ref().map(|h| *h.marker()),
        }
    }

    /// Bring the guide into play.
    ///
    /// A starter claims the vacant token. The holder then schedules its idle hint unless the
    /// activation came from a handoff, which shows the hint right away instead.
    pub fn activate(&mut self, own: &mut HintOwnership) {
        if self.phase != GuidePhase::Inactive {
            return;
        }
        self.phase = GuidePhase::Active;
        if self.config.starter {
            own.claim_if_vacant(self.id);
        }
        let suppressed = std::mem::take(&mut self.suppress_activation_delay);
        if !suppressed {
            self.rearm_hint(own);
        }
        tracing::debug!(guide = %self.id, suppressed, "guide activated");
    }

    /// Take the guide out of play: drop any stroke, stop the hint and give up the token.
    pub fn deactivate(&mut self, own: &mut HintOwnership) {
        self.pending_hint = None;
        self.validator.cancel();
        if let Some(hint) = &mut self.hint {
            hint.hide();
        }
        if own.release(self.id) {
            tracing::debug!(guide = %self.id, "token released on deactivation");
        }
        if self.phase == GuidePhase::Active {
            self.phase = GuidePhase::Inactive;
        }
    }

    /// Skip the on-activation hint delay for the next activation only.
    pub(crate) fn suppress_activation_delay(&mut self) {
        self.suppress_activation_delay = true;
    }

    /// Pointer went down at `p`.
    pub fn pointer_down(&mut self, p: Point, own: &mut HintOwnership) -> StrokeOutcome {
        if self.phase != GuidePhase::Active {
            return StrokeOutcome::Ignored;
        }
        let outcome = self.validator.pointer_down(p);
        if let StrokeOutcome::Began { .. } = outcome {
            self.pending_hint = None;
            if let Some(hint) = &mut self.hint {
                hint.hide();
            }
        }
        self.settle(outcome, own)
    }

    /// Pointer dragged to `p`; `dt` feeds the off-path timer.
    pub fn pointer_move(&mut self, p: Point, dt: f64, own: &mut HintOwnership) -> StrokeOutcome {
        if self.phase != GuidePhase::Active {
            return StrokeOutcome::Ignored;
        }
        let outcome = self.validator.pointer_move(p, dt);
        self.settle(outcome, own)
    }

    /// Pointer held still for `dt` seconds while pressed.
    pub fn pointer_hold(&mut self, dt: f64, own: &mut HintOwnership) -> StrokeOutcome {
        if self.phase != GuidePhase::Active {
            return StrokeOutcome::Ignored;
        }
        let outcome = self.validator.pointer_hold(dt);
        self.settle(outcome, own)
    }

    /// Pointer lifted at `p`.
    pub fn pointer_up(&mut self, p: Point, own: &mut HintOwnership) -> StrokeOutcome {
        if self.phase != GuidePhase::Active {
            return StrokeOutcome::Ignored;
        }
        let outcome = self.validator.pointer_up(p);
        self.settle(outcome, own)
    }

    /// Pointer capture lost: discard the stroke in progress.
    pub fn cancel_stroke(&mut self, own: &mut HintOwnership) -> StrokeOutcome {
        let outcome = self.validator.cancel();
        self.settle(outcome, own)
    }

    /// Checkpoints newly counted since the last call.
    pub fn drain_checkpoint_hits(&mut self) -> Vec<u32> {
        self.validator.drain_checkpoint_hits()
    }

    /// Schedule the idle hint after `idle_hint_delay`, if this guide may show it.
    pub fn rearm_hint(&mut self, own: &HintOwnership) {
        if self.hint.is_none() || self.is_completed() || !own.is_held_by(self.id) {
            return;
        }
        self.pending_hint = Some(Delay::new(self.config.idle_hint_delay));
    }

    /// Show the hint now, skipping the idle delay. No-op unless this guide holds the token and
    /// is neither tracing nor completed.
    pub fn show_hint_immediately(&mut self, own: &HintOwnership) -> bool {
        if self.is_completed() || self.is_tracing() || !own.is_held_by(self.id) {
            return false;
        }
        let Some(hint) = &mut self.hint else {
            return false;
        };
        self.pending_hint = None;
        hint.show()
    }

    /// Replay the hint on request. Ignores the tracing state, unlike [`Self::show_hint_immediately`].
    pub fn play_hint(&mut self, own: &HintOwnership) -> bool {
        if self.is_completed() || !own.is_held_by(self.id) {
            return false;
        }
        let Some(hint) = &mut self.hint else {
            return false;
        };
        self.pending_hint = None;
        hint.show()
    }

    /// Hide the hint and keep it off.
    pub fn stop_hint(&mut self) {
        if let Some(hint) = &mut self.hint {
            hint.disable();
        }
    }

    /// Advance every timer of this guide by one frame.
    pub fn tick(&mut self, dt: f64, own: &mut HintOwnership) -> Vec<GuideSignal> {
        let mut signals = Vec::new();

        if let Some(mut delay) = self.pending_hint.take() {
            if delay.tick(dt) {
                if own.is_held_by(self.id) && !self.is_tracing() && !self.is_completed() {
                    if let Some(hint) = &mut self.hint {
                        hint.show();
                    }
                }
            } else {
                self.pending_hint = Some(delay);
            }
        }

        if let Some(hint) = &mut self.hint {
            if let Some(event) = hint.tick(dt) {
                tracing::trace!(guide = %self.id, ?event, "hint");
            }
        }

        self.fading_trails.retain_mut(|t| !t.tick(dt));

        if let Some(fill) = &mut self.fill {
            fill.opacity = fill.fade.tick(dt);
        }

        match self.finish {
            Some(Finish::AwaitHandoff(mut delay)) => {
                if delay.tick(dt) {
                    signals.push(GuideSignal::HandoffDue);
                    if self.config.fade_out_on_complete {
                        self.finish = Some(Finish::FadingOut(Fade::new(
                            self.opacity,
                            0.0,
                            self.config.fade_duration,
                            Ease::Linear,
                        )));
                    } else {
                        self.retire(own);
                        signals.push(GuideSignal::Retired);
                    }
                } else {
                    self.finish = Some(Finish::AwaitHandoff(delay));
                }
            }
            Some(Finish::FadingOut(mut fade)) => {
                self.opacity = fade.tick(dt);
                if fade.is_done() {
                    self.retire(own);
                    signals.push(GuideSignal::Retired);
                } else {
                    self.finish = Some(Finish::FadingOut(fade));
                }
            }
            None => {}
        }

        signals
    }

    fn settle(&mut self, outcome: StrokeOutcome, own: &mut HintOwnership) -> StrokeOutcome {
        match &outcome {
            StrokeOutcome::Aborted | StrokeOutcome::Discarded => self.rearm_hint(own),
            StrokeOutcome::Completed(trail) => self.complete(trail, own),
            _ => {}
        }
        outcome
    }

    fn complete(&mut self, trail: &Trail, own: &mut HintOwnership) {
        if self.config.fade_trail_on_complete {
            self.fading_trails
                .push(FadingTrail::new(trail.clone(), self.config.trail_fade_duration));
        }
        self.validator.disable_regions();
        self.pending_hint = None;
        self.stop_hint();
        if self.config.has_fill {
            self.fill = Some(Fill {
                opacity: 0.0,
                fade: Fade::new(0.0, 1.0, self.config.fill_fade_duration, Ease::Linear),
            });
        }
        self.held_hint_at_completion = own.release(self.id);
        self.phase = GuidePhase::Completing;
        self.finish = Some(Finish::AwaitHandoff(Delay::new(
            self.config.delay_before_next,
        )));
        tracing::info!(guide = %self.id, points = trail.points().len(), "guide completed");
    }

    fn retire(&mut self, own: &mut HintOwnership) {
        self.finish = None;
        self.validator.disable_regions();
        self.stop_hint();
        self.deactivate(own);
        self.phase = GuidePhase::Retired;
        tracing::debug!(guide = %self.id, "guide retired");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chain/guide.rs"]
mod tests;
