//! Frame-stepped timing primitives.
//!
//! Every long-running behaviour in the engine (fades, pauses, delayed hints, handoff waits) is an
//! explicit accumulator advanced once per frame by the owner's `tick`. Nothing here sleeps or
//! spawns; dropping or replacing the value is the cancellation.

use crate::animation::ease::Ease;
use crate::foundation::core::clamp_opacity;

/// Elapsed-time accumulator that becomes due after `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Delay {
    duration: f64,
    elapsed: f64,
}

impl Delay {
    /// A delay of `duration` seconds (negative values count as zero).
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by one frame and report whether the delay is due.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.elapsed += dt.max(0.0);
        self.is_due()
    }

    /// `true` once the accumulated time reached the duration.
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Seconds accumulated so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Configured duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seconds still to wait before the delay is due.
    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }
}

/// Opacity tween from `from` to `to` over `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    from: f64,
    to: f64,
    duration: f64,
    t: f64,
    ease: Ease,
}

impl Fade {
    /// Start a fade. A non-positive duration completes on the first tick.
    pub fn new(from: f64, to: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from: clamp_opacity(from),
            to: clamp_opacity(to),
            duration,
            t: 0.0,
            ease,
        }
    }

    /// Advance by one frame and return the opacity for this frame.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if self.duration <= 0.0 {
            self.t = 1.0;
        } else {
            self.t = (self.t + dt.max(0.0) / self.duration).min(1.0);
        }
        self.value()
    }

    /// Current opacity.
    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }
        self.ease.interpolate(self.from, self.to, self.t)
    }

    /// `true` once the target was reached.
    pub fn is_done(&self) -> bool {
        self.t >= 1.0
    }

    /// Target opacity.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Seconds until the target is reached.
    pub fn remaining(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (1.0 - self.t).max(0.0) * self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
