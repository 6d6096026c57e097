//! # stroketrace walkthrough
//!
//! An end-to-end tour of how a lesson is described, validated and driven frame by frame.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Lesson`](crate::Lesson): the JSON boundary object (guides, regions, rules, hints, links)
//! - [`GuideChain`](crate::GuideChain): the runtime chain built from a lesson
//! - [`Guide`](crate::Guide): one stroke; owns a [`StrokeValidator`](crate::StrokeValidator) and
//!   an optional [`PathFollower`](crate::PathFollower) hint
//! - [`HintOwnership`](crate::HintOwnership): the single token deciding whose hint may play
//! - [`FrameInput`](crate::FrameInput): pointer samples plus the frame's `dt`
//! - [`ChainEvent`](crate::ChainEvent): what happened during a frame
//!
//! ---
//!
//! ## Frames, not coroutines
//!
//! Nothing in the engine sleeps, spawns or runs in the background. Every long-running behaviour
//! (fades, travel along a segment, the idle-hint delay, end-of-path pauses, the handoff delay) is
//! a small accumulator advanced by a `tick(dt)` call. Hiding a hint or cancelling a delay simply
//! replaces that state, so it takes effect on the very next tick.
//!
//! [`GuideChain::frame`](crate::GuideChain::frame) always processes pointer input before it ticks
//! any timer. A press that begins a stroke therefore cancels a pending hint before that hint could
//! appear in the same frame.
//!
//! ---
//!
//! ## Validating a stroke
//!
//! A press starts tracing only when the guide is not completed, the press satisfies the start
//! rule (or `require_start_on_anchor` is off) and, with corridor enforcement on, the press is
//! inside the corridor. While tracing:
//!
//! - leaving the corridor accumulates an off-path timer; it resets to zero on re-entry and aborts
//!   the stroke once it reaches `off_path_grace_secs`; a frame without any `Move` counts as the
//!   pointer resting at its last sample, so holding still off the path aborts too
//! - passing over the start anchor marks it as touched
//! - reaching the end anchor after the start was touched completes the stroke immediately
//!
//! Completion always requires the start anchor to have been touched in the current session; the
//! start rule only decides where tracing may begin. A missing start region counts as touched, a
//! missing end region completes the stroke on release, and a missing corridor is never enforced.
//!
//! ---
//!
//! ## Hint ownership and handoff
//!
//! Only the token holder may show its idle hint, so at most one hint animates at any time. A
//! starter guide claims the vacant token when it is activated; completing a guide releases it.
//! After `delay_before_next` the chain hands off: the token moves to the successor (when the
//! completed guide held it), the successor skips its usual idle delay and shows its hint at once,
//! and only then does the completed guide fade out and retire.
//!
//! ```
//! use stroketrace::{FrameInput, Lesson, NullSink, PointerEvent, Point};
//!
//! let json = r#"{
//!     "guides": [{
//!         "id": "line",
//!         "start": {"circle": {"center": [0, 0], "radius": 0.5}},
//!         "end": {"circle": {"center": [4, 0], "radius": 0.5}},
//!         "corridor": {"capsule": {"points": [[0, 0], [4, 0]], "radius": 1}},
//!         "settings": {"starter": true}
//!     }]
//! }"#;
//! let lesson = Lesson::from_reader(json.as_bytes()).unwrap();
//! let mut chain = lesson.build_chain().unwrap();
//!
//! let stroke = FrameInput::with_events(
//!     1.0 / 60.0,
//!     [
//!         PointerEvent::Down(Point::new(0.0, 0.0)),
//!         PointerEvent::Move(Point::new(2.0, 0.0)),
//!         PointerEvent::Move(Point::new(4.0, 0.0)),
//!     ],
//! );
//! let events = chain.frame(&stroke, &mut NullSink);
//! assert!(chain.current_guide().is_completed());
//! assert_eq!(events.len(), 2);
//! ```
//!
//! ---
//!
//! ## Authoring problems
//!
//! [`Lesson::validate`](crate::Lesson::validate) separates structural errors (no guides, duplicate
//! ids, successor loops) from [`ConfigWarning`](crate::ConfigWarning)s. A warned guide still runs
//! with the offending piece degraded to its permissive behaviour, so one malformed guide never
//! stops the rest of the lesson.
