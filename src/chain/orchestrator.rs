//! Guide chain driver: routes input to the current guide, ticks every guide and performs the
//! timed handoff of the hint token along the `guide -> next` links.

use std::collections::HashSet;

use crate::chain::guide::{Guide, GuideSignal};
use crate::chain::ownership::HintOwnership;
use crate::foundation::core::GuideId;
use crate::foundation::error::{TraceError, TraceResult};
use crate::input::pointer::{FrameInput, PointerEvent};
use crate::stroke::validator::StrokeOutcome;

/// Receives exactly one notification per completed guide.
pub trait CompletionSink {
    /// `guide` traced its stroke successfully.
    fn guide_completed(&mut self, guide: GuideId);
}

impl CompletionSink for Vec<GuideId> {
    fn guide_completed(&mut self, guide: GuideId) {
        self.push(guide);
    }
}

/// Sink that drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl CompletionSink for NullSink {
    fn guide_completed(&mut self, _guide: GuideId) {}
}

/// Observable chain transitions, in the order they happened within a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChainEvent {
    /// Tracing began on `guide`.
    StrokeBegan {
        /// Guide being traced.
        guide: GuideId,
        /// The press landed on the start anchor.
        touched_start: bool,
    },
    /// The pointer stayed off the corridor past the grace period.
    StrokeAborted {
        /// Guide whose stroke was dropped.
        guide: GuideId,
    },
    /// Lift or cancel without completing.
    StrokeDiscarded {
        /// Guide whose stroke was dropped.
        guide: GuideId,
    },
    /// An ordered checkpoint was counted.
    CheckpointHit {
        /// Guide being traced.
        guide: GuideId,
        /// 1-based checkpoint index.
        index: u32,
    },
    /// The stroke of `guide` completed.
    GuideCompleted {
        /// Completed guide.
        guide: GuideId,
        /// Points in the finished trail.
        trail_points: usize,
    },
    /// Input and the hint moved on to the successor.
    HandoffStarted {
        /// Completed guide.
        from: GuideId,
        /// Successor.
        to: GuideId,
    },
    /// A completed guide finished fading and was deactivated.
    GuideRetired {
        /// Retired guide.
        guide: GuideId,
    },
    /// The terminal guide retired; nothing is left to trace.
    ChainFinished,
}

/// A forward-only sequence of guides sharing one hint token.
#[derive(Debug)]
pub struct GuideChain {
    guides: Vec<Guide>,
    next: Vec<Option<usize>>,
    current: usize,
    ownership: HintOwnership,
    finished: bool,
}

impl GuideChain {
    /// Build a chain from `(guide, successor)` pairs and activate `start`.
    ///
    /// Errors when empty, on duplicate ids, on unknown successor or start ids and when the
    /// successor links loop.
    pub fn new(entries: Vec<(Guide, Option<GuideId>)>, start: GuideId) -> TraceResult<Self> {
        if entries.is_empty() {
            return Err(TraceError::validation("a chain needs at least one guide"));
        }

        let mut seen = HashSet::new();
        for (guide, _) in &entries {
            if !seen.insert(guide.id()) {
                return Err(TraceError::validation(format!(
                    "duplicate guide id {}",
                    guide.id()
                )));
            }
        }

        let position = |id: GuideId| entries.iter().position(|(g, _)| g.id() == id);
        let mut next = Vec::with_capacity(entries.len());
        for (guide, successor) in &entries {
            let link = match successor {
                Some(id) => Some(position(*id).ok_or_else(|| {
                    TraceError::validation(format!(
                        "{} links to unknown guide {id}",
                        guide.id()
                    ))
                })?),
                None => None,
            };
            next.push(link);
        }
        let current = position(start)
            .ok_or_else(|| TraceError::validation(format!("unknown start guide {start}")))?;

        if let Some(at) = find_cycle(&next) {
            return Err(TraceError::validation(format!(
                "successor links loop back through {}",
                entries[at].0.id()
            )));
        }

        let guides: Vec<Guide> = entries.into_iter().map(|(g, _)| g).collect();
        let mut chain = Self {
            guides,
            next,
            current,
            ownership: HintOwnership::vacant(),
            finished: false,
        };
        let own = &mut chain.ownership;
        chain.guides[current].activate(own);
        tracing::debug!(guides = chain.guides.len(), start = %start, "chain ready");
        Ok(chain)
    }

    /// Link `guides` in order and start at the first starter (or the first guide).
    pub fn sequential(guides: Vec<Guide>) -> TraceResult<Self> {
        let start = guides
            .iter()
            .find(|g| g.config().starter)
            .or_else(|| guides.first())
            .map(Guide::id)
            .ok_or_else(|| TraceError::validation("a chain needs at least one guide"))?;
        let ids: Vec<GuideId> = guides.iter().map(Guide::id).collect();
        let entries = guides
            .into_iter()
            .enumerate()
            .map(|(i, g)| (g, ids.get(i + 1).copied()))
            .collect();
        Self::new(entries, start)
    }

    /// Run one frame: pointer input first, then every guide's timers.
    ///
    /// A frame without a `Move` while a stroke is in progress counts as the pointer being held at
    /// its last position for `dt`.
    #[tracing::instrument(level = "trace", skip_all, fields(dt = input.dt, events = input.events.len()))]
    pub fn frame(
        &mut self,
        input: &FrameInput,
        sink: &mut dyn CompletionSink,
    ) -> Vec<ChainEvent> {
        let mut events = Vec::new();
        let mut move_dt = Some(input.dt);

        for ev in &input.events {
            let idx = self.current;
            let guide = &mut self.guides[idx];
            let own = &mut self.ownership;
            let outcome = match *ev {
                PointerEvent::Down(p) => guide.pointer_down(p, own),
                PointerEvent::Move(p) => {
                    let dt = move_dt.take().unwrap_or(0.0);
                    guide.pointer_move(p, dt, own)
                }
                PointerEvent::Up(p) => guide.pointer_up(p, own),
            };
            self.report(idx, outcome, &mut events, sink);
        }

        // A pressed pointer that did not move still spends the frame off or on the path.
        if let Some(dt) = move_dt {
            let idx = self.current;
            if self.guides[idx].is_tracing() {
                let outcome = self.guides[idx].pointer_hold(dt, &mut self.ownership);
                self.report(idx, outcome, &mut events, sink);
            }
        }

        self.tick(input.dt, &mut events);
        events
    }

    /// Drop the gesture in progress on the current guide (pointer capture lost).
    pub fn cancel_gesture(&mut self) -> Vec<ChainEvent> {
        let mut events = Vec::new();
        let idx = self.current;
        let outcome = self.guides[idx].cancel_stroke(&mut self.ownership);
        self.report(idx, outcome, &mut events, &mut NullSink);
        events
    }

    /// Replay the current guide's hint on request.
    pub fn play_hint(&mut self) -> bool {
        self.guides[self.current].play_hint(&self.ownership)
    }

    /// Switch the current guide's hint off for good.
    pub fn stop_hint(&mut self) {
        self.guides[self.current].stop_hint();
    }

    /// Guide receiving input.
    pub fn current_guide(&self) -> &Guide {
        &self.guides[self.current]
    }

    /// Guide by id.
    pub fn guide(&self, id: GuideId) -> Option<&Guide> {
        self.guides.iter().find(|g| g.id() == id)
    }

    /// Every guide in authoring order.
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// The hint token.
    pub fn ownership(&self) -> &HintOwnership {
        &self.ownership
    }

    /// `true` once the terminal guide retired.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Guides whose hint is visibly animating right now. Never more than one.
    pub fn active_hint_holders(&self) -> Vec<GuideId> {
        self.guides
            .iter()
            .filter(|g| g.hint_active())
            .map(Guide::id)
            .collect()
    }

    fn report(
        &mut self,
        idx: usize,
        outcome: StrokeOutcome,
        events: &mut Vec<ChainEvent>,
        sink: &mut dyn CompletionSink,
    ) {
        let guide = self.guides[idx].id();
        for index in self.guides[idx].drain_checkpoint_hits() {
            events.push(ChainEvent::CheckpointHit { guide, index });
        }
        match outcome {
            StrokeOutcome::Began { touched_start } => {
                events.push(ChainEvent::StrokeBegan {
                    guide,
                    touched_start,
                });
            }
            StrokeOutcome::Rejected(reason) => {
                tracing::debug!(%guide, ?reason, "gesture rejected");
            }
            StrokeOutcome::Aborted => events.push(ChainEvent::StrokeAborted { guide }),
            StrokeOutcome::Discarded => events.push(ChainEvent::StrokeDiscarded { guide }),
            StrokeOutcome::Completed(trail) => {
                events.push(ChainEvent::GuideCompleted {
                    guide,
                    trail_points: trail.points().len(),
                });
                sink.guide_completed(guide);
            }
            StrokeOutcome::Ignored | StrokeOutcome::Tracing => {}
        }
    }

    fn tick(&mut self, dt: f64, events: &mut Vec<ChainEvent>) {
        let mut due = Vec::new();
        for (idx, guide) in self.guides.iter_mut().enumerate() {
            for signal in guide.tick(dt, &mut self.ownership) {
                due.push((idx, signal));
            }
        }
        for (idx, signal) in due {
            match signal {
                GuideSignal::HandoffDue => self.handoff(idx, events),
                GuideSignal::Retired => {
                    events.push(ChainEvent::GuideRetired {
                        guide: self.guides[idx].id(),
                    });
                    if self.next[idx].is_none() && !self.finished {
                        self.finished = true;
                        tracing::info!("chain finished");
                        events.push(ChainEvent::ChainFinished);
                    }
                }
            }
        }
    }

    fn handoff(&mut self, from: usize, events: &mut Vec<ChainEvent>) {
        let from_id = self.guides[from].id();
        let Some(to) = self.next[from] else {
            tracing::debug!(guide = %from_id, "no successor; chain ends after this guide");
            return;
        };
        let to_id = self.guides[to].id();

        if self.guides[from].held_hint_at_completion() {
            self.ownership.assign(to_id);
        }
        let next = &mut self.guides[to];
        next.suppress_activation_delay();
        self.current = to;
        next.activate(&mut self.ownership);
        next.show_hint_immediately(&self.ownership);

        tracing::info!(from = %from_id, to = %to_id, "handoff");
        events.push(ChainEvent::HandoffStarted {
            from: from_id,
            to: to_id,
        });
    }
}

/// Index of a guide on a successor loop, if any.
fn find_cycle(next: &[Option<usize>]) -> Option<usize> {
    (0..next.len()).find(|&start| {
        let mut at = next[start];
        for _ in 0..next.len() {
            match at {
                Some(i) if i == start => return true,
                Some(i) => at = next[i],
                None => return false,
            }
        }
        false
    })
}

#[cfg(test)]
#[path = "../../tests/unit/chain/orchestrator.rs"]
mod tests;
