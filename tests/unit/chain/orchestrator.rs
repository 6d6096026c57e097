use super::*;
use crate::chain::guide::GuideConfig;
use crate::hint::follower::{FollowerConfig, PathFollower};
use crate::path::builder::PathSpec;
use crate::stroke::region::{GuideRegions, RegionShape};
use crate::stroke::validator::{StrokeRules, StrokeValidator};
use kurbo::Point;

fn dot(x: f64, y: f64) -> RegionShape {
    RegionShape::Circle {
        center: Point::new(x, y),
        radius: 0.5,
    }
}

fn guide(id: u32, starter: bool) -> Guide {
    let regions = GuideRegions::new()
        .with_start(dot(0.0, 0.0))
        .with_end(dot(10.0, 0.0))
        .with_corridor(RegionShape::Capsule {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            radius: 1.0,
        })
        .with_checkpoint(1, dot(5.0, 0.0));
    let hint = PathFollower::new(
        PathSpec::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]),
        FollowerConfig::default(),
    );
    Guide::new(
        GuideId(id),
        StrokeValidator::new(StrokeRules::default(), regions, 1),
    )
    .with_config(GuideConfig {
        starter,
        ..GuideConfig::default()
    })
    .with_hint(hint)
}

fn full_stroke(dt: f64) -> FrameInput {
    let mut events = vec![PointerEvent::Down(Point::new(0.0, 0.0))];
    events.extend((1..=10).map(|x| PointerEvent::Move(Point::new(f64::from(x), 0.0))));
    FrameInput::with_events(dt, events)
}

fn idle(chain: &mut GuideChain, frames: usize, sink: &mut Vec<GuideId>) -> Vec<ChainEvent> {
    (0..frames)
        .flat_map(|_| chain.frame(&FrameInput::idle(0.125), &mut *sink))
        .collect()
}

#[test]
fn construction_rejects_bad_topology() {
    assert!(GuideChain::new(Vec::new(), GuideId(1)).is_err());
    assert!(GuideChain::sequential(Vec::new()).is_err());

    let dup = vec![(guide(1, true), None), (guide(1, false), None)];
    assert!(matches!(
        GuideChain::new(dup, GuideId(1)),
        Err(TraceError::Validation(_))
    ));

    let unknown_next = vec![(guide(1, true), Some(GuideId(7)))];
    assert!(GuideChain::new(unknown_next, GuideId(1)).is_err());

    let unknown_start = vec![(guide(1, true), None)];
    assert!(GuideChain::new(unknown_start, GuideId(2)).is_err());

    let looped = vec![
        (guide(1, true), Some(GuideId(2))),
        (guide(2, false), Some(GuideId(1))),
    ];
    let err = GuideChain::new(looped, GuideId(1)).unwrap_err();
    assert!(err.to_string().contains("loop"));
}

#[test]
fn find_cycle_spots_self_links() {
    assert_eq!(find_cycle(&[Some(1), None]), None);
    assert_eq!(find_cycle(&[Some(0)]), Some(0));
    assert_eq!(find_cycle(&[Some(1), Some(2), Some(1)]), Some(1));
}

#[test]
fn two_guide_lesson_runs_to_the_end() {
    let mut chain = GuideChain::sequential(vec![guide(1, true), guide(2, false)]).unwrap();
    let mut sink = Vec::new();

    idle(&mut chain, 3, &mut sink);
    assert_eq!(chain.active_hint_holders(), vec![GuideId(1)]);

    let events = chain.frame(&full_stroke(0.125), &mut sink);
    assert_eq!(
        events,
        vec![
            ChainEvent::StrokeBegan {
                guide: GuideId(1),
                touched_start: true
            },
            ChainEvent::CheckpointHit {
                guide: GuideId(1),
                index: 1
            },
            ChainEvent::GuideCompleted {
                guide: GuideId(1),
                trail_points: 11
            },
        ]
    );
    assert_eq!(sink, vec![GuideId(1)]);
    assert!(chain.active_hint_holders().is_empty());
    assert_eq!(chain.ownership().holder(), None);

    // 0.125 counted on the completion frame, 0.375 more reaches the 0.5 s handoff delay.
    assert!(idle(&mut chain, 2, &mut sink).is_empty());
    let events = idle(&mut chain, 1, &mut sink);
    assert_eq!(
        events,
        vec![ChainEvent::HandoffStarted {
            from: GuideId(1),
            to: GuideId(2)
        }]
    );
    assert_eq!(chain.current_guide().id(), GuideId(2));
    assert_eq!(chain.ownership().holder(), Some(GuideId(2)));
    assert_eq!(chain.active_hint_holders(), vec![GuideId(2)]);

    // The first guide fades over 0.25 s after the handoff.
    let events = idle(&mut chain, 2, &mut sink);
    assert_eq!(events, vec![ChainEvent::GuideRetired { guide: GuideId(1) }]);
    assert!(!chain.is_finished());

    chain.frame(&full_stroke(0.125), &mut sink);
    assert_eq!(sink, vec![GuideId(1), GuideId(2)]);
    let events = idle(&mut chain, 5, &mut sink);
    assert_eq!(
        events,
        vec![
            ChainEvent::GuideRetired { guide: GuideId(2) },
            ChainEvent::ChainFinished
        ]
    );
    assert!(chain.is_finished());
    assert!(chain.active_hint_holders().is_empty());
}

#[test]
fn only_the_first_move_of_a_frame_carries_dt() {
    let mut chain = GuideChain::sequential(vec![guide(1, true)]).unwrap();
    let mut sink = Vec::new();
    let off = Point::new(2.0, 3.0);
    let events = chain.frame(
        &FrameInput::with_events(
            0.2,
            [
                PointerEvent::Down(Point::new(0.0, 0.0)),
                PointerEvent::Move(off),
                PointerEvent::Move(off),
                PointerEvent::Move(off),
            ],
        ),
        &mut sink,
    );
    assert_eq!(events.len(), 1);
    assert!(chain.current_guide().is_tracing());

    let events = chain.frame(
        &FrameInput::with_events(0.1, [PointerEvent::Move(off)]),
        &mut sink,
    );
    assert_eq!(events, vec![ChainEvent::StrokeAborted { guide: GuideId(1) }]);
    assert!(!chain.current_guide().is_tracing());
}

#[test]
fn pointer_held_still_off_the_path_aborts() {
    let mut chain = GuideChain::sequential(vec![guide(1, true)]).unwrap();
    let mut sink = Vec::new();
    let events = chain.frame(
        &FrameInput::with_events(
            0.125,
            [
                PointerEvent::Down(Point::new(0.0, 0.0)),
                PointerEvent::Move(Point::new(2.0, 3.0)),
            ],
        ),
        &mut sink,
    );
    assert_eq!(events.len(), 1);
    assert!(chain.current_guide().is_tracing());

    // No samples arrive while the pointer rests outside; the frame time still counts.
    assert_eq!(
        idle(&mut chain, 1, &mut sink),
        vec![ChainEvent::StrokeAborted { guide: GuideId(1) }]
    );
    assert!(!chain.current_guide().is_tracing());
    assert!(chain.current_guide().hint_pending());
}

#[test]
fn pointer_held_still_on_the_path_keeps_tracing() {
    let mut chain = GuideChain::sequential(vec![guide(1, true)]).unwrap();
    let mut sink = Vec::new();
    chain.frame(
        &FrameInput::with_events(
            0.125,
            [
                PointerEvent::Down(Point::new(0.0, 0.0)),
                PointerEvent::Move(Point::new(3.0, 0.0)),
            ],
        ),
        &mut sink,
    );
    assert!(idle(&mut chain, 16, &mut sink).is_empty());
    assert!(chain.current_guide().is_tracing());
    assert!(chain.active_hint_holders().is_empty());
}

#[test]
fn rejected_press_is_silent() {
    let mut chain = GuideChain::sequential(vec![guide(1, true)]).unwrap();
    let events = chain.frame(
        &FrameInput::with_events(0.1, [PointerEvent::Down(Point::new(5.0, 0.0))]),
        &mut NullSink,
    );
    assert!(events.is_empty());
}

#[test]
fn cancel_gesture_discards_and_rearms_the_hint() {
    let mut chain = GuideChain::sequential(vec![guide(1, true)]).unwrap();
    chain.frame(
        &FrameInput::with_events(0.1, [PointerEvent::Down(Point::new(0.0, 0.0))]),
        &mut NullSink,
    );
    assert_eq!(
        chain.cancel_gesture(),
        vec![ChainEvent::StrokeDiscarded { guide: GuideId(1) }]
    );
    assert!(chain.current_guide().hint_pending());
    assert!(chain.cancel_gesture().is_empty());
}

#[test]
fn hint_is_not_shown_on_the_frame_a_stroke_begins() {
    let mut chain = GuideChain::sequential(vec![guide(1, true)]).unwrap();
    // The idle delay would elapse during this frame, but the press comes first.
    let events = chain.frame(
        &FrameInput::with_events(0.5, [PointerEvent::Down(Point::new(0.0, 0.0))]),
        &mut NullSink,
    );
    assert_eq!(events.len(), 1);
    assert!(chain.active_hint_holders().is_empty());
}

#[test]
fn token_only_moves_when_the_completed_guide_held_it() {
    let mut chain = GuideChain::sequential(vec![guide(1, false), guide(2, false)]).unwrap();
    let mut sink = Vec::new();
    assert_eq!(chain.ownership().holder(), None);
    chain.frame(&full_stroke(0.125), &mut sink);
    let events = idle(&mut chain, 3, &mut sink);
    assert!(events.contains(&ChainEvent::HandoffStarted {
        from: GuideId(1),
        to: GuideId(2)
    }));
    assert_eq!(chain.current_guide().id(), GuideId(2));
    assert_eq!(chain.ownership().holder(), None);
    assert!(chain.active_hint_holders().is_empty());

    // Without a starter the token stays vacant for the whole lesson.
    idle(&mut chain, 8, &mut sink);
    assert!(chain.active_hint_holders().is_empty());
    assert!(!chain.current_guide().hint_pending());
}

#[test]
fn play_and_stop_hint_act_on_the_current_guide() {
    let mut chain = GuideChain::sequential(vec![guide(1, true)]).unwrap();
    assert!(chain.play_hint());
    assert_eq!(chain.active_hint_holders(), vec![GuideId(1)]);
    chain.stop_hint();
    assert!(chain.active_hint_holders().is_empty());
    assert!(!chain.play_hint());
}

#[test]
fn events_serialize_with_an_event_tag() {
    let json = serde_json::to_value(ChainEvent::HandoffStarted {
        from: GuideId(1),
        to: GuideId(2),
    })
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({"event": "handoff_started", "from": 1, "to": 2})
    );
    let json = serde_json::to_value(ChainEvent::ChainFinished).unwrap();
    assert_eq!(json, serde_json::json!({"event": "chain_finished"}));
}
