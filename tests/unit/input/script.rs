use super::*;

#[test]
fn stroke_presses_drags_and_releases() {
    let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
    let s = GestureScript::stroke(0.1, &pts);
    assert_eq!(
        s.frames,
        vec![
            vec![PointerEvent::Down(pts[0])],
            vec![PointerEvent::Move(pts[1])],
            vec![PointerEvent::Move(pts[2])],
            vec![PointerEvent::Up(pts[2])],
        ]
    );
}

#[test]
fn single_point_stroke_releases_where_it_pressed() {
    let s = GestureScript::stroke(0.1, &[Point::new(3.0, 4.0)]);
    assert_eq!(s.frames.len(), 2);
    assert_eq!(s.frames[1], vec![PointerEvent::Up(Point::new(3.0, 4.0))]);
    assert!(GestureScript::stroke(0.1, &[]).frames.is_empty());
}

#[test]
fn inputs_include_the_idle_tail() {
    let s = GestureScript::stroke(0.25, &[Point::ZERO, Point::new(1.0, 0.0)])
        .then(GestureScript::stroke(0.5, &[Point::ZERO]))
        .idle(2);
    assert_eq!(s.frame_count(), 7);
    let inputs: Vec<FrameInput> = s.inputs().collect();
    assert_eq!(inputs.len(), 7);
    assert!(inputs.iter().all(|f| f.dt == 0.25));
    assert!(inputs[5].events.is_empty());
    assert!(inputs[6].events.is_empty());
}

#[test]
fn parses_json_with_defaults() {
    let json = r#"{
        "frames": [
            [{"down": {"x": 0.0, "y": 0.0}}],
            [],
            [{"move": {"x": 1.0, "y": 0.0}}, {"up": {"x": 1.0, "y": 0.0}}]
        ]
    }"#;
    let s = GestureScript::from_reader(json.as_bytes()).unwrap();
    assert_eq!(s.dt, 1.0 / 60.0);
    assert_eq!(s.trailing_idle_frames, 0);
    assert_eq!(s.frames[2].len(), 2);
}

#[test]
fn bad_json_is_a_serde_error() {
    let err = GestureScript::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, TraceError::Serde(_)));
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = GestureScript::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn replayed_events_flatten_the_event_tag() {
    let e = ReplayedEvent {
        frame: 4,
        event: ChainEvent::ChainFinished,
    };
    assert_eq!(
        serde_json::to_value(&e).unwrap(),
        serde_json::json!({"frame": 4, "event": "chain_finished"})
    );
}
