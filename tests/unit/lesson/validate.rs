use super::*;
use serde_json::json;

fn lesson(value: serde_json::Value) -> LessonDef {
    serde_json::from_value(value).unwrap()
}

fn full_guide(id: &str, next: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "next": next,
        "start": {"circle": {"center": [0.0, 0.0], "radius": 0.5}},
        "end": {"circle": {"center": [10.0, 0.0], "radius": 0.5}},
        "corridor": {"capsule": {"points": [[0.0, 0.0], [10.0, 0.0]], "radius": 1.0}},
        "settings": {"starter": next.is_some()},
        "hint": {"path": {"source": {"points": [[0.0, 0.0], [10.0, 0.0]]}}}
    })
}

fn kinds(w: &[ConfigWarning]) -> Vec<WarningKind> {
    w.iter().map(|w| w.kind).collect()
}

#[test]
fn clean_lesson_has_no_warnings() {
    let def = lesson(json!({
        "name": "T",
        "guides": [full_guide("bar", Some("stem")), full_guide("stem", None)]
    }));
    assert_eq!(validate_lesson(&def).unwrap(), Vec::new());
}

#[test]
fn structural_problems_are_errors() {
    let empty = lesson(json!({"guides": []}));
    assert!(matches!(
        validate_lesson(&empty),
        Err(TraceError::Validation(_))
    ));

    let dup = lesson(json!({"guides": [full_guide("a", None), full_guide("a", None)]}));
    let err = validate_lesson(&dup).unwrap_err();
    assert!(err.to_string().contains("duplicate guide id 'a'"));

    let cycle = lesson(json!({
        "guides": [full_guide("a", Some("b")), full_guide("b", Some("a"))]
    }));
    let err = validate_lesson(&cycle).unwrap_err();
    assert!(err.to_string().contains("next-cycle"));

    let self_loop = lesson(json!({"guides": [full_guide("a", Some("a"))]}));
    assert!(validate_lesson(&self_loop).is_err());
}

#[test]
fn missing_pieces_degrade_with_warnings() {
    let def = lesson(json!({
        "guides": [{"id": "bare", "settings": {"starter": true}}]
    }));
    assert_eq!(
        kinds(&validate_lesson(&def).unwrap()),
        vec![
            WarningKind::MissingStart,
            WarningKind::MissingEnd,
            WarningKind::MissingCorridor
        ]
    );

    let relaxed = lesson(json!({
        "guides": [{
            "id": "bare",
            "rules": {"enforce_corridor": false},
            "settings": {"starter": true}
        }]
    }));
    assert_eq!(
        kinds(&validate_lesson(&relaxed).unwrap()),
        vec![WarningKind::MissingStart, WarningKind::MissingEnd]
    );
}

#[test]
fn bad_regions_and_links_are_reported() {
    let mut g = full_guide("a", Some("ghost"));
    g["start"] = json!({"circle": {"center": [0.0, 0.0], "radius": 0.0}});
    g["checkpoints"] = json!([
        {"index": 2, "region": {"rect": {"min": [1.0, -1.0], "max": [2.0, 1.0]}}},
        {"index": 3, "region": {"polygon": {"points": [[0.0, 0.0], [1.0, 1.0]]}}}
    ]);
    let warnings = validate_lesson(&lesson(json!({"guides": [g]}))).unwrap();
    assert_eq!(
        kinds(&warnings),
        vec![
            WarningKind::InvalidRegion,
            WarningKind::CheckpointOrder,
            WarningKind::InvalidRegion,
            WarningKind::UnknownNext
        ]
    );
    assert_eq!(warnings[0].guide.as_deref(), Some("a"));
    assert!(warnings[0].to_string().starts_with("guide 'a': start region ignored"));
}

#[test]
fn hint_problems_are_reported() {
    let mut g = full_guide("a", Some("b"));
    g["hint"] = json!({
        "path": {"source": {"points": [[0.0, 0.0]]}},
        "motion": {"speed": 0.0}
    });
    let mut curve = full_guide("b", None);
    curve["hint"] = json!({"path": {"source": {"curve": {"svg": "not a path"}}}});
    let warnings = validate_lesson(&lesson(json!({"guides": [g, curve]}))).unwrap();
    assert_eq!(
        kinds(&warnings),
        vec![
            WarningKind::NonPositiveSpeed,
            WarningKind::UnusableHintPath,
            WarningKind::UnusableHintPath
        ]
    );
}

#[test]
fn starter_count_is_checked() {
    let none = lesson(json!({"guides": [full_guide("a", None)]}));
    let warnings = validate_lesson(&none).unwrap();
    assert_eq!(kinds(&warnings), vec![WarningKind::NoStarter]);
    assert_eq!(
        warnings[0].to_string(),
        "lesson: no guide is marked as starter; no hint will show in this lesson"
    );

    let two = lesson(json!({
        "guides": [full_guide("a", Some("b")), full_guide("b", Some("c")), full_guide("c", None)]
    }));
    let warnings = validate_lesson(&two).unwrap();
    assert_eq!(kinds(&warnings), vec![WarningKind::MultipleStarters]);
    assert_eq!(warnings[0].guide, None);
    assert!(warnings[0].message.contains("'a' starts the chain"));
}
