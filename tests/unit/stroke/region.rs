use super::*;

fn circle(x: f64, y: f64, r: f64) -> RegionShape {
    RegionShape::Circle {
        center: Point::new(x, y),
        radius: r,
    }
}

#[test]
fn shapes_answer_containment() {
    let c = circle(0.0, 0.0, 1.0);
    assert!(c.contains(Point::new(0.5, 0.5)));
    assert!(!c.contains(Point::new(1.0, 1.0)));

    let r = RegionShape::Rect {
        min: Point::new(2.0, 2.0),
        max: Point::new(0.0, 0.0),
    };
    assert!(r.contains(Point::new(1.0, 1.0)));
    assert!(r.contains(Point::new(2.0, 2.0)));
    assert!(!r.contains(Point::new(2.1, 1.0)));

    let tri = RegionShape::Polygon {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ],
    };
    assert!(tri.contains(Point::new(1.0, 1.0)));
    assert!(!tri.contains(Point::new(3.0, 3.0)));
}

#[test]
fn capsule_is_a_corridor_around_the_spine() {
    let cap = RegionShape::Capsule {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ],
        radius: 0.5,
    };
    assert!(cap.contains(Point::new(5.0, 0.4)));
    assert!(cap.contains(Point::new(10.3, 5.0)));
    assert!(cap.contains(Point::new(-0.3, 0.0)));
    assert!(!cap.contains(Point::new(5.0, 0.6)));
    assert!(!cap.contains(Point::new(5.0, 5.0)));

    let dot = RegionShape::Capsule {
        points: vec![Point::new(1.0, 1.0)],
        radius: 1.0,
    };
    assert!(dot.contains(Point::new(1.5, 1.0)));
}

#[test]
fn validate_flags_unusable_shapes() {
    assert!(circle(0.0, 0.0, 0.0).validate().is_err());
    assert!(circle(0.0, 0.0, f64::NAN).validate().is_err());
    assert!(
        RegionShape::Polygon {
            points: vec![Point::ZERO, Point::new(1.0, 0.0)]
        }
        .validate()
        .is_err()
    );
    assert!(
        RegionShape::Capsule {
            points: vec![],
            radius: 1.0
        }
        .validate()
        .is_err()
    );
    assert!(circle(0.0, 0.0, 0.1).validate().is_ok());
}

#[test]
fn anchor_point_is_the_shape_centre() {
    assert_eq!(circle(3.0, 4.0, 1.0).anchor_point(), Point::new(3.0, 4.0));
    let r = RegionShape::Rect {
        min: Point::new(0.0, 0.0),
        max: Point::new(2.0, 4.0),
    };
    assert_eq!(r.anchor_point(), Point::new(1.0, 2.0));
}

#[test]
fn closures_are_regions() {
    let right_half = |p: Point| p.x > 0.0;
    let regions = GuideRegions::new().with_start(right_half);
    assert!(regions.over(AnchorKind::Start, Point::new(1.0, 0.0)));
    assert!(!regions.over(AnchorKind::Start, Point::new(-1.0, 0.0)));
}

#[test]
fn missing_and_disabled_regions_never_hit() {
    let mut regions = GuideRegions::new()
        .with_start(circle(0.0, 0.0, 1.0))
        .with_corridor(circle(0.0, 0.0, 5.0))
        .with_checkpoint(1, circle(2.0, 0.0, 0.5));

    assert!(regions.has_corridor());
    assert!(!regions.has(AnchorKind::End));
    assert!(!regions.over(AnchorKind::End, Point::ZERO));
    assert_eq!(regions.in_corridor(Point::ZERO), Some(true));
    assert_eq!(
        regions.checkpoints_at(Point::new(2.0, 0.0)).collect::<Vec<_>>(),
        vec![1]
    );

    regions.disable();
    assert!(!regions.is_enabled());
    assert!(!regions.over(AnchorKind::Start, Point::ZERO));
    assert_eq!(regions.in_corridor(Point::ZERO), Some(false));
    assert_eq!(regions.checkpoints_at(Point::new(2.0, 0.0)).count(), 0);

    assert!(!GuideRegions::new().has_corridor());
    assert_eq!(GuideRegions::new().in_corridor(Point::ZERO), None);
}

#[test]
fn shapes_deserialize_from_tagged_json() {
    let shape: RegionShape =
        serde_json::from_str(r#"{ "circle": { "center": { "x": 1.0, "y": 2.0 }, "radius": 0.5 } }"#)
            .unwrap();
    assert_eq!(shape, circle(1.0, 2.0, 0.5));
}
