use super::*;

const ALL: [Ease; 6] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InOutCubic,
    Ease::SmoothStep,
];

#[test]
fn every_curve_pins_its_endpoints() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-12, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?}");
    }
}

#[test]
fn input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), e.apply(0.0));
        assert_eq!(e.apply(7.0), e.apply(1.0));
    }
}

#[test]
fn interpolate_runs_downwards_too() {
    assert_eq!(Ease::Linear.interpolate(1.0, 0.0, 0.25), 0.75);
    assert_eq!(Ease::SmoothStep.interpolate(0.0, 1.0, 0.5), 0.5);
}

#[test]
fn serde_names_are_snake_case() {
    let s = serde_json::to_string(&Ease::InOutQuad).unwrap();
    assert_eq!(s, "\"in_out_quad\"");
    let e: Ease = serde_json::from_str("\"smooth_step\"").unwrap();
    assert_eq!(e, Ease::SmoothStep);
}
