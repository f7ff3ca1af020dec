use super::*;

fn curve(interpolation: Interpolation) -> AutomationCurve {
    AutomationCurve {
        id: "a1".to_string(),
        target: AutomationTarget {
            operation_id: "mv1".to_string(),
            param_name: "scale".to_string(),
        },
        points: vec![
            AutomationPoint { t: 0.0, value: 0.0 },
            AutomationPoint { t: 2.0, value: 4.0 },
            AutomationPoint { t: 4.0, value: 2.0 },
        ],
        interpolation,
    }
}

#[test]
fn linear_sampling_interpolates_and_clamps() {
    let c = curve(Interpolation::Linear);
    assert_eq!(c.sample(-1.0), Some(0.0));
    assert_eq!(c.sample(1.0), Some(2.0));
    assert_eq!(c.sample(3.0), Some(3.0));
    assert_eq!(c.sample(10.0), Some(2.0));
}

#[test]
fn step_holds_previous_point() {
    let c = curve(Interpolation::Step);
    assert_eq!(c.sample(1.9), Some(0.0));
    assert_eq!(c.sample(2.0), Some(4.0));
}

#[test]
fn smooth_matches_endpoints_and_midpoint() {
    let c = curve(Interpolation::Smooth);
    assert_eq!(c.sample(1.0), Some(2.0));
    let v = c.sample(0.5).unwrap();
    assert!(v > 0.0 && v < 1.0);
}

#[test]
fn empty_curve_has_no_value() {
    let mut c = curve(Interpolation::Linear);
    c.points.clear();
    assert_eq!(c.sample(0.0), None);
}

#[test]
fn declared_ranges() {
    assert_eq!(param_range("scale"), Some((0.0, 4.0)));
    assert_eq!(param_range("jitter"), Some((0.0, 1.0)));
    assert_eq!(param_range("quantize"), Some((0.0, 8.0)));
    assert_eq!(param_range("drift"), Some((-50.0, 50.0)));
    assert_eq!(param_range("opacity"), None);
}

#[test]
fn nan_time_has_no_value() {
    for interpolation in [Interpolation::Linear, Interpolation::Step, Interpolation::Smooth] {
        assert_eq!(curve(interpolation).sample(f64::NAN), None);
    }
}

#[test]
fn nan_point_times_do_not_panic() {
    let mut c = curve(Interpolation::Linear);
    c.points[0].t = f64::NAN;
    let _ = c.sample(1.0);

    c.points.truncate(1);
    assert_eq!(c.sample(5.0), Some(0.0));
}
