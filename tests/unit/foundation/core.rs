use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(2, 5).unwrap();
    assert!(!r.contains(1));
    assert!(r.contains(2));
    assert!(r.contains(4));
    assert!(!r.contains(5));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(5, 2).is_err());
    let inverted = FrameRange { start: 5, end: 2 };
    assert!(!inverted.is_well_formed());
    assert!(inverted.is_empty());
    assert_eq!(inverted.len_frames(), 0);
}

#[test]
fn gop_length_rounds_and_floors_at_one() {
    assert_eq!(gop_length(2.0), 2);
    assert_eq!(gop_length(29.97), 30);
    assert_eq!(gop_length(0.25), 1);
    assert_eq!(gop_length(f64::NAN), 1);
}

#[test]
fn secs_to_frames_rounds_to_nearest() {
    assert_eq!(secs_to_frames(1.0, 24.0), 24);
    assert_eq!(secs_to_frames(0.51, 3.0), 2);
    assert_eq!(secs_to_frames(-1.0, 24.0), 0);
}
