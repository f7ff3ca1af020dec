use super::*;

#[test]
fn six_frames_at_two_fps_alternate_intra() {
    let s = build_structural_stream(6, 2.0);
    assert_eq!(s.len(), 6);
    assert_eq!(s.pattern(), "IPIPIP");
    for (i, f) in s.frames.iter().enumerate() {
        assert_eq!(f.index, i as u64);
        assert_eq!(f.is_intra(), i % 2 == 0);
    }
}

#[test]
fn offsets_inside_a_gop_alternate_p_and_b() {
    let s = build_structural_stream(7, 5.0);
    assert_eq!(s.pattern(), "IPBPBIP");
}

#[test]
fn predicted_frames_reference_the_latest_intra() {
    let s = build_structural_stream(8, 4.0);
    assert!(s.frames[0].reference_indices.is_empty());
    assert_eq!(s.frames[3].reference_indices, vec![0]);
    assert!(s.frames[4].is_keyframe);
    assert_eq!(s.frames[7].reference_indices, vec![4]);
}

#[test]
fn low_fps_makes_every_frame_intra() {
    let s = build_structural_stream(4, 0.3);
    assert_eq!(s.pattern(), "IIII");
}

#[test]
fn non_positive_duration_is_empty() {
    assert!(build_structural_stream(0, 24.0).is_empty());
    assert!(build_structural_stream(-5, 24.0).is_empty());
}

#[test]
fn stats_count_each_type() {
    let stats = build_structural_stream(7, 5.0).stats();
    assert_eq!(
        stats,
        StreamStats {
            intra: 2,
            predicted: 3,
            bidirectional: 2,
            total: 7,
        }
    );
}

#[test]
fn frame_types_serialize_as_letters() {
    assert_eq!(serde_json::to_string(&FrameType::Intra).unwrap(), "\"I\"");
    let f: FrameType = serde_json::from_str("\"B\"").unwrap();
    assert_eq!(f, FrameType::Bidirectional);
}

#[test]
fn long_streams_grow_past_the_preallocation() {
    let len = PREALLOC_FRAMES + 5;
    let s = build_structural_stream(len as i64, 30.0);
    assert_eq!(s.len() as u64, len);
    assert_eq!(s.frames.last().map(|f| f.index), Some(len - 1));
}
