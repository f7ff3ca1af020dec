use super::*;

#[test]
fn defaults_normalize_unchanged() {
    let s = RenderSettings::default();
    assert_eq!(s.normalized().unwrap(), s);
}

#[test]
fn odd_dimensions_round_down_to_even() {
    let s = RenderSettings {
        resolution: Resolution {
            width: 641,
            height: 361,
        },
        ..RenderSettings::default()
    };
    let n = s.normalized().unwrap();
    assert_eq!(
        n.resolution,
        Resolution {
            width: 640,
            height: 360,
        }
    );
}

#[test]
fn all_problems_are_reported_together() {
    let s = RenderSettings {
        container: Container::Mov,
        codec: VideoCodec::Xvid,
        resolution: Resolution {
            width: 1,
            height: 720,
        },
        rate_control: RateControl::ConstantBitrate { kbps: 0 },
        datamosh: vec![],
    };
    let errors = s.normalized().unwrap_err();
    assert_eq!(errors.len(), 3, "{errors:?}");
}

#[test]
fn rate_control_bounds() {
    for (rc, ok) in [
        (RateControl::Crf { crf: 51 }, true),
        (RateControl::Crf { crf: 52 }, false),
        (RateControl::ConstantQuantizer { qp: 0 }, false),
        (RateControl::ConstantQuantizer { qp: 30 }, true),
        (RateControl::ConstantBitrate { kbps: 8000 }, true),
    ] {
        let s = RenderSettings {
            rate_control: rc,
            ..RenderSettings::default()
        };
        assert_eq!(s.normalized().is_ok(), ok, "{rc:?}");
    }
}

#[test]
fn settings_json_shape() {
    let s = RenderSettings {
        datamosh: vec![OperationKind::DropKeyframes],
        ..RenderSettings::default()
    };
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["container"], "mp4");
    assert_eq!(v["rate_control"]["mode"], "crf");
    assert_eq!(v["datamosh"][0], "drop_keyframes");
}
