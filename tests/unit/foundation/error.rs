use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MoshError::validation(vec!["a".to_string(), "b".to_string()])
            .to_string()
            .contains("validation error: a; b")
    );
    assert!(
        MoshError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        MoshError::from(EngineError::invalid_project(vec!["x".to_string()]))
            .to_string()
            .contains("[invalid-project]")
    );
}

#[test]
fn engine_code_is_exposed() {
    let err = MoshError::from(EngineError::normalization_failed(vec![]));
    assert_eq!(err.engine_code(), Some(EngineErrorCode::NormalizationFailed));
    assert_eq!(MoshError::serde("x").engine_code(), None);
}

#[test]
fn render_failed_keeps_codec_message_in_details() {
    let e = EngineError::render_failed("encoder crashed");
    assert_eq!(e.code, EngineErrorCode::RenderFailed);
    assert_eq!(e.details, vec!["encoder crashed".to_string()]);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MoshError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let e: MoshError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(e, MoshError::Serde(_)));
}
