use super::*;

#[test]
fn canonical_key_orders_parts() {
    assert_eq!(canonical_key(&ScopeId::timeline("tl")), "timeline:tl");
    assert_eq!(canonical_key(&ScopeId::track("tl", "v1")), "track:tl:v1");
    assert_eq!(canonical_key(&ScopeId::clip("tl", "v1", "c7")), "clip:tl:v1:c7");
}

#[test]
fn canonical_key_is_injective_when_ids_contain_separators() {
    let a = ScopeId::clip("tl", "a:b", "c");
    let b = ScopeId::clip("tl", "a", "b:c");
    assert_ne!(canonical_key(&a), canonical_key(&b));

    let c = ScopeId::track("tl", "x\\");
    let d = ScopeId::track("tl", "x\\\\");
    assert_ne!(canonical_key(&c), canonical_key(&d));
}

#[test]
fn kinds_never_collide() {
    let mut scope = ScopeId::track("tl", "v1");
    let track_key = canonical_key(&scope);
    scope.kind = ScopeKind::Clip;
    assert_ne!(track_key, canonical_key(&scope));
}

#[test]
fn well_formedness_follows_kind() {
    assert!(ScopeId::timeline("tl").is_well_formed());
    assert!(ScopeId::track("tl", "v1").is_well_formed());
    assert!(ScopeId::clip("tl", "v1", "c1").is_well_formed());

    let missing_track = ScopeId {
        kind: ScopeKind::Track,
        timeline_id: "tl".to_string(),
        track_id: None,
        clip_id: None,
    };
    assert!(!missing_track.is_well_formed());

    let missing_clip = ScopeId {
        kind: ScopeKind::Clip,
        timeline_id: "tl".to_string(),
        track_id: Some("v1".to_string()),
        clip_id: Some(String::new()),
    };
    assert!(!missing_clip.is_well_formed());
}

#[test]
fn lineage_runs_innermost_first() {
    let lineage = ScopeId::clip("tl", "v1", "c1").lineage();
    let kinds: Vec<ScopeKind> = lineage.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![ScopeKind::Clip, ScopeKind::Track, ScopeKind::Timeline]
    );
    assert_eq!(lineage[1], ScopeId::track("tl", "v1"));
    assert_eq!(lineage[2], ScopeId::timeline("tl"));
}
