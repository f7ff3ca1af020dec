use super::*;
use crate::graph::scope::ScopeId;
use crate::graph::store::{NodeKind, OperationGraph, OperationNode};
use crate::ops::flat::{DropPattern, FreezeReferenceOp};

fn fixture() -> Project {
    Project::from_json_str(include_str!("../../data/project.json")).unwrap()
}

fn assert_has(report: &ValidationReport, needle: &str) {
    assert!(
        report.errors.iter().any(|e| e.contains(needle)),
        "no error containing {needle:?} in {:#?}",
        report.errors
    );
}

#[test]
fn fixture_is_valid() {
    let report = validate_project(&fixture());
    assert!(report.valid, "{:#?}", report.errors);
    assert!(report.errors.is_empty());
    assert!(assert_valid(&fixture()).is_ok());
}

#[test]
fn freeze_reference_with_missing_clip_is_a_reference_error() {
    let mut p = fixture();
    p.operations.freeze_reference.push(FreezeReferenceOp {
        id: "fr-x".to_string(),
        range: FrameRange { start: 0, end: 4 },
        clip_id: Some("clip-x".to_string()),
        mask_id: None,
        reference_frame: 0,
    });

    let report = validate_project(&p);
    assert!(!report.valid);
    assert_has(&report, "clip-x");
    let d = &report.diagnostics[0];
    assert_eq!(d.kind, DiagnosticKind::Reference);
    assert_eq!(d.path, "$.operations.freeze_reference[1].clip_id");
    assert_eq!(
        d.message,
        "FreezeReference operation 'fr-x' references missing clip 'clip-x'"
    );
}

#[test]
fn header_problems_accumulate() {
    let mut p = fixture();
    p.name = "  ".to_string();
    p.block_size = 0;
    p.fps = f64::NAN;
    p.timeline.tracks.clear();

    let report = validate_project(&p);
    assert_has(&report, "$.name: project name must not be empty");
    assert_has(&report, "$.block_size: block_size must be positive");
    assert_has(&report, "$.fps:");
    assert_has(&report, "$.timeline.tracks: timeline must have at least one track");
    // clips now point at tracks that no longer exist
    assert_has(&report, "clip 'c1' references missing track 'v1'");
}

#[test]
fn absurd_duration_is_rejected() {
    let mut p = fixture();
    p.duration_frames = i64::MAX;
    let report = validate_project(&p);
    assert_eq!(report.errors.len(), 1, "{:#?}", report.errors);
    assert_has(&report, "$.duration_frames: duration_frames must be <=");

    p.duration_frames = MAX_DURATION_FRAMES;
    assert!(validate_project(&p).valid);
}

#[test]
fn clip_references_and_ranges() {
    let mut p = fixture();
    p.timeline.clips[1].source_id = "src-z".to_string();
    p.timeline.clips[2].range = FrameRange { start: 9, end: 3 };

    let report = validate_project(&p);
    assert_eq!(report.errors.len(), 2, "{:#?}", report.errors);
    assert_has(&report, "$.timeline.clips[1].source_id: clip 'c2' references missing source 'src-z'");
    assert_has(&report, "$.timeline.clips[2].range: range start 9 must be <= end 3");
}

#[test]
fn non_positive_every_nth_is_rejected() {
    let mut p = fixture();
    p.operations.drop_keyframes[0].pattern = Some(DropPattern {
        every_nth: Some(0),
        offset: 0,
    });
    let report = validate_project(&p);
    assert_has(
        &report,
        "$.operations.drop_keyframes[0].pattern.every_nth: every_nth must be positive, got 0",
    );
}

#[test]
fn unknown_flat_kind_is_reported() {
    let mut p = fixture();
    p.operations
        .extra
        .insert("chroma_bleed".to_string(), serde_json::json!([]));
    let report = validate_project(&p);
    assert_has(&report, "unknown operation kind 'chroma_bleed'");
}

#[test]
fn duplicate_ids_are_reported() {
    let mut p = fixture();
    let dup = p.timeline.clips[0].clone();
    p.timeline.clips.push(dup);
    p.operations.freeze_reference[0].id = "dk1".to_string();

    let report = validate_project(&p);
    assert_has(&report, "$.timeline.clips[3].id: duplicate clip id 'c1'");
    assert_has(&report, "$.operations.freeze_reference[0].id: duplicate operation id 'dk1'");
}

#[test]
fn mask_checks() {
    let mut p = fixture();
    p.masks[0].clip_ids.push("ghost".to_string());
    p.masks[0].keyframes[1].transform.width = 0.0;
    p.masks[0].keyframes[1].t = -1.0;

    let report = validate_project(&p);
    assert_has(&report, "mask 'm1' references missing clip 'ghost'");
    assert_has(&report, "$.masks[0].keyframes[1].transform: mask transform must have positive size");
    assert_has(&report, "mask keyframes must be ordered by t");
}

#[test]
fn automation_checks() {
    let mut p = fixture();
    p.automation[0].target.operation_id = "nope".to_string();
    p.automation[0].points[1].value = 9.0;
    let report = validate_project(&p);
    assert_has(&report, "automation curve 'a1' targets missing operation 'nope'");
    assert_has(&report, "$.automation[0].points[1]: scale value 9 is outside [0, 4]");

    let mut p = fixture();
    p.automation[0].target.param_name = "opacity".to_string();
    p.automation[0].points.reverse();
    let report = validate_project(&p);
    assert_has(&report, "unknown automation parameter 'opacity'");
    assert_has(&report, "automation points must be ordered by t");
}

#[test]
fn automation_may_target_graph_nodes() {
    let mut p = fixture();
    p.automation[0].target.operation_id = "n-hold".to_string();
    assert!(validate_project(&p).valid);
}

#[test]
fn graph_scope_checks() {
    let mut p = fixture();
    p.graphs.graphs.insert(
        "clip:tl:v2:c1".to_string(),
        Some(OperationGraph::empty(ScopeId::clip("tl", "v2", "c1"))),
    );
    p.graphs.graphs.insert(
        "track:tl:v1".to_string(),
        Some(OperationGraph {
            scope: ScopeId::track("tl", "v9"),
            nodes: vec![
                OperationNode::new("x", NodeKind::ClassicDatamosh),
                OperationNode::new("x", NodeKind::QuantizerBias),
            ],
        }),
    );

    let report = validate_project(&p);
    assert_has(&report, "clip 'c1' is on track 'v1', not 'v2'");
    assert_has(&report, "graph stored under 'track:tl:v1' but its scope key is 'track:tl:v9'");
    assert_has(&report, "graph targets missing track 'v9'");
    assert_has(&report, "$.graphs.graphs[\"track:tl:v1\"].nodes[1].id: duplicate node id 'x'");
}

#[test]
fn assert_valid_carries_the_same_errors() {
    let mut p = fixture();
    p.block_size = -4;
    let report = validate_project(&p);
    match assert_valid(&p) {
        Err(MoshError::Validation { errors }) => assert_eq!(errors, report.errors),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn validation_does_not_mutate() {
    let p = fixture();
    let before = p.clone();
    let _ = validate_project(&p);
    assert_eq!(p, before);
}
