use super::*;
use crate::foundation::error::EngineErrorCode;
use crate::graph::store::set_global_bypass;

fn fixture() -> Project {
    Project::from_json_str(include_str!("../../data/project.json")).unwrap()
}

#[test]
fn timeline_chain_drops_every_intra_frame() {
    let a = analyze_project(&fixture()).unwrap();
    assert_eq!(a.before.total, 48);
    assert_eq!(a.before.intra, 4);
    assert_eq!(a.after.intra, 0);
    assert_eq!(a.after.total, 44);
    assert_eq!(a.stream.stats(), a.after);
}

#[test]
fn global_bypass_leaves_stream_alone() {
    let mut p = fixture();
    p.graphs = set_global_bypass(&p.graphs, true);
    let a = analyze_project(&p).unwrap();
    assert_eq!(a.before, a.after);
    assert_eq!(a.stream, build_structural_stream(48, 12.0));
}

#[test]
fn analysis_is_reproducible() {
    let mut p = fixture();
    p.graphs = crate::graph::store::set_node_params(
        &p.graphs,
        &crate::graph::scope::ScopeId::timeline("tl"),
        "n-drop-i",
        serde_json::json!({ "probability": 50 }),
    );
    assert_eq!(analyze_project(&p).unwrap(), analyze_project(&p).unwrap());
}

#[test]
fn invalid_project_is_refused() {
    let mut p = fixture();
    p.fps = 0.0;
    let err = analyze_project(&p).unwrap_err();
    assert_eq!(err.engine_code(), Some(EngineErrorCode::InvalidProject));
}

#[test]
fn absurd_duration_is_refused_before_building_a_stream() {
    let mut p = fixture();
    p.duration_frames = i64::MAX;
    let err = analyze_project(&p).unwrap_err();
    assert_eq!(err.engine_code(), Some(EngineErrorCode::InvalidProject));
}
