use super::*;
use crate::foundation::error::MoshError;
use crate::graph::scope::ScopeId;
use crate::graph::store::{NodeKind, OperationNode, add_node, get_graph};

const FIXTURE: &str = include_str!("../../data/project.json");

#[test]
fn fixture_parses() {
    let p = Project::from_json_str(FIXTURE).unwrap();
    assert_eq!(p.name, "night-drive");
    assert_eq!(p.timeline.clips.len(), 3);
    assert_eq!(p.clip("c2").map(|c| c.track_id.as_str()), Some("v1"));
    assert!(p.track("v9").is_none());
    assert_eq!(p.operations.drop_keyframes.len(), 1);
    assert_eq!(p.graphs.graphs.len(), 3);
    assert_eq!(p.graphs.graphs.get("clip:tl:v1:c2"), Some(&None));
}

#[test]
fn null_graph_reads_as_empty_graph() {
    let p = Project::from_json_str(FIXTURE).unwrap();
    let g = get_graph(&p.graphs, &ScopeId::clip("tl", "v1", "c2"));
    assert!(g.nodes.is_empty());
}

#[test]
fn round_trip_is_lossless() {
    let p = Project::from_json_str(FIXTURE).unwrap();
    let json = p.to_json_string().unwrap();
    let back = Project::from_json_str(&json).unwrap();
    assert_eq!(back, p);

    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(v["graphs"]["graphs"]["clip:tl:v1:c2"].is_null());
}

#[test]
fn edited_graphs_and_unknown_kinds_survive_round_trip() {
    let mut p = Project::from_json_str(FIXTURE).unwrap();
    p.graphs = add_node(
        &p.graphs,
        &ScopeId::clip("tl", "v2", "c3"),
        OperationNode::new("n-x", NodeKind::Experimental("pixel_sort".to_string()))
            .with_params(serde_json::json!({ "threshold": 0.4 })),
    );
    p.operations
        .extra
        .insert("chroma_bleed".to_string(), serde_json::json!([{ "id": "cb1" }]));

    let back = Project::from_json_str(&p.to_json_string().unwrap()).unwrap();
    assert_eq!(back, p);
    assert_eq!(
        back.operations.unknown_kinds().collect::<Vec<_>>(),
        vec!["chroma_bleed"]
    );
    let g = get_graph(&back.graphs, &ScopeId::clip("tl", "v2", "c3"));
    assert_eq!(g.nodes[0].kind.as_str(), "pixel_sort");
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Project::from_json_str("{ \"name\": 3 }").unwrap_err();
    assert!(matches!(err, MoshError::Serde(_)), "{err}");
}
