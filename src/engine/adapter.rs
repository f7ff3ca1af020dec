use crate::{
    engine::pipeline::{
        DropIntraParams, DropPredictedParams, EngineOp, FreezeReferenceParams, HoldDuration,
        HoldReferenceParams, OperationInstance, Pipeline, ReferenceSelect, ScopeChain, StubKind,
    },
    engine::structural::FrameType,
    graph::scope::canonical_key,
    graph::store::{GraphStore, NodeKind, OperationNode},
};

/// Translate every scoped graph in `store` into an execution [`Pipeline`].
///
/// Pure and total: nothing is validated here. Missing or malformed parameters fall back to
/// their defaults, and unknown node kinds become [`EngineOp::Inert`].
#[tracing::instrument(skip(store))]
pub fn build_pipeline(store: &GraphStore) -> Pipeline {
    let mut scopes: Vec<ScopeChain> = store
        .iter_graphs()
        .map(|(_, graph)| ScopeChain {
            scope_kind: graph.scope.kind,
            scope_key: canonical_key(&graph.scope),
            scope: graph.scope.clone(),
            chain: graph.nodes.iter().map(to_instance).collect(),
        })
        .collect();
    scopes.sort_by(|a, b| {
        a.scope_kind
            .cmp(&b.scope_kind)
            .then_with(|| a.scope_key.cmp(&b.scope_key))
    });

    Pipeline {
        global_bypass: store.global_bypass,
        scopes,
    }
}

/// Map one graph node to an operation instance.
pub fn to_instance(node: &OperationNode) -> OperationInstance {
    OperationInstance {
        id: node.id.clone(),
        enabled: !node.bypassed,
        op: map_node(&node.kind, &node.params),
    }
}

/// Map a node kind and its raw parameters to an engine operation.
pub fn map_node(kind: &NodeKind, params: &serde_json::Value) -> EngineOp {
    let stub = |stub: StubKind| EngineOp::Stub {
        stub,
        params: params.clone(),
    };
    match kind {
        NodeKind::DropIntraFrames => EngineOp::DropIntraFrames(parse_drop_intra(params)),
        NodeKind::DropPredictedFrames => {
            EngineOp::DropPredictedFrames(parse_drop_predicted(params))
        }
        NodeKind::HoldReferenceFrame => EngineOp::HoldReferenceFrame(parse_hold(params)),
        NodeKind::ClassicDatamosh => EngineOp::ClassicDatamosh,
        NodeKind::FreezeReferenceFrame => EngineOp::FreezeReferenceFrame(FreezeReferenceParams {
            reference_index: get_u64(params, "reference_index").unwrap_or(0),
        }),
        NodeKind::ClampMotionVectors => stub(StubKind::ClampMotionVectors),
        NodeKind::PerturbMotionVectors => stub(StubKind::PerturbMotionVectors),
        NodeKind::QuantizerBias => stub(StubKind::QuantizerBias),
        NodeKind::RandomizeReferenceChain => stub(StubKind::RandomizeReferenceChain),
        NodeKind::TruncateReferenceChain => stub(StubKind::TruncateReferenceChain),
        NodeKind::ScrambleSpatialCoherence => stub(StubKind::ScrambleSpatialCoherence),
        NodeKind::RewriteGopTopology => stub(StubKind::RewriteGopTopology),
        NodeKind::VisualizeQuantizationNoise => stub(StubKind::VisualizeQuantizationNoise),
        NodeKind::Experimental(name) => EngineOp::Inert {
            name: name.clone(),
            params: params.clone(),
        },
    }
}

fn parse_drop_intra(params: &serde_json::Value) -> DropIntraParams {
    let defaults = DropIntraParams::default();
    DropIntraParams {
        probability: get_probability(params).unwrap_or(defaults.probability),
        first_intra_only: get_bool(params, "first_intra_only").unwrap_or(defaults.first_intra_only),
    }
}

fn parse_drop_predicted(params: &serde_json::Value) -> DropPredictedParams {
    let defaults = DropPredictedParams::default();
    let frame_types = params
        .get("frame_types")
        .and_then(|v| v.as_array())
        .map(|items| {
            let mut types = Vec::new();
            for item in items.iter().filter_map(|v| v.as_str()) {
                let t = match item.trim().to_ascii_uppercase().as_str() {
                    "P" => FrameType::Predicted,
                    "B" => FrameType::Bidirectional,
                    _ => continue,
                };
                if !types.contains(&t) {
                    types.push(t);
                }
            }
            types
        })
        .unwrap_or(defaults.frame_types);
    DropPredictedParams {
        probability: get_probability(params).unwrap_or(defaults.probability),
        frame_types,
    }
}

fn parse_hold(params: &serde_json::Value) -> HoldReferenceParams {
    let select = match get_str(params, "reference").as_deref() {
        Some("last_intra") => ReferenceSelect::LastIntra,
        Some("specific_frame_index") => ReferenceSelect::SpecificFrameIndex {
            index: get_u64(params, "frame_index").unwrap_or(0),
        },
        _ => ReferenceSelect::FirstIntra,
    };
    let duration = match get_str(params, "duration").as_deref() {
        Some("fixed_frames") => HoldDuration::FixedFrames {
            frames: get_u64(params, "frames").unwrap_or(0),
        },
        Some("fixed_seconds") => HoldDuration::FixedSeconds {
            seconds: get_f64(params, "seconds")
                .filter(|s| s.is_finite() && *s >= 0.0)
                .unwrap_or(0.0),
        },
        _ => HoldDuration::UntilNextIntra,
    };
    HoldReferenceParams { select, duration }
}

fn get_probability(params: &serde_json::Value) -> Option<f64> {
    get_f64(params, "probability")
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 100.0))
}

fn get_f64(params: &serde_json::Value, key: &str) -> Option<f64> {
    params.get(key).and_then(|v| v.as_f64())
}

fn get_u64(params: &serde_json::Value, key: &str) -> Option<u64> {
    params.get(key).and_then(|v| v.as_u64())
}

fn get_bool(params: &serde_json::Value, key: &str) -> Option<bool> {
    params.get(key).and_then(|v| v.as_bool())
}

fn get_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_ascii_lowercase())
}

#[cfg(test)]
#[path = "../../tests/unit/engine/adapter.rs"]
mod tests;
