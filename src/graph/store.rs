use std::collections::BTreeMap;
use std::fmt;

use crate::graph::scope::{ScopeId, canonical_key};

/// Operation kinds available in the node-graph editor.
///
/// Serialized as a snake_case string. Names this build does not know are kept verbatim in
/// [`NodeKind::Experimental`] so projects authored by newer editors survive a load/save
/// cycle; the pipeline adapter maps them to an inert pass-through entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Drop intra (I) frames with a probability.
    DropIntraFrames,
    /// Drop predicted (P/B) frames with a probability.
    DropPredictedFrames,
    /// Hold one reference frame's content across a run of frames.
    HoldReferenceFrame,
    /// Keep only the first I-frame and glue every predicted frame to it.
    ClassicDatamosh,
    /// Point every predicted frame at a single reference index.
    FreezeReferenceFrame,
    /// Clamp motion vector magnitudes.
    ClampMotionVectors,
    /// Add noise to motion vectors.
    PerturbMotionVectors,
    /// Bias the quantizer.
    QuantizerBias,
    /// Shuffle reference chains.
    RandomizeReferenceChain,
    /// Cut reference chains short.
    TruncateReferenceChain,
    /// Scramble macroblock spatial coherence.
    ScrambleSpatialCoherence,
    /// Rewrite GOP topology.
    RewriteGopTopology,
    /// Visualize quantization noise.
    VisualizeQuantizationNoise,
    /// Any other kind name, preserved as written.
    Experimental(String),
}

impl NodeKind {
    /// Every kind this build knows by name.
    pub const KNOWN: [NodeKind; 13] = [
        NodeKind::DropIntraFrames,
        NodeKind::DropPredictedFrames,
        NodeKind::HoldReferenceFrame,
        NodeKind::ClassicDatamosh,
        NodeKind::FreezeReferenceFrame,
        NodeKind::ClampMotionVectors,
        NodeKind::PerturbMotionVectors,
        NodeKind::QuantizerBias,
        NodeKind::RandomizeReferenceChain,
        NodeKind::TruncateReferenceChain,
        NodeKind::ScrambleSpatialCoherence,
        NodeKind::RewriteGopTopology,
        NodeKind::VisualizeQuantizationNoise,
    ];

    /// Serialized name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::DropIntraFrames => "drop_intra_frames",
            Self::DropPredictedFrames => "drop_predicted_frames",
            Self::HoldReferenceFrame => "hold_reference_frame",
            Self::ClassicDatamosh => "classic_datamosh",
            Self::FreezeReferenceFrame => "freeze_reference_frame",
            Self::ClampMotionVectors => "clamp_motion_vectors",
            Self::PerturbMotionVectors => "perturb_motion_vectors",
            Self::QuantizerBias => "quantizer_bias",
            Self::RandomizeReferenceChain => "randomize_reference_chain",
            Self::TruncateReferenceChain => "truncate_reference_chain",
            Self::ScrambleSpatialCoherence => "scramble_spatial_coherence",
            Self::RewriteGopTopology => "rewrite_gop_topology",
            Self::VisualizeQuantizationNoise => "visualize_quantization_noise",
            Self::Experimental(name) => name,
        }
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|k| k.as_str() == name)
            .unwrap_or(Self::Experimental(name))
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Experimental(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation instance inside a scoped graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OperationNode {
    /// Node id, unique within its graph.
    pub id: String,
    /// Operation kind.
    pub kind: NodeKind,
    /// Bypassed nodes stay in the graph but do not run.
    #[serde(default)]
    pub bypassed: bool,
    /// Kind-specific parameter object.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl OperationNode {
    /// Enabled node with default parameters.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            bypassed: false,
            params: serde_json::Value::Null,
        }
    }

    /// Replace the parameter object.
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Set the bypass flag.
    pub fn bypassed(mut self, bypassed: bool) -> Self {
        self.bypassed = bypassed;
        self
    }
}

/// Ordered operation chain attached to one scope.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OperationGraph {
    /// Scope the graph targets.
    pub scope: ScopeId,
    /// Nodes in execution order.
    #[serde(default)]
    pub nodes: Vec<OperationNode>,
}

impl OperationGraph {
    /// Graph with no nodes.
    pub fn empty(scope: ScopeId) -> Self {
        Self {
            scope,
            nodes: Vec::new(),
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&OperationNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// All scoped graphs of a project plus the global bypass switch.
///
/// Graphs are keyed by [`canonical_key`]. A key may hold `null` in persisted projects; it
/// reads back as an empty graph and is written back as `null`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphStore {
    /// Disables the whole pipeline when set.
    #[serde(default)]
    pub global_bypass: bool,
    /// Graphs by canonical scope key.
    #[serde(default)]
    pub graphs: BTreeMap<String, Option<OperationGraph>>,
}

impl GraphStore {
    /// Present (non-null) graphs in key order.
    pub fn iter_graphs(&self) -> impl Iterator<Item = (&str, &OperationGraph)> {
        self.graphs
            .iter()
            .filter_map(|(k, g)| g.as_ref().map(|g| (k.as_str(), g)))
    }

    /// Every node id across every graph.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.iter_graphs()
            .flat_map(|(_, g)| g.nodes.iter().map(|n| n.id.as_str()))
    }
}

/// Graph stored for `scope`, or an empty graph when none exists.
pub fn get_graph(store: &GraphStore, scope: &ScopeId) -> OperationGraph {
    store
        .graphs
        .get(&canonical_key(scope))
        .and_then(|g| g.clone())
        .unwrap_or_else(|| OperationGraph::empty(scope.clone()))
}

/// Apply `updater` to the current graph for `scope` and return a store holding the result.
///
/// This is the only way graphs are written. The input store is left untouched, and the
/// written graph always carries `scope` regardless of what `updater` returned.
pub fn upsert_graph<F>(store: &GraphStore, scope: &ScopeId, updater: F) -> GraphStore
where
    F: FnOnce(OperationGraph) -> OperationGraph,
{
    let current = get_graph(store, scope);
    let mut updated = updater(current);
    updated.scope = scope.clone();

    let mut next = store.clone();
    next.graphs.insert(canonical_key(scope), Some(updated));
    next
}

/// Append `node` to the graph for `scope`.
pub fn add_node(store: &GraphStore, scope: &ScopeId, node: OperationNode) -> GraphStore {
    upsert_graph(store, scope, |mut g| {
        g.nodes.push(node);
        g
    })
}

/// Remove the node with `node_id` from the graph for `scope`, if present.
pub fn remove_node(store: &GraphStore, scope: &ScopeId, node_id: &str) -> GraphStore {
    upsert_graph(store, scope, |mut g| {
        g.nodes.retain(|n| n.id != node_id);
        g
    })
}

/// Flip the bypass flag of the node with `node_id`.
pub fn toggle_node_bypass(store: &GraphStore, scope: &ScopeId, node_id: &str) -> GraphStore {
    upsert_graph(store, scope, |mut g| {
        if let Some(n) = g.nodes.iter_mut().find(|n| n.id == node_id) {
            n.bypassed = !n.bypassed;
        }
        g
    })
}

/// Replace the parameter object of the node with `node_id`.
pub fn set_node_params(
    store: &GraphStore,
    scope: &ScopeId,
    node_id: &str,
    params: serde_json::Value,
) -> GraphStore {
    upsert_graph(store, scope, |mut g| {
        if let Some(n) = g.nodes.iter_mut().find(|n| n.id == node_id) {
            n.params = params;
        }
        g
    })
}

/// Move the node with `node_id` to position `to` (clamped to the chain length).
pub fn move_node(store: &GraphStore, scope: &ScopeId, node_id: &str, to: usize) -> GraphStore {
    upsert_graph(store, scope, |mut g| {
        if let Some(from) = g.nodes.iter().position(|n| n.id == node_id) {
            let node = g.nodes.remove(from);
            let to = to.min(g.nodes.len());
            g.nodes.insert(to, node);
        }
        g
    })
}

/// Return a store with the global bypass switch set to `bypass`.
pub fn set_global_bypass(store: &GraphStore, bypass: bool) -> GraphStore {
    GraphStore {
        global_bypass: bypass,
        ..store.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/store.rs"]
mod tests;
