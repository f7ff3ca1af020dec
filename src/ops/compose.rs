use indexmap::IndexMap;

use crate::ops::flat::{FlatOperationSet, Operation, OperationKind};

/// Reduce a flat operation set to the ordered list of effective operations.
///
/// Kinds are emitted in [`OperationKind::PRIORITY`] order. Within a kind, operations that
/// share a [`dedup_key`] collapse to the last one inserted, and survivors keep the order in
/// which they were (last) inserted. The result depends only on `ops`.
#[tracing::instrument(skip(ops))]
pub fn compose_operations(ops: &FlatOperationSet) -> Vec<Operation> {
    let mut out = Vec::new();
    for kind in OperationKind::PRIORITY {
        let mut by_key: IndexMap<String, Operation> = IndexMap::new();
        for op in ops.of_kind(kind) {
            let key = dedup_key(&op);
            if let Some(prev) = by_key.shift_remove(&key) {
                tracing::debug!(
                    kind = kind.as_str(),
                    replaced = prev.id(),
                    by = op.id(),
                    "duplicate operation replaced"
                );
            }
            by_key.insert(key, op);
        }
        out.extend(by_key.into_values());
    }
    out
}

/// Key identifying what an operation does, ignoring its id.
///
/// Two operations of the same kind with equal keys are interchangeable targets; the later one
/// wins during composition.
pub fn dedup_key(op: &Operation) -> String {
    let target = op.clip_id().unwrap_or("*");
    let range = op.range();
    let base = format!(
        "{}|{}|{}..{}",
        op.kind().as_str(),
        target,
        range.start,
        range.end
    );
    match op {
        Operation::RedirectFrames(r) => format!(
            "{base}|anchor={}|src={}..{}",
            r.anchor, r.source_range.start, r.source_range.end
        ),
        Operation::DropKeyframes(_)
        | Operation::FreezeReference(_)
        | Operation::HoldSmear(_)
        | Operation::MotionVectorTransform(_) => base,
    }
}

/// Distinct kinds present in `ops`, in priority order.
pub fn active_kinds(ops: &[Operation]) -> Vec<OperationKind> {
    OperationKind::PRIORITY
        .into_iter()
        .filter(|k| ops.iter().any(|op| op.kind() == *k))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/ops/compose.rs"]
mod tests;
