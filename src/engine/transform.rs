use std::collections::BTreeSet;

use rand::Rng;

use crate::{
    engine::pipeline::{
        DropIntraParams, DropPredictedParams, EngineOp, FreezeReferenceParams, HoldDuration,
        HoldReferenceParams, OperationInstance, Pipeline, ReferenceSelect,
    },
    engine::structural::{FrameType, StructuralFrame, StructuralStream},
    foundation::core::secs_to_frames,
    graph::scope::{ScopeId, ScopeKind, canonical_key},
};

/// Run every chain in `pipeline` that targets `scope_kind` over `stream`.
///
/// Returns `stream` unchanged when the pipeline is globally bypassed or has no chain for the
/// kind. Random draws come from `rng` only.
#[tracing::instrument(skip(stream, pipeline, rng), fields(frames = stream.len()))]
pub fn apply_pipeline<R>(
    stream: &StructuralStream,
    pipeline: &Pipeline,
    scope_kind: ScopeKind,
    rng: &mut R,
) -> StructuralStream
where
    R: Rng + ?Sized,
{
    if pipeline.global_bypass {
        return stream.clone();
    }
    let mut out = stream.clone();
    for chain in pipeline.chains_for_kind(scope_kind) {
        out = apply_chain(&out, &chain.chain, rng);
    }
    tracing::debug!(before = stream.len(), after = out.len(), "pipeline applied");
    out
}

/// Run the chains along `scope`'s lineage: the scope itself, then its track, then the timeline.
pub fn apply_for_scope<R>(
    stream: &StructuralStream,
    pipeline: &Pipeline,
    scope: &ScopeId,
    rng: &mut R,
) -> StructuralStream
where
    R: Rng + ?Sized,
{
    if pipeline.global_bypass {
        return stream.clone();
    }
    let mut out = stream.clone();
    for level in scope.lineage() {
        let key = canonical_key(&level);
        for chain in pipeline.chains_for_key(&key) {
            out = apply_chain(&out, &chain.chain, rng);
        }
    }
    out
}

/// Run the enabled instances of `chain` in order.
pub fn apply_chain<R>(
    stream: &StructuralStream,
    chain: &[OperationInstance],
    rng: &mut R,
) -> StructuralStream
where
    R: Rng + ?Sized,
{
    let mut out = stream.clone();
    for inst in chain.iter().filter(|i| i.enabled) {
        out = apply_op(&out, &inst.op, rng);
    }
    out
}

/// Dispatch one operation to its transform.
pub fn apply_op<R>(stream: &StructuralStream, op: &EngineOp, rng: &mut R) -> StructuralStream
where
    R: Rng + ?Sized,
{
    match op {
        EngineOp::DropIntraFrames(p) => drop_intra_frames(stream, p, rng),
        EngineOp::DropPredictedFrames(p) => drop_predicted_frames(stream, p, rng),
        EngineOp::HoldReferenceFrame(p) => hold_reference_frame(stream, p),
        EngineOp::ClassicDatamosh => classic_datamosh(stream),
        EngineOp::FreezeReferenceFrame(p) => freeze_reference_frame(stream, p),
        EngineOp::Stub { .. } | EngineOp::Inert { .. } => stream.clone(),
    }
}

/// Remove intra frames, each with probability `p.probability` percent.
pub fn drop_intra_frames<R>(
    stream: &StructuralStream,
    p: &DropIntraParams,
    rng: &mut R,
) -> StructuralStream
where
    R: Rng + ?Sized,
{
    let mut removed = BTreeSet::new();
    for f in stream.frames.iter().filter(|f| f.is_intra()) {
        if roll(rng, p.probability) {
            removed.insert(f.index);
        }
        if p.first_intra_only {
            break;
        }
    }
    excise(stream, &removed)
}

/// Remove frames whose type is in `p.frame_types`, each with probability `p.probability` percent.
pub fn drop_predicted_frames<R>(
    stream: &StructuralStream,
    p: &DropPredictedParams,
    rng: &mut R,
) -> StructuralStream
where
    R: Rng + ?Sized,
{
    let mut removed = BTreeSet::new();
    for f in &stream.frames {
        if f.frame_type == FrameType::Intra || !p.frame_types.contains(&f.frame_type) {
            continue;
        }
        if roll(rng, p.probability) {
            removed.insert(f.index);
        }
    }
    excise(stream, &removed)
}

/// Hold the selected frame's content across the following run of frames.
///
/// Held frames keep their type marker; their content source becomes the selected frame's,
/// and predicted frames among them reference the selected frame.
pub fn hold_reference_frame(stream: &StructuralStream, p: &HoldReferenceParams) -> StructuralStream {
    let mut out = stream.clone();
    let Some(sel) = select_position(&out.frames, p.select) else {
        return out;
    };

    let rest = &out.frames[sel + 1..];
    let run = match p.duration {
        HoldDuration::UntilNextIntra => rest.iter().take_while(|f| !f.is_intra()).count(),
        HoldDuration::FixedFrames { frames } => usize::try_from(frames).unwrap_or(usize::MAX),
        HoldDuration::FixedSeconds { seconds } => {
            usize::try_from(secs_to_frames(seconds, out.fps)).unwrap_or(usize::MAX)
        }
    };

    let held_index = out.frames[sel].index;
    let source = out.frames[sel].content_source();
    for f in out.frames.iter_mut().skip(sel + 1).take(run) {
        f.content_from = Some(source);
        if !f.is_intra() {
            f.reference_indices = vec![held_index];
        }
    }
    out
}

/// Keep the first intra frame, drop every other, and point all later predicted frames at it.
///
/// Every frame after the kept intra frame shows its content.
pub fn classic_datamosh(stream: &StructuralStream) -> StructuralStream {
    let Some(first) = stream.frames.iter().position(|f| f.is_intra()) else {
        return stream.clone();
    };
    let first_index = stream.frames[first].index;
    let source = stream.frames[first].content_source();

    let removed: BTreeSet<u64> = stream.frames[first + 1..]
        .iter()
        .filter(|f| f.is_intra())
        .map(|f| f.index)
        .collect();
    let mut out = excise(stream, &removed);
    for f in out.frames.iter_mut().filter(|f| f.index > first_index) {
        f.reference_indices = vec![first_index];
        f.content_from = Some(source);
    }
    out
}

/// Point every predicted frame at `p.reference_index`.
pub fn freeze_reference_frame(
    stream: &StructuralStream,
    p: &FreezeReferenceParams,
) -> StructuralStream {
    let mut out = stream.clone();
    for f in out.frames.iter_mut().filter(|f| !f.is_intra()) {
        f.reference_indices = vec![p.reference_index];
    }
    out
}

fn roll<R>(rng: &mut R, probability: f64) -> bool
where
    R: Rng + ?Sized,
{
    if probability.is_nan() || probability <= 0.0 {
        return false;
    }
    if probability >= 100.0 {
        return true;
    }
    rng.gen_range(0.0..100.0) < probability
}

fn select_position(frames: &[StructuralFrame], select: ReferenceSelect) -> Option<usize> {
    match select {
        ReferenceSelect::FirstIntra => frames.iter().position(|f| f.is_intra()),
        ReferenceSelect::LastIntra => frames.iter().rposition(|f| f.is_intra()),
        ReferenceSelect::SpecificFrameIndex { index } => {
            if frames.is_empty() {
                return None;
            }
            Some(
                frames
                    .iter()
                    .position(|f| f.index >= index)
                    .unwrap_or(frames.len() - 1),
            )
        }
    }
}

/// Remove frames by index without renumbering survivors.
///
/// References and content sources that pointed at a removed frame move to the closest
/// earlier surviving frame, or are dropped when there is none.
fn excise(stream: &StructuralStream, removed: &BTreeSet<u64>) -> StructuralStream {
    if removed.is_empty() {
        return stream.clone();
    }
    let surviving: BTreeSet<u64> = stream
        .frames
        .iter()
        .map(|f| f.index)
        .filter(|i| !removed.contains(i))
        .collect();
    let retarget = |r: u64| -> Option<u64> {
        if removed.contains(&r) {
            surviving.range(..r).next_back().copied()
        } else {
            Some(r)
        }
    };

    let frames = stream
        .frames
        .iter()
        .filter(|f| !removed.contains(&f.index))
        .map(|f| {
            let mut f = f.clone();
            let mut refs: Vec<u64> = Vec::with_capacity(f.reference_indices.len());
            for r in f.reference_indices.iter().filter_map(|&r| retarget(r)) {
                if r != f.index && !refs.contains(&r) {
                    refs.push(r);
                }
            }
            f.reference_indices = refs;
            f.content_from = f.content_from.and_then(retarget);
            f
        })
        .collect();

    StructuralStream {
        fps: stream.fps,
        frames,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/transform.rs"]
mod tests;
