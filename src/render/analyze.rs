use rand::{SeedableRng, rngs::StdRng};

use crate::{
    engine::adapter::build_pipeline,
    engine::structural::{StreamStats, StructuralStream, build_structural_stream},
    engine::transform::apply_pipeline,
    foundation::error::{EngineError, MoshResult},
    graph::scope::ScopeKind,
    project::model::Project,
    validate::project::validate_project,
};

/// Before/after picture of what the timeline chain does to a project's stream.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Analysis {
    /// Counts for the freshly built stream.
    pub before: StreamStats,
    /// Counts after the timeline chain ran.
    pub after: StreamStats,
    /// Transformed stream.
    pub stream: StructuralStream,
}

/// Build the project's structural stream and run its timeline-scope chains over it.
///
/// Random draws are seeded from `project.seed`, so repeated calls agree.
#[tracing::instrument(skip(project), fields(project = %project.name))]
pub fn analyze_project(project: &Project) -> MoshResult<Analysis> {
    let report = validate_project(project);
    if !report.valid {
        return Err(EngineError::invalid_project(report.errors).into());
    }

    let stream = build_structural_stream(project.duration_frames, project.fps);
    let pipeline = build_pipeline(&project.graphs);
    let mut rng = StdRng::seed_from_u64(project.seed);
    let out = apply_pipeline(&stream, &pipeline, ScopeKind::Timeline, &mut rng);

    Ok(Analysis {
        before: stream.stats(),
        after: out.stats(),
        stream: out,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/analyze.rs"]
mod tests;
