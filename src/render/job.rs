use crate::{
    engine::adapter::build_pipeline,
    engine::pipeline::Pipeline,
    foundation::error::{EngineError, MoshResult},
    ops::compose::{active_kinds, compose_operations},
    ops::flat::Operation,
    project::model::Project,
    render::settings::RenderSettings,
    validate::project::validate_project,
};

/// Everything the codec engine needs for one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderJob {
    /// Validated project snapshot.
    pub project: Project,
    /// Normalized settings with `datamosh` filled in.
    pub settings: RenderSettings,
    /// Composed flat operations in execution order.
    pub operations: Vec<Operation>,
    /// Resolved graph pipeline.
    pub pipeline: Pipeline,
}

/// Statistics reported by a codec engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncodeStats {
    /// Frames written.
    pub frames_encoded: u64,
    /// Bytes written to the output container.
    pub bytes_written: u64,
}

/// External encoder contract.
///
/// Implementations own I/O, progress and cancellation. They receive a job that has already
/// passed validation and settings normalization.
pub trait CodecEngine {
    /// Encode `job`.
    fn encode(&mut self, job: &RenderJob) -> anyhow::Result<EncodeStats>;
}

/// Engine that records the jobs it receives instead of encoding them.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    /// Jobs in submission order.
    pub jobs: Vec<RenderJob>,
}

impl RecordingEngine {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CodecEngine for RecordingEngine {
    fn encode(&mut self, job: &RenderJob) -> anyhow::Result<EncodeStats> {
        let frames = u64::try_from(job.project.duration_frames).unwrap_or(0);
        self.jobs.push(job.clone());
        Ok(EncodeStats {
            frames_encoded: frames,
            bytes_written: 0,
        })
    }
}

/// Validate `project`, normalize `settings` and assemble a [`RenderJob`].
///
/// Fails with `invalid-project` carrying the validator's errors, or `normalization-failed`
/// carrying every settings problem.
#[tracing::instrument(skip(project, settings), fields(project = %project.name))]
pub fn prepare_render(project: &Project, settings: &RenderSettings) -> MoshResult<RenderJob> {
    let report = validate_project(project);
    if !report.valid {
        tracing::warn!(errors = report.errors.len(), "refusing to render invalid project");
        return Err(EngineError::invalid_project(report.errors).into());
    }

    let mut settings = settings
        .normalized()
        .map_err(EngineError::normalization_failed)?;

    let operations = compose_operations(&project.operations);
    settings.datamosh = active_kinds(&operations);

    Ok(RenderJob {
        project: project.clone(),
        settings,
        operations,
        pipeline: build_pipeline(&project.graphs),
    })
}

/// Prepare a job and hand it to `engine`.
///
/// Engine failures are reported as `render-failed`.
#[tracing::instrument(skip(project, settings, engine), fields(project = %project.name))]
pub fn render_project(
    project: &Project,
    settings: &RenderSettings,
    engine: &mut dyn CodecEngine,
) -> MoshResult<EncodeStats> {
    let job = prepare_render(project, settings)?;
    let stats = engine
        .encode(&job)
        .map_err(|e| EngineError::render_failed(format!("{e:#}")))?;
    tracing::debug!(frames = stats.frames_encoded, "render finished");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/job.rs"]
mod tests;
