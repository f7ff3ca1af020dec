use super::*;
use crate::foundation::error::{EngineErrorCode, MoshError};
use crate::ops::flat::OperationKind;
use crate::render::settings::{Container, RateControl, Resolution, VideoCodec};

fn fixture() -> Project {
    Project::from_json_str(include_str!("../../data/project.json")).unwrap()
}

struct FailingEngine;

impl CodecEngine for FailingEngine {
    fn encode(&mut self, _job: &RenderJob) -> anyhow::Result<EncodeStats> {
        Err(anyhow::anyhow!("encoder exited with status 1").context("writing out.mp4"))
    }
}

#[test]
fn prepare_fills_datamosh_in_priority_order() {
    let job = prepare_render(&fixture(), &RenderSettings::default()).unwrap();
    assert_eq!(
        job.settings.datamosh,
        vec![
            OperationKind::DropKeyframes,
            OperationKind::FreezeReference,
            OperationKind::MotionVectorTransform,
        ]
    );
    assert_eq!(job.operations.len(), 3);
    assert_eq!(job.pipeline.scopes.len(), 2);
}

#[test]
fn prepare_ignores_caller_datamosh_list() {
    let settings = RenderSettings {
        datamosh: vec![OperationKind::HoldSmear],
        ..RenderSettings::default()
    };
    let job = prepare_render(&fixture(), &settings).unwrap();
    assert!(!job.settings.datamosh.contains(&OperationKind::HoldSmear));
}

#[test]
fn invalid_project_is_refused() {
    let mut p = fixture();
    p.block_size = 0;
    let err = prepare_render(&p, &RenderSettings::default()).unwrap_err();
    assert_eq!(err.engine_code(), Some(EngineErrorCode::InvalidProject));
    match err {
        MoshError::Engine(e) => {
            assert_eq!(e.details.len(), 1);
            assert!(e.details[0].starts_with("$.block_size"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn bad_settings_fail_normalization() {
    let settings = RenderSettings {
        container: Container::Mp4,
        codec: VideoCodec::Xvid,
        resolution: Resolution {
            width: 0,
            height: 0,
        },
        rate_control: RateControl::Crf { crf: 60 },
        datamosh: vec![],
    };
    let err = prepare_render(&fixture(), &settings).unwrap_err();
    assert_eq!(err.engine_code(), Some(EngineErrorCode::NormalizationFailed));
}

#[test]
fn render_hands_job_to_engine() {
    let mut engine = RecordingEngine::new();
    let stats = render_project(&fixture(), &RenderSettings::default(), &mut engine).unwrap();
    assert_eq!(stats.frames_encoded, 48);
    assert_eq!(engine.jobs.len(), 1);
    assert_eq!(engine.jobs[0].project.name, "night-drive");
}

#[test]
fn engine_failure_is_render_failed() {
    let err = render_project(&fixture(), &RenderSettings::default(), &mut FailingEngine).unwrap_err();
    assert_eq!(err.engine_code(), Some(EngineErrorCode::RenderFailed));
    let MoshError::Engine(e) = err else {
        panic!("expected engine error");
    };
    assert_eq!(
        e.details,
        vec!["writing out.mp4: encoder exited with status 1".to_string()]
    );
}

#[test]
fn invalid_project_never_reaches_engine() {
    let mut p = fixture();
    p.name.clear();
    let mut engine = RecordingEngine::new();
    assert!(render_project(&p, &RenderSettings::default(), &mut engine).is_err());
    assert!(engine.jobs.is_empty());
}
