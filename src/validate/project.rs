use std::collections::{HashMap, HashSet};

use crate::{
    automation::curve::param_range,
    foundation::core::{FrameRange, MAX_DURATION_FRAMES},
    foundation::error::{MoshError, MoshResult},
    graph::scope::canonical_key,
    ops::flat::{FlatOperationSet, Operation, OperationKind},
    project::model::Project,
    validate::diagnostic::{Diagnostic, DiagnosticKind, PathElem, ValidationReport},
};

use PathElem::{Field, Index, Key};

/// Check a project and report every problem found.
///
/// Never fails and never short-circuits: all checks run and every finding is returned.
#[tracing::instrument(skip(project), fields(project = %project.name))]
pub fn validate_project(project: &Project) -> ValidationReport {
    let mut out = Vec::new();

    validate_header(project, &mut out);
    let known = Known::collect(project, &mut out);
    validate_clips(project, &known, &mut out);
    validate_operations(&project.operations, &known, &mut out);
    validate_masks(project, &known, &mut out);
    validate_graphs(project, &known, &mut out);
    validate_automation(project, &known, &mut out);

    let report = ValidationReport::from_diagnostics(out);
    if !report.valid {
        tracing::debug!(errors = report.errors.len(), "project failed validation");
    }
    report
}

/// Validate and turn a failing report into [`MoshError::Validation`].
pub fn assert_valid(project: &Project) -> MoshResult<()> {
    let report = validate_project(project);
    if report.valid {
        Ok(())
    } else {
        Err(MoshError::validation(report.errors))
    }
}

/// Ids defined by the project, for reference checks.
struct Known<'a> {
    sources: HashSet<&'a str>,
    tracks: HashSet<&'a str>,
    // clip id -> track id
    clips: HashMap<&'a str, &'a str>,
    masks: HashSet<&'a str>,
    operations: HashSet<&'a str>,
}

impl<'a> Known<'a> {
    fn collect(project: &'a Project, out: &mut Vec<Diagnostic>) -> Self {
        let sources = unique(
            project.sources.iter().map(|s| s.id.as_str()),
            &[Field("sources")],
            "source",
            out,
        );
        let tracks = unique(
            project.timeline.tracks.iter().map(|t| t.id.as_str()),
            &[Field("timeline"), Field("tracks")],
            "track",
            out,
        );
        unique(
            project.timeline.clips.iter().map(|c| c.id.as_str()),
            &[Field("timeline"), Field("clips")],
            "clip",
            out,
        );
        let masks = unique(
            project.masks.iter().map(|m| m.id.as_str()),
            &[Field("masks")],
            "mask",
            out,
        );
        unique(
            project.automation.iter().map(|a| a.id.as_str()),
            &[Field("automation")],
            "automation curve",
            out,
        );

        let mut clips = HashMap::new();
        for c in &project.timeline.clips {
            clips.entry(c.id.as_str()).or_insert(c.track_id.as_str());
        }

        let mut operations = HashSet::new();
        for (kind, i, id) in flat_ids(&project.operations) {
            if !operations.insert(id) {
                out.push(Diagnostic::at(
                    DiagnosticKind::Validation,
                    &[Field("operations"), Field(kind.as_str()), Index(i), Field("id")],
                    format!("duplicate operation id '{id}'"),
                ));
            }
        }
        operations.extend(project.graphs.node_ids());

        Self {
            sources,
            tracks,
            clips,
            masks,
            operations,
        }
    }
}

fn unique<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    base: &[PathElem],
    what: &str,
    out: &mut Vec<Diagnostic>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for (i, id) in ids.into_iter().enumerate() {
        if !seen.insert(id) {
            let mut path = base.to_vec();
            path.extend([Index(i), Field("id")]);
            out.push(Diagnostic::at(
                DiagnosticKind::Validation,
                &path,
                format!("duplicate {what} id '{id}'"),
            ));
        }
    }
    seen
}

fn flat_ids(ops: &FlatOperationSet) -> Vec<(OperationKind, usize, &str)> {
    let lists: [(OperationKind, Vec<&str>); 5] = [
        (
            OperationKind::DropKeyframes,
            ops.drop_keyframes.iter().map(|o| o.id.as_str()).collect(),
        ),
        (
            OperationKind::FreezeReference,
            ops.freeze_reference.iter().map(|o| o.id.as_str()).collect(),
        ),
        (
            OperationKind::RedirectFrames,
            ops.redirect_frames.iter().map(|o| o.id.as_str()).collect(),
        ),
        (
            OperationKind::HoldSmear,
            ops.hold_smear.iter().map(|o| o.id.as_str()).collect(),
        ),
        (
            OperationKind::MotionVectorTransform,
            ops.motion_vector_transform
                .iter()
                .map(|o| o.id.as_str())
                .collect(),
        ),
    ];
    lists
        .into_iter()
        .flat_map(|(kind, ids)| {
            ids.into_iter()
                .enumerate()
                .map(move |(i, id)| (kind, i, id))
        })
        .collect()
}

fn validate_header(project: &Project, out: &mut Vec<Diagnostic>) {
    if project.name.trim().is_empty() {
        out.push(Diagnostic::at(
            DiagnosticKind::Validation,
            &[Field("name")],
            "project name must not be empty",
        ));
    }
    if project.block_size <= 0 {
        out.push(Diagnostic::at(
            DiagnosticKind::Validation,
            &[Field("block_size")],
            format!("block_size must be positive, got {}", project.block_size),
        ));
    }
    if !positive(project.fps) {
        out.push(Diagnostic::at(
            DiagnosticKind::Validation,
            &[Field("fps")],
            format!("fps must be a positive finite number, got {}", project.fps),
        ));
    }
    if project.duration_frames < 0 {
        out.push(Diagnostic::at(
            DiagnosticKind::Validation,
            &[Field("duration_frames")],
            format!(
                "duration_frames must not be negative, got {}",
                project.duration_frames
            ),
        ));
    } else if project.duration_frames > MAX_DURATION_FRAMES {
        out.push(Diagnostic::at(
            DiagnosticKind::Validation,
            &[Field("duration_frames")],
            format!(
                "duration_frames must be <= {MAX_DURATION_FRAMES}, got {}",
                project.duration_frames
            ),
        ));
    }
    if project.timeline.tracks.is_empty() {
        out.push(Diagnostic::at(
            DiagnosticKind::Validation,
            &[Field("timeline"), Field("tracks")],
            "timeline must have at least one track",
        ));
    }
}

fn validate_clips(project: &Project, known: &Known<'_>, out: &mut Vec<Diagnostic>) {
    for (i, clip) in project.timeline.clips.iter().enumerate() {
        let at = |f: &'static str| [Field("timeline"), Field("clips"), Index(i), Field(f)];
        if !known.tracks.contains(clip.track_id.as_str()) {
            out.push(Diagnostic::at(
                DiagnosticKind::Reference,
                &at("track_id"),
                format!(
                    "clip '{}' references missing track '{}'",
                    clip.id, clip.track_id
                ),
            ));
        }
        if !known.sources.contains(clip.source_id.as_str()) {
            out.push(Diagnostic::at(
                DiagnosticKind::Reference,
                &at("source_id"),
                format!(
                    "clip '{}' references missing source '{}'",
                    clip.id, clip.source_id
                ),
            ));
        }
        check_range(clip.range, &at("range"), out);
    }
}

fn validate_operations(ops: &FlatOperationSet, known: &Known<'_>, out: &mut Vec<Diagnostic>) {
    for kind in OperationKind::PRIORITY {
        for (i, op) in ops.of_kind(kind).iter().enumerate() {
            let base = [Field("operations"), Field(kind.as_str()), Index(i)];
            let at = |f: &'static str| {
                let mut p = base.to_vec();
                p.push(Field(f));
                p
            };

            check_range(op.range(), &at("range"), out);
            if let Some(clip) = op.clip_id()
                && !known.clips.contains_key(clip)
            {
                out.push(Diagnostic::at(
                    DiagnosticKind::Reference,
                    &at("clip_id"),
                    format!(
                        "{} operation '{}' references missing clip '{clip}'",
                        kind.label(),
                        op.id()
                    ),
                ));
            }
            if let Some(mask) = op.mask_id()
                && !known.masks.contains(mask)
            {
                out.push(Diagnostic::at(
                    DiagnosticKind::Reference,
                    &at("mask_id"),
                    format!(
                        "{} operation '{}' references missing mask '{mask}'",
                        kind.label(),
                        op.id()
                    ),
                ));
            }

            match op {
                Operation::DropKeyframes(op) => {
                    if let Some(n) = op.pattern.as_ref().and_then(|p| p.every_nth)
                        && n <= 0
                    {
                        let mut path = at("pattern");
                        path.push(Field("every_nth"));
                        out.push(Diagnostic::at(
                            DiagnosticKind::Validation,
                            &path,
                            format!("every_nth must be positive, got {n}"),
                        ));
                    }
                }
                Operation::RedirectFrames(op) => {
                    check_range(op.source_range, &at("source_range"), out);
                }
                Operation::HoldSmear(op) => {
                    if op.hold_frames == 0 {
                        out.push(Diagnostic::at(
                            DiagnosticKind::Validation,
                            &at("hold_frames"),
                            "hold_frames must be positive",
                        ));
                    }
                }
                Operation::MotionVectorTransform(op) => {
                    for (name, value) in [
                        ("scale", op.scale),
                        ("jitter", op.jitter),
                        ("quantize", op.quantize),
                        ("drift", op.drift),
                    ] {
                        if let Some(msg) = out_of_range(name, value) {
                            out.push(Diagnostic::at(DiagnosticKind::Validation, &at(name), msg));
                        }
                    }
                }
                Operation::FreezeReference(_) => {}
            }
        }
    }

    for name in ops.unknown_kinds() {
        out.push(Diagnostic::at(
            DiagnosticKind::Validation,
            &[Field("operations"), Key(name.to_string())],
            format!("unknown operation kind '{name}'"),
        ));
    }
}

fn validate_masks(project: &Project, known: &Known<'_>, out: &mut Vec<Diagnostic>) {
    for (i, mask) in project.masks.iter().enumerate() {
        for (j, clip) in mask.clip_ids.iter().enumerate() {
            if !known.clips.contains_key(clip.as_str()) {
                out.push(Diagnostic::at(
                    DiagnosticKind::Reference,
                    &[Field("masks"), Index(i), Field("clip_ids"), Index(j)],
                    format!("mask '{}' references missing clip '{clip}'", mask.id),
                ));
            }
        }

        let mut prev_t = f64::NEG_INFINITY;
        for (j, kf) in mask.keyframes.iter().enumerate() {
            let path = [Field("masks"), Index(i), Field("keyframes"), Index(j)];
            if !positive(kf.transform.width) || !positive(kf.transform.height) {
                let mut p = path.to_vec();
                p.push(Field("transform"));
                out.push(Diagnostic::at(
                    DiagnosticKind::Validation,
                    &p,
                    format!(
                        "mask transform must have positive size, got {}x{}",
                        kf.transform.width, kf.transform.height
                    ),
                ));
            }
            if kf.t < prev_t {
                out.push(Diagnostic::at(
                    DiagnosticKind::Validation,
                    &path,
                    "mask keyframes must be ordered by t",
                ));
            }
            prev_t = prev_t.max(kf.t);
        }
    }
}

fn validate_graphs(project: &Project, known: &Known<'_>, out: &mut Vec<Diagnostic>) {
    for (key, graph) in project.graphs.iter_graphs() {
        let base = [Field("graphs"), Field("graphs"), Key(key.to_string())];
        let at = |f: &'static str| {
            let mut p = base.to_vec();
            p.extend([Field("scope"), Field(f)]);
            p
        };
        let scope = &graph.scope;

        if !scope.is_well_formed() {
            out.push(Diagnostic::at(
                DiagnosticKind::Validation,
                &at("kind"),
                format!("{} scope is missing required ids", scope.kind),
            ));
        }
        let expected = canonical_key(scope);
        if key != expected {
            out.push(Diagnostic::at(
                DiagnosticKind::Validation,
                &base,
                format!("graph stored under '{key}' but its scope key is '{expected}'"),
            ));
        }
        if scope.timeline_id != project.timeline.id {
            out.push(Diagnostic::at(
                DiagnosticKind::Reference,
                &at("timeline_id"),
                format!("graph targets missing timeline '{}'", scope.timeline_id),
            ));
        }
        if let Some(track) = scope.track_id.as_deref()
            && !known.tracks.contains(track)
        {
            out.push(Diagnostic::at(
                DiagnosticKind::Reference,
                &at("track_id"),
                format!("graph targets missing track '{track}'"),
            ));
        }
        if let Some(clip) = scope.clip_id.as_deref() {
            match known.clips.get(clip) {
                None => out.push(Diagnostic::at(
                    DiagnosticKind::Reference,
                    &at("clip_id"),
                    format!("graph targets missing clip '{clip}'"),
                )),
                Some(&track) if scope.track_id.as_deref().is_some_and(|t| t != track) => {
                    out.push(Diagnostic::at(
                        DiagnosticKind::Validation,
                        &at("clip_id"),
                        format!(
                            "clip '{clip}' is on track '{track}', not '{}'",
                            scope.track_id.as_deref().unwrap_or_default()
                        ),
                    ));
                }
                Some(_) => {}
            }
        }

        let mut seen = HashSet::new();
        for (i, node) in graph.nodes.iter().enumerate() {
            if !seen.insert(node.id.as_str()) {
                let mut p = base.to_vec();
                p.extend([Field("nodes"), Index(i), Field("id")]);
                out.push(Diagnostic::at(
                    DiagnosticKind::Validation,
                    &p,
                    format!("duplicate node id '{}'", node.id),
                ));
            }
        }
    }
}

fn validate_automation(project: &Project, known: &Known<'_>, out: &mut Vec<Diagnostic>) {
    for (i, curve) in project.automation.iter().enumerate() {
        let target = &curve.target;
        let at = |f: &'static str| [Field("automation"), Index(i), Field("target"), Field(f)];

        if !known.operations.contains(target.operation_id.as_str()) {
            out.push(Diagnostic::at(
                DiagnosticKind::Reference,
                &at("operation_id"),
                format!(
                    "automation curve '{}' targets missing operation '{}'",
                    curve.id, target.operation_id
                ),
            ));
        }

        let range = param_range(&target.param_name);
        if range.is_none() {
            out.push(Diagnostic::at(
                DiagnosticKind::Validation,
                &at("param_name"),
                format!("unknown automation parameter '{}'", target.param_name),
            ));
        }

        let mut prev_t = f64::NEG_INFINITY;
        for (j, point) in curve.points.iter().enumerate() {
            let path = [Field("automation"), Index(i), Field("points"), Index(j)];
            if range.is_some()
                && let Some(msg) = out_of_range(&target.param_name, point.value)
            {
                out.push(Diagnostic::at(DiagnosticKind::Validation, &path, msg));
            }
            if point.t < prev_t {
                out.push(Diagnostic::at(
                    DiagnosticKind::Validation,
                    &path,
                    "automation points must be ordered by t",
                ));
            }
            prev_t = prev_t.max(point.t);
        }
    }
}

fn check_range(range: FrameRange, path: &[PathElem], out: &mut Vec<Diagnostic>) {
    if !range.is_well_formed() {
        out.push(Diagnostic::at(
            DiagnosticKind::Validation,
            path,
            format!(
                "range start {} must be <= end {}",
                range.start, range.end
            ),
        ));
    }
}

fn out_of_range(name: &str, value: f64) -> Option<String> {
    let (lo, hi) = param_range(name)?;
    if value.is_finite() && (lo..=hi).contains(&value) {
        None
    } else {
        Some(format!("{name} value {value} is outside [{lo}, {hi}]"))
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/validate/project.rs"]
mod tests;
