use std::fmt;

/// Convenience result type used across moshflow.
pub type MoshResult<T> = Result<T, MoshError>;

/// Top-level error taxonomy used by the validation and render/analyze boundaries.
///
/// The composer, pipeline adapter and transform engine are total and never produce one of
/// these; only [`crate::assert_valid`] and the boundary functions in [`crate::prepare_render`],
/// [`crate::render_project`] and [`crate::analyze_project`] do.
#[derive(thiserror::Error, Debug)]
pub enum MoshError {
    /// Hard-stop validation failure carrying the full diagnostic list.
    #[error("validation error: {}", .errors.join("; "))]
    Validation {
        /// Human-readable diagnostics, in the order the validator produced them.
        errors: Vec<String>,
    },

    /// Typed failure raised at the analyze/render boundary.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Errors when serializing or deserializing project data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from collaborators or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MoshError {
    /// Build a [`MoshError::Validation`] value.
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    /// Build a [`MoshError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Engine error code, when this is an [`MoshError::Engine`].
    pub fn engine_code(&self) -> Option<EngineErrorCode> {
        match self {
            Self::Engine(e) => Some(e.code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MoshError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

/// Closed set of boundary failure codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineErrorCode {
    /// The project failed validation.
    InvalidProject,
    /// Render settings could not be normalized into an encodable form.
    NormalizationFailed,
    /// The external codec engine reported a failure.
    RenderFailed,
}

impl EngineErrorCode {
    /// Stable kebab-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidProject => "invalid-project",
            Self::NormalizationFailed => "normalization-failed",
            Self::RenderFailed => "render-failed",
        }
    }
}

impl fmt::Display for EngineErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boundary error with a code, a summary and the diagnostics behind it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Serialize)]
#[error("engine error [{code}]: {message}")]
pub struct EngineError {
    /// Failure code.
    pub code: EngineErrorCode,
    /// One-line summary.
    pub message: String,
    /// Underlying diagnostics (validator errors, normalization problems, codec messages).
    pub details: Vec<String>,
}

impl EngineError {
    /// Build an engine error.
    pub fn new(code: EngineErrorCode, message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    /// Build an [`EngineErrorCode::InvalidProject`] error wrapping validator output.
    pub fn invalid_project(details: Vec<String>) -> Self {
        Self::new(
            EngineErrorCode::InvalidProject,
            format!("project has {} validation error(s)", details.len()),
            details,
        )
    }

    /// Build an [`EngineErrorCode::NormalizationFailed`] error.
    pub fn normalization_failed(details: Vec<String>) -> Self {
        Self::new(
            EngineErrorCode::NormalizationFailed,
            "render settings could not be normalized",
            details,
        )
    }

    /// Build an [`EngineErrorCode::RenderFailed`] error.
    pub fn render_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            EngineErrorCode::RenderFailed,
            "codec engine failed",
            vec![message],
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
