use std::fmt;

/// Step in a JSON-path-like diagnostic location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathElem {
    Field(&'static str),
    Index(usize),
    Key(String),
}

pub(crate) fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
            PathElem::Key(k) => {
                s.push_str("[\"");
                for ch in k.chars() {
                    if ch == '"' || ch == '\\' {
                        s.push('\\');
                    }
                    s.push(ch);
                }
                s.push_str("\"]");
            }
        }
    }
    s
}

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A value is missing, malformed or out of range.
    Validation,
    /// An id refers to something that does not exist.
    Reference,
}

/// One validator finding.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    /// Category.
    pub kind: DiagnosticKind,
    /// Location, e.g. `$.timeline.clips[2].track_id`.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn at(kind: DiagnosticKind, path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            kind,
            path: format_path(path),
            message: message.into(),
        }
    }

    /// `true` for dangling-reference findings.
    pub fn is_reference(&self) -> bool {
        self.kind == DiagnosticKind::Reference
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Result of validating a project.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationReport {
    /// `true` when no diagnostics were produced.
    pub valid: bool,
    /// Rendered diagnostics, one string each.
    pub errors: Vec<String>,
    /// Structured diagnostics, in the same order as `errors`.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub(crate) fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            valid: diagnostics.is_empty(),
            errors: diagnostics.iter().map(ToString::to_string).collect(),
            diagnostics,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/diagnostic.rs"]
mod tests;
