use std::fmt;

/// Targeting level of an operation graph.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// Applies to the whole timeline.
    Timeline,
    /// Applies to every clip on one track.
    Track,
    /// Applies to one clip.
    Clip,
}

impl ScopeKind {
    /// Stable lowercase name, also used as the canonical key prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeline => "timeline",
            Self::Track => "track",
            Self::Clip => "clip",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the timeline, track or clip an operation graph targets.
///
/// Well-formed scopes carry exactly the ids their kind needs: a track scope has a
/// `track_id`, a clip scope has both `track_id` and `clip_id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ScopeId {
    /// Targeting level.
    pub kind: ScopeKind,
    /// Owning timeline.
    pub timeline_id: String,
    /// Track id for track and clip scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    /// Clip id for clip scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<String>,
}

impl ScopeId {
    /// Timeline-level scope.
    pub fn timeline(timeline_id: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Timeline,
            timeline_id: timeline_id.into(),
            track_id: None,
            clip_id: None,
        }
    }

    /// Track-level scope.
    pub fn track(timeline_id: impl Into<String>, track_id: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Track,
            timeline_id: timeline_id.into(),
            track_id: Some(track_id.into()),
            clip_id: None,
        }
    }

    /// Clip-level scope.
    pub fn clip(
        timeline_id: impl Into<String>,
        track_id: impl Into<String>,
        clip_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: ScopeKind::Clip,
            timeline_id: timeline_id.into(),
            track_id: Some(track_id.into()),
            clip_id: Some(clip_id.into()),
        }
    }

    /// `true` when the ids present match what the scope kind requires.
    pub fn is_well_formed(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        match self.kind {
            ScopeKind::Timeline => self.track_id.is_none() && self.clip_id.is_none(),
            ScopeKind::Track => present(&self.track_id) && self.clip_id.is_none(),
            ScopeKind::Clip => present(&self.track_id) && present(&self.clip_id),
        }
    }

    /// The enclosing scope: clip → track → timeline. Timeline scopes have no parent.
    pub fn parent(&self) -> Option<ScopeId> {
        match self.kind {
            ScopeKind::Timeline => None,
            ScopeKind::Track => Some(Self::timeline(self.timeline_id.clone())),
            ScopeKind::Clip => Some(Self {
                kind: ScopeKind::Track,
                timeline_id: self.timeline_id.clone(),
                track_id: self.track_id.clone(),
                clip_id: None,
            }),
        }
    }

    /// This scope followed by its ancestors, innermost first.
    pub fn lineage(&self) -> Vec<ScopeId> {
        let mut out = vec![self.clone()];
        let mut cur = self.parent();
        while let Some(scope) = cur {
            cur = scope.parent();
            out.push(scope);
        }
        out
    }
}

/// Stable string key for map lookups.
///
/// The key is the kind name followed by the non-empty id parts in timeline/track/clip order,
/// joined with `:`. Separator and escape characters inside ids are escaped, so distinct
/// well-formed scopes never share a key.
pub fn canonical_key(scope: &ScopeId) -> String {
    let mut key = String::from(scope.kind.as_str());
    let parts = [
        Some(scope.timeline_id.as_str()),
        scope.track_id.as_deref(),
        scope.clip_id.as_deref(),
    ];
    for part in parts.into_iter().flatten() {
        if part.is_empty() {
            continue;
        }
        key.push(':');
        push_escaped(&mut key, part);
    }
    key
}

fn push_escaped(out: &mut String, part: &str) {
    for ch in part.chars() {
        if ch == ':' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&canonical_key(self))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/scope.rs"]
mod tests;
