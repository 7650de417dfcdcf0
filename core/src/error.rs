use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Missing field '{field}'")]
    MissingField { field: String },

    #[error("Unresolved {kind} id {id} on player {player_id}")]
    UnresolvedReference {
        kind: ReferenceKind,
        id: i64,
        player_id: i64,
    },

    #[error("Fetch failed for {payload} payload: {reason}")]
    FetchFailed { payload: String, reason: String },
}

impl PipelineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload { reason: reason.into() }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField { field: field.into() }
    }

    /// True for the errors a builder recovers from at its own boundary.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MalformedPayload { .. } | Self::MissingField { .. } | Self::FetchFailed { .. }
        )
    }
}

/// Which lookup a foreign-key id failed to resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Team,
    Position,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Team     => write!(f, "team"),
            ReferenceKind::Position => write!(f, "element_type"),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
