use quran_core::ComposeError;
use thiserror::Error;

/// Failure to bring a static resource into memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to fetch {resource}: {reason}")]
    DataSourceFetchFailed { resource: String, reason: String },
    #[error("malformed {resource}: {reason}")]
    Malformed { resource: String, reason: String },
}

/// Error surfaced by a session operation, displayable as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

impl SessionError {
    /// Whether retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::Load(LoadError::DataSourceFetchFailed { .. })
        )
    }
}
