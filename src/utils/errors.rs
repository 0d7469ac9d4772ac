use thiserror::Error;

/// Main error type for DevHub
#[derive(Error, Debug)]
pub enum DevhubError {
    /// A repository entry in the input document is malformed.
    /// `index` is the entry's position in the input array.
    #[error("Invalid repository at index {index}: {reason}")]
    InvalidRepository { index: usize, reason: String },

    #[error("Invalid input document: {0}")]
    InvalidDocument(String),

    #[error("Unknown sort key '{0}' (expected one of: updated, stars, forks, name)")]
    InvalidSortKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    RenderError(String),
}

impl DevhubError {
    pub(crate) fn invalid_repository(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRepository {
            index,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DevhubError>;
