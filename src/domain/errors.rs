use thiserror::Error;

/// Message used when a remote fault carries no message of its own
pub const UNKNOWN_REMOTE_FAILURE: &str = "unknown remote failure";

/// Faults reported by a document store backend
///
/// Messages are rendered verbatim so that the cause reported by the backend
/// reaches the user unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Backend(String),
}

/// Errors surfaced by the team accessor, repository and state holders
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamError {
    /// Client-side input check failed; never reaches the store
    #[error("{0}")]
    Validation(String),

    /// Request rejected before any network call
    #[error("{0}")]
    InvalidArgument(String),

    /// Fault reported by the document store
    #[error("{0}")]
    RemoteFailure(String),
}

impl TeamError {
    /// Returns the user-facing message, or `fallback` if it is blank
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

impl From<StoreError> for TeamError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            TeamError::RemoteFailure(UNKNOWN_REMOTE_FAILURE.to_string())
        } else {
            TeamError::RemoteFailure(message)
        }
    }
}

pub type TeamResult<T> = Result<T, TeamError>;
