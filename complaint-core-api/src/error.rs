use complaint_core_db::repository::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input. Caller's fault, never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Role or ownership violation. The message must not reveal whether a
    /// resource exists when existence itself is sensitive.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Domain-level conflict, e.g. rating an already-rated complaint.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store timeout or connection loss. Retryable with backoff.
    #[error("Transient store failure: {0}")]
    TransientStore(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Whether a caller may retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::TransientStore(_))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(format!("complaint {id}")),
            StoreError::Conflict { detail, .. } => ApiError::Conflict(detail),
            StoreError::Unavailable(detail) => {
                tracing::warn!(%detail, "store unavailable");
                ApiError::TransientStore("storage temporarily unavailable".to_string())
            }
            StoreError::Internal(detail) => {
                // Store internals stay in the server-side log, never in the
                // user-visible message.
                tracing::error!(%detail, "store failure");
                ApiError::InternalError("storage failure".to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
