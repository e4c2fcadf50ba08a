use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by a complaint store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("complaint {0} not found")]
    NotFound(Uuid),

    /// Domain-level write conflict, e.g. a rating row already exists.
    #[error("conflicting write on complaint {id}: {detail}")]
    Conflict { id: Uuid, detail: String },

    /// Timeout or connection loss. Retryable by the caller with backoff.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Anything else, e.g. a row that fails to map back into a model.
    #[error("store failure: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
