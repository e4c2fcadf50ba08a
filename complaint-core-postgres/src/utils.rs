use complaint_core_db::repository::StoreError;
use heapless::String as HeaplessString;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, StoreError>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, StoreError> {
    let s: String = row
        .try_get(col_name)
        .map_err(|e| StoreError::Internal(format!("column '{col_name}': {e}")))?;
    HeaplessString::from_str(&s).map_err(|_| {
        StoreError::Internal(format!("value for column '{col_name}' is too long (max {N} bytes)"))
    })
}

/// Maps a driver error onto the store taxonomy. Connection-level failures
/// are retryable; everything else is an internal store fault.
pub fn map_sqlx_err(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => StoreError::Unavailable("connection pool timed out".to_string()),
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("connection lost: {e}")),
        other => StoreError::Internal(other.to_string()),
    }
}
