use async_trait::async_trait;

use crate::models::complaint::ComplaintModel;
use crate::repository::error::StoreResult;
use crate::repository::filter::ComplaintFilter;

/// Repository trait for listing complaint aggregates.
#[async_trait]
pub trait ListComplaints: Send + Sync {
    /// Load every aggregate matching the filter, newest first.
    async fn list(&self, filter: &ComplaintFilter) -> StoreResult<Vec<ComplaintModel>>;
}
