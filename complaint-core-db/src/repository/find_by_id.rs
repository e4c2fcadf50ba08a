use async_trait::async_trait;
use uuid::Uuid;

use crate::models::complaint::ComplaintModel;
use crate::repository::error::StoreResult;

/// Repository trait for loading a single complaint aggregate by id.
#[async_trait]
pub trait FindComplaintById: Send + Sync {
    /// Load the full aggregate: complaint, attachments, comments, rating and
    /// history (ordered by sequence number).
    ///
    /// # Returns
    /// * `Ok(Some(ComplaintModel))` - the assembled aggregate
    /// * `Ok(None)` - no complaint with this id exists
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ComplaintModel>>;
}
