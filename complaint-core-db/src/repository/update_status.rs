use async_trait::async_trait;
use uuid::Uuid;

use crate::models::common_enums::Status;
use crate::models::complaint::ComplaintModel;
use crate::models::history::HistoryEntryModel;
use crate::repository::error::StoreResult;

/// Repository trait for the status-change mutation.
///
/// Status, first-touch assignment and the audit entry must commit together
/// or not at all; a status row updated without its history entry is a
/// store-layer bug.
#[async_trait]
pub trait UpdateComplaintStatus: Send + Sync {
    /// Apply a status change in one transaction.
    ///
    /// # Arguments
    /// * `id` - the complaint to mutate
    /// * `status` - the new status (may equal the current one)
    /// * `assign_to` - when `Some`, set `assigned_to` only if it is still
    ///   absent; an existing assignment is never replaced
    /// * `entry` - the sealed audit entry for this mutation
    async fn update_status(
        &self,
        id: Uuid,
        status: Status,
        assign_to: Option<Uuid>,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel>;
}
