pub mod access_policy;
pub mod comment_thread;
pub mod lifecycle;
pub mod queries;
pub mod rating;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use access_policy::*;
pub use comment_thread::*;
pub use lifecycle::*;
pub use queries::*;
pub use rating::*;

use chrono::Utc;
use complaint_core_db::models::{ComplaintModel, HistoryEntryModel};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Seals the next audit entry for a loaded aggregate: links it to the hash
/// of the newest existing entry and assigns the next sequence number.
pub(crate) fn audit_entry(
    complaint: &ComplaintModel,
    action: &str,
    actor_id: Uuid,
    remark: &str,
) -> ApiResult<HistoryEntryModel> {
    HistoryEntryModel::sealed(
        complaint.id,
        complaint.next_history_seq(),
        action,
        actor_id,
        remark,
        Utc::now(),
        complaint.last_history_hash(),
    )
    .map_err(ApiError::InternalError)
}
