use async_trait::async_trait;
use uuid::Uuid;

use crate::models::complaint::ComplaintModel;
use crate::models::history::HistoryEntryModel;
use crate::models::rating::RatingModel;
use crate::repository::error::StoreResult;

/// Repository trait for the one-time rating write.
///
/// The store itself enforces write-once: if a rating already exists the call
/// fails with `StoreError::Conflict` and the stored rating is untouched,
/// regardless of what the policy layer concluded from a possibly stale read.
#[async_trait]
pub trait SetRating: Send + Sync {
    /// Persist the rating and its audit entry in one transaction.
    async fn set_rating(
        &self,
        id: Uuid,
        rating: RatingModel,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel>;
}
