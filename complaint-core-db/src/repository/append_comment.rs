use async_trait::async_trait;
use uuid::Uuid;

use crate::models::comment::CommentModel;
use crate::models::complaint::ComplaintModel;
use crate::models::history::HistoryEntryModel;
use crate::repository::error::StoreResult;

/// Repository trait for appending a comment.
///
/// The comment and its audit entry commit in one transaction. Appends must
/// never lose entries to a concurrent writer: implementations insert rows
/// (or merge into the current trail) rather than replacing the collection
/// wholesale.
#[async_trait]
pub trait AppendComment: Send + Sync {
    async fn append_comment(
        &self,
        id: Uuid,
        comment: CommentModel,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel>;
}
