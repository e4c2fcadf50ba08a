use async_trait::async_trait;
use complaint_core_db::models::{CommentModel, ComplaintModel, HistoryEntryModel};
use complaint_core_db::repository::{AppendComment, StoreError, StoreResult};
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::{insert_history, load_aggregate, touch_complaint, PostgresComplaintStore};
use crate::utils::map_sqlx_err;

#[async_trait]
impl AppendComment for PostgresComplaintStore {
    async fn append_comment(
        &self,
        id: Uuid,
        comment: CommentModel,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel> {
        self.guard(async {
            let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

            touch_complaint(&mut *tx, id).await?;

            sqlx::query(
                r#"
                INSERT INTO complaint_comment (id, complaint_id, author_id, message, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(comment.id)
            .bind(comment.complaint_id)
            .bind(comment.author_id)
            .bind(comment.message.as_str())
            .bind(comment.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

            insert_history(&mut *tx, &entry).await?;

            let stored = load_aggregate(&mut *tx, id)
                .await?
                .ok_or(StoreError::NotFound(id))?;
            tx.commit().await.map_err(map_sqlx_err)?;

            debug!(complaint_id = %id, "comment row appended");
            Ok(stored)
        })
        .await
    }
}
