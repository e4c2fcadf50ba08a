use async_trait::async_trait;
use complaint_core_db::models::{ComplaintModel, HistoryEntryModel, RatingModel};
use complaint_core_db::repository::{SetRating, StoreError, StoreResult};
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::{insert_history, load_aggregate, touch_complaint, PostgresComplaintStore};
use crate::utils::map_sqlx_err;

#[async_trait]
impl SetRating for PostgresComplaintStore {
    async fn set_rating(
        &self,
        id: Uuid,
        rating: RatingModel,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel> {
        self.guard(async {
            let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

            touch_complaint(&mut *tx, id).await?;

            // The primary key on complaint_rating makes the write one-shot:
            // a conflicting insert affects zero rows and the stored rating
            // is left exactly as it was.
            let result = sqlx::query(
                r#"
                INSERT INTO complaint_rating (complaint_id, score, feedback, rated_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (complaint_id) DO NOTHING
                "#,
            )
            .bind(rating.complaint_id)
            .bind(rating.score)
            .bind(rating.feedback.as_str())
            .bind(rating.rated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
            if result.rows_affected() == 0 {
                return Err(StoreError::Conflict {
                    id,
                    detail: "complaint is already rated".to_string(),
                });
            }

            insert_history(&mut *tx, &entry).await?;

            let stored = load_aggregate(&mut *tx, id)
                .await?
                .ok_or(StoreError::NotFound(id))?;
            tx.commit().await.map_err(map_sqlx_err)?;

            debug!(complaint_id = %id, score = rating.score, "rating row inserted");
            Ok(stored)
        })
        .await
    }
}
