use async_trait::async_trait;
use chrono::Utc;
use complaint_core_db::models::{ComplaintModel, HistoryEntryModel, Status};
use complaint_core_db::repository::{StoreError, StoreResult, UpdateComplaintStatus};
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::{insert_history, load_aggregate, PostgresComplaintStore};
use crate::utils::map_sqlx_err;

#[async_trait]
impl UpdateComplaintStatus for PostgresComplaintStore {
    async fn update_status(
        &self,
        id: Uuid,
        status: Status,
        assign_to: Option<Uuid>,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel> {
        self.guard(async {
            let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

            // COALESCE keeps an existing assignment: first touch wins.
            let result = sqlx::query(
                r#"
                UPDATE complaint
                SET status = $2, assigned_to = COALESCE(assigned_to, $3), updated_at = $4
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(status)
            .bind(assign_to)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(id));
            }

            insert_history(&mut *tx, &entry).await?;

            let stored = load_aggregate(&mut *tx, id)
                .await?
                .ok_or(StoreError::NotFound(id))?;
            tx.commit().await.map_err(map_sqlx_err)?;

            debug!(complaint_id = %id, status = %status, "status row updated");
            Ok(stored)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{next_entry, test_complaint};
    use crate::test_helper::setup_test_store;
    use complaint_core_db::models::Status;
    use complaint_core_db::repository::{CreateComplaint, UpdateComplaintStatus};
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[serial]
    #[ignore = "requires a Postgres at DATABASE_URL"]
    async fn test_first_touch_assignment_sticks(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let store = setup_test_store().await?;
        let complaint = store.create(test_complaint(Uuid::new_v4())).await?;
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let entry = next_entry(&complaint, "Status changed to In Progress", first);
        let updated = store
            .update_status(complaint.id, Status::InProgress, Some(first), entry)
            .await?;
        assert_eq!(updated.assigned_to, Some(first));

        let entry = next_entry(&updated, "Status changed to Resolved", second);
        let updated = store
            .update_status(complaint.id, Status::Resolved, Some(second), entry)
            .await?;
        assert_eq!(updated.assigned_to, Some(first));
        assert_eq!(updated.status, Status::Resolved);
        assert_eq!(updated.history.len(), 3);

        Ok(())
    }
}
