use async_trait::async_trait;
use complaint_core_db::models::ComplaintModel;
use complaint_core_db::repository::{CreateComplaint, StoreError, StoreResult};
use tracing::debug;

use super::repo_impl::{insert_history, load_aggregate, PostgresComplaintStore};
use crate::utils::map_sqlx_err;

#[async_trait]
impl CreateComplaint for PostgresComplaintStore {
    async fn create(&self, complaint: ComplaintModel) -> StoreResult<ComplaintModel> {
        self.guard(async {
            let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

            sqlx::query(
                r#"
                INSERT INTO complaint
                    (id, submitter_id, submitter_name, submitter_email, title, description,
                     category, priority, status, is_anonymous, assigned_to, due_date)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(complaint.id)
            .bind(complaint.submitter_id)
            .bind(complaint.submitter_name.as_str())
            .bind(complaint.submitter_email.as_str())
            .bind(complaint.title.as_str())
            .bind(complaint.description.as_str())
            .bind(complaint.category)
            .bind(complaint.priority)
            .bind(complaint.status)
            .bind(complaint.is_anonymous)
            .bind(complaint.assigned_to)
            .bind(complaint.due_date)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

            for (position, attachment) in complaint.attachments.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO complaint_attachment (complaint_id, position, filename, url, storage_ref)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(complaint.id)
                .bind(position as i32)
                .bind(attachment.filename.as_str())
                .bind(attachment.url.as_str())
                .bind(attachment.storage_ref.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_err)?;
            }

            for entry in &complaint.history {
                insert_history(&mut *tx, entry).await?;
            }

            let stored = load_aggregate(&mut *tx, complaint.id)
                .await?
                .ok_or(StoreError::NotFound(complaint.id))?;
            tx.commit().await.map_err(map_sqlx_err)?;

            debug!(complaint_id = %complaint.id, "complaint row created");
            Ok(stored)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_complaint;
    use crate::test_helper::setup_test_store;
    use complaint_core_db::models::verify_history_chain;
    use complaint_core_db::repository::{CreateComplaint, FindComplaintById};
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[serial]
    #[ignore = "requires a Postgres at DATABASE_URL"]
    async fn test_create_then_find_round_trips(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let store = setup_test_store().await?;
        let complaint = test_complaint(Uuid::new_v4());

        let stored = store.create(complaint.clone()).await?;
        assert_eq!(stored.id, complaint.id);
        assert_eq!(stored.history.len(), 1);

        let found = store.find_by_id(complaint.id).await?.unwrap();
        assert_eq!(found.title, complaint.title);
        assert_eq!(found.status, complaint.status);
        // The reloaded trail must still verify, timestamptz precision included.
        verify_history_chain(&found.history)?;

        Ok(())
    }
}
