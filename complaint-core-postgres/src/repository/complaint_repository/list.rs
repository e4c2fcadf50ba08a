use async_trait::async_trait;
use complaint_core_db::models::ComplaintModel;
use complaint_core_db::repository::{ComplaintFilter, ListComplaints, StoreResult};
use sqlx::Row;
use uuid::Uuid;

use super::repo_impl::{load_aggregate, PostgresComplaintStore};
use crate::utils::map_sqlx_err;

#[async_trait]
impl ListComplaints for PostgresComplaintStore {
    async fn list(&self, filter: &ComplaintFilter) -> StoreResult<Vec<ComplaintModel>> {
        self.guard(async {
            let mut conn = self.pool.acquire().await.map_err(map_sqlx_err)?;

            let rows = match filter.submitter_id {
                Some(submitter_id) => {
                    sqlx::query(
                        "SELECT id FROM complaint WHERE submitter_id = $1 ORDER BY created_at DESC",
                    )
                    .bind(submitter_id)
                    .fetch_all(&mut *conn)
                    .await
                }
                None => {
                    sqlx::query("SELECT id FROM complaint ORDER BY created_at DESC")
                        .fetch_all(&mut *conn)
                        .await
                }
            }
            .map_err(map_sqlx_err)?;

            let mut complaints = Vec::with_capacity(rows.len());
            for row in rows {
                let id: Uuid = row
                    .try_get("id")
                    .map_err(|e| complaint_core_db::repository::StoreError::Internal(e.to_string()))?;
                if let Some(complaint) = load_aggregate(&mut conn, id).await? {
                    complaints.push(complaint);
                }
            }
            Ok(complaints)
        })
        .await
    }
}
