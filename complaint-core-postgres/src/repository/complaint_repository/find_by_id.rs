use async_trait::async_trait;
use complaint_core_db::models::ComplaintModel;
use complaint_core_db::repository::{FindComplaintById, StoreResult};
use uuid::Uuid;

use super::repo_impl::{load_aggregate, PostgresComplaintStore};
use crate::utils::map_sqlx_err;

#[async_trait]
impl FindComplaintById for PostgresComplaintStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ComplaintModel>> {
        self.guard(async {
            let mut conn = self.pool.acquire().await.map_err(map_sqlx_err)?;
            load_aggregate(&mut conn, id).await
        })
        .await
    }
}
