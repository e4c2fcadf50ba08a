use std::sync::Arc;

use complaint_core_db::models::ComplaintModel;
use complaint_core_db::repository::ComplaintStore;
use uuid::Uuid;

use crate::domain::actor::ActorContext;
use crate::error::{ApiError, ApiResult};
use crate::service::access_policy::{can_view, redact, visibility_filter};

/// Read side of the complaint core: role-scoped listing and single-record
/// retrieval, both redacted uniformly.
pub struct ComplaintQueries<S> {
    store: Arc<S>,
}

impl<S: ComplaintStore> ComplaintQueries<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists the complaints visible to this actor, newest first.
    pub async fn list_for(&self, actor: &ActorContext) -> ApiResult<Vec<ComplaintModel>> {
        let filter = visibility_filter(actor.role, actor.actor_id);
        let complaints = self.store.list(&filter).await?;
        Ok(complaints
            .into_iter()
            .map(|complaint| redact(complaint, actor.actor_id))
            .collect())
    }

    /// Loads one complaint for this actor.
    ///
    /// An unknown id is NotFound. A student asking for another student's
    /// complaint gets Unauthorized, not NotFound, and no content.
    pub async fn get_for(&self, actor: &ActorContext, id: Uuid) -> ApiResult<ComplaintModel> {
        let complaint = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("complaint {id}")))?;

        if !can_view(actor.role, actor.actor_id, &complaint) {
            return Err(ApiError::Unauthorized(
                "not allowed to view this complaint".to_string(),
            ));
        }
        Ok(redact(complaint, actor.actor_id))
    }
}
