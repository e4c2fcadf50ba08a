use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::comment::CommentModel;
use crate::models::common_enums::Status;
use crate::models::complaint::ComplaintModel;
use crate::models::history::HistoryEntryModel;
use crate::models::rating::RatingModel;
use crate::repository::append_comment::AppendComment;
use crate::repository::create::CreateComplaint;
use crate::repository::error::{StoreError, StoreResult};
use crate::repository::filter::ComplaintFilter;
use crate::repository::find_by_id::FindComplaintById;
use crate::repository::list::ListComplaints;
use crate::repository::set_rating::SetRating;
use crate::repository::update_status::UpdateComplaintStatus;

/// Reference in-memory implementation of the complaint store.
///
/// Mutations operate on the stored aggregate under one lock, so each of them
/// is atomic with respect to the fields it touches. Append-only collections
/// grow by pushing onto the stored aggregate, never by replacing it with a
/// caller-side copy.
#[derive(Debug, Default)]
pub struct InMemoryComplaintStore {
    complaints: Mutex<HashMap<Uuid, ComplaintModel>>,
}

impl InMemoryComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_complaints<R>(
        &self,
        f: impl FnOnce(&mut HashMap<Uuid, ComplaintModel>) -> StoreResult<R>,
    ) -> StoreResult<R> {
        let mut guard = self
            .complaints
            .lock()
            .map_err(|_| StoreError::Internal("complaint map lock poisoned".to_string()))?;
        f(&mut guard)
    }
}

#[async_trait]
impl CreateComplaint for InMemoryComplaintStore {
    async fn create(&self, mut complaint: ComplaintModel) -> StoreResult<ComplaintModel> {
        self.with_complaints(|complaints| {
            if complaints.contains_key(&complaint.id) {
                return Err(StoreError::Conflict {
                    id: complaint.id,
                    detail: "complaint id already exists".to_string(),
                });
            }
            let now = Utc::now();
            complaint.created_at = now;
            complaint.updated_at = now;
            complaints.insert(complaint.id, complaint.clone());
            Ok(complaint)
        })
    }
}

#[async_trait]
impl FindComplaintById for InMemoryComplaintStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ComplaintModel>> {
        self.with_complaints(|complaints| Ok(complaints.get(&id).cloned()))
    }
}

#[async_trait]
impl ListComplaints for InMemoryComplaintStore {
    async fn list(&self, filter: &ComplaintFilter) -> StoreResult<Vec<ComplaintModel>> {
        self.with_complaints(|complaints| {
            let mut matching: Vec<ComplaintModel> = complaints
                .values()
                .filter(|c| filter.matches(c.submitter_id))
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(matching)
        })
    }
}

#[async_trait]
impl UpdateComplaintStatus for InMemoryComplaintStore {
    async fn update_status(
        &self,
        id: Uuid,
        status: Status,
        assign_to: Option<Uuid>,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel> {
        self.with_complaints(|complaints| {
            let complaint = complaints.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            complaint.status = status;
            if complaint.assigned_to.is_none() {
                if let Some(handler) = assign_to {
                    complaint.assigned_to = Some(handler);
                }
            }
            complaint.history.push(entry);
            complaint.updated_at = Utc::now();
            Ok(complaint.clone())
        })
    }
}

#[async_trait]
impl AppendComment for InMemoryComplaintStore {
    async fn append_comment(
        &self,
        id: Uuid,
        comment: CommentModel,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel> {
        self.with_complaints(|complaints| {
            let complaint = complaints.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            complaint.comments.push(comment);
            complaint.history.push(entry);
            complaint.updated_at = Utc::now();
            Ok(complaint.clone())
        })
    }
}

#[async_trait]
impl SetRating for InMemoryComplaintStore {
    async fn set_rating(
        &self,
        id: Uuid,
        rating: RatingModel,
        entry: HistoryEntryModel,
    ) -> StoreResult<ComplaintModel> {
        self.with_complaints(|complaints| {
            let complaint = complaints.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            if complaint.rating.is_some() {
                return Err(StoreError::Conflict {
                    id,
                    detail: "complaint is already rated".to_string(),
                });
            }
            complaint.rating = Some(rating);
            complaint.history.push(entry);
            complaint.updated_at = Utc::now();
            Ok(complaint.clone())
        })
    }
}
