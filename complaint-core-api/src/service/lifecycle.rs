use std::sync::Arc;

use chrono::Utc;
use complaint_core_db::models::{AttachmentModel, ComplaintModel, HistoryEntryModel, Status};
use complaint_core_db::repository::ComplaintStore;
use heapless::String as HeaplessString;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::actor::{ActorContext, Role};
use crate::domain::commands::{AttachmentRef, CreateComplaintCommand, UpdateStatusCommand};
use crate::domain::sla::due_date_for;
use crate::error::{ApiError, ApiResult};
use crate::service::access_policy::can_mutate_status;
use crate::service::audit_entry;

/// Validates and applies complaint lifecycle mutations: creation and status
/// transitions, including first-touch auto-assignment and the audit append
/// that accompanies every mutation.
pub struct ComplaintLifecycle<S> {
    store: Arc<S>,
}

impl<S: ComplaintStore> ComplaintLifecycle<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Files a new complaint on behalf of the submitting student.
    ///
    /// The SLA due date is computed here, exactly once; the aggregate is
    /// persisted with status Pending and a single "Created" audit entry.
    pub async fn create(
        &self,
        actor: &ActorContext,
        command: CreateComplaintCommand,
    ) -> ApiResult<ComplaintModel> {
        if actor.role != Role::Student {
            return Err(ApiError::Unauthorized(
                "only students may file complaints".to_string(),
            ));
        }
        command.validate()?;
        if command.title.trim().is_empty() || command.description.trim().is_empty() {
            return Err(ApiError::Validation(
                "title and description must not be blank".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let created = HistoryEntryModel::sealed(
            id,
            0,
            "Created",
            actor.actor_id,
            "Complaint filed",
            now,
            0,
        )
        .map_err(ApiError::InternalError)?;

        let complaint = ComplaintModel {
            id,
            submitter_id: actor.actor_id,
            submitter_name: actor.display_name.clone(),
            submitter_email: actor.email.clone(),
            title: bounded(&command.title, "title")?,
            description: command.description,
            category: command.category,
            priority: command.priority,
            status: Status::Pending,
            is_anonymous: command.is_anonymous,
            assigned_to: None,
            due_date: due_date_for(command.priority, now),
            attachments: command
                .attachments
                .iter()
                .map(attachment_model)
                .collect::<ApiResult<Vec<_>>>()?,
            comments: Vec::new(),
            rating: None,
            history: vec![created],
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.create(complaint).await?;
        info!(complaint_id = %stored.id, category = %stored.category, priority = %stored.priority, "complaint filed");
        Ok(stored)
    }

    /// Moves a complaint to a new status.
    ///
    /// Any handler or administrator may move the record between any two of
    /// the four states, re-opening included; a transition to the current
    /// status is a permitted no-op that is still audited. A faculty actor
    /// touching an unassigned complaint becomes its handler; administrators
    /// never trigger auto-assignment and an existing assignment is never
    /// replaced.
    pub async fn update_status(
        &self,
        actor: &ActorContext,
        id: Uuid,
        command: UpdateStatusCommand,
    ) -> ApiResult<ComplaintModel> {
        if !can_mutate_status(actor.role) {
            return Err(ApiError::Unauthorized(
                "students cannot update complaint status".to_string(),
            ));
        }
        command.validate()?;

        let complaint = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("complaint {id}")))?;

        let assign_to = (actor.role == Role::Faculty).then_some(actor.actor_id);
        let entry = audit_entry(
            &complaint,
            &format!("Status changed to {}", command.status),
            actor.actor_id,
            &command.remark,
        )?;

        let updated = self
            .store
            .update_status(id, command.status, assign_to, entry)
            .await?;
        info!(complaint_id = %id, status = %command.status, actor = %actor.actor_id, "status updated");
        Ok(updated)
    }
}

// HeaplessString bounds UTF-8 bytes, not characters; the validator derive
// counts characters, so multi-byte text can pass it and still land here.
fn bounded<const N: usize>(value: &str, field: &str) -> ApiResult<HeaplessString<N>> {
    HeaplessString::try_from(value)
        .map_err(|_| ApiError::Validation(format!("{field} exceeds {N} bytes")))
}

fn attachment_model(attachment: &AttachmentRef) -> ApiResult<AttachmentModel> {
    Ok(AttachmentModel {
        filename: bounded(&attachment.filename, "attachment filename")?,
        url: attachment.url.clone(),
        storage_ref: bounded(&attachment.storage_ref, "attachment storage_ref")?,
    })
}
