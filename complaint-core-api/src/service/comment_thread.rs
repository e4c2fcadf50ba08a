use std::sync::Arc;

use chrono::Utc;
use complaint_core_db::models::{CommentModel, ComplaintModel};
use complaint_core_db::repository::ComplaintStore;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::actor::ActorContext;
use crate::domain::commands::AddCommentCommand;
use crate::error::{ApiError, ApiResult};
use crate::service::access_policy::can_comment;
use crate::service::audit_entry;

/// Length of the comment excerpt carried in the audit action text. A policy
/// choice for readability of the trail, not a limit on stored messages.
const EXCERPT_CHARS: usize = 50;

/// Byte budget for the excerpt: the action label is bounded at 100 bytes and
/// the "Comment added: " prefix takes 15 of them.
const EXCERPT_BYTES: usize = 85;

/// First [`EXCERPT_CHARS`] characters of the message, cut earlier if the
/// UTF-8 encoding would exceed [`EXCERPT_BYTES`]. Always ends on a char
/// boundary.
fn excerpt_of(message: &str) -> &str {
    let mut end = 0;
    for (chars, ch) in message.chars().enumerate() {
        if chars == EXCERPT_CHARS || end + ch.len_utf8() > EXCERPT_BYTES {
            break;
        }
        end += ch.len_utf8();
    }
    &message[..end]
}

/// Append-only comment thread. Authorization mirrors the read scope: staff
/// may comment anywhere, a student only on their own complaint.
pub struct CommentThread<S> {
    store: Arc<S>,
}

impl<S: ComplaintStore> CommentThread<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Appends a comment and its audit entry in one store transaction.
    /// Comments are never edited or deleted afterwards.
    pub async fn add_comment(
        &self,
        actor: &ActorContext,
        id: Uuid,
        command: AddCommentCommand,
    ) -> ApiResult<ComplaintModel> {
        command.validate()?;
        if command.message.trim().is_empty() {
            return Err(ApiError::Validation(
                "comment message must not be blank".to_string(),
            ));
        }

        let complaint = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("complaint {id}")))?;

        if !can_comment(actor.role, actor.actor_id, &complaint) {
            return Err(ApiError::Unauthorized(
                "not allowed to comment on this complaint".to_string(),
            ));
        }

        let entry = audit_entry(
            &complaint,
            &format!("Comment added: {}", excerpt_of(&command.message)),
            actor.actor_id,
            "",
        )?;
        let comment = CommentModel {
            id: Uuid::new_v4(),
            complaint_id: id,
            author_id: actor.actor_id,
            message: command.message,
            created_at: Utc::now(),
        };

        let updated = self.store.append_comment(id, comment, entry).await?;
        info!(complaint_id = %id, author = %actor.actor_id, "comment appended");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::lifecycle::ComplaintLifecycle;
    use crate::service::test_support::{create_command, faculty, student};
    use complaint_core_db::models::{verify_history_chain, Category, Priority};
    use complaint_core_db::repository::InMemoryComplaintStore;

    async fn seeded() -> (
        Arc<InMemoryComplaintStore>,
        ActorContext,
        ComplaintModel,
    ) {
        let store = Arc::new(InMemoryComplaintStore::new());
        let submitter = student("Asha Rao");
        let complaint = ComplaintLifecycle::new(store.clone())
            .create(&submitter, create_command(Category::Hostel, Priority::Medium))
            .await
            .unwrap();
        (store, submitter, complaint)
    }

    #[tokio::test]
    async fn comment_grows_thread_and_trail_by_one_each() {
        let (store, submitter, complaint) = seeded().await;
        let thread = CommentThread::new(store);

        let updated = thread
            .add_comment(
                &submitter,
                complaint.id,
                AddCommentCommand {
                    message: "Any update on this? The fan still sparks at night.".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.comments.len(), complaint.comments.len() + 1);
        assert_eq!(updated.history.len(), complaint.history.len() + 1);
        assert_eq!(updated.comments[0].author_id, submitter.actor_id);
        let action = updated.history.last().unwrap().action.as_str().to_string();
        assert!(action.starts_with("Comment added: "));
        assert!(action.len() <= "Comment added: ".len() + 50);
        assert!(verify_history_chain(&updated.history).is_ok());
    }

    #[tokio::test]
    async fn blank_message_fails_validation() {
        let (store, submitter, complaint) = seeded().await;
        let thread = CommentThread::new(store);

        let err = thread
            .add_comment(
                &submitter,
                complaint.id,
                AddCommentCommand {
                    message: "  \n ".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn stranger_student_cannot_comment_but_faculty_can() {
        let (store, _submitter, complaint) = seeded().await;
        let thread = CommentThread::new(store);

        let err = thread
            .add_comment(
                &student("Rohan Das"),
                complaint.id,
                AddCommentCommand {
                    message: "Mine too!".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let updated = thread
            .add_comment(
                &faculty("Dr Iyer"),
                complaint.id,
                AddCommentCommand {
                    message: "Electrician scheduled for Friday.".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.comments.len(), 1);
    }

    #[tokio::test]
    async fn multibyte_message_is_accepted_and_excerpted_within_bounds() {
        let (store, submitter, complaint) = seeded().await;
        let thread = CommentThread::new(store);
        // 40 chars, 120 bytes; valid input that must not overflow the
        // 100-byte action label.
        let message = "न".repeat(40);

        let updated = thread
            .add_comment(
                &submitter,
                complaint.id,
                AddCommentCommand { message: message.clone() },
            )
            .await
            .unwrap();

        assert_eq!(updated.comments[0].message, message);
        let action = updated.history.last().unwrap().action.as_str().to_string();
        assert!(action.starts_with("Comment added: न"));
        assert!(action.len() <= 100);
        // 28 three-byte chars fit the 85-byte excerpt budget.
        assert_eq!(action, format!("Comment added: {}", "न".repeat(28)));
        assert!(verify_history_chain(&updated.history).is_ok());
    }

    #[tokio::test]
    async fn long_message_is_excerpted_in_the_trail() {
        let (store, submitter, complaint) = seeded().await;
        let thread = CommentThread::new(store);
        let message = "a".repeat(400);

        let updated = thread
            .add_comment(
                &submitter,
                complaint.id,
                AddCommentCommand { message: message.clone() },
            )
            .await
            .unwrap();

        // Full message stored, only an excerpt in the audit action.
        assert_eq!(updated.comments[0].message, message);
        assert_eq!(
            updated.history.last().unwrap().action.as_str(),
            format!("Comment added: {}", "a".repeat(50))
        );
    }
}
