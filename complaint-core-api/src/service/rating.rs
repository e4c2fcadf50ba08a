use std::sync::Arc;

use chrono::Utc;
use complaint_core_db::models::{ComplaintModel, RatingModel};
use complaint_core_db::repository::ComplaintStore;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::actor::ActorContext;
use crate::domain::commands::SubmitRatingCommand;
use crate::error::{ApiError, ApiResult};
use crate::service::access_policy::{can_rate, RatingDenied};
use crate::service::audit_entry;

/// One-time post-resolution satisfaction capture, gated by status and
/// ownership. A second submission always fails; the first rating is never
/// overwritten.
pub struct RatingSubsystem<S> {
    store: Arc<S>,
}

impl<S: ComplaintStore> RatingSubsystem<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn submit_rating(
        &self,
        actor: &ActorContext,
        id: Uuid,
        command: SubmitRatingCommand,
    ) -> ApiResult<ComplaintModel> {
        command.validate()?;

        let complaint = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("complaint {id}")))?;

        can_rate(actor.role, actor.actor_id, &complaint).map_err(|denial| match denial {
            RatingDenied::NotOwner => ApiError::Unauthorized(
                "only the submitting student may rate this complaint".to_string(),
            ),
            RatingDenied::NotResolved => {
                ApiError::Conflict("only a resolved complaint can be rated".to_string())
            }
            RatingDenied::AlreadyRated => {
                ApiError::Conflict("complaint is already rated".to_string())
            }
        })?;

        let entry = audit_entry(
            &complaint,
            &format!("Rated {}/5 stars", command.score),
            actor.actor_id,
            &command.feedback,
        )?;
        let rating = RatingModel {
            complaint_id: id,
            score: command.score,
            feedback: command.feedback,
            rated_at: Utc::now(),
        };

        let updated = self.store.set_rating(id, rating, entry).await?;
        info!(complaint_id = %id, score = command.score, "rating recorded");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::UpdateStatusCommand;
    use crate::service::lifecycle::ComplaintLifecycle;
    use crate::service::test_support::{create_command, faculty, student};
    use complaint_core_db::models::{verify_history_chain, Category, Priority, Status};
    use complaint_core_db::repository::{FindComplaintById, InMemoryComplaintStore};

    async fn resolved_complaint() -> (
        Arc<InMemoryComplaintStore>,
        ActorContext,
        ComplaintModel,
    ) {
        let store = Arc::new(InMemoryComplaintStore::new());
        let submitter = student("Asha Rao");
        let lifecycle = ComplaintLifecycle::new(store.clone());
        let complaint = lifecycle
            .create(&submitter, create_command(Category::Mess, Priority::Medium))
            .await
            .unwrap();
        let complaint = lifecycle
            .update_status(
                &faculty("Dr Iyer"),
                complaint.id,
                UpdateStatusCommand {
                    status: Status::Resolved,
                    remark: "Menu rotation fixed".to_string(),
                },
            )
            .await
            .unwrap();
        (store, submitter, complaint)
    }

    #[tokio::test]
    async fn owner_rates_a_resolved_complaint_exactly_once() {
        let (store, submitter, complaint) = resolved_complaint().await;
        let ratings = RatingSubsystem::new(store.clone());

        let rated = ratings
            .submit_rating(
                &submitter,
                complaint.id,
                SubmitRatingCommand {
                    score: 4,
                    feedback: "Handled well".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(rated.rating.as_ref().map(|r| r.score), Some(4));
        assert_eq!(
            rated.history.last().unwrap().action.as_str(),
            "Rated 4/5 stars"
        );
        assert_eq!(rated.history.last().unwrap().remark, "Handled well");
        assert!(verify_history_chain(&rated.history).is_ok());

        // A second attempt with any score is rejected, the first value stays.
        let err = ratings
            .submit_rating(
                &submitter,
                complaint.id,
                SubmitRatingCommand {
                    score: 2,
                    feedback: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let current = store.find_by_id(complaint.id).await.unwrap().unwrap();
        assert_eq!(current.rating.as_ref().map(|r| r.score), Some(4));
    }

    #[tokio::test]
    async fn unresolved_complaint_cannot_be_rated() {
        let store = Arc::new(InMemoryComplaintStore::new());
        let submitter = student("Asha Rao");
        let complaint = ComplaintLifecycle::new(store.clone())
            .create(&submitter, create_command(Category::Hostel, Priority::Low))
            .await
            .unwrap();

        let err = RatingSubsystem::new(store)
            .submit_rating(
                &submitter,
                complaint.id,
                SubmitRatingCommand {
                    score: 5,
                    feedback: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn non_owner_and_staff_cannot_rate() {
        let (store, _submitter, complaint) = resolved_complaint().await;
        let ratings = RatingSubsystem::new(store);
        let command = SubmitRatingCommand {
            score: 3,
            feedback: String::new(),
        };

        let err = ratings
            .submit_rating(&student("Rohan Das"), complaint.id, command.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let err = ratings
            .submit_rating(&faculty("Dr Iyer"), complaint.id, command)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn out_of_range_score_fails_validation() {
        let (store, submitter, complaint) = resolved_complaint().await;
        let err = RatingSubsystem::new(store)
            .submit_rating(
                &submitter,
                complaint.id,
                SubmitRatingCommand {
                    score: 6,
                    feedback: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
