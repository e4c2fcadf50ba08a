use complaint_core_db::models::{Category, Priority, Status};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Attachment reference handed over by the blob-store collaborator after
/// upload. The core never sees binary content.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttachmentRef {
    #[validate(length(min = 1, max = 200))]
    pub filename: String,

    #[validate(length(min = 1))]
    pub url: String,

    #[validate(length(min = 1, max = 100))]
    pub storage_ref: String,
}

/// Command to file a new complaint. Student role only.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateComplaintCommand {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[serde(
        serialize_with = "complaint_core_db::models::serialize_category",
        deserialize_with = "complaint_core_db::models::deserialize_category"
    )]
    pub category: Category,

    #[serde(
        default,
        serialize_with = "complaint_core_db::models::serialize_priority",
        deserialize_with = "complaint_core_db::models::deserialize_priority"
    )]
    pub priority: Priority,

    #[serde(default)]
    pub is_anonymous: bool,

    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<AttachmentRef>,
}

/// Command to change a complaint's status. Handler/administrator roles only.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusCommand {
    #[serde(
        serialize_with = "complaint_core_db::models::serialize_status",
        deserialize_with = "complaint_core_db::models::deserialize_status"
    )]
    pub status: Status,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub remark: String,
}

/// Command to append a comment to a complaint's thread.
///
/// Length bounds are handled by the derive; the whitespace-only case is
/// rejected by the comment service, which owns the blank-message rule.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddCommentCommand {
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

/// Command for the one-time post-resolution satisfaction rating.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitRatingCommand {
    #[validate(range(min = 1, max = 5))]
    pub score: i16,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub feedback: String,
}
