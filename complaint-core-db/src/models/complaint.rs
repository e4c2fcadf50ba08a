use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comment::CommentModel;
use crate::models::common_enums::{Category, Priority, Status};
use crate::models::history::HistoryEntryModel;
use crate::models::rating::RatingModel;

/// Database model for an attachment reference.
///
/// The binary content lives in the external blob store; only the durable URL
/// and the store-internal reference are persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentModel {
    pub filename: HeaplessString<200>,

    /// Durable URL returned by the blob store
    pub url: String,

    /// Blob-store internal reference, kept for potential future deletion
    pub storage_ref: HeaplessString<100>,
}

/// Database model for a Complaint, the aggregate root of the system.
///
/// Scalar fields other than `status` and `assigned_to` are immutable after
/// creation. `comments` and `history` are append-only; `rating` is set at
/// most once. The submitter identity fields are a snapshot taken from the
/// authenticated actor at creation and are what redaction masks for
/// anonymous complaints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintModel {
    pub id: Uuid,

    /// Identity reference to the filing user; immutable
    pub submitter_id: Uuid,

    pub submitter_name: HeaplessString<100>,
    pub submitter_email: HeaplessString<100>,

    pub title: HeaplessString<200>,
    pub description: String,

    #[serde(
        serialize_with = "crate::models::common_enums::serialize_category",
        deserialize_with = "crate::models::common_enums::deserialize_category"
    )]
    pub category: Category,

    #[serde(
        serialize_with = "crate::models::common_enums::serialize_priority",
        deserialize_with = "crate::models::common_enums::deserialize_priority"
    )]
    pub priority: Priority,

    #[serde(
        serialize_with = "crate::models::common_enums::serialize_status",
        deserialize_with = "crate::models::common_enums::deserialize_status"
    )]
    pub status: Status,

    pub is_anonymous: bool,

    /// Handler auto-assigned on first faculty touch; set at most once,
    /// never cleared
    pub assigned_to: Option<Uuid>,

    /// SLA deadline derived from `priority` at creation; never recomputed
    pub due_date: DateTime<Utc>,

    pub attachments: Vec<AttachmentModel>,

    pub comments: Vec<CommentModel>,

    pub rating: Option<RatingModel>,

    /// Append-only audit trail, ordered by `seq`
    pub history: Vec<HistoryEntryModel>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComplaintModel {
    /// Hash of the newest history entry, 0 for an empty trail. New entries
    /// link to this value.
    pub fn last_history_hash(&self) -> i64 {
        self.history.last().map(|entry| entry.hash).unwrap_or(0)
    }

    /// Sequence number the next history entry must carry.
    pub fn next_history_seq(&self) -> i32 {
        self.history.len() as i32
    }
}
