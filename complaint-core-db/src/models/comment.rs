use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for a single complaint comment.
///
/// Comments are append-only: once stored they are never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentModel {
    pub id: Uuid,

    /// Reference to the complaint this comment belongs to
    pub complaint_id: Uuid,

    /// Identity of the comment author
    pub author_id: Uuid,

    pub message: String,

    pub created_at: DateTime<Utc>,
}
