use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for the one-time satisfaction rating of a complaint.
///
/// A rating transitions from absent to present at most once, and only while
/// the complaint is Resolved. It never reverts and is never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingModel {
    /// Reference to the rated complaint; one rating per complaint
    pub complaint_id: Uuid,

    /// Satisfaction score, 1 through 5
    pub score: i16,

    /// Free-text feedback, empty string when the submitter gave none
    pub feedback: String,

    pub rated_at: DateTime<Utc>,
}
