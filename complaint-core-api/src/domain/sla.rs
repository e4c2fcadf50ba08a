use chrono::{DateTime, Duration, Utc};
use complaint_core_db::models::Priority;

/// Resolution window, in days, granted for each priority.
fn resolution_days(priority: Priority) -> i64 {
    match priority {
        Priority::Urgent => 1,
        Priority::High => 3,
        Priority::Medium => 7,
        Priority::Low => 14,
    }
}

/// Derives the SLA due date from priority at creation time.
///
/// Pure and deterministic. Invoked exactly once per complaint, before
/// persistence; the due date is never recomputed afterwards, and priority is
/// immutable anyway. The deadline is a display/urgency signal only, nothing
/// in the core enforces it.
pub fn due_date_for(priority: Priority, created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::days(resolution_days(priority))
}
