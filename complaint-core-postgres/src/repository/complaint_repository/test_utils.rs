use chrono::{Duration, Utc};
use complaint_core_db::models::{
    Category, ComplaintModel, HistoryEntryModel, Priority, Status,
};
use heapless::String as HeaplessString;
use uuid::Uuid;

/// Builds a fresh aggregate the way the service layer would hand it to the
/// store: Pending, due in seven days, one sealed "Created" entry.
pub fn test_complaint(submitter_id: Uuid) -> ComplaintModel {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let created =
        HistoryEntryModel::sealed(id, 0, "Created", submitter_id, "Complaint filed", now, 0)
            .unwrap();
    ComplaintModel {
        id,
        submitter_id,
        submitter_name: HeaplessString::try_from("Asha Rao").unwrap(),
        submitter_email: HeaplessString::try_from("asha@campus.edu").unwrap(),
        title: HeaplessString::try_from("Broken fan in H-204").unwrap(),
        description: "The ceiling fan sparks when switched on.".to_string(),
        category: Category::Hostel,
        priority: Priority::Medium,
        status: Status::Pending,
        is_anonymous: false,
        assigned_to: None,
        due_date: now + Duration::days(7),
        attachments: Vec::new(),
        comments: Vec::new(),
        rating: None,
        history: vec![created],
        created_at: now,
        updated_at: now,
    }
}

/// Seals the next audit entry for an already-loaded aggregate.
pub fn next_entry(complaint: &ComplaintModel, action: &str, actor: Uuid) -> HistoryEntryModel {
    HistoryEntryModel::sealed(
        complaint.id,
        complaint.next_history_seq(),
        action,
        actor,
        "",
        Utc::now(),
        complaint.last_history_hash(),
    )
    .unwrap()
}
