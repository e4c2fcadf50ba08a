use chrono::{Duration, Utc};
use complaint_core_db::models::{
    Category, ComplaintModel, HistoryEntryModel, Priority, Status,
};
use heapless::String as HeaplessString;
use uuid::Uuid;

use crate::domain::actor::{ActorContext, Role};
use crate::domain::commands::CreateComplaintCommand;

pub fn student(name: &str) -> ActorContext {
    ActorContext::new(
        Uuid::new_v4(),
        Role::Student,
        name,
        &format!("{}@campus.edu", name.to_lowercase().replace(' ', ".")),
    )
    .unwrap()
}

pub fn faculty(name: &str) -> ActorContext {
    ActorContext::new(
        Uuid::new_v4(),
        Role::Faculty,
        name,
        &format!("{}@staff.campus.edu", name.to_lowercase().replace(' ', ".")),
    )
    .unwrap()
}

pub fn admin() -> ActorContext {
    ActorContext::new(Uuid::new_v4(), Role::Admin, "Registrar", "admin@campus.edu").unwrap()
}

pub fn create_command(category: Category, priority: Priority) -> CreateComplaintCommand {
    CreateComplaintCommand {
        title: "Leaking tap in block B".to_string(),
        description: "Water has been pooling near the stairwell since Monday.".to_string(),
        category,
        priority,
        is_anonymous: false,
        attachments: Vec::new(),
    }
}

/// A minimal already-persisted aggregate for pure policy tests.
pub fn filed_complaint(submitter_id: Uuid, is_anonymous: bool) -> ComplaintModel {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let created =
        HistoryEntryModel::sealed(id, 0, "Created", submitter_id, "Complaint filed", now, 0)
            .unwrap();
    ComplaintModel {
        id,
        submitter_id,
        submitter_name: HeaplessString::try_from("Priya Nair").unwrap(),
        submitter_email: HeaplessString::try_from("priya@campus.edu").unwrap(),
        title: HeaplessString::try_from("Projector not working").unwrap(),
        description: "Room 114 projector shows no signal.".to_string(),
        category: Category::Academic,
        priority: Priority::Medium,
        status: Status::Pending,
        is_anonymous,
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
