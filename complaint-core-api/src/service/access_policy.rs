use complaint_core_db::models::{ComplaintModel, Status};
use complaint_core_db::repository::ComplaintFilter;
use heapless::String as HeaplessString;
use uuid::Uuid;

use crate::domain::actor::Role;

/// Display name shown in place of the submitter on anonymous complaints.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Email sentinel shown in place of the submitter on anonymous complaints.
pub const HIDDEN_EMAIL: &str = "hidden";

/// Visibility scope for listing: students see their own submissions, faculty
/// and administrators see every complaint.
///
/// Department-scoped faculty filtering is an undecided enhancement; the
/// documented contract is the permissive one.
pub fn visibility_filter(role: Role, actor_id: Uuid) -> ComplaintFilter {
    match role {
        Role::Student => ComplaintFilter::submitted_by(actor_id),
        Role::Faculty | Role::Admin => ComplaintFilter::all(),
    }
}

/// Whether the actor may read this complaint at all.
///
/// A student asking for another student's complaint is denied with an
/// authorization error, not a not-found: the record's existence is not
/// secret to staff, only its content is secret across students.
pub fn can_view(role: Role, actor_id: Uuid, complaint: &ComplaintModel) -> bool {
    match role {
        Role::Faculty | Role::Admin => true,
        Role::Student => complaint.submitter_id == actor_id,
    }
}

/// Only handlers and administrators may change status.
pub fn can_mutate_status(role: Role) -> bool {
    matches!(role, Role::Faculty | Role::Admin)
}

/// Staff may comment on any complaint; a student only on their own.
pub fn can_comment(role: Role, actor_id: Uuid, complaint: &ComplaintModel) -> bool {
    match role {
        Role::Faculty | Role::Admin => true,
        Role::Student => complaint.submitter_id == actor_id,
    }
}

/// Why a rating request was denied. The reasons stay distinguishable for
/// debuggability even where callers collapse them into one response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingDenied {
    /// Actor is not the submitting student of this complaint.
    NotOwner,
    /// The complaint is not in Resolved status.
    NotResolved,
    /// A rating has already been recorded.
    AlreadyRated,
}

/// A rating is allowed only for the submitting student, on a Resolved
/// complaint, and only while no rating exists yet.
pub fn can_rate(role: Role, actor_id: Uuid, complaint: &ComplaintModel) -> Result<(), RatingDenied> {
    if role != Role::Student || complaint.submitter_id != actor_id {
        return Err(RatingDenied::NotOwner);
    }
    if complaint.status != Status::Resolved {
        return Err(RatingDenied::NotResolved);
    }
    if complaint.rating.is_some() {
        return Err(RatingDenied::AlreadyRated);
    }
    Ok(())
}

/// Masks the submitter identity of an anonymous complaint unless the viewer
/// is the submitter themselves. Applied uniformly on list and single-record
/// reads; every other field is left untouched.
///
/// The submitter's id also appears as actor of their history entries (at
/// least the initial "Created" one) and as author of their own comments, so
/// those references are nilled too. This is a view-level mask only; the
/// stored rows and their hash chain are untouched.
pub fn redact(mut complaint: ComplaintModel, viewer_id: Uuid) -> ComplaintModel {
    if complaint.is_anonymous && complaint.submitter_id != viewer_id {
        let submitter_id = complaint.submitter_id;
        complaint.submitter_id = Uuid::nil();
        complaint.submitter_name = HeaplessString::try_from(ANONYMOUS_NAME).unwrap_or_default();
        complaint.submitter_email = HeaplessString::try_from(HIDDEN_EMAIL).unwrap_or_default();
        for entry in &mut complaint.history {
            if entry.actor_id == submitter_id {
                entry.actor_id = Uuid::nil();
            }
        }
        for comment in &mut complaint.comments {
            if comment.author_id == submitter_id {
                comment.author_id = Uuid::nil();
            }
        }
    }
    complaint
}
