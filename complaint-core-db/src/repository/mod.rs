pub mod append_comment;
pub mod create;
pub mod error;
pub mod filter;
pub mod find_by_id;
pub mod list;
pub mod memory;
pub mod set_rating;
pub mod update_status;

// Re-exports
pub use append_comment::*;
pub use create::*;
pub use error::*;
pub use filter::*;
pub use find_by_id::*;
pub use list::*;
pub use memory::*;
pub use set_rating::*;
pub use update_status::*;

/// The full persistence contract of the complaint core.
///
/// Implemented automatically by any type providing all per-operation traits.
pub trait ComplaintStore:
    CreateComplaint
    + FindComplaintById
    + ListComplaints
    + UpdateComplaintStatus
    + AppendComment
    + SetRating
{
}

impl<T> ComplaintStore for T where
    T: CreateComplaint
        + FindComplaintById
        + ListComplaints
        + UpdateComplaintStatus
        + AppendComment
        + SetRating
{
}
