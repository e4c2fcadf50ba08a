pub mod repo_impl;

pub mod append_comment;
pub mod create;
pub mod find_by_id;
pub mod list;
pub mod set_rating;
pub mod update_status;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::PostgresComplaintStore;
