pub mod repository;
pub mod utils;

pub use repository::complaint_repository::PostgresComplaintStore;

#[cfg(test)]
pub mod test_helper;
