pub mod complaint_repository;

// Re-exports
pub use complaint_repository::*;
