pub mod common_enums;
pub mod complaint;
pub mod comment;
pub mod history;
pub mod rating;

// Re-exports
pub use common_enums::*;
pub use complaint::*;
pub use comment::*;
pub use history::*;
pub use rating::*;
