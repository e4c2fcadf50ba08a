pub mod actor;
pub mod commands;
pub mod sla;

// Re-exports
pub use actor::*;
pub use commands::*;
pub use sla::*;
