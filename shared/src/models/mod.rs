//! Data models
//!
//! Shared between the report engine and its callers (CLI, UI bridge).

pub mod order;
pub mod query;
pub mod statistics;
pub mod store_info;

// Re-exports
pub use order::*;
pub use query::*;
pub use statistics::*;
pub use store_info::*;
