//! Shared types for the sales reporting workspace
//!
//! Canonical order models, query and result value objects, the common
//! error type and report-calendar time helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
