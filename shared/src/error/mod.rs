//! Unified error system for the reporting workspace
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`AppError`]: Error type with code, message and optional details
//!
//! The aggregation core is total and never produces an [`AppError`].
//! Errors only come from the outer layers: loading orders, reading
//! configuration, parsing command line values and writing exports.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order source errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::validation("Invalid date format: 2024-13-01")
//!     .with_detail("field", "date_start");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
