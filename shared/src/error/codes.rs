//! Error codes for the reporting workspace
//!
//! - 0xxx: General errors
//! - 4xxx: Order source errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a `u16` so callers in other languages can match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 4xxx: Order source ====================
    /// Order source could not be read
    OrderSourceUnavailable = 4001,
    /// Order source is not a JSON order list
    OrderSourceMalformed = 4002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// File system error
    IoError = 9002,
    /// Export could not be written
    ExportFailed = 9003,
    /// Configuration value is invalid
    ConfigInvalid = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::OrderSourceUnavailable => "Could not load orders",
            ErrorCode::OrderSourceMalformed => "Order source is malformed",
            ErrorCode::InternalError => "Internal error",
            ErrorCode::IoError => "File system error",
            ErrorCode::ExportFailed => "Export failed",
            ErrorCode::ConfigInvalid => "Invalid configuration",
        }
    }

    /// Whether the caller can continue after this error (e.g. with an empty order set)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::OrderSourceUnavailable | ErrorCode::OrderSourceMalformed
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a `u16` is not a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),
            4001 => Ok(ErrorCode::OrderSourceUnavailable),
            4002 => Ok(ErrorCode::OrderSourceMalformed),
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::IoError),
            9003 => Ok(ErrorCode::ExportFailed),
            9004 => Ok(ErrorCode::ConfigInvalid),
            other => Err(InvalidErrorCode(other)),
        }
    }
}
