//! Utility module
//!
//! - [`logger`] - tracing setup
//! - [`time`] - business-day bucketing
//! - [`validation`] - input sanitization and limits

pub mod logger;
pub mod time;
pub mod validation;

// Re-export error types from shared for handler convenience
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
