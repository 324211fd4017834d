//! Shared types for Counter Server
//!
//! Common types used across the workspace: the unified error system,
//! persistence-facing data models, and id/time utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
