//! HTTP request handlers for the EdPrep web server
//!
//! Handlers are grouped by resource. Authorization decisions live in
//! `MentorshipService`; handlers only translate between HTTP and it.

pub mod health;
pub mod mentorship;
pub mod messages;
pub mod sessions;
pub mod types;

pub use health::*;
pub use mentorship::*;
pub use messages::*;
pub use sessions::*;

// Re-export all types for convenience
pub use types::*;

use crate::error::ApiError;

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method Not Allowed".to_string())
}
