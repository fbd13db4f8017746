//! Type definitions for handlers
//!
//! Request and response types used by the handlers.

pub mod common;
pub mod mentorship;

// Re-export all types for convenience
pub use common::*;
pub use mentorship::*;
