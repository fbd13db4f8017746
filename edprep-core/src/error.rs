//! Unified error handling for process-level failures
//!
//! Request-level failures have their own types in the mentorship and web
//! crates; this one covers startup concerns such as configuration and logging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

pub type EdprepResult<T> = Result<T, EdprepError>;

/// Error context for tracking a failure across log lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EdprepError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: ErrorContext,
    },

    #[error("Logging error: {message}")]
    Logging {
        message: String,
        context: ErrorContext,
    },
}

impl EdprepError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: ErrorContext::new("config"),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
            context: ErrorContext::new("logging"),
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            EdprepError::Config { context, .. } | EdprepError::Logging { context, .. } => context,
        }
    }

    /// Log the error with its tracking id
    pub fn log(&self) {
        let context = self.context();
        error!(
            error_id = %context.error_id,
            component = %context.component,
            error = %self,
            "Startup error"
        );
    }
}
