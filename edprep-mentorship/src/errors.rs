//! Mentorship error types
//!
//! Each variant corresponds to one rejection step of the request pipeline:
//! lookup, party check, input validation, uniqueness and state transition.

use edprep_core::{ConnectionStatus, UserId};
use thiserror::Error;

pub type MentorshipResult<T> = Result<T, MentorshipError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MentorshipError {
    /// Target entity does not exist
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Caller is not allowed to act on the entity
    #[error("{reason}")]
    Forbidden { reason: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Connection already exists with this mentor")]
    Duplicate { mentor_id: UserId, mentee_id: UserId },

    #[error("Cannot {action} a connection that is already {from}")]
    InvalidTransition {
        from: ConnectionStatus,
        action: &'static str,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MentorshipError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
