//! Store abstraction
//!
//! Lookups return `None` on a miss; turning a miss into a client error is the
//! service's job. Returned records are snapshots, not live references.

use async_trait::async_trait;
use edprep_core::{
    Connection, ConnectionId, ConnectionStatus, MentorProfile, Message, NewConnection, NewMessage,
    TutoringSession, User, UserId,
};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// A pending or active connection already links the pair
    #[error("connection {existing_id} already links mentor {mentor_id} and mentee {mentee_id}")]
    Duplicate {
        existing_id: ConnectionId,
        mentor_id: UserId,
        mentee_id: UserId,
    },

    #[error("connection {id} not found")]
    NotFound { id: ConnectionId },

    /// The connection moved on before the transition could apply
    #[error("connection {id} is {actual}")]
    StatusMismatch {
        id: ConnectionId,
        actual: ConnectionStatus,
    },
}

/// Persistence seam for users, mentors, connections, messages and sessions
#[async_trait]
pub trait MentorshipStore: Send + Sync {
    async fn find_user(&self, id: UserId) -> Option<User>;

    /// Case-insensitive lookup by login email
    async fn find_user_by_email(&self, email: &str) -> Option<User>;

    async fn list_users(&self) -> Vec<User>;

    async fn list_mentors(&self) -> Vec<MentorProfile>;

    async fn find_mentor(&self, user_id: UserId) -> Option<MentorProfile>;

    /// Connections where the user is mentor or mentee
    async fn connections_for_user(&self, user_id: UserId) -> Vec<Connection>;

    async fn find_connection(&self, id: ConnectionId) -> Option<Connection>;

    /// Insert a pending connection unless the pair is already linked.
    /// The existence check and the insert are atomic.
    async fn insert_connection(&self, new: NewConnection) -> Result<Connection, StoreError>;

    /// Move a connection from `from` to `to`. The status check and the
    /// update are atomic, so concurrent transitions succeed at most once.
    async fn transition_connection(
        &self,
        id: ConnectionId,
        from: ConnectionStatus,
        to: ConnectionStatus,
    ) -> Result<Connection, StoreError>;

    /// Remove a connection together with its messages and sessions
    async fn remove_connection(&self, id: ConnectionId) -> Option<Connection>;

    /// Messages ordered by creation time, oldest first
    async fn messages_for_connection(&self, id: ConnectionId) -> Vec<Message>;

    async fn append_message(&self, new: NewMessage) -> Message;

    /// Sessions ordered by scheduled time
    async fn sessions_for_connection(&self, id: ConnectionId) -> Vec<TutoringSession>;

    /// Sessions on every connection the user is a party to
    async fn sessions_for_user(&self, user_id: UserId) -> Vec<TutoringSession>;
}
