//! Mentorship service
//!
//! Applies the per-resource authorization contract on top of a
//! [`MentorshipStore`]: locate the target (404), check the caller is an
//! allowed party (403), then read or mutate.

use crate::errors::{MentorshipError, MentorshipResult};
use crate::store::{MentorshipStore, StoreError};
use edprep_core::{
    Connection, ConnectionId, ConnectionStatus, MentorProfile, Message, MessageType,
    NewConnection, NewMessage, TutoringSession, User, UserId,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MAX_MESSAGE_LENGTH: usize = 2000;
pub const MAX_CONNECTION_MESSAGE_LENGTH: usize = 1000;

/// Connect request after boundary parsing
#[derive(Debug, Clone, Default)]
pub struct ConnectionRequest {
    pub mentor_id: UserId,
    pub message: String,
    pub goals: Vec<String>,
    pub target_band_score: Option<f32>,
    pub focus_areas: Vec<String>,
}

/// Mentor listing joined with the mentor's account
#[derive(Debug, Clone)]
pub struct MentorListing {
    pub profile: MentorProfile,
    pub user: User,
}

/// Connection joined with both parties' accounts
#[derive(Debug, Clone)]
pub struct ConnectionDetails {
    pub connection: Connection,
    pub mentor: Option<User>,
    pub mentee: Option<User>,
}

/// Band scores run from 0 to 9 in half-band steps
pub fn validate_band_score(score: f32) -> MentorshipResult<f32> {
    let doubled = score * 2.0;
    if !(0.0..=9.0).contains(&score) || doubled.fract() != 0.0 {
        return Err(MentorshipError::validation(
            "Target band score must be between 0 and 9 in steps of 0.5",
        ));
    }
    Ok(score)
}

#[derive(Clone)]
pub struct MentorshipService {
    store: Arc<dyn MentorshipStore>,
}

impl MentorshipService {
    pub fn new(store: Arc<dyn MentorshipStore>) -> Self {
        Self { store }
    }

    /// Mentor listings, optionally narrowed to one specialization
    pub async fn list_mentors(&self, specialization: Option<&str>) -> Vec<MentorListing> {
        let mut listings = Vec::new();
        for profile in self.store.list_mentors().await {
            if let Some(topic) = specialization {
                if !profile.specializes_in(topic) {
                    continue;
                }
            }
            match self.store.find_user(profile.user_id).await {
                Some(user) => listings.push(MentorListing { profile, user }),
                None => warn!(user_id = profile.user_id, "Mentor profile without account"),
            }
        }
        listings
    }

    /// Ask a mentor for a connection; the caller becomes the mentee
    pub async fn request_connection(
        &self,
        caller: &User,
        request: ConnectionRequest,
    ) -> MentorshipResult<Connection> {
        if self.store.find_mentor(request.mentor_id).await.is_none() {
            debug!(mentor_id = request.mentor_id, "Connect to unknown mentor");
            return Err(MentorshipError::not_found("Mentor", request.mentor_id));
        }

        if request.mentor_id == caller.id {
            return Err(MentorshipError::validation(
                "You cannot send a connection request to yourself",
            ));
        }
        if request.message.chars().count() > MAX_CONNECTION_MESSAGE_LENGTH {
            return Err(MentorshipError::validation(format!(
                "Connection message cannot exceed {} characters",
                MAX_CONNECTION_MESSAGE_LENGTH
            )));
        }
        let target_band_score = request
            .target_band_score
            .map(validate_band_score)
            .transpose()?;

        let new = NewConnection {
            mentor_id: request.mentor_id,
            mentee_id: caller.id,
            connection_message: request.message,
            goals: request.goals,
            target_band_score,
            focus_areas: request.focus_areas,
        };

        match self.store.insert_connection(new).await {
            Ok(connection) => {
                info!(
                    connection_id = connection.id,
                    mentor_id = connection.mentor_id,
                    mentee_id = connection.mentee_id,
                    "Connection requested"
                );
                Ok(connection)
            }
            Err(StoreError::Duplicate {
                existing_id,
                mentor_id,
                mentee_id,
            }) => {
                warn!(existing_id, mentor_id, mentee_id, "Duplicate connection request");
                Err(MentorshipError::Duplicate {
                    mentor_id,
                    mentee_id,
                })
            }
            Err(other) => Err(MentorshipError::internal(other.to_string())),
        }
    }

    /// Connections where the caller is mentor or mentee, newest first
    pub async fn connections_for(&self, caller: &User) -> Vec<ConnectionDetails> {
        let mut connections = self.store.connections_for_user(caller.id).await;
        connections.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let mut details = Vec::with_capacity(connections.len());
        for connection in connections {
            let mentor = self.store.find_user(connection.mentor_id).await;
            let mentee = self.store.find_user(connection.mentee_id).await;
            details.push(ConnectionDetails {
                connection,
                mentor,
                mentee,
            });
        }
        details
    }

    /// Mentor-only transition from pending to active
    pub async fn accept_connection(
        &self,
        caller: &User,
        id: ConnectionId,
    ) -> MentorshipResult<Connection> {
        let connection = self.find_connection(id).await?;

        if connection.mentor_id != caller.id {
            warn!(
                connection_id = id,
                user_id = caller.id,
                "Non-mentor tried to accept connection"
            );
            return Err(MentorshipError::forbidden(
                "Only the mentor can accept this connection",
            ));
        }

        let accepted = self
            .store
            .transition_connection(id, ConnectionStatus::Pending, ConnectionStatus::Active)
            .await
            .map_err(|err| match err {
                StoreError::StatusMismatch { actual, .. } => MentorshipError::InvalidTransition {
                    from: actual,
                    action: "accept",
                },
                StoreError::NotFound { id } => MentorshipError::not_found("Connection", id),
                other => MentorshipError::internal(other.to_string()),
            })?;
        info!(connection_id = id, mentor_id = caller.id, "Connection accepted");
        Ok(accepted)
    }

    /// Either party may remove the connection
    pub async fn delete_connection(
        &self,
        caller: &User,
        id: ConnectionId,
    ) -> MentorshipResult<Connection> {
        self.connection_for_party(caller, id).await?;

        let removed = self
            .store
            .remove_connection(id)
            .await
            .ok_or_else(|| MentorshipError::not_found("Connection", id))?;
        info!(connection_id = id, user_id = caller.id, "Connection deleted");
        Ok(removed)
    }

    /// Chat history, oldest first
    pub async fn messages(&self, caller: &User, id: ConnectionId) -> MentorshipResult<Vec<Message>> {
        self.connection_for_party(caller, id).await?;
        Ok(self.store.messages_for_connection(id).await)
    }

    pub async fn send_message(
        &self,
        caller: &User,
        id: ConnectionId,
        content: &str,
        message_type: MessageType,
    ) -> MentorshipResult<Message> {
        self.connection_for_party(caller, id).await?;

        let content = content.trim();
        if content.is_empty() {
            return Err(MentorshipError::validation("Message content is required"));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(MentorshipError::validation(format!(
                "Message content cannot exceed {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        let message = self
            .store
            .append_message(NewMessage {
                connection_id: id,
                sender_id: caller.id,
                content: content.to_string(),
                message_type,
            })
            .await;
        debug!(connection_id = id, message_id = message.id, "Message sent");
        Ok(message)
    }

    pub async fn sessions(
        &self,
        caller: &User,
        id: ConnectionId,
    ) -> MentorshipResult<Vec<TutoringSession>> {
        self.connection_for_party(caller, id).await?;
        Ok(self.store.sessions_for_connection(id).await)
    }

    /// Sessions across every connection of the caller
    pub async fn sessions_for(&self, caller: &User) -> Vec<TutoringSession> {
        self.store.sessions_for_user(caller.id).await
    }

    async fn find_connection(&self, id: ConnectionId) -> MentorshipResult<Connection> {
        self.store
            .find_connection(id)
            .await
            .ok_or_else(|| MentorshipError::not_found("Connection", id))
    }

    /// The connection if it exists and the caller is one of its parties
    pub async fn connection_for_party(
        &self,
        caller: &User,
        id: ConnectionId,
    ) -> MentorshipResult<Connection> {
        let connection = self.find_connection(id).await?;
        if !connection.is_party(caller.id) {
            warn!(
                connection_id = id,
                user_id = caller.id,
                "Access to connection denied"
            );
            return Err(MentorshipError::forbidden(
                "You are not a party to this connection",
            ));
        }
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use tokio_test::{assert_err, assert_ok};

    async fn service() -> (MentorshipService, MemoryStore) {
        let store = MemoryStore::seeded().await.unwrap();
        (MentorshipService::new(Arc::new(store.clone())), store)
    }

    async fn user(store: &MemoryStore, id: UserId) -> User {
        store.find_user(id).await.unwrap()
    }

    fn request(mentor_id: UserId) -> ConnectionRequest {
        ConnectionRequest {
            mentor_id,
            message: "Please help with speaking".to_string(),
            goals: vec!["Fluency".to_string()],
            target_band_score: Some(7.0),
            focus_areas: vec!["Speaking".to_string()],
        }
    }

    #[test]
    fn test_band_score_validation() {
        assert_ok!(validate_band_score(0.0));
        assert_ok!(validate_band_score(6.5));
        assert_ok!(validate_band_score(9.0));
        assert_err!(validate_band_score(9.5));
        assert_err!(validate_band_score(-1.0));
        assert_err!(validate_band_score(6.3));
    }

    #[tokio::test]
    async fn test_request_connection_creates_pending() {
        let (service, store) = service().await;
        let admin = user(&store, 1).await;

        let connection = service.request_connection(&admin, request(4)).await.unwrap();
        assert_eq!(connection.mentor_id, 4);
        assert_eq!(connection.mentee_id, 1);
        assert_eq!(connection.status, ConnectionStatus::Pending);
        assert_eq!(connection.goals, vec!["Fluency"]);
    }

    #[tokio::test]
    async fn test_request_connection_rejections() {
        let (service, store) = service().await;
        let admin = user(&store, 1).await;
        let mentor = user(&store, 2).await;

        // Existing seeded pair
        let err = service.request_connection(&admin, request(2)).await.unwrap_err();
        assert!(matches!(err, MentorshipError::Duplicate { .. }));
        assert_eq!(store.connections_for_user(1).await.len(), 1);

        // User 3 is a student, not a mentor
        let err = service.request_connection(&admin, request(3)).await.unwrap_err();
        assert_eq!(err, MentorshipError::not_found("Mentor", 3));

        let err = service.request_connection(&mentor, request(2)).await.unwrap_err();
        assert!(matches!(err, MentorshipError::Validation { .. }));

        // An unknown mentor is reported before any field is checked
        let mut unknown = request(99);
        unknown.target_band_score = Some(9.3);
        unknown.message = "x".repeat(MAX_CONNECTION_MESSAGE_LENGTH + 1);
        let err = service.request_connection(&admin, unknown).await.unwrap_err();
        assert_eq!(err, MentorshipError::not_found("Mentor", 99));

        let mut bad_score = request(4);
        bad_score.target_band_score = Some(10.0);
        let err = service.request_connection(&admin, bad_score).await.unwrap_err();
        assert!(matches!(err, MentorshipError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_accept_only_by_mentor() {
        let (service, store) = service().await;
        let mentor = user(&store, 2).await;
        let mentee = user(&store, 3).await;
        let outsider = user(&store, 1).await;

        // Connection 2 is pending between mentor 2 and mentee 3
        for caller in [&mentee, &outsider] {
            let err = service.accept_connection(caller, 2).await.unwrap_err();
            assert!(matches!(err, MentorshipError::Forbidden { .. }));
        }

        let accepted = service.accept_connection(&mentor, 2).await.unwrap();
        assert_eq!(accepted.status, ConnectionStatus::Active);

        let err = service.accept_connection(&mentor, 2).await.unwrap_err();
        assert!(matches!(err, MentorshipError::InvalidTransition { .. }));

        let err = service.accept_connection(&mentor, 99).await.unwrap_err();
        assert_eq!(err, MentorshipError::not_found("Connection", 99));
    }

    #[tokio::test]
    async fn test_concurrent_accepts_succeed_once() {
        let (service, store) = service().await;
        let mentor = user(&store, 2).await;
        let service = Arc::new(service);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                let mentor = mentor.clone();
                tokio::spawn(async move { service.accept_connection(&mentor, 2).await })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(err) => assert!(matches!(err, MentorshipError::InvalidTransition { .. })),
            }
        }
        assert_eq!(accepted, 1);
    }

    #[tokio::test]
    async fn test_delete_by_either_party() {
        let (service, store) = service().await;
        let mentor = user(&store, 2).await;
        let mentee = user(&store, 3).await;
        let outsider = user(&store, 4).await;

        let err = service.delete_connection(&outsider, 2).await.unwrap_err();
        assert!(matches!(err, MentorshipError::Forbidden { .. }));

        assert_ok!(service.delete_connection(&mentee, 2).await);
        assert!(store.find_connection(2).await.is_none());

        assert_ok!(service.delete_connection(&mentor, 1).await);
        let err = service.delete_connection(&mentor, 1).await.unwrap_err();
        assert_eq!(err, MentorshipError::not_found("Connection", 1));
    }

    #[tokio::test]
    async fn test_messages_require_party() {
        let (service, store) = service().await;
        let admin = user(&store, 1).await;
        let student = user(&store, 3).await;

        let history = service.messages(&admin, 1).await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].created_at <= w[1].created_at));

        let err = service.messages(&student, 1).await.unwrap_err();
        assert!(matches!(err, MentorshipError::Forbidden { .. }));
        let err = service
            .send_message(&student, 1, "hi", MessageType::Text)
            .await
            .unwrap_err();
        assert!(matches!(err, MentorshipError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_send_message_appends_last() {
        let (service, store) = service().await;
        let admin = user(&store, 1).await;

        let sent = service
            .send_message(&admin, 1, "  Here is my essay  ", MessageType::Text)
            .await
            .unwrap();
        assert_eq!(sent.content, "Here is my essay");
        assert_eq!(sent.sender_id, 1);
        assert!(!sent.is_read);

        let history = service.messages(&admin, 1).await.unwrap();
        assert_eq!(history.last().map(|m| m.id), Some(sent.id));

        let err = service
            .send_message(&admin, 1, "   ", MessageType::Text)
            .await
            .unwrap_err();
        assert!(matches!(err, MentorshipError::Validation { .. }));

        let long = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_err!(service.send_message(&admin, 1, &long, MessageType::Text).await);
    }

    #[tokio::test]
    async fn test_connections_and_sessions_scoped_to_caller() {
        let (service, store) = service().await;
        let student = user(&store, 3).await;

        let connections = service.connections_for(&student).await;
        assert_eq!(connections.len(), 2);
        assert!(connections.iter().all(|d| d.connection.is_party(3)));
        assert!(connections.iter().all(|d| d.mentor.is_some() && d.mentee.is_some()));

        let sessions = service.sessions_for(&student).await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].connection_id, 3);

        let err = service.sessions(&student, 1).await.unwrap_err();
        assert!(matches!(err, MentorshipError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_list_mentors_filter() {
        let (service, _) = service().await;
        assert_eq!(service.list_mentors(None).await.len(), 2);

        let writing = service.list_mentors(Some("writing")).await;
        assert_eq!(writing.len(), 1);
        assert_eq!(writing[0].user.id, 2);

        assert!(service.list_mentors(Some("grammar")).await.is_empty());
    }
}
