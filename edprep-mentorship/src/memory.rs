//! In-memory store
//!
//! All collections sit behind a single lock so multi-collection operations
//! (duplicate check plus insert, cascading removal) are atomic. Contents are
//! lost on restart and are not shared between processes.

use crate::store::{MentorshipStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use edprep_core::{
    Connection, ConnectionId, ConnectionStatus, MentorProfile, Message, NewConnection, NewMessage,
    Role, SessionStatus, TutoringSession, User, UserId,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Account fields for seeding
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: Role,
    pub target_band_score: Option<f32>,
    pub current_level: Option<String>,
}

/// Session fields for seeding
#[derive(Debug, Clone)]
pub struct NewSession {
    pub connection_id: ConnectionId,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub agenda: Vec<String>,
    pub status: SessionStatus,
    pub meeting_link: Option<String>,
}

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    mentors: Vec<MentorProfile>,
    connections: Vec<Connection>,
    messages: Vec<Message>,
    sessions: Vec<TutoringSession>,
    last_user_id: u64,
    last_connection_id: u64,
    last_message_id: u64,
    last_session_id: u64,
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, new: NewUser) -> User {
        let mut data = self.inner.write().await;
        let user = User {
            id: next_id(&mut data.last_user_id),
            email: new.email,
            full_name: new.full_name,
            password_hash: new.password_hash,
            role: new.role,
            target_band_score: new.target_band_score,
            current_level: new.current_level,
            created_at: Utc::now(),
        };
        data.users.push(user.clone());
        user
    }

    /// Register or replace a mentor listing
    pub async fn add_mentor(&self, profile: MentorProfile) {
        let mut data = self.inner.write().await;
        data.mentors.retain(|m| m.user_id != profile.user_id);
        data.mentors.push(profile);
    }

    pub async fn add_session(&self, new: NewSession) -> TutoringSession {
        let mut data = self.inner.write().await;
        let session = TutoringSession {
            id: next_id(&mut data.last_session_id),
            connection_id: new.connection_id,
            title: new.title,
            scheduled_at: new.scheduled_at,
            duration_minutes: new.duration_minutes,
            agenda: new.agenda,
            status: new.status,
            meeting_link: new.meeting_link,
        };
        data.sessions.push(session.clone());
        session
    }

    /// Append a message with an explicit timestamp
    pub async fn append_message_at(&self, new: NewMessage, created_at: DateTime<Utc>) -> Message {
        let mut data = self.inner.write().await;
        let message = Message {
            id: next_id(&mut data.last_message_id),
            connection_id: new.connection_id,
            sender_id: new.sender_id,
            content: new.content,
            message_type: new.message_type,
            is_read: false,
            is_edited: false,
            created_at,
        };
        data.messages.push(message.clone());
        message
    }
}

#[async_trait]
impl MentorshipStore for MemoryStore {
    async fn find_user(&self, id: UserId) -> Option<User> {
        let data = self.inner.read().await;
        data.users.iter().find(|u| u.id == id).cloned()
    }

    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let email = email.trim();
        let data = self.inner.read().await;
        data.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    async fn list_users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    async fn list_mentors(&self) -> Vec<MentorProfile> {
        self.inner.read().await.mentors.clone()
    }

    async fn find_mentor(&self, user_id: UserId) -> Option<MentorProfile> {
        let data = self.inner.read().await;
        data.mentors.iter().find(|m| m.user_id == user_id).cloned()
    }

    async fn connections_for_user(&self, user_id: UserId) -> Vec<Connection> {
        let data = self.inner.read().await;
        data.connections
            .iter()
            .filter(|c| c.is_party(user_id))
            .cloned()
            .collect()
    }

    async fn find_connection(&self, id: ConnectionId) -> Option<Connection> {
        let data = self.inner.read().await;
        data.connections.iter().find(|c| c.id == id).cloned()
    }

    async fn insert_connection(&self, new: NewConnection) -> Result<Connection, StoreError> {
        let mut data = self.inner.write().await;

        if let Some(existing) = data
            .connections
            .iter()
            .find(|c| c.mentor_id == new.mentor_id && c.mentee_id == new.mentee_id)
        {
            return Err(StoreError::Duplicate {
                existing_id: existing.id,
                mentor_id: new.mentor_id,
                mentee_id: new.mentee_id,
            });
        }

        let now = Utc::now();
        let connection = Connection {
            id: next_id(&mut data.last_connection_id),
            mentor_id: new.mentor_id,
            mentee_id: new.mentee_id,
            status: ConnectionStatus::Pending,
            connection_message: new.connection_message,
            goals: new.goals,
            target_band_score: new.target_band_score,
            focus_areas: new.focus_areas,
            created_at: now,
            updated_at: now,
        };
        data.connections.push(connection.clone());
        debug!(
            connection_id = connection.id,
            mentor_id = connection.mentor_id,
            mentee_id = connection.mentee_id,
            "Inserted connection"
        );
        Ok(connection)
    }

    async fn transition_connection(
        &self,
        id: ConnectionId,
        from: ConnectionStatus,
        to: ConnectionStatus,
    ) -> Result<Connection, StoreError> {
        let mut data = self.inner.write().await;
        let connection = data
            .connections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound { id })?;
        if connection.status != from {
            return Err(StoreError::StatusMismatch {
                id,
                actual: connection.status,
            });
        }
        connection.status = to;
        connection.updated_at = Utc::now();
        Ok(connection.clone())
    }

    async fn remove_connection(&self, id: ConnectionId) -> Option<Connection> {
        let mut data = self.inner.write().await;
        let index = data.connections.iter().position(|c| c.id == id)?;
        let removed = data.connections.remove(index);
        data.messages.retain(|m| m.connection_id != id);
        data.sessions.retain(|s| s.connection_id != id);
        Some(removed)
    }

    async fn messages_for_connection(&self, id: ConnectionId) -> Vec<Message> {
        let data = self.inner.read().await;
        let mut messages: Vec<Message> = data
            .messages
            .iter()
            .filter(|m| m.connection_id == id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        messages
    }

    async fn append_message(&self, new: NewMessage) -> Message {
        self.append_message_at(new, Utc::now()).await
    }

    async fn sessions_for_connection(&self, id: ConnectionId) -> Vec<TutoringSession> {
        let data = self.inner.read().await;
        let mut sessions: Vec<TutoringSession> = data
            .sessions
            .iter()
            .filter(|s| s.connection_id == id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at).then(a.id.cmp(&b.id)));
        sessions
    }

    async fn sessions_for_user(&self, user_id: UserId) -> Vec<TutoringSession> {
        let data = self.inner.read().await;
        let mut sessions: Vec<TutoringSession> = data
            .sessions
            .iter()
            .filter(|s| {
                data.connections
                    .iter()
                    .any(|c| c.id == s.connection_id && c.is_party(user_id))
            })
            .cloned()
            .collect();
        sessions.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at).then(a.id.cmp(&b.id)));
        sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use edprep_core::MessageType;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            email: email.to_string(),
            full_name: email.to_string(),
            password_hash: String::new(),
            role,
            target_band_score: None,
            current_level: None,
        }
    }

    fn new_connection(mentor_id: UserId, mentee_id: UserId) -> NewConnection {
        NewConnection {
            mentor_id,
            mentee_id,
            connection_message: "hello".to_string(),
            goals: vec![],
            target_band_score: None,
            focus_areas: vec![],
        }
    }

    fn text(connection_id: ConnectionId, sender_id: UserId, content: &str) -> NewMessage {
        NewMessage {
            connection_id,
            sender_id,
            content: content.to_string(),
            message_type: MessageType::Text,
        }
    }

    #[tokio::test]
    async fn test_ids_increase_per_collection() {
        let store = MemoryStore::new();
        let a = store.add_user(new_user("a@x.io", Role::Mentor)).await;
        let b = store.add_user(new_user("b@x.io", Role::Student)).await;
        assert_eq!((a.id, b.id), (1, 2));

        let c1 = store.insert_connection(new_connection(1, 2)).await.unwrap();
        assert_eq!(c1.id, 1);
        assert_eq!(c1.status, ConnectionStatus::Pending);

        // Removing does not recycle identities
        store.remove_connection(c1.id).await.unwrap();
        let c2 = store.insert_connection(new_connection(1, 2)).await.unwrap();
        assert_eq!(c2.id, 2);
    }

    #[tokio::test]
    async fn test_lookups_miss_with_none() {
        let store = MemoryStore::new();
        assert!(store.find_user(42).await.is_none());
        assert!(store.find_connection(42).await.is_none());
        assert_eq!(
            store
                .transition_connection(42, ConnectionStatus::Pending, ConnectionStatus::Active)
                .await
                .unwrap_err(),
            StoreError::NotFound { id: 42 }
        );
        assert!(store.remove_connection(42).await.is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_ignores_case() {
        let store = MemoryStore::new();
        store.add_user(new_user("Mentor@EdPrep.ai", Role::Mentor)).await;
        let found = store.find_user_by_email(" mentor@edprep.ai ").await;
        assert_eq!(found.map(|u| u.id), Some(1));
    }

    #[tokio::test]
    async fn test_duplicate_pair_rejected() {
        let store = MemoryStore::new();
        let first = store.insert_connection(new_connection(1, 2)).await.unwrap();
        let err = store.insert_connection(new_connection(1, 2)).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::Duplicate {
                existing_id: first.id,
                mentor_id: 1,
                mentee_id: 2
            }
        );
        // Reverse direction is a different pair
        assert!(store.insert_connection(new_connection(2, 1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_yield_one_connection() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert_connection(new_connection(1, 2)).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.connections_for_user(2).await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_transitions_apply_once() {
        let store = MemoryStore::new();
        let id = store.insert_connection(new_connection(1, 2)).await.unwrap().id;
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .transition_connection(id, ConnectionStatus::Pending, ConnectionStatus::Active)
                    .await
            }));
        }

        let mut applied = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(updated) => {
                    assert_eq!(updated.status, ConnectionStatus::Active);
                    applied += 1;
                }
                Err(err) => assert_eq!(
                    err,
                    StoreError::StatusMismatch {
                        id,
                        actual: ConnectionStatus::Active
                    }
                ),
            }
        }
        assert_eq!(applied, 1);
    }

    #[tokio::test]
    async fn test_messages_sorted_by_creation() {
        let store = MemoryStore::new();
        let conn = store.insert_connection(new_connection(1, 2)).await.unwrap();
        let now = Utc::now();
        store
            .append_message_at(text(conn.id, 1, "third"), now)
            .await;
        store
            .append_message_at(text(conn.id, 2, "first"), now - Duration::minutes(10))
            .await;
        store
            .append_message_at(text(conn.id, 1, "second"), now - Duration::minutes(5))
            .await;

        let contents: Vec<String> = store
            .messages_for_connection(conn.id)
            .await
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_remove_cascades() {
        let store = MemoryStore::new();
        let keep = store.insert_connection(new_connection(1, 2)).await.unwrap();
        let gone = store.insert_connection(new_connection(1, 3)).await.unwrap();
        store.append_message(text(keep.id, 1, "stay")).await;
        store.append_message(text(gone.id, 1, "go")).await;
        store
            .add_session(NewSession {
                connection_id: gone.id,
                title: "Writing Task 2".to_string(),
                scheduled_at: Utc::now(),
                duration_minutes: 60,
                agenda: vec![],
                status: SessionStatus::Scheduled,
                meeting_link: None,
            })
            .await;

        let removed = store.remove_connection(gone.id).await.unwrap();
        assert_eq!(removed.id, gone.id);
        assert!(store.messages_for_connection(gone.id).await.is_empty());
        assert!(store.sessions_for_connection(gone.id).await.is_empty());
        assert_eq!(store.messages_for_connection(keep.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_for_user_follow_connections() {
        let store = MemoryStore::new();
        let mine = store.insert_connection(new_connection(1, 2)).await.unwrap();
        let other = store.insert_connection(new_connection(4, 3)).await.unwrap();
        let now = Utc::now();
        for (connection_id, offset) in [(mine.id, 2), (other.id, 1), (mine.id, 1)] {
            store
                .add_session(NewSession {
                    connection_id,
                    title: format!("session {}", offset),
                    scheduled_at: now + Duration::days(offset),
                    duration_minutes: 45,
                    agenda: vec![],
                    status: SessionStatus::Scheduled,
                    meeting_link: None,
                })
                .await;
        }

        let sessions = store.sessions_for_user(2).await;
        assert_eq!(sessions.len(), 2);
        assert!(sessions.iter().all(|s| s.connection_id == mine.id));
        assert!(sessions[0].scheduled_at < sessions[1].scheduled_at);
    }
}
