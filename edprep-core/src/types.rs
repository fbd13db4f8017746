//! Core data type definitions
//!
//! Records held by the mentorship store. All identities are integers assigned
//! by the store in increasing order per collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type ConnectionId = u64;
pub type MessageId = u64;
pub type SessionId = u64;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
    Tutor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Mentor => "mentor",
            Role::Tutor => "tutor",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered account with hashed credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Login name
    pub email: String,
    pub full_name: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// IELTS band the user is aiming for
    pub target_band_score: Option<f32>,
    pub current_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Mentor listing, keyed by the mentor's user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfile {
    pub user_id: UserId,
    pub bio: String,
    pub specializations: Vec<String>,
    pub years_experience: u32,
    pub rating: f32,
    pub is_available: bool,
}

impl MentorProfile {
    /// Case-insensitive match against one of the specializations
    pub fn specializes_in(&self, topic: &str) -> bool {
        let topic = topic.trim().to_lowercase();
        self.specializations
            .iter()
            .any(|s| s.to_lowercase() == topic)
    }
}

/// Lifecycle state of a mentor-mentee connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Active,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Active => "active",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mentor-mentee relationship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub mentor_id: UserId,
    pub mentee_id: UserId,
    pub status: ConnectionStatus,
    pub connection_message: String,
    pub goals: Vec<String>,
    pub target_band_score: Option<f32>,
    pub focus_areas: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Connection {
    /// Whether the user is the mentor or the mentee
    pub fn is_party(&self, user_id: UserId) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }
}

/// Fields supplied when requesting a connection
#[derive(Debug, Clone)]
pub struct NewConnection {
    pub mentor_id: UserId,
    pub mentee_id: UserId,
    pub connection_message: String,
    pub goals: Vec<String>,
    pub target_band_score: Option<f32>,
    pub focus_areas: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    File,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::File => "file",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat message inside a connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub connection_id: ConnectionId,
    pub sender_id: UserId,
    pub content: String,
    pub message_type: MessageType,
    pub is_read: bool,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub connection_id: ConnectionId,
    pub sender_id: UserId,
    pub content: String,
    pub message_type: MessageType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduled tutoring session between the parties of a connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutoringSession {
    pub id: SessionId,
    pub connection_id: ConnectionId,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub agenda: Vec<String>,
    pub status: SessionStatus,
    pub meeting_link: Option<String>,
}
