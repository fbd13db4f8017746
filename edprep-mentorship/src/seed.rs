//! Demo data loaded at process start
//!
//! Every seeded account uses the password `test`.

use crate::credentials::hash_password;
use crate::errors::{MentorshipError, MentorshipResult};
use crate::memory::{MemoryStore, NewSession, NewUser};
use crate::store::MentorshipStore;
use chrono::{Duration, Utc};
use edprep_core::{
    ConnectionStatus, MentorProfile, MessageType, NewConnection, NewMessage, Role, SessionStatus,
};
use std::sync::OnceLock;
use tracing::info;

pub const SEED_PASSWORD: &str = "test";

static SEED_PASSWORD_HASH: OnceLock<String> = OnceLock::new();

fn seed_password_hash() -> MentorshipResult<String> {
    if let Some(hash) = SEED_PASSWORD_HASH.get() {
        return Ok(hash.clone());
    }
    let hash = hash_password(SEED_PASSWORD).map_err(|e| MentorshipError::internal(e.to_string()))?;
    Ok(SEED_PASSWORD_HASH.get_or_init(|| hash).clone())
}

struct SeedUser {
    email: &'static str,
    full_name: &'static str,
    role: Role,
    target_band_score: Option<f32>,
    current_level: Option<&'static str>,
}

const SEED_USERS: [SeedUser; 4] = [
    SeedUser {
        email: "admin1@edprep.ai",
        full_name: "Admin One",
        role: Role::Admin,
        target_band_score: Some(7.5),
        current_level: Some("advanced"),
    },
    SeedUser {
        email: "mentor1@edprep.ai",
        full_name: "Sarah Johnson",
        role: Role::Mentor,
        target_band_score: None,
        current_level: None,
    },
    SeedUser {
        email: "student1@edprep.ai",
        full_name: "Alex Chen",
        role: Role::Student,
        target_band_score: Some(6.5),
        current_level: Some("intermediate"),
    },
    SeedUser {
        email: "tutor1@edprep.ai",
        full_name: "David Smith",
        role: Role::Tutor,
        target_band_score: None,
        current_level: None,
    },
];

impl MemoryStore {
    /// Store populated with the demo accounts, mentors, connections,
    /// messages and sessions
    pub async fn seeded() -> MentorshipResult<Self> {
        let store = Self::new();
        let password_hash = seed_password_hash()?;

        for seed in SEED_USERS.iter() {
            store
                .add_user(NewUser {
                    email: seed.email.to_string(),
                    full_name: seed.full_name.to_string(),
                    password_hash: password_hash.clone(),
                    role: seed.role,
                    target_band_score: seed.target_band_score,
                    current_level: seed.current_level.map(str::to_string),
                })
                .await;
        }

        store
            .add_mentor(MentorProfile {
                user_id: 2,
                bio: "Former IELTS examiner focusing on academic writing and speaking fluency."
                    .to_string(),
                specializations: vec!["Writing".to_string(), "Speaking".to_string()],
                years_experience: 8,
                rating: 4.9,
                is_available: true,
            })
            .await;
        store
            .add_mentor(MentorProfile {
                user_id: 4,
                bio: "Listening and reading strategy coach.".to_string(),
                specializations: vec!["Listening".to_string(), "Reading".to_string()],
                years_experience: 5,
                rating: 4.7,
                is_available: true,
            })
            .await;

        let seed_connections = [
            (2, 1, ConnectionStatus::Active, "Looking to reach band 7.5 in writing."),
            (2, 3, ConnectionStatus::Pending, "Could you help me with Task 2 essays?"),
            (4, 3, ConnectionStatus::Active, "I need help with listening section 4."),
        ];
        for (mentor_id, mentee_id, status, note) in seed_connections {
            let connection = store
                .insert_connection(NewConnection {
                    mentor_id,
                    mentee_id,
                    connection_message: note.to_string(),
                    goals: vec!["Improve overall band score".to_string()],
                    target_band_score: Some(7.0),
                    focus_areas: vec!["Writing".to_string()],
                })
                .await
                .map_err(|e| MentorshipError::internal(e.to_string()))?;
            if status != ConnectionStatus::Pending {
                store
                    .transition_connection(connection.id, ConnectionStatus::Pending, status)
                    .await
                    .map_err(|e| MentorshipError::internal(e.to_string()))?;
            }
        }

        let now = Utc::now();
        let seed_messages = [
            (1, 1, "Hi Sarah, thanks for accepting!", 120),
            (1, 2, "Happy to help. Send me your latest Task 2 essay.", 90),
            (1, 1, "Attached below, looking forward to your feedback.", 60),
            (3, 4, "Let's start with section 4 practice tests.", 30),
        ];
        for (connection_id, sender_id, content, minutes_ago) in seed_messages {
            store
                .append_message_at(
                    NewMessage {
                        connection_id,
                        sender_id,
                        content: content.to_string(),
                        message_type: MessageType::Text,
                    },
                    now - Duration::minutes(minutes_ago),
                )
                .await;
        }

        let seed_sessions = [
            (1, "Writing Task 2 review", 2, 60, SessionStatus::Scheduled),
            (1, "Speaking mock test", 7, 45, SessionStatus::Scheduled),
            (3, "Listening section 4 drills", 3, 30, SessionStatus::Scheduled),
        ];
        for (connection_id, title, days_ahead, duration_minutes, status) in seed_sessions {
            store
                .add_session(NewSession {
                    connection_id,
                    title: title.to_string(),
                    scheduled_at: now + Duration::days(days_ahead),
                    duration_minutes,
                    agenda: vec!["Warm-up".to_string(), "Main practice".to_string()],
                    status,
                    meeting_link: None,
                })
                .await;
        }

        info!(
            users = SEED_USERS.len(),
            connections = seed_connections.len(),
            "Seeded mentorship store"
        );
        Ok(store)
    }
}
