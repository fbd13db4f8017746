//! Mentorship request and response types

use crate::{auth::users::UserProfile, error::ApiError};
use chrono::{DateTime, Utc};
use edprep_core::{Connection, Message, MessageType, TutoringSession, UserId};
use edprep_mentorship::{ConnectionDetails, ConnectionRequest, MentorListing};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MentorsQuery {
    /// Only mentors with this specialization (case-insensitive)
    pub specialization: Option<String>,
}

/// Mentor listing with the mentor's account summary
#[derive(Debug, Serialize, ToSchema)]
pub struct MentorSummary {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub specializations: Vec<String>,
    pub years_experience: u32,
    #[schema(example = 4.8)]
    pub rating: f32,
    pub is_available: bool,
}

impl From<MentorListing> for MentorSummary {
    fn from(listing: MentorListing) -> Self {
        Self {
            user_id: listing.profile.user_id,
            full_name: listing.user.full_name,
            email: listing.user.email,
            bio: listing.profile.bio,
            specializations: listing.profile.specializations,
            years_experience: listing.profile.years_experience,
            rating: listing.profile.rating,
            is_available: listing.profile.is_available,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MentorsResponse {
    pub success: bool,
    pub mentors: Vec<MentorSummary>,
}

/// Connect form (`application/x-www-form-urlencoded`)
///
/// `goals` and `focus_areas` take either a JSON array string or a
/// comma-separated list.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ConnectForm {
    #[schema(example = "2")]
    pub mentor_id: Option<String>,
    pub message: Option<String>,
    /// Accepted in place of `message`
    pub connection_message: Option<String>,
    #[schema(example = "[\"Reach band 7\"]")]
    pub goals: Option<String>,
    #[schema(example = "7.5")]
    pub target_band_score: Option<String>,
    #[schema(example = "writing,speaking")]
    pub focus_areas: Option<String>,
}

impl ConnectForm {
    pub fn into_request(self) -> Result<ConnectionRequest, ApiError> {
        let mentor_id = match self.mentor_id.as_deref().map(str::trim) {
            None | Some("") => return Err(ApiError::bad_request("mentor_id is required")),
            Some(raw) => raw
                .parse()
                .map_err(|_| ApiError::bad_request("mentor_id must be an integer"))?,
        };

        let target_band_score = match self.target_band_score.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<f32>()
                    .map_err(|_| ApiError::bad_request("target_band_score must be a number"))?,
            ),
        };

        Ok(ConnectionRequest {
            mentor_id,
            message: self
                .message
                .or(self.connection_message)
                .map(|m| m.trim().to_string())
                .unwrap_or_default(),
            goals: parse_list(self.goals.as_deref()),
            target_band_score,
            focus_areas: parse_list(self.focus_areas.as_deref()),
        })
    }
}

/// JSON array string or comma-separated list; blank entries are dropped
pub fn parse_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    let items = if raw.starts_with('[') {
        serde_json::from_str::<Vec<String>>(raw)
            .unwrap_or_else(|_| split_commas(raw.trim_start_matches('[').trim_end_matches(']')))
    } else {
        split_commas(raw)
    };

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn split_commas(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Connection with both parties' summaries
#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionView {
    pub id: u64,
    pub mentor_id: UserId,
    pub mentee_id: UserId,
    /// pending or active
    #[schema(example = "pending")]
    pub status: String,
    pub connection_message: String,
    pub goals: Vec<String>,
    pub target_band_score: Option<f32>,
    pub focus_areas: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentee: Option<UserProfile>,
}

impl From<Connection> for ConnectionView {
    fn from(connection: Connection) -> Self {
        Self {
            id: connection.id,
            mentor_id: connection.mentor_id,
            mentee_id: connection.mentee_id,
            status: connection.status.to_string(),
            connection_message: connection.connection_message,
            goals: connection.goals,
            target_band_score: connection.target_band_score,
            focus_areas: connection.focus_areas,
            created_at: connection.created_at,
            updated_at: connection.updated_at,
            mentor: None,
            mentee: None,
        }
    }
}

impl From<ConnectionDetails> for ConnectionView {
    fn from(details: ConnectionDetails) -> Self {
        Self {
            mentor: details.mentor.as_ref().map(UserProfile::from),
            mentee: details.mentee.as_ref().map(UserProfile::from),
            ..Self::from(details.connection)
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionResponse {
    pub success: bool,
    pub message: String,
    pub connection: ConnectionView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionsResponse {
    pub success: bool,
    pub connections: Vec<ConnectionView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageView {
    pub id: u64,
    pub connection_id: u64,
    pub sender_id: UserId,
    pub content: String,
    /// text, image or file
    #[schema(example = "text")]
    pub message_type: String,
    pub is_read: bool,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            connection_id: message.connection_id,
            sender_id: message.sender_id,
            content: message.content,
            message_type: message.message_type.to_string(),
            is_read: message.is_read,
            is_edited: message.is_edited,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessagesResponse {
    pub success: bool,
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    #[schema(example = "Could you review my Task 2 essay?")]
    pub content: String,
    /// text (default), image or file
    pub message_type: Option<String>,
}

impl SendMessageRequest {
    pub fn message_type(&self) -> Result<MessageType, ApiError> {
        let raw = match self.message_type.as_deref().map(str::trim) {
            None | Some("") => return Ok(MessageType::default()),
            Some(raw) => raw,
        };
        [MessageType::Text, MessageType::Image, MessageType::File]
            .into_iter()
            .find(|candidate| candidate.as_str() == raw)
            .ok_or_else(|| ApiError::bad_request(format!("Unsupported message_type '{}'", raw)))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: MessageView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub id: u64,
    pub connection_id: u64,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub agenda: Vec<String>,
    /// scheduled, completed or cancelled
    #[schema(example = "scheduled")]
    pub status: String,
    pub meeting_link: Option<String>,
}

impl From<TutoringSession> for SessionView {
    fn from(session: TutoringSession) -> Self {
        Self {
            id: session.id,
            connection_id: session.connection_id,
            title: session.title,
            scheduled_at: session.scheduled_at,
            duration_minutes: session.duration_minutes,
            agenda: session.agenda,
            status: session.status.to_string(),
            meeting_link: session.meeting_link,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionsResponse {
    pub success: bool,
    pub sessions: Vec<SessionView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_formats() {
        assert_eq!(
            parse_list(Some(r#"["Band 7", " fluency ", ""]"#)),
            vec!["Band 7", "fluency"]
        );
        assert_eq!(
            parse_list(Some("writing, speaking,,")),
            vec!["writing", "speaking"]
        );
        assert_eq!(parse_list(Some("[writing, reading]")), vec!["writing", "reading"]);
        assert!(parse_list(Some("   ")).is_empty());
        assert!(parse_list(None).is_empty());
    }

    #[test]
    fn test_connect_form_message_alias() {
        let form = ConnectForm {
            mentor_id: Some(" 2 ".to_string()),
            connection_message: Some("Hi there".to_string()),
            target_band_score: Some("7.5".to_string()),
            focus_areas: Some("writing".to_string()),
            ..ConnectForm::default()
        };
        let request = form.into_request().unwrap();

        assert_eq!(request.mentor_id, 2);
        assert_eq!(request.message, "Hi there");
        assert_eq!(request.target_band_score, Some(7.5));
        assert_eq!(request.focus_areas, vec!["writing"]);
        assert!(request.goals.is_empty());
    }

    #[test]
    fn test_connect_form_rejections() {
        assert!(ConnectForm::default().into_request().is_err());

        let form = ConnectForm {
            mentor_id: Some("two".to_string()),
            ..ConnectForm::default()
        };
        assert!(matches!(form.into_request(), Err(ApiError::BadRequest(_))));

        let form = ConnectForm {
            mentor_id: Some("2".to_string()),
            target_band_score: Some("high".to_string()),
            ..ConnectForm::default()
        };
        assert!(matches!(form.into_request(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_message_type_parsing() {
        let mut request = SendMessageRequest {
            content: "hi".to_string(),
            message_type: None,
        };
        assert_eq!(request.message_type().unwrap(), MessageType::Text);

        request.message_type = Some("file".to_string());
        assert_eq!(request.message_type().unwrap(), MessageType::File);

        request.message_type = Some("video".to_string());
        assert!(request.message_type().is_err());
    }
}
