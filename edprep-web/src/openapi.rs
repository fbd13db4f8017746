//! OpenAPI document for the EdPrep API

use axum::response::Json;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use crate::auth::users::{LoginForm, LoginResponse, UserProfile};
use crate::handlers::{
    ActionResponse, ConnectForm, ConnectionResponse, ConnectionView, ConnectionsResponse,
    ErrorResponse, HealthResponse, MentorSummary, MentorsResponse, MessageResponse, MessageView,
    MessagesResponse, SendMessageRequest, SessionView, SessionsResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EdPrep Mentorship API",
        version = "0.1.0",
        description = "Login, mentor discovery, mentor-mentee connections, chat and tutoring sessions",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::handlers::health,

        crate::auth::handlers::login,
        crate::auth::handlers::me,

        crate::handlers::list_mentors,
        crate::handlers::connect,
        crate::handlers::list_connections,
        crate::handlers::accept_connection,
        crate::handlers::delete_connection,

        crate::handlers::list_messages,
        crate::handlers::send_message,

        crate::handlers::connection_sessions,
        crate::handlers::my_sessions,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            ActionResponse,
            LoginForm,
            LoginResponse,
            UserProfile,
            MentorSummary,
            MentorsResponse,
            ConnectForm,
            ConnectionView,
            ConnectionResponse,
            ConnectionsResponse,
            MessageView,
            MessagesResponse,
            SendMessageRequest,
            MessageResponse,
            SessionView,
            SessionsResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Login and current user"),
        (name = "mentorship", description = "Mentors and connection lifecycle"),
        (name = "messages", description = "Chat inside a connection"),
        (name = "sessions", description = "Tutoring sessions"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the bearer token scheme referenced by protected paths
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Serve the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// The OpenAPI document as pretty JSON
pub fn get_openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
