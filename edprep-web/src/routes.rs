//! Route table for the EdPrep web server

use crate::{auth, handlers, openapi, AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};

/// Everything under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(openapi::openapi_json))
        .nest("/v1", v1_routes())
        .method_not_allowed_fallback(handlers::method_not_allowed)
}

fn v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/mentorship", mentorship_routes())
}

/// Login and profile
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::handlers::login))
        .route("/me", get(auth::handlers::me))
        .method_not_allowed_fallback(handlers::method_not_allowed)
}

/// Mentors, connections, messages and sessions
pub fn mentorship_routes() -> Router<AppState> {
    Router::new()
        .route("/mentors", get(handlers::list_mentors))
        .route("/connect", post(handlers::connect))
        .route("/connections", get(handlers::list_connections))
        .route("/connections/{id}", delete(handlers::delete_connection))
        .route(
            "/connections/{id}/delete",
            delete(handlers::delete_connection),
        )
        .route(
            "/connections/{id}/accept",
            post(handlers::accept_connection),
        )
        .route(
            "/connections/{id}/messages",
            get(handlers::list_messages).post(handlers::send_message),
        )
        .route(
            "/connections/{id}/sessions",
            get(handlers::connection_sessions),
        )
        .route("/sessions", get(handlers::my_sessions))
        .method_not_allowed_fallback(handlers::method_not_allowed)
}
