//! Tutoring session listings

use super::types::{parse_id, ErrorResponse, SessionView, SessionsResponse};
use crate::{auth::CurrentUser, error::ApiResult, AppState};
use axum::{
    extract::{Path, State},
    response::Json,
};

#[utoipa::path(
    get,
    path = "/api/v1/mentorship/connections/{id}/sessions",
    tag = "sessions",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Connection id")),
    responses(
        (status = 200, description = "Sessions ordered by schedule", body = SessionsResponse),
        (status = 403, description = "Caller is not a party", body = ErrorResponse),
        (status = 404, description = "Connection not found", body = ErrorResponse)
    )
)]
pub async fn connection_sessions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionsResponse>> {
    let id = parse_id(&id, "Connection")?;
    let sessions = state
        .mentorship
        .sessions(&user, id)
        .await?
        .into_iter()
        .map(SessionView::from)
        .collect();

    Ok(Json(SessionsResponse {
        success: true,
        sessions,
    }))
}

/// Sessions across all of the caller's connections
#[utoipa::path(
    get,
    path = "/api/v1/mentorship/sessions",
    tag = "sessions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's sessions", body = SessionsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn my_sessions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<SessionsResponse> {
    let sessions = state
        .mentorship
        .sessions_for(&user)
        .await
        .into_iter()
        .map(SessionView::from)
        .collect();

    Json(SessionsResponse {
        success: true,
        sessions,
    })
}
