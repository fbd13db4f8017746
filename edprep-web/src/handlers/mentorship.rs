//! Mentor discovery and connection lifecycle handlers

use super::types::{
    parse_id, ActionResponse, ConnectForm, ConnectionResponse, ConnectionView,
    ConnectionsResponse, ErrorResponse, MentorSummary, MentorsQuery, MentorsResponse,
};
use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    AppState,
};
use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    response::Json,
    Form,
};
use tracing::{debug, info};

/// List mentors, optionally filtered by specialization
#[utoipa::path(
    get,
    path = "/api/v1/mentorship/mentors",
    tag = "mentorship",
    params(MentorsQuery),
    responses(
        (status = 200, description = "Mentor listings", body = MentorsResponse)
    )
)]
pub async fn list_mentors(
    State(state): State<AppState>,
    Query(query): Query<MentorsQuery>,
) -> Json<MentorsResponse> {
    let specialization = query
        .specialization
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let mentors: Vec<MentorSummary> = state
        .mentorship
        .list_mentors(specialization)
        .await
        .into_iter()
        .map(MentorSummary::from)
        .collect();

    debug!(count = mentors.len(), ?specialization, "Listed mentors");
    Json(MentorsResponse {
        success: true,
        mentors,
    })
}

/// Request a connection with a mentor; the caller becomes the mentee
#[utoipa::path(
    post,
    path = "/api/v1/mentorship/connect",
    tag = "mentorship",
    security(("bearer_auth" = [])),
    request_body(content = ConnectForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Connection requested", body = ConnectionResponse),
        (status = 400, description = "Duplicate, self-connection or invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Mentor not found", body = ErrorResponse)
    )
)]
pub async fn connect(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    form: Result<Form<ConnectForm>, FormRejection>,
) -> ApiResult<Json<ConnectionResponse>> {
    let Form(form) = form.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let request = form.into_request()?;
    info!(user_id = user.id, mentor_id = request.mentor_id, "Connection request");

    let connection = state.mentorship.request_connection(&user, request).await?;
    Ok(Json(ConnectionResponse {
        success: true,
        message: "Connection request sent successfully".to_string(),
        connection: ConnectionView::from(connection),
    }))
}

/// Connections where the caller is mentor or mentee, newest first
#[utoipa::path(
    get,
    path = "/api/v1/mentorship/connections",
    tag = "mentorship",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's connections", body = ConnectionsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_connections(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<ConnectionsResponse> {
    let connections = state
        .mentorship
        .connections_for(&user)
        .await
        .into_iter()
        .map(ConnectionView::from)
        .collect();

    Json(ConnectionsResponse {
        success: true,
        connections,
    })
}

/// Mentor accepts a pending connection
#[utoipa::path(
    post,
    path = "/api/v1/mentorship/connections/{id}/accept",
    tag = "mentorship",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Connection id")),
    responses(
        (status = 200, description = "Connection accepted", body = ConnectionResponse),
        (status = 400, description = "Connection is not pending", body = ErrorResponse),
        (status = 403, description = "Caller is not the mentor", body = ErrorResponse),
        (status = 404, description = "Connection not found", body = ErrorResponse)
    )
)]
pub async fn accept_connection(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ConnectionResponse>> {
    let id = parse_id(&id, "Connection")?;
    let connection = state.mentorship.accept_connection(&user, id).await?;

    Ok(Json(ConnectionResponse {
        success: true,
        message: "Connection accepted successfully".to_string(),
        connection: ConnectionView::from(connection),
    }))
}

/// Either party removes the connection with its messages and sessions
#[utoipa::path(
    delete,
    path = "/api/v1/mentorship/connections/{id}/delete",
    tag = "mentorship",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Connection id")),
    responses(
        (status = 200, description = "Connection deleted", body = ActionResponse),
        (status = 403, description = "Caller is not a party", body = ErrorResponse),
        (status = 404, description = "Connection not found", body = ErrorResponse)
    )
)]
pub async fn delete_connection(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    let id = parse_id(&id, "Connection")?;
    state.mentorship.delete_connection(&user, id).await?;

    Ok(Json(ActionResponse {
        success: true,
        message: "Connection deleted successfully".to_string(),
    }))
}
