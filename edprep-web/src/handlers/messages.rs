//! Chat messages inside a connection

use super::types::{
    parse_id, ErrorResponse, MessageResponse, MessageView, MessagesResponse, SendMessageRequest,
};
use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};

/// Chat history of a connection, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/mentorship/connections/{id}/messages",
    tag = "messages",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Connection id")),
    responses(
        (status = 200, description = "Messages ordered by creation time", body = MessagesResponse),
        (status = 403, description = "Caller is not a party", body = ErrorResponse),
        (status = 404, description = "Connection not found", body = ErrorResponse)
    )
)]
pub async fn list_messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessagesResponse>> {
    let id = parse_id(&id, "Connection")?;
    let messages = state
        .mentorship
        .messages(&user, id)
        .await?
        .into_iter()
        .map(MessageView::from)
        .collect();

    Ok(Json(MessagesResponse {
        success: true,
        messages,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/mentorship/connections/{id}/messages",
    tag = "messages",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Connection id")),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message stored", body = MessageResponse),
        (status = 400, description = "Malformed body, unknown message_type, empty or oversized content", body = ErrorResponse),
        (status = 403, description = "Caller is not a party", body = ErrorResponse),
        (status = 404, description = "Connection not found", body = ErrorResponse)
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "Connection")?;
    // Missing connection and outsiders are reported before the payload
    state.mentorship.connection_for_party(&user, id).await?;

    let Json(request) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let message_type = request.message_type()?;

    let message = state
        .mentorship
        .send_message(&user, id, &request.content, message_type)
        .await?;

    Ok(Json(MessageResponse {
        success: true,
        message: MessageView::from(message),
    }))
}
