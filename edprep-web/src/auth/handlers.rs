//! Login and current-user endpoints

use super::{
    users::{LoginForm, LoginResponse, UserProfile},
    CurrentUser,
};
use crate::{
    error::{ApiError, ApiResult},
    AppState,
};
use axum::{
    extract::{rejection::FormRejection, State},
    response::Json,
    Form,
};
use tracing::info;

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Form(form) = form.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    info!("Login attempt: {}", form.username.trim());

    let response = state.users.login(form).await?;
    Ok(Json(response))
}

/// Profile of the authenticated caller
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}
