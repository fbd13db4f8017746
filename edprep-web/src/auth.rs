//! Bearer authentication for protected routes

pub mod handlers;
pub mod jwt;
pub mod users;


use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use edprep_core::User;
use edprep_mentorship::MentorshipStore;
use jwt::{AuthError, JwtService};
use tracing::debug;

/// The authenticated caller, resolved from the bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user = authenticate(&parts.headers, &app_state.jwt, app_state.store.as_ref()).await?;
        Ok(CurrentUser(user))
    }
}

/// Token part of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedAuthHeader)?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MalformedAuthHeader),
    }
}

/// Verify the bearer token and load the user it names
pub async fn authenticate(
    headers: &HeaderMap,
    jwt: &JwtService,
    store: &dyn MentorshipStore,
) -> Result<User, AuthError> {
    let token = bearer_token(headers)?;
    let claims = jwt.verify(token)?;
    let user_id = claims.user_id()?;

    match store.find_user(user_id).await {
        Some(user) => Ok(user),
        None => {
            debug!(user_id, "Token subject has no account");
            Err(AuthError::UserNotFound)
        }
    }
}
