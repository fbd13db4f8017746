//! Credential login

use super::jwt::{AuthError, JwtService};
use edprep_core::{User, UserId};
use edprep_mentorship::{credentials::verify_password, MentorshipStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginForm {
    /// Account email
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Public user information
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    /// student, mentor, tutor or admin
    pub role: String,
    pub target_band_score: Option<f32>,
    pub current_level: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.to_string(),
            target_band_score: user.target_band_score,
            current_level: user.current_level.clone(),
        }
    }
}

/// Successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Checks credentials against the store and issues tokens
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn MentorshipStore>,
    jwt: Arc<JwtService>,
}

impl UserService {
    pub fn new(store: Arc<dyn MentorshipStore>, jwt: Arc<JwtService>) -> Self {
        Self { store, jwt }
    }

    pub async fn login(&self, form: LoginForm) -> Result<LoginResponse, AuthError> {
        let username = form.username.trim();
        if username.is_empty() || form.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self.store.find_user_by_email(username).await.ok_or_else(|| {
            debug!("Login for unknown account");
            AuthError::InvalidCredentials
        })?;

        if !self.check_password(&user, form.password).await {
            warn!(user_id = user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.jwt.issue(&user)?;
        info!(user_id = user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt.ttl_seconds(),
            user: UserProfile::from(&user),
        })
    }

    /// Argon2 verification runs off the async executor
    async fn check_password(&self, user: &User, password: String) -> bool {
        let hash = user.password_hash.clone();
        let outcome =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await;

        match outcome {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                warn!(user_id = user.id, "Stored password hash unusable: {}", e);
                false
            }
            Err(e) => {
                warn!("Password verification task failed: {}", e);
                false
            }
        }
    }
}
