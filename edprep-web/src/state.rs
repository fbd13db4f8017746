//! Shared application state

use crate::{
    auth::{jwt::JwtService, users::UserService},
    WebConfig, WebResult,
};
use edprep_mentorship::{MemoryStore, MentorshipService, MentorshipStore};
use std::sync::Arc;
use tracing::info;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Users, mentors, connections, messages and sessions
    pub store: Arc<dyn MentorshipStore>,
    /// Authorization-checked mentorship operations
    pub mentorship: Arc<MentorshipService>,
    /// Credential login
    pub users: UserService,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    /// State backed by the seeded in-memory store
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let store = MemoryStore::seeded().await?;
        let state = Self::with_store(config, Arc::new(store));

        info!(
            users = state.store.list_users().await.len(),
            "Application state initialized"
        );
        Ok(state)
    }

    /// State over an existing store
    pub fn with_store(config: WebConfig, store: Arc<dyn MentorshipStore>) -> Self {
        let jwt = Arc::new(JwtService::new(&config.jwt_secret, config.token_ttl_minutes));
        let users = UserService::new(store.clone(), jwt.clone());
        let mentorship = Arc::new(MentorshipService::new(store.clone()));

        Self {
            config,
            store,
            mentorship,
            users,
            jwt,
        }
    }
}
