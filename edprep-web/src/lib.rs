//! EdPrep Web Server
//!
//! HTTP JSON API for the IELTS preparation platform: login, mentor
//! discovery, mentor-mentee connections, chat messages and tutoring sessions.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use error::ApiError;
pub use server::EdprepServer;
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    Router,
};
use config::{Config, Environment, File};
use edprep_core::{EdprepError, EdprepResult, LogFormat, LoggingConfig};
use serde::Deserialize;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Signing secret used when none is configured. Development only.
pub const DEFAULT_JWT_SECRET: &str = "edprep-dev-secret-change-me";

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    // Preflight requests are answered for every path
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes())
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable development mode
    pub dev_mode: bool,
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Access token lifetime
    pub token_ttl_minutes: i64,
    /// Base log level
    pub log_level: String,
    /// json, pretty or compact
    pub log_format: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_minutes: 60,
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
        }
    }
}

impl WebConfig {
    /// Load configuration: defaults, then the config file, then `EDPREP_*`
    /// environment variables. An explicit `path` must exist; the default
    /// `config/edprep` file is optional.
    pub fn load(path: Option<&str>) -> EdprepResult<Self> {
        let defaults = Self::default();

        let config = Config::builder()
            .set_default("host", defaults.host)
            .and_then(|b| b.set_default("port", i64::from(defaults.port)))
            .and_then(|b| b.set_default("dev_mode", defaults.dev_mode))
            .and_then(|b| b.set_default("jwt_secret", defaults.jwt_secret))
            .and_then(|b| b.set_default("token_ttl_minutes", defaults.token_ttl_minutes))
            .and_then(|b| b.set_default("log_level", defaults.log_level))
            .and_then(|b| b.set_default("log_format", defaults.log_format))
            .map_err(|e| EdprepError::config(e.to_string()))?
            .add_source(File::with_name(path.unwrap_or("config/edprep")).required(path.is_some()))
            .add_source(Environment::with_prefix("EDPREP").try_parsing(true))
            .build()
            .map_err(|e| EdprepError::config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| EdprepError::config(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> EdprepResult<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(EdprepError::config("jwt_secret must not be empty"));
        }
        if self.token_ttl_minutes <= 0 {
            return Err(EdprepError::config("token_ttl_minutes must be positive"));
        }
        self.log_format.parse::<LogFormat>()?;
        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn logging(&self) -> LoggingConfig {
        let format = self.log_format.parse().unwrap_or(LogFormat::Compact);
        LoggingConfig::with_level(&self.log_level, format)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Startup error: {0}")]
    Startup(#[from] EdprepError),

    #[error("Store initialisation error: {0}")]
    Store(#[from] edprep_mentorship::MentorshipError),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;
