//! EdPrep Web Server
//!
//! Binds the listener and serves the router until Ctrl-C.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

pub struct EdprepServer {
    config: WebConfig,
    state: AppState,
}

impl EdprepServer {
    /// Create a server over the seeded store
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;

        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting EdPrep web server");
        info!("Development mode: {}", self.config.dev_mode);
        if self.config.uses_default_secret() && !self.config.dev_mode {
            warn!("Signing tokens with the built-in development secret; set EDPREP_JWT_SECRET");
        }

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        info!("Server shut down");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Builder for EdprepServer
pub struct EdprepServerBuilder {
    config: WebConfig,
}

impl EdprepServerBuilder {
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Start from a loaded configuration
    pub fn with_config(config: WebConfig) -> Self {
        Self { config }
    }

    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    pub fn jwt_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    /// Build the server
    pub async fn build(self) -> WebResult<EdprepServer> {
        EdprepServer::new(self.config).await
    }
}

impl Default for EdprepServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
