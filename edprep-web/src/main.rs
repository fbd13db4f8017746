//! EdPrep Web Server
//!
//! Mentorship API for the EdPrep IELTS preparation platform.

use anyhow::Context;
use clap::Parser;
use edprep_core::{init_logging, LoggingConfig};
use edprep_web::server::EdprepServerBuilder;
use edprep_web::WebConfig;

/// EdPrep Web Server - mentor connections, chat and tutoring sessions
#[derive(Parser)]
#[command(name = "edprep-web")]
#[command(about = "HTTP API for EdPrep mentorship")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// Command-line flags win over file and environment
    fn apply(self, mut config: WebConfig) -> WebConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.dev {
            config.dev_mode = true;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let config = match WebConfig::load(args.config.as_deref()) {
        Ok(config) => args.apply(config),
        Err(e) => {
            // Report through the default subscriber so the error id is recorded
            if init_logging(&LoggingConfig::default()).is_ok() {
                e.log();
            }
            return Err(e).context("Failed to load configuration");
        }
    };

    init_logging(&config.logging()).context("Failed to initialise logging")?;

    let server = EdprepServerBuilder::with_config(config)
        .build()
        .await
        .context("Failed to build server")?;

    server.start().await.context("Server failed")?;
    Ok(())
}
