//! # keyauth-api: Binary Entry Point
//!
//! Starts the Axum HTTP server. Options come from an optional JSON file,
//! then individual flags (or their environment variables) override it.

use std::path::PathBuf;

use clap::Parser;

use keyauth_api::state::{AppConfig, AppState};
use keyauth_core::QueryAuthOptions;

/// Query-string key authentication server.
#[derive(Parser, Debug)]
#[command(name = "keyauth-api", version, about)]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// JSON file with scheme options.
    #[arg(long, env = "KEYAUTH_CONFIG")]
    config: Option<PathBuf>,

    /// Query-string parameter carrying the key.
    #[arg(long, env = "KEYAUTH_QUERY_PARAM")]
    query_param: Option<String>,

    /// Claim type the key is recorded under.
    #[arg(long, env = "KEYAUTH_CLAIM_TYPE")]
    claim_type: Option<String>,

    /// Scheme name to register under.
    #[arg(long, env = "KEYAUTH_SCHEME")]
    scheme: Option<String>,
}

impl Cli {
    fn options(&self) -> Result<QueryAuthOptions, keyauth_core::ConfigError> {
        let mut options = match &self.config {
            Some(path) => AppConfig::load_options(path)?,
            None => QueryAuthOptions::default(),
        };
        if let Some(name) = &self.query_param {
            options.query_param_name = name.clone();
        }
        if let Some(claim_type) = &self.claim_type {
            options.claim_type = claim_type.clone();
        }
        if let Some(scheme) = &self.scheme {
            options.scheme_name = scheme.clone();
        }
        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options = cli.options().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;

    let config = AppConfig::with_options(cli.port, options);
    tracing::info!(?config, "configuration loaded");

    let app = keyauth_api::app(AppState::with_config(config))?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!("KeyAuth API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
