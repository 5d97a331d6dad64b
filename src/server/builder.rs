//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{AnalyticsError, Result};
use std::path::Path;
use tracing::{info, warn};

/// Server builder for easier configuration
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| AnalyticsError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

/// Load configuration from `config_path`, falling back to the environment
pub async fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration file: {}", config_path.display());

    match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration file loaded successfully");
            Ok(config)
        }
        Err(e) => {
            warn!(
                "Configuration file loading failed, using environment configuration: {}",
                e
            );
            Config::from_env()
        }
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server(config_path: &Path) -> Result<()> {
    info!("Starting A/B testing analytics service");

    let config = load_config(config_path).await?;
    let prefix = config.server().route_prefix();

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!(
        "Server starting at: http://{}",
        server.config().address()
    );
    info!("API Endpoints:");
    info!("   GET   {}/health", prefix);
    info!("   POST  {}/experiments", prefix);
    info!("   GET   {}/experiments[/{{id}}]", prefix);
    info!("   PATCH {}/experiments/{{id}}", prefix);
    info!("   POST  {}/events", prefix);
    info!("   GET   {}/analytics/summary", prefix);
    info!("   GET   {}/analytics/dashboard", prefix);

    server.start().await
}
