//! # abtest-analytics
//!
//! Multi-tenant A/B testing analytics service. Tenants configure experiments,
//! ingest user events tagged with an experiment variant, and read per-variant
//! conversion metrics.
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use abtest_analytics::{Config, Service};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/analytics.yaml").await?;
//!     let service = Service::new(config).await?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Aggregation only
//!
//! ```rust
//! use abtest_analytics::core::analytics::VariantAggregator;
//!
//! let summary = VariantAggregator::new().summarize(&[], true);
//! assert_eq!(summary.total_events, 0);
//! assert!(summary.variants.is_empty());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::analytics::{AnalyticsEngine, AnalyticsSummary, VariantAggregator, VariantMetrics};
pub use utils::error::{AnalyticsError, Result};

use tracing::info;

/// The analytics HTTP service
pub struct Service {
    server: server::HttpServer,
}

impl Service {
    /// Connect storage and prepare the HTTP server
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating analytics service instance");

        let server = server::HttpServer::new(&config).await?;
        Ok(Self { server })
    }

    /// Run until the server stops
    pub async fn run(self) -> Result<()> {
        info!("Starting analytics service");
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
