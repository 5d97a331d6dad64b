//! Application state shared across HTTP handlers

use crate::auth::{AuthSystem, TenantRateLimiter};
use crate::config::Config;
use crate::core::analytics::AnalyticsEngine;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloned into every worker; all fields are cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Tenant authentication
    pub auth: Arc<AuthSystem>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Summary and dashboard computation
    pub analytics: AnalyticsEngine,
    /// Per-tenant ingest throttle
    pub rate_limiter: TenantRateLimiter,
}

impl AppState {
    /// Wire the shared resources around a connected storage layer
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let storage = Arc::new(storage);
        let auth = AuthSystem::new(config.auth(), storage.clone());
        let analytics = AnalyticsEngine::new(storage.event_repository());
        let rate_limiter = TenantRateLimiter::new(config.rate_limit().events_per_minute);

        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage,
            analytics,
            rate_limiter,
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
