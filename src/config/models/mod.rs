//! Configuration data models
//!
//! This module defines all configuration structures used by the service.

pub mod app;
pub mod auth;
pub mod rate_limit;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use app::*;
pub use auth::*;
pub use rate_limit::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3001
}

pub fn default_database_url() -> String {
    "sqlite://data/analytics.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_api_key_header() -> String {
    "x-api-key".to_string()
}

/// Default ingest quota per tenant
pub fn default_events_per_minute() -> u32 {
    10
}

pub(crate) fn default_true() -> bool {
    true
}
