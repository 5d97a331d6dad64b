//! Top-level service configuration

use super::*;
use crate::utils::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Service configuration as read from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Defaults overridden by values from `lookup`
    ///
    /// `lookup` maps an environment variable name to its value.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("ANALYTICS_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "ANALYTICS_PORT")? {
            config.server.port = port;
        }
        if let Some(workers) = parse_var(&lookup, "ANALYTICS_WORKERS")? {
            config.server.workers = Some(workers);
        }
        if let Some(prefix) = lookup("ANALYTICS_API_PREFIX") {
            config.server.api_prefix = prefix;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.storage.database.url = url;
        }
        if let Some(max) = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            config.storage.database.max_connections = max;
        }
        if let Some(header) = lookup("API_KEY_HEADER") {
            config.auth.api_key_header = header;
        }
        if let Some(secret) = lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            config.auth.jwt_secret = Some(secret);
        }
        if let Some(limit) = parse_var(&lookup, "EVENTS_PER_MINUTE")? {
            config.rate_limit.events_per_minute = limit;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.auth = self.auth.merge(other.auth);
        self.rate_limit = self.rate_limit.merge(other.rate_limit);
        self
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                AnalyticsError::config(format!("Invalid value for {}: {}", name, e))
            })
        })
        .transpose()
}
