//! Tenant authentication configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Minimum length of the bearer token signing secret
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the tenant API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// HS256 secret for bearer tokens; bearer auth is off when unset
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key_header: default_api_key_header(),
            jwt_secret: None,
        }
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.api_key_header != default_api_key_header() {
            self.api_key_header = other.api_key_header;
        }
        if other.jwt_secret.is_some() {
            self.jwt_secret = other.jwt_secret;
        }
        self
    }

    /// Whether bearer tokens are accepted
    pub fn bearer_enabled(&self) -> bool {
        self.jwt_secret.is_some()
    }

    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key_header.trim().is_empty() {
            return Err("API key header cannot be empty".to_string());
        }
        if let Some(secret) = &self.jwt_secret {
            if secret.len() < MIN_JWT_SECRET_LEN {
                return Err(format!(
                    "JWT secret must be at least {} characters",
                    MIN_JWT_SECRET_LEN
                ));
            }
        }
        Ok(())
    }
}

/// Log configurations that are valid but unwise
pub fn warn_insecure_config(config: &AuthConfig) {
    if !config.bearer_enabled() {
        warn!("Bearer token authentication disabled; tenants authenticate by API key only");
    }
}
