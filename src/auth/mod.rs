//! Tenant authentication
//!
//! Every tenant-scoped request is resolved to a tenant id, either from a
//! bearer token or from the tenant's API key.

pub mod guard;
pub mod jwt;
pub mod rate_limit;

pub use guard::AuthenticatedTenant;
pub use rate_limit::TenantRateLimiter;

use crate::config::AuthConfig;
use crate::storage::StorageLayer;
use crate::utils::error::{AnalyticsError, Result};
use crate::utils::logging::fingerprint;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Credentials presented by a caller
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Bearer token
    Jwt(String),
    /// Tenant API key
    ApiKey(String),
    /// No authentication
    None,
}

impl AuthMethod {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AuthMethod::Jwt(_) => "jwt",
            AuthMethod::ApiKey(_) => "api_key",
            AuthMethod::None => "none",
        }
    }
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::Jwt(token) => write!(f, "Jwt({})", fingerprint(token)),
            AuthMethod::ApiKey(key) => write!(f, "ApiKey({})", fingerprint(key)),
            AuthMethod::None => f.write_str("None"),
        }
    }
}

/// How a tenant was identified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantAuthKind {
    Jwt,
    ApiKey,
}

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage layer for tenant lookups
    storage: Arc<StorageLayer>,
    /// JWT handler, present when a signing secret is configured
    jwt: Option<Arc<jwt::JwtHandler>>,
}

impl std::fmt::Debug for AuthSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSystem")
            .field("api_key_header", &self.config.api_key_header)
            .field("bearer_enabled", &self.jwt.is_some())
            .finish()
    }
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Self {
        let jwt = config
            .jwt_secret
            .as_deref()
            .map(|secret| Arc::new(jwt::JwtHandler::new(secret)));

        Self {
            config: Arc::new(config.clone()),
            storage,
            jwt,
        }
    }

    /// Header carrying the tenant API key
    pub fn api_key_header(&self) -> &str {
        &self.config.api_key_header
    }

    /// Whether bearer tokens are accepted
    pub fn bearer_enabled(&self) -> bool {
        self.jwt.is_some()
    }

    /// JWT handler, when bearer tokens are enabled
    pub fn jwt(&self) -> Option<&jwt::JwtHandler> {
        self.jwt.as_deref()
    }

    /// Resolve presented credentials to a tenant
    pub async fn authenticate(&self, method: AuthMethod) -> Result<AuthenticatedTenant> {
        match method {
            AuthMethod::Jwt(token) => {
                let Some(jwt) = &self.jwt else {
                    return Err(AnalyticsError::unauthorized(
                        "Tenant identification required",
                    ));
                };

                let claims = jwt.verify_token(&token).map_err(|e| {
                    warn!("Bearer token rejected ({}): {}", fingerprint(&token), e);
                    e
                })?;

                debug!("Tenant {} authenticated by bearer token", claims.tenant_id);
                Ok(AuthenticatedTenant {
                    tenant_id: claims.tenant_id,
                    method: TenantAuthKind::Jwt,
                })
            }
            AuthMethod::ApiKey(key) => {
                let tenant = self.storage.db().find_tenant_by_api_key(&key).await?;
                let Some(tenant) = tenant else {
                    warn!("Unknown API key presented ({})", fingerprint(&key));
                    return Err(AnalyticsError::unauthorized("Invalid API key"));
                };

                debug!("Tenant {} authenticated by API key", tenant.id);
                Ok(AuthenticatedTenant {
                    tenant_id: tenant.id,
                    method: TenantAuthKind::ApiKey,
                })
            }
            AuthMethod::None => {
                debug!("Request without tenant credentials");
                Err(AnalyticsError::unauthorized(
                    "Tenant identification required",
                ))
            }
        }
    }

    /// Issue a bearer token for a tenant
    pub fn issue_token(&self, tenant_id: Uuid, ttl_secs: u64) -> Result<String> {
        let jwt = self
            .jwt
            .as_ref()
            .ok_or_else(|| AnalyticsError::config("Bearer tokens are not enabled"))?;
        jwt.create_token("tenant", tenant_id, ttl_secs)
    }
}
