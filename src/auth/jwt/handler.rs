//! Core JWT handler implementation

use super::types::{JwtHandler, TenantClaims};
use crate::utils::error::{AnalyticsError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler from a shared secret
    pub fn new(secret: &str) -> Self {
        let secret = secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for a tenant valid for `ttl_secs`
    pub fn create_token(&self, subject: &str, tenant_id: Uuid, ttl_secs: u64) -> Result<String> {
        let now = unix_now()?;

        let claims = TenantClaims {
            sub: subject.to_string(),
            tenant_id,
            iat: now,
            exp: now + ttl_secs,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(AnalyticsError::Jwt)?;

        debug!("Created bearer token for tenant: {}", tenant_id);
        Ok(token)
    }

    /// Verify a token and return its claims
    ///
    /// Signature and expiry are both checked.
    pub fn verify_token(&self, token: &str) -> Result<TenantClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<TenantClaims>(token, &self.decoding_key, &validation)
            .map_err(AnalyticsError::Jwt)?;

        Ok(token_data.claims)
    }
}

fn unix_now() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| AnalyticsError::internal(format!("System time error: {}", e)))
}
