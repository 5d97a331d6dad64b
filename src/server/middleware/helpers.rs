//! Helper functions for middleware

use crate::auth::AuthMethod;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Extract tenant credentials from headers
///
/// A bearer token wins over the API key header, but only when bearer
/// tokens are enabled; otherwise the Authorization header is ignored.
pub fn extract_auth_method(
    headers: &HeaderMap,
    api_key_header: &str,
    bearer_enabled: bool,
) -> AuthMethod {
    if bearer_enabled {
        if let Some(token) = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
        {
            return AuthMethod::Jwt(token.to_string());
        }
    }

    if let Some(key) = headers
        .get(api_key_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
    {
        return AuthMethod::ApiKey(key.to_string());
    }

    AuthMethod::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        map
    }

    #[test]
    fn test_api_key_header() {
        let map = headers(&[("x-api-key", "test-api-key-12345")]);
        assert_eq!(
            extract_auth_method(&map, "x-api-key", false),
            AuthMethod::ApiKey("test-api-key-12345".to_string())
        );
    }

    #[test]
    fn test_custom_api_key_header() {
        let map = headers(&[("x-tenant-key", "abc")]);
        assert_eq!(
            extract_auth_method(&map, "x-tenant-key", false),
            AuthMethod::ApiKey("abc".to_string())
        );
        assert_eq!(
            extract_auth_method(&map, "x-api-key", false),
            AuthMethod::None
        );
    }

    #[test]
    fn test_bearer_preferred_when_enabled() {
        let map = headers(&[("authorization", "Bearer tok"), ("x-api-key", "abc")]);
        assert_eq!(
            extract_auth_method(&map, "x-api-key", true),
            AuthMethod::Jwt("tok".to_string())
        );
    }

    #[test]
    fn test_bearer_ignored_when_disabled() {
        let map = headers(&[("authorization", "Bearer tok")]);
        assert_eq!(
            extract_auth_method(&map, "x-api-key", false),
            AuthMethod::None
        );
    }

    #[test]
    fn test_empty_key_is_absent() {
        let map = headers(&[("x-api-key", "  ")]);
        assert_eq!(
            extract_auth_method(&map, "x-api-key", true),
            AuthMethod::None
        );
    }
}
