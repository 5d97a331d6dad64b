//! Tenant extractor for route handlers

use super::TenantAuthKind;
use crate::server::middleware::helpers::extract_auth_method;
use crate::server::state::AppState;
use crate::utils::error::{AnalyticsError, Result};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

/// The tenant a request acts on behalf of
///
/// Handlers that take this extractor are unreachable without valid tenant
/// credentials; every storage call they make is scoped to `tenant_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedTenant {
    pub tenant_id: Uuid,
    pub method: TenantAuthKind,
}

impl FromRequest for AuthenticatedTenant {
    type Error = AnalyticsError;
    type Future = LocalBoxFuture<'static, Result<Self>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let method = state.as_ref().map(|state| {
            extract_auth_method(
                req.headers(),
                state.auth.api_key_header(),
                state.auth.bearer_enabled(),
            )
        });

        Box::pin(async move {
            let (Some(state), Some(method)) = (state, method) else {
                return Err(AnalyticsError::internal("Application state not configured"));
            };
            state.auth.authenticate(method).await
        })
    }
}
