//! HTTP middleware implementations
//!
//! - Request ID tracking
//! - Tenant credential extraction helpers

pub mod helpers;
mod request_id;

pub use helpers::extract_auth_method;
pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, RequestIdMiddlewareService};
