//! Bearer token handling
//!
//! Tokens are HS256 JWTs whose claims name the tenant they act for.

mod handler;
pub mod types;


pub use types::{JwtHandler, TenantClaims};
