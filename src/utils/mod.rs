//! Utility modules for the analytics service
//!
//! - **error**: Error types and HTTP error mapping
//! - **logging**: Tracing subscriber setup and log-safe helpers

pub mod error;
pub mod logging;
