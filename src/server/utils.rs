//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::AnalyticsError;
use std::io::ErrorKind;

impl HttpServer {
    /// Turn a bind failure into an actionable error
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> AnalyticsError {
        match error.kind() {
            ErrorKind::AddrInUse => AnalyticsError::server(format!(
                "Port {} is already in use; set ANALYTICS_PORT or server.port (e.g. {})",
                port,
                port.saturating_add(1)
            )),
            ErrorKind::PermissionDenied => AnalyticsError::server(format!(
                "Permission denied for port {}; use a port >= 1024",
                port
            )),
            _ => AnalyticsError::server(format!("Failed to bind to {}: {}", bind_addr, error)),
        }
    }
}
