//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::GatewayError;

impl HttpServer {
    /// Format a user-friendly error message for port binding failures
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GatewayError {
        match error.kind() {
            std::io::ErrorKind::AddrInUse => GatewayError::config(format!(
                "Port {} is already in use; set server.port or SAFENOTE_PORT (e.g. {})",
                port,
                port.saturating_add(1)
            )),
            std::io::ErrorKind::PermissionDenied => GatewayError::config(format!(
                "Permission denied for port {}; use a port >= 1024",
                port
            )),
            _ => GatewayError::config(format!("Failed to bind to {}: {}", bind_addr, error)),
        }
    }
}
