//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::QualityError;

impl HttpServer {
    /// Format a readable error message for port binding failures
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> QualityError {
        let error_str = error.to_string();

        if error.kind() == std::io::ErrorKind::AddrInUse
            || error_str.contains("Address already in use")
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            let message = format!(
                r#"
Port {} is already in use.

  Stop the process holding it:   lsof -ti:{} | xargs kill
  Or pick another port:          --port {} (QUALITY_PORT={})
"#,
                port,
                port,
                port.saturating_add(1),
                port.saturating_add(1),
            );
            QualityError::server(message)
        } else if error.kind() == std::io::ErrorKind::PermissionDenied
            || error_str.contains("Permission denied")
            || error_str.contains("os error 13")
        {
            let message = format!(
                r#"
Permission denied for port {}.

  Use a non-privileged port (>= 1024):   --port 8000
"#,
                port
            );
            QualityError::server(message)
        } else {
            QualityError::server(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
