//! Server runtime configuration.
//!
//! [`ServerConfig`] is built once at startup from command-line arguments, the
//! optional TOML file and these defaults, then passed by value into
//! [`run_server`](crate::infrastructure::run_server).  Nothing in here reads
//! the environment or the file system.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// PEM files for serving HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    /// Certificate chain, leaf first.
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// All runtime settings for the HTTP server.
///
/// # Example
///
/// ```rust
/// use comment_server::domain::ServerConfig;
///
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 3000);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address and port the HTTP listener binds to.
    pub bind_addr: SocketAddr,

    /// Upper bound on handling a single request.  Requests that exceed it are
    /// answered with `408 Request Timeout`.
    pub request_timeout: Duration,

    /// How long in-flight connections may keep running after a shutdown
    /// signal before they are dropped.
    pub shutdown_grace: Duration,

    /// Serve HTTPS with these files instead of plain HTTP.
    pub tls: Option<TlsPaths>,
}

impl Default for ServerConfig {
    /// | Field           | Default          |
    /// |-----------------|------------------|
    /// | bind_addr       | `127.0.0.1:3000` |
    /// | request_timeout | 10 seconds       |
    /// | shutdown_grace  | 30 seconds       |
    /// | tls             | none (plain HTTP)|
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            request_timeout: Duration::from_secs(10),
            shutdown_grace: Duration::from_secs(30),
            tls: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_loopback_3000() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_default_request_timeout_is_10s() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_default_shutdown_grace_is_30s() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.shutdown_grace, Duration::from_secs(30));
    }

    #[test]
    fn test_default_is_plain_http() {
        assert!(ServerConfig::default().tls.is_none());
    }
}
