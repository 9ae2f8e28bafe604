//! Comment server entry point.
//!
//! Accepts comments posted as JSON by the comment form and serves them back
//! as HTML pages.
//!
//! # Usage
//!
//! ```text
//! comment-server [OPTIONS]
//!
//! Options:
//!   --bind             <IP>    Address to bind [default: 127.0.0.1]
//!   --port             <PORT>  Listener port [default: 3000]
//!   --request-timeout  <SECS>  Per-request timeout [default: 10]
//!   --shutdown-grace   <SECS>  Drain period after a shutdown signal [default: 30]
//!   --config           <PATH>  Optional TOML configuration file
//!   --tls-cert         <PATH>  PEM certificate chain; enables HTTPS with --tls-key
//!   --tls-key          <PATH>  PEM private key
//! ```
//!
//! # Precedence
//!
//! Command-line argument, then environment variable, then the TOML file, then
//! the built-in default.
//!
//! | Variable                  | Option              |
//! |---------------------------|---------------------|
//! | `COMMENT_BIND`            | `--bind`            |
//! | `COMMENT_PORT`            | `--port`            |
//! | `COMMENT_REQUEST_TIMEOUT` | `--request-timeout` |
//! | `COMMENT_SHUTDOWN_GRACE`  | `--shutdown-grace`  |
//! | `COMMENT_CONFIG`          | `--config`          |
//! | `COMMENT_TLS_CERT`        | `--tls-cert`        |
//! | `COMMENT_TLS_KEY`         | `--tls-key`         |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use comment_server::domain::{ServerConfig, TlsPaths};
use comment_server::infrastructure::storage::{load_config, FileConfig};
use comment_server::infrastructure::{run_server, shutdown_signal};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Comment board HTTP server.
#[derive(Debug, Parser)]
#[command(
    name = "comment-server",
    about = "Stores submitted comments and renders them as HTML",
    version
)]
struct Cli {
    /// IP address to bind the HTTP listener to.
    #[arg(long, env = "COMMENT_BIND")]
    bind: Option<String>,

    /// TCP port for the HTTP listener.
    #[arg(long, env = "COMMENT_PORT")]
    port: Option<u16>,

    /// Per-request timeout in seconds; slower requests get `408`.
    #[arg(long, env = "COMMENT_REQUEST_TIMEOUT")]
    request_timeout: Option<u64>,

    /// Seconds to let open connections drain after Ctrl+C or SIGTERM.
    #[arg(long, env = "COMMENT_SHUTDOWN_GRACE")]
    shutdown_grace: Option<u64>,

    /// Path to an optional TOML configuration file.
    #[arg(long, env = "COMMENT_CONFIG")]
    config: Option<PathBuf>,

    /// PEM certificate chain.  Together with `--tls-key`, serves HTTPS.
    #[arg(long, env = "COMMENT_TLS_CERT")]
    tls_cert: Option<PathBuf>,

    /// PEM private key matching `--tls-cert`.
    #[arg(long, env = "COMMENT_TLS_KEY")]
    tls_key: Option<PathBuf>,
}

impl Cli {
    /// Merges the parsed arguments over `file` into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting bind address is not a valid IP, or if
    /// only one of the TLS certificate and key is configured.
    fn into_server_config(self, file: &FileConfig) -> anyhow::Result<ServerConfig> {
        let tls = match (
            self.tls_cert.or_else(|| file.server.tls_cert.clone()),
            self.tls_key.or_else(|| file.server.tls_key.clone()),
        ) {
            (Some(cert), Some(key)) => Some(TlsPaths { cert, key }),
            (None, None) => None,
            _ => bail!("a TLS certificate and key must be configured together"),
        };

        let bind = self.bind.unwrap_or_else(|| file.server.bind_address.clone());
        let port = self.port.unwrap_or(file.server.port);

        let bind_addr: SocketAddr = format!("{bind}:{port}")
            .parse()
            .with_context(|| format!("invalid bind address: '{bind}:{port}'"))?;

        Ok(ServerConfig {
            bind_addr,
            request_timeout: Duration::from_secs(
                self.request_timeout
                    .unwrap_or(file.server.request_timeout_secs),
            ),
            shutdown_grace: Duration::from_secs(
                self.shutdown_grace.unwrap_or(file.server.shutdown_grace_secs),
            ),
            tls,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => FileConfig::default(),
    };

    // `RUST_LOG` wins; otherwise the file's log level (default `info`).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&file.server.log_level)),
        )
        .init();

    let config = cli.into_server_config(&file)?;

    info!(
        bind = %config.bind_addr,
        request_timeout = ?config.request_timeout,
        tls = config.tls.is_some(),
        "comment server starting"
    );

    run_server(config, shutdown_signal()).await?;

    info!("comment server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
