//! TOML configuration file for the server.
//!
//! The file is optional.  When present, its values fill in whatever the
//! command line leaves unset; anything missing from both falls back to the
//! defaults below.  Example:
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! port = 8080
//! request_timeout_secs = 10
//! shutdown_grace_secs = 30
//! log_level = "debug"
//! tls_cert = "/etc/comment/cert.pem"
//! tls_key = "/etc/comment/key.pem"
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "...")]`, so a file containing only
//! `[server]` (or nothing at all) is valid and yields [`FileConfig::default()`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level layout of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
}

/// The `[server]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    /// IP address to bind.  `"0.0.0.0"` binds all interfaces.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// PEM certificate chain.  HTTPS needs both this and `tls_key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_cert: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_key: Option<PathBuf>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_shutdown_grace_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
            log_level: default_log_level(),
            tls_cert: None,
            tls_key: None,
        }
    }
}

/// Loads the configuration at `path`, returning [`FileConfig::default()`] if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let cfg: FileConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn test_partial_section_fills_missing_fields() {
        // Arrange
        let text = "[server]\nport = 8080\n";

        // Act
        let cfg: FileConfig = toml::from_str(text).unwrap();

        // Assert
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.bind_address, "127.0.0.1");
        assert_eq!(cfg.server.request_timeout_secs, 10);
        assert_eq!(cfg.server.log_level, "info");
        assert!(cfg.server.tls_cert.is_none());
    }

    #[test]
    fn test_tls_paths_parse() {
        let text = "[server]\ntls_cert = \"/etc/c.pem\"\ntls_key = \"/etc/k.pem\"\n";

        let cfg: FileConfig = toml::from_str(text).unwrap();

        assert_eq!(cfg.server.tls_cert, Some(PathBuf::from("/etc/c.pem")));
        assert_eq!(cfg.server.tls_key, Some(PathBuf::from("/etc/k.pem")));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("comment-cfg-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let result = load_config(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir()
            .join(format!("comment-cfg-missing-{}", uuid::Uuid::new_v4()))
            .join("config.toml");
        assert_eq!(load_config(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn test_load_reads_values_from_disk() {
        let dir = std::env::temp_dir().join(format!("comment-cfg-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "[server]\nbind_address = \"0.0.0.0\"\nshutdown_grace_secs = 5\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();

        assert_eq!(cfg.server.bind_address, "0.0.0.0");
        assert_eq!(cfg.server.shutdown_grace_secs, 5);
        assert_eq!(cfg.server.port, 3000);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
