//! Certificate loading for the HTTPS listener.
//!
//! Reads a PEM certificate chain and a PEM private key (PKCS#8, PKCS#1 or
//! SEC1) and builds a rustls server config that offers HTTP/2 and HTTP/1.1
//! over ALPN.  The ring provider is passed explicitly, so no process-wide
//! crypto provider has to be installed first.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use thiserror::Error;
use tracing::info;

use crate::domain::config::TlsPaths;

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificate found in {0}")]
    NoCertificate(PathBuf),

    #[error("no private key found in {0}")]
    NoPrivateKey(PathBuf),

    #[error("invalid TLS material: {0}")]
    Rustls(#[from] rustls::Error),
}

/// Loads `paths` into a config ready for [`serve_tls`](super::http::serve_tls).
///
/// # Errors
///
/// Returns [`TlsError`] if either file is unreadable or empty of PEM items,
/// or if rustls rejects the certificate/key pair.
pub fn load_tls_config(paths: &TlsPaths) -> Result<RustlsConfig, TlsError> {
    let certs = read_certs(&paths.cert)?;
    let key = read_key(&paths.key)?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    info!(
        cert = %paths.cert.display(),
        key = %paths.key.display(),
        "TLS configured"
    );
    Ok(RustlsConfig::from_config(Arc::new(config)))
}

fn read_pem(path: &Path) -> Result<Vec<u8>, TlsError> {
    fs::read(path).map_err(|source| TlsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let pem = read_pem(path)?;
    let certs = rustls_pemfile::certs(&mut pem.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificate(path.to_path_buf()));
    }
    Ok(certs)
}

fn read_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let pem = read_pem(path)?;
    rustls_pemfile::private_key(&mut pem.as_slice())
        .map_err(|source| TlsError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TlsError::NoPrivateKey(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes a fresh self-signed pair for `localhost` into a temp dir.
    fn write_pair() -> (PathBuf, TlsPaths) {
        let dir = std::env::temp_dir().join(format!("comment-tls-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let paths = TlsPaths {
            cert: dir.join("cert.pem"),
            key: dir.join("key.pem"),
        };
        fs::write(&paths.cert, certified.cert.pem()).unwrap();
        fs::write(&paths.key, certified.key_pair.serialize_pem()).unwrap();
        (dir, paths)
    }

    #[test]
    fn test_loads_self_signed_pair() {
        // Arrange
        let (dir, paths) = write_pair();

        // Act
        let result = load_tls_config(&paths);

        // Assert
        assert!(result.is_ok());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_cert_file_is_io_error() {
        let (dir, mut paths) = write_pair();
        paths.cert = dir.join("absent.pem");

        let result = load_tls_config(&paths);

        assert!(matches!(result, Err(TlsError::Io { path, .. }) if path == paths.cert));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_key_file_without_key_is_rejected() {
        let (dir, mut paths) = write_pair();
        // A certificate where the key should be.
        paths.key = paths.cert.clone();

        let result = load_tls_config(&paths);

        assert!(matches!(result, Err(TlsError::NoPrivateKey(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_cert_file_without_cert_is_rejected() {
        let (dir, mut paths) = write_pair();
        paths.cert = paths.key.clone();

        let result = load_tls_config(&paths);

        assert!(matches!(result, Err(TlsError::NoCertificate(_))));
        fs::remove_dir_all(&dir).unwrap();
    }
}
