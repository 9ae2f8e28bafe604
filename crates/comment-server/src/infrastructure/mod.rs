//! Infrastructure layer for comment-server.
//!
//! # Responsibilities
//!
//! - Binding the HTTP listener and serving the axum router
//! - Translating handler failures into status codes
//! - Reading the optional TOML configuration file
//! - Loading the certificate and key for HTTPS
//! - Handling the graceful shutdown signal
//!
//! Rendering lives in the application layer; configuration defaults live in
//! the domain layer.

pub mod error;
pub mod http;
pub mod storage;
pub mod tls;

pub use error::AppError;
pub use http::{build_router, run_server, serve, serve_tls, shutdown_signal, AppState};
pub use tls::{load_tls_config, TlsError};
