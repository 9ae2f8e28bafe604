//! comment-server library crate.
//!
//! Accepts comments submitted as JSON, keeps them in memory, and renders them
//! as HTML pages.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser / comment-client (JSON POST, HTML GET)
//!         ↕
//! [comment-server]
//!   ├── domain/           ServerConfig
//!   ├── application/      HTML rendering of pages
//!   └── infrastructure/
//!         ├── http/       axum router, handlers, serve loop
//!         ├── error/      AppError → HTTP status mapping
//!         ├── tls/        PEM certificate and key loading
//!         └── storage/    TOML configuration file
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no framework types.
//! - `application` depends on `domain` and `comment-core` only.
//! - `infrastructure` depends on all other layers plus `axum` and `tokio`.

/// Domain layer: server configuration.
pub mod domain;

/// Application layer: page rendering.
pub mod application;

/// Infrastructure layer: HTTP server and configuration file.
pub mod infrastructure;
