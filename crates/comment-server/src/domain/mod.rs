//! Domain layer for comment-server.
//!
//! Only plain configuration lives here; the comment types themselves come
//! from `comment-core` because the client shares them.

pub mod config;

pub use config::{ServerConfig, TlsPaths};
