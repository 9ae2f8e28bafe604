//! Domain layer for comment-client.
//!
//! Holds where a form submits to and how long the client waits.  No I/O.

pub mod target;

pub use target::{FormTarget, SubmitConfig, TargetError, DEFAULT_TIMEOUT};
