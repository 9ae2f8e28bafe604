//! Application layer for comment-server.
//!
//! Turns comments into HTML.  Functions here are pure: they take domain
//! values and return strings, leaving HTTP concerns to the infrastructure
//! layer.

pub mod render;

pub use render::{render_comment, render_index};
