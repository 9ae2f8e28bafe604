//! Infrastructure layer for comment-client.
//!
//! # Responsibilities
//!
//! - Sending the payload over HTTP (`http_sender`)
//! - Presenting the form on a terminal (`terminal_view`)
//! - A recording view for tests (`mock`)

pub mod http_sender;
pub mod mock;
pub mod terminal_view;

pub use http_sender::HttpPayloadSender;
pub use terminal_view::TerminalFormView;
