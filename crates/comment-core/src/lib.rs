//! # comment-core
//!
//! Shared library for the comment board containing the comment domain types,
//! the form-field serializer used by the submitting client, pagination, and
//! the in-memory comment store used by the server.
//!
//! This crate is used by both the server and the client.  It has no
//! dependencies on HTTP frameworks, sockets, or terminals.
//!
//! # Architecture overview (for beginners)
//!
//! A browser-style form collects a `name` and a `text`.  When the user
//! presses submit, the client turns the form fields into a JSON object, adds a
//! `utc` timestamp, and posts it to the server.  The server validates the
//! payload, assigns an id, stores the comment, and renders the stored
//! comments as HTML pages.
//!
//! - **`domain`** – Pure types: [`Comment`], [`NewComment`], [`FormFields`]
//!   and [`Pagination`].  No I/O.
//!
//! - **`store`** – [`CommentStore`], a cheaply cloneable handle to the shared
//!   in-memory map of comments.

pub mod domain;
pub mod store;

// Re-export the most-used types at the crate root so callers can write
// `comment_core::Comment` instead of `comment_core::domain::comment::Comment`.
pub use domain::comment::{Comment, CommentError, NewComment};
pub use domain::form::{format_timestamp, parse_field, FieldError, FormFields, TIMESTAMP_FIELD};
pub use domain::page::{Page, Pagination, DEFAULT_PAGE_LIMIT};
pub use store::{CommentStore, StoreError};
