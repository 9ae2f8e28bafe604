//! Domain layer for comment-core.
//!
//! Everything in here is plain data plus pure functions: no locks, no
//! sockets, no clocks.  Functions that need the current time take it as a
//! parameter so tests can pin it.

pub mod comment;
pub mod form;
pub mod page;
