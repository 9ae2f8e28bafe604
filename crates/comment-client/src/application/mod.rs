//! Application layer for comment-client.
//!
//! # Responsibilities
//!
//! - Orchestrating one form submission (`submit`)
//! - Defining the seams the infrastructure plugs into: [`FormView`] for the
//!   UI side effects and [`PayloadSender`] for the request
//! - Defining [`SubmitError`], the request failure type
//!
//! No sockets, no terminal output, no clocks other than stamping the payload.

pub mod submit;

pub use submit::{FormView, PayloadSender, SubmitError, SubmitFormUseCase, SubmitOutcome};
