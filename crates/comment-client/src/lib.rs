//! comment-client library crate.
//!
//! The submit handler of a comment form.  When the form is submitted it:
//!
//! 1. disables the submit button,
//! 2. serializes the form fields into a JSON object and stamps a `utc` field,
//! 3. sends the object with the form's method to the form's action URL,
//! 4. on success resets the form and shows a success alert, on failure shows
//!    a failure alert,
//! 5. re-enables the button, whatever the outcome.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! [comment-client]
//!   ├── domain/           FormTarget, SubmitConfig
//!   ├── application/      SubmitFormUseCase over the FormView and
//!   │                     PayloadSender traits
//!   └── infrastructure/
//!         ├── http_sender/    reqwest implementation of PayloadSender
//!         ├── terminal_view/  FormView for the command line
//!         └── mock/           recording FormView for tests
//! ```
//!
//! The use case only sees traits, so the same submit logic can sit behind a
//! terminal, a GUI toolkit, or a test double.

pub mod domain;

pub mod application;

pub mod infrastructure;
