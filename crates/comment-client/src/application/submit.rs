//! SubmitFormUseCase: the comment form's submit handler.
//!
//! # Sequence
//!
//! ```text
//! submit()
//!   ├─ gate closed?  ──────────────────────────────► Busy (no side effects)
//!   ├─ view.set_submit_enabled(false)
//!   ├─ payload = view.fields() + utc
//!   ├─ sender.send(target, payload), bounded by config.timeout
//!   │    ├─ Ok  → view.reset_form(); view.alert(success)
//!   │    └─ Err → view.alert(failure)   (including Timeout)
//!   └─ view.set_submit_enabled(true)     (always, via SubmitGuard)
//! ```
//!
//! The disabled button doubles as the mutual-exclusion gate: while one
//! request is in flight, further `submit()` calls return
//! [`SubmitOutcome::Busy`] without touching the view or the network.
//!
//! # Architecture
//!
//! The use case depends only on the [`FormView`] and [`PayloadSender`] traits.
//! Infrastructure implementations are injected at construction time, making
//! the whole sequence unit-testable without a network or a UI.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use comment_core::FormFields;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::target::{FormTarget, SubmitConfig};

/// Reasons a request fails.
///
/// The user only ever sees one failure alert; the variants exist so the log
/// says what actually happened.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("server answered with status {0}")]
    Status(u16),

    /// A 2xx answer whose body was not JSON.
    #[error("response is not valid JSON: {0}")]
    InvalidResponse(String),

    /// The request could not be built (e.g. a method the HTTP stack refuses).
    #[error("could not build request: {0}")]
    InvalidRequest(String),
}

/// Result of one call to [`SubmitFormUseCase::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The server accepted the payload; carries its JSON answer.
    Submitted(Value),
    /// The request failed; the failure alert has been shown.
    Failed(SubmitError),
    /// Another submission was still in flight; nothing was done.
    Busy,
}

/// The form as the submit handler sees it.
///
/// A GUI binding implements this over real widgets; the terminal and test
/// implementations live in `infrastructure`.
pub trait FormView: Send + Sync {
    /// Current control values in form order.
    fn fields(&self) -> FormFields;

    /// Enables or disables the submit button.
    fn set_submit_enabled(&self, enabled: bool);

    /// Clears every control back to its initial state.
    fn reset_form(&self);

    /// Shows a blocking message to the user.
    fn alert(&self, message: &str);
}

/// Sends a serialized form payload and returns the parsed JSON response.
///
/// Implementations must treat a non-2xx status and an unparsable body as
/// errors, and must bound the request with a timeout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayloadSender: Send + Sync {
    async fn send(
        &self,
        target: &FormTarget,
        payload: &Map<String, Value>,
    ) -> Result<Value, SubmitError>;
}

/// Re-enables the button and reopens the gate when dropped.
///
/// Dropping covers every exit from `submit`, including the future itself
/// being dropped mid-request.
struct SubmitGuard<'a> {
    view: &'a dyn FormView,
    in_flight: &'a AtomicBool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.view.set_submit_enabled(true);
        self.in_flight.store(false, Ordering::Release);
    }
}

/// Submit handler bound to one form.
pub struct SubmitFormUseCase {
    view: Arc<dyn FormView>,
    sender: Arc<dyn PayloadSender>,
    target: FormTarget,
    config: SubmitConfig,
    in_flight: AtomicBool,
}

impl SubmitFormUseCase {
    pub fn new(
        view: Arc<dyn FormView>,
        sender: Arc<dyn PayloadSender>,
        target: FormTarget,
        config: SubmitConfig,
    ) -> Self {
        Self {
            view,
            sender,
            target,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn target(&self) -> &FormTarget {
        &self.target
    }

    /// Whether a submission is currently in flight (the button is disabled).
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handles one submit event.
    pub async fn submit(&self) -> SubmitOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submit ignored: a submission is already in flight");
            return SubmitOutcome::Busy;
        }

        self.view.set_submit_enabled(false);
        let _guard = SubmitGuard {
            view: self.view.as_ref(),
            in_flight: &self.in_flight,
        };

        let payload = self.view.fields().to_payload(Utc::now());
        debug!(
            method = self.target.method(),
            url = %self.target.url(),
            fields = payload.len(),
            "sending form payload"
        );

        let sent = tokio::time::timeout(
            self.config.timeout,
            self.sender.send(&self.target, &payload),
        )
        .await
        .unwrap_or(Err(SubmitError::Timeout(self.config.timeout)));

        match sent {
            Ok(response) => {
                info!(url = %self.target.url(), "form submitted");
                self.view.reset_form();
                self.view.alert(&self.config.success_message);
                SubmitOutcome::Submitted(response)
            }
            Err(e) => {
                warn!(url = %self.target.url(), "form submission failed: {e}");
                self.view.alert(&self.config.failure_message);
                SubmitOutcome::Failed(e)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
