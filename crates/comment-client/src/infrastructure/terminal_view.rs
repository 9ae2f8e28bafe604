//! Command-line form view.
//!
//! The "form" is the set of `--field name=value` arguments; the "button" is a
//! flag that is logged when it changes; alerts are written to stdout (or any
//! writer) one per line.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use comment_core::FormFields;
use tracing::{debug, warn};

use crate::application::submit::FormView;

pub struct TerminalFormView {
    fields: Mutex<FormFields>,
    enabled: AtomicBool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalFormView {
    /// A view over `fields` that prints alerts to stdout.
    pub fn new(fields: FormFields) -> Self {
        Self::with_writer(fields, Box::new(std::io::stdout()))
    }

    pub fn with_writer(fields: FormFields, out: Box<dyn Write + Send>) -> Self {
        Self {
            fields: Mutex::new(fields),
            enabled: AtomicBool::new(true),
            out: Mutex::new(out),
        }
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl FormView for TerminalFormView {
    fn fields(&self) -> FormFields {
        self.fields
            .lock()
            .map(|f| f.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        debug!(enabled, "submit button state changed");
    }

    fn reset_form(&self) {
        match self.fields.lock() {
            Ok(mut f) => f.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    fn alert(&self, message: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{message}").and_then(|()| out.flush()) {
            warn!("failed to write alert: {e}");
        }
    }
}
