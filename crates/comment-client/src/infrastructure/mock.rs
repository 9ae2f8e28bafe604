//! Recording form view for tests.
//!
//! # Why a mock view?
//!
//! A real form view drives widgets and pops up dialogs that block until a
//! person dismisses them.  [`MockFormView`] replaces all of that with
//! in-memory recording so assertions can check exactly which side effects
//! happened and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let view = Arc::new(MockFormView::with_fields(fields));
//! let use_case = SubmitFormUseCase::new(view.clone(), sender, target, config);
//!
//! use_case.submit().await;
//!
//! assert_eq!(view.button_history(), vec![false, true]);
//! assert_eq!(view.reset_count(), 1);
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use comment_core::FormFields;

use crate::application::submit::FormView;

/// A form view that records every call instead of touching a UI.
///
/// Fields are stored behind `Mutex`/atomics so the view can be shared across
/// tasks in an `Arc`, the same way the use case holds it.
#[derive(Debug)]
pub struct MockFormView {
    fields: Mutex<FormFields>,
    enabled: AtomicBool,
    /// Every value passed to `set_submit_enabled`, in call order.
    button_history: Mutex<Vec<bool>>,
    resets: AtomicUsize,
    alerts: Mutex<Vec<String>>,
}

impl Default for MockFormView {
    fn default() -> Self {
        Self {
            fields: Mutex::new(FormFields::new()),
            enabled: AtomicBool::new(true),
            button_history: Mutex::new(Vec::new()),
            resets: AtomicUsize::new(0),
            alerts: Mutex::new(Vec::new()),
        }
    }
}

impl MockFormView {
    /// Creates an empty view with the button enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a view pre-filled with `fields`.
    pub fn with_fields(fields: FormFields) -> Self {
        let view = Self::default();
        view.set_fields(fields);
        view
    }

    /// Replaces the current control values, as a user typing would.
    pub fn set_fields(&self, fields: FormFields) {
        *lock(&self.fields) = fields;
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn button_history(&self) -> Vec<bool> {
        lock(&self.button_history).clone()
    }

    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::Acquire)
    }

    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

impl FormView for MockFormView {
    fn fields(&self) -> FormFields {
        lock(&self.fields).clone()
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        lock(&self.button_history).push(enabled);
    }

    fn reset_form(&self) {
        lock(&self.fields).clear();
        self.resets.fetch_add(1, Ordering::AcqRel);
    }

    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }
}

// A panicking test thread poisons the mutex; later readers still want the data.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
