//! Error types for the form engine
//!
//! Rule failures are data (a field's error list), never error values. The
//! only failure that crosses the API boundary as an error is a
//! user-supplied submit handler rejecting: `submit_form` re-raises it as
//! [`FormError::Submit`] after clearing the submitting flag, so the form
//! never gets stuck mid-submission. A merely invalid form does not error —
//! it routes to the form's `on_error` callback and resolves normally.

use crate::options::BoxError;
use thiserror::Error;

/// Errors surfaced by the form controller.
#[derive(Debug, Error)]
pub enum FormError {
    /// The user-supplied submit handler failed.
    ///
    /// `is_submitting` is guaranteed to be `false` again by the time this
    /// is returned.
    #[error("submit handler failed: {0}")]
    Submit(#[source] BoxError),
}
