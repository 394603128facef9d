//! The field binding contract
//!
//! A [`FieldBinding`] is the flattened, render-ready view of a field:
//! everything an input widget needs to display itself, with no handle back
//! into the engine. Bindings are snapshots — ask the field controller for
//! a fresh one after each mutation.

use crate::state::FieldState;
use serde::Serialize;
use serde_json::Value;

/// Render-ready snapshot of a field, produced by
/// [`FieldController::binding`](crate::field::FieldController::binding).
#[derive(Debug, Clone, Serialize)]
pub struct FieldBinding {
    /// The field's name, if it has one. Always set for form-bound fields.
    pub name: Option<String>,
    /// The current value.
    pub value: Value,
    /// Messages of every failing rule, in rule declaration order.
    pub errors: Vec<String>,
    /// `errors` is non-empty.
    pub has_error: bool,
    /// The field has lost focus at least once.
    pub touched: bool,
    /// The value differs from the registration/reset baseline.
    pub dirty: bool,
    /// The field is disabled.
    pub disabled: bool,
    /// The field is read-only.
    pub read_only: bool,
    /// The field is required.
    pub required: bool,
}

impl FieldBinding {
    /// Flatten a field state snapshot plus static presentation flags into
    /// a binding.
    #[must_use]
    pub fn from_state(
        name: Option<String>,
        state: &FieldState,
        disabled: bool,
        read_only: bool,
        required: bool,
    ) -> Self {
        Self {
            name,
            value: state.value.clone(),
            has_error: !state.errors.is_empty(),
            errors: state.errors.clone(),
            touched: state.touched,
            dirty: state.dirty,
            disabled,
            read_only,
            required,
        }
    }
}
