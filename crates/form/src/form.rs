//! The form controller
//!
//! Aggregates all registered fields into one coherent state snapshot,
//! re-validates on demand, and owns the submission lifecycle. Fields hand
//! every value/touched mutation to the controller, which keeps the four
//! state maps in lock-step, recomputes aggregate validity, and notifies
//! the form-level change subscriber after each mutating call.
//!
//! The controller is an explicit collaborator: field handles receive an
//! `Arc<FormController>` at construction instead of discovering an ambient
//! context.

use crate::error::FormError;
use crate::field::BoundField;
use crate::options::{
    FieldErrorHandler, FieldOptions, FormChangeHandler, FormErrorHandler, FormOptions,
    SubmitHandler, ValidationTriggers,
};
use crate::state::{FieldState, FormState};
use futures::future::join_all;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};
use veld_validator::{RuleSet, Values};

/// What the form keeps per registered field.
struct FieldRegistration {
    rules: RuleSet,
    on_error: Option<FieldErrorHandler>,
}

/// Mutable form state behind the controller's lock.
///
/// The lock is never held across an `.await`; callbacks and rule
/// evaluation run with it released.
struct FormInner {
    values: Values,
    initial_values: Values,
    errors: HashMap<String, Vec<String>>,
    touched: HashMap<String, bool>,
    dirty: HashMap<String, bool>,
    fields: HashMap<String, FieldRegistration>,
    is_valid: bool,
    is_validating: bool,
    is_submitting: bool,
    is_submitted: bool,
}

/// Aggregates registered fields and owns the submission lifecycle.
///
/// # Examples
///
/// ```rust
/// use veld_form::prelude::*;
/// use veld_validator::prelude::*;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let form = FormController::new(FormOptions::new());
/// form.register_field(
///     "email",
///     FieldOptions::new().rules(RuleSet::new().with(required()).with(email())),
/// );
///
/// assert!(!form.validate_form().await);
/// form.set_field_value("email", json!("user@example.com")).await;
/// assert!(form.validate_form().await);
/// # }
/// ```
pub struct FormController {
    triggers: ValidationTriggers,
    on_submit: Option<SubmitHandler>,
    on_change: Option<FormChangeHandler>,
    on_error: Option<FormErrorHandler>,
    inner: RwLock<FormInner>,
}

impl FormController {
    /// Create a form from its options.
    #[must_use]
    pub fn new(options: FormOptions) -> Self {
        let FormOptions {
            initial_values,
            triggers,
            on_submit,
            on_change,
            on_error,
        } = options;

        Self {
            triggers,
            on_submit,
            on_change,
            on_error,
            inner: RwLock::new(FormInner {
                values: initial_values.clone(),
                initial_values,
                errors: HashMap::new(),
                touched: HashMap::new(),
                dirty: HashMap::new(),
                fields: HashMap::new(),
                is_valid: true,
                is_validating: false,
                is_submitting: false,
                is_submitted: false,
            }),
        }
    }

    /// The trigger policy applied to all form-bound fields.
    #[must_use]
    pub fn triggers(&self) -> ValidationTriggers {
        self.triggers
    }

    /// Register a field, seeding its slots in all four state maps.
    ///
    /// The initial value is recorded only if the field's key is not already
    /// present in `values`: re-registering an existing name overwrites the
    /// stored rules and callbacks but never resets an already-set value.
    pub fn register_field(&self, name: impl Into<String>, options: FieldOptions) {
        let name = name.into();
        debug!(field = %name, rules = options.rules.len(), "registering field");
        {
            let mut inner = self.inner.write();
            if !inner.values.contains(&name) {
                inner.values.set(name.clone(), options.initial_value.clone());
                inner
                    .initial_values
                    .set(name.clone(), options.initial_value.clone());
            }
            inner.errors.entry(name.clone()).or_default();
            inner.touched.entry(name.clone()).or_insert(false);
            inner.dirty.entry(name.clone()).or_insert(false);
            inner.fields.insert(
                name,
                FieldRegistration {
                    rules: options.rules,
                    on_error: options.on_error,
                },
            );
            Self::recompute_validity(&mut inner);
        }
        self.notify_change();
    }

    /// Remove a field's registration.
    ///
    /// The field's last-known value, errors, touched, and dirty slots are
    /// deliberately left in place so a later re-mount sees its prior state.
    pub fn unregister_field(&self, name: &str) {
        debug!(field = %name, "unregistering field");
        {
            let mut inner = self.inner.write();
            inner.fields.remove(name);
            Self::recompute_validity(&mut inner);
        }
        self.notify_change();
    }

    /// Bind a named field to this form, registering it in the process.
    ///
    /// The returned handle deregisters itself when dropped.
    #[must_use]
    pub fn bind_field(self: &Arc<Self>, name: impl Into<String>, options: FieldOptions) -> BoundField {
        BoundField::new(Arc::clone(self), name, options)
    }

    /// Update a field's value, recompute its dirty flag, and validate it
    /// when the change trigger policy applies.
    pub async fn set_field_value(&self, name: &str, value: Value) {
        trace!(field = %name, "set_field_value");
        let should_validate = {
            let mut inner = self.inner.write();
            let initial = inner
                .initial_values
                .get(name)
                .cloned()
                .unwrap_or(Value::Null);
            let dirty = value != initial;
            inner.values.set(name.to_owned(), value);
            inner.dirty.insert(name.to_owned(), dirty);
            let touched = inner.touched.get(name).copied().unwrap_or(false);
            self.triggers.change_applies(touched, dirty)
        };
        if should_validate {
            self.validate_field(name).await;
        }
        self.notify_change();
    }

    /// Mark a field touched (or explicitly untouched) and validate it when
    /// the blur trigger policy applies.
    pub async fn set_field_touched(&self, name: &str, touched: bool) {
        trace!(field = %name, touched, "set_field_touched");
        let should_validate = {
            let mut inner = self.inner.write();
            inner.touched.insert(name.to_owned(), touched);
            let dirty = inner.dirty.get(name).copied().unwrap_or(false);
            touched && self.triggers.blur_applies(dirty)
        };
        if should_validate {
            self.validate_field(name).await;
        }
        self.notify_change();
    }

    /// Run one field's rules against its current value, with the full
    /// values map as sibling context for cross-field rules.
    ///
    /// A field with no registered rules (or no registration at all) is
    /// reported valid and its error slot cleared. Overlapping calls for
    /// the same field are not cancelled: both complete and the one that
    /// finishes last determines the visible errors.
    pub async fn validate_field(&self, name: &str) -> bool {
        let (rules, value, siblings, on_error) = {
            let mut inner = self.inner.write();
            let registration = inner
                .fields
                .get(name)
                .map(|reg| (reg.rules.clone(), reg.on_error.clone()));

            let Some((rules, on_error)) =
                registration.filter(|(rules, _)| !rules.is_empty())
            else {
                inner.errors.insert(name.to_owned(), Vec::new());
                Self::recompute_validity(&mut inner);
                drop(inner);
                self.notify_change();
                return true;
            };

            inner.is_validating = true;
            let value = inner.values.get(name).cloned().unwrap_or(Value::Null);
            let siblings = inner.values.clone();
            (rules, value, siblings, on_error)
        };

        let errors = rules.evaluate(&value, Some(&siblings));
        let valid = errors.is_empty();
        trace!(field = %name, errors = errors.len(), "validated field");

        let field_state = {
            let mut inner = self.inner.write();
            inner.errors.insert(name.to_owned(), errors.clone());
            inner.is_validating = false;
            Self::recompute_validity(&mut inner);
            Self::field_state_locked(&inner, name)
        };

        if !valid {
            if let Some(callback) = on_error {
                callback(&errors, &field_state);
            }
        }
        self.notify_change();
        valid
    }

    /// Validate every registered field concurrently and recompute
    /// aggregate validity once all passes settle.
    ///
    /// Form-wide latency is bounded by the slowest single field rather
    /// than the sum of all fields.
    pub async fn validate_form(&self) -> bool {
        self.inner.write().is_validating = true;

        let names: Vec<String> = self.inner.read().fields.keys().cloned().collect();
        let results = join_all(names.iter().map(|name| self.validate_field(name))).await;
        let all_valid = results.into_iter().all(|valid| valid);

        {
            let mut inner = self.inner.write();
            inner.is_valid = all_valid;
            inner.is_validating = false;
        }
        debug!(valid = all_valid, fields = names.len(), "validated form");
        self.notify_change();
        all_valid
    }

    /// Reset the form to the supplied values, or to the originally
    /// captured initial values.
    ///
    /// This is a pure state reset: errors, touched, dirty, and
    /// `is_submitted` are cleared and `is_valid` is set unconditionally —
    /// no validation runs. Supplying values also re-baselines dirty
    /// tracking against them.
    pub fn reset_form(&self, new_values: Option<Values>) {
        debug!("resetting form");
        {
            let mut inner = self.inner.write();
            if let Some(values) = new_values {
                inner.initial_values = values.clone();
                inner.values = values;
            } else {
                inner.values = inner.initial_values.clone();
            }

            inner.errors.clear();
            inner.touched.clear();
            inner.dirty.clear();
            let names: Vec<String> = inner.fields.keys().cloned().collect();
            for name in names {
                if !inner.values.contains(&name) {
                    inner.values.set(name.clone(), Value::Null);
                }
                inner.errors.insert(name.clone(), Vec::new());
                inner.touched.insert(name.clone(), false);
                inner.dirty.insert(name, false);
            }

            inner.is_submitted = false;
            inner.is_valid = true;
        }
        self.notify_change();
    }

    /// Reset one field to the supplied value, or to its recorded initial
    /// value, clearing its touched/dirty/error slots.
    ///
    /// Supplying a value re-baselines the field's dirty tracking.
    pub fn reset_field(&self, name: &str, new_value: Option<Value>) {
        {
            let mut inner = self.inner.write();
            let value = match new_value {
                Some(value) => {
                    inner.initial_values.set(name.to_owned(), value.clone());
                    value
                }
                None => inner
                    .initial_values
                    .get(name)
                    .cloned()
                    .unwrap_or(Value::Null),
            };
            inner.values.set(name.to_owned(), value);
            inner.errors.insert(name.to_owned(), Vec::new());
            inner.touched.insert(name.to_owned(), false);
            inner.dirty.insert(name.to_owned(), false);
            Self::recompute_validity(&mut inner);
        }
        self.notify_change();
    }

    /// Run the submission lifecycle.
    ///
    /// `is_submitting` and `is_submitted` are set before any validation.
    /// When the submit-validation trigger is enabled the whole form is
    /// re-validated; only if valid is the user's submit handler awaited.
    /// An invalid form routes to the `on_error` callback (exactly once)
    /// and resolves with `Ok`. A failing submit handler is re-raised as
    /// [`FormError::Submit`] — after `is_submitting` has been cleared, so
    /// the form never sticks in a submitting state.
    pub async fn submit_form(&self) -> Result<(), FormError> {
        debug!("submitting form");
        {
            let mut inner = self.inner.write();
            inner.is_submitting = true;
            inner.is_submitted = true;
        }
        self.notify_change();

        let valid = if self.triggers.on_submit {
            self.validate_form().await
        } else {
            true
        };

        let result = if valid {
            if let Some(handler) = &self.on_submit {
                let (values, state) = {
                    let inner = self.inner.read();
                    (inner.values.clone(), Self::snapshot_locked(&inner))
                };
                handler(values, state).await.map_err(FormError::Submit)
            } else {
                Ok(())
            }
        } else {
            if let Some(callback) = &self.on_error {
                let state = self.snapshot();
                callback(&state.errors, &state);
            }
            Ok(())
        };

        self.inner.write().is_submitting = false;
        self.notify_change();
        if result.is_err() {
            debug!("submit handler failed");
        }
        result
    }

    /// Run the mount-time validation pass when the policy asks for one.
    ///
    /// The binding layer calls this once, after construction and field
    /// registration.
    pub async fn mount(&self) {
        if self.triggers.on_mount {
            self.validate_form().await;
        }
    }

    /// A consistent snapshot of the current form state.
    #[must_use]
    pub fn snapshot(&self) -> FormState {
        Self::snapshot_locked(&self.inner.read())
    }

    /// A snapshot of one field's slice of the form state.
    #[must_use]
    pub fn field_state(&self, name: &str) -> FieldState {
        Self::field_state_locked(&self.inner.read(), name)
    }

    fn snapshot_locked(inner: &FormInner) -> FormState {
        FormState {
            values: inner.values.clone(),
            errors: inner.errors.clone(),
            touched: inner.touched.clone(),
            dirty: inner.dirty.clone(),
            is_valid: inner.is_valid,
            is_validating: inner.is_validating,
            is_submitting: inner.is_submitting,
            is_submitted: inner.is_submitted,
        }
    }

    fn field_state_locked(inner: &FormInner, name: &str) -> FieldState {
        let errors = inner.errors.get(name).cloned().unwrap_or_default();
        FieldState {
            value: inner.values.get(name).cloned().unwrap_or(Value::Null),
            touched: inner.touched.get(name).copied().unwrap_or(false),
            dirty: inner.dirty.get(name).copied().unwrap_or(false),
            validating: inner.is_validating,
            valid: errors.is_empty(),
            errors,
        }
    }

    /// `is_valid` = AND over registered fields of "error list is empty".
    /// A field with no errors recorded yet is vacuously valid.
    fn recompute_validity(inner: &mut FormInner) {
        inner.is_valid = inner
            .fields
            .keys()
            .all(|name| inner.errors.get(name).map_or(true, Vec::is_empty));
    }

    fn notify_change(&self) {
        if let Some(callback) = &self.on_change {
            callback(&self.snapshot());
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("FormController")
            .field("fields", &inner.fields.len())
            .field("is_valid", &inner.is_valid)
            .field("is_submitting", &inner.is_submitting)
            .field("is_submitted", &inner.is_submitted)
            .finish_non_exhaustive()
    }
}
