//! Field controllers
//!
//! A field controller drives one input's lifecycle: value changes, blur,
//! validation, reset. Two concrete controllers implement the same
//! [`FieldController`] trait:
//!
//! - [`StandaloneField`] owns its state outright and follows its own
//!   trigger policy — a single input with no form around it.
//! - [`BoundField`] delegates all state to an [`Arc<FormController>`] and
//!   follows the form's trigger policy; dropping the handle deregisters
//!   the field while leaving its last-known state in the form.

use crate::binding::FieldBinding;
use crate::form::FormController;
use crate::options::{
    FieldBlurHandler, FieldChangeHandler, FieldErrorHandler, FieldOptions, ValidationTriggers,
};
use crate::state::{FieldState, FieldStatus};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;
use veld_validator::RuleSet;

/// Common surface of standalone and form-bound fields.
#[async_trait]
pub trait FieldController: Send + Sync {
    /// The field's name, if it has one.
    fn name(&self) -> Option<&str>;

    /// A snapshot of the field's current state.
    fn state(&self) -> FieldState;

    /// A render-ready binding snapshot.
    fn binding(&self) -> FieldBinding;

    /// Record a new value, update dirty tracking, and validate when the
    /// change trigger policy applies.
    async fn set_value(&self, value: Value);

    /// Mark the field touched and validate when the blur trigger policy
    /// applies.
    async fn blur(&self);

    /// Validate unconditionally. Returns whether the field is valid.
    async fn validate(&self) -> bool;

    /// Reset to the supplied value, or to the recorded initial value.
    /// Clears touched, dirty, and errors. Supplying a value re-baselines
    /// dirty tracking.
    async fn reset(&self, new_value: Option<Value>);

    /// Run the mount-time validation pass when the policy asks for one.
    async fn mount(&self);
}

// ---------------------------------------------------------------------------
// Standalone
// ---------------------------------------------------------------------------

struct StandaloneInner {
    value: Value,
    initial_value: Value,
    status: FieldStatus,
}

/// A field that owns its own state; no form involved.
pub struct StandaloneField {
    name: Option<String>,
    rules: RuleSet,
    triggers: ValidationTriggers,
    on_change: Option<FieldChangeHandler>,
    on_blur: Option<FieldBlurHandler>,
    on_error: Option<FieldErrorHandler>,
    disabled: bool,
    read_only: bool,
    required: bool,
    inner: RwLock<StandaloneInner>,
}

impl StandaloneField {
    /// Create an anonymous standalone field.
    #[must_use]
    pub fn new(options: FieldOptions) -> Self {
        Self::build(None, options)
    }

    /// Create a named standalone field.
    #[must_use]
    pub fn named(name: impl Into<String>, options: FieldOptions) -> Self {
        Self::build(Some(name.into()), options)
    }

    fn build(name: Option<String>, options: FieldOptions) -> Self {
        let FieldOptions {
            initial_value,
            rules,
            triggers,
            on_change,
            on_blur,
            on_error,
            disabled,
            read_only,
            required,
        } = options;

        Self {
            name,
            rules,
            triggers,
            on_change,
            on_blur,
            on_error,
            disabled,
            read_only,
            required,
            inner: RwLock::new(StandaloneInner {
                value: initial_value.clone(),
                initial_value,
                status: FieldStatus::new(),
            }),
        }
    }

    /// Evaluate the rules against the current value and store the result.
    /// Rules run with the lock released.
    fn run_validation(&self) -> bool {
        self.inner.write().status.set_validating(true);

        let value = self.inner.read().value.clone();
        let errors = self.rules.evaluate(&value, None);
        let valid = errors.is_empty();
        trace!(field = ?self.name, errors = errors.len(), "validated standalone field");

        {
            let mut inner = self.inner.write();
            inner.status.set_errors(errors.clone());
            inner.status.set_validating(false);
        }

        if !valid {
            if let Some(callback) = &self.on_error {
                callback(&errors, &self.state());
            }
        }
        valid
    }
}

#[async_trait]
impl FieldController for StandaloneField {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn state(&self) -> FieldState {
        let inner = self.inner.read();
        FieldState {
            value: inner.value.clone(),
            touched: inner.status.is_touched(),
            dirty: inner.status.is_dirty(),
            validating: inner.status.is_validating(),
            valid: inner.status.is_valid(),
            errors: inner.status.errors().to_vec(),
        }
    }

    fn binding(&self) -> FieldBinding {
        FieldBinding::from_state(
            self.name.clone(),
            &self.state(),
            self.disabled,
            self.read_only,
            self.required,
        )
    }

    async fn set_value(&self, value: Value) {
        let should_validate = {
            let mut inner = self.inner.write();
            let dirty = value != inner.initial_value;
            inner.value = value.clone();
            inner.status.set_dirty(dirty);
            self.triggers.change_applies(inner.status.is_touched(), dirty)
        };
        if should_validate {
            self.run_validation();
        }
        if let Some(callback) = &self.on_change {
            callback(&value, &self.state());
        }
    }

    async fn blur(&self) {
        let should_validate = {
            let mut inner = self.inner.write();
            inner.status.mark_touched();
            self.triggers.blur_applies(inner.status.is_dirty())
        };
        if should_validate {
            self.run_validation();
        }
        if let Some(callback) = &self.on_blur {
            callback(&self.state());
        }
    }

    async fn validate(&self) -> bool {
        self.run_validation()
    }

    async fn reset(&self, new_value: Option<Value>) {
        let mut inner = self.inner.write();
        match new_value {
            Some(value) => {
                inner.initial_value = value.clone();
                inner.value = value;
            }
            None => inner.value = inner.initial_value.clone(),
        }
        inner.status = FieldStatus::new();
    }

    async fn mount(&self) {
        if self.triggers.on_mount {
            self.run_validation();
        }
    }
}

impl std::fmt::Debug for StandaloneField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandaloneField")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .field("triggers", &self.triggers)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Form-bound
// ---------------------------------------------------------------------------

/// A field whose state lives in an owning [`FormController`].
///
/// Construction registers the field with the form; dropping the handle
/// deregisters it. The form keeps the field's last-known value, errors,
/// touched, and dirty slots after deregistration, so a re-created handle
/// for the same name picks up where the old one left off.
pub struct BoundField {
    name: String,
    form: Arc<FormController>,
    on_change: Option<FieldChangeHandler>,
    on_blur: Option<FieldBlurHandler>,
    validate_on_mount: bool,
    disabled: bool,
    read_only: bool,
    required: bool,
}

impl BoundField {
    /// Register `name` with `form` and return the handle.
    ///
    /// The field-level `on_error` callback travels into the form with the
    /// registration; `on_change`/`on_blur` stay on the handle and fire
    /// after the corresponding form mutation. Validation timing follows
    /// the form's trigger policy, except `on_mount`, which is taken from
    /// these options.
    #[must_use]
    pub fn new(form: Arc<FormController>, name: impl Into<String>, options: FieldOptions) -> Self {
        let name = name.into();
        let on_change = options.on_change.clone();
        let on_blur = options.on_blur.clone();
        let validate_on_mount = options.triggers.on_mount;
        let disabled = options.disabled;
        let read_only = options.read_only;
        let required = options.required;

        form.register_field(name.clone(), options);

        Self {
            name,
            form,
            on_change,
            on_blur,
            validate_on_mount,
            disabled,
            read_only,
            required,
        }
    }

    /// The owning form.
    #[must_use]
    pub fn form(&self) -> &Arc<FormController> {
        &self.form
    }
}

#[async_trait]
impl FieldController for BoundField {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn state(&self) -> FieldState {
        self.form.field_state(&self.name)
    }

    fn binding(&self) -> FieldBinding {
        FieldBinding::from_state(
            Some(self.name.clone()),
            &self.state(),
            self.disabled,
            self.read_only,
            self.required,
        )
    }

    async fn set_value(&self, value: Value) {
        self.form.set_field_value(&self.name, value.clone()).await;
        if let Some(callback) = &self.on_change {
            callback(&value, &self.state());
        }
    }

    async fn blur(&self) {
        self.form.set_field_touched(&self.name, true).await;
        if let Some(callback) = &self.on_blur {
            callback(&self.state());
        }
    }

    async fn validate(&self) -> bool {
        self.form.validate_field(&self.name).await
    }

    async fn reset(&self, new_value: Option<Value>) {
        self.form.reset_field(&self.name, new_value);
    }

    async fn mount(&self) {
        if self.validate_on_mount {
            self.form.validate_field(&self.name).await;
        }
    }
}

impl Drop for BoundField {
    fn drop(&mut self) {
        self.form.unregister_field(&self.name);
    }
}

impl std::fmt::Debug for BoundField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundField")
            .field("name", &self.name)
            .field("validate_on_mount", &self.validate_on_mount)
            .finish_non_exhaustive()
    }
}
