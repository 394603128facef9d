//! Construction options for fields and forms
//!
//! These structs are the engine's registration contract: the rendering
//! layer builds them, the controllers consume them. Callbacks are
//! `Arc`-backed so options stay cheaply cloneable.

use crate::state::{FieldState, FormState};
use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use veld_validator::{RuleSet, Values};

/// Boxed error type carried out of a user-supplied submit handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Async submit handler: receives the form values and a state snapshot.
pub type SubmitHandler =
    Arc<dyn Fn(Values, FormState) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Form-level change subscriber, invoked after every mutating operation.
pub type FormChangeHandler = Arc<dyn Fn(&FormState) + Send + Sync>;

/// Form-level error callback, invoked when a submit finds the form invalid.
pub type FormErrorHandler = Arc<dyn Fn(&HashMap<String, Vec<String>>, &FormState) + Send + Sync>;

/// Field-level change callback: new value plus resulting state snapshot.
pub type FieldChangeHandler = Arc<dyn Fn(&Value, &FieldState) + Send + Sync>;

/// Field-level blur callback.
pub type FieldBlurHandler = Arc<dyn Fn(&FieldState) + Send + Sync>;

/// Field-level error callback, invoked when a validation pass fails.
pub type FieldErrorHandler = Arc<dyn Fn(&[String], &FieldState) + Send + Sync>;

/// When validation runs, and which gates apply.
///
/// Change-validation runs iff `on_change` and (unless `only_touched` is
/// unset) the field is touched and (unless `only_dirty` is unset) the
/// field is dirty. Blur-validation runs iff `on_blur` and the dirty gate
/// passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationTriggers {
    /// Validate when a value changes.
    pub on_change: bool,
    /// Validate when a field loses focus.
    pub on_blur: bool,
    /// Validate the whole form before submitting.
    pub on_submit: bool,
    /// Validate once at mount time.
    pub on_mount: bool,
    /// Gate change-validation on the field being touched.
    pub only_touched: bool,
    /// Gate change- and blur-validation on the field being dirty.
    pub only_dirty: bool,
}

impl Default for ValidationTriggers {
    fn default() -> Self {
        Self {
            on_change: true,
            on_blur: true,
            on_submit: true,
            on_mount: false,
            only_touched: true,
            only_dirty: false,
        }
    }
}

impl ValidationTriggers {
    /// Should a value change trigger validation, given the field's state?
    #[must_use]
    pub fn change_applies(&self, touched: bool, dirty: bool) -> bool {
        self.on_change && (!self.only_touched || touched) && (!self.only_dirty || dirty)
    }

    /// Should a blur trigger validation, given the field's state?
    #[must_use]
    pub fn blur_applies(&self, dirty: bool) -> bool {
        self.on_blur && (!self.only_dirty || dirty)
    }
}

/// Options for constructing or registering a field.
#[derive(Clone, Default)]
pub struct FieldOptions {
    /// Initial value; also the baseline for dirty tracking.
    pub initial_value: Value,
    /// Validation rules, evaluated in declaration order.
    pub rules: RuleSet,
    /// Trigger policy. Standalone fields follow it directly; form-bound
    /// fields follow the owning form's policy (except `on_mount`).
    pub triggers: ValidationTriggers,
    /// Invoked on every value change with the new value and state.
    pub on_change: Option<FieldChangeHandler>,
    /// Invoked after a blur with the updated state.
    pub on_blur: Option<FieldBlurHandler>,
    /// Invoked when a validation pass produces errors.
    pub on_error: Option<FieldErrorHandler>,
    /// The field is disabled.
    pub disabled: bool,
    /// The field is read-only.
    pub read_only: bool,
    /// The field is required (informational; pair with a `required` rule).
    pub required: bool,
}

impl FieldOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = value.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn rules(mut self, rules: impl Into<RuleSet>) -> Self {
        self.rules = rules.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn triggers(mut self, triggers: ValidationTriggers) -> Self {
        self.triggers = triggers;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn on_change(mut self, f: impl Fn(&Value, &FieldState) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn on_blur(mut self, f: impl Fn(&FieldState) + Send + Sync + 'static) -> Self {
        self.on_blur = Some(Arc::new(f));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn on_error(mut self, f: impl Fn(&[String], &FieldState) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl fmt::Debug for FieldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOptions")
            .field("initial_value", &self.initial_value)
            .field("rules", &self.rules.len())
            .field("triggers", &self.triggers)
            .field("has_on_change", &self.on_change.is_some())
            .field("has_on_blur", &self.on_blur.is_some())
            .field("has_on_error", &self.on_error.is_some())
            .field("disabled", &self.disabled)
            .field("read_only", &self.read_only)
            .field("required", &self.required)
            .finish()
    }
}

/// Options for constructing a form controller.
#[derive(Clone, Default)]
pub struct FormOptions {
    /// Initial values; also the baseline for dirty tracking and the
    /// fallback for [`reset_form`](crate::form::FormController::reset_form).
    pub initial_values: Values,
    /// Trigger policy applied to all form-bound fields.
    pub triggers: ValidationTriggers,
    /// Awaited on a valid submit.
    pub on_submit: Option<SubmitHandler>,
    /// Invoked with a fresh snapshot after every mutating operation.
    pub on_change: Option<FormChangeHandler>,
    /// Invoked when a submit finds the form invalid.
    pub on_error: Option<FormErrorHandler>,
}

impl FormOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn initial_values(mut self, values: impl Into<Values>) -> Self {
        self.initial_values = values.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn triggers(mut self, triggers: ValidationTriggers) -> Self {
        self.triggers = triggers;
        self
    }

    /// Set the async submit handler.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_submit<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Values, FormState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.on_submit = Some(Arc::new(move |values, state| Box::pin(f(values, state))));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn on_change(mut self, f: impl Fn(&FormState) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn on_error(
        mut self,
        f: impl Fn(&HashMap<String, Vec<String>>, &FormState) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormOptions")
            .field("initial_values", &self.initial_values)
            .field("triggers", &self.triggers)
            .field("has_on_submit", &self.on_submit.is_some())
            .field("has_on_change", &self.on_change.is_some())
            .field("has_on_error", &self.on_error.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_triggers_match_engine_defaults() {
        let triggers = ValidationTriggers::default();
        assert!(triggers.on_change);
        assert!(triggers.on_blur);
        assert!(triggers.on_submit);
        assert!(!triggers.on_mount);
        assert!(triggers.only_touched);
        assert!(!triggers.only_dirty);
    }

    #[test]
    fn change_gate_requires_touched_by_default() {
        let triggers = ValidationTriggers::default();
        assert!(!triggers.change_applies(false, true));
        assert!(triggers.change_applies(true, false));

        let eager = ValidationTriggers {
            only_touched: false,
            ..ValidationTriggers::default()
        };
        assert!(eager.change_applies(false, false));
    }

    #[test]
    fn dirty_gate_applies_to_blur() {
        let triggers = ValidationTriggers {
            only_dirty: true,
            ..ValidationTriggers::default()
        };
        assert!(!triggers.blur_applies(false));
        assert!(triggers.blur_applies(true));
    }
}
