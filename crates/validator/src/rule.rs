//! The atomic unit of validation logic
//!
//! A [`Rule`] pairs a pure predicate over `(value, sibling values)` with a
//! user-facing message and an empty-value policy. Rules are immutable once
//! constructed and cheap to clone (the predicate is `Arc`-backed).

use crate::values::Values;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Predicate signature shared by all rules.
///
/// Returns `true` when the value is acceptable. The second argument carries
/// the full sibling value map when the field is validated inside a form,
/// enabling cross-field rules.
pub type Predicate = Arc<dyn Fn(&Value, Option<&Values>) -> bool + Send + Sync>;

/// Check whether a value counts as "empty" for the skip-on-empty policy.
///
/// Empty means `null` or the empty string. Rules with
/// [`Rule::runs_on_empty`]` == false` are skipped entirely for such values.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str() == Some("")
}

/// A single pass/fail validation rule with an associated message.
///
/// # Examples
///
/// ```rust
/// use veld_validator::Rule;
/// use serde_json::json;
///
/// let no_spaces = Rule::new(
///     |value, _| value.as_str().is_some_and(|s| !s.contains(' ')),
///     "Must not contain spaces",
/// );
///
/// assert!(no_spaces.passes(&json!("abc"), None));
/// assert!(!no_spaces.passes(&json!("a b"), None));
/// ```
///
/// Rule predicates must not panic: the engine does not catch panics, they
/// propagate to the caller of the validation entry point.
#[derive(Clone)]
pub struct Rule {
    predicate: Predicate,
    message: Cow<'static, str>,
    run_on_empty: bool,
}

impl Rule {
    /// Create a rule from a predicate and a message.
    ///
    /// The rule is skipped on empty values by default; opt into running on
    /// empty input with [`Rule::run_on_empty`].
    pub fn new(
        predicate: impl Fn(&Value, Option<&Values>) -> bool + Send + Sync + 'static,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
            run_on_empty: false,
        }
    }

    /// Make this rule fire even when the value is empty.
    ///
    /// `required` is the canonical rule that needs this: it has to reject
    /// empty input, while format rules stay silent on it.
    #[must_use = "builder methods must be chained or built"]
    pub fn run_on_empty(mut self) -> Self {
        self.run_on_empty = true;
        self
    }

    /// Override the rule's message.
    ///
    /// Every built-in rule constructor ships a default message; this swaps
    /// it for a caller-supplied one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// The user-facing message reported when this rule fails.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this rule is evaluated for empty values.
    #[must_use]
    pub fn runs_on_empty(&self) -> bool {
        self.run_on_empty
    }

    /// Evaluate the predicate against a value and optional sibling values.
    #[must_use]
    pub fn passes(&self, value: &Value, siblings: Option<&Values>) -> bool {
        (self.predicate)(value, siblings)
    }

    /// Combine several rules into one that fails if any member fails.
    ///
    /// Used for shared rule bundles. The combined rule runs on empty values
    /// if any member does, and evaluates members in order, stopping at the
    /// first failure.
    #[must_use]
    pub fn all(rules: impl IntoIterator<Item = Rule>) -> Self {
        let rules: Vec<Rule> = rules.into_iter().collect();
        let run_on_empty = rules.iter().any(Rule::runs_on_empty);
        let mut rule = Self::new(
            move |value, siblings| rules.iter().all(|r| r.passes(value, siblings)),
            "Invalid value",
        );
        rule.run_on_empty = run_on_empty;
        rule
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .field("run_on_empty", &self.run_on_empty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{min_length, required};
    use serde_json::json;

    #[test]
    fn empty_value_test() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(!is_empty_value(&json!(" ")));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!([])));
    }

    #[test]
    fn custom_message_override() {
        let rule = min_length(3).with_message("too short!");
        assert_eq!(rule.message(), "too short!");
        assert!(!rule.passes(&json!("ab"), None));
    }

    #[test]
    fn all_fails_when_any_member_fails() {
        let bundle = Rule::all([required(), min_length(3)]);
        assert!(bundle.passes(&json!("abc"), None));
        assert!(!bundle.passes(&json!("ab"), None));
        assert!(!bundle.passes(&Value::Null, None));
    }

    #[test]
    fn all_inherits_run_on_empty_from_members() {
        let with_required = Rule::all([required(), min_length(3)]);
        assert!(with_required.runs_on_empty());

        let without = Rule::all([min_length(3)]);
        assert!(!without.runs_on_empty());
    }
}
