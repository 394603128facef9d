//! Ordered rule evaluation for one field
//!
//! A [`RuleSet`] is the field validator: it runs every applicable rule in
//! declaration order and collects all failing rules' messages instead of
//! short-circuiting, so a consumer can show every violation at once.

use crate::rule::{is_empty_value, Rule};
use crate::values::Values;
use serde_json::Value;

/// An ordered list of rules evaluated against one field's value.
///
/// Evaluation is pure: it reads the value and the optional sibling map and
/// mutates nothing, so rule sets for different fields can safely be
/// evaluated concurrently.
///
/// # Examples
///
/// ```rust
/// use veld_validator::prelude::*;
/// use serde_json::json;
///
/// let rules: RuleSet = [required(), min_length(3)].into_iter().collect();
///
/// assert!(rules.evaluate(&json!("abc"), None).is_empty());
/// assert_eq!(rules.evaluate(&json!("ab"), None).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, preserving declaration order.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Builder-style variant of [`RuleSet::push`].
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Evaluate all rules against a value, collecting every failure.
    ///
    /// Rules that do not run on empty values are skipped when `value` is
    /// empty (`null` or `""`). The returned messages preserve rule
    /// declaration order. An empty result means the value is valid.
    #[must_use]
    pub fn evaluate(&self, value: &Value, siblings: Option<&Values>) -> Vec<String> {
        let empty = is_empty_value(value);
        let mut errors = Vec::new();

        for rule in &self.rules {
            if empty && !rule.runs_on_empty() {
                continue;
            }
            if !rule.passes(value, siblings) {
                errors.push(rule.message().to_owned());
            }
        }

        errors
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<T: IntoIterator<Item = Rule>>(&mut self, iter: T) {
        self.rules.extend(iter);
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{email, min_length, required};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn collects_all_failures_in_order() {
        let rules: RuleSet = [
            min_length(5).with_message("first"),
            email().with_message("second"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            rules.evaluate(&json!("ab"), None),
            vec!["first".to_string(), "second".to_string()],
        );
    }

    #[test]
    fn skips_format_rules_on_empty_value() {
        let rules: RuleSet = [required(), email()].into_iter().collect();

        // Only `required` fires on the empty string.
        assert_eq!(
            rules.evaluate(&json!(""), None),
            vec!["This field is required".to_string()],
        );
        assert_eq!(rules.evaluate(&Value::Null, None).len(), 1);
    }

    #[test]
    fn empty_set_is_always_valid() {
        let rules = RuleSet::new();
        assert!(rules.evaluate(&json!("anything"), None).is_empty());
        assert!(rules.evaluate(&Value::Null, None).is_empty());
    }
}
