//! Built-in rule constructors
//!
//! Each constructor returns a [`Rule`] with a sensible default message;
//! override it with [`Rule::with_message`]. Apart from `required`, every
//! rule is skipped on empty values (`null` / `""`), so optional fields stay
//! silent until something is typed.

pub mod datetime;
pub mod numeric;
pub mod string;

pub use datetime::{date, date_after, date_before};
pub use numeric::{integer, max, min, number, range};
pub use string::{
    alphanumeric, email, exact_length, max_length, min_length, pattern, phone, strong_password,
    url, username, zip_code,
};

use crate::rule::Rule;
use crate::values::Values;
use serde_json::Value;

/// The value must be present: not `null`, not a blank string, not an empty
/// array.
///
/// This is the one built-in rule that fires on empty input.
#[must_use]
pub fn required() -> Rule {
    Rule::new(
        |value, _| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        },
        "This field is required",
    )
    .run_on_empty()
}

/// The value must equal the named sibling field's value.
///
/// The classic use is password confirmation: put `matches("password")` on
/// the `confirmPassword` field. Outside a form (no sibling map) the rule
/// passes; with a sibling map present, a missing sibling entry fails.
#[must_use]
pub fn matches(field: impl Into<String>) -> Rule {
    let field = field.into();
    let message = format!("Must match the {field} field");
    Rule::new(
        move |value, siblings| match siblings {
            None => true,
            Some(values) => values.get(&field) == Some(value),
        },
        message,
    )
}

/// Build a rule from an arbitrary predicate.
pub fn custom(
    predicate: impl Fn(&Value, Option<&Values>) -> bool + Send + Sync + 'static,
) -> Rule {
    Rule::new(predicate, "Invalid value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_rejects_empty_shapes() {
        let rule = required();
        assert!(!rule.passes(&Value::Null, None));
        assert!(!rule.passes(&json!(""), None));
        assert!(!rule.passes(&json!("   "), None));
        assert!(!rule.passes(&json!([]), None));

        assert!(rule.passes(&json!("x"), None));
        assert!(rule.passes(&json!(0), None));
        assert!(rule.passes(&json!(false), None));
        assert!(rule.passes(&json!(["a"]), None));
    }

    #[test]
    fn matches_compares_against_sibling() {
        let rule = matches("password");
        let siblings: Values = [("password", json!("secret"))].into_iter().collect();

        assert!(rule.passes(&json!("secret"), Some(&siblings)));
        assert!(!rule.passes(&json!("other"), Some(&siblings)));
        // No sibling context: nothing to compare against.
        assert!(rule.passes(&json!("anything"), None));
        // Sibling context present but the referenced field is absent.
        let empty = Values::new();
        assert!(!rule.passes(&json!("anything"), Some(&empty)));
    }

    #[test]
    fn custom_wraps_predicate() {
        let rule = custom(|value, _| value.as_i64().is_some_and(|n| n % 2 == 0))
            .with_message("Must be even");
        assert!(rule.passes(&json!(4), None));
        assert!(!rule.passes(&json!(3), None));
        assert_eq!(rule.message(), "Must be even");
    }
}
