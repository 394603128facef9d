//! Numeric rules with lenient coercion
//!
//! Form inputs frequently deliver numbers as strings, so these rules accept
//! any value that coerces to a number: JSON numbers, numeric strings, and
//! booleans (`true` → 1, `false` → 0). Values that do not coerce fail the
//! rule.

use crate::rule::Rule;
use serde_json::Value;

/// Coerce a value to `f64`, mirroring loose form-input semantics.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }
}

/// The value must coerce to a number.
#[must_use]
pub fn number() -> Rule {
    Rule::new(
        |value, _| coerce_number(value).is_some(),
        "Please enter a number",
    )
}

/// The value must coerce to a whole number.
#[must_use]
pub fn integer() -> Rule {
    Rule::new(
        |value, _| coerce_number(value).is_some_and(|n| n.fract() == 0.0),
        "Please enter a whole number",
    )
}

/// The value must be at least `min_value`.
#[must_use]
pub fn min(min_value: f64) -> Rule {
    Rule::new(
        move |value, _| coerce_number(value).is_some_and(|n| n >= min_value),
        format!("Must be at least {min_value}"),
    )
}

/// The value must be at most `max_value`.
#[must_use]
pub fn max(max_value: f64) -> Rule {
    Rule::new(
        move |value, _| coerce_number(value).is_some_and(|n| n <= max_value),
        format!("Must be at most {max_value}"),
    )
}

/// The value must lie within `[min_value, max_value]` (inclusive).
#[must_use]
pub fn range(min_value: f64, max_value: f64) -> Rule {
    Rule::new(
        move |value, _| {
            coerce_number(value).is_some_and(|n| n >= min_value && n <= max_value)
        },
        format!("Must be between {min_value} and {max_value}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coercion_accepts_numeric_strings() {
        assert_eq!(coerce_number(&json!("15")), Some(15.0));
        assert_eq!(coerce_number(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!([1])), None);
    }

    #[test]
    fn min_handles_numbers_and_strings() {
        let rule = min(18.0);
        assert!(rule.passes(&json!(21), None));
        assert!(rule.passes(&json!("21"), None));
        assert!(!rule.passes(&json!(15), None));
        assert!(!rule.passes(&json!("abc"), None));
    }

    #[test]
    fn range_is_inclusive() {
        let rule = range(1.0, 10.0);
        assert!(rule.passes(&json!(1), None));
        assert!(rule.passes(&json!(10), None));
        assert!(!rule.passes(&json!(0.5), None));
        assert!(!rule.passes(&json!(11), None));
    }

    #[test]
    fn integer_rejects_fractions() {
        let rule = integer();
        assert!(rule.passes(&json!(4), None));
        assert!(rule.passes(&json!("4"), None));
        assert!(!rule.passes(&json!(4.5), None));
        assert!(!rule.passes(&json!("4.5"), None));
    }
}
