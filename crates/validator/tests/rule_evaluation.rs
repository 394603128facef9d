//! Integration tests for rule sets as the form engine drives them:
//! ordered collection of failures, the empty-value policy, and
//! cross-field sibling context.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use veld_validator::prelude::*;

// ============================================================================
// EMPTY-VALUE POLICY
// ============================================================================

#[rstest]
#[case(Value::Null)]
#[case(json!(""))]
fn format_rules_stay_silent_on_empty_input(#[case] value: Value) {
    let rules: RuleSet = [email(), min_length(3), min(18.0)].into_iter().collect();
    assert_eq!(rules.evaluate(&value, None), Vec::<String>::new());
}

#[rstest]
#[case(Value::Null)]
#[case(json!(""))]
fn required_is_the_only_rule_firing_on_empty_input(#[case] value: Value) {
    let rules: RuleSet = [required(), email(), min_length(3)].into_iter().collect();
    assert_eq!(
        rules.evaluate(&value, None),
        vec!["This field is required".to_string()],
    );
}

#[test]
fn non_empty_value_satisfying_all_rules_yields_no_errors() {
    let rules: RuleSet = [required(), email()].into_iter().collect();
    assert!(rules.evaluate(&json!("a@b.com"), None).is_empty());
}

// ============================================================================
// ALL FAILURES COLLECTED, DECLARATION ORDER PRESERVED
// ============================================================================

#[test]
fn every_failing_rule_contributes_its_message() {
    let rules: RuleSet = [
        min_length(10).with_message("A"),
        email().with_message("B"),
        alphanumeric().with_message("C"),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        rules.evaluate(&json!("a b"), None),
        vec!["A".to_string(), "B".to_string(), "C".to_string()],
    );
}

// ============================================================================
// EMAIL FORMAT CASES
// ============================================================================

#[rstest]
#[case("user@example.com", true)]
#[case("first.last+tag@sub.domain.org", true)]
#[case("a@b.co", true)]
#[case("not-an-email", false)]
#[case("missing@tld", false)]
#[case("@example.com", false)]
#[case("user@.com", false)]
fn email_cases(#[case] input: &str, #[case] ok: bool) {
    assert_eq!(email().passes(&json!(input), None), ok);
}

// ============================================================================
// CROSS-FIELD RULES
// ============================================================================

#[test]
fn confirm_password_matches_sibling() {
    let rules: RuleSet = [required(), matches("password")].into_iter().collect();

    let mismatched: Values = [("password", json!("a")), ("confirmPassword", json!("b"))]
        .into_iter()
        .collect();
    assert!(!rules.evaluate(&json!("b"), Some(&mismatched)).is_empty());

    let matched: Values = [("password", json!("a")), ("confirmPassword", json!("a"))]
        .into_iter()
        .collect();
    assert!(rules.evaluate(&json!("a"), Some(&matched)).is_empty());
}

// ============================================================================
// PROPERTIES
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn min_length_agrees_with_char_count(s in "\\PC{0,40}", min_chars in 0usize..20) {
            prop_assume!(!s.is_empty());
            let rule = min_length(min_chars);
            prop_assert_eq!(
                rule.passes(&json!(s.clone()), None),
                s.chars().count() >= min_chars
            );
        }

        #[test]
        fn range_accepts_exactly_the_interval(n in -1000i64..1000) {
            let rule = range(-100.0, 100.0);
            prop_assert_eq!(rule.passes(&json!(n), None), (-100..=100).contains(&n));
        }

        #[test]
        fn numeric_rules_coerce_strings_like_numbers(n in -1000i64..1000) {
            let as_number = json!(n);
            let as_string = json!(n.to_string());
            let rule = min(0.0);
            prop_assert_eq!(
                rule.passes(&as_number, None),
                rule.passes(&as_string, None)
            );
        }
    }
}
