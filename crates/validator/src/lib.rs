//! # veld-validator
//!
//! Validation rules and rule sets for the veld form engine.
//!
//! A [`Rule`] is a pure pass/fail predicate over a field value (and,
//! optionally, the values of its sibling fields) paired with a user-facing
//! message. A [`RuleSet`] evaluates an ordered list of rules against one
//! value and collects every failing rule's message, so a consumer can
//! display all violations at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use veld_validator::prelude::*;
//! use serde_json::json;
//!
//! let rules: RuleSet = [required(), email()].into_iter().collect();
//!
//! assert!(rules.evaluate(&json!("user@example.com"), None).is_empty());
//! assert_eq!(
//!     rules.evaluate(&json!(""), None),
//!     vec!["This field is required".to_string()],
//! );
//! ```
//!
//! ## Empty-value policy
//!
//! Most rules are skipped when the value is empty (`null` or `""`), so that
//! `required` is the only rule firing on empty input while format rules
//! (email, pattern, length) stay silent. A rule opts into running on empty
//! values with [`Rule::run_on_empty`].
//!
//! ## Cross-field rules
//!
//! A rule's predicate receives the full sibling [`Values`] map when the
//! caller supplies one, enabling rules such as
//! [`matches`](rules::matches)`("password")` for password confirmation.

pub mod prelude;
pub mod rule;
pub mod rules;
pub mod ruleset;
pub mod values;

pub use rule::{is_empty_value, Rule};
pub use ruleset::RuleSet;
pub use values::Values;
