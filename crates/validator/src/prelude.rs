//! Convenience re-exports for consumers of the validation engine.
//!
//! ```rust
//! use veld_validator::prelude::*;
//! use serde_json::json;
//!
//! let rules: RuleSet = [required(), min_length(3)].into_iter().collect();
//! assert!(rules.evaluate(&json!("abc"), None).is_empty());
//! ```

pub use crate::rule::{is_empty_value, Rule};
pub use crate::rules::{
    alphanumeric, custom, date, date_after, date_before, email, exact_length, integer, matches,
    max, max_length, min, min_length, number, pattern, phone, range, required, strong_password,
    url, username, zip_code,
};
pub use crate::ruleset::RuleSet;
pub use crate::values::Values;
