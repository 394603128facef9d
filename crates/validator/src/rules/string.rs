//! String rules: lengths, patterns, and common formats
//!
//! All rules here fail on non-string values and are skipped on empty input
//! by the rule set's empty-value policy.

use crate::rule::Rule;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

// At least six digits; +, parentheses, separators allowed.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\(?[0-9]{1,4}\)?[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,9}$")
        .expect("valid phone regex")
});

fn string_rule(
    check: impl Fn(&str) -> bool + Send + Sync + 'static,
    message: impl Into<std::borrow::Cow<'static, str>>,
) -> Rule {
    Rule::new(
        move |value, _| value.as_str().is_some_and(&check),
        message,
    )
}

/// The value must be a syntactically plausible e-mail address.
#[must_use]
pub fn email() -> Rule {
    string_rule(
        |s| EMAIL_RE.is_match(s),
        "Please enter a valid e-mail address",
    )
}

/// The value must be at least `min` characters long.
#[must_use]
pub fn min_length(min: usize) -> Rule {
    string_rule(
        move |s| s.chars().count() >= min,
        format!("Must be at least {min} characters"),
    )
}

/// The value must be at most `max` characters long.
#[must_use]
pub fn max_length(max: usize) -> Rule {
    string_rule(
        move |s| s.chars().count() <= max,
        format!("Must be at most {max} characters"),
    )
}

/// The value must be exactly `length` characters long.
#[must_use]
pub fn exact_length(length: usize) -> Rule {
    string_rule(
        move |s| s.chars().count() == length,
        format!("Must be exactly {length} characters"),
    )
}

/// The value must match a pre-compiled regular expression.
#[must_use]
pub fn pattern(regex: Regex) -> Rule {
    string_rule(move |s| regex.is_match(s), "Please enter a valid value")
}

/// The value must parse as an absolute URL.
#[must_use]
pub fn url() -> Rule {
    string_rule(
        |s| ::url::Url::parse(s).is_ok(),
        "Please enter a valid URL",
    )
}

/// The value must look like a phone number.
#[must_use]
pub fn phone() -> Rule {
    string_rule(
        |s| PHONE_RE.is_match(s),
        "Please enter a valid phone number",
    )
}

/// The value must be a five-digit postal code.
#[must_use]
pub fn zip_code() -> Rule {
    string_rule(
        |s| s.len() == 5 && s.bytes().all(|b| b.is_ascii_digit()),
        "Please enter a valid postal code",
    )
}

/// The value must contain only ASCII letters and digits.
#[must_use]
pub fn alphanumeric() -> Rule {
    string_rule(
        |s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric()),
        "Please use only letters and digits",
    )
}

/// The value must contain only letters, digits, underscores, and hyphens.
#[must_use]
pub fn username() -> Rule {
    string_rule(
        |s| {
            !s.is_empty()
                && s.bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        },
        "Usernames may only contain letters, digits, underscores, and hyphens",
    )
}

/// The value must be a strong password: at least eight characters with an
/// uppercase letter, a lowercase letter, a digit, and a symbol.
#[must_use]
pub fn strong_password() -> Rule {
    string_rule(
        |s| {
            s.chars().count() >= 8
                && s.chars().any(|c| c.is_lowercase())
                && s.chars().any(|c| c.is_uppercase())
                && s.chars().any(|c| c.is_ascii_digit())
                && s.chars().any(|c| !c.is_alphanumeric())
        },
        "Password must be at least 8 characters and contain an uppercase letter, \
         a lowercase letter, a digit, and a symbol",
    )
}
