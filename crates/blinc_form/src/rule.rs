//! Validation rules
//!
//! A [`Rule`] is a predicate paired with the message reported when the
//! predicate rejects a value. Rules attached to a field run in declaration
//! order and the first failing rule wins.
//!
//! ```ignore
//! use blinc_form::prelude::*;
//!
//! let password = FieldConfig::new("")
//!     .required()
//!     .rule(Rule::min_length(8, "Password must be at least 8 characters"))
//!     .rule(Rule::new(
//!         |v| v.as_str().is_some_and(|s| s.chars().any(|c| c.is_ascii_digit())),
//!         "Password must contain a digit",
//!     ));
//! ```
//!
//! # Built-in rules
//!
//! The constructors below accept empty values ([`FieldValue::is_empty`]) so
//! that optional fields are only constrained once the user fills them in.
//! Combine them with `required()` to reject empty input.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::error::{FormError, Result};
use crate::value::FieldValue;

/// Shared rule predicate
pub type RulePredicate = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// A validation predicate with its failure message
#[derive(Clone)]
pub struct Rule {
    predicate: RulePredicate,
    message: String,
}

impl Rule {
    /// Create a rule from a predicate returning `true` for acceptable values.
    pub fn new<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// The message reported when this rule fails
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the predicate against a value
    pub fn check(&self, value: &FieldValue) -> bool {
        (self.predicate)(value)
    }

    /// At least `min` characters (text) or items (list).
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::new(
            move |v| v.is_empty() || v.len().is_some_and(|len| len >= min),
            message,
        )
    }

    /// At most `max` characters (text) or items (list).
    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::new(
            move |v| v.is_empty() || v.len().is_some_and(|len| len <= max),
            message,
        )
    }

    /// Numeric value of at least `min`. Text is parsed; unparsable text fails.
    pub fn min(min: f64, message: impl Into<String>) -> Self {
        Self::new(
            move |v| v.is_empty() || v.to_number().is_some_and(|n| n >= min),
            message,
        )
    }

    /// Numeric value of at most `max`. Text is parsed; unparsable text fails.
    pub fn max(max: f64, message: impl Into<String>) -> Self {
        Self::new(
            move |v| v.is_empty() || v.to_number().is_some_and(|n| n <= max),
            message,
        )
    }

    /// Text matching a regular expression.
    ///
    /// Non-text values fail. Returns [`FormError::InvalidPattern`] if the
    /// expression does not compile.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::matching(regex, message))
    }

    /// Text that looks like an email address (`local@domain.tld`).
    pub fn email(message: impl Into<String>) -> Self {
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL
            .get_or_init(|| {
                Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
            })
            .clone();
        Self::matching(regex, message)
    }

    fn matching(regex: Regex, message: impl Into<String>) -> Self {
        Self::new(
            move |v| v.is_empty() || v.as_str().is_some_and(|s| regex.is_match(s)),
            message,
        )
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_rule() {
        let rule = Rule::new(|v| v.as_str().is_some_and(|s| s.len() >= 8), "too short");
        assert_eq!(rule.message(), "too short");
        assert!(!rule.check(&"123".into()));
        assert!(rule.check(&"12345678".into()));
    }

    #[test]
    fn test_length_rules() {
        let min = Rule::min_length(3, "min");
        assert!(min.check(&"".into()));
        assert!(!min.check(&"ab".into()));
        assert!(min.check(&"abc".into()));
        assert!(!min.check(&FieldValue::from(vec!["a"])));

        let max = Rule::max_length(2, "max");
        assert!(max.check(&"ab".into()));
        assert!(!max.check(&"abc".into()));
        // Numbers have no length
        assert!(!max.check(&FieldValue::from(5)));
    }

    #[test]
    fn test_numeric_rules() {
        let adult = Rule::min(18.0, "Must be at least 18");
        assert!(adult.check(&FieldValue::from(18)));
        assert!(adult.check(&"20".into()));
        assert!(!adult.check(&"15".into()));
        assert!(!adult.check(&"abc".into()));
        assert!(adult.check(&FieldValue::Null));

        let cap = Rule::max(10.0, "cap");
        assert!(cap.check(&FieldValue::from(9.5)));
        assert!(!cap.check(&FieldValue::from(11)));
    }

    #[test]
    fn test_pattern_rule() {
        let zip = Rule::pattern(r"^\d{5}$", "Invalid zip").unwrap();
        assert!(zip.check(&"12345".into()));
        assert!(!zip.check(&"1234a".into()));
        assert!(!zip.check(&FieldValue::from(12345)));
        assert!(zip.check(&"".into()));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::pattern("(unclosed", "x").unwrap_err();
        assert!(matches!(err, FormError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_email_rule() {
        let email = Rule::email("Invalid email");
        assert!(email.check(&"john@example.com".into()));
        assert!(!email.check(&"john@example".into()));
        assert!(!email.check(&"john example.com".into()));
        assert!(email.check(&"".into()));
    }
}
