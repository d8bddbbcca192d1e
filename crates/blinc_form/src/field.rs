//! Field configuration
//!
//! [`FieldConfig`] declares how a single field starts out and how it is
//! validated. It is immutable once handed to the engine.
//!
//! ```ignore
//! use blinc_form::prelude::*;
//!
//! let age = FieldConfig::new("")
//!     .required()
//!     .validate(|v| match v.to_number() {
//!         None => Some("Must be a number".into()),
//!         Some(n) if n < 18.0 => Some("Must be at least 18".into()),
//!         Some(_) => None,
//!     });
//! ```

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::rule::Rule;
use crate::value::FieldValue;

/// Custom validator: returns an error message, or `None` if the value is valid
pub type CustomValidator = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Declarative description of a form field
#[derive(Clone)]
pub struct FieldConfig {
    initial_value: FieldValue,
    required: bool,
    rules: SmallVec<[Rule; 4]>,
    validate: Option<CustomValidator>,
}

impl FieldConfig {
    /// Create a field seeded with `initial_value`, not required, no rules
    pub fn new(initial_value: impl Into<FieldValue>) -> Self {
        Self {
            initial_value: initial_value.into(),
            required: false,
            rules: SmallVec::new(),
            validate: None,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the required flag explicitly
    pub fn required_if(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Append a rule (rules run in the order they are added)
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Set the custom validator, run after all rules pass
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validator));
        self
    }

    pub fn initial_value(&self) -> &FieldValue {
        &self.initial_value
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn rules_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn has_custom_validator(&self) -> bool {
        self.validate.is_some()
    }

    pub(crate) fn custom_validator(&self) -> Option<&CustomValidator> {
        self.validate.as_ref()
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("initial_value", &self.initial_value)
            .field("required", &self.required)
            .field("rules", &self.rules)
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let field = FieldConfig::new("");
        assert_eq!(field.initial_value(), &FieldValue::text(""));
        assert!(!field.is_required());
        assert!(field.rules_slice().is_empty());
        assert!(!field.has_custom_validator());
    }

    #[test]
    fn test_builder() {
        let field = FieldConfig::new(5)
            .required()
            .rule(Rule::min(1.0, "a"))
            .rules([Rule::max(10.0, "b"), Rule::max(8.0, "c")])
            .validate(|_| None);

        assert!(field.is_required());
        let messages: Vec<&str> = field.rules_slice().iter().map(Rule::message).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
        assert!(field.has_custom_validator());

        let field = field.required_if(false);
        assert!(!field.is_required());
    }
}
