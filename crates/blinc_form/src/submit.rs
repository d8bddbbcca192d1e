//! Submission plumbing
//!
//! The engine does not know what a submit event is. Whatever triggers a
//! submission (a form submit event, an Enter key press, a button click)
//! implements [`SubmitTrigger`] so the engine can suppress its default action.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Something that can start a submission and carries a default action
pub trait SubmitTrigger {
    /// Suppress the trigger's default action (page reload, dialog close, ...)
    fn prevent_default(&mut self);
}

/// No trigger object: nothing to suppress
impl SubmitTrigger for () {
    fn prevent_default(&mut self) {}
}

/// Plain submit event that records whether its default was prevented
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl SubmitTrigger for SubmitEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Result of a submit attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed (or was disabled) and the callback ran
    Submitted,
    /// Validation failed; the callback was not called
    Blocked,
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Field values handed to the submit callback, in declaration order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: IndexMap<String, FieldValue>,
}

impl FormValues {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object of the values, for handing to a request body
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), field_value_to_json(value)))
                .collect(),
        )
    }

    pub fn into_inner(self) -> IndexMap<String, FieldValue> {
        self.values
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn field_value_to_json(value: &FieldValue) -> serde_json::Value {
    use serde_json::Value;

    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(v) => Value::Bool(*v),
        FieldValue::Int(v) => Value::from(*v),
        // NaN and infinities have no JSON form
        FieldValue::Float(v) => serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number),
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::List(items) => Value::Array(items.iter().map(field_value_to_json).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_event() {
        let mut event = SubmitEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());

        // Unit trigger is a no-op
        ().prevent_default();
    }

    #[test]
    fn test_outcome() {
        assert!(SubmitOutcome::Submitted.is_submitted());
        assert!(!SubmitOutcome::Blocked.is_submitted());
    }

    #[test]
    fn test_values_to_json() {
        let values: FormValues = vec![
            ("name".to_string(), FieldValue::from("John")),
            ("tags".to_string(), FieldValue::from(vec!["a", "b"])),
            ("ratio".to_string(), FieldValue::Float(f64::NAN)),
            ("none".to_string(), FieldValue::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            values.to_json(),
            serde_json::json!({
                "name": "John",
                "tags": ["a", "b"],
                "ratio": null,
                "none": null,
            })
        );
        assert_eq!(values.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["name", "tags", "ratio", "none"]);
    }
}
