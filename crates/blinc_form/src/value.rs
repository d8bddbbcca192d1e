//! Field values
//!
//! [`FieldValue`] is the single value representation the form engine works
//! with. The engine never parses or coerces input: the rendering layer hands
//! it an already-parsed value (text from a text input, a bool from a checkbox,
//! a number from a numeric stepper) and rules inspect it through the typed
//! accessors.
//!
//! # Emptiness
//!
//! The required check uses [`FieldValue::is_empty`]:
//!
//! | value               | empty |
//! |---------------------|-------|
//! | `Null`              | yes   |
//! | `Text("")`          | yes   |
//! | `List([])`          | yes   |
//! | `Text("  ")`        | no    |
//! | `Int(0)`/`Float(0.0)` | no  |
//! | `Bool(false)`       | no    |
//!
//! A `0` typed into a numeric field is a real answer, and an unchecked
//! checkbox is a real answer too. Fields that must be checked (terms of
//! service and the like) express that with a rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A form field value.
///
/// Serialization is untagged so values read and write as plain JSON/TOML
/// scalars and arrays (`null`, `true`, `42`, `4.2`, `"text"`, `[...]`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value
    #[default]
    Null,
    /// Boolean value (checkbox, switch)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Multiple values (multi-select, tag input)
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Returns true if this is `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns true if the value counts as "not provided" for required fields.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Bool(_) | FieldValue::Int(_) | FieldValue::Float(_) => false,
        }
    }

    /// Returns true if this is a numeric type (Int or Float).
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Int(_) | FieldValue::Float(_))
    }

    /// Try to get as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert to i64, truncating from Float if needed.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Try to convert to f64, widening from Int if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to get the items of a list value.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Numeric view of the value, parsing text if necessary.
    ///
    /// Used by the numeric rules; the engine itself never coerces values.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Length used by the length rules: characters for text, items for lists.
    pub fn len(&self) -> Option<usize> {
        match self {
            FieldValue::Text(s) => Some(s.chars().count()),
            FieldValue::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::List(vec![]).is_empty());

        assert!(!FieldValue::from(" ").is_empty());
        assert!(!FieldValue::from(0).is_empty());
        assert!(!FieldValue::from(0.0).is_empty());
        assert!(!FieldValue::from(false).is_empty());
        assert!(!FieldValue::from(vec!["a"]).is_empty());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(FieldValue::from("hi").as_str(), Some("hi"));
        assert_eq!(FieldValue::from(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::from(3.9).as_i64(), Some(3));
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from(1).as_str(), None);
        assert_eq!(FieldValue::from(" 18 ").to_number(), Some(18.0));
        assert_eq!(FieldValue::from("abc").to_number(), None);
        assert_eq!(FieldValue::from("héllo").len(), Some(5));
        assert_eq!(FieldValue::from(vec![1, 2]).len(), Some(2));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::text("x"));
    }

    #[test]
    fn test_untagged_json() {
        let value = FieldValue::from(vec![FieldValue::from(1), FieldValue::from("a")]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,"a"]"#);

        let parsed: FieldValue = serde_json::from_str("null").unwrap();
        assert!(parsed.is_null());
        let parsed: FieldValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(parsed, FieldValue::Float(2.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Null.to_string(), "");
        assert_eq!(FieldValue::from(vec!["a", "b"]).to_string(), "a, b");
    }
}
