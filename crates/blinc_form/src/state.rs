//! Form runtime state
//!
//! [`FormState`] is an immutable snapshot. The engine never edits a snapshot
//! it has handed out: every operation builds a new one and swaps it in, so a
//! rendering layer can keep the previous `Arc<FormState>` around and compare
//! against it.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::FormConfig;
use crate::submit::FormValues;
use crate::value::FieldValue;

/// State of a single field
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FieldState {
    /// Current value
    pub value: FieldValue,
    /// Whether the field has been changed or blurred since the last reset
    pub touched: bool,
    /// Last computed validation message, `None` if valid or never validated
    pub error: Option<String>,
}

impl FieldState {
    fn initial(value: FieldValue) -> Self {
        Self {
            value,
            touched: false,
            error: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Snapshot of every field in a form, in declaration order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormState {
    fields: IndexMap<String, FieldState>,
}

impl FormState {
    /// Build the construction-time snapshot from a config
    pub(crate) fn initial(config: &FormConfig) -> Self {
        Self {
            fields: config
                .iter()
                .map(|(name, field)| {
                    (
                        name.to_string(),
                        FieldState::initial(field.initial_value().clone()),
                    )
                })
                .collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        self.fields.get_mut(name)
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = (&str, &mut FieldState)> {
        self.fields.iter_mut().map(|(name, state)| (name.as_str(), state))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.fields.iter().map(|(name, state)| (name.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True iff no field currently carries an error.
    ///
    /// Fields that were never validated have no error and count as valid.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|field| field.error.is_none())
    }

    /// True iff at least one field is touched
    pub fn is_dirty(&self) -> bool {
        self.fields.values().any(|field| field.touched)
    }

    /// Current values without touched/error bookkeeping
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value.clone()))
            .collect()
    }

    /// Current error messages keyed by field name (valid fields omitted)
    pub fn errors(&self) -> IndexMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, field)| field.error.clone().map(|error| (name.clone(), error)))
            .collect()
    }
}
