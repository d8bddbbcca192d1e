//! Form configuration
//!
//! - [`FormConfig`]: the ordered set of fields a form owns
//! - [`FormOptions`]: which interactions trigger validation
//!
//! Options can be embedded in an app's TOML config:
//!
//! ```toml
//! [form]
//! validate_on_change = true
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::FieldConfig;

// =============================================================================
// FormConfig
// =============================================================================

/// Field declarations, keyed by unique field name
///
/// Declaration order is preserved and is the order whole-form validation and
/// submission walk the fields.
#[derive(Clone, Debug, Default)]
pub struct FormConfig {
    fields: IndexMap<String, FieldConfig>,
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field.
    ///
    /// Declaring the same name twice replaces the earlier config in place.
    pub fn field(mut self, name: impl Into<String>, config: FieldConfig) -> Self {
        let name = name.into();
        if self.fields.contains_key(&name) {
            tracing::warn!("Form field '{}' declared twice, keeping the last config", name);
        }
        self.fields.insert(name, config);
        self
    }

    /// Look up a field config by name
    pub fn get(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldConfig)> {
        self.fields.iter().map(|(name, config)| (name.as_str(), config))
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldConfig)> for FormConfig {
    fn from_iter<I: IntoIterator<Item = (K, FieldConfig)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FormConfig::new(), |config, (name, field)| config.field(name, field))
    }
}

// =============================================================================
// FormOptions
// =============================================================================

/// Validation triggers for a form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    /// Validate a field every time its value changes (default: false)
    #[serde(default)]
    pub validate_on_change: bool,
    /// Validate a field when it loses focus (default: true)
    #[serde(default = "default_true")]
    pub validate_on_blur: bool,
    /// Validate the whole form before calling the submit callback (default: true)
    #[serde(default = "default_true")]
    pub validate_on_submit: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_on_change: false,
            validate_on_blur: true,
            validate_on_submit: true,
        }
    }
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    pub fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    pub fn validate_on_submit(mut self, enabled: bool) -> Self {
        self.validate_on_submit = enabled;
        self
    }

    /// Parse options from a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn test_options_defaults() {
        let options = FormOptions::default();
        assert!(!options.validate_on_change);
        assert!(options.validate_on_blur);
        assert!(options.validate_on_submit);
    }

    #[test]
    fn test_options_from_toml() {
        let options = FormOptions::from_toml_str("validate_on_change = true").unwrap();
        assert_eq!(
            options,
            FormOptions::new().validate_on_change(true)
        );

        let options = FormOptions::from_toml_str("").unwrap();
        assert_eq!(options, FormOptions::default());

        let options =
            FormOptions::from_toml_str("validate_on_blur = false\nvalidate_on_submit = false")
                .unwrap();
        assert!(!options.validate_on_blur);
        assert!(!options.validate_on_submit);
    }

    #[test]
    fn test_options_from_bad_toml() {
        let err = FormOptions::from_toml_str("validate_on_change = \"yes\"").unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }

    #[test]
    fn test_config_order_and_duplicates() {
        let config = FormConfig::new()
            .field("name", FieldConfig::new(""))
            .field("email", FieldConfig::new(""))
            .field("name", FieldConfig::new("x").required());

        assert_eq!(config.len(), 2);
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["name", "email"]);
        assert!(config.get("name").unwrap().is_required());
        assert!(config.contains("email"));
        assert!(!config.contains("phone"));
    }

    #[test]
    fn test_config_from_iter() {
        let config: FormConfig = [("a", FieldConfig::new(1)), ("b", FieldConfig::new(2))]
            .into_iter()
            .collect();
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
