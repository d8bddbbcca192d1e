//! Error types for blinc_form
//!
//! Validation failures are not errors: they live in
//! [`FieldState::error`](crate::state::FieldState::error). These variants
//! cover programmer and configuration mistakes only.

use thiserror::Error;

/// Errors that can occur when configuring or driving a form
#[derive(Error, Debug)]
pub enum FormError {
    /// A field name that was not declared in the form config
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// A pattern rule was given an invalid regular expression
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Form options could not be parsed
    #[error("Invalid form options: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for blinc_form operations
pub type Result<T> = std::result::Result<T, FormError>;
