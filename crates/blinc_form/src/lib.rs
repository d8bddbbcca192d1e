//! Blinc Form
//!
//! Framework-agnostic form state for Blinc components. This crate owns field
//! values, touched flags and validation errors; components only forward
//! change/blur/submit interactions and render what the state says.
//!
//! - **Field config**: initial value, required flag, ordered rules, custom validator
//! - **Form engine**: change/blur/validate/submit/reset with configurable
//!   validation triggers
//! - **Snapshots**: every update produces a fresh `Arc<FormState>`, never an
//!   in-place mutation
//! - **Shared handle**: `use_form` returns a cloneable handle for event callbacks
//!
//! # Example
//!
//! ```rust
//! use blinc_form::prelude::*;
//!
//! let form = use_form(
//!     FormConfig::new()
//!         .field("name", FieldConfig::new("").required())
//!         .field(
//!             "password",
//!             FieldConfig::new("").rule(Rule::min_length(8, "too short")),
//!         ),
//!     FormOptions::default().validate_on_change(true),
//! );
//!
//! form.handle_change("password", "123").unwrap();
//! assert_eq!(
//!     form.state().field("password").unwrap().error.as_deref(),
//!     Some("too short")
//! );
//!
//! let mut submit = form.handle_submit(|values| {
//!     println!("submitting {}", values.to_json());
//! });
//! // `name` is still empty, so the submission is blocked
//! assert_eq!(submit(&mut SubmitEvent::new()), SubmitOutcome::Blocked);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod handle;
pub mod rule;
pub mod state;
pub mod submit;
pub mod value;

pub use config::{FormConfig, FormOptions};
pub use engine::{FormEngine, FormSubscriber, SubscriptionHandle, REQUIRED_MESSAGE};
pub use error::{FormError, Result};
pub use field::{CustomValidator, FieldConfig};
pub use handle::{use_form, DirtyFlag, FormHandle, SharedFormEngine};
pub use rule::{Rule, RulePredicate};
pub use state::{FieldState, FormState};
pub use submit::{FormValues, SubmitEvent, SubmitOutcome, SubmitTrigger};
pub use value::FieldValue;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{FormConfig, FormOptions};
    pub use crate::engine::FormEngine;
    pub use crate::field::FieldConfig;
    pub use crate::handle::{use_form, FormHandle};
    pub use crate::rule::Rule;
    pub use crate::state::{FieldState, FormState};
    pub use crate::submit::{FormValues, SubmitEvent, SubmitOutcome, SubmitTrigger};
    pub use crate::value::FieldValue;
}
