//! Form engine
//!
//! [`FormEngine`] owns the state of one form and is the only thing that ever
//! produces new [`FormState`] snapshots. Each operation computes a fresh
//! snapshot, swaps it in, then notifies subscribers with it.
//!
//! # Validation order
//!
//! [`FormEngine::validate_field`] evaluates, stopping at the first failure:
//!
//! 1. the required check (`"This field is required"` for empty values)
//! 2. rules, in declaration order
//! 3. the custom validator
//!
//! # Example
//!
//! ```ignore
//! use blinc_form::prelude::*;
//!
//! let config = FormConfig::new()
//!     .field("name", FieldConfig::new("").required())
//!     .field("email", FieldConfig::new("").rule(Rule::email("Invalid email")));
//!
//! let mut form = FormEngine::new(config, FormOptions::default());
//!
//! form.handle_change("name", "John")?;
//! form.handle_blur("name")?;
//!
//! let outcome = form.submit(&mut SubmitEvent::new(), |values| {
//!     println!("Submitting {}", values.to_json());
//! });
//! ```

use std::fmt;
use std::sync::Arc;

use crate::config::{FormConfig, FormOptions};
use crate::error::{FormError, Result};
use crate::field::FieldConfig;
use crate::state::{FieldState, FormState};
use crate::submit::{FormValues, SubmitOutcome, SubmitTrigger};
use crate::value::FieldValue;

/// Message reported for empty required fields
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Callback notified with every new snapshot
pub type FormSubscriber = Box<dyn Fn(&Arc<FormState>) + Send + Sync>;

/// Handle for unsubscribing from form updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: u64,
}

/// Form state and validation engine
pub struct FormEngine {
    config: FormConfig,
    options: FormOptions,
    /// Construction-time snapshot, restored by `reset`
    initial: FormState,
    state: Arc<FormState>,
    subscribers: Vec<(SubscriptionHandle, FormSubscriber)>,
    next_subscription_id: u64,
}

impl FormEngine {
    /// Create an engine with every field at its initial value, untouched and
    /// without errors
    pub fn new(config: FormConfig, options: FormOptions) -> Self {
        let initial = FormState::initial(&config);
        tracing::debug!(
            "FormEngine created with {} fields ({:?})",
            config.len(),
            options
        );
        Self {
            state: Arc::new(initial.clone()),
            initial,
            config,
            options,
            subscribers: Vec::new(),
            next_subscription_id: 0,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<FormState> {
        Arc::clone(&self.state)
    }

    /// Current state of one field
    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.state.field(name)
    }

    /// Current values without touched/error bookkeeping
    pub fn values(&self) -> FormValues {
        self.state.values()
    }

    /// True iff no field currently carries an error
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// True iff at least one field is touched
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate `value` against the config of field `name`.
    ///
    /// Pure: does not touch state or notify subscribers.
    pub fn validate_field(&self, name: &str, value: &FieldValue) -> Result<Option<String>> {
        let field = self.field_config(name)?;
        Ok(run_validation(name, field, value))
    }

    /// Validate every field against its current value, mark every field
    /// touched, and commit the result. Returns true iff no field has an error.
    pub fn validate_form(&mut self) -> bool {
        let mut next = FormState::clone(&self.state);
        for (name, field_state) in next.fields_mut() {
            field_state.touched = true;
            field_state.error = self
                .config
                .get(name)
                .and_then(|field| run_validation(name, field, &field_state.value));
        }

        let valid = next.is_valid();
        tracing::debug!("Form validated: valid={}", valid);
        self.commit(next);
        valid
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Replace the value of `name` and mark it touched.
    ///
    /// The error is recomputed only when `validate_on_change` is enabled;
    /// otherwise the previous error is kept until the next validation.
    pub fn handle_change(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        let validate = self.options.validate_on_change;
        tracing::debug!("Field '{}' changed (validate={})", name, validate);

        self.update_field(name, |field, state| {
            if validate {
                state.error = run_validation(name, field, &value);
            }
            state.value = value;
            state.touched = true;
        })
    }

    /// Mark `name` touched and, when `validate_on_blur` is enabled, validate
    /// its current value.
    pub fn handle_blur(&mut self, name: &str) -> Result<()> {
        let validate = self.options.validate_on_blur;
        tracing::debug!("Field '{}' blurred (validate={})", name, validate);

        self.update_field(name, |field, state| {
            state.touched = true;
            if validate {
                state.error = run_validation(name, field, &state.value);
            }
        })
    }

    /// Run a submission.
    ///
    /// Prevents the trigger's default action, then validates the whole form if
    /// `validate_on_submit` is enabled. On failure `on_submit` is not called and
    /// the error-populated state is left for rendering. Otherwise `on_submit`
    /// receives the current values exactly once.
    pub fn submit<T, F>(&mut self, trigger: &mut T, on_submit: F) -> SubmitOutcome
    where
        T: SubmitTrigger + ?Sized,
        F: FnOnce(FormValues),
    {
        match self.prepare_submit(trigger) {
            Some(values) => {
                on_submit(values);
                SubmitOutcome::Submitted
            }
            None => SubmitOutcome::Blocked,
        }
    }

    /// Everything `submit` does before calling the callback. Returns the
    /// values to submit, or `None` if validation blocked the submission.
    pub(crate) fn prepare_submit<T>(&mut self, trigger: &mut T) -> Option<FormValues>
    where
        T: SubmitTrigger + ?Sized,
    {
        trigger.prevent_default();

        if self.options.validate_on_submit && !self.validate_form() {
            tracing::debug!("Submit blocked by validation errors");
            return None;
        }

        tracing::debug!("Submitting form");
        Some(self.state.values())
    }

    /// Restore the construction-time snapshot: initial values, nothing
    /// touched, no errors.
    pub fn reset(&mut self) {
        tracing::debug!("Form reset");
        self.commit(self.initial.clone());
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback notified with every new snapshot.
    ///
    /// Callbacks run in registration order, after the snapshot is swapped in.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&Arc<FormState>) + Send + Sync + 'static,
    {
        let handle = SubscriptionHandle {
            id: self.next_subscription_id,
        };
        self.next_subscription_id += 1;
        self.subscribers.push((handle, Box::new(callback)));
        handle
    }

    /// Remove a subscription. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(h, _)| *h != handle);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn field_config(&self, name: &str) -> Result<&FieldConfig> {
        self.config.get(name).ok_or_else(|| {
            tracing::warn!("Unknown form field '{}'", name);
            FormError::UnknownField(name.to_string())
        })
    }

    /// Apply `f` to a copy of one field's state and commit the copy
    fn update_field<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&FieldConfig, &mut FieldState),
    {
        let field = self.field_config(name)?;
        let mut next = FormState::clone(&self.state);
        let state = next
            .field_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        f(field, state);
        self.commit(next);
        Ok(())
    }

    /// Swap in a new snapshot and notify subscribers
    fn commit(&mut self, next: FormState) {
        self.state = Arc::new(next);
        for (_, callback) in &self.subscribers {
            callback(&self.state);
        }
    }
}

impl fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Required check, then rules in order, then the custom validator
fn run_validation(name: &str, field: &FieldConfig, value: &FieldValue) -> Option<String> {
    let error = if field.is_required() && value.is_empty() {
        Some(REQUIRED_MESSAGE.to_string())
    } else if let Some(rule) = field.rules_slice().iter().find(|rule| !rule.check(value)) {
        Some(rule.message().to_string())
    } else {
        field.custom_validator().and_then(|validate| validate(value))
    };

    tracing::trace!("Field '{}' validated: error={}", name, error.is_some());
    error
}
