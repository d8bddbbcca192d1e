//! Shared form handle
//!
//! [`FormHandle`] wraps a [`FormEngine`] so it can be cloned into event
//! callbacks, the same way `State<T>` wraps a signal and a shared reactive
//! graph. Every clone refers to the same form.
//!
//! ```ignore
//! use blinc_form::prelude::*;
//!
//! let form = use_form(
//!     FormConfig::new().field("email", FieldConfig::new("").required()),
//!     FormOptions::default(),
//! );
//!
//! // In an input's change callback
//! let f = form.clone();
//! move |text: String| { let _ = f.handle_change("email", text); };
//!
//! // Wired to the form's submit trigger
//! let mut on_submit = form.handle_submit(|values| {
//!     tracing::info!("submit {}", values.to_json());
//! });
//! on_submit(&mut SubmitEvent::new());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{FormConfig, FormOptions};
use crate::engine::{FormEngine, SubscriptionHandle};
use crate::error::Result;
use crate::state::FormState;
use crate::submit::{FormValues, SubmitOutcome, SubmitTrigger};
use crate::value::FieldValue;

/// Shared form engine
pub type SharedFormEngine = Arc<Mutex<FormEngine>>;

/// Flag raised whenever the form commits a new snapshot
pub type DirtyFlag = Arc<AtomicBool>;

/// Create a form and return a shared handle to it
pub fn use_form(config: FormConfig, options: FormOptions) -> FormHandle {
    FormHandle::new(config, options)
}

/// Cheap-to-clone handle to a shared [`FormEngine`]
#[derive(Clone, Debug)]
pub struct FormHandle {
    engine: SharedFormEngine,
}

impl FormHandle {
    pub fn new(config: FormConfig, options: FormOptions) -> Self {
        Self::from_engine(FormEngine::new(config, options))
    }

    pub fn from_engine(engine: FormEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Raise `dirty_flag` on every new snapshot so the UI layer rebuilds
    pub fn with_dirty_flag(self, dirty_flag: DirtyFlag) -> Self {
        self.lock().subscribe(move |_| {
            dirty_flag.store(true, Ordering::SeqCst);
        });
        self
    }

    /// The shared engine (for advanced use cases)
    pub fn engine(&self) -> SharedFormEngine {
        Arc::clone(&self.engine)
    }

    fn lock(&self) -> MutexGuard<'_, FormEngine> {
        // A panicking validator must not brick the form
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> Arc<FormState> {
        self.lock().state()
    }

    pub fn values(&self) -> FormValues {
        self.lock().values()
    }

    pub fn is_valid(&self) -> bool {
        self.lock().is_valid()
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().is_dirty()
    }

    pub fn validate_field(&self, name: &str, value: &FieldValue) -> Result<Option<String>> {
        self.lock().validate_field(name, value)
    }

    pub fn validate_form(&self) -> bool {
        self.lock().validate_form()
    }

    pub fn handle_change(&self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.lock().handle_change(name, value)
    }

    pub fn handle_blur(&self, name: &str) -> Result<()> {
        self.lock().handle_blur(name)
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Register a snapshot callback.
    ///
    /// Callbacks run while the form is locked and must not call back into
    /// this handle; read the snapshot they are given instead.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&Arc<FormState>) + Send + Sync + 'static,
    {
        self.lock().subscribe(callback)
    }

    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.lock().unsubscribe(handle)
    }

    /// Run one submission with `on_submit`. See [`FormEngine::submit`].
    ///
    /// The engine lock is released before `on_submit` runs, so the callback
    /// may use this handle (or a clone) freely.
    pub fn submit<T, F>(&self, trigger: &mut T, on_submit: F) -> SubmitOutcome
    where
        T: SubmitTrigger + ?Sized,
        F: FnOnce(FormValues),
    {
        let values = self.lock().prepare_submit(trigger);
        match values {
            Some(values) => {
                on_submit(values);
                SubmitOutcome::Submitted
            }
            None => SubmitOutcome::Blocked,
        }
    }

    /// Build a submit handler to wire to a submission trigger.
    ///
    /// Each invocation behaves like [`FormHandle::submit`]. What `on_submit`
    /// does with the values (including spawning async work) is not tracked.
    pub fn handle_submit<F>(
        &self,
        mut on_submit: F,
    ) -> impl FnMut(&mut dyn SubmitTrigger) -> SubmitOutcome + Send + 'static
    where
        F: FnMut(FormValues) + Send + 'static,
    {
        let form = self.clone();
        move |trigger: &mut dyn SubmitTrigger| form.submit(trigger, &mut on_submit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::REQUIRED_MESSAGE;
    use crate::field::FieldConfig;
    use crate::submit::SubmitEvent;
    use std::sync::atomic::AtomicUsize;

    fn login_form() -> FormHandle {
        use_form(
            FormConfig::new()
                .field("user", FieldConfig::new("").required())
                .field("remember", FieldConfig::new(false)),
            FormOptions::default(),
        )
    }

    #[test]
    fn test_clones_share_state() {
        let form = login_form();
        let other = form.clone();

        other.handle_change("user", "ada").unwrap();
        assert_eq!(
            form.state().field("user").unwrap().value,
            FieldValue::text("ada")
        );
        assert!(form.is_dirty());
    }

    #[test]
    fn test_handle_submit_blocks_then_submits() {
        let form = login_form();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let mut on_submit = form.handle_submit(move |values| {
            assert_eq!(values.len(), 2);
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut event = SubmitEvent::new();
        assert_eq!(on_submit(&mut event), SubmitOutcome::Blocked);
        assert!(event.default_prevented());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            form.state().field("user").unwrap().error.as_deref(),
            Some(REQUIRED_MESSAGE)
        );

        form.handle_change("user", "ada").unwrap();
        assert_eq!(on_submit(&mut SubmitEvent::new()), SubmitOutcome::Submitted);
        assert_eq!(on_submit(&mut SubmitEvent::new()), SubmitOutcome::Submitted);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_submit_callback_can_use_handle() {
        let form = login_form();
        form.handle_change("user", "ada").unwrap();

        let inner = form.clone();
        let outcome = form.submit(&mut (), move |_| {
            // Lock is not held here
            inner.reset();
        });
        assert!(outcome.is_submitted());
        assert!(!form.is_dirty());
    }

    #[test]
    fn test_dirty_flag() {
        let flag: DirtyFlag = Arc::new(AtomicBool::new(false));
        let form = login_form().with_dirty_flag(flag.clone());

        assert!(!flag.load(Ordering::SeqCst));
        form.handle_blur("remember").unwrap();
        assert!(flag.swap(false, Ordering::SeqCst));

        let _ = form.validate_field("user", &FieldValue::Null).unwrap();
        assert!(!flag.load(Ordering::SeqCst));

        form.reset();
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FormHandle>();
    }
}
