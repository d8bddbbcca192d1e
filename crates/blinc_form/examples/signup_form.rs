//! Signup Form Demo
//!
//! This example drives a form the way a component layer would, without any
//! rendering: input events become `handle_change`/`handle_blur` calls and a
//! subscriber "renders" each new snapshot to the log.
//!
//! Features demonstrated:
//! - Required fields, ordered rules and a custom validator
//! - Options loaded from a TOML fragment
//! - Blocked and successful submissions
//! - Resetting back to the initial snapshot
//!
//! Run with: cargo run -p blinc_form --example signup_form

use blinc_form::prelude::*;
use blinc_form::Result;

const OPTIONS: &str = r#"
validate_on_change = true
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = FormConfig::new()
        .field("username", FieldConfig::new("").required().rules([
            Rule::min_length(3, "Username must be at least 3 characters"),
            Rule::pattern(r"^[a-z0-9_]+$", "Only lowercase letters, digits and _")?,
        ]))
        .field(
            "email",
            FieldConfig::new("")
                .required()
                .rule(Rule::email("Enter a valid email address")),
        )
        .field(
            "age",
            FieldConfig::new("").validate(|v| match v.to_number() {
                None if v.is_empty() => None,
                None => Some("Must be a number".to_string()),
                Some(age) if age < 18.0 => Some("Must be at least 18".to_string()),
                Some(_) => None,
            }),
        )
        .field("newsletter", FieldConfig::new(false));

    let form = use_form(config, FormOptions::from_toml_str(OPTIONS)?);

    form.subscribe(|state| {
        for (name, field) in state.iter() {
            if let Some(error) = &field.error {
                tracing::info!("  {} -> {}", name, error);
            }
        }
    });

    let mut on_submit = form.handle_submit(|values| {
        tracing::info!("Submitted: {}", values.to_json());
    });

    tracing::info!("Submitting an empty form");
    let outcome = on_submit(&mut SubmitEvent::new());
    tracing::info!("Outcome: {:?}, valid={}", outcome, form.is_valid());

    tracing::info!("Filling in the form");
    form.handle_change("username", "Ad")?;
    form.handle_change("username", "ada_l")?;
    form.handle_change("email", "ada@example.com")?;
    form.handle_change("age", "17")?;
    form.handle_change("age", "36")?;
    form.handle_change("newsletter", true)?;

    let outcome = on_submit(&mut SubmitEvent::new());
    tracing::info!("Outcome: {:?}, dirty={}", outcome, form.is_dirty());

    form.reset();
    tracing::info!("After reset: dirty={}", form.is_dirty());

    Ok(())
}
