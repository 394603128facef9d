//! # veld-form
//!
//! Field and form controllers with a submission lifecycle, built on the
//! rule engine from [`veld_validator`].
//!
//! A [`FormController`] owns the state of every registered field — values,
//! errors, touched, dirty — plus the form-wide flags, and exposes async
//! operations for updating, validating, resetting, and submitting.
//! Individual inputs talk to it through field controllers: either a
//! [`StandaloneField`] that owns its own state, or a [`BoundField`] handle
//! whose state lives in the form. Both produce [`FieldBinding`] snapshots
//! for a rendering layer.
//!
//! ## Quick start
//!
//! ```rust
//! use veld_form::prelude::*;
//! use veld_validator::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let form = Arc::new(FormController::new(FormOptions::new()));
//!
//! let password = form.bind_field(
//!     "password",
//!     FieldOptions::new().rules(RuleSet::new().with(required()).with(min_length(8))),
//! );
//! let confirm = form.bind_field(
//!     "confirm_password",
//!     FieldOptions::new().rules(RuleSet::new().with(required()).with(matches("password"))),
//! );
//!
//! password.set_value(json!("hunter2hunter2")).await;
//! confirm.set_value(json!("something else")).await;
//! assert!(!form.validate_form().await);
//!
//! confirm.set_value(json!("hunter2hunter2")).await;
//! assert!(form.validate_form().await);
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Controllers are `Send + Sync` and cheaply shared behind `Arc`. Internal
//! state sits behind a `parking_lot::RwLock` that is never held across an
//! `.await`; callbacks and rule evaluation run with it released. Whole-form
//! validation runs every field's pass concurrently, so form latency is
//! bounded by the slowest field. Overlapping validations of the same field
//! are not cancelled — the pass that settles last determines the visible
//! errors.

pub mod binding;
pub mod error;
pub mod field;
pub mod form;
pub mod options;
pub mod prelude;
pub mod state;

pub use binding::FieldBinding;
pub use error::FormError;
pub use field::{BoundField, FieldController, StandaloneField};
pub use form::FormController;
pub use options::{FieldOptions, FormOptions, ValidationTriggers};
pub use state::{FieldFlags, FieldState, FieldStatus, FormState};
