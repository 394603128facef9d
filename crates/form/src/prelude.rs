//! Convenience re-exports for the common path.
//!
//! ```rust
//! use veld_form::prelude::*;
//! ```

pub use crate::binding::FieldBinding;
pub use crate::error::FormError;
pub use crate::field::{BoundField, FieldController, StandaloneField};
pub use crate::form::FormController;
pub use crate::options::{FieldOptions, FormOptions, ValidationTriggers};
pub use crate::state::{FieldState, FormState};
