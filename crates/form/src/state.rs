//! Field and form state
//!
//! Internal per-field state is a compact flag set plus the current error
//! list; the public surface exposes plain snapshot structs whose fields
//! mirror what a rendering layer needs.

use bitflags::bitflags;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use veld_validator::Values;

bitflags! {
    /// Flags representing the current state of a field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// User has interacted with the field at least once (blur).
        const TOUCHED = 0b0000_0001;
        /// Current value differs from the value recorded at
        /// registration/reset.
        const DIRTY = 0b0000_0010;
        /// A validation pass is in flight.
        const VALIDATING = 0b0000_0100;
        /// The last validation pass produced no errors.
        const VALID = 0b0000_1000;
        /// Field is disabled.
        const DISABLED = 0b0001_0000;
        /// Field is read-only.
        const READ_ONLY = 0b0010_0000;
        /// Field is required.
        const REQUIRED = 0b0100_0000;
    }
}

/// Internal runtime status of a single field: flags plus current errors.
///
/// `VALID` is maintained by [`FieldStatus::set_errors`] so the two can
/// never disagree.
#[derive(Debug, Clone)]
pub struct FieldStatus {
    flags: FieldFlags,
    errors: Vec<String>,
}

impl FieldStatus {
    /// Create a fresh status: untouched, clean, no errors, valid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: FieldFlags::VALID,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.flags.contains(FieldFlags::TOUCHED)
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.flags.contains(FieldFlags::DIRTY)
    }

    #[must_use]
    pub fn is_validating(&self) -> bool {
        self.flags.contains(FieldFlags::VALIDATING)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.flags.contains(FieldFlags::VALID)
    }

    /// Current validation errors (empty if valid).
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Replace the error list wholesale and update `VALID` to match.
    pub fn set_errors(&mut self, errors: Vec<String>) {
        self.flags.set(FieldFlags::VALID, errors.is_empty());
        self.errors = errors;
    }

    /// Clear errors and set `VALID`.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
        self.flags.insert(FieldFlags::VALID);
    }

    pub fn mark_touched(&mut self) {
        self.flags.insert(FieldFlags::TOUCHED);
    }

    pub fn set_touched(&mut self, touched: bool) {
        self.flags.set(FieldFlags::TOUCHED, touched);
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.flags.set(FieldFlags::DIRTY, dirty);
    }

    pub fn set_validating(&mut self, validating: bool) {
        self.flags.set(FieldFlags::VALIDATING, validating);
    }
}

impl Default for FieldStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of one field's state, handed to callbacks and bindings.
#[derive(Debug, Clone, Serialize)]
pub struct FieldState {
    /// The current value.
    pub value: Value,
    /// The field has lost focus (or been explicitly marked) at least once.
    pub touched: bool,
    /// The value differs from the one recorded at registration/reset.
    pub dirty: bool,
    /// A validation pass is in flight.
    pub validating: bool,
    /// `errors` is empty.
    pub valid: bool,
    /// Messages of every failing rule, in rule declaration order.
    pub errors: Vec<String>,
}

/// Snapshot of the whole form's state.
///
/// The `values`, `errors`, `touched`, and `dirty` maps stay in lock-step
/// for every registered field: registering a field seeds all four.
#[derive(Debug, Clone, Serialize)]
pub struct FormState {
    /// Every field's current value.
    pub values: Values,
    /// Every field's current error list.
    pub errors: HashMap<String, Vec<String>>,
    /// Which fields have been touched.
    pub touched: HashMap<String, bool>,
    /// Which fields are dirty.
    pub dirty: HashMap<String, bool>,
    /// All registered fields have empty error lists.
    pub is_valid: bool,
    /// A form-wide validation pass is in flight.
    pub is_validating: bool,
    /// A submit call is in flight.
    pub is_submitting: bool,
    /// A submit has been attempted at least once since the last reset.
    pub is_submitted: bool,
}

impl FormState {
    /// Error list for one field (empty slice if none recorded).
    #[must_use]
    pub fn field_errors(&self, name: &str) -> &[String] {
        self.errors.get(name).map_or(&[], Vec::as_slice)
    }

    /// True if the named field has at least one error.
    #[must_use]
    pub fn has_error(&self, name: &str) -> bool {
        !self.field_errors(name).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_status_is_valid_and_untouched() {
        let status = FieldStatus::new();
        assert!(status.is_valid());
        assert!(!status.is_touched());
        assert!(!status.is_dirty());
        assert!(!status.is_validating());
        assert!(status.errors().is_empty());
    }

    #[test]
    fn set_errors_maintains_valid_flag() {
        let mut status = FieldStatus::new();

        status.set_errors(vec!["boom".into()]);
        assert!(!status.is_valid());
        assert_eq!(status.errors().len(), 1);

        status.set_errors(Vec::new());
        assert!(status.is_valid());

        status.set_errors(vec!["boom".into()]);
        status.clear_errors();
        assert!(status.is_valid());
        assert!(status.errors().is_empty());
    }

    #[test]
    fn touched_and_dirty_flags() {
        let mut status = FieldStatus::new();
        status.mark_touched();
        assert!(status.is_touched());

        status.set_dirty(true);
        assert!(status.is_dirty());
        status.set_dirty(false);
        assert!(!status.is_dirty());
    }
}
