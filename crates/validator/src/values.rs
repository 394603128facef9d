//! Runtime field value storage
//!
//! Stores only the values of fields, keyed by field name, separate from
//! rule sets and field registrations. The same structure doubles as the
//! sibling-value context handed to cross-field rule predicates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::ops::Index;

/// Runtime storage for field values.
///
/// # Examples
///
/// ```rust
/// use veld_validator::Values;
/// use serde_json::json;
///
/// let mut values = Values::new();
/// values.set("username", json!("alice"));
/// values.set("age", json!(30));
///
/// assert_eq!(values.get("username"), Some(&json!("alice")));
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    values: HashMap<String, Value>,
}

impl Values {
    /// Create a new empty value collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by field name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Set a value for a field.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Remove a value and return it.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Check if a field has a value entry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all name/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Iterate over all field names.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// Get direct access to the internal map (read-only).
    #[must_use]
    pub fn as_map(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Consume and return the internal map.
    #[must_use]
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.values
    }
}

impl FromIterator<(String, Value)> for Values {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Values {
    fn from_iter<T: IntoIterator<Item = (&'a str, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
        }
    }
}

impl Extend<(String, Value)> for Values {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl From<HashMap<String, Value>> for Values {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl From<Values> for HashMap<String, Value> {
    fn from(values: Values) -> Self {
        values.values
    }
}

impl IntoIterator for Values {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl Index<&str> for Values {
    type Output = Value;

    fn index(&self, name: &str) -> &Self::Output {
        &self.values[name]
    }
}
