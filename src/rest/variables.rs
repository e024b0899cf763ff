//! Dirty-tracked custom variables.
//!
//! Every entity carries a free-form `vars` object. [`VariableBag`] holds
//! its current values alongside the subset of names changed since the
//! last save, so that a save sends only those names.

use serde_json::{Map, Value};

/// Custom variables of one entity, with dirty tracking.
///
/// Iteration yields `(name, value)` pairs in insertion order and may be
/// repeated any number of times.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use telerivet::rest::VariableBag;
///
/// let mut vars = VariableBag::from_value(Some(&json!({"country": "KE", "age": 30})));
/// vars.set("age", json!(31));
///
/// assert_eq!(vars.get("age"), Some(&json!(31)));
/// assert_eq!(vars.dirty_variables().len(), 1);
///
/// let names: Vec<&str> = vars.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["country", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableBag {
    values: Map<String, Value>,
    dirty: Map<String, Value>,
}

impl VariableBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a clean bag from a server-provided `vars` value.
    ///
    /// Anything other than a JSON object yields an empty bag.
    #[must_use]
    pub fn from_value(vars: Option<&Value>) -> Self {
        let values = vars
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self {
            values,
            dirty: Map::new(),
        }
    }

    /// Returns the value of a variable, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns `true` if the variable is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Sets a variable and marks it dirty.
    ///
    /// Setting `null` removes the value locally and, once saved, deletes
    /// the variable on the server.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if value.is_null() {
            self.values.shift_remove(&name);
        } else {
            self.values.insert(name.clone(), value.clone());
        }
        self.dirty.insert(name, value);
    }

    /// Removes a variable.
    ///
    /// The name is recorded as dirty with a `null` value so the next save
    /// deletes it on the server.
    pub fn unset(&mut self, name: &str) {
        self.set(name, Value::Null);
    }

    /// Returns a snapshot of all current values.
    #[must_use]
    pub fn all(&self) -> Map<String, Value> {
        self.values.clone()
    }

    /// Returns the variables changed since the last save.
    #[must_use]
    pub const fn dirty_variables(&self) -> &Map<String, Value> {
        &self.dirty
    }

    /// Returns `true` if any variable changed since the last save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Forgets which variables changed. Called after a confirmed save.
    pub fn clear_dirty_variables(&mut self) {
        self.dirty.clear();
    }

    /// Returns the number of variables currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<'a> IntoIterator for &'a VariableBag {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
