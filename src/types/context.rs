use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Read-only lookup of the current value of any field in the checkout.
///
/// Implementations return `None` for fields that are unset. Rule evaluation
/// treats `None` and `Some("")` identically, the way raw form submissions
/// behave.
pub trait FieldValues {
    fn current_value(&self, name: &str) -> Option<&str>;
}

impl<T: FieldValues + ?Sized> FieldValues for &T {
    fn current_value(&self, name: &str) -> Option<&str> {
        (**self).current_value(name)
    }
}

impl FieldValues for HashMap<String, String> {
    fn current_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldValues for BTreeMap<String, String> {
    fn current_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Submitted checkout form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    data: HashMap<String, String>,
}

impl FormValues {
    /// Create an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's value, replacing any previous one.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field's value (mutable reference version).
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.data.insert(name.to_owned(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.data.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl FieldValues for FormValues {
    fn current_value(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Submitted values layered over persisted ones.
///
/// A non-empty submitted value wins; an empty or missing one falls through to
/// the persisted value.
#[derive(Debug, Clone, Copy)]
pub struct Layered<S, P> {
    submitted: S,
    persisted: P,
}

impl<S: FieldValues, P: FieldValues> Layered<S, P> {
    pub fn new(submitted: S, persisted: P) -> Self {
        Self {
            submitted,
            persisted,
        }
    }
}

impl<S: FieldValues, P: FieldValues> FieldValues for Layered<S, P> {
    fn current_value(&self, name: &str) -> Option<&str> {
        match self.submitted.current_value(name) {
            Some(v) if !v.is_empty() => Some(v),
            _ => self.persisted.current_value(name),
        }
    }
}
