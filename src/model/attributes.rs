//! String-keyed attribute storage for nodes and documents.
//!
//! Attributes follow the AsciiDoc convention: a value is either a string or a
//! boolean flag. An empty string or a `false` flag reads as "not set" through
//! [`Attributes::get_str`], which is what every render rule wants.

use std::collections::BTreeMap;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    Bool(bool),
    Str(String),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Ordered attribute map.
///
/// Ordering is by key so that serialized trees and debug output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Attributes {
    entries: BTreeMap<String, AttrValue>,
}

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder form of [`Attributes::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Get a non-empty string value.
    ///
    /// Boolean flags and empty strings return `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            AttrValue::Str(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Whether the attribute is present and not `false`.
    pub fn is_set(&self, key: &str) -> bool {
        !matches!(self.entries.get(key), None | Some(AttrValue::Bool(false)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return a copy of `self` with every entry of `overrides` applied on top.
    pub fn overlaid(&self, overrides: &Attributes) -> Attributes {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.set(key, value.clone());
        }
        merged
    }
}
