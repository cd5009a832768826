//! Ordered, de-duplicated value sets for co-placed names and houses
//!
//! The sheet stores ties as one string joined with `" & "`. That encoding is
//! split once when a row enters the crate and only rebuilt by [`ValueSet::joined`].

use serde::{Deserialize, Serialize};

/// Delimiter used by the data source for co-placed competitors
pub const DELIMITER: &str = " & ";

/// Insertion-ordered set of trimmed, non-empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSet(Vec<String>);

impl ValueSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Split a raw field on the delimiter, trimming and dropping blanks
    pub fn parse(raw: Option<&str>) -> Self {
        let mut set = Self::new();
        if let Some(raw) = raw {
            for part in raw.split(DELIMITER) {
                set.insert(part);
            }
        }
        set
    }

    /// Insert a value, returning false if it was blank or already present
    pub fn insert(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.contains(value) {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    /// Append every value of `other` not already present
    pub fn union_with(&mut self, other: &ValueSet) {
        for value in &other.0 {
            self.insert(value);
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Presentation form: values joined with the delimiter, `None` when empty
    pub fn joined(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(DELIMITER))
        }
    }
}

impl<'a> FromIterator<&'a str> for ValueSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}
