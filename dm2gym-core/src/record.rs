//! Auxiliary information returned with environment steps.
//!
//! The gym interface returns a free-form mapping as the fourth element of a step.
//! [`Record`] plays that role here. The adapter itself always returns an empty
//! record; wrappers such as the time limit add entries to it.
//!
//! ```rust
//! use dm2gym_core::record::{Record, RecordValue};
//!
//! let mut info = Record::empty();
//! assert!(info.is_empty());
//!
//! info.insert("TimeLimit.truncated", RecordValue::Bool(true));
//! assert_eq!(info.get_bool("TimeLimit.truncated"), Some(true));
//! ```
use std::collections::HashMap;

/// Value of an entry of [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// Scalar.
    Scalar(f32),

    /// A flag, e.g., `TimeLimit.truncated`.
    Bool(bool),

    /// 1-D array.
    Array1(Vec<f32>),

    /// Text.
    String(String),
}

/// The `info` mapping of a step, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Record without entries.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Record with a single scalar entry.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Sets an entry, replacing the previous value of the key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Value of a key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Scalar value of a key, `None` if missing or of another type.
    pub fn get_scalar(&self, k: &str) -> Option<f32> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    /// Flag of a key, `None` if missing or of another type.
    pub fn get_bool(&self, k: &str) -> Option<bool> {
        match self.0.get(k) {
            Some(RecordValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Union of two records. Entries of `record` win on shared keys.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if there is no entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let mut record = Record::from_scalar("reward", 0.5);
        record.insert("truncated", RecordValue::Bool(false));
        record.insert("name", RecordValue::String("cheetah".into()));

        assert_eq!(record.get_scalar("reward"), Some(0.5));
        assert_eq!(record.get_bool("truncated"), Some(false));
        assert_eq!(record.get_scalar("truncated"), None);
        assert_eq!(record.get_bool("missing"), None);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_merge_overwrites() {
        let r1 = Record::from_scalar("a", 1.0);
        let mut r2 = Record::from_scalar("a", 2.0);
        r2.insert("b", RecordValue::Array1(vec![1.0, 2.0]));

        let merged = r1.merge(r2);
        assert_eq!(merged.get_scalar("a"), Some(2.0));
        assert_eq!(merged.get("b"), Some(&RecordValue::Array1(vec![1.0, 2.0])));
    }
}
