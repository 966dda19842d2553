//! Argument values passed to rules
//!
//! Rules receive their arguments as `ArgValue`s, a small closed vocabulary of
//! concrete values. Every value sampled from a [`Shape`](crate::shape::Shape)
//! is an `ArgValue`, every recorded step stores its arguments as `ArgValue`s,
//! and the shrinker rewrites them in place when simplifying a trace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete argument value for a rule application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// String value (for enumerated symbolic arguments)
    String(String),
}

impl ArgValue {
    /// Get a canonical string representation for display and comparison
    #[must_use]
    pub fn canonical_string(&self) -> String {
        match self {
            ArgValue::Bool(b) => b.to_string(),
            ArgValue::Int(i) => i.to_string(),
            ArgValue::String(s) => format!("\"{s}\""),
        }
    }

    /// Check if this value is a boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, ArgValue::Bool(_))
    }

    /// Check if this value is an integer
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self, ArgValue::Int(_))
    }

    /// Get as boolean
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as string
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Int(i)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_strings() {
        assert_eq!(ArgValue::Bool(true).canonical_string(), "true");
        assert_eq!(ArgValue::Int(-3).canonical_string(), "-3");
        assert_eq!(ArgValue::String("up".into()).canonical_string(), "\"up\"");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(ArgValue::Int(7).as_int(), Some(7));
        assert_eq!(ArgValue::Int(7).as_bool(), None);
        assert_eq!(ArgValue::Bool(false).as_bool(), Some(false));
        assert_eq!(ArgValue::String("x".into()).as_str(), Some("x"));
        assert!(ArgValue::Int(0).is_int());
        assert!(!ArgValue::Int(0).is_bool());
    }

    #[test]
    fn test_display_matches_canonical() {
        let v = ArgValue::Int(42);
        assert_eq!(format!("{v}"), v.canonical_string());
    }

    #[test]
    fn test_serde_roundtrip() {
        let v = ArgValue::Int(12);
        let json = serde_json::to_string(&v).unwrap();
        let back: ArgValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
