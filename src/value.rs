//! Dynamic values exchanged between the object store, the dispatcher, and
//! invoked callables.

use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A dynamic value: boolean, number, string, or the unit result of a
/// side-effecting operation.
///
/// Variant order matters for deserialization: untagged decoding tries
/// booleans before numbers before strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Num(f64),
    Str(String),
    Unit,
}

impl Value {
    /// Numeric coercion used by the arithmetic operations: numbers pass
    /// through, strings are parsed, booleans coerce to 1/0.
    pub fn as_number(&self) -> Result<f64> {
        match self {
            Value::Num(n) => Ok(*n),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => match s.trim().parse::<f64>() {
                Ok(n) => Ok(n),
                Err(_) => bail!("could not convert '{}' to a number", s),
            },
            Value::Unit => bail!("could not convert unit to a number"),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Num(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Unit => write!(f, "()"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::Num(5.0).as_number().unwrap(), 5.0);
        assert_eq!(Value::Str("10".into()).as_number().unwrap(), 10.0);
        assert_eq!(Value::Str(" 3.5 ".into()).as_number().unwrap(), 3.5);
        assert_eq!(Value::Bool(true).as_number().unwrap(), 1.0);
        assert!(Value::Str("nope".into()).as_number().is_err());
        assert!(Value::Unit.as_number().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Num(30.0).to_string(), "30");
        assert_eq!(Value::Num(3.14159).to_string(), "3.14159");
        assert_eq!(Value::Str("Hello".into()).to_string(), "Hello");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_json_round_trip() {
        let v: Value = serde_json::from_str("42.5").unwrap();
        assert_eq!(v, Value::Num(42.5));
        let v: Value = serde_json::from_str("true").unwrap();
        assert_eq!(v, Value::Bool(true));
        let v: Value = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(v, Value::Str("hi".into()));
        assert_eq!(serde_json::to_string(&Value::Unit).unwrap(), "null");
    }
}
