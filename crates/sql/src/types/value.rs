//! Scalar values held in snapshot rows

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlfit_truthness::Scalar;
use std::fmt;

/// An opaque scalar cell value.
///
/// Serialized untagged, so a JSON snapshot row reads naturally as
/// `["John", 30, null]`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrows the value as a comparison operand.
    pub fn as_scalar(&self) -> Scalar<'_> {
        match self {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Boolean(*b),
            Value::I64(i) => Scalar::Number(*i as f64),
            Value::F64(f) => Scalar::Number(*f),
            Value::Str(s) => Scalar::Text(s),
        }
    }

    /// Interprets the value as a condition outcome. NULL is unknown, which a
    /// filter treats as not satisfied.
    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Null => Ok(false),
            Value::I64(n) => Ok(*n != 0),
            Value::F64(n) => Ok(*n != 0.0 && !n.is_nan()),
            Value::Str(_) => Err(Error::InvalidValue(format!(
                "expected boolean, found {}",
                self
            ))),
        }
    }

    /// Numeric view used by arithmetic.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::I64(i) => Some(*i as f64),
            Value::F64(f) => Some(*f),
            Value::Bool(b) => Some(f64::from(*b)),
            Value::Str(s) => s.trim().parse().ok(),
            Value::Null => None,
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::I64(_) => "INTEGER",
            Value::F64(_) => "FLOAT",
            Value::Str(_) => "TEXT",
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::I64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::I64(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::F64(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I64(i) => write!(f, "{}", i),
            Value::F64(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::I64(i) => write!(f, "I64({})", i),
            Value::F64(v) => write!(f, "F64({})", v),
            Value::Str(s) => write!(f, "Str({:?})", s),
        }
    }
}

/// Equality by value, including NULL and NaN. SQL semantics for NULL are
/// handled during evaluation, not here.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::I64(l), Value::I64(r)) => l == r,
            (Value::F64(l), Value::F64(r)) => l.to_bits() == r.to_bits(),
            (Value::Str(l), Value::Str(r)) => l == r,
            (_, _) => false,
        }
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::I64(i) => i.hash(state),
            Value::F64(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_ne!(Value::F64(0.0), Value::F64(-0.0));
        assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
        assert_ne!(Value::I64(1), Value::F64(1.0));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(30), Value::I64(30));
        assert_eq!(Value::from("John"), Value::Str("John".into()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(2.5)), Value::F64(2.5));
    }

    #[test]
    fn test_as_scalar() {
        assert_eq!(Value::I64(3).as_scalar(), Scalar::Number(3.0));
        assert_eq!(Value::Null.as_scalar(), Scalar::Null);
        assert_eq!(Value::from("x").as_scalar(), Scalar::Text("x"));
    }

    #[test]
    fn test_to_bool() {
        assert!(Value::Bool(true).to_bool().unwrap());
        assert!(!Value::Null.to_bool().unwrap());
        assert!(Value::I64(1).to_bool().unwrap());
        assert!(Value::from("yes").to_bool().is_err());
    }

    #[test]
    fn test_untagged_json() {
        let row: Vec<Value> = serde_json::from_str(r#"["John", 30, 2.5, true, null]"#).unwrap();
        assert_eq!(
            row,
            vec![
                Value::from("John"),
                Value::I64(30),
                Value::F64(2.5),
                Value::Bool(true),
                Value::Null
            ]
        );
    }
}
