//! Value representation for constants.
//!
//! This module provides two enums:
//!
//! - [`Value`]: what a constant holds once it is in the store (boolean, integer,
//!   float, string, or an untyped raw passthrough)
//! - [`Mixed`]: the loosely typed input accepted by the setters and by the
//!   [`coerce`](crate::coerce) functions
//!
//! ## Creating Inputs
//!
//! Every setter takes `impl Into<Mixed>`, so plain Rust values work directly:
//!
//! ```rust
//! use constfile::Mixed;
//!
//! assert_eq!(Mixed::from(true), Mixed::Bool(true));
//! assert_eq!(Mixed::from(42), Mixed::Int(42));
//! assert_eq!(Mixed::from("7.8"), Mixed::Str("7.8".to_string()));
//! assert!(Mixed::from(vec![1, 2]).is_array());
//! ```
//!
//! ## Raw Values
//!
//! [`Value::Raw`] keeps its input untouched. Raw strings are written verbatim as
//! a source expression, so a raw value does not survive a write/read cycle with
//! its kind intact:
//!
//! ```rust
//! use constfile::{ConstantStore, Value, Mixed};
//!
//! let mut store = ConstantStore::new();
//! store.set_value("LIMIT", "PHP_INT_MAX", None).unwrap();
//! assert_eq!(
//!     store.get("LIMIT").unwrap(),
//!     &Value::Raw(Mixed::Str("PHP_INT_MAX".to_string()))
//! );
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// The value of a stored constant.
///
/// # Examples
///
/// ```rust
/// use constfile::Value;
///
/// let flag = Value::Boolean(true);
/// let port = Value::Integer(8080);
/// let ratio = Value::Float(0.75);
/// let name = Value::from("app");
///
/// assert_eq!(flag.as_bool(), Some(true));
/// assert_eq!(port.as_i64(), Some(8080));
/// assert_eq!(ratio.as_f64(), Some(0.75));
/// assert_eq!(name.as_str(), Some("app"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Untyped passthrough; never holds [`Mixed::Array`].
    Raw(Mixed),
}

/// Loosely typed input for setters and coercions.
///
/// `Array` exists so that composite input can be rejected explicitly with
/// [`Error::UnsupportedValueKind`](crate::Error::UnsupportedValueKind); no
/// store operation accepts it.
#[derive(Clone, Debug, PartialEq)]
pub enum Mixed {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Mixed>),
}

impl Mixed {
    /// Returns `true` if this is a composite value.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Mixed::Array(_))
    }

    /// Short name of the input kind, used in error messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use constfile::Mixed;
    ///
    /// assert_eq!(Mixed::from(1.5).kind_name(), "float");
    /// assert_eq!(Mixed::from(Vec::<i64>::new()).kind_name(), "array");
    /// ```
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Mixed::Bool(_) => "boolean",
            Mixed::Int(_) => "integer",
            Mixed::Float(_) => "float",
            Mixed::Str(_) => "string",
            Mixed::Array(_) => "array",
        }
    }
}

impl Value {
    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value was stored without coercion.
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Value::Raw(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Mixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mixed::Bool(b) => write!(f, "{}", b),
            Mixed::Int(i) => write!(f, "{}", i),
            Mixed::Float(fl) => write!(f, "{}", fl),
            Mixed::Str(s) => write!(f, "{}", s),
            Mixed::Array(items) => {
                write!(
                    f,
                    "[{}]",
                    items
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
            Value::Raw(m) => write!(f, "{}", m),
        }
    }
}

impl Serialize for Mixed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Mixed::Bool(b) => serializer.serialize_bool(*b),
            Mixed::Int(i) => serializer.serialize_i64(*i),
            Mixed::Float(f) => serializer.serialize_f64(*f),
            Mixed::Str(s) => serializer.serialize_str(s),
            Mixed::Array(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Raw(m) => m.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Mixed {
    fn from(value: bool) -> Self {
        Mixed::Bool(value)
    }
}

impl From<i8> for Mixed {
    fn from(value: i8) -> Self {
        Mixed::Int(value as i64)
    }
}

impl From<i16> for Mixed {
    fn from(value: i16) -> Self {
        Mixed::Int(value as i64)
    }
}

impl From<i32> for Mixed {
    fn from(value: i32) -> Self {
        Mixed::Int(value as i64)
    }
}

impl From<i64> for Mixed {
    fn from(value: i64) -> Self {
        Mixed::Int(value)
    }
}

impl From<u8> for Mixed {
    fn from(value: u8) -> Self {
        Mixed::Int(value as i64)
    }
}

impl From<u16> for Mixed {
    fn from(value: u16) -> Self {
        Mixed::Int(value as i64)
    }
}

impl From<u32> for Mixed {
    fn from(value: u32) -> Self {
        Mixed::Int(value as i64)
    }
}

impl From<f32> for Mixed {
    fn from(value: f32) -> Self {
        Mixed::Float(value as f64)
    }
}

impl From<f64> for Mixed {
    fn from(value: f64) -> Self {
        Mixed::Float(value)
    }
}

impl From<String> for Mixed {
    fn from(value: String) -> Self {
        Mixed::Str(value)
    }
}

impl From<&str> for Mixed {
    fn from(value: &str) -> Self {
        Mixed::Str(value.to_string())
    }
}

impl From<&String> for Mixed {
    fn from(value: &String) -> Self {
        Mixed::Str(value.clone())
    }
}

impl<T: Into<Mixed>> From<Vec<T>> for Mixed {
    fn from(value: Vec<T>) -> Self {
        Mixed::Array(value.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Mixed::from(true), Mixed::Bool(true));
        assert_eq!(Mixed::from(42i32), Mixed::Int(42));
        assert_eq!(Mixed::from(42u8), Mixed::Int(42));
        assert_eq!(Mixed::from(3.5f64), Mixed::Float(3.5));
        assert_eq!(Mixed::from("test"), Mixed::Str("test".to_string()));
        assert_eq!(
            Mixed::from("test".to_string()),
            Mixed::Str("test".to_string())
        );
    }

    #[test]
    fn test_from_vec_is_array() {
        let value = Mixed::from(vec!["a", "b"]);
        assert_eq!(
            value,
            Mixed::Array(vec![
                Mixed::Str("a".to_string()),
                Mixed::Str("b".to_string())
            ])
        );
        assert_eq!(value.kind_name(), "array");
    }

    #[test]
    fn test_accessors() {
        let value = Value::Integer(42);
        assert!(value.is_integer());
        assert!(!value.is_float());
        assert_eq!(value.as_i64(), Some(42));
        assert_eq!(value.as_f64(), None);

        let value = Value::Raw(Mixed::Int(1));
        assert!(value.is_raw());
        assert_eq!(value.as_i64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::Float(3.0).to_string(), "3");
        assert_eq!(Value::Raw(Mixed::Str("A | B".to_string())).to_string(), "A | B");
        assert_eq!(Mixed::from(vec![1, 2]).to_string(), "[1,2]");
    }
}
