//! JSON value representation.

use std::collections::BTreeMap;
use std::fmt;

/// A JSON value.
///
/// Containers own their children outright; dropping a value releases the
/// whole subtree beneath it.
#[derive(Clone, PartialEq, Default)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// IEEE-754 double.
    Number(f64),
    /// Object (key-ordered map of members).
    Object(BTreeMap<String, Value>),
    /// Array of values.
    Array(Vec<Value>),
    /// Boolean value.
    Boolean(bool),
    /// Explicit JSON `null`.
    #[default]
    Null,
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Number,
    Object,
    Array,
    Boolean,
    Null,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
            Value::Boolean(_) => Kind::Boolean,
            Value::Null => Kind::Null,
        }
    }

    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the elements if this is an `Array`.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns a reference to the members if this is an `Object`.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(arr) => f.debug_list().entries(arr).finish(),
            Value::Object(obj) => f.debug_map().entries(obj).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(obj: BTreeMap<String, Value>) -> Self {
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Value::from("x").kind(), Kind::String);
        assert_eq!(Value::from(1.5).kind(), Kind::Number);
        assert_eq!(Value::from(BTreeMap::new()).kind(), Kind::Object);
        assert_eq!(Value::from(Vec::new()).kind(), Kind::Array);
        assert_eq!(Value::from(true).kind(), Kind::Boolean);
        assert_eq!(Value::default().kind(), Kind::Null);
    }

    #[test]
    fn test_conversions_do_not_coerce() {
        let v = Value::from(0.0);
        assert_eq!(v.as_number(), Some(0.0));
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.as_str(), None);
        assert!(!v.is_null());
    }

    #[test]
    fn test_debug_dump() {
        let mut obj = BTreeMap::new();
        obj.insert("b".to_string(), Value::from(vec![Value::Null, Value::from(true)]));
        obj.insert("a".to_string(), Value::from("hi"));
        assert_eq!(format!("{:?}", Value::from(obj)), r#"{"a": "hi", "b": [null, true]}"#);
    }
}
