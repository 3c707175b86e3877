//! Values stored for activated options, and the coercers that produce them.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A value assigned to an option's canonical name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
    List(Vec<String>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::List(items) => write!(f, "{}", items.join(",")),
        }
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

/// Current values of one command, keyed by canonical option name.
pub type Values = BTreeMap<String, Value>;

/// Transforms a raw option value before it is stored.
pub type Coercer = Box<dyn Fn(&str) -> Result<Value, String>>;

/// Built-in coercers.
pub mod coerce {
    use super::{Coercer, Value};

    pub fn int(raw: &str) -> Result<Value, String> {
        raw.trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("expected an integer, got '{}'", raw))
    }

    pub fn float(raw: &str) -> Result<Value, String> {
        raw.trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| format!("expected a number, got '{}'", raw))
    }

    /// Comma-separated list; empty items are dropped.
    pub fn list(raw: &str) -> Result<Value, String> {
        Ok(Value::List(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }

    pub fn string(raw: &str) -> Result<Value, String> {
        Ok(Value::Str(raw.to_string()))
    }

    /// Look up a built-in coercer by the name used in manifests.
    pub fn by_name(name: &str) -> Option<Coercer> {
        let coercer: Coercer = match name {
            "int" | "integer" => Box::new(int),
            "float" | "number" => Box::new(float),
            "list" => Box::new(list),
            "string" | "str" => Box::new(string),
            _ => return None,
        };
        Some(coercer)
    }
}
